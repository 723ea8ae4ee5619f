use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which rule subset of the tokenizer is active at a scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexerState {
    #[default]
    TopLevel,
    InsideSingleQuoteString,
    InsideDoubleQuoteString,
    /// Directly after the `class` keyword; the next identifier is the class name.
    AfterClassKeyword,
    InsideBlockComment,
}

impl LexerState {
    pub const ALL: [LexerState; 5] = [
        LexerState::TopLevel,
        LexerState::InsideSingleQuoteString,
        LexerState::InsideDoubleQuoteString,
        LexerState::AfterClassKeyword,
        LexerState::InsideBlockComment,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LexerState::TopLevel => "top_level",
            LexerState::InsideSingleQuoteString => "inside_single_quote_string",
            LexerState::InsideDoubleQuoteString => "inside_double_quote_string",
            LexerState::AfterClassKeyword => "after_class_keyword",
            LexerState::InsideBlockComment => "inside_block_comment",
        }
    }
}

impl fmt::Display for LexerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lexer state `{0}`")]
pub struct UnknownLexerState(pub String);

impl FromStr for LexerState {
    type Err = UnknownLexerState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownLexerState(s.to_owned()))
    }
}

/// The value an editor threads from one `tokenize_line` call to the next.
///
/// Each open document owns its own `LineState`; it is never shared between
/// documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineState {
    state: LexerState,
}

impl LineState {
    /// State before the first line of a fresh document.
    pub const INITIAL: LineState = LineState {
        state: LexerState::TopLevel,
    };

    #[inline]
    pub const fn new(state: LexerState) -> Self {
        Self { state }
    }

    #[inline]
    pub const fn lexer_state(self) -> LexerState {
        self.state
    }
}

impl From<LexerState> for LineState {
    fn from(state: LexerState) -> Self {
        Self::new(state)
    }
}
