use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules;
use crate::{LexerState, LineState, TokenCategory};

/// A classified span of a single line. Tokens are positionless; a token's
/// start is the sum of the lengths of the tokens before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub category: TokenCategory,
    /// Length in UTF-8 bytes.
    pub len: u32,
}

impl Token {
    #[inline]
    pub const fn new(category: TokenCategory, len: u32) -> Self {
        Self { category, len }
    }

    /// Length of `text` (this token's span) in UTF-16 code units, the unit LSP
    /// clients measure columns in.
    pub fn utf16_len(&self, text: &str) -> u32 {
        debug_assert_eq!(text.len(), self.len as usize);
        // Never more UTF-16 units than UTF-8 bytes, and the byte length fits.
        u32::try_from(text.encode_utf16().count()).unwrap_or(self.len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No rule of the active state matches the remainder of the line.
    #[error("unrecognized input {found:?} at byte offset {offset} (state: {state})")]
    UnrecognizedInput {
        state: LexerState,
        offset: u32,
        found: char,
    },
    /// Token lengths and offsets are `u32`; longer lines are rejected up front.
    #[error("line of {len} bytes exceeds the maximum tokenizable length")]
    LineTooLong { len: usize },
}

impl LexError {
    pub fn offset(&self) -> u32 {
        match self {
            LexError::UnrecognizedInput { offset, .. } => *offset,
            LexError::LineTooLong { .. } => 0,
        }
    }
}

/// Narrow a byte count or offset within a line of `line_len` bytes to `u32`.
pub(crate) fn checked_u32(value: usize, line_len: usize) -> Result<u32, LexError> {
    u32::try_from(value).map_err(|_| LexError::LineTooLong { len: line_len })
}

/// Result of tokenizing one line: its tokens plus the state for the next line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenizedLine {
    pub tokens: Vec<Token>,
    pub state: LineState,
}

impl TokenizedLine {
    /// Pairs every token with its text. `line` must be the line that produced `self`.
    pub fn spans<'a>(&'a self, line: &'a str) -> impl Iterator<Item = (Token, &'a str)> + 'a {
        let mut offset = 0usize;
        self.tokens.iter().map(move |token| {
            let start = offset;
            offset += token.len as usize;
            (*token, &line[start..offset])
        })
    }

    pub fn categories(&self) -> impl Iterator<Item = TokenCategory> + '_ {
        self.tokens.iter().map(|token| token.category)
    }

    /// Total covered length; equals the line length for every successful call.
    pub fn text_len(&self) -> usize {
        self.tokens.iter().map(|token| token.len as usize).sum()
    }
}

/// Tokenize a single line (without its line terminator) starting in `state`.
///
/// The emitted token lengths always sum to `line.len()`. Input that no rule of
/// the active state recognizes fails the whole line; tokens produced for the
/// prefix are discarded.
pub fn tokenize_line(line: &str, state: LineState) -> Result<TokenizedLine, LexError> {
    let mut tokens = Vec::new();
    let mut lexer_state = state.lexer_state();
    let mut offset = 0usize;
    checked_u32(line.len(), line.len())?;

    while offset < line.len() {
        let rest = &line[offset..];
        let Some((rule, len)) = rules::first_match(lexer_state, rest) else {
            let found = rest.chars().next().unwrap_or_default();
            tracing::debug!(
                target: "nova.highlight",
                state = %lexer_state,
                offset,
                ?found,
                "no tokenizer rule matches"
            );
            return Err(LexError::UnrecognizedInput {
                state: lexer_state,
                offset: checked_u32(offset, line.len())?,
                found,
            });
        };

        let (category, next) = rule.action.resolve(&rest[..len]);
        tokens.push(Token::new(category, checked_u32(len, line.len())?));
        offset += len;
        lexer_state = next;
    }

    Ok(TokenizedLine {
        tokens,
        state: LineState::new(lexer_state),
    })
}
