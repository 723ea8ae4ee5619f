//! Helpers for callers that tokenize more than one line at a time.

use std::ops::Range;

use thiserror::Error;

use crate::{tokenize_line, LexError, LineState, Token, TokenCategory, TokenizedLine};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {}: {source}", .line + 1)]
pub struct DocumentLexError {
    /// 0-based index of the failing line.
    pub line: usize,
    #[source]
    pub source: LexError,
}

/// Flattened token stream of a whole text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentTokens {
    /// Tokens of every line, with a [`TokenCategory::NewLine`] marker of length 1
    /// between consecutive lines.
    pub tokens: Vec<Token>,
    /// State after the last line.
    pub state: LineState,
}

impl DocumentTokens {
    pub fn categories(&self) -> impl Iterator<Item = TokenCategory> + '_ {
        self.tokens.iter().map(|token| token.category)
    }
}

/// Tokenize `text` line by line (split on `\n`), threading the line state.
///
/// The sum of the returned token lengths equals `text.len()`.
pub fn tokenize_text(text: &str, state: LineState) -> Result<DocumentTokens, DocumentLexError> {
    let mut tokenizer = LineTokenizer::new(state);
    let mut tokens = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            tokens.push(Token::new(TokenCategory::NewLine, 1));
        }
        let tokenized = tokenizer.next_line(line)?;
        tokens.extend(tokenized.tokens);
    }

    Ok(DocumentTokens {
        tokens,
        state: tokenizer.state(),
    })
}

/// Streams the lines of one document through [`tokenize_line`].
#[derive(Debug, Clone, Default)]
pub struct LineTokenizer {
    state: LineState,
    line: usize,
}

impl LineTokenizer {
    pub fn new(state: LineState) -> Self {
        Self { state, line: 0 }
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    /// Index of the next line to be tokenized.
    pub fn line_index(&self) -> usize {
        self.line
    }

    /// Tokenize the next line. On failure the carried state is left untouched.
    pub fn next_line(&mut self, line: &str) -> Result<TokenizedLine, DocumentLexError> {
        let tokenized = tokenize_line(line, self.state).map_err(|source| DocumentLexError {
            line: self.line,
            source,
        })?;
        self.state = tokenized.state;
        self.line += 1;
        Ok(tokenized)
    }

    /// Skip a line that could not be tokenized, restarting from `state`.
    pub fn skip_line(&mut self, state: LineState) {
        self.state = state;
        self.line += 1;
    }
}

/// Exit states of every line of an open document.
///
/// Editors keep one cache per buffer. After an edit only the lines whose entry
/// state may have changed are re-tokenized: propagation stops at the first line
/// past the edit whose exit state is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStateCache {
    exit_states: Vec<LineState>,
}

impl LineStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines with a known exit state.
    pub fn len(&self) -> usize {
        self.exit_states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exit_states.is_empty()
    }

    /// State to tokenize line `line` with, if everything before it is known.
    pub fn entry_state(&self, line: usize) -> Option<LineState> {
        match line {
            0 => Some(LineState::INITIAL),
            _ => self.exit_states.get(line - 1).copied(),
        }
    }

    pub fn exit_state(&self, line: usize) -> Option<LineState> {
        self.exit_states.get(line).copied()
    }

    /// Recompute every line from scratch.
    pub fn rebuild<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), DocumentLexError> {
        self.exit_states.clear();
        let mut tokenizer = LineTokenizer::default();
        for line in lines {
            let tokenized = tokenizer.next_line(line)?;
            self.exit_states.push(tokenized.state);
        }
        Ok(())
    }

    /// Account for an edit that replaced `removed` lines starting at `first` with
    /// `inserted` lines. `lines` is the full document after the edit.
    ///
    /// Returns the range of lines that were re-tokenized; their highlighting must
    /// be refreshed. On failure the cache ends before the failing line.
    pub fn apply_edit(
        &mut self,
        lines: &[&str],
        first: usize,
        removed: usize,
        inserted: usize,
    ) -> Result<Range<usize>, DocumentLexError> {
        let first = first.min(self.exit_states.len());
        let removed = removed.min(self.exit_states.len() - first);

        // Lines past the edit keep their old exit states for the convergence check.
        let mut previous: Vec<Option<LineState>> = Vec::with_capacity(lines.len());
        previous.extend(self.exit_states[..first].iter().copied().map(Some));
        previous.extend(std::iter::repeat(None).take(inserted));
        previous.extend(self.exit_states[first + removed..].iter().copied().map(Some));
        previous.truncate(lines.len());

        self.exit_states.truncate(first);
        let mut state = self.entry_state(first).unwrap_or(LineState::INITIAL);
        let mut idx = first;

        while idx < lines.len() {
            let tokenized = tokenize_line(lines[idx], state)
                .map_err(|source| DocumentLexError { line: idx, source })?;
            state = tokenized.state;
            self.exit_states.push(state);
            idx += 1;

            // Inserted lines have no previous state, so this can only hold past them.
            if previous.get(idx - 1).copied().flatten() == Some(state) {
                self.exit_states
                    .extend(previous[idx..].iter().map(|s| s.unwrap_or(LineState::INITIAL)));
                break;
            }
        }

        tracing::trace!(
            target: "nova.highlight",
            first,
            end = idx,
            total = lines.len(),
            "re-tokenized lines after edit"
        );
        Ok(first..idx)
    }
}
