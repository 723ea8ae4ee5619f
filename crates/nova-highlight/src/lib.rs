//! Line-oriented Java tokenizer for syntax highlighting.
//!
//! Editors call [`tokenize_line`] once per visible line, passing the
//! [`LineState`] returned for the previous line. The state is the only context
//! carried between lines; it lets block comments (and unterminated string
//! literals) continue across line boundaries without re-scanning the document.
//!
//! ```
//! use nova_highlight::{tokenize_line, LineState, TokenCategory};
//!
//! let first = tokenize_line("/* start", LineState::INITIAL).unwrap();
//! let second = tokenize_line("end */ return", first.state).unwrap();
//! assert_eq!(second.tokens[0].category, TokenCategory::Comment);
//! assert_eq!(second.state, LineState::INITIAL);
//! ```
//!
//! The tokenizer is a pure function of `(line, state)`: it does no I/O, keeps no
//! global mutable state and may be called from any number of threads, as long as
//! each document carries its own `LineState`.

mod category;
mod document;
mod rules;
mod state;
mod tokenizer;

pub use category::TokenCategory;
pub use document::{tokenize_text, DocumentLexError, DocumentTokens, LineStateCache, LineTokenizer};
pub use rules::{classify_keyword, is_keyword, KEYWORDS};
pub use state::{LexerState, LineState, UnknownLexerState};
pub use tokenizer::{tokenize_line, LexError, Token, TokenizedLine};
