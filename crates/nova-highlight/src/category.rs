use std::fmt;

use serde_repr::{Deserialize_repr, Serialize_repr};

/// Classification assigned to every span produced by the line tokenizer.
///
/// The numeric values are part of the public contract: renderers persist and
/// exchange them, so variants must never be renumbered. New categories are
/// appended at the end.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr,
)]
#[repr(u8)]
pub enum TokenCategory {
    Whitespace = 0,
    /// Logical line separator inserted between lines by document-level helpers.
    /// The line tokenizer itself never emits it.
    NewLine = 1,
    Keyword = 2,
    KeywordControl = 3,
    KeywordReturn = 4,
    KeywordNew = 5,
    KeywordThis = 6,
    Identifier = 7,
    FunctionName = 8,
    Punctuation = 9,
    StringLiteral = 10,
    NumericLiteral = 11,
    Attribute = 12,
    ClassName = 13,
    Comment = 14,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 15] = [
        TokenCategory::Whitespace,
        TokenCategory::NewLine,
        TokenCategory::Keyword,
        TokenCategory::KeywordControl,
        TokenCategory::KeywordReturn,
        TokenCategory::KeywordNew,
        TokenCategory::KeywordThis,
        TokenCategory::Identifier,
        TokenCategory::FunctionName,
        TokenCategory::Punctuation,
        TokenCategory::StringLiteral,
        TokenCategory::NumericLiteral,
        TokenCategory::Attribute,
        TokenCategory::ClassName,
        TokenCategory::Comment,
    ];

    /// Name renderers use to pick a display style for this category.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenCategory::Whitespace => "Whitespace",
            TokenCategory::NewLine => "NewLine",
            TokenCategory::Keyword => "Keyword",
            TokenCategory::KeywordControl => "KeywordControl",
            TokenCategory::KeywordReturn => "KeywordReturn",
            TokenCategory::KeywordNew => "KeywordNew",
            TokenCategory::KeywordThis => "KeywordThis",
            TokenCategory::Identifier => "VariableName",
            TokenCategory::FunctionName => "Function",
            TokenCategory::Punctuation => "Punctuation",
            TokenCategory::StringLiteral => "String",
            TokenCategory::NumericLiteral => "Numeric",
            TokenCategory::Attribute => "Attribute",
            TokenCategory::ClassName => "Class",
            TokenCategory::Comment => "Comment",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.display_name() == name)
    }

    #[inline]
    pub const fn to_raw(self) -> u8 {
        self as u8
    }

    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(usize::from(raw)).copied()
    }

    /// Keyword-like categories (everything a renderer would style as a keyword).
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenCategory::Keyword
                | TokenCategory::KeywordControl
                | TokenCategory::KeywordReturn
                | TokenCategory::KeywordNew
                | TokenCategory::KeywordThis
        )
    }

    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenCategory::Whitespace | TokenCategory::NewLine | TokenCategory::Comment
        )
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
