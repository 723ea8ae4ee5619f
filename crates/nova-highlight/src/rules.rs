//! Per-state rule table for the line tokenizer.
//!
//! Every rule is a prefix matcher over the unconsumed remainder of the current
//! line plus the outcome of a match. Rules for a state are tried in table order
//! and the first non-empty match wins; the order below is observable behavior.

use crate::{LexerState, TokenCategory};

/// Returns the byte length of the matched prefix of `rest`, if any.
pub(crate) type Matcher = fn(&str) -> Option<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Emit {
        category: TokenCategory,
        next: LexerState,
    },
    /// Category and next state depend on which keyword matched.
    Keyword,
}

impl Action {
    pub(crate) fn resolve(self, text: &str) -> (TokenCategory, LexerState) {
        match self {
            Action::Emit { category, next } => (category, next),
            Action::Keyword => classify_keyword(text),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct Rule {
    pub(crate) name: &'static str,
    pub(crate) matcher: Matcher,
    pub(crate) action: Action,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("action", &self.action)
            .finish()
    }
}

const fn emit(
    name: &'static str,
    matcher: Matcher,
    category: TokenCategory,
    next: LexerState,
) -> Rule {
    Rule {
        name,
        matcher,
        action: Action::Emit { category, next },
    }
}

use LexerState::*;
use TokenCategory as C;

// `/*`, `//` and `/` share the leading slash; none of the rules between the
// keyword rule and them can match a `/`, so flattening them keeps the
// "slash first, then decide" behavior.
static TOP_LEVEL: [Rule; 12] = [
    emit("whitespace", whitespace, C::Whitespace, TopLevel),
    Rule {
        name: "keyword",
        matcher: keyword,
        action: Action::Keyword,
    },
    emit("function_name", function_name, C::FunctionName, TopLevel),
    emit("block_comment_start", block_comment_start, C::Comment, InsideBlockComment),
    emit("line_comment", line_comment, C::Comment, TopLevel),
    emit("slash", slash, C::Punctuation, TopLevel),
    emit("identifier", identifier, C::Identifier, TopLevel),
    emit("punctuation", punctuation, C::Punctuation, TopLevel),
    emit("numeric", numeric, C::NumericLiteral, TopLevel),
    emit("single_quote", single_quote, C::Punctuation, InsideSingleQuoteString),
    emit("double_quote", double_quote, C::Punctuation, InsideDoubleQuoteString),
    emit("attribute", attribute, C::Attribute, TopLevel),
];

static SINGLE_QUOTE_STRING: [Rule; 2] = [
    emit("single_quote", single_quote, C::Punctuation, TopLevel),
    emit(
        "single_quote_content",
        single_quote_content,
        C::StringLiteral,
        InsideSingleQuoteString,
    ),
];

static DOUBLE_QUOTE_STRING: [Rule; 2] = [
    emit("double_quote", double_quote, C::Punctuation, TopLevel),
    emit(
        "double_quote_content",
        double_quote_content,
        C::StringLiteral,
        InsideDoubleQuoteString,
    ),
];

static AFTER_CLASS_KEYWORD: [Rule; 5] = [
    emit("whitespace", whitespace, C::Whitespace, AfterClassKeyword),
    emit("class_name", identifier, C::ClassName, TopLevel),
    emit("line_comment", line_comment, C::Comment, TopLevel),
    emit("block_comment_start", block_comment_start, C::Comment, InsideBlockComment),
    emit("curly_open", curly_open, C::Punctuation, TopLevel),
];

static BLOCK_COMMENT: [Rule; 3] = [
    emit("block_comment_end", block_comment_end, C::Comment, TopLevel),
    emit("block_comment_body", block_comment_body, C::Comment, InsideBlockComment),
    emit("rest_of_line", rest_of_line, C::Comment, InsideBlockComment),
];

/// The ordered rule list active in `state`.
pub(crate) fn rules_for(state: LexerState) -> &'static [Rule] {
    match state {
        TopLevel => &TOP_LEVEL,
        InsideSingleQuoteString => &SINGLE_QUOTE_STRING,
        InsideDoubleQuoteString => &DOUBLE_QUOTE_STRING,
        AfterClassKeyword => &AFTER_CLASS_KEYWORD,
        InsideBlockComment => &BLOCK_COMMENT,
    }
}

/// First rule of `state` matching a non-empty prefix of `rest`, with the match length.
pub(crate) fn first_match(state: LexerState, rest: &str) -> Option<(&'static Rule, usize)> {
    rules_for(state).iter().find_map(|rule| {
        (rule.matcher)(rest)
            .filter(|&len| len > 0)
            .map(|len| (rule, len))
    })
}

/// Reserved words recognized at top level (case-sensitive).
pub const KEYWORDS: [&str; 50] = [
    "_",
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "void",
    "volatile",
    "while",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Category and follow-up state for a matched keyword.
///
/// `as` is classified as a control keyword even though it is not part of
/// [`KEYWORDS`]; it is only reachable through this function.
pub fn classify_keyword(word: &str) -> (TokenCategory, LexerState) {
    match word {
        "as" | "switch" | "default" | "case" | "else" | "if" | "break" | "throw" | "for"
        | "try" | "catch" | "finally" | "continue" | "while" => (C::KeywordControl, TopLevel),
        "return" => (C::KeywordReturn, TopLevel),
        "new" => (C::KeywordNew, TopLevel),
        "this" => (C::KeywordThis, TopLevel),
        "class" => (C::Keyword, AfterClassKeyword),
        _ => (C::Keyword, TopLevel),
    }
}

// --- Matchers ---

#[inline]
pub(crate) fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || unicode_ident::is_xid_start(c)
}

#[inline]
pub(crate) fn is_ident_continue(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

fn take_while(rest: &str, pred: impl Fn(char) -> bool) -> Option<usize> {
    let len = rest
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(rest.len(), |(idx, _)| idx);
    (len > 0).then_some(len)
}

fn whitespace(rest: &str) -> Option<usize> {
    // U+FEFF shows up as a leading byte-order mark in checked-in sources.
    take_while(rest, |c| c.is_whitespace() || c == '\u{feff}')
}

fn identifier(rest: &str) -> Option<usize> {
    let first = rest.chars().next()?;
    if !is_ident_start(first) {
        return None;
    }
    let tail = &rest[first.len_utf8()..];
    Some(first.len_utf8() + take_while(tail, is_ident_continue).unwrap_or(0))
}

// A keyword has to be the whole identifier run. `$` continues an identifier,
// so `class$x` is a single Identifier, not `class` followed by a class name
// `$x` as an ASCII word boundary would split it.
fn keyword(rest: &str) -> Option<usize> {
    let len = identifier(rest)?;
    is_keyword(&rest[..len]).then_some(len)
}

fn function_name(rest: &str) -> Option<usize> {
    let len = identifier(rest)?;
    rest[len..].starts_with('(').then_some(len)
}

fn block_comment_start(rest: &str) -> Option<usize> {
    rest.starts_with("/*").then_some(2)
}

fn block_comment_end(rest: &str) -> Option<usize> {
    rest.starts_with("*/").then_some(2)
}

fn block_comment_body(rest: &str) -> Option<usize> {
    rest.find("*/")
}

fn line_comment(rest: &str) -> Option<usize> {
    rest.starts_with("//").then_some(rest.len())
}

fn slash(rest: &str) -> Option<usize> {
    rest.starts_with('/').then_some(1)
}

fn punctuation(rest: &str) -> Option<usize> {
    const PUNCTUATION: &[u8] = b":,;{}[].=()>|-*+<";
    let first = *rest.as_bytes().first()?;
    PUNCTUATION.contains(&first).then_some(1)
}

fn numeric(rest: &str) -> Option<usize> {
    take_while(rest, |c| c.is_ascii_digit())
}

fn single_quote(rest: &str) -> Option<usize> {
    rest.starts_with('\'').then_some(1)
}

fn double_quote(rest: &str) -> Option<usize> {
    rest.starts_with('"').then_some(1)
}

fn single_quote_content(rest: &str) -> Option<usize> {
    take_while(rest, |c| c != '\'')
}

fn double_quote_content(rest: &str) -> Option<usize> {
    take_while(rest, |c| c != '"')
}

fn attribute(rest: &str) -> Option<usize> {
    let tail = rest.strip_prefix('@')?;
    take_while(tail, is_ident_continue).map(|len| len + 1)
}

fn curly_open(rest: &str) -> Option<usize> {
    rest.starts_with('{').then_some(1)
}

fn rest_of_line(rest: &str) -> Option<usize> {
    (!rest.is_empty()).then_some(rest.len())
}
