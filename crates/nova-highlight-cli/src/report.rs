use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nova_highlight::{LexerState, LineState, LineTokenizer, TokenCategory};
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::{OnError, TokenizeConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenReport {
    /// `None` for an unstyled span produced by [`OnError::Plain`].
    pub category: Option<TokenCategory>,
    pub name: &'static str,
    /// 1-based byte column.
    pub column: usize,
    /// Length in UTF-8 bytes.
    pub len: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    /// 1-based line number.
    pub line: usize,
    pub tokens: Vec<TokenReport>,
    /// State carried into the next line.
    pub state: LexerState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub lines: Vec<LineReport>,
    pub errors: Vec<LineError>,
    /// State after the last tokenized line.
    pub state: LexerState,
}

impl FileReport {
    pub fn token_count(&self) -> usize {
        self.lines.iter().map(|line| line.tokens.len()).sum()
    }
}

/// Tokenize `text` line by line, applying the configured error policy.
pub fn tokenize_document(
    path: &Path,
    text: &str,
    initial: LineState,
    on_error: OnError,
) -> FileReport {
    let mut tokenizer = LineTokenizer::new(initial);
    let mut lines = Vec::new();
    let mut errors = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        match tokenizer.next_line(line) {
            Ok(tokenized) => {
                let mut column = 1;
                let tokens = tokenized
                    .spans(line)
                    .map(|(token, span)| {
                        let report = TokenReport {
                            category: Some(token.category),
                            name: token.category.display_name(),
                            column,
                            len: span.len(),
                            text: span.to_owned(),
                        };
                        column += span.len();
                        report
                    })
                    .collect();
                lines.push(LineReport {
                    line: idx + 1,
                    tokens,
                    state: tokenized.state.lexer_state(),
                });
            }
            Err(err) => {
                errors.push(LineError {
                    line: idx + 1,
                    column: err.source.offset() as usize + 1,
                    message: err.source.to_string(),
                });
                match on_error {
                    OnError::Fail => break,
                    OnError::Plain => {
                        tokenizer.skip_line(LineState::INITIAL);
                        lines.push(LineReport {
                            line: idx + 1,
                            tokens: vec![TokenReport {
                                category: None,
                                name: "Plain",
                                column: 1,
                                len: line.len(),
                                text: line.to_owned(),
                            }],
                            state: LexerState::TopLevel,
                        });
                    }
                }
            }
        }
    }

    tracing::debug!(
        target: "nova.highlight.cli",
        path = %path.display(),
        lines = lines.len(),
        errors = errors.len(),
        "tokenized document"
    );

    FileReport {
        path: path.to_path_buf(),
        lines,
        errors,
        state: tokenizer.state().lexer_state(),
    }
}

pub fn tokenize_file(path: &Path, initial: LineState, on_error: OnError) -> Result<FileReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let text = text.replace("\r\n", "\n");
    Ok(tokenize_document(path, &text, initial, on_error))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedFile {
    pub path: PathBuf,
    pub lines: usize,
    pub tokens: usize,
    pub errors: Vec<LineError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub files: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub files: Vec<CheckedFile>,
    pub summary: CheckSummary,
}

/// Tokenize every matching file under `root` (or `root` itself if it is a file).
pub fn check_path(root: &Path, config: &TokenizeConfig) -> Result<CheckReport> {
    let mut paths = Vec::new();
    if root.is_file() {
        paths.push(root.to_path_buf());
    } else {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            if entry.file_type().is_file() && config.matches_extension(entry.path()) {
                paths.push(entry.into_path());
            }
        }
    }

    let mut report = CheckReport::default();
    for path in paths {
        let file = tokenize_file(&path, LineState::INITIAL, config.on_error)?;
        if !file.errors.is_empty() {
            report.summary.failed += 1;
        }
        report.files.push(CheckedFile {
            tokens: file.token_count(),
            lines: file.lines.len(),
            errors: file.errors,
            path: file.path,
        });
    }
    report.summary.files = report.files.len();
    Ok(report)
}
