use thiserror::Error;

/// Internal scan failure. Never surfaces through [`crate::extract`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {index} is out of range ({total} lines)")]
    LineOutOfRange { index: usize, total: usize },
    #[error("header on line {line} is missing its `{group}` capture")]
    MissingCapture { line: usize, group: &'static str },
}
