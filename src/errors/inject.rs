use alloc::vec::Vec;

/// Errors found while parsing a blueprint's dependency declaration.
///
/// Invalid entries are collected across the whole declaration before
/// reporting, so the indexes name every offending position at once.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Invalid dependency specifiers at indexes {indexes:?}")]
    InvalidSpecifiers { indexes: Vec<usize> },
    #[error("Invalid placeholder names at indexes {indexes:?}")]
    InvalidPlaceholders { indexes: Vec<usize> },
    #[error("Dependencies len (is {declared}) should be equal to parameters len (is {params})")]
    CountMismatch { declared: usize, params: usize },
}
