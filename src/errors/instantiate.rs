/// Errors a factory can report while producing its value.
///
/// The argument variants are returned by the [`Args`](crate::Args) accessors;
/// anything else a factory wants to signal goes through [`Custom`].
///
/// [`Custom`]: InstantiateErrorKind::Custom
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Missing argument at index {index}")]
    MissingArg { index: usize },
    #[error("Argument at index {index} is absent")]
    AbsentArg { index: usize },
    #[error("Argument at index {index} has unexpected type, expected `{expected}`")]
    ArgType { index: usize, expected: &'static str },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
