use alloc::string::String;

use super::instantiate::InstantiateErrorKind;

/// Errors raised while invoking a resolved item.
#[derive(thiserror::Error, Debug)]
pub enum InvokeErrorKind {
    #[error("Missing placeholder `{name}` for `{item}`")]
    MissingPlaceholder { item: String, name: String },
    #[error(transparent)]
    Factory(#[from] InstantiateErrorKind),
}
