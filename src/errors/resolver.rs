use alloc::string::String;
use core::any::TypeId;

use super::{runner::InvokeErrorKind, traced::Traced};

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("`{name}` is not registered")]
    NotRegistered { name: String },
    #[error("`{name}` is cyclic in its dependency chain")]
    CyclicDependency { name: String },
    #[error("`{name}` has incorrect type, expected `{expected}`, actual id {actual:?}")]
    IncorrectType {
        name: String,
        expected: &'static str,
        actual: TypeId,
    },
    #[error(transparent)]
    Invoke(#[from] InvokeErrorKind),
}

impl From<Traced<InvokeErrorKind>> for Traced<ResolveErrorKind> {
    #[inline]
    fn from(err: Traced<InvokeErrorKind>) -> Self {
        err.map_kind(ResolveErrorKind::Invoke)
    }
}
