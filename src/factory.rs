use crate::{
    any::AnyValue,
    args::Args,
    errors::InstantiateErrorKind,
    service::{BoxCloneService, FnService},
    utils::thread_safety::{SendSafety, SyncSafety},
};

/// Result type produced by factories.
pub type FactoryResult = Result<AnyValue, InstantiateErrorKind>;

/// A callable that produces a dynamically typed value from positional [`Args`].
///
/// Implemented for every `FnMut(Args) -> Result<AnyValue, E>` closure whose
/// error type converts into [`InstantiateErrorKind`].
pub trait Factory: Clone + 'static {
    type Error: Into<InstantiateErrorKind>;

    fn invoke(&mut self, args: Args) -> Result<AnyValue, Self::Error>;
}

impl<F, Err> Factory for F
where
    F: FnMut(Args) -> Result<AnyValue, Err> + Clone + 'static,
    Err: Into<InstantiateErrorKind>,
{
    type Error = Err;

    #[inline]
    fn invoke(&mut self, args: Args) -> Result<AnyValue, Self::Error> {
        self(args)
    }
}

pub(crate) type BoxedCloneFactory = BoxCloneService<Args, AnyValue, InstantiateErrorKind>;

#[must_use]
pub(crate) fn boxed_factory<F>(factory: F) -> BoxedCloneFactory
where
    F: Factory + SendSafety + SyncSafety,
{
    BoxCloneService::new(FnService(move |args: Args| -> FactoryResult {
        match factory.clone().invoke(args) {
            Ok(value) => Ok(value),
            Err(err) => Err(err.into()),
        }
    }))
}
