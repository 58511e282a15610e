use alloc::{string::String, vec::Vec};

use crate::{
    any::AnyValue,
    args::Args,
    errors::InstantiateErrorKind,
    factory::{boxed_factory, BoxedCloneFactory, Factory},
    inject::InjectRequest,
    utils::thread_safety::{SendSafety, SyncSafety},
};

/// One entry of an explicit dependency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    /// A raw marker string, e.g. `"db?"`, `"logger()"` or `"key*"`.
    Spec(String),
    /// A pre-built request.
    Request(InjectRequest),
}

impl From<&str> for Specifier {
    fn from(raw: &str) -> Self {
        Self::Spec(raw.into())
    }
}

impl From<String> for Specifier {
    fn from(raw: String) -> Self {
        Self::Spec(raw)
    }
}

impl From<InjectRequest> for Specifier {
    fn from(request: InjectRequest) -> Self {
        Self::Request(request)
    }
}

/// How the parameters of a blueprint bind to the registry and to
/// invoke-time placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum DependsDecl {
    /// No declaration: every parameter is a required placeholder.
    #[default]
    None,
    /// Parameters resolve under their own names, except the listed ones.
    Infer { placeholders: Vec<String> },
    /// One specifier per parameter, in order.
    Explicit(Vec<Specifier>),
}

/// A factory plus the declarations the registrar needs to wire it.
pub struct Blueprint {
    pub(crate) service: BoxedCloneFactory,
    pub(crate) params: Vec<String>,
    pub(crate) depends: DependsDecl,
    pub(crate) singleton: bool,
    pub(crate) origin_file: Option<String>,
}

impl Blueprint {
    /// Creates a blueprint for a factory taking the named parameters.
    ///
    /// Without a later [`depends`](Self::depends) or [`infer`](Self::infer)
    /// call, every parameter is expected as a required placeholder at invoke
    /// time.
    #[must_use]
    pub fn new<F>(params: impl IntoIterator<Item = impl Into<String>>, factory: F) -> Self
    where
        F: Factory + SendSafety + SyncSafety,
    {
        Self {
            service: boxed_factory(factory),
            params: params.into_iter().map(Into::into).collect(),
            depends: DependsDecl::None,
            singleton: false,
            origin_file: None,
        }
    }

    /// Creates a blueprint for a factory with no parameters.
    #[must_use]
    pub fn leaf<F>(factory: F) -> Self
    where
        F: Factory + SendSafety + SyncSafety,
    {
        Self::new(Vec::<String>::new(), factory)
    }

    /// Declares one dependency specifier per parameter, in order.
    #[must_use]
    pub fn depends(mut self, specifiers: impl IntoIterator<Item = impl Into<Specifier>>) -> Self {
        self.depends = DependsDecl::Explicit(specifiers.into_iter().map(Into::into).collect());
        self
    }

    /// Resolves every parameter under its own name, except the listed ones,
    /// which become invoke-time placeholders (a trailing `?` marks an entry
    /// optional).
    #[must_use]
    pub fn infer(mut self, placeholders: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.depends = DependsDecl::Infer {
            placeholders: placeholders.into_iter().map(Into::into).collect(),
        };
        self
    }

    /// Caches the first produced value and reuses it afterwards.
    #[must_use]
    pub fn singleton(mut self) -> Self {
        self.singleton = true;
        self
    }

    /// Records the file the blueprint was declared in, for diagnostics.
    #[must_use]
    pub fn origin_file(mut self, file: impl Into<String>) -> Self {
        self.origin_file = Some(file.into());
        self
    }
}

/// Wraps an existing value as an always-singleton leaf blueprint.
#[must_use]
pub fn instance(val: AnyValue) -> Blueprint {
    Blueprint::leaf(move |_: Args| Ok::<_, InstantiateErrorKind>(val.clone())).singleton()
}

#[cfg(test)]
mod tests {
    use super::instance;
    use crate::{
        any::value, args::Args, service::Service as _, utils::thread_safety::RcThreadSafety,
    };

    #[test]
    fn test_instance_keeps_value_identity() {
        let val = value(5i32);
        let mut blueprint = instance(val.clone());

        assert!(blueprint.singleton);
        let produced = blueprint.service.call(Args::default()).unwrap();
        assert!(RcThreadSafety::ptr_eq(&val, &produced));
    }
}
