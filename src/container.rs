use alloc::string::{String, ToString as _};
use core::any::type_name;

use parking_lot::Mutex;
use tracing::error;

use crate::{
    any::{value, AnyValue},
    args::{Args, ResolveArgs},
    blueprint::{instance, Blueprint},
    errors::{InstantiateErrorKind, RegistryErrorKind, ResolveErrorKind, Traced},
    history::History,
    plan::{Deferred, Resolved},
    registry::{register_blueprint, RegisterOptions},
    resolver::{self, Outcome},
    runner,
    state::State,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety, WeakThreadSafety},
};

struct ContainerInner {
    state: Mutex<State>,
}

/// The public handle over the current registry/singleton snapshot.
///
/// Cloning the container clones the handle; all clones share one state. The
/// lock is held only to snapshot and to swap, never across a factory
/// invocation, so factories may re-enter the container they were resolved
/// from.
#[derive(Clone)]
pub struct Container {
    inner: RcThreadSafety<ContainerInner>,
}

impl Container {
    /// The reserved name the container registers itself under.
    pub const SELF_NAME: &'static str = "container";

    /// Creates an isolated container with only the self entry registered.
    #[must_use]
    pub fn new() -> Self {
        let container = Self {
            inner: RcThreadSafety::new(ContainerInner {
                state: Mutex::new(State::default()),
            }),
        };

        // The self entry holds a weak handle, otherwise the container could
        // never be dropped.
        let weak: WeakThreadSafety<ContainerInner> =
            RcThreadSafety::downgrade(&container.inner);
        let self_entry = Blueprint::leaf(move |_: Args| match weak.upgrade() {
            Some(inner) => Ok(value(Container { inner })),
            None => Err(InstantiateErrorKind::Custom(anyhow::anyhow!(
                "container was dropped"
            ))),
        });
        container
            .register_with(
                Self::SELF_NAME,
                self_entry,
                RegisterOptions::new()
                    .register_source("<loomi>")
                    .filename("<builtin>"),
            )
            .expect("self entry should register into an empty state");

        container
    }

    /// Registers `blueprint` under `name`.
    pub fn register(
        &self,
        name: impl AsRef<str>,
        blueprint: Blueprint,
    ) -> Result<(), RegistryErrorKind> {
        self.register_with(name, blueprint, RegisterOptions::new())
    }

    /// Registers `blueprint` under `name` with per-registration options.
    pub fn register_with(
        &self,
        name: impl AsRef<str>,
        blueprint: Blueprint,
        options: RegisterOptions,
    ) -> Result<(), RegistryErrorKind> {
        let mut guard = self.inner.state.lock();
        let next = register_blueprint(&guard, name.as_ref(), blueprint, &options)?;
        *guard = next;
        Ok(())
    }

    /// Registers an existing value under `name`.
    ///
    /// The entry is always a singleton, so every resolution hands back the
    /// value itself.
    pub fn register_value(
        &self,
        name: impl AsRef<str>,
        val: AnyValue,
    ) -> Result<(), RegistryErrorKind> {
        self.register(name, instance(val))
    }

    /// Resolves `name` and produces its value.
    pub fn resolve(&self, name: impl AsRef<str>) -> Result<AnyValue, Traced<ResolveErrorKind>> {
        self.resolve_with(name, &ResolveArgs::new())
    }

    /// Resolves `name`, filling placeholders from `args`.
    ///
    /// Singletons materialized by the walk are cached only when the whole
    /// call succeeds; after a failure their factories run again on the next
    /// resolve.
    pub fn resolve_with(
        &self,
        name: impl AsRef<str>,
        args: &ResolveArgs,
    ) -> Result<AnyValue, Traced<ResolveErrorKind>> {
        let name = name.as_ref();
        let (item, history) = self.resolve_outcome(name, args)?;
        Ok(runner::run(&item, args, name, &history)?)
    }

    /// Resolves `name` but returns the deferred callable instead of
    /// invoking it.
    pub fn resolve_deferred(
        &self,
        name: impl AsRef<str>,
    ) -> Result<Deferred, Traced<ResolveErrorKind>> {
        self.resolve_deferred_with(name, &ResolveArgs::new())
    }

    /// Resolves `name` into a deferred callable, binding dependency
    /// placeholders from `args`.
    pub fn resolve_deferred_with(
        &self,
        name: impl AsRef<str>,
        args: &ResolveArgs,
    ) -> Result<Deferred, Traced<ResolveErrorKind>> {
        let name = name.as_ref();
        let (item, history) = self.resolve_outcome(name, args)?;
        Ok(Deferred::new(name.to_string(), item, history))
    }

    /// Resolves `name` and downcasts the produced value.
    pub fn get<T>(
        &self,
        name: impl AsRef<str>,
    ) -> Result<RcThreadSafety<T>, Traced<ResolveErrorKind>>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.get_with(name, &ResolveArgs::new())
    }

    /// Resolves `name` with placeholder args and downcasts the produced
    /// value.
    pub fn get_with<T>(
        &self,
        name: impl AsRef<str>,
        args: &ResolveArgs,
    ) -> Result<RcThreadSafety<T>, Traced<ResolveErrorKind>>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        let name = name.as_ref();
        let (item, history) = self.resolve_outcome(name, args)?;
        let val = runner::run(&item, args, name, &history)?;
        match val.downcast::<T>() {
            Ok(typed) => Ok(typed),
            Err(incorrect_type) => {
                let err = Traced::new(
                    ResolveErrorKind::IncorrectType {
                        name: name.to_string(),
                        expected: type_name::<T>(),
                        actual: (*incorrect_type).type_id(),
                    },
                    history,
                );
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Sets the container-wide register source label, returning the
    /// previous one.
    pub fn set_register_source(&self, label: impl Into<String>) -> Option<String> {
        let mut guard = self.inner.state.lock();
        let mut meta = guard.meta().clone();
        let previous = meta.register_source.replace(label.into());
        let next = guard.with_meta(meta);
        *guard = next;
        previous
    }

    /// Disables or re-enables register-source enforcement.
    pub fn set_skip_trace_errors(&self, skip: bool) {
        let mut guard = self.inner.state.lock();
        let mut meta = guard.meta().clone();
        meta.skip_trace_errors = skip;
        let next = guard.with_meta(meta);
        *guard = next;
    }

    /// Drops every memoized singleton value; registrations stay.
    pub fn clear_singletons(&self) {
        let mut guard = self.inner.state.lock();
        let next = guard.with_cleared_singletons();
        *guard = next;
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn is_registered(&self, name: impl AsRef<str>) -> bool {
        self.inner.state.lock().registry().contains(name.as_ref())
    }

    fn resolve_outcome(
        &self,
        name: &str,
        args: &ResolveArgs,
    ) -> Result<(Resolved, History), Traced<ResolveErrorKind>> {
        let snapshot = self.inner.state.lock().clone();
        let Outcome {
            item,
            state,
            history,
        } = resolver::resolve(snapshot, name, args, History::new(), false)?;
        // Resolution never touches the registry or meta, so only the
        // singletons it materialized are merged back; entries cached
        // re-entrantly while the walk ran stay in the live state. A failed
        // walk returns above and keeps the cache as it was.
        self.inner.state.lock().adopt_singletons(&state);
        Ok((item, history))
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}
