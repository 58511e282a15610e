use alloc::{
    collections::BTreeMap,
    string::{String, ToString as _},
};

use tracing::{debug, error, warn};

use crate::{
    blueprint::Blueprint,
    errors::RegistryErrorKind,
    factory::BoxedCloneFactory,
    inject::{self, InjectionSpec},
    state::State,
    utils::thread_safety::RcThreadSafety,
};

/// A registered factory with everything resolution needs to know about it.
pub(crate) struct FactoryData {
    pub(crate) service: BoxedCloneFactory,
    pub(crate) spec: InjectionSpec,
    pub(crate) singleton: bool,
    pub(crate) origin_file: Option<String>,
    pub(crate) register_source: Option<String>,
}

/// The name-keyed factory map.
///
/// Insertion derives a new map; snapshots taken earlier keep the entries
/// they were created with. Entries are never removed.
#[derive(Clone, Default)]
pub(crate) struct Registry {
    entries: BTreeMap<String, RcThreadSafety<FactoryData>>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub(crate) fn get(&self, name: &str) -> Option<&RcThreadSafety<FactoryData>> {
        self.entries.get(name)
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub(crate) fn with_entry(&self, name: String, data: FactoryData) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(name, RcThreadSafety::new(data));
        Self { entries }
    }
}

/// Per-registration overrides and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    pub(crate) force_singleton: bool,
    pub(crate) filename: Option<String>,
    pub(crate) register_source: Option<String>,
    pub(crate) skip_trace: bool,
}

impl RegisterOptions {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caches the produced value even if the blueprint is not a singleton.
    #[must_use]
    pub fn force_singleton(mut self) -> Self {
        self.force_singleton = true;
        self
    }

    /// Overrides the blueprint's origin file.
    #[must_use]
    pub fn filename(mut self, file: impl Into<String>) -> Self {
        self.filename = Some(file.into());
        self
    }

    /// Labels where this registration comes from, overriding the container's
    /// current label.
    #[must_use]
    pub fn register_source(mut self, source: impl Into<String>) -> Self {
        self.register_source = Some(source.into());
        self
    }

    /// Skips register-source enforcement for this registration only.
    #[must_use]
    pub fn skip_trace(mut self) -> Self {
        self.skip_trace = true;
        self
    }
}

pub(crate) fn register_blueprint(
    state: &State,
    name: &str,
    blueprint: Blueprint,
    options: &RegisterOptions,
) -> Result<State, RegistryErrorKind> {
    if name.trim().is_empty() {
        let err = RegistryErrorKind::EmptyName;
        error!("{}", err);
        return Err(err);
    }

    let trace_enabled = !(options.skip_trace || state.meta().skip_trace_errors);
    let register_source = options
        .register_source
        .clone()
        .or_else(|| state.meta().register_source.clone());
    if trace_enabled && register_source.is_none() {
        let err = RegistryErrorKind::MissingRegisterSource {
            name: name.to_string(),
        };
        error!("{}", err);
        return Err(err);
    }

    let origin_file = options
        .filename
        .clone()
        .or_else(|| blueprint.origin_file.clone());
    if trace_enabled && origin_file.is_none() {
        warn!("No origin file for `{}`", name);
    }

    let spec = match inject::parse(&blueprint) {
        Ok(spec) => spec,
        Err(source) => {
            let err = RegistryErrorKind::Depends {
                name: name.to_string(),
                source,
            };
            error!("{}", err);
            return Err(err);
        }
    };

    let singleton = blueprint.singleton || options.force_singleton;
    if state.registry().contains(name) {
        warn!("`{}` is already registered, overwriting", name);
    }

    let next = state.with_entry(
        name.to_string(),
        FactoryData {
            service: blueprint.service,
            spec,
            singleton,
            origin_file,
            register_source,
        },
    );

    debug!("Registered `{}`", name);

    Ok(next)
}
