use alloc::string::String;

use crate::{
    any::AnyValue,
    cache::SingletonCache,
    registry::{FactoryData, Registry},
};

/// Container-wide flags and labels that travel with the state snapshot.
#[derive(Debug, Clone, Default)]
pub(crate) struct Meta {
    pub(crate) register_source: Option<String>,
    pub(crate) skip_trace_errors: bool,
}

/// One immutable snapshot of everything the container knows.
///
/// Mutations derive a structurally new snapshot. Resolution takes a snapshot
/// by value, threads it through the walk and hands it back; the container
/// then adopts the singletons it produced.
#[derive(Clone, Default)]
pub(crate) struct State {
    registry: Registry,
    singletons: SingletonCache,
    meta: Meta,
}

impl core::fmt::Debug for State {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("State")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

impl State {
    #[inline]
    #[must_use]
    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub(crate) fn singletons(&self) -> &SingletonCache {
        &self.singletons
    }

    #[inline]
    #[must_use]
    pub(crate) fn meta(&self) -> &Meta {
        &self.meta
    }

    #[must_use]
    pub(crate) fn with_entry(&self, name: String, data: FactoryData) -> Self {
        Self {
            registry: self.registry.with_entry(name, data),
            singletons: self.singletons.clone(),
            meta: self.meta.clone(),
        }
    }

    #[must_use]
    pub(crate) fn with_singleton(&self, name: String, value: AnyValue) -> Self {
        Self {
            registry: self.registry.clone(),
            singletons: self.singletons.with_value(name, value),
            meta: self.meta.clone(),
        }
    }

    #[must_use]
    pub(crate) fn with_cleared_singletons(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            singletons: SingletonCache::default(),
            meta: self.meta.clone(),
        }
    }

    #[must_use]
    pub(crate) fn with_meta(&self, meta: Meta) -> Self {
        Self {
            registry: self.registry.clone(),
            singletons: self.singletons.clone(),
            meta,
        }
    }

    /// Merges the singletons another snapshot accumulated into this one;
    /// the registry and meta of `self` stay as they are.
    ///
    /// Merging rather than replacing keeps entries the live state gained
    /// after `other` was snapshotted, e.g. singletons a factory
    /// materialized re-entrantly through the container's self entry.
    pub(crate) fn adopt_singletons(&mut self, other: &State) {
        self.singletons = self.singletons.merged(&other.singletons);
    }
}
