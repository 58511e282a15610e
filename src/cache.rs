use alloc::{collections::BTreeMap, string::String};

use crate::any::AnyValue;

/// Memoized singleton values.
///
/// Insertion derives a new map, so snapshots taken earlier are unaffected;
/// clearing starts over from an empty map.
#[derive(Clone, Default)]
pub(crate) struct SingletonCache {
    map: BTreeMap<String, AnyValue>,
}

impl SingletonCache {
    #[inline]
    #[must_use]
    pub(crate) fn get(&self, name: &str) -> Option<&AnyValue> {
        self.map.get(name)
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    #[must_use]
    pub(crate) fn with_value(&self, name: String, value: AnyValue) -> Self {
        let mut map = self.map.clone();
        map.insert(name, value);
        Self { map }
    }

    /// Derives a cache holding both sides; `other` wins on key collision.
    #[must_use]
    pub(crate) fn merged(&self, other: &SingletonCache) -> Self {
        let mut map = self.map.clone();
        for (name, value) in &other.map {
            map.insert(name.clone(), value.clone());
        }
        Self { map }
    }
}
