use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::any::type_name;

use crate::{
    any::{is_absent, AnyValue},
    errors::InstantiateErrorKind,
    plan::Deferred,
};

/// The ordered positional values a factory receives.
#[derive(Clone, Default)]
pub struct Args {
    values: Vec<AnyValue>,
}

impl Args {
    #[inline]
    #[must_use]
    pub(crate) fn new(values: Vec<AnyValue>) -> Self {
        Self { values }
    }

    /// Returns the raw value at `index`.
    #[inline]
    pub fn raw(&self, index: usize) -> Result<&AnyValue, InstantiateErrorKind> {
        self.values
            .get(index)
            .ok_or(InstantiateErrorKind::MissingArg { index })
    }

    /// Downcasts the value at `index`, rejecting the absent marker.
    pub fn get<T: 'static>(&self, index: usize) -> Result<&T, InstantiateErrorKind> {
        let val = self.raw(index)?;
        if is_absent(val) {
            return Err(InstantiateErrorKind::AbsentArg { index });
        }
        val.downcast_ref().ok_or(InstantiateErrorKind::ArgType {
            index,
            expected: type_name::<T>(),
        })
    }

    /// Downcasts the value at `index`, mapping the absent marker to `None`.
    pub fn opt<T: 'static>(&self, index: usize) -> Result<Option<&T>, InstantiateErrorKind> {
        let val = self.raw(index)?;
        if is_absent(val) {
            return Ok(None);
        }
        val.downcast_ref()
            .map(Some)
            .ok_or(InstantiateErrorKind::ArgType {
                index,
                expected: type_name::<T>(),
            })
    }

    /// Returns the deferred callable bound for an as-factory dependency.
    #[inline]
    pub fn deferred(&self, index: usize) -> Result<&Deferred, InstantiateErrorKind> {
        self.get(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Late-bound placeholder values supplied at invoke time.
///
/// A value lives either in a bag scoped to one item (keyed by the item's
/// registered name) or in the common bag shared by every item. Per-item
/// entries win on collision.
#[derive(Clone, Default)]
pub struct ResolveArgs {
    items: BTreeMap<String, BTreeMap<String, AnyValue>>,
    common: BTreeMap<String, AnyValue>,
}

impl ResolveArgs {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies `value` for placeholder `name` of the item `item` only.
    #[must_use]
    pub fn insert(
        mut self,
        item: impl Into<String>,
        name: impl Into<String>,
        value: AnyValue,
    ) -> Self {
        self.items
            .entry(item.into())
            .or_default()
            .insert(name.into(), value);
        self
    }

    /// Supplies `value` for placeholder `name` of every item.
    #[must_use]
    pub fn insert_common(mut self, name: impl Into<String>, value: AnyValue) -> Self {
        self.common.insert(name.into(), value);
        self
    }

    pub(crate) fn lookup(&self, item: &str, name: &str) -> Option<&AnyValue> {
        self.items
            .get(item)
            .and_then(|bag| bag.get(name))
            .or_else(|| self.common.get(name))
    }
}
