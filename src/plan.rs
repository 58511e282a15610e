use alloc::{string::String, vec::Vec};

use crate::{
    any::AnyValue,
    args::{Args, ResolveArgs},
    errors::{InstantiateErrorKind, InvokeErrorKind, Traced},
    history::History,
    inject::PlaceholderArg,
    registry::FactoryData,
    runner,
    service::Service as _,
    utils::thread_safety::RcThreadSafety,
};

/// A slot of a bound plan: either a resolved dependency value or a gap
/// filled from placeholder args at invoke time.
#[derive(Clone)]
pub(crate) enum Slot {
    Filled(AnyValue),
    Open(PlaceholderArg),
}

/// A factory with its resolved dependencies bound at their declared
/// positions.
#[derive(Clone)]
pub(crate) struct BoundPlan {
    pub(crate) data: RcThreadSafety<FactoryData>,
    pub(crate) slots: Vec<Slot>,
}

impl BoundPlan {
    #[inline]
    #[must_use]
    pub(crate) fn new(data: RcThreadSafety<FactoryData>, slots: Vec<Slot>) -> Self {
        Self { data, slots }
    }

    pub(crate) fn call(&self, args: Args) -> Result<AnyValue, InstantiateErrorKind> {
        self.data.service.clone().call(args)
    }
}

/// What resolution produced for one item.
#[derive(Clone)]
pub(crate) enum Resolved {
    /// A bound factory, possibly with open placeholder slots.
    Plan(BoundPlan),
    /// A singleton value materialized by this resolution.
    Value(AnyValue),
    /// A singleton value short-circuited from the cache.
    CacheHit(AnyValue),
    /// An optional dependency that was not registered.
    Absent,
}

/// A re-invocable resolved item.
///
/// This is what `resolve_deferred` returns and what a factory receives for
/// an as-factory dependency. Dependencies are already bound; each
/// [`invoke`](Self::invoke) fills the open placeholder slots from the given
/// args and runs the factory.
#[derive(Clone)]
pub struct Deferred {
    name: String,
    item: Resolved,
    history: History,
}

impl Deferred {
    #[inline]
    #[must_use]
    pub(crate) fn new(name: String, item: Resolved, history: History) -> Self {
        Self {
            name,
            item,
            history,
        }
    }

    /// Produces the value, filling open slots from `args`.
    pub fn invoke(&self, args: &ResolveArgs) -> Result<AnyValue, Traced<InvokeErrorKind>> {
        runner::run(&self.item, args, &self.name, &self.history)
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The placeholder parameters still open on this item.
    #[must_use]
    pub fn placeholders(&self) -> Vec<PlaceholderArg> {
        match &self.item {
            Resolved::Plan(plan) => plan
                .slots
                .iter()
                .filter_map(|slot| match slot {
                    Slot::Open(arg) => Some(arg.clone()),
                    Slot::Filled(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
