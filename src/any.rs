use crate::utils::thread_safety::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety};

/// A dynamically typed, reference-counted value produced by factories and
/// stored in the singleton cache.
pub type AnyValue = RcAnyThreadSafety;

/// Wraps a concrete value for registration or for a placeholder bag.
#[inline]
#[must_use]
pub fn value<T: SendSafety + SyncSafety + 'static>(val: T) -> AnyValue {
    RcThreadSafety::new(val)
}

/// Marker bound in place of an optional dependency or placeholder that was
/// not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Absent;

/// Returns `true` if the value is the [`Absent`] marker.
#[inline]
#[must_use]
pub fn is_absent(val: &AnyValue) -> bool {
    val.is::<Absent>()
}
