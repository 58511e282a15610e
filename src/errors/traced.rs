use core::fmt::{self, Debug, Display};

use crate::history::History;

/// An error kind bundled with the resolution path that led to it.
///
/// The trace lists visits most recent first, one line per visited item with
/// its origin file and register source when they are known.
#[derive(Debug)]
pub struct Traced<K> {
    kind: K,
    trace: History,
}

impl<K> Traced<K> {
    #[inline]
    #[must_use]
    pub(crate) fn new(kind: K, trace: History) -> Self {
        Self { kind, trace }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &K {
        &self.kind
    }

    #[inline]
    #[must_use]
    pub fn into_kind(self) -> K {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn trace(&self) -> &History {
        &self.trace
    }

    pub(crate) fn map_kind<K2>(self, map: impl FnOnce(K) -> K2) -> Traced<K2> {
        Traced {
            kind: map(self.kind),
            trace: self.trace,
        }
    }
}

impl<K: Display> Display for Traced<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for visit in self.trace.iter().rev() {
            if visit.not_found {
                write!(f, "\n  at `{}` (not registered)", visit.name)?;
            } else {
                write!(
                    f,
                    "\n  at `{}` ({}) registered in [{}]",
                    visit.name,
                    visit.origin_file.as_deref().unwrap_or("?"),
                    visit.register_source.as_deref().unwrap_or("?"),
                )?;
            }
        }
        Ok(())
    }
}

impl<K: Display + Debug> core::error::Error for Traced<K> {}
