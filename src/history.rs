use alloc::{
    string::{String, ToString as _},
    vec::Vec,
};

use crate::registry::FactoryData;

/// One step of a resolution walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub name: String,
    pub origin_file: Option<String>,
    pub register_source: Option<String>,
    pub not_found: bool,
}

impl Visit {
    #[inline]
    #[must_use]
    pub(crate) fn found(name: &str, data: &FactoryData) -> Self {
        Self {
            name: name.to_string(),
            origin_file: data.origin_file.clone(),
            register_source: data.register_source.clone(),
            not_found: false,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn missing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            origin_file: None,
            register_source: None,
            not_found: true,
        }
    }
}

/// The path of visits accumulated while resolving one item.
///
/// Each recursion branch works on its own clone of the parent chain, so
/// sibling branches never observe each other's visits and an item reachable
/// along two branches is not mistaken for a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    visits: Vec<Visit>,
}

impl History {
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { visits: Vec::new() }
    }

    #[inline]
    pub(crate) fn push(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.visits.iter().any(|visit| visit.name == name)
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Visit> {
        self.visits.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{History, Visit};

    #[test]
    fn test_contains_matches_visited_names() {
        let mut history = History::new();
        assert!(history.is_empty());

        history.push(Visit::missing("a"));
        history.push(Visit::missing("b"));

        assert!(history.contains("a"));
        assert!(history.contains("b"));
        assert!(!history.contains("c"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_iter_preserves_visit_order() {
        let mut history = History::new();
        history.push(Visit::missing("first"));
        history.push(Visit::missing("second"));

        let names: alloc::vec::Vec<_> = history.iter().map(|visit| visit.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
