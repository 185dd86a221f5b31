//! Filter values held by a collection view.

use std::fmt::Debug;

/// The query a list view is currently showing.
///
/// Filters are compared structurally: a cursor only resets when the new
/// value differs from the current one. The `Default` value is the unfiltered
/// query, which is what [`ListFilters::is_active`] compares against.
pub trait ListFilters: Clone + PartialEq + Debug + Default + Send + Sync + 'static {
    /// Whether any filter differs from the default query.
    fn is_active(&self) -> bool {
        *self != Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Query {
        search: Option<String>,
        unread_only: bool,
    }

    impl ListFilters for Query {}

    #[test]
    fn test_default_is_inactive() {
        assert!(!Query::default().is_active());
    }

    #[test]
    fn test_any_changed_field_is_active() {
        let q = Query {
            unread_only: true,
            ..Default::default()
        };
        assert!(q.is_active());

        let q = Query {
            search: Some("rust".to_string()),
            ..Default::default()
        };
        assert!(q.is_active());
    }
}
