//! Compiled route table.
//!
//! # Responsibilities
//! - Compile constraint expressions into `Constraint`s
//! - Fix the evaluation order once at startup
//! - Look up the first entry a version satisfies
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Ordered by descending constraint bound: `3` before `2` before `>=1`
//! - Stable sort, so entries with equal bounds keep declaration order
//! - O(n) scan; route tables hold a handful of versions

use axum::Router;

use crate::versioning::constraint::Constraint;
use crate::versioning::error::SetupError;
use crate::versioning::version::ApiVersion;

/// One row of the table: a constraint and the service that handles it.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub constraint: Constraint,
    pub handler: Router,
}

/// Route entries in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Compile `(expression, handler)` pairs into a table.
    ///
    /// Fails on the first expression that does not compile.
    pub fn build<I, K>(routes: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = (K, Router)>,
        K: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (expression, handler) in routes {
            let constraint = Constraint::compile(expression.as_ref())?;
            entries.push(RouteEntry { constraint, handler });
        }

        entries.sort_by(|a, b| b.constraint.bound().cmp(a.constraint.bound()));

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.constraint == entry.constraint) {
                tracing::warn!(
                    constraint = %entry.constraint,
                    expression = entry.constraint.expression(),
                    "Duplicate constraint is shadowed by an earlier route"
                );
            }
        }

        if entries.is_empty() {
            tracing::warn!("Route table is empty; every request will be rejected");
        }

        Ok(Self { entries })
    }

    /// First entry, in evaluation order, whose constraint the version satisfies.
    pub fn resolve(&self, version: &ApiVersion) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.constraint.matches(version))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(exprs: &[&str]) -> RouteTable {
        RouteTable::build(exprs.iter().map(|e| (*e, Router::new()))).unwrap()
    }

    fn order(table: &RouteTable) -> Vec<&str> {
        table.entries().iter().map(|e| e.constraint.expression()).collect()
    }

    fn resolved<'a>(table: &'a RouteTable, version: &str) -> Option<&'a str> {
        table
            .resolve(&ApiVersion::parse(version).unwrap())
            .map(|e| e.constraint.expression())
    }

    #[test]
    fn test_sorted_by_descending_bound() {
        let t = table(&[">=1", "2", "3"]);
        assert_eq!(order(&t), ["3", "2", ">=1"]);

        let t = table(&["3", ">=1", "2"]);
        assert_eq!(order(&t), ["3", "2", ">=1"]);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let t = table(&["1", ">=1", "^1", "2"]);
        assert_eq!(order(&t), ["2", "1", ">=1", "^1"]);

        let t = table(&["^1", ">=1", "1", "2"]);
        assert_eq!(order(&t), ["2", "^1", ">=1", "1"]);
    }

    #[test]
    fn test_only_satisfied_constraint_selected() {
        let t = table(&[">=1", "2", "3"]);
        assert_eq!(resolved(&t, "1.2.0"), Some(">=1"));
        assert_eq!(resolved(&t, "2.0.0"), Some("2"));
        assert_eq!(resolved(&t, "3.4"), Some("3"));
        assert_eq!(resolved(&t, "4"), Some(">=1"));
    }

    #[test]
    fn test_overlap_prefers_higher_bound() {
        let t = table(&[">=1", "2"]);
        assert_eq!(order(&t), ["2", ">=1"]);
        assert_eq!(resolved(&t, "2.0.0"), Some("2"));
    }

    #[test]
    fn test_no_match() {
        let t = table(&["1"]);
        assert_eq!(resolved(&t, "3.0.0"), None);
        assert_eq!(resolved(&t, "0.9"), None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let t = table(&[">=1", "2", "3"]);
        let first = resolved(&t, "2.1");
        for _ in 0..100 {
            assert_eq!(resolved(&t, "2.1"), first);
        }
    }

    #[test]
    fn test_invalid_expression_fails_build() {
        let err = RouteTable::build([(">=1", Router::new()), ("nope", Router::new())]).unwrap_err();
        assert!(matches!(
            err,
            SetupError::InvalidConstraintExpression { ref expression, .. } if expression == "nope"
        ));
    }

    #[test]
    fn test_empty_table() {
        let t = RouteTable::build(Vec::<(&str, Router)>::new()).unwrap();
        assert!(t.is_empty());
        assert_eq!(resolved(&t, "1"), None);
    }
}
