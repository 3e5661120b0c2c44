//! Pipeline operations.
//!
//! Each [`Operation`] transforms a fully materialized collection into the
//! next one. Operations never look at each other; the pipeline applies them
//! strictly in the order they were appended.

use std::fmt;

use crate::matcher::Criteria;
use crate::ordering::OrderBy;
use crate::record::Collection;
use crate::trace::TracePhase;

/// One pipeline step.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Keep records satisfying every criterion.
    Where(Criteria),
    /// Replace each record with the listed fields, in order.
    Select(Vec<String>),
    /// Stable sort by one field.
    OrderBy(OrderBy),
    /// Keep at most the first `n` records.
    Limit(usize),
    /// Drop the first `n` records.
    Offset(usize),
}

impl Operation {
    /// Applies this operation to `rows`, producing the next result.
    pub fn apply(&self, mut rows: Collection) -> Collection {
        match self {
            Operation::Where(criteria) => {
                rows.retain(|record| criteria.matches(record));
                rows
            }
            Operation::Select(fields) => rows.iter().map(|record| record.project(fields)).collect(),
            Operation::OrderBy(order) => {
                // sort_by is stable: ties keep their incoming order
                rows.sort_by(|a, b| order.compare(a, b));
                rows
            }
            Operation::Limit(n) => {
                rows.truncate(*n);
                rows
            }
            Operation::Offset(n) => {
                if *n >= rows.len() {
                    rows.clear();
                } else {
                    rows.drain(..*n);
                }
                rows
            }
        }
    }

    /// Returns the trace phase reported for this operation.
    pub fn phase(&self) -> TracePhase {
        match self {
            Operation::Where(_) => TracePhase::Where,
            Operation::Select(_) => TracePhase::Select,
            Operation::OrderBy(_) => TracePhase::OrderBy,
            Operation::Limit(_) => TracePhase::Limit,
            Operation::Offset(_) => TracePhase::Offset,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Where(criteria) => write!(f, "where({criteria})"),
            Operation::Select(fields) => write!(f, "select({})", fields.join(", ")),
            Operation::OrderBy(order) => write!(f, "order_by({order})"),
            Operation::Limit(n) => write!(f, "limit({n})"),
            Operation::Offset(n) => write!(f, "offset({n})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use crate::record;

    fn rows() -> Collection {
        vec![
            record! { "id" => 0, "name" => "b" },
            record! { "id" => 1, "name" => "a" },
            record! { "id" => 2 },
            record! { "id" => 3, "name" => "a" },
        ]
    }

    fn ids(rows: &Collection) -> Vec<i64> {
        rows.iter()
            .filter_map(|r| r.get("id").and_then(|v| v.as_number()))
            .map(|n| n.to_f64() as i64)
            .collect()
    }

    #[test]
    fn where_filters_in_place() {
        let op = Operation::Where(Criteria::new().with("name", Matcher::literal("a")));
        assert_eq!(ids(&op.apply(rows())), [1, 3]);
    }

    #[test]
    fn select_projects_every_record() {
        let op = Operation::Select(vec!["name".to_string()]);
        let out = op.apply(rows());
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], record! { "name" => "b" });
        assert_eq!(out[2], record! {});
    }

    #[test]
    fn order_by_is_stable_with_missing_last() {
        let op = Operation::OrderBy(OrderBy::asc("name"));
        assert_eq!(ids(&op.apply(rows())), [1, 3, 0, 2]);
    }

    #[test]
    fn limit_bounds() {
        assert!(Operation::Limit(0).apply(rows()).is_empty());
        assert_eq!(ids(&Operation::Limit(2).apply(rows())), [0, 1]);
        assert_eq!(Operation::Limit(10).apply(rows()), rows());
    }

    #[test]
    fn offset_bounds() {
        assert_eq!(Operation::Offset(0).apply(rows()), rows());
        assert_eq!(ids(&Operation::Offset(3).apply(rows())), [3]);
        assert!(Operation::Offset(4).apply(rows()).is_empty());
        assert!(Operation::Offset(9).apply(rows()).is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(
            Operation::Select(vec!["name".into(), "category".into()]).to_string(),
            "select(name, category)"
        );
        assert_eq!(Operation::OrderBy(OrderBy::asc("name")).to_string(), "order_by(name asc)");
        assert_eq!(Operation::Limit(1).to_string(), "limit(1)");
        assert_eq!(Operation::Offset(2).to_string(), "offset(2)");
    }

    #[test]
    fn phases() {
        assert_eq!(Operation::Limit(1).phase(), TracePhase::Limit);
        assert_eq!(Operation::Select(vec![]).phase(), TracePhase::Select);
    }
}
