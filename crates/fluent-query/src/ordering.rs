//! Ordering types for sorting records.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for field-based
//! ordering. Comparison is total: every pair of records has a definite
//! order, so sorts are deterministic.

use std::cmp::Ordering;
use std::fmt;

use crate::record::Record;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key: one field and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two records by this ordering's field.
    ///
    /// Records lacking the field sort after every record that has it,
    /// whatever the direction.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match (a.get(&self.field), b.get(&self.field)) {
            (Some(a), Some(b)) => self.dir.apply(compare_values(a, b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.dir)
    }
}

/// Compares two values under a total order.
///
/// Values of one type use natural order: lexicographic for strings,
/// numeric for numbers, `false < true` for booleans. Values of different
/// types order by type: bool, then number, then string, then null.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(*b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Null => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_display() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
        assert_eq!(OrderBy::desc("name").to_string(), "name desc");
    }

    #[test]
    fn compare_strings() {
        assert_eq!(
            compare_values(&Value::from("apple"), &Value::from("banana")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from("apple"), &Value::from("apple")),
            Ordering::Equal
        );
    }

    #[test]
    fn compare_numbers_numerically() {
        // Lexicographic order would put "10" before "9"
        assert_eq!(
            compare_values(&Value::from(9), &Value::from(10)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from(2.5), &Value::from(2u8)),
            Ordering::Greater
        );
    }

    #[test]
    fn compare_mixed_numbers_past_f64_precision() {
        let two_53: i64 = 1 << 53;
        let values = [
            Value::from(two_53 + 1),
            Value::from(f64::NAN),
            Value::from(two_53 as f64),
            Value::from((two_53 + 2) as f64),
            Value::from(two_53 as u64),
            Value::from(two_53 - 1),
        ];

        for a in &values {
            for b in &values {
                assert_eq!(compare_values(a, b), compare_values(b, a).reverse());
                for c in &values {
                    if compare_values(a, b).is_le() && compare_values(b, c).is_le() {
                        assert!(compare_values(a, c).is_le(), "{a} <= {b} <= {c}");
                    }
                }
            }
        }

        let mut rows: Vec<Record> = values.iter().map(|v| record! { "n" => v.clone() }).collect();
        rows.sort_by(|a, b| OrderBy::asc("n").compare(a, b));
        let sorted: Vec<String> = rows
            .iter()
            .map(|r| r.get("n").unwrap().to_string())
            .collect();
        assert_eq!(
            sorted,
            [
                "9007199254740991",
                "9007199254740992",
                "9007199254740992",
                "9007199254740993",
                "9007199254740994",
                "NaN",
            ]
        );
    }

    #[test]
    fn compare_mixed_types_by_rank() {
        let b = Value::from(true);
        let n = Value::from(0);
        let s = Value::from("");
        let z = Value::Null;

        assert_eq!(compare_values(&b, &n), Ordering::Less);
        assert_eq!(compare_values(&n, &s), Ordering::Less);
        assert_eq!(compare_values(&s, &z), Ordering::Less);
        assert_eq!(compare_values(&z, &b), Ordering::Greater);
        assert_eq!(compare_values(&z, &z), Ordering::Equal);
    }

    #[test]
    fn missing_sorts_last_both_directions() {
        let present = record! { "name" => "zed" };
        let missing = record! { "id" => 1 };

        for order in [OrderBy::asc("name"), OrderBy::desc("name")] {
            assert_eq!(order.compare(&present, &missing), Ordering::Less);
            assert_eq!(order.compare(&missing, &present), Ordering::Greater);
            assert_eq!(order.compare(&missing, &missing), Ordering::Equal);
        }
    }

    #[test]
    fn desc_reverses_present_values() {
        let a = record! { "n" => 1 };
        let b = record! { "n" => 2 };
        assert_eq!(OrderBy::asc("n").compare(&a, &b), Ordering::Less);
        assert_eq!(OrderBy::desc("n").compare(&a, &b), Ordering::Greater);
    }
}
