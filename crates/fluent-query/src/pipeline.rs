//! Pipeline builder and executor.
//!
//! The [`Pipeline`] struct provides a fluent builder API for appending
//! operations and a [`build`](Pipeline::build) method that runs them against
//! the borrowed collection.

use std::fmt;

use regex::Regex;

use crate::error::{QueryError, Result};
use crate::matcher::{Criteria, Matcher};
use crate::operation::Operation;
use crate::ordering::{Dir, OrderBy};
use crate::record::{Collection, Record};
use crate::trace::{TraceEvent, TraceSink};
use crate::value::{Number, Value};

/// A chain of operations over a borrowed collection.
///
/// Chain methods consume the pipeline and return it with one operation
/// appended. Building reads the source and the operations without changing
/// either, so a pipeline can be built repeatedly, and cloned to branch a
/// partially built chain.
///
/// # Example
///
/// ```
/// use fluent_query::{record, Matcher, Pipeline};
///
/// let people = vec![
///     record! { "id" => 0, "name" => "pedreca", "category" => "dev" },
///     record! { "id" => 1, "name" => "cassia", "category" => "vet" },
///     record! { "id" => 2, "name" => "valter", "category" => "barber" },
///     record! { "id" => 3, "name" => "carlos", "category" => "barber" },
/// ];
///
/// let result = Pipeline::over(&people)
///     .where_([("category", "barber")])
///     .where_([("name", Matcher::regex("v")?)])
///     .select(["name", "category"])
///     .order_by("name")
///     .build();
///
/// assert_eq!(result, vec![record! { "name" => "valter", "category" => "barber" }]);
/// # Ok::<(), fluent_query::QueryError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline<'a> {
    source: &'a [Record],
    operations: Vec<Operation>,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over `source` with no operations.
    pub fn new(source: &'a [Record]) -> Self {
        Pipeline {
            source,
            operations: Vec::new(),
        }
    }

    /// Factory entry point; same as [`Pipeline::new`].
    pub fn over(source: &'a [Record]) -> Self {
        Pipeline::new(source)
    }

    /// Appends an operation.
    pub fn push(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// Appends a `Where` operation.
    ///
    /// Records must satisfy every criterion. Scalars become literal
    /// matchers; use [`Matcher`] constructors or a [`Regex`] for patterns.
    pub fn where_<I, K, M>(self, criteria: I) -> Self
    where
        I: IntoIterator<Item = (K, M)>,
        K: Into<String>,
        M: Into<Matcher>,
    {
        self.push(Operation::Where(criteria.into_iter().collect()))
    }

    /// Appends a `Where` operation with a single criterion.
    pub fn where_matches(self, field: &str, matcher: impl Into<Matcher>) -> Self {
        self.push(Operation::Where(Criteria::new().with(field, matcher)))
    }

    /// Appends a literal equality filter.
    pub fn where_eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.where_matches(field, Matcher::literal(value))
    }

    /// Appends a prefix filter.
    pub fn where_starts_with(self, field: &str, prefix: &str) -> Self {
        self.where_matches(field, Matcher::starts_with(prefix))
    }

    /// Appends a substring filter.
    pub fn where_contains(self, field: &str, needle: &str) -> Self {
        self.where_matches(field, Matcher::contains(needle))
    }

    /// Appends a regex filter.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn where_regex(self, field: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.where_matches(field, regex))
    }

    // ========================================================================
    // Projection and ordering
    // ========================================================================

    /// Appends a `Select` operation.
    ///
    /// Repeated field names keep only their first occurrence.
    pub fn select<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !selected.contains(&field) {
                selected.push(field);
            }
        }
        self.push(Operation::Select(selected))
    }

    /// Appends an ascending `OrderBy` operation.
    pub fn order_by(self, field: &str) -> Self {
        self.order_by_dir(field, Dir::Asc)
    }

    /// Appends a descending `OrderBy` operation.
    pub fn order_by_desc(self, field: &str) -> Self {
        self.order_by_dir(field, Dir::Desc)
    }

    /// Appends an `OrderBy` operation with the given direction.
    pub fn order_by_dir(self, field: &str, dir: Dir) -> Self {
        self.push(Operation::OrderBy(OrderBy::new(field, dir)))
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Appends a `Limit` operation.
    pub fn limit(self, n: usize) -> Self {
        self.push(Operation::Limit(n))
    }

    /// Appends a `Limit` operation from a dynamically typed count.
    ///
    /// Fails with [`QueryError::InvalidArgument`] unless `n` is a
    /// non-negative integer.
    pub fn try_limit(self, n: impl Into<Value>) -> Result<Self> {
        let n = count_argument("limit", n.into())?;
        Ok(self.limit(n))
    }

    /// Appends an `Offset` operation.
    pub fn offset(self, n: usize) -> Self {
        self.push(Operation::Offset(n))
    }

    /// Appends an `Offset` operation from a dynamically typed count.
    pub fn try_offset(self, n: impl Into<Value>) -> Result<Self> {
        let n = count_argument("offset", n.into())?;
        Ok(self.offset(n))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the pending operations in append order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the number of pending operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if no operations are pending.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Runs the operations over a copy of the source.
    pub fn build(&self) -> Collection {
        self.execute(None)
    }

    /// Same as [`build`](Pipeline::build), reporting progress to `sink`.
    pub fn build_traced(&self, sink: &dyn TraceSink) -> Collection {
        self.execute(Some(sink))
    }

    fn execute(&self, sink: Option<&dyn TraceSink>) -> Collection {
        let emit = |event| {
            if let Some(sink) = sink {
                sink.on_event(event);
            }
        };

        let mut rows = self.source.to_vec();
        emit(TraceEvent::Start {
            rows: rows.len(),
            operations: self.operations.len(),
        });

        for (index, operation) in self.operations.iter().enumerate() {
            let rows_in = rows.len();
            rows = operation.apply(rows);
            emit(TraceEvent::Step {
                index,
                phase: operation.phase(),
                rows_in,
                rows_out: rows.len(),
            });
        }

        emit(TraceEvent::Finish { rows: rows.len() });
        rows
    }
}

impl<'a> From<&'a [Record]> for Pipeline<'a> {
    fn from(source: &'a [Record]) -> Self {
        Pipeline::new(source)
    }
}

impl fmt::Display for Pipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "over({})", self.source.len())?;
        for operation in &self.operations {
            write!(f, " | {operation}")?;
        }
        Ok(())
    }
}

fn count_argument(name: &'static str, value: Value) -> Result<usize> {
    let invalid = |value: &Value| {
        QueryError::invalid_argument(
            name,
            format!(
                "expected a non-negative integer, got {} {value}",
                value.type_name()
            ),
        )
    };

    match value {
        Value::Number(Number::U64(n)) => usize::try_from(n).map_err(|_| invalid(&value)),
        Value::Number(Number::I64(n)) => usize::try_from(n).map_err(|_| invalid(&value)),
        Value::Number(Number::F64(n)) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 => {
            Ok(n as usize)
        }
        _ => Err(invalid(&value)),
    }
}
