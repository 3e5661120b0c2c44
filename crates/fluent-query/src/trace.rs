//! Build tracing.
//!
//! Provides [`TraceSink`] for receiving build progress and [`TraceEvent`]
//! for the events themselves. [`Pipeline::build_traced`](crate::Pipeline::build_traced)
//! reports one [`TraceEvent::Step`] per operation between `Start` and
//! `Finish`. Tracing never changes the result.

use std::fmt;

/// Receiver for build trace events.
///
/// Any `Fn(TraceEvent)` closure is a sink.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use fluent_query::{record, Pipeline, TraceEvent};
///
/// let data = vec![record! { "n" => 1 }, record! { "n" => 2 }];
/// let steps = Cell::new(0);
/// let sink = |event: TraceEvent| {
///     if let TraceEvent::Step { .. } = event {
///         steps.set(steps.get() + 1);
///     }
/// };
///
/// Pipeline::over(&data).limit(1).build_traced(&sink);
/// assert_eq!(steps.get(), 1);
/// ```
pub trait TraceSink {
    /// Called once per event, in the order events occur.
    fn on_event(&self, event: TraceEvent);
}

impl<F> TraceSink for F
where
    F: Fn(TraceEvent),
{
    fn on_event(&self, event: TraceEvent) {
        self(event);
    }
}

/// Kind of operation a [`TraceEvent::Step`] reports on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TracePhase {
    /// Filtering by criteria.
    Where,
    /// Field projection.
    Select,
    /// Sorting by one field.
    OrderBy,
    /// Truncation to a maximum count.
    Limit,
    /// Skipping leading records.
    Offset,
}

impl TracePhase {
    /// Returns the display name of this phase.
    pub fn as_str(self) -> &'static str {
        match self {
            TracePhase::Where => "where",
            TracePhase::Select => "select",
            TracePhase::OrderBy => "order_by",
            TracePhase::Limit => "limit",
            TracePhase::Offset => "offset",
        }
    }
}

impl fmt::Display for TracePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One point in a traced build.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraceEvent {
    /// Build began.
    Start {
        /// Records in the source collection.
        rows: usize,
        /// Operations about to run.
        operations: usize,
    },
    /// One operation finished.
    Step {
        /// Position of the operation in the pipeline.
        index: usize,
        /// Kind of operation.
        phase: TracePhase,
        /// Records handed to the operation.
        rows_in: usize,
        /// Records the operation produced.
        rows_out: usize,
    },
    /// Build completed.
    Finish {
        /// Records in the result.
        rows: usize,
    },
}
