//! Fluent query pipeline for in-memory record collections.
//!
//! `fluent-query` applies relational-style operations to a collection of
//! records that is already resident in memory. It supports:
//!
//! - Heterogeneous records: ordered field maps of strings, numbers,
//!   booleans, and nulls
//! - Filtering by literal equality or partial-text patterns (prefix,
//!   suffix, substring, regex)
//! - Projection of a field subset in a chosen order
//! - Stable single-field ordering, ascending or descending
//! - Limit and offset
//!
//! # Quick Start
//!
//! ```rust
//! use fluent_query::{record, Matcher, Pipeline};
//!
//! let data = vec![
//!     record! { "id" => 0, "name" => "pedreca", "category" => "dev" },
//!     record! { "id" => 1, "name" => "cassia", "category" => "vet" },
//!     record! { "id" => 2, "name" => "valter", "category" => "barber" },
//!     record! { "id" => 3, "name" => "carlos", "category" => "barber" },
//! ];
//!
//! let devs = Pipeline::over(&data)
//!     .where_([("category", Matcher::pattern("dev"))])
//!     .build();
//! assert_eq!(devs, vec![data[0].clone()]);
//!
//! let names = Pipeline::over(&data)
//!     .select(["name"])
//!     .order_by("name")
//!     .limit(2)
//!     .build();
//! assert_eq!(names, vec![record! { "name" => "carlos" }, record! { "name" => "cassia" }]);
//! ```
//!
//! # Execution Semantics
//!
//! Operations run in the order they were appended, each one consuming the
//! complete output of the previous:
//!
//! ```text
//! source ─▶ op[0] ─▶ op[1] ─▶ … ─▶ op[n-1] ─▶ result
//! ```
//!
//! - **Where**: keep records satisfying every criterion. A missing field
//!   never matches. Repeated `where_` calls narrow the result further.
//! - **Select**: rebuild each record from the listed fields; missing fields
//!   are omitted.
//! - **OrderBy**: stable sort; records lacking the field go last.
//! - **Limit** / **Offset**: truncate or skip from the front.
//!
//! The source collection is only borrowed and never modified; `build` can
//! be called any number of times.
//!
//! # Matchers
//!
//! | Matcher | Matches when |
//! |---------|--------------|
//! | `Literal(v)` | field has the same type and value as `v` |
//! | `StartsWith(p)` | field text starts with `p` (default for `Matcher::pattern`) |
//! | `EndsWith(p)` | field text ends with `p` |
//! | `Contains(p)` | field text contains `p` |
//! | `Regex(r)` | `r` is found anywhere in the field text |

mod error;
mod matcher;
mod operation;
mod ordering;
mod pipeline;
mod record;
mod trace;
mod value;

// Re-export public API
pub use error::{QueryError, Result};
pub use matcher::{Criteria, Matcher, TextPattern};
pub use operation::Operation;
pub use ordering::{compare_values, Dir, OrderBy};
pub use pipeline::Pipeline;
pub use record::{Collection, Record};
pub use trace::{TraceEvent, TracePhase, TraceSink};
pub use value::{Number, Value};
