//! Layout system for the dashboard grid.
//!
//! Defines per-breakpoint widget geometry, the built-in default schema that
//! bounds it, and the reconciler that turns a persisted blob back into a
//! layout the grid can render safely.

mod item;
mod reconcile;
mod schema;
mod wire;

pub use item::{Constraints, Layout, LayoutItem};
pub use reconcile::{Anomaly, Field, ReconcileReport, Reconciler};
pub use schema::DefaultSchema;
