//! Grid Dashboard library
//!
//! This crate manages the arrangement of a fixed set of dashboard widgets on
//! a responsive grid. It owns the per-breakpoint layout state: it loads a
//! previously saved arrangement, repairs it against the built-in defaults,
//! hands it to a rendering surface, and persists every change the surface
//! reports.
//!
//! # Overview
//!
//! - [`layout::Reconciler`] turns an untrusted stored blob into a layout
//!   that covers exactly the known widgets on every breakpoint.
//! - [`storage::LayoutStore`] saves and loads that blob through any
//!   [`storage::KeyValueStore`], swallowing storage failures.
//! - [`session::GridSession`] ties both together with a rendering
//!   [`session::GridSurface`] and tracks readiness.

/// Breakpoint tiers and width selection.
pub mod breakpoint;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Layout types, built-in defaults and reconciliation.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Grid session lifecycle and the rendering surface seam.
pub mod session;

/// Key-value persistence for the layout blob.
pub mod storage;

/// Widget identities and display metadata.
pub mod widgets;

pub use breakpoint::Breakpoint;
pub use layout::{Constraints, DefaultSchema, Layout, LayoutItem, Reconciler};
pub use session::{GridOptions, GridSession, GridSurface, HeadlessSurface, SessionError};
pub use storage::{FileStorage, KeyValueStore, LayoutStore, MemoryStorage};
pub use widgets::WidgetId;
