//! Grid session controller.
//!
//! A [`GridSession`] owns the live layout for one dashboard session. It is
//! built in two phases: [`GridSession::create`] wires up the store and the
//! grid surface without touching storage, and [`GridSession::activate`] runs
//! once the surface can render, loading and reconciling the persisted layout
//! and handing it to the surface. Until then the session is
//! `Uninitialized` and refuses layout reads and layout-change events.
//!
//! ```text
//! Uninitialized --activate--> Ready --on_layout_change--> Ready
//! ```

mod options;

pub use options::{CompactType, GridOptions};

use thiserror::Error;

use crate::breakpoint::Breakpoint;
use crate::layout::{Layout, ReconcileReport, Reconciler};
use crate::storage::{KeyValueStore, LayoutStore};


/// Errors from calling the session out of order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session has not been activated yet.
    #[error("Grid session is not ready; call activate() first")]
    NotReady,

    /// `activate()` was called on a session that is already ready.
    #[error("Grid session is already active")]
    AlreadyActive,
}

/// Lifecycle state of a [`GridSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created; storage has not been read.
    Uninitialized,
    /// The reconciled layout has been handed to the surface.
    Ready,
}

/// The grid-rendering collaborator.
///
/// The surface owns drag/resize handling, collision avoidance and vertical
/// compaction. It receives the layout to render through [`ready`] and
/// reports user changes back by calling [`GridSession::on_layout_change`]
/// with the full recomputed layout.
///
/// [`ready`]: GridSurface::ready
pub trait GridSurface {
    /// Renders `layout` from scratch.
    fn ready(&mut self, layout: &Layout, options: &GridOptions);
}

/// A surface with no display that remembers what it was asked to render.
///
/// Used by the command-line tool and in tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    renders: usize,
    last: Option<Layout>,
}

impl HeadlessSurface {
    /// Creates a surface that has rendered nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `ready` calls received.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// The most recently rendered layout.
    pub fn last_rendered(&self) -> Option<&Layout> {
        self.last.as_ref()
    }
}

impl GridSurface for HeadlessSurface {
    fn ready(&mut self, layout: &Layout, _options: &GridOptions) {
        self.renders += 1;
        self.last = Some(layout.clone());
    }
}

/// Owns the live layout and keeps the store in step with it.
#[derive(Debug)]
pub struct GridSession<S, R> {
    store: LayoutStore<S>,
    surface: R,
    options: GridOptions,
    reconciler: Reconciler,
    layout: Option<Layout>,
    report: ReconcileReport,
}

impl<S: KeyValueStore, R: GridSurface> GridSession<S, R> {
    /// Creates an uninitialized session. Storage is not touched.
    pub fn create(store: LayoutStore<S>, surface: R, options: GridOptions) -> Self {
        Self {
            store,
            surface,
            options,
            reconciler: Reconciler::default(),
            layout: None,
            report: ReconcileReport::default(),
        }
    }

    /// Loads and reconciles the persisted layout, then hands it to the
    /// surface.
    ///
    /// Call once, after the surface is able to render.
    pub fn activate(&mut self) -> Result<&Layout, SessionError> {
        if self.layout.is_some() {
            return Err(SessionError::AlreadyActive);
        }

        let blob = self.store.load();
        let (layout, report) = self.reconciler.reconcile_with_report(blob.as_deref());
        if report.is_clean() {
            tracing::info!("Grid session ready (persisted: {})", blob.is_some());
        } else {
            tracing::info!(
                "Grid session ready with {} layout repair(s)",
                report.anomalies().len()
            );
        }
        self.report = report;

        self.surface.ready(&layout, &self.options);
        Ok(&*self.layout.insert(layout))
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        if self.layout.is_some() {
            SessionState::Ready
        } else {
            SessionState::Uninitialized
        }
    }

    /// The live layout. Only available once the session is ready.
    pub fn current_layout(&self) -> Result<&Layout, SessionError> {
        self.layout.as_ref().ok_or(SessionError::NotReady)
    }

    /// Accepts a full layout reported by the surface after a user drag or
    /// resize, and persists it.
    ///
    /// The layout is taken verbatim; the surface enforces constraints while
    /// the user interacts.
    pub fn on_layout_change(&mut self, layout: Layout) -> Result<(), SessionError> {
        let current = self.layout.as_mut().ok_or(SessionError::NotReady)?;
        *current = layout;
        self.store.save(current);
        tracing::debug!("Layout change accepted and saved");
        Ok(())
    }

    /// Drops the persisted layout and re-renders the schema defaults.
    pub fn reset_to_default(&mut self) -> Result<&Layout, SessionError> {
        if self.layout.is_none() {
            return Err(SessionError::NotReady);
        }
        self.store.clear();
        let layout = self.reconciler.schema().default_layout();
        self.report = ReconcileReport::default();
        self.surface.ready(&layout, &self.options);
        tracing::info!("Grid layout reset to defaults");
        Ok(&*self.layout.insert(layout))
    }

    /// Repairs made while reconciling at activation.
    pub fn activation_report(&self) -> &ReconcileReport {
        &self.report
    }

    /// The tier the surface should render at `width` pixels.
    pub fn active_breakpoint(&self, width: u32) -> Breakpoint {
        Breakpoint::for_width(width)
    }

    /// Options handed to the surface.
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// The grid surface.
    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// The layout store.
    pub fn store(&self) -> &LayoutStore<S> {
        &self.store
    }
}
