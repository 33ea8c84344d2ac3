//! Repairs a persisted layout against the default schema.
//!
//! Reconciliation never fails. Whatever the blob contains, the result has
//! exactly one item per schema widget at every breakpoint, in schema order,
//! and every item satisfies its constraints and fits the grid.
//!
//! Per breakpoint:
//! - A malformed blob discards everything and yields the schema defaults.
//! - A missing tier yields that tier's defaults.
//! - Each schema widget starts from its default item; persisted `x`, `y`,
//!   `w`, `h` values overlay it only when they are in range. Constraint
//!   fields always come from the schema.
//! - Persisted items for widgets the schema no longer knows are dropped.
//! - When the same widget is persisted twice, the first occurrence wins.

use std::collections::HashSet;
use std::fmt;

use crate::breakpoint::Breakpoint;
use crate::layout::item::{Layout, LayoutItem};
use crate::layout::schema::DefaultSchema;
use crate::layout::wire::{self, WireItem};
use crate::widgets::WidgetId;


/// Geometry field of a persisted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Column offset.
    X,
    /// Row offset.
    Y,
    /// Width.
    W,
    /// Height.
    H,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::X => "x",
            Field::Y => "y",
            Field::W => "w",
            Field::H => "h",
        };
        f.write_str(s)
    }
}

/// A repair applied while reconciling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// The blob could not be parsed; every breakpoint uses defaults.
    MalformedBlob {
        /// Parser message.
        reason: String,
    },
    /// A top-level key that is not a breakpoint name was ignored.
    UnknownBreakpoint {
        /// The ignored key.
        key: String,
    },
    /// The blob had no entry for this breakpoint.
    MissingBreakpoint {
        /// Tier filled from defaults.
        breakpoint: Breakpoint,
    },
    /// A schema widget had no persisted item.
    MissingWidget {
        /// Tier where the item was missing.
        breakpoint: Breakpoint,
        /// Widget filled from defaults.
        id: WidgetId,
    },
    /// A persisted item names a widget the schema does not know.
    StaleWidget {
        /// Tier holding the dropped item.
        breakpoint: Breakpoint,
        /// Raw persisted id.
        id: String,
    },
    /// A widget appeared more than once; later copies were dropped.
    DuplicateWidget {
        /// Tier holding the duplicate.
        breakpoint: Breakpoint,
        /// Duplicated widget.
        id: WidgetId,
    },
    /// A persisted value was out of range and replaced by the default.
    FieldRejected {
        /// Tier of the item.
        breakpoint: Breakpoint,
        /// Widget owning the field.
        id: WidgetId,
        /// Which field.
        field: Field,
        /// The rejected value.
        value: i64,
    },
    /// The merged item overflowed the grid and was moved left.
    OverflowRepaired {
        /// Tier of the item.
        breakpoint: Breakpoint,
        /// Widget that was moved.
        id: WidgetId,
        /// Final column offset.
        x: u32,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MalformedBlob { reason } => {
                write!(f, "malformed layout blob, using defaults: {reason}")
            }
            Anomaly::UnknownBreakpoint { key } => write!(f, "ignored unknown breakpoint '{key}'"),
            Anomaly::MissingBreakpoint { breakpoint } => {
                write!(f, "{breakpoint}: missing, using defaults")
            }
            Anomaly::MissingWidget { breakpoint, id } => {
                write!(f, "{breakpoint}/{id}: missing, using defaults")
            }
            Anomaly::StaleWidget { breakpoint, id } => {
                write!(f, "{breakpoint}/{id}: unknown widget dropped")
            }
            Anomaly::DuplicateWidget { breakpoint, id } => {
                write!(f, "{breakpoint}/{id}: duplicate item dropped")
            }
            Anomaly::FieldRejected {
                breakpoint,
                id,
                field,
                value,
            } => write!(f, "{breakpoint}/{id}: {field}={value} out of range, using default"),
            Anomaly::OverflowRepaired { breakpoint, id, x } => {
                write!(f, "{breakpoint}/{id}: overflowed grid, moved to x={x}")
            }
        }
    }
}

/// Every repair made during one reconciliation, in the order applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    anomalies: Vec<Anomaly>,
}

impl ReconcileReport {
    /// Returns `true` if the blob was used as-is.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// The recorded repairs.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Returns `true` if the whole blob was discarded.
    pub fn is_malformed(&self) -> bool {
        self.anomalies
            .iter()
            .any(|a| matches!(a, Anomaly::MalformedBlob { .. }))
    }

    fn push(&mut self, anomaly: Anomaly) {
        tracing::debug!("reconcile: {anomaly}");
        self.anomalies.push(anomaly);
    }
}

/// Merges persisted layouts with the default schema.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    schema: DefaultSchema,
}

impl Reconciler {
    /// Creates a reconciler over `schema`.
    pub fn new(schema: DefaultSchema) -> Self {
        Self { schema }
    }

    /// The schema used as ground truth.
    pub fn schema(&self) -> &DefaultSchema {
        &self.schema
    }

    /// Produces a consistent layout from a possibly absent, malformed or
    /// stale blob.
    pub fn reconcile(&self, blob: Option<&str>) -> Layout {
        self.reconcile_with_report(blob).0
    }

    /// Like [`reconcile`](Self::reconcile), also returning the repairs made.
    pub fn reconcile_with_report(&self, blob: Option<&str>) -> (Layout, ReconcileReport) {
        let mut report = ReconcileReport::default();
        let Some(blob) = blob else {
            return (self.schema.default_layout(), report);
        };

        let wire = match wire::parse(blob) {
            Ok(wire) => wire,
            Err(e) => {
                tracing::warn!("Persisted layout is malformed, falling back to defaults: {e}");
                report.push(Anomaly::MalformedBlob {
                    reason: e.to_string(),
                });
                return (self.schema.default_layout(), report);
            }
        };

        for key in wire.unknown_keys {
            report.push(Anomaly::UnknownBreakpoint { key });
        }

        let mut layout = Layout::new();
        for bp in Breakpoint::ALL {
            let items = match wire.breakpoints.get(&bp) {
                Some(persisted) => self.reconcile_breakpoint(bp, persisted, &mut report),
                None => {
                    report.push(Anomaly::MissingBreakpoint { breakpoint: bp });
                    self.schema.default_layout_for(bp).to_vec()
                }
            };
            layout.set_items(bp, items);
        }
        (layout, report)
    }

    fn reconcile_breakpoint(
        &self,
        bp: Breakpoint,
        persisted: &[WireItem],
        report: &mut ReconcileReport,
    ) -> Vec<LayoutItem> {
        let mut seen: HashSet<&str> = HashSet::new();
        for item in persisted {
            if !self.schema.contains(&item.i) {
                report.push(Anomaly::StaleWidget {
                    breakpoint: bp,
                    id: item.i.clone(),
                });
            } else if !seen.insert(item.i.as_str()) {
                report.push(Anomaly::DuplicateWidget {
                    breakpoint: bp,
                    id: WidgetId::new(item.i.as_str()),
                });
            }
        }

        self.schema
            .default_layout_for(bp)
            .iter()
            .map(|default| {
                match persisted.iter().find(|p| default.id == p.i.as_str()) {
                    Some(p) => merge_item(bp, default, p, report),
                    None => {
                        report.push(Anomaly::MissingWidget {
                            breakpoint: bp,
                            id: default.id.clone(),
                        });
                        default.clone()
                    }
                }
            })
            .collect()
    }
}

/// Overlays in-range persisted geometry onto the schema default.
fn merge_item(
    bp: Breakpoint,
    default: &LayoutItem,
    persisted: &WireItem,
    report: &mut ReconcileReport,
) -> LayoutItem {
    let columns = bp.columns();
    let c = default.constraints();
    let mut merged = default.clone();

    let mut accept = |field: Field, value: Option<i64>, valid: &dyn Fn(u32) -> bool| {
        let value = value?;
        match u32::try_from(value).ok().filter(|v| valid(*v)) {
            Some(v) => Some(v),
            None => {
                report.push(Anomaly::FieldRejected {
                    breakpoint: bp,
                    id: default.id.clone(),
                    field,
                    value,
                });
                None
            }
        }
    };

    if let Some(w) = accept(Field::W, persisted.w, &|w| c.allows_w(w) && w <= columns) {
        merged.w = w;
    }
    if let Some(h) = accept(Field::H, persisted.h, &|h| c.allows_h(h)) {
        merged.h = h;
    }
    if let Some(x) = accept(Field::X, persisted.x, &|_| true) {
        merged.x = x;
    }
    if let Some(y) = accept(Field::Y, persisted.y, &|_| true) {
        merged.y = y;
    }

    if !fits(merged.x, merged.w, columns) {
        merged.x = if fits(default.x, merged.w, columns) {
            default.x
        } else {
            columns.saturating_sub(merged.w)
        };
        report.push(Anomaly::OverflowRepaired {
            breakpoint: bp,
            id: merged.id.clone(),
            x: merged.x,
        });
    }

    merged
}

fn fits(x: u32, w: u32, columns: u32) -> bool {
    x.checked_add(w).is_some_and(|right| right <= columns)
}
