//! Widget catalog for the dashboard.
//!
//! The dashboard shows a fixed set of panels: four charts and one data
//! table. Each panel is named by a stable [`WidgetId`]; the set of valid
//! ids never changes at runtime. Chart and table rendering belong to
//! external collaborators, so the catalog only carries what the grid
//! chrome needs (kind, title, tooltip text, captions).
//!
//! # Example
//!
//! ```
//! use grid_dashboard::widgets::WidgetCatalog;
//!
//! let catalog = WidgetCatalog::new();
//! assert!(catalog.get("bar").is_some());
//! assert!(catalog.get("legacy-widget").is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque stable identifier naming one dashboard widget.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Wraps a raw identifier. No validation against the catalog happens here.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for WidgetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for WidgetId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for WidgetId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// What a widget renders; selects the chart or table collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Vertical bar chart.
    Bar,
    /// Line chart, optionally with a legend.
    Line,
    /// Pie chart.
    Pie,
    /// Sortable, filterable data table.
    Table,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WidgetKind::Bar => "bar",
            WidgetKind::Line => "line",
            WidgetKind::Pie => "pie",
            WidgetKind::Table => "table",
        };
        f.pad(s)
    }
}

/// Static description of one dashboard panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetInfo {
    /// Stable identifier, also the key used in persisted layouts.
    pub id: &'static str,
    /// Which collaborator renders the panel body.
    pub kind: WidgetKind,
    /// Panel heading.
    pub title: &'static str,
    /// Tooltip text shown next to the heading.
    pub description: Option<&'static str>,
    /// Period caption shown at the top right (e.g. "Last 30 Days").
    pub caption: Option<&'static str>,
    /// Small print anchored to the bottom of the panel.
    pub footnote: Option<&'static str>,
}

const LAST_30_DAYS: &str = "Last 30 Days";
const EXCLUDES_SPAM: &str = "*Excludes leads marked as \"spam\"";

/// Built-in panels in schema order.
const BUILTIN_WIDGETS: &[WidgetInfo] = &[
    WidgetInfo {
        id: "bar",
        kind: WidgetKind::Bar,
        title: "Total Sales Leads",
        description: Some("Total number of qualified sales leads per day"),
        caption: Some(LAST_30_DAYS),
        footnote: Some(EXCLUDES_SPAM),
    },
    WidgetInfo {
        id: "line",
        kind: WidgetKind::Line,
        title: "Active Users",
        description: None,
        caption: None,
        footnote: None,
    },
    WidgetInfo {
        id: "impressions",
        kind: WidgetKind::Line,
        title: "Impressions",
        description: Some("Total number of impressions per day"),
        caption: Some(LAST_30_DAYS),
        footnote: None,
    },
    WidgetInfo {
        id: "pie",
        kind: WidgetKind::Pie,
        title: "Leads Per Category",
        description: Some("Distribution of leads across different categories"),
        caption: Some(LAST_30_DAYS),
        footnote: Some(EXCLUDES_SPAM),
    },
    WidgetInfo {
        id: "table",
        kind: WidgetKind::Table,
        title: "Engagement By Campaign",
        description: Some("Detailed breakdown of all sales leads"),
        caption: None,
        footnote: None,
    },
];

/// Read-only catalog of the dashboard's widgets.
///
/// Lookups of unknown ids return `None`; the catalog never fabricates an
/// entry.
#[derive(Debug, Clone)]
pub struct WidgetCatalog {
    widgets: &'static [WidgetInfo],
}

impl WidgetCatalog {
    /// Creates the catalog of built-in widgets.
    pub fn new() -> Self {
        Self {
            widgets: BUILTIN_WIDGETS,
        }
    }

    /// Looks up a widget by id.
    pub fn get(&self, id: &str) -> Option<&WidgetInfo> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Returns `true` if `id` names a known widget.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over all widgets in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &WidgetInfo> {
        self.widgets.iter()
    }

    /// Returns all widget ids in schema order.
    pub fn ids(&self) -> Vec<WidgetId> {
        self.widgets.iter().map(|w| WidgetId::new(w.id)).collect()
    }

    /// Number of widgets in the catalog.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns `true` if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl Default for WidgetCatalog {
    fn default() -> Self {
        Self::new()
    }
}
