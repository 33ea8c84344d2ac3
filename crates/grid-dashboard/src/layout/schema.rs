//! Built-in default layouts.
//!
//! The default schema is the single source of truth for widget size
//! constraints and the fallback geometry used whenever persisted data is
//! missing or unusable. It is keyed by breakpoint so tiers can diverge;
//! today only the `sm` minimum widths differ from `lg`/`md`.

use crate::breakpoint::Breakpoint;
use crate::layout::item::{Constraints, Layout, LayoutItem};
use crate::widgets::WidgetId;

/// `(id, [x, y, w, h, min_w, max_w, min_h, max_h])`
type Row = (&'static str, [u32; 8]);

const WIDE_ROWS: &[Row] = &[
    ("bar", [0, 0, 6, 20, 4, 12, 15, 30]),
    ("line", [6, 0, 6, 20, 2, 12, 15, 30]),
    ("impressions", [0, 20, 12, 20, 4, 12, 15, 30]),
    ("pie", [0, 40, 12, 20, 4, 12, 15, 30]),
    ("table", [0, 60, 12, 30, 8, 12, 20, 50]),
];

const NARROW_ROWS: &[Row] = &[
    ("bar", [0, 0, 12, 20, 6, 12, 15, 30]),
    ("line", [0, 20, 12, 20, 6, 12, 15, 30]),
    ("impressions", [0, 40, 12, 20, 6, 12, 15, 30]),
    ("pie", [0, 60, 12, 20, 6, 12, 15, 30]),
    ("table", [0, 80, 12, 30, 8, 12, 20, 50]),
];

fn rows_for(breakpoint: Breakpoint) -> &'static [Row] {
    match breakpoint {
        Breakpoint::Lg | Breakpoint::Md => WIDE_ROWS,
        Breakpoint::Sm => NARROW_ROWS,
    }
}

fn item_from_row((id, [x, y, w, h, min_w, max_w, min_h, max_h]): &Row) -> LayoutItem {
    LayoutItem::new(
        *id,
        *x,
        *y,
        *w,
        *h,
        Constraints {
            min_w: *min_w,
            max_w: *max_w,
            min_h: *min_h,
            max_h: *max_h,
        },
    )
}

/// Hard-coded default layout for every breakpoint and widget.
///
/// Pure lookup table with no mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSchema {
    layout: Layout,
}

impl DefaultSchema {
    /// Builds the built-in schema.
    pub fn new() -> Self {
        let mut layout = Layout::new();
        for bp in Breakpoint::ALL {
            layout.set_items(bp, rows_for(bp).iter().map(item_from_row).collect());
        }
        Self { layout }
    }

    /// Default items for `breakpoint`, in schema order.
    pub fn default_layout_for(&self, breakpoint: Breakpoint) -> &[LayoutItem] {
        self.layout.items(breakpoint)
    }

    /// The full default layout across all breakpoints.
    pub fn default_layout(&self) -> Layout {
        self.layout.clone()
    }

    /// Default item for `id` at `breakpoint`, or `None` for unknown ids.
    pub fn default_item(&self, breakpoint: Breakpoint, id: &str) -> Option<&LayoutItem> {
        self.layout.item(breakpoint, id)
    }

    /// Constraints for `id` at `breakpoint`, or `None` for unknown ids.
    pub fn constraints_for(&self, breakpoint: Breakpoint, id: &str) -> Option<Constraints> {
        self.default_item(breakpoint, id).map(LayoutItem::constraints)
    }

    /// Breakpoint-independent constraints for `id`, taken from the widest
    /// tier.
    pub fn constraints_for_widget(&self, id: &str) -> Option<Constraints> {
        self.constraints_for(Breakpoint::Lg, id)
    }

    /// Widget ids known to the schema, in schema order.
    pub fn widget_ids(&self) -> Vec<WidgetId> {
        self.layout
            .items(Breakpoint::Lg)
            .iter()
            .map(|item| item.id.clone())
            .collect()
    }

    /// Returns `true` if the schema has geometry for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.default_item(Breakpoint::Lg, id).is_some()
    }
}

impl Default for DefaultSchema {
    fn default() -> Self {
        Self::new()
    }
}
