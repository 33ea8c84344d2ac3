//! Layout geometry types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::breakpoint::Breakpoint;
use crate::widgets::WidgetId;

/// Allowed size range for a widget, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Minimum width in columns.
    pub min_w: u32,
    /// Maximum width in columns.
    pub max_w: u32,
    /// Minimum height in rows.
    pub min_h: u32,
    /// Maximum height in rows.
    pub max_h: u32,
}

impl Constraints {
    /// Returns `true` if `w` lies in `[min_w, max_w]`.
    pub fn allows_w(&self, w: u32) -> bool {
        (self.min_w..=self.max_w).contains(&w)
    }

    /// Returns `true` if `h` lies in `[min_h, max_h]`.
    pub fn allows_h(&self, h: u32) -> bool {
        (self.min_h..=self.max_h).contains(&h)
    }
}

/// Geometry of one widget at one breakpoint.
///
/// Serializes to the persisted wire shape
/// `{ i, x, y, w, h, minW, maxW, minH, maxH }`. Those field names are fixed
/// across releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    /// Widget this geometry belongs to.
    #[serde(rename = "i")]
    pub id: WidgetId,
    /// Column offset.
    pub x: u32,
    /// Row offset.
    pub y: u32,
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
    /// Minimum width in columns.
    pub min_w: u32,
    /// Maximum width in columns.
    pub max_w: u32,
    /// Minimum height in rows.
    pub min_h: u32,
    /// Maximum height in rows.
    pub max_h: u32,
}

impl LayoutItem {
    /// Builds an item from position, size and constraints.
    pub fn new(id: impl Into<WidgetId>, x: u32, y: u32, w: u32, h: u32, c: Constraints) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: c.min_w,
            max_w: c.max_w,
            min_h: c.min_h,
            max_h: c.max_h,
        }
    }

    /// The size constraints carried by this item.
    pub fn constraints(&self) -> Constraints {
        Constraints {
            min_w: self.min_w,
            max_w: self.max_w,
            min_h: self.min_h,
            max_h: self.max_h,
        }
    }

    /// Returns `true` if the item fits a grid of `columns` and respects its
    /// own constraints.
    pub fn is_valid(&self, columns: u32) -> bool {
        let c = self.constraints();
        self.w > 0
            && self.h > 0
            && c.allows_w(self.w)
            && c.allows_h(self.h)
            && self.x.checked_add(self.w).is_some_and(|right| right <= columns)
    }
}

/// Per-breakpoint widget geometry for the whole dashboard.
///
/// Serializes as a JSON object keyed by breakpoint name, which is the
/// persisted blob format.
///
/// `==` compares item order within each tier as well. Use
/// [`Layout::same_arrangement`] when order does not matter, as with layouts
/// reported by the surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    breakpoints: BTreeMap<Breakpoint, Vec<LayoutItem>>,
}

impl Layout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items for `breakpoint`, or an empty slice if the tier has none.
    pub fn items(&self, breakpoint: Breakpoint) -> &[LayoutItem] {
        self.breakpoints
            .get(&breakpoint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replaces the items for `breakpoint`.
    pub fn set_items(&mut self, breakpoint: Breakpoint, items: Vec<LayoutItem>) {
        self.breakpoints.insert(breakpoint, items);
    }

    /// Finds the item for `id` at `breakpoint`.
    pub fn item(&self, breakpoint: Breakpoint, id: &str) -> Option<&LayoutItem> {
        self.items(breakpoint).iter().find(|item| item.id == id)
    }

    /// Iterates over breakpoints present in this layout, widest first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &[LayoutItem])> {
        self.breakpoints
            .iter()
            .map(|(bp, items)| (*bp, items.as_slice()))
    }

    /// Returns `true` if both layouts hold the same items on the same tiers,
    /// in any order within a tier.
    pub fn same_arrangement(&self, other: &Layout) -> bool {
        fn by_id(items: &[LayoutItem]) -> Vec<&LayoutItem> {
            let mut sorted: Vec<&LayoutItem> = items.iter().collect();
            sorted.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
            sorted
        }
        self.breakpoints.len() == other.breakpoints.len()
            && self.breakpoints.iter().all(|(bp, items)| {
                other
                    .breakpoints
                    .get(bp)
                    .is_some_and(|theirs| by_id(items) == by_id(theirs))
            })
    }

    /// Serializes to the persisted wire format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> Constraints {
        Constraints {
            min_w: 4,
            max_w: 12,
            min_h: 15,
            max_h: 30,
        }
    }

    #[test]
    fn item_serializes_with_wire_field_names() {
        let item = LayoutItem::new("bar", 0, 0, 6, 20, constraints());
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "i": "bar", "x": 0, "y": 0, "w": 6, "h": 20,
                "minW": 4, "maxW": 12, "minH": 15, "maxH": 30
            })
        );
    }

    #[test]
    fn item_validity_checks_constraints_and_columns() {
        assert!(LayoutItem::new("bar", 0, 0, 6, 20, constraints()).is_valid(12));
        assert!(LayoutItem::new("bar", 6, 0, 6, 20, constraints()).is_valid(12));
        assert!(!LayoutItem::new("bar", 7, 0, 6, 20, constraints()).is_valid(12));
        assert!(!LayoutItem::new("bar", 0, 0, 3, 20, constraints()).is_valid(12));
        assert!(!LayoutItem::new("bar", 0, 0, 6, 31, constraints()).is_valid(12));
    }

    #[test]
    fn item_validity_survives_overflowing_offsets() {
        let item = LayoutItem::new("bar", u32::MAX, 0, 6, 20, constraints());
        assert!(!item.is_valid(12));
    }

    #[test]
    fn layout_serializes_keyed_by_breakpoint_name() {
        let mut layout = Layout::new();
        layout.set_items(
            Breakpoint::Sm,
            vec![LayoutItem::new("bar", 0, 0, 12, 20, constraints())],
        );
        let value: serde_json::Value =
            serde_json::from_str(&layout.to_json().expect("serialize")).expect("valid json");
        assert!(value.get("sm").is_some());
        assert!(value.get("lg").is_none());
    }

    #[test]
    fn layout_items_for_missing_breakpoint_is_empty() {
        let layout = Layout::new();
        assert!(layout.items(Breakpoint::Lg).is_empty());
        assert!(layout.item(Breakpoint::Lg, "bar").is_none());
    }

    #[test]
    fn layout_iterates_widest_first() {
        let mut layout = Layout::new();
        layout.set_items(Breakpoint::Sm, Vec::new());
        layout.set_items(Breakpoint::Lg, Vec::new());
        let order: Vec<Breakpoint> = layout.iter().map(|(bp, _)| bp).collect();
        assert_eq!(order, vec![Breakpoint::Lg, Breakpoint::Sm]);
    }

    #[test]
    fn same_arrangement_ignores_item_order_only() {
        let bar = LayoutItem::new("bar", 0, 0, 6, 20, constraints());
        let line = LayoutItem::new("line", 6, 0, 6, 20, constraints());
        let mut a = Layout::new();
        a.set_items(Breakpoint::Lg, vec![bar.clone(), line.clone()]);
        let mut b = Layout::new();
        b.set_items(Breakpoint::Lg, vec![line.clone(), bar.clone()]);
        assert_ne!(a, b);
        assert!(a.same_arrangement(&b));

        let mut moved = line.clone();
        moved.y = 20;
        let mut c = Layout::new();
        c.set_items(Breakpoint::Lg, vec![bar.clone(), moved]);
        assert!(!a.same_arrangement(&c));

        let mut d = a.clone();
        d.set_items(Breakpoint::Md, vec![bar, line]);
        assert!(!a.same_arrangement(&d));
    }
}
