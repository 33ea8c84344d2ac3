//! Loosely-typed view of a persisted layout blob.
//!
//! The persisted blob may come from an older or newer release, so it is
//! parsed into a shape where every geometry field is optional and signed.
//! Structural problems (not JSON, not an object, a known tier that is not
//! an array of items, an item without a string `i`, a non-integer field)
//! make the whole blob malformed. Range checks are left to the reconciler.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::breakpoint::Breakpoint;

/// One persisted item with every geometry field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireItem {
    pub i: String,
    #[serde(default)]
    pub x: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
    #[serde(default)]
    pub w: Option<i64>,
    #[serde(default)]
    pub h: Option<i64>,
    // Constraint fields are accepted for shape-checking but never trusted.
    #[serde(default)]
    pub min_w: Option<i64>,
    #[serde(default)]
    pub max_w: Option<i64>,
    #[serde(default)]
    pub min_h: Option<i64>,
    #[serde(default)]
    pub max_h: Option<i64>,
}

/// A structurally valid persisted layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct WireLayout {
    /// Items per known breakpoint, in persisted order.
    pub breakpoints: BTreeMap<Breakpoint, Vec<WireItem>>,
    /// Top-level keys that do not name a known breakpoint.
    pub unknown_keys: Vec<String>,
}

/// Parses a persisted blob.
pub(crate) fn parse(blob: &str) -> serde_json::Result<WireLayout> {
    let raw: HashMap<String, Value> = serde_json::from_str(blob)?;
    let mut wire = WireLayout::default();
    for (key, value) in raw {
        match key.parse::<Breakpoint>() {
            // A null tier reads as absent, like a null field.
            Ok(bp) if key == bp.name() && value.is_null() => {}
            Ok(bp) if key == bp.name() => {
                let items: Vec<WireItem> = serde_json::from_value(value)?;
                wire.breakpoints.insert(bp, items);
            }
            _ => wire.unknown_keys.push(key),
        }
    }
    wire.unknown_keys.sort();
    Ok(wire)
}
