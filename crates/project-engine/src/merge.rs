//! Partial updates with an explicit per-field merge policy.
//!
//! Every patchable entity lists which of its fields are replaced wholesale
//! and which are keyed maps merged key by key. Keys absent from a merged
//! patch keep their existing values.

use std::collections::BTreeMap;

use encimera_types::{AppliedAddon, MeasurementKey, Measurements, Piece, PieceLayout};
use serde::{Deserialize, Serialize};

/// A partial update for `T`.
pub trait Patch<T> {
    /// Fields overwritten wholesale when present in the patch.
    const REPLACED: &'static [&'static str];
    /// Keyed-map fields merged entry by entry.
    const MERGED: &'static [&'static str];

    fn apply_to(self, target: &mut T);
}

/// Merge `patch` into `target`: patched keys overwrite, other keys survive.
pub fn merge_map<K: Ord, V>(target: &mut BTreeMap<K, V>, patch: BTreeMap<K, V>) {
    target.extend(patch);
}

/// Partial update of a [`Piece`]. The id is never patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PiecePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_attributes: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Measurements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PieceLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_addons: Option<Vec<AppliedAddon>>,
}

impl Patch<Piece> for PiecePatch {
    const REPLACED: &'static [&'static str] =
        &["material_id", "measurements", "layout", "applied_addons"];
    const MERGED: &'static [&'static str] = &["selected_attributes"];

    fn apply_to(self, piece: &mut Piece) {
        if let Some(material_id) = self.material_id {
            piece.material_id = material_id;
        }
        if let Some(attributes) = self.selected_attributes {
            merge_map(&mut piece.selected_attributes, attributes);
        }
        if let Some(measurements) = self.measurements {
            piece.measurements = measurements;
        }
        if let Some(layout) = self.layout {
            piece.layout = Some(layout);
        }
        if let Some(addons) = self.applied_addons {
            piece.applied_addons = addons;
        }
    }
}

/// Partial update of an [`AppliedAddon`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddonPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<BTreeMap<MeasurementKey, f64>>,
}

impl AddonPatch {
    pub fn measurement(key: MeasurementKey, value: f64) -> Self {
        Self {
            code: None,
            measurements: Some(BTreeMap::from([(key, value)])),
        }
    }
}

impl Patch<AppliedAddon> for AddonPatch {
    const REPLACED: &'static [&'static str] = &["code"];
    const MERGED: &'static [&'static str] = &["measurements"];

    fn apply_to(self, addon: &mut AppliedAddon) {
        if let Some(code) = self.code {
            addon.code = code;
        }
        if let Some(measurements) = self.measurements {
            merge_map(&mut addon.measurements, measurements);
        }
    }
}
