use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::addon::AppliedAddon;
use crate::layout::PieceLayout;

/// Stable identifier of a piece within a wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub Uuid);

impl PieceId {
    /// Allocate a fresh, never-before-seen id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PieceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Declared size of a piece, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub length_mm: f64,
    pub width_mm: f64,
}

impl Measurements {
    pub const fn new(length_mm: f64, width_mm: f64) -> Self {
        Self {
            length_mm,
            width_mm,
        }
    }

    /// Both dimensions are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.length_mm.is_finite()
            && self.width_mm.is_finite()
            && self.length_mm > 0.0
            && self.width_mm > 0.0
    }
}

/// Material and attribute choice made before pieces exist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialSelection {
    pub material_id: String,
    /// Attribute type → chosen value (e.g. "acabado" → "pulido").
    #[serde(default)]
    pub selected_attributes: BTreeMap<String, String>,
}

impl MaterialSelection {
    pub fn new(material_id: impl Into<String>) -> Self {
        Self {
            material_id: material_id.into(),
            selected_attributes: BTreeMap::new(),
        }
    }

    /// Builder-style helper to add one attribute choice.
    pub fn with_attribute(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.selected_attributes.insert(kind.into(), value.into());
        self
    }
}

/// One physical countertop segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub material_id: String,
    #[serde(default)]
    pub selected_attributes: BTreeMap<String, String>,
    pub measurements: Measurements,
    /// Placement metadata; pieces without it are laid out with defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PieceLayout>,
    /// Accessories in insertion order.
    #[serde(default)]
    pub applied_addons: Vec<AppliedAddon>,
}

impl Piece {
    /// Create a piece with a fresh id and no accessories.
    pub fn new(
        material: &MaterialSelection,
        measurements: Measurements,
        layout: Option<PieceLayout>,
    ) -> Self {
        Self {
            id: PieceId::new(),
            material_id: material.material_id.clone(),
            selected_attributes: material.selected_attributes.clone(),
            measurements,
            layout,
            applied_addons: Vec::new(),
        }
    }

    /// Overwrite material and attributes, leaving geometry and addons alone.
    pub fn rematerialize(&mut self, material: &MaterialSelection) {
        self.material_id = material.material_id.clone();
        self.selected_attributes = material.selected_attributes.clone();
    }

    /// Layout metadata, falling back to the defaults used for unplaced pieces.
    pub fn layout_or_default(&self) -> PieceLayout {
        self.layout.unwrap_or_default()
    }
}
