use std::collections::HashSet;

use encimera_types::{ConnectionType, JointType, Measurements, PieceLayout, Rotation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named template describing how many pieces a shape needs and their
/// default geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeVariation {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub required_count: usize,
    pub default_measurements: Vec<Measurements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_layouts: Option<Vec<PieceLayout>>,
}

/// Errors from loading or checking a shape catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse shape catalog: {0}")]
    Parse(String),

    #[error("duplicate shape id: {id}")]
    DuplicateId { id: String },

    #[error("shape {id} requires no pieces")]
    Empty { id: String },

    #[error("shape {id}: {field} has {provided} entries, expected {required}")]
    Arity {
        id: String,
        field: &'static str,
        required: usize,
        provided: usize,
    },

    #[error("shape {id}: layout orders {orders:?} are not a dense 0..{count} sequence")]
    SparseOrder {
        id: String,
        orders: Vec<u32>,
        count: usize,
    },

    #[error("shape {id}: first piece in sequence must not be a corner or linear continuation")]
    LeadingConnection { id: String },
}

impl ShapeVariation {
    /// Check the catalog-authoring contract for this entry.
    ///
    /// Measurement and layout arrays must match `required_count`, layout
    /// orders must be a permutation of `0..N`, and the first piece in order
    /// must have no connection to a previous piece.
    pub fn check(&self) -> Result<(), CatalogError> {
        if self.required_count == 0 {
            return Err(CatalogError::Empty {
                id: self.id.clone(),
            });
        }
        if self.default_measurements.len() != self.required_count {
            return Err(CatalogError::Arity {
                id: self.id.clone(),
                field: "default_measurements",
                required: self.required_count,
                provided: self.default_measurements.len(),
            });
        }
        let Some(layouts) = &self.piece_layouts else {
            return Ok(());
        };
        if layouts.len() != self.required_count {
            return Err(CatalogError::Arity {
                id: self.id.clone(),
                field: "piece_layouts",
                required: self.required_count,
                provided: layouts.len(),
            });
        }

        let mut orders: Vec<u32> = layouts.iter().map(|l| l.order).collect();
        orders.sort_unstable();
        let dense = orders
            .iter()
            .enumerate()
            .all(|(i, &order)| order as usize == i);
        if !dense {
            return Err(CatalogError::SparseOrder {
                id: self.id.clone(),
                orders: layouts.iter().map(|l| l.order).collect(),
                count: self.required_count,
            });
        }

        let leading = layouts.iter().find(|l| l.order == 0);
        if leading.is_some_and(|l| l.connection_type != ConnectionType::None) {
            return Err(CatalogError::LeadingConnection {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Read-only table of shape variations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeCatalog {
    variations: Vec<ShapeVariation>,
}

impl ShapeCatalog {
    /// Build a catalog, rejecting malformed entries and duplicate ids.
    pub fn new(variations: Vec<ShapeVariation>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for variation in &variations {
            if !seen.insert(variation.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: variation.id.clone(),
                });
            }
            variation.check()?;
        }
        debug!(shapes = variations.len(), "Loaded shape catalog");
        Ok(Self { variations })
    }

    /// Load a catalog from a JSON array of [`ShapeVariation`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let variations: Vec<ShapeVariation> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(variations)
    }

    /// The shapes offered by the wizard out of the box.
    pub fn builtin() -> Self {
        Self {
            variations: builtin_variations(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ShapeVariation> {
        self.variations.iter().find(|v| v.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeVariation> {
        self.variations.iter()
    }

    pub fn len(&self) -> usize {
        self.variations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variations.is_empty()
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const RUN_WIDTH_MM: f64 = 600.0;

fn builtin_variations() -> Vec<ShapeVariation> {
    let butt_corner = |order, rotation, connection| {
        PieceLayout::new(order, rotation, connection).with_joint(JointType::Butt)
    };

    vec![
        ShapeVariation {
            id: "lineal".to_string(),
            name: "Lineal".to_string(),
            required_count: 1,
            default_measurements: vec![Measurements::new(2400.0, RUN_WIDTH_MM)],
            piece_layouts: Some(vec![PieceLayout::new(
                0,
                Rotation::Deg0,
                ConnectionType::None,
            )]),
        },
        // First run goes along +X; the return leg turns into the depth side
        // and stops flush against it.
        ShapeVariation {
            id: "l-derecha".to_string(),
            name: "L derecha".to_string(),
            required_count: 2,
            default_measurements: vec![
                Measurements::new(2400.0, RUN_WIDTH_MM),
                Measurements::new(1800.0, RUN_WIDTH_MM),
            ],
            piece_layouts: Some(vec![
                PieceLayout::new(0, Rotation::Deg0, ConnectionType::None),
                butt_corner(1, Rotation::Deg90, ConnectionType::CornerRight),
            ]),
        },
        ShapeVariation {
            id: "l-izquierda".to_string(),
            name: "L izquierda".to_string(),
            required_count: 2,
            default_measurements: vec![
                Measurements::new(1800.0, RUN_WIDTH_MM),
                Measurements::new(2400.0, RUN_WIDTH_MM),
            ],
            piece_layouts: Some(vec![
                PieceLayout::new(0, Rotation::DegMinus90, ConnectionType::None),
                butt_corner(1, Rotation::Deg0, ConnectionType::CornerLeft),
            ]),
        },
        ShapeVariation {
            id: "u".to_string(),
            name: "U".to_string(),
            required_count: 3,
            default_measurements: vec![
                Measurements::new(1800.0, RUN_WIDTH_MM),
                Measurements::new(2400.0, RUN_WIDTH_MM),
                Measurements::new(1800.0, RUN_WIDTH_MM),
            ],
            piece_layouts: Some(vec![
                PieceLayout::new(0, Rotation::DegMinus90, ConnectionType::None),
                butt_corner(1, Rotation::Deg0, ConnectionType::CornerLeft),
                butt_corner(2, Rotation::Deg90, ConnectionType::CornerRight),
            ]),
        },
    ]
}
