use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// The bounded set of measurement keys an addon may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKey {
    Quantity,
    /// Linear meters.
    LengthMl,
    WidthMm,
    HeightMm,
}

/// Category of an addon, resolved through the addon catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddonCategory {
    /// Machining work (cutouts, edge profiles, drilling).
    Trabajo,
    /// Joining method between two adjoining pieces.
    Ensamblaje,
    /// Complementary parts (backsplashes, skirting).
    Complemento,
    Otro,
}

/// An accessory applied to a piece. The code is a reference into the
/// external addon catalog and may fail to resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedAddon {
    pub code: String,
    #[serde(default)]
    pub measurements: BTreeMap<MeasurementKey, f64>,
}

impl AppliedAddon {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            measurements: BTreeMap::new(),
        }
    }

    pub fn with_measurement(mut self, key: MeasurementKey, value: f64) -> Self {
        self.measurements.insert(key, value);
        self
    }
}

/// Catalog entry describing an addon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonInfo {
    pub code: String,
    #[serde(default)]
    pub name: String,
    pub category: AddonCategory,
    /// Material categories this addon may be applied to. Empty means any.
    #[serde(default)]
    pub allowed_material_categories: Vec<String>,
    #[serde(default)]
    pub required_measurements: Vec<MeasurementKey>,
}

impl AddonInfo {
    pub fn allows_material_category(&self, material_category: &str) -> bool {
        self.allowed_material_categories.is_empty()
            || self
                .allowed_material_categories
                .iter()
                .any(|c| c == material_category)
    }
}

/// Lookup capability over the external addon catalog.
pub trait AddonCatalog {
    /// Resolve a code. Unknown codes yield `None`.
    fn lookup(&self, code: &str) -> Option<&AddonInfo>;

    /// Iterate every known addon.
    fn entries(&self) -> Box<dyn Iterator<Item = &AddonInfo> + '_>;

    fn category_of(&self, code: &str) -> Option<AddonCategory> {
        self.lookup(code).map(|info| info.category)
    }
}

/// Errors loading a catalog from JSON.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to parse catalog: {0}")]
    Parse(String),

    #[error("duplicate catalog entry: {key}")]
    Duplicate { key: String },
}

/// Addon catalog held in memory, keyed by code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddonCatalog {
    entries: Vec<AddonInfo>,
    by_code: HashMap<String, usize>,
}

impl InMemoryAddonCatalog {
    pub fn new(entries: Vec<AddonInfo>) -> Result<Self, CatalogLoadError> {
        let mut by_code = HashMap::with_capacity(entries.len());
        for (i, info) in entries.iter().enumerate() {
            if by_code.insert(info.code.clone(), i).is_some() {
                return Err(CatalogLoadError::Duplicate {
                    key: info.code.clone(),
                });
            }
        }
        Ok(Self { entries, by_code })
    }

    /// Load from a JSON array of [`AddonInfo`].
    pub fn from_json(json: &str) -> Result<Self, CatalogLoadError> {
        let entries: Vec<AddonInfo> =
            serde_json::from_str(json).map_err(|e| CatalogLoadError::Parse(e.to_string()))?;
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AddonCatalog for InMemoryAddonCatalog {
    fn lookup(&self, code: &str) -> Option<&AddonInfo> {
        self.by_code.get(code).map(|&i| &self.entries[i])
    }

    fn entries(&self) -> Box<dyn Iterator<Item = &AddonInfo> + '_> {
        Box::new(self.entries.iter())
    }
}
