use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::addon::CatalogLoadError;
use crate::piece::MaterialSelection;

/// Catalog entry describing a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Material family (e.g. "granito", "cuarzo"), matched against addon rules.
    pub category: String,
    /// Attribute type → allowed values.
    #[serde(default)]
    pub selectable_attributes: BTreeMap<String, Vec<String>>,
}

/// Why a staged selection does not fit its material.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("selection is for material {selected}, not {expected}")]
    WrongMaterial { selected: String, expected: String },

    #[error("attribute {attribute} is not selectable for this material")]
    UnknownAttribute { attribute: String },

    #[error("value {value} is not allowed for attribute {attribute}")]
    DisallowedValue { attribute: String, value: String },
}

impl MaterialInfo {
    /// Verify every chosen attribute exists and carries an allowed value.
    pub fn check_selection(&self, selection: &MaterialSelection) -> Result<(), SelectionError> {
        if selection.material_id != self.id {
            return Err(SelectionError::WrongMaterial {
                selected: selection.material_id.clone(),
                expected: self.id.clone(),
            });
        }
        for (attribute, value) in &selection.selected_attributes {
            let allowed = self.selectable_attributes.get(attribute).ok_or_else(|| {
                SelectionError::UnknownAttribute {
                    attribute: attribute.clone(),
                }
            })?;
            if !allowed.iter().any(|v| v == value) {
                return Err(SelectionError::DisallowedValue {
                    attribute: attribute.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Lookup capability over the external material catalog.
pub trait MaterialCatalog {
    fn lookup(&self, material_id: &str) -> Option<&MaterialInfo>;

    fn category_of(&self, material_id: &str) -> Option<&str> {
        self.lookup(material_id).map(|m| m.category.as_str())
    }
}

/// Material catalog held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMaterialCatalog {
    by_id: HashMap<String, MaterialInfo>,
}

impl InMemoryMaterialCatalog {
    pub fn new(entries: Vec<MaterialInfo>) -> Result<Self, CatalogLoadError> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for info in entries {
            let key = info.id.clone();
            if by_id.insert(key.clone(), info).is_some() {
                return Err(CatalogLoadError::Duplicate { key });
            }
        }
        Ok(Self { by_id })
    }

    /// Load from a JSON array of [`MaterialInfo`].
    pub fn from_json(json: &str) -> Result<Self, CatalogLoadError> {
        let entries: Vec<MaterialInfo> =
            serde_json::from_str(json).map_err(|e| CatalogLoadError::Parse(e.to_string()))?;
        Self::new(entries)
    }
}

impl MaterialCatalog for InMemoryMaterialCatalog {
    fn lookup(&self, material_id: &str) -> Option<&MaterialInfo> {
        self.by_id.get(material_id)
    }
}
