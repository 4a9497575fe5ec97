//! Category-aware queries over applied addons and the addon catalog.

use encimera_types::{AddonCatalog, AddonCategory, AddonInfo, AppliedAddon, MeasurementKey, Piece};

/// Addons on `piece` whose code resolves to `category`.
pub fn addons_in_category<'p>(
    piece: &'p Piece,
    category: AddonCategory,
    catalog: &dyn AddonCatalog,
) -> Vec<&'p AppliedAddon> {
    piece
        .applied_addons
        .iter()
        .filter(|addon| catalog.category_of(&addon.code) == Some(category))
        .collect()
}

/// Applied addons whose code the catalog does not know.
pub fn orphan_addons<'p>(piece: &'p Piece, catalog: &dyn AddonCatalog) -> Vec<&'p AppliedAddon> {
    piece
        .applied_addons
        .iter()
        .filter(|addon| catalog.lookup(&addon.code).is_none())
        .collect()
}

/// Catalog entries of `category` that may be offered for a material category.
///
/// With no material category every entry of the category is offered.
pub fn available_addons<'c>(
    catalog: &'c dyn AddonCatalog,
    category: AddonCategory,
    material_category: Option<&str>,
) -> Vec<&'c AddonInfo> {
    catalog
        .entries()
        .filter(|info| info.category == category)
        .filter(|info| material_category.map_or(true, |m| info.allows_material_category(m)))
        .collect()
}

/// Measurement keys the catalog requires but the addon lacks.
/// Orphan codes have no requirements.
pub fn missing_measurements(addon: &AppliedAddon, catalog: &dyn AddonCatalog) -> Vec<MeasurementKey> {
    let Some(info) = catalog.lookup(&addon.code) else {
        return Vec::new();
    };
    info.required_measurements
        .iter()
        .filter(|key| !addon.measurements.contains_key(key))
        .copied()
        .collect()
}
