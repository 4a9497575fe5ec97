use encimera_types::{AddonCatalog, AddonCategory, Piece};
use serde::{Deserialize, Serialize};

/// Outcome of checking that every junction has a joining method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssemblyReport {
    Valid,
    Invalid {
        /// 0-based junction index; junction `i` joins piece `i` and `i + 1`.
        failing_junction_index: usize,
        message: String,
    },
}

impl AssemblyReport {
    pub fn is_valid(&self) -> bool {
        matches!(self, AssemblyReport::Valid)
    }
}

/// Check that every junction between consecutive pieces carries an
/// assembly addon.
///
/// The joining addon of junction `i` is recorded on piece `i + 1`. Codes the
/// catalog cannot resolve never count as assembly addons.
pub fn validate_assemblies(pieces: &[Piece], catalog: &dyn AddonCatalog) -> AssemblyReport {
    for (i, piece) in pieces.iter().enumerate().skip(1) {
        let joined = piece
            .applied_addons
            .iter()
            .any(|addon| catalog.category_of(&addon.code) == Some(AddonCategory::Ensamblaje));
        if !joined {
            return AssemblyReport::Invalid {
                failing_junction_index: i - 1,
                message: format!(
                    "junction {} between piece {} and piece {} has no assembly addon",
                    i,
                    i,
                    i + 1
                ),
            };
        }
    }
    AssemblyReport::Valid
}
