use encimera_types::{sequence_indices, AddonCatalog, Piece, MIN_TRIMMED_LENGTH_MM};
use serde::{Deserialize, Serialize};

use crate::assembly::{validate_assemblies, AssemblyReport};
use crate::state::ProjectState;

/// A data problem in a piece that should be fixed at measurement entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PieceIssue {
    /// Length or width is zero, negative or not finite.
    NonPositiveMeasurements { index: usize },
    /// A butt corner whose trim by the previous piece's width leaves less
    /// than [`MIN_TRIMMED_LENGTH_MM`] to draw.
    DegenerateTrim {
        index: usize,
        length_mm: f64,
        previous_width_mm: f64,
    },
}

/// Report measurement problems, in wall-sequence order.
pub fn validate_pieces(pieces: &[Piece]) -> Vec<PieceIssue> {
    let mut issues = Vec::new();
    let mut previous_width_mm = None;

    for index in sequence_indices(pieces) {
        let piece = &pieces[index];
        let m = piece.measurements;
        if !m.is_positive() {
            issues.push(PieceIssue::NonPositiveMeasurements { index });
        } else if let Some(previous_width_mm) = previous_width_mm {
            let trimmed = piece.layout_or_default().is_butt_corner();
            if trimmed && m.length_mm - previous_width_mm < MIN_TRIMMED_LENGTH_MM {
                issues.push(PieceIssue::DegenerateTrim {
                    index,
                    length_mm: m.length_mm,
                    previous_width_mm,
                });
            }
        }
        previous_width_mm = Some(m.width_mm);
    }
    issues
}

/// Why a project cannot be sent for pricing yet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingBlocked {
    #[error("no material has been staged")]
    NoMaterial,

    #[error("the project has no pieces")]
    NoPieces,

    #[error("{} piece measurement issue(s)", .0.len())]
    InvalidPieces(Vec<PieceIssue>),

    #[error("{message}")]
    AssemblyGap {
        failing_junction_index: usize,
        message: String,
    },
}

/// Gate applied before a price calculation is submitted.
pub fn check_ready_for_pricing(
    state: &ProjectState,
    catalog: &dyn AddonCatalog,
) -> Result<(), PricingBlocked> {
    if state.pending_material_selection.is_none() {
        return Err(PricingBlocked::NoMaterial);
    }
    if state.pieces.is_empty() {
        return Err(PricingBlocked::NoPieces);
    }
    let issues = validate_pieces(&state.pieces);
    if !issues.is_empty() {
        return Err(PricingBlocked::InvalidPieces(issues));
    }
    if let AssemblyReport::Invalid {
        failing_junction_index,
        message,
    } = validate_assemblies(&state.pieces, catalog)
    {
        return Err(PricingBlocked::AssemblyGap {
            failing_junction_index,
            message,
        });
    }
    Ok(())
}
