use encimera_types::{AppliedAddon, MaterialSelection, Measurements, PriceBreakdown};
use serde::{Deserialize, Serialize};

use crate::catalog::ShapeVariation;
use crate::merge::{AddonPatch, PiecePatch};
use crate::state::RequestToken;

/// Every mutation of a [`ProjectState`](crate::state::ProjectState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProjectCommand {
    /// Stage a material; re-materializes existing pieces.
    StageMaterial { selection: MaterialSelection },
    /// Create pieces for a catalog shape, checking the expected count.
    CreatePiecesForShape { shape_id: String, count: usize },
    /// Create pieces from a full variation and remember its id.
    CreatePiecesFromVariation { variation: ShapeVariation },
    ResetShape,
    SetPieceMeasurements {
        index: usize,
        measurements: Measurements,
    },
    UpdatePiece { index: usize, patch: PiecePatch },
    AddAddonToPiece { index: usize, addon: AppliedAddon },
    RemoveAddonFromPiece { index: usize, addon_index: usize },
    UpdateAddonInPiece {
        index: usize,
        addon_index: usize,
        patch: AddonPatch,
    },
    SetActivePiece { index: Option<usize> },
    CalculationStart,
    CalculationSuccess {
        token: RequestToken,
        result: PriceBreakdown,
    },
    CalculationError {
        token: RequestToken,
        message: String,
    },
}

impl ProjectCommand {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ProjectCommand::StageMaterial { .. } => "StageMaterial",
            ProjectCommand::CreatePiecesForShape { .. } => "CreatePiecesForShape",
            ProjectCommand::CreatePiecesFromVariation { .. } => "CreatePiecesFromVariation",
            ProjectCommand::ResetShape => "ResetShape",
            ProjectCommand::SetPieceMeasurements { .. } => "SetPieceMeasurements",
            ProjectCommand::UpdatePiece { .. } => "UpdatePiece",
            ProjectCommand::AddAddonToPiece { .. } => "AddAddonToPiece",
            ProjectCommand::RemoveAddonFromPiece { .. } => "RemoveAddonFromPiece",
            ProjectCommand::UpdateAddonInPiece { .. } => "UpdateAddonInPiece",
            ProjectCommand::SetActivePiece { .. } => "SetActivePiece",
            ProjectCommand::CalculationStart => "CalculationStart",
            ProjectCommand::CalculationSuccess { .. } => "CalculationSuccess",
            ProjectCommand::CalculationError { .. } => "CalculationError",
        }
    }
}
