use encimera_types::{MaterialSelection, Piece};

use crate::catalog::ShapeCatalog;
use crate::command::ProjectCommand;
use crate::factory::{self, CreationError};
use crate::merge::Patch;
use crate::state::{CalculationStatus, ProjectState, RequestToken};

/// Why a command produced no new state.
///
/// Rejections are refused requests the user must be told about; the other
/// variants are guard violations that leave the project as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("piece creation rejected: {0}")]
    Creation(#[from] CreationError),

    #[error("unknown shape: {shape_id}")]
    UnknownShape { shape_id: String },

    #[error("pieces already exist; reset the shape before creating new ones")]
    PiecesAlreadyCreated,

    #[error("no material has been staged")]
    NoMaterialStaged,

    #[error("piece index {index} out of range ({count} pieces)")]
    PieceIndexOutOfRange { index: usize, count: usize },

    #[error("addon index {addon_index} out of range for piece {index} ({count} addons)")]
    AddonIndexOutOfRange {
        index: usize,
        addon_index: usize,
        count: usize,
    },

    #[error("stale calculation response for token {received:?} (pending: {pending:?})")]
    StaleCalculation {
        received: RequestToken,
        pending: Option<RequestToken>,
    },
}

impl CommandError {
    /// True for refused requests, as opposed to ignored no-ops.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CommandError::Creation(_) | CommandError::UnknownShape { .. }
        )
    }
}

/// Compute the state following `command`.
///
/// Pure and atomic: on success the complete next state is returned, on
/// error the caller keeps `state` untouched.
pub fn reduce(
    state: &ProjectState,
    command: ProjectCommand,
    shapes: &ShapeCatalog,
) -> Result<ProjectState, CommandError> {
    let mut next = state.clone();
    match command {
        ProjectCommand::StageMaterial { selection } => {
            for piece in &mut next.pieces {
                piece.rematerialize(&selection);
            }
            next.pending_material_selection = Some(selection);
        }

        ProjectCommand::CreatePiecesForShape { shape_id, count } => {
            let material = staged_material(state)?;
            let variation = shapes
                .get(&shape_id)
                .ok_or_else(|| CommandError::UnknownShape {
                    shape_id: shape_id.clone(),
                })?;
            if count != variation.required_count {
                return Err(CreationError::CountMismatch {
                    shape_id,
                    requested: count,
                    required: variation.required_count,
                }
                .into());
            }
            next.pieces = factory::create_pieces(variation, material)?;
            next.active_piece_index = Some(0);
        }

        ProjectCommand::CreatePiecesFromVariation { variation } => {
            let material = staged_material(state)?;
            next.pieces = factory::create_pieces(&variation, material)?;
            next.active_piece_index = Some(0);
            next.selected_shape_id = Some(variation.id);
        }

        ProjectCommand::ResetShape => {
            next.pieces.clear();
            next.active_piece_index = None;
        }

        ProjectCommand::SetPieceMeasurements {
            index,
            measurements,
        } => {
            piece_mut(&mut next.pieces, index)?.measurements = measurements;
        }

        ProjectCommand::UpdatePiece { index, patch } => {
            patch.apply_to(piece_mut(&mut next.pieces, index)?);
        }

        ProjectCommand::AddAddonToPiece { index, addon } => {
            piece_mut(&mut next.pieces, index)?.applied_addons.push(addon);
        }

        ProjectCommand::RemoveAddonFromPiece { index, addon_index } => {
            let piece = piece_mut(&mut next.pieces, index)?;
            check_addon_index(piece, index, addon_index)?;
            piece.applied_addons.remove(addon_index);
        }

        ProjectCommand::UpdateAddonInPiece {
            index,
            addon_index,
            patch,
        } => {
            let piece = piece_mut(&mut next.pieces, index)?;
            check_addon_index(piece, index, addon_index)?;
            patch.apply_to(&mut piece.applied_addons[addon_index]);
        }

        ProjectCommand::SetActivePiece { index } => {
            next.active_piece_index = index;
        }

        ProjectCommand::CalculationStart => {
            let (started, _) = start_calculation(state);
            next = started;
        }

        ProjectCommand::CalculationSuccess { token, result } => {
            check_token(state, token)?;
            next.calculation = CalculationStatus::Success { token, result };
        }

        ProjectCommand::CalculationError { token, message } => {
            check_token(state, token)?;
            next.calculation = CalculationStatus::Error { token, message };
        }
    }
    Ok(next)
}

/// Enter the pending state under a fresh token, dropping any previous
/// result or error.
pub fn start_calculation(state: &ProjectState) -> (ProjectState, RequestToken) {
    let token = RequestToken(state.next_token);
    let next = ProjectState {
        next_token: state.next_token + 1,
        calculation: CalculationStatus::Pending { token },
        ..state.clone()
    };
    (next, token)
}

/// Creation guards: pieces must be empty and a material must be staged.
fn staged_material(state: &ProjectState) -> Result<&MaterialSelection, CommandError> {
    if state.has_pieces() {
        return Err(CommandError::PiecesAlreadyCreated);
    }
    state
        .pending_material_selection
        .as_ref()
        .ok_or(CommandError::NoMaterialStaged)
}

fn piece_mut(pieces: &mut [Piece], index: usize) -> Result<&mut Piece, CommandError> {
    let count = pieces.len();
    pieces
        .get_mut(index)
        .ok_or(CommandError::PieceIndexOutOfRange { index, count })
}

fn check_addon_index(piece: &Piece, index: usize, addon_index: usize) -> Result<(), CommandError> {
    let count = piece.applied_addons.len();
    if addon_index < count {
        Ok(())
    } else {
        Err(CommandError::AddonIndexOutOfRange {
            index,
            addon_index,
            count,
        })
    }
}

fn check_token(state: &ProjectState, received: RequestToken) -> Result<(), CommandError> {
    let pending = state.pending_token();
    if pending == Some(received) {
        Ok(())
    } else {
        Err(CommandError::StaleCalculation { received, pending })
    }
}
