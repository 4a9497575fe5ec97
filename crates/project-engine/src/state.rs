use encimera_types::{MaterialSelection, Piece, PriceBreakdown};
use serde::{Deserialize, Serialize};

/// Identifies one price-calculation round trip.
///
/// Tokens increase monotonically within a project so that a late response
/// to an older request can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(pub u64);

/// Lifecycle of the price calculation. Variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationStatus {
    #[default]
    Idle,
    Pending {
        token: RequestToken,
    },
    Success {
        token: RequestToken,
        result: PriceBreakdown,
    },
    Error {
        token: RequestToken,
        message: String,
    },
}

impl CalculationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, CalculationStatus::Pending { .. })
    }

    pub fn result(&self) -> Option<&PriceBreakdown> {
        match self {
            CalculationStatus::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            CalculationStatus::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// The whole configuration of one wizard session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectState {
    /// Pieces in insertion order; array index is the UI address.
    pub pieces: Vec<Piece>,
    /// Absent exactly when `pieces` is empty (after any creation or reset).
    pub active_piece_index: Option<usize>,
    pub selected_shape_id: Option<String>,
    /// Material chosen in the first step. Survives a shape reset.
    pub pending_material_selection: Option<MaterialSelection>,
    pub calculation: CalculationStatus,
    /// Value of the next token handed out by `CalculationStart`.
    #[serde(default)]
    pub next_token: u64,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token of the in-flight calculation, if one is pending.
    pub fn pending_token(&self) -> Option<RequestToken> {
        match self.calculation {
            CalculationStatus::Pending { token } => Some(token),
            _ => None,
        }
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.active_piece_index.and_then(|i| self.pieces.get(i))
    }

    pub fn has_pieces(&self) -> bool {
        !self.pieces.is_empty()
    }
}
