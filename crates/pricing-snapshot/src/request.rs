use encimera_types::{MaterialSelection, Piece};
use project_engine::{ProjectState, RequestToken};
use serde::{Deserialize, Serialize};

use crate::errors::SnapshotError;
use crate::metadata::SnapshotMetadata;

/// Format identifier shared by requests and responses.
pub const FORMAT_ID: &str = "encimera-pricing";

/// Current snapshot format version.
pub const FORMAT_VERSION: u32 = 1;

/// Everything the pricing service needs to price a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub format: String,
    pub version: u32,
    /// Echoed back by the service so late answers can be discarded.
    pub token: RequestToken,
    pub metadata: SnapshotMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_id: Option<String>,
    pub material: MaterialSelection,
    pub pieces: Vec<Piece>,
}

/// Snapshot `state` for the calculation identified by `token`.
pub fn build_request(
    state: &ProjectState,
    token: RequestToken,
    metadata: SnapshotMetadata,
) -> Result<PricingRequest, SnapshotError> {
    let material = state
        .pending_material_selection
        .clone()
        .ok_or(SnapshotError::NoMaterial)?;
    if state.pieces.is_empty() {
        return Err(SnapshotError::NoPieces);
    }

    Ok(PricingRequest {
        format: FORMAT_ID.to_string(),
        version: FORMAT_VERSION,
        token,
        metadata,
        shape_id: state.selected_shape_id.clone(),
        material,
        pieces: state.pieces.clone(),
    })
}

/// Serialize a request to pretty-printed JSON.
pub fn to_json(request: &PricingRequest) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(request).map_err(|e| SnapshotError::Serialize(e.to_string()))
}
