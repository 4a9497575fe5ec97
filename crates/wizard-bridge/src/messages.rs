use encimera_types::{AddonInfo, AppliedAddon, MaterialSelection, Measurements, PriceBreakdown};
use layout_engine::Layout;
use pricing_snapshot::PricingRequest;
use project_engine::{AddonPatch, AssemblyReport, PiecePatch, ProjectState, RequestToken, ShapeVariation};
use serde::{Deserialize, Serialize};

/// Messages from the wizard shell to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WizardToCore {
    // -- Material and shape --
    /// Stage the material used by every piece.
    StageMaterial {
        selection: MaterialSelection,
    },
    /// Create pieces for a catalog shape. `count` defaults to what the shape requires.
    ChooseShape {
        shape_id: String,
        #[serde(default)]
        count: Option<usize>,
    },
    /// Create pieces for a shape the shell built itself.
    ChooseCustomShape {
        variation: ShapeVariation,
    },
    /// Drop all pieces so another shape can be chosen.
    ResetShape,

    // -- Piece editing --
    SetPieceMeasurements {
        index: usize,
        measurements: Measurements,
    },
    UpdatePiece {
        index: usize,
        patch: PiecePatch,
    },
    SetActivePiece {
        #[serde(default)]
        index: Option<usize>,
    },

    // -- Addons --
    AddAddon {
        index: usize,
        addon: AppliedAddon,
    },
    RemoveAddon {
        index: usize,
        addon_index: usize,
    },
    UpdateAddon {
        index: usize,
        addon_index: usize,
        patch: AddonPatch,
    },
    /// Replace the addon catalog used for assembly checks.
    LoadAddonCatalog {
        addons: Vec<AddonInfo>,
    },

    // -- Pricing --
    /// Ask for a quote; answered with a request to forward to the pricing service.
    RequestQuote,
    QuoteSucceeded {
        token: RequestToken,
        breakdown: PriceBreakdown,
    },
    QuoteFailed {
        token: RequestToken,
        message: String,
    },
    /// Raw pricing service answer, decoded by the core.
    QuoteResponse {
        response: String,
    },

    // -- Queries --
    GetLayout,
}

/// Responses from the core to the wizard shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CoreToWizard {
    /// The project after the message was applied, with its derived views.
    ProjectUpdated {
        project: ProjectState,
        layout: Layout,
        assembly: AssemblyReport,
    },
    /// Forward `request` to the pricing service and answer with `token`.
    QuoteRequested {
        token: RequestToken,
        request: PricingRequest,
    },
    /// The project is not ready to be priced.
    QuoteBlocked {
        reason: String,
    },
    /// The message was valid but did not apply in the current state.
    CommandIgnored {
        command: String,
        reason: String,
    },
    Error {
        message: String,
    },
}

impl WizardToCore {
    /// Message name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StageMaterial { .. } => "StageMaterial",
            Self::ChooseShape { .. } => "ChooseShape",
            Self::ChooseCustomShape { .. } => "ChooseCustomShape",
            Self::ResetShape => "ResetShape",
            Self::SetPieceMeasurements { .. } => "SetPieceMeasurements",
            Self::UpdatePiece { .. } => "UpdatePiece",
            Self::SetActivePiece { .. } => "SetActivePiece",
            Self::AddAddon { .. } => "AddAddon",
            Self::RemoveAddon { .. } => "RemoveAddon",
            Self::UpdateAddon { .. } => "UpdateAddon",
            Self::LoadAddonCatalog { .. } => "LoadAddonCatalog",
            Self::RequestQuote => "RequestQuote",
            Self::QuoteSucceeded { .. } => "QuoteSucceeded",
            Self::QuoteFailed { .. } => "QuoteFailed",
            Self::QuoteResponse { .. } => "QuoteResponse",
            Self::GetLayout => "GetLayout",
        }
    }
}
