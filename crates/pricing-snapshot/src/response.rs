use encimera_types::PriceBreakdown;
use project_engine::{ProjectCommand, RequestToken};
use serde::Deserialize;

use crate::errors::SnapshotError;
use crate::request::{FORMAT_ID, FORMAT_VERSION};

/// The top-level response structure for deserialization.
#[derive(Debug, Clone, Deserialize)]
struct PricingResponseRaw {
    format: String,
    version: u32,
    token: RequestToken,
    status: ResponseStatus,
    #[serde(default)]
    breakdown: Option<PriceBreakdown>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ResponseStatus {
    Ok,
    Error,
}

/// A decoded answer from the pricing service.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingOutcome {
    pub token: RequestToken,
    pub result: Result<PriceBreakdown, String>,
}

impl PricingOutcome {
    /// The reducer command that records this outcome.
    pub fn into_command(self) -> ProjectCommand {
        match self.result {
            Ok(result) => ProjectCommand::CalculationSuccess {
                token: self.token,
                result,
            },
            Err(message) => ProjectCommand::CalculationError {
                token: self.token,
                message,
            },
        }
    }
}

/// Decode a pricing response, validating format and version.
pub fn parse_response(json: &str) -> Result<PricingOutcome, SnapshotError> {
    let raw: PricingResponseRaw =
        serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))?;

    if raw.format != FORMAT_ID {
        return Err(SnapshotError::UnknownFormat(raw.format));
    }
    if raw.version > FORMAT_VERSION {
        return Err(SnapshotError::FutureVersion {
            response_version: raw.version,
            supported_version: FORMAT_VERSION,
        });
    }

    let result = match raw.status {
        ResponseStatus::Ok => Ok(raw
            .breakdown
            .ok_or_else(|| SnapshotError::Parse("ok response without breakdown".to_string()))?),
        ResponseStatus::Error => Err(raw
            .message
            .unwrap_or_else(|| "pricing service reported an error".to_string())),
    };
    Ok(PricingOutcome {
        token: raw.token,
        result,
    })
}
