use pricing_snapshot::{build_request, parse_response, SnapshotMetadata};
use project_engine::{check_ready_for_pricing, ProjectCommand};
use tracing::{debug, warn};

use crate::messages::{CoreToWizard, WizardToCore};
use crate::session::{BridgeError, WizardSession};

/// Handle one shell message and produce its response.
///
/// Never panics. Guard violations come back as `CommandIgnored` with the
/// project untouched; everything else that fails comes back as `Error`.
pub fn dispatch(session: &mut WizardSession, msg: WizardToCore) -> CoreToWizard {
    let name = msg.name();
    match handle_message(session, msg) {
        Ok(response) => response,
        Err(BridgeError::Command(e)) if !e.is_rejection() => CoreToWizard::CommandIgnored {
            command: name.to_string(),
            reason: e.to_string(),
        },
        Err(e) => {
            warn!(msg_type = name, error = %e, "Wizard message failed");
            CoreToWizard::Error {
                message: e.to_string(),
            }
        }
    }
}

/// JSON in, JSON out. Malformed input yields an `Error` response.
pub fn process_json(session: &mut WizardSession, json_input: &str) -> String {
    let response = match serde_json::from_str::<WizardToCore>(json_input) {
        Ok(msg) => dispatch(session, msg),
        Err(e) => CoreToWizard::Error {
            message: format!("Failed to parse message: {}", e),
        },
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            r#"{{"type":"Error","message":"Serialization failed: {}"}}"#,
            e
        )
    })
}

fn handle_message(
    session: &mut WizardSession,
    msg: WizardToCore,
) -> Result<CoreToWizard, BridgeError> {
    match msg {
        // -- Material and shape --
        WizardToCore::StageMaterial { selection } => {
            session.apply(ProjectCommand::StageMaterial { selection })?;
            Ok(project_updated(session))
        }

        WizardToCore::ChooseShape { shape_id, count } => {
            let count = count
                .or_else(|| {
                    session
                        .project
                        .shapes
                        .get(&shape_id)
                        .map(|v| v.required_count)
                })
                .unwrap_or(0);
            session.apply(ProjectCommand::CreatePiecesForShape { shape_id, count })?;
            Ok(project_updated(session))
        }

        WizardToCore::ChooseCustomShape { variation } => {
            session.apply(ProjectCommand::CreatePiecesFromVariation { variation })?;
            Ok(project_updated(session))
        }

        WizardToCore::ResetShape => {
            session.apply(ProjectCommand::ResetShape)?;
            Ok(project_updated(session))
        }

        // -- Piece editing --
        WizardToCore::SetPieceMeasurements {
            index,
            measurements,
        } => {
            session.apply(ProjectCommand::SetPieceMeasurements {
                index,
                measurements,
            })?;
            Ok(project_updated(session))
        }

        WizardToCore::UpdatePiece { index, patch } => {
            session.apply(ProjectCommand::UpdatePiece { index, patch })?;
            Ok(project_updated(session))
        }

        WizardToCore::SetActivePiece { index } => {
            session.apply(ProjectCommand::SetActivePiece { index })?;
            Ok(project_updated(session))
        }

        // -- Addons --
        WizardToCore::AddAddon { index, addon } => {
            session.apply(ProjectCommand::AddAddonToPiece { index, addon })?;
            Ok(project_updated(session))
        }

        WizardToCore::RemoveAddon { index, addon_index } => {
            session.apply(ProjectCommand::RemoveAddonFromPiece { index, addon_index })?;
            Ok(project_updated(session))
        }

        WizardToCore::UpdateAddon {
            index,
            addon_index,
            patch,
        } => {
            session.apply(ProjectCommand::UpdateAddonInPiece {
                index,
                addon_index,
                patch,
            })?;
            Ok(project_updated(session))
        }

        WizardToCore::LoadAddonCatalog { addons } => {
            session.load_addons(addons)?;
            Ok(project_updated(session))
        }

        // -- Pricing --
        WizardToCore::RequestQuote => {
            if let Err(blocked) = check_ready_for_pricing(&session.project.state, &session.addons) {
                debug!(reason = %blocked, "Quote blocked");
                return Ok(CoreToWizard::QuoteBlocked {
                    reason: blocked.to_string(),
                });
            }
            let token = session.project.begin_calculation();
            let request = build_request(
                &session.project.state,
                token,
                SnapshotMetadata::now(session.session_id),
            )?;
            Ok(CoreToWizard::QuoteRequested { token, request })
        }

        WizardToCore::QuoteSucceeded { token, breakdown } => {
            session.apply(ProjectCommand::CalculationSuccess {
                token,
                result: breakdown,
            })?;
            Ok(project_updated(session))
        }

        WizardToCore::QuoteFailed { token, message } => {
            session.apply(ProjectCommand::CalculationError { token, message })?;
            Ok(project_updated(session))
        }

        WizardToCore::QuoteResponse { response } => {
            let outcome = parse_response(&response)?;
            session.apply(outcome.into_command())?;
            Ok(project_updated(session))
        }

        // -- Queries --
        WizardToCore::GetLayout => Ok(project_updated(session)),
    }
}

fn project_updated(session: &WizardSession) -> CoreToWizard {
    CoreToWizard::ProjectUpdated {
        project: session.project.state.clone(),
        layout: session.layout(),
        assembly: session.assembly(),
    }
}
