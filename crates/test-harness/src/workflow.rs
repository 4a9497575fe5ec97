//! ScenarioBuilder: fluent API for scripting wizard sessions in tests.
//!
//! Wraps `wizard_bridge::dispatch()` to exercise the real message path, not
//! a simulation. Failures and ignored messages come back as `HarnessError`
//! so scenarios read as straight-line `?` chains.

use encimera_types::{AppliedAddon, MeasurementKey, Measurements, PriceBreakdown};
use layout_engine::Layout;
use pricing_snapshot::PricingRequest;
use project_engine::{AddonPatch, PiecePatch, ProjectState, RequestToken};
use tracing::debug;
use wizard_bridge::{CoreToWizard, SessionConfig, WizardSession, WizardToCore};

use crate::helpers::*;
use crate::oracle::{self, OracleVerdict};

/// A fluent builder for driving and verifying wizard sessions in tests.
#[derive(Debug)]
pub struct ScenarioBuilder {
    pub session: WizardSession,
    history: Vec<(String, String)>,
    last_request: Option<PricingRequest>,
    auto_check: bool,
}

impl ScenarioBuilder {
    /// A session over the built-in shapes and the standard addon fixtures.
    ///
    /// Panics if the fixtures do not load.
    pub fn new() -> Self {
        let config = SessionConfig {
            addons: standard_addons(),
            ..SessionConfig::default()
        };
        let session = WizardSession::from_config(config)
            .unwrap_or_else(|e| panic!("standard fixtures failed to load: {}", e));
        Self::with_session(session)
    }

    /// Wrap an existing session.
    pub fn with_session(session: WizardSession) -> Self {
        init_test_logging();
        Self {
            session,
            history: Vec::new(),
            last_request: None,
            auto_check: false,
        }
    }

    /// Build from a JSON session config.
    pub fn from_config_json(json: &str) -> Result<Self, HarnessError> {
        let session =
            WizardSession::from_json(json).map_err(|e| HarnessError::Setup(e.to_string()))?;
        Ok(Self::with_session(session))
    }

    /// Enable auto-checking: after every update, run the layout oracles.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    // ── Material & Shape ────────────────────────────────────────────────

    pub fn stage_material(&mut self, material_id: &str) -> Result<&mut Self, HarnessError> {
        self.send(WizardToCore::StageMaterial {
            selection: material(material_id),
        })?;
        Ok(self)
    }

    /// Choose a catalog shape with its required piece count.
    pub fn choose_shape(&mut self, shape_id: &str) -> Result<&mut Self, HarnessError> {
        self.send(WizardToCore::ChooseShape {
            shape_id: shape_id.to_string(),
            count: None,
        })?;
        Ok(self)
    }

    pub fn reset_shape(&mut self) -> Result<&mut Self, HarnessError> {
        self.send(WizardToCore::ResetShape)?;
        Ok(self)
    }

    // ── Piece Editing ───────────────────────────────────────────────────

    /// Set a piece's length and width, in millimeters.
    pub fn measure(
        &mut self,
        index: usize,
        length_mm: f64,
        width_mm: f64,
    ) -> Result<&mut Self, HarnessError> {
        self.send(WizardToCore::SetPieceMeasurements {
            index,
            measurements: Measurements::new(length_mm, width_mm),
        })?;
        Ok(self)
    }

    pub fn patch_piece(&mut self, index: usize, patch: PiecePatch) -> Result<&mut Self, HarnessError> {
        self.send(WizardToCore::UpdatePiece { index, patch })?;
        Ok(self)
    }

    pub fn add_addon(&mut self, index: usize, addon: AppliedAddon) -> Result<&mut Self, HarnessError> {
        self.send(WizardToCore::AddAddon { index, addon })?;
        Ok(self)
    }

    pub fn set_addon_measurement(
        &mut self,
        index: usize,
        addon_index: usize,
        key: MeasurementKey,
        value: f64,
    ) -> Result<&mut Self, HarnessError> {
        self.send(WizardToCore::UpdateAddon {
            index,
            addon_index,
            patch: AddonPatch::measurement(key, value),
        })?;
        Ok(self)
    }

    /// Put the fixture joint on every junction.
    pub fn join_all(&mut self) -> Result<&mut Self, HarnessError> {
        for index in 1..self.piece_count() {
            self.add_addon(index, AppliedAddon::new(JOINT_CODE))?;
        }
        Ok(self)
    }

    // ── Quotes ──────────────────────────────────────────────────────────

    /// Ask for a quote and return the token the pricing service must echo.
    pub fn request_quote(&mut self) -> Result<RequestToken, HarnessError> {
        match self.dispatch_raw(WizardToCore::RequestQuote) {
            CoreToWizard::QuoteRequested { token, request } => {
                self.last_request = Some(request);
                Ok(token)
            }
            CoreToWizard::QuoteBlocked { reason } => Err(HarnessError::QuoteBlocked { reason }),
            other => Err(unexpected("RequestQuote", &other)),
        }
    }

    /// Answer a quote with a single-line breakdown.
    pub fn answer_quote(&mut self, token: RequestToken, total: f64) -> Result<&mut Self, HarnessError> {
        self.send(WizardToCore::QuoteSucceeded {
            token,
            breakdown: PriceBreakdown {
                total,
                currency: "EUR".to_string(),
                lines: Vec::new(),
            },
        })?;
        Ok(self)
    }

    pub fn fail_quote(&mut self, token: RequestToken, message: &str) -> Result<&mut Self, HarnessError> {
        self.send(WizardToCore::QuoteFailed {
            token,
            message: message.to_string(),
        })?;
        Ok(self)
    }

    /// The request produced by the last successful `request_quote`.
    pub fn last_request(&self) -> Option<&PricingRequest> {
        self.last_request.as_ref()
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn state(&self) -> &ProjectState {
        &self.session.project.state
    }

    pub fn piece_count(&self) -> usize {
        self.session.project.state.pieces.len()
    }

    pub fn layout(&self) -> Layout {
        self.session.layout()
    }

    /// Every message sent so far with a one-word outcome.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    /// Messages that did not apply.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.history
            .iter()
            .filter(|(_, outcome)| outcome != "ok")
            .cloned()
            .collect()
    }

    /// Run every oracle against the current session.
    pub fn check_all(&self) -> Vec<OracleVerdict> {
        oracle::run_all_oracles(&self.session)
    }

    // ── Dispatch ────────────────────────────────────────────────────────

    /// Dispatch without interpreting the response.
    pub fn dispatch_raw(&mut self, msg: WizardToCore) -> CoreToWizard {
        let name = msg.name().to_string();
        let response = wizard_bridge::dispatch(&mut self.session, msg);
        let outcome = match &response {
            CoreToWizard::Error { message } => format!("error: {}", message),
            CoreToWizard::CommandIgnored { reason, .. } => format!("ignored: {}", reason),
            CoreToWizard::QuoteBlocked { reason } => format!("blocked: {}", reason),
            _ => "ok".to_string(),
        };
        debug!(step = %name, %outcome, "Scenario step");
        self.history.push((name, outcome));
        response
    }

    fn send(&mut self, msg: WizardToCore) -> Result<CoreToWizard, HarnessError> {
        let name = msg.name();
        match self.dispatch_raw(msg) {
            CoreToWizard::Error { message } => Err(HarnessError::DispatchError {
                message_type: name.to_string(),
                message,
            }),
            CoreToWizard::CommandIgnored { command, reason } => {
                Err(HarnessError::Ignored { command, reason })
            }
            response => {
                if self.auto_check {
                    self.run_auto_check(name)?;
                }
                Ok(response)
            }
        }
    }

    fn run_auto_check(&self, after: &str) -> Result<(), HarnessError> {
        let layout = self.layout();
        for verdict in [
            oracle::check_run_continuity(&layout, 1e-9),
            oracle::check_no_clamped(&layout),
        ] {
            if !verdict.passed {
                return Err(HarnessError::OracleFailure {
                    oracle: verdict.oracle_name,
                    detail: format!("after {}: {}", after, verdict.detail),
                });
            }
        }
        Ok(())
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn unexpected(message_type: &str, response: &CoreToWizard) -> HarnessError {
    HarnessError::UnexpectedResponse {
        message_type: message_type.to_string(),
        got: format!("{:?}", response),
    }
}
