//! Helper functions: error type, catalog fixtures, logging setup.

use encimera_types::{AddonCategory, AddonInfo, MaterialSelection, MeasurementKey};
use tracing_subscriber::EnvFilter;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("dispatch error ({message_type}): {message}")]
    DispatchError {
        message_type: String,
        message: String,
    },

    #[error("command ignored ({command}): {reason}")]
    Ignored { command: String, reason: String },

    #[error("quote blocked: {reason}")]
    QuoteBlocked { reason: String },

    #[error("unexpected response to {message_type}: {got}")]
    UnexpectedResponse { message_type: String, got: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("session setup failed: {0}")]
    Setup(String),
}

// ── Logging ─────────────────────────────────────────────────────────────────

/// Route `tracing` output to the test writer, filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// ── Catalog Fixtures ────────────────────────────────────────────────────────

/// Code of the straight joint used by the fixtures to close junctions.
pub const JOINT_CODE: &str = "UNION-RECTA";

/// A small addon catalog with one entry per category.
pub fn standard_addons() -> Vec<AddonInfo> {
    vec![
        addon(JOINT_CODE, "Unión recta", AddonCategory::Ensamblaje, &[]),
        addon(
            "INGLETE",
            "Unión a inglete",
            AddonCategory::Ensamblaje,
            &[MeasurementKey::LengthMl],
        ),
        addon(
            "FREGADERO",
            "Hueco fregadero bajo encimera",
            AddonCategory::Trabajo,
            &[MeasurementKey::LengthMl, MeasurementKey::WidthMm],
        ),
        addon(
            "COPETE",
            "Copete trasero",
            AddonCategory::Complemento,
            &[MeasurementKey::LengthMl, MeasurementKey::HeightMm],
        ),
    ]
}

/// A material selection with no attributes.
pub fn material(id: &str) -> MaterialSelection {
    MaterialSelection::new(id)
}

fn addon(code: &str, name: &str, category: AddonCategory, keys: &[MeasurementKey]) -> AddonInfo {
    AddonInfo {
        code: code.to_string(),
        name: name.to_string(),
        category,
        allowed_material_categories: Vec::new(),
        required_measurements: keys.to_vec(),
    }
}

// ── Float Helpers ───────────────────────────────────────────────────────────

/// Component-wise comparison of two points within `tol`.
pub fn points_close(a: &nalgebra::Vector3<f64>, b: &nalgebra::Vector3<f64>, tol: f64) -> bool {
    (a - b).amax() <= tol
}
