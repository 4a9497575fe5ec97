//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics,
//! so a scenario can collect all failures in one pass.

use encimera_types::Piece;
use layout_engine::{sequence_issues, Layout};
use nalgebra::Vector3;
use project_engine::{check_ready_for_pricing, AssemblyReport};
use wizard_bridge::WizardSession;

use crate::helpers::points_close;

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::pass(name, detail)
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::fail(name, detail)
        }
    }
}

// ── Layout Oracles ──────────────────────────────────────────────────────────

/// Each piece's run starts where the previous one ended, and the first at the origin.
pub fn check_run_continuity(layout: &Layout, tol: f64) -> OracleVerdict {
    let mut expected = Vector3::zeros();
    for (position, placement) in layout.placements.iter().enumerate() {
        if !points_close(&placement.run_start, &expected, tol) {
            return OracleVerdict::fail(
                "run_continuity",
                format!(
                    "placement {} starts at ({:.4}, {:.4}, {:.4}), expected ({:.4}, {:.4}, {:.4})",
                    position,
                    placement.run_start.x,
                    placement.run_start.y,
                    placement.run_start.z,
                    expected.x,
                    expected.y,
                    expected.z,
                ),
            );
        }
        expected = placement.run_end;
    }
    OracleVerdict::pass(
        "run_continuity",
        format!("{} placements chained", layout.placements.len()),
    )
}

/// No piece was shortened below the minimum visual length.
pub fn check_no_clamped(layout: &Layout) -> OracleVerdict {
    let clamped: Vec<usize> = layout
        .placements
        .iter()
        .filter(|p| p.clamped)
        .map(|p| p.piece_index)
        .collect();
    if clamped.is_empty() {
        OracleVerdict::pass("no_clamped", "no clamped pieces".to_string())
    } else {
        OracleVerdict::fail_val(
            "no_clamped",
            format!("pieces {:?} were clamped", clamped),
            clamped.len() as f64,
        )
    }
}

/// Butt corners are trimmed by exactly the previous piece's depth; nothing else is trimmed.
pub fn check_corner_trims(pieces: &[Piece], layout: &Layout, tol: f64) -> OracleVerdict {
    let mut previous_depth = None;
    for placement in &layout.placements {
        let Some(piece) = pieces.get(placement.piece_index) else {
            return OracleVerdict::fail(
                "corner_trims",
                format!("placement refers to missing piece {}", placement.piece_index),
            );
        };
        let expected = match previous_depth {
            Some(depth) if piece.layout_or_default().is_butt_corner() => depth,
            _ => 0.0,
        };
        if (placement.start_offset - expected).abs() > tol {
            return OracleVerdict::fail_val(
                "corner_trims",
                format!(
                    "piece {} trimmed by {:.4} m, expected {:.4} m",
                    placement.piece_index, placement.start_offset, expected
                ),
                placement.start_offset,
            );
        }
        previous_depth = Some(placement.size.depth);
    }
    OracleVerdict::pass("corner_trims", "all trims match".to_string())
}

/// Every box rests on the floor plane.
pub fn check_on_floor(layout: &Layout, tol: f64) -> OracleVerdict {
    match layout.extent() {
        None => OracleVerdict::pass("on_floor", "empty layout".to_string()),
        Some((min, _)) if min.y.abs() <= tol => {
            OracleVerdict::pass_val("on_floor", "lowest face at y=0".to_string(), min.y)
        }
        Some((min, _)) => OracleVerdict::fail_val(
            "on_floor",
            format!("lowest face at y={:.4}", min.y),
            min.y,
        ),
    }
}

/// The camera looks at the mean of the placement centers.
pub fn check_camera_target(layout: &Layout, tol: f64) -> OracleVerdict {
    if layout.is_empty() {
        return OracleVerdict::pass("camera_target", "empty layout".to_string());
    }
    let mean = layout
        .placements
        .iter()
        .fold(Vector3::<f64>::zeros(), |acc, p| acc + p.center)
        / layout.placements.len() as f64;
    if points_close(&layout.camera_target, &mean, tol) {
        OracleVerdict::pass("camera_target", "camera on centroid".to_string())
    } else {
        OracleVerdict::fail_val(
            "camera_target",
            "camera off centroid".to_string(),
            (layout.camera_target - mean).norm(),
        )
    }
}

// ── Project Oracles ─────────────────────────────────────────────────────────

/// Piece orders form a clean sequence.
pub fn check_sequence(pieces: &[Piece]) -> OracleVerdict {
    let issues = sequence_issues(pieces);
    if issues.is_empty() {
        OracleVerdict::pass("sequence", format!("{} pieces in order", pieces.len()))
    } else {
        let detail = issues
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        OracleVerdict::fail_val("sequence", detail, issues.len() as f64)
    }
}

/// Every junction has an assembly addon.
pub fn check_assembly(session: &WizardSession) -> OracleVerdict {
    match session.assembly() {
        AssemblyReport::Valid => OracleVerdict::pass("assembly", "all junctions joined".to_string()),
        AssemblyReport::Invalid {
            failing_junction_index,
            message,
        } => OracleVerdict::fail_val("assembly", message, failing_junction_index as f64),
    }
}

/// The project would be accepted for pricing.
pub fn check_pricing_ready(session: &WizardSession) -> OracleVerdict {
    match check_ready_for_pricing(&session.project.state, &session.addons) {
        Ok(()) => OracleVerdict::pass("pricing_ready", "ready".to_string()),
        Err(blocked) => OracleVerdict::fail("pricing_ready", blocked.to_string()),
    }
}

/// Run every oracle with default tolerances.
pub fn run_all_oracles(session: &WizardSession) -> Vec<OracleVerdict> {
    let pieces = &session.project.state.pieces;
    let layout = session.layout();
    vec![
        check_sequence(pieces),
        check_run_continuity(&layout, 1e-9),
        check_no_clamped(&layout),
        check_corner_trims(pieces, &layout, 1e-9),
        check_on_floor(&layout, 1e-9),
        check_camera_target(&layout, 1e-9),
        check_assembly(session),
        check_pricing_ready(session),
    ]
}
