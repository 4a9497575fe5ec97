//! Structured text-based scenario reports.
//!
//! Reports are plain text, not JSON, so a failing test prints something a
//! person can read at a glance.

use std::fmt;

use project_engine::CalculationStatus;

use crate::oracle::{self, OracleVerdict};
use crate::workflow::ScenarioBuilder;

/// A complete scenario report with all sections.
pub struct ScenarioReport {
    pub shape_id: Option<String>,
    pub material_id: Option<String>,
    pub pieces: Vec<PieceEntry>,
    pub extent: Option<([f64; 3], [f64; 3])>,
    pub calculation: String,
    pub oracle_results: Vec<OracleVerdict>,
    pub errors: Vec<(String, String)>,
}

/// One piece and where it was placed.
pub struct PieceEntry {
    pub index: usize,
    pub order: u32,
    pub connection: String,
    pub length_mm: f64,
    pub width_mm: f64,
    pub addons: Vec<String>,
    pub center: Option<[f64; 3]>,
    pub start_offset: f64,
    pub clamped: bool,
}

impl ScenarioReport {
    /// Gather a report from the builder's current session.
    pub fn generate(builder: &ScenarioBuilder) -> Self {
        let state = builder.state();
        let layout = builder.layout();

        let pieces = state
            .pieces
            .iter()
            .enumerate()
            .map(|(index, piece)| {
                let piece_layout = piece.layout_or_default();
                let placement = layout.placement_for(piece.id);
                PieceEntry {
                    index,
                    order: piece_layout.order,
                    connection: format!("{:?}", piece_layout.connection_type),
                    length_mm: piece.measurements.length_mm,
                    width_mm: piece.measurements.width_mm,
                    addons: piece.applied_addons.iter().map(|a| a.code.clone()).collect(),
                    center: placement.map(|p| [p.center.x, p.center.y, p.center.z]),
                    start_offset: placement.map_or(0.0, |p| p.start_offset),
                    clamped: placement.is_some_and(|p| p.clamped),
                }
            })
            .collect();

        let calculation = match &state.calculation {
            CalculationStatus::Idle => "idle".to_string(),
            CalculationStatus::Pending { token } => format!("pending (token {})", token.0),
            CalculationStatus::Success { token, result } => format!(
                "priced {:.2} {} (token {})",
                result.total, result.currency, token.0
            ),
            CalculationStatus::Error { token, message } => {
                format!("failed: {} (token {})", message, token.0)
            }
        };

        Self {
            shape_id: state.selected_shape_id.clone(),
            material_id: state
                .pending_material_selection
                .as_ref()
                .map(|m| m.material_id.clone()),
            pieces,
            extent: layout
                .extent()
                .map(|(min, max)| ([min.x, min.y, min.z], [max.x, max.y, max.z])),
            calculation,
            oracle_results: oracle::run_all_oracles(&builder.session),
            errors: builder.errors(),
        }
    }

    /// True when every oracle passed and no message failed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.oracle_results.iter().all(|v| v.passed)
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Encimera Scenario Report ===\n\n");

        out.push_str(&format!(
            "Material: {}\nShape: {}\n\n",
            self.material_id.as_deref().unwrap_or("(none)"),
            self.shape_id.as_deref().unwrap_or("(catalog)"),
        ));

        out.push_str(&format!("Pieces ({}):\n", self.pieces.len()));
        for entry in &self.pieces {
            let clamp = if entry.clamped { " [CLAMPED]" } else { "" };
            out.push_str(&format!(
                "  [{}] order={} {} {}x{} mm{}\n",
                entry.index, entry.order, entry.connection, entry.length_mm, entry.width_mm, clamp,
            ));
            if let Some([x, y, z]) = entry.center {
                out.push_str(&format!(
                    "      center=({:.3}, {:.3}, {:.3}) trim={:.3} m\n",
                    x, y, z, entry.start_offset
                ));
            }
            if !entry.addons.is_empty() {
                out.push_str(&format!("      addons: {}\n", entry.addons.join(", ")));
            }
        }

        if let Some((min, max)) = self.extent {
            out.push_str(&format!(
                "\nExtent: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})\n",
                min[0], min[1], min[2], max[0], max[1], max[2],
            ));
        }

        out.push_str(&format!("\nCalculation: {}\n", self.calculation));

        if !self.oracle_results.is_empty() {
            let passed = self.oracle_results.iter().filter(|v| v.passed).count();
            out.push_str(&format!(
                "\nOracles ({}/{} passed):\n",
                passed,
                self.oracle_results.len()
            ));
            for verdict in &self.oracle_results {
                let status = if verdict.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!(
                    "  [{}] {}: {}\n",
                    status, verdict.oracle_name, verdict.detail
                ));
            }
        }

        if !self.errors.is_empty() {
            out.push_str(&format!("\nErrors ({}):\n", self.errors.len()));
            for (message, outcome) in &self.errors {
                out.push_str(&format!("  {}: {}\n", message, outcome));
            }
        }

        out
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
