use encimera_types::{sequence_indices, Piece};
use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::sequence::sequence_issues;
use crate::types::{BoxSize, Layout, Placement};

const MM_PER_M: f64 = 1000.0;

/// Lay pieces out along the wall in `layout.order`.
///
/// A running wall cursor starts at the origin and advances by each piece's
/// full nominal length. A corner piece meeting the previous piece with a
/// butt joint is drawn shortened by the previous piece's width and pushed
/// forward by the same amount, so it does not occupy the corner square. The
/// cursor still advances by the untrimmed length.
pub fn compute_layout(pieces: &[Piece], config: &LayoutConfig) -> Layout {
    for issue in sequence_issues(pieces) {
        warn!(%issue, "Irregular piece sequence");
    }

    let up: Vector3<f64> = Vector3::y();
    let mut cursor: Vector3<f64> = Vector3::zeros();
    let mut previous_width = 0.0;
    let mut placements = Vec::with_capacity(pieces.len());

    for (position, index) in sequence_indices(pieces).into_iter().enumerate() {
        let piece = &pieces[index];
        let layout = piece.layout_or_default();

        let full_length = piece.measurements.length_mm / MM_PER_M;
        let width = piece.measurements.width_mm / MM_PER_M;

        let angle = layout.rotation.radians();
        let direction = Vector3::new(angle.cos(), 0.0, angle.sin());
        let inward = direction.cross(&up).normalize();

        let start_offset = if position > 0 && layout.is_butt_corner() {
            previous_width
        } else {
            0.0
        };

        let trimmed = full_length - start_offset;
        let clamped = trimmed < config.min_visual_length_m;
        if clamped {
            warn!(
                piece = index,
                full_length,
                start_offset,
                "Corner trim consumes the whole piece; clamping"
            );
        }
        let visual_length = trimmed.max(config.min_visual_length_m);

        let visual_start = cursor + direction * start_offset;
        let center = visual_start
            + direction * (visual_length / 2.0)
            + inward * (width / 2.0)
            + up * (config.thickness_m / 2.0);

        let run_start = cursor;
        cursor += direction * full_length;

        placements.push(Placement {
            piece_id: piece.id,
            piece_index: index,
            size: BoxSize {
                length: visual_length,
                thickness: config.thickness_m,
                depth: width,
            },
            center,
            rotation_around_vertical: -angle,
            direction,
            start_offset,
            run_start,
            run_end: cursor,
            clamped,
        });

        previous_width = width;
    }

    let camera_target = if placements.is_empty() {
        Vector3::zeros()
    } else {
        placements
            .iter()
            .fold(Vector3::<f64>::zeros(), |acc, p| acc + p.center)
            / placements.len() as f64
    };

    debug!(pieces = placements.len(), "Computed layout");
    Layout {
        placements,
        camera_target,
    }
}
