use encimera_types::PieceId;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Box dimensions in meters: along the run, vertical, and into the wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSize {
    pub length: f64,
    pub thickness: f64,
    pub depth: f64,
}

/// Where and how one piece is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub piece_id: PieceId,
    /// Index of the piece in the project's piece array.
    pub piece_index: usize,
    pub size: BoxSize,
    pub center: Vector3<f64>,
    /// Rotation of the box around `+Y`, in radians.
    pub rotation_around_vertical: f64,
    /// Unit vector along the run.
    pub direction: Vector3<f64>,
    /// Length trimmed from the start of the run at a butt corner.
    pub start_offset: f64,
    /// Wall cursor before this piece.
    pub run_start: Vector3<f64>,
    /// Wall cursor after this piece: `run_start` plus the full nominal length.
    pub run_end: Vector3<f64>,
    /// The trimmed length fell below the minimum and was clamped.
    pub clamped: bool,
}

impl Placement {
    /// The four footprint corners on the floor plane, then the same four at
    /// slab height.
    pub fn corners(&self) -> [Vector3<f64>; 8] {
        let up = Vector3::y();
        let inward = self.direction.cross(&up);
        let half_len = self.direction * (self.size.length / 2.0);
        let half_depth = inward * (self.size.depth / 2.0);
        let half_up = up * (self.size.thickness / 2.0);

        let signs = [-1.0, 1.0];
        let mut out = [Vector3::zeros(); 8];
        for (i, corner) in out.iter_mut().enumerate() {
            *corner = self.center
                + half_up * signs[i >> 2]
                + half_len * signs[(i >> 1) & 1]
                + half_depth * signs[i & 1];
        }
        out
    }
}

/// Output of the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// One placement per piece, in wall-sequence order.
    pub placements: Vec<Placement>,
    /// Mean of all placement centers; zero for an empty project.
    pub camera_target: Vector3<f64>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Axis-aligned bounds `(min, max)` of every placed box.
    pub fn extent(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        let mut corners = self.placements.iter().flat_map(|p| p.corners());
        let first = corners.next()?;
        Some(corners.fold((first, first), |(min, max), c| (min.inf(&c), max.sup(&c))))
    }

    pub fn placement_for(&self, piece_id: PieceId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.piece_id == piece_id)
    }
}
