use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// Rotation of a piece around the vertical axis.
///
/// Only right angles are meaningful for wall runs. Serialized as the integer
/// number of degrees (`0`, `90`, `-90`, `180`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    DegMinus90,
    Deg180,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::DegMinus90 => -90,
            Rotation::Deg180 => 180,
        }
    }

    pub fn radians(self) -> f64 {
        match self {
            Rotation::Deg0 => 0.0,
            Rotation::Deg90 => FRAC_PI_2,
            Rotation::DegMinus90 => -FRAC_PI_2,
            Rotation::Deg180 => PI,
        }
    }
}

/// Error for an integer rotation outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported rotation {0}° (expected 0, 90, -90 or 180)")]
pub struct UnsupportedRotation(pub i32);

impl TryFrom<i32> for Rotation {
    type Error = UnsupportedRotation;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            -90 => Ok(Rotation::DegMinus90),
            180 => Ok(Rotation::Deg180),
            other => Err(UnsupportedRotation(other)),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// How a piece connects to the previous one in the wall sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionType {
    #[default]
    None,
    Linear,
    CornerLeft,
    CornerRight,
}

impl ConnectionType {
    pub fn is_corner(self) -> bool {
        matches!(self, ConnectionType::CornerLeft | ConnectionType::CornerRight)
    }
}

/// How two pieces meet at a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JointType {
    /// This piece runs through the corner at full length.
    Overlap,
    /// This piece stops flush against the previous piece.
    #[default]
    Butt,
}

/// Placement metadata consumed by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceLayout {
    /// Position in the wall sequence (dense `0..N`).
    pub order: u32,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub connection_type: ConnectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_type: Option<JointType>,
}

impl PieceLayout {
    pub fn new(order: u32, rotation: Rotation, connection_type: ConnectionType) -> Self {
        Self {
            order,
            rotation,
            connection_type,
            joint_type: None,
        }
    }

    pub fn with_joint(mut self, joint_type: JointType) -> Self {
        self.joint_type = Some(joint_type);
        self
    }

    /// True when this piece is trimmed flush against the previous piece.
    ///
    /// Needs an explicit butt joint; a layout without a joint type is not trimmed.
    pub fn is_butt_corner(&self) -> bool {
        self.connection_type.is_corner() && self.joint_type == Some(JointType::Butt)
    }
}

/// Shortest length, in millimeters, a butt corner may leave after its trim.
pub const MIN_TRIMMED_LENGTH_MM: f64 = 1.0;

impl Default for PieceLayout {
    fn default() -> Self {
        Self {
            order: 0,
            rotation: Rotation::Deg0,
            connection_type: ConnectionType::None,
            joint_type: Some(JointType::Butt),
        }
    }
}

/// Indices of `pieces` in wall-sequence order.
///
/// Sorted by `layout.order`; pieces without layout use their array index.
/// The sort is stable, so duplicate orders keep array order.
pub fn sequence_indices(pieces: &[crate::piece::Piece]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..pieces.len()).collect();
    indices.sort_by_key(|&i| {
        pieces[i]
            .layout
            .map(|l| u64::from(l.order))
            .unwrap_or(i as u64)
    });
    indices
}
