use encimera_types::{MaterialSelection, Piece};

use crate::catalog::ShapeVariation;

/// Why a set of pieces could not be created from a shape variation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreationError {
    #[error("shape {shape_id} declares {required} pieces but {provided} default measurements")]
    MeasurementArity {
        shape_id: String,
        required: usize,
        provided: usize,
    },

    #[error("shape {shape_id} declares {required} pieces but {provided} piece layouts")]
    LayoutArity {
        shape_id: String,
        required: usize,
        provided: usize,
    },

    #[error("shape {shape_id} requires {required} pieces, {requested} were requested")]
    CountMismatch {
        shape_id: String,
        requested: usize,
        required: usize,
    },

    #[error("shape {shape_id} requires no pieces")]
    NoPieces { shape_id: String },
}

/// Create the ordered pieces for a shape variation.
///
/// Either every piece is produced or none: arity mismatches between the
/// declared count and the measurement or layout arrays are errors.
pub fn create_pieces(
    variation: &ShapeVariation,
    material: &MaterialSelection,
) -> Result<Vec<Piece>, CreationError> {
    let required = variation.required_count;
    if required == 0 {
        return Err(CreationError::NoPieces {
            shape_id: variation.id.clone(),
        });
    }
    if variation.default_measurements.len() != required {
        return Err(CreationError::MeasurementArity {
            shape_id: variation.id.clone(),
            required,
            provided: variation.default_measurements.len(),
        });
    }
    if let Some(layouts) = &variation.piece_layouts {
        if layouts.len() != required {
            return Err(CreationError::LayoutArity {
                shape_id: variation.id.clone(),
                required,
                provided: layouts.len(),
            });
        }
    }

    let pieces = variation
        .default_measurements
        .iter()
        .enumerate()
        .map(|(i, measurements)| {
            let layout = variation.piece_layouts.as_ref().map(|layouts| layouts[i]);
            Piece::new(material, *measurements, layout)
        })
        .collect();
    Ok(pieces)
}
