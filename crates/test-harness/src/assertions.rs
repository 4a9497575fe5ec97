//! Assertion helpers with diagnostic output.
//!
//! Each failure names the context and shows expected vs actual.

use layout_engine::Layout;

use crate::helpers::{points_close, HarnessError};
use crate::workflow::ScenarioBuilder;

/// Assert the number of pieces in the project.
pub fn assert_piece_count(
    builder: &ScenarioBuilder,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = builder.piece_count();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected {} pieces, got {}", ctx, expected, actual),
        })
    }
}

/// Assert the center of the placement at `position` (wall order) within `tol` meters.
pub fn assert_center(
    layout: &Layout,
    position: usize,
    expected: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let placement = layout
        .placements
        .get(position)
        .ok_or_else(|| HarnessError::AssertionFailed {
            detail: format!(
                "[{}] no placement at position {} ({} placements)",
                ctx,
                position,
                layout.placements.len()
            ),
        })?;
    let want = nalgebra::Vector3::new(expected[0], expected[1], expected[2]);
    if points_close(&placement.center, &want, tol) {
        Ok(())
    } else {
        let c = placement.center;
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] placement {} center: expected ({:.4}, {:.4}, {:.4}), got ({:.4}, {:.4}, {:.4}) (tol={})",
                ctx, position, expected[0], expected[1], expected[2], c.x, c.y, c.z, tol,
            ),
        })
    }
}

/// Assert the visual length of the placement at `position`, in meters.
pub fn assert_visual_length(
    layout: &Layout,
    position: usize,
    expected: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = layout
        .placements
        .get(position)
        .map(|p| p.size.length)
        .ok_or_else(|| HarnessError::AssertionFailed {
            detail: format!("[{}] no placement at position {}", ctx, position),
        })?;
    if (actual - expected).abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] placement {} length: expected {:.4}, got {:.4} (tol={})",
                ctx, position, expected, actual, tol,
            ),
        })
    }
}

/// Assert the last quote succeeded with `total`.
pub fn assert_priced(builder: &ScenarioBuilder, total: f64, ctx: &str) -> Result<(), HarnessError> {
    match builder.state().calculation.result() {
        Some(result) if (result.total - total).abs() < 1e-9 => Ok(()),
        Some(result) => Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected total {}, got {}", ctx, total, result.total),
        }),
        None => Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] no price; calculation is {:?}",
                ctx,
                builder.state().calculation
            ),
        }),
    }
}
