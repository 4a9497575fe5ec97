use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use encimera_types::*;
use layout_engine::*;
use nalgebra::Vector3;

// ── Helper Functions ─────────────────────────────────────────────────────

const T: f64 = 0.03;

fn piece(length_mm: f64, width_mm: f64, layout: Option<PieceLayout>) -> Piece {
    Piece::new(
        &MaterialSelection::new("granito-negro"),
        Measurements::new(length_mm, width_mm),
        layout,
    )
}

fn placed(order: u32, rotation: Rotation, connection: ConnectionType) -> Option<PieceLayout> {
    Some(PieceLayout::new(order, rotation, connection))
}

fn corner(order: u32, rotation: Rotation, joint: JointType) -> Option<PieceLayout> {
    Some(PieceLayout::new(order, rotation, ConnectionType::CornerRight).with_joint(joint))
}

fn config() -> LayoutConfig {
    LayoutConfig {
        thickness_m: T,
        ..LayoutConfig::default()
    }
}

// ── Single Piece ──────────────────────────────────────────────────────────

#[test]
fn linear_single_piece_is_centered_on_its_run() {
    let pieces = vec![piece(2000.0, 600.0, placed(0, Rotation::Deg0, ConnectionType::None))];
    let layout = compute_layout(&pieces, &config());

    assert_eq!(layout.placements.len(), 1);
    let p = &layout.placements[0];
    assert_relative_eq!(p.center, Vector3::new(1.0, T / 2.0, 0.3), epsilon = 1e-12);
    assert_relative_eq!(p.run_end, Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(p.size.length, 2.0);
    assert_relative_eq!(p.size.depth, 0.6);
    assert_relative_eq!(p.size.thickness, T);
    assert_eq!(p.start_offset, 0.0);
    assert!(!p.clamped);
}

#[test]
fn single_corner_piece_is_never_trimmed() {
    let pieces = vec![piece(1000.0, 600.0, corner(0, Rotation::Deg0, JointType::Butt))];
    let layout = compute_layout(&pieces, &config());
    assert_eq!(layout.placements[0].start_offset, 0.0);
    assert_relative_eq!(layout.placements[0].size.length, 1.0);
}

#[test]
fn missing_layout_uses_defaults() {
    let pieces = vec![piece(1500.0, 650.0, None)];
    let layout = compute_layout(&pieces, &config());
    let p = &layout.placements[0];
    assert_relative_eq!(p.center, Vector3::new(0.75, T / 2.0, 0.325), epsilon = 1e-12);
    assert_relative_eq!(p.rotation_around_vertical, 0.0);
}

#[test]
fn rotation_is_negated_around_vertical() {
    let pieces = vec![piece(1000.0, 600.0, placed(0, Rotation::Deg90, ConnectionType::None))];
    let layout = compute_layout(&pieces, &config());
    let p = &layout.placements[0];
    assert_relative_eq!(p.rotation_around_vertical, -FRAC_PI_2);
    assert_relative_eq!(p.direction, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    assert_relative_eq!(p.run_end, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
}

// ── Corner Joints ─────────────────────────────────────────────────────────

fn corner_pair(joint: JointType) -> Vec<Piece> {
    vec![
        piece(2000.0, 600.0, placed(0, Rotation::Deg90, ConnectionType::None)),
        piece(1200.0, 600.0, corner(1, Rotation::Deg0, joint)),
    ]
}

#[test]
fn butt_corner_is_trimmed_by_previous_width() {
    let layout = compute_layout(&corner_pair(JointType::Butt), &config());
    let first = &layout.placements[0];
    let second = &layout.placements[1];

    assert_relative_eq!(second.start_offset, 0.6);
    assert_relative_eq!(second.size.length, 0.6, epsilon = 1e-12);
    assert_relative_eq!(second.run_start, first.run_end, epsilon = 1e-12);
    assert_relative_eq!(
        second.run_end,
        first.run_end + Vector3::new(1.2, 0.0, 0.0),
        epsilon = 1e-12
    );
    assert_relative_eq!(second.center, Vector3::new(0.9, T / 2.0, 2.3), epsilon = 1e-12);
}

#[test]
fn overlap_corner_keeps_full_length() {
    let layout = compute_layout(&corner_pair(JointType::Overlap), &config());
    let second = &layout.placements[1];
    assert_eq!(second.start_offset, 0.0);
    assert_relative_eq!(second.size.length, 1.2, epsilon = 1e-12);
    assert_relative_eq!(second.center, Vector3::new(0.6, T / 2.0, 2.3), epsilon = 1e-12);
}

#[test]
fn unspecified_joint_on_corner_is_not_trimmed() {
    let pieces = vec![
        piece(2000.0, 600.0, placed(0, Rotation::Deg0, ConnectionType::None)),
        piece(1500.0, 600.0, placed(1, Rotation::Deg90, ConnectionType::CornerLeft)),
    ];
    let layout = compute_layout(&pieces, &config());
    let second = &layout.placements[1];
    assert_eq!(second.start_offset, 0.0);
    assert_relative_eq!(second.size.length, 1.5, epsilon = 1e-12);
    assert!(!second.clamped);
}

#[test]
fn piece_without_layout_defaults_to_butt() {
    let layout = piece(1000.0, 600.0, None).layout_or_default();
    assert_eq!(layout.joint_type, Some(JointType::Butt));
}

#[test]
fn linear_connection_is_never_trimmed() {
    let pieces = vec![
        piece(2000.0, 600.0, placed(0, Rotation::Deg0, ConnectionType::None)),
        piece(
            1000.0,
            600.0,
            Some(
                PieceLayout::new(1, Rotation::Deg0, ConnectionType::Linear)
                    .with_joint(JointType::Butt),
            ),
        ),
    ];
    let layout = compute_layout(&pieces, &config());
    let second = &layout.placements[1];
    assert_eq!(second.start_offset, 0.0);
    assert_relative_eq!(second.center, Vector3::new(2.5, T / 2.0, 0.3), epsilon = 1e-12);
    assert_relative_eq!(second.run_end, Vector3::new(3.0, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn trim_uses_previous_width_not_own_width() {
    let pieces = vec![
        piece(2000.0, 900.0, placed(0, Rotation::Deg0, ConnectionType::None)),
        piece(1500.0, 600.0, corner(1, Rotation::Deg90, JointType::Butt)),
    ];
    let layout = compute_layout(&pieces, &config());
    assert_relative_eq!(layout.placements[1].start_offset, 0.9);
    assert_relative_eq!(layout.placements[1].size.length, 0.6, epsilon = 1e-12);
}

#[test]
fn degenerate_trim_is_clamped_to_minimum() {
    let pieces = vec![
        piece(2000.0, 600.0, placed(0, Rotation::Deg0, ConnectionType::None)),
        piece(500.0, 600.0, corner(1, Rotation::Deg90, JointType::Butt)),
    ];
    let cfg = config();
    let layout = compute_layout(&pieces, &cfg);
    let second = &layout.placements[1];
    assert!(second.clamped);
    assert_relative_eq!(second.size.length, cfg.min_visual_length_m);
    // The cursor still advances by the nominal length.
    assert_relative_eq!(second.run_end, Vector3::new(2.0, 0.0, 0.5), epsilon = 1e-12);
}

#[test]
fn trim_leaving_under_a_millimeter_is_clamped() {
    let pieces = vec![
        piece(2000.0, 600.0, placed(0, Rotation::Deg0, ConnectionType::None)),
        piece(600.5, 600.0, corner(1, Rotation::Deg90, JointType::Butt)),
    ];
    let layout = compute_layout(&pieces, &config());
    assert!(layout.placements[1].clamped);
    assert_relative_eq!(config().min_visual_length_m, MIN_TRIMMED_LENGTH_MM / 1000.0);
}

// ── Sequencing ────────────────────────────────────────────────────────────

#[test]
fn placements_follow_layout_order_not_array_order() {
    let pieces = vec![
        piece(1200.0, 600.0, corner(1, Rotation::Deg0, JointType::Butt)),
        piece(2000.0, 600.0, placed(0, Rotation::Deg90, ConnectionType::None)),
    ];
    let layout = compute_layout(&pieces, &config());
    assert_eq!(layout.placements[0].piece_index, 1);
    assert_eq!(layout.placements[1].piece_index, 0);
    assert_eq!(layout.placements[0].piece_id, pieces[1].id);
    assert_relative_eq!(layout.placements[1].start_offset, 0.6);
    assert!(layout.placement_for(pieces[0].id).is_some());
}

#[test]
fn u_shape_runs_are_continuous() {
    let pieces = vec![
        piece(1800.0, 600.0, placed(0, Rotation::DegMinus90, ConnectionType::None)),
        piece(2400.0, 600.0, corner(1, Rotation::Deg0, JointType::Butt)),
        piece(1800.0, 600.0, corner(2, Rotation::Deg90, JointType::Butt)),
    ];
    let layout = compute_layout(&pieces, &config());
    for pair in layout.placements.windows(2) {
        assert_relative_eq!(pair[1].run_start, pair[0].run_end, epsilon = 1e-12);
    }
    assert_relative_eq!(
        layout.placements[2].run_end,
        Vector3::new(2.4, 0.0, 0.0),
        epsilon = 1e-12
    );
}

#[test]
fn sequence_issues_flag_duplicates_and_gaps() {
    let pieces = vec![
        piece(1000.0, 600.0, placed(0, Rotation::Deg0, ConnectionType::None)),
        piece(1000.0, 600.0, placed(0, Rotation::Deg90, ConnectionType::CornerRight)),
        piece(1000.0, 600.0, placed(3, Rotation::Deg0, ConnectionType::CornerLeft)),
    ];
    let issues = sequence_issues(&pieces);
    assert!(issues.contains(&SequenceIssue::DuplicateOrder {
        order: 0,
        pieces: vec![0, 1],
    }));
    assert!(issues.contains(&SequenceIssue::MissingOrder { order: 1 }));
    assert!(issues.contains(&SequenceIssue::MissingOrder { order: 2 }));
}

#[test]
fn sequence_issues_flag_leading_corner() {
    let pieces = vec![
        piece(1000.0, 600.0, placed(1, Rotation::Deg0, ConnectionType::None)),
        piece(1000.0, 600.0, placed(0, Rotation::Deg90, ConnectionType::CornerRight)),
    ];
    assert_eq!(
        sequence_issues(&pieces),
        vec![SequenceIssue::LeadingConnection { piece: 1 }]
    );
}

#[test]
fn well_formed_sequence_has_no_issues() {
    let pieces = corner_pair(JointType::Butt);
    assert!(sequence_issues(&pieces).is_empty());
    let unplaced = vec![piece(1000.0, 600.0, None), piece(800.0, 600.0, None)];
    assert!(sequence_issues(&unplaced).is_empty());
}

// ── Camera and Extent ─────────────────────────────────────────────────────

#[test]
fn empty_project_targets_origin() {
    let layout = compute_layout(&[], &config());
    assert!(layout.is_empty());
    assert_eq!(layout.camera_target, Vector3::zeros());
    assert!(layout.extent().is_none());
}

#[test]
fn camera_target_is_mean_of_centers() {
    let layout = compute_layout(&corner_pair(JointType::Butt), &config());
    let expected = (layout.placements[0].center + layout.placements[1].center) / 2.0;
    assert_relative_eq!(layout.camera_target, expected, epsilon = 1e-12);
}

#[test]
fn extent_covers_the_slab() {
    let pieces = vec![piece(2000.0, 600.0, placed(0, Rotation::Deg0, ConnectionType::None))];
    let layout = compute_layout(&pieces, &config());
    let (min, max) = layout.extent().unwrap();
    assert_relative_eq!(min, Vector3::new(0.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(max, Vector3::new(2.0, T, 0.6), epsilon = 1e-12);
}

#[test]
fn layout_config_fills_missing_fields() {
    let cfg: LayoutConfig = serde_json::from_str(r#"{"thickness_m": 0.02}"#).unwrap();
    assert_eq!(cfg.thickness_m, 0.02);
    assert_eq!(
        cfg.min_visual_length_m,
        LayoutConfig::default().min_visual_length_m
    );
}
