use encimera_types::*;
use pricing_snapshot::*;
use project_engine::*;
use uuid::Uuid;

// ── Helper Functions ─────────────────────────────────────────────────────

fn project_with_l() -> Project {
    let mut project = Project::default();
    project
        .dispatch(ProjectCommand::StageMaterial {
            selection: MaterialSelection::new("cuarzo-blanco").with_attribute("grosor", "20"),
        })
        .unwrap();
    project
        .dispatch(ProjectCommand::CreatePiecesForShape {
            shape_id: "l-derecha".to_string(),
            count: 2,
        })
        .unwrap();
    project
        .dispatch(ProjectCommand::AddAddonToPiece {
            index: 1,
            addon: AppliedAddon::new("UNION-RECTA"),
        })
        .unwrap();
    project
}

fn response(token: u64, body: &str) -> String {
    format!(
        r#"{{"format":"encimera-pricing","version":1,"token":{},{}}}"#,
        token, body
    )
}

// ── Request Tests ─────────────────────────────────────────────────────────

#[test]
fn request_captures_pieces_and_material() {
    let mut project = project_with_l();
    let token = project.begin_calculation();
    let request = build_request(&project.state, token, SnapshotMetadata::now(Uuid::new_v4())).unwrap();

    assert_eq!(request.format, FORMAT_ID);
    assert_eq!(request.version, FORMAT_VERSION);
    assert_eq!(request.token, token);
    assert_eq!(request.material.material_id, "cuarzo-blanco");
    assert_eq!(request.pieces, project.state.pieces);
    assert_eq!(request.shape_id, None);
}

#[test]
fn request_json_has_expected_shape() {
    let project = project_with_l();
    let request = build_request(
        &project.state,
        RequestToken(4),
        SnapshotMetadata::now(Uuid::nil()),
    )
    .unwrap();
    let json = to_json(&request).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["format"], "encimera-pricing");
    assert_eq!(value["token"], 4);
    assert_eq!(value["pieces"].as_array().unwrap().len(), 2);
    assert_eq!(value["pieces"][1]["applied_addons"][0]["code"], "UNION-RECTA");
    assert_eq!(value["pieces"][1]["layout"]["connection_type"], "CORNER_RIGHT");
    assert_eq!(value["pieces"][1]["layout"]["rotation"], 90);
}

#[test]
fn request_round_trips_through_json() {
    let project = project_with_l();
    let request = build_request(
        &project.state,
        RequestToken(0),
        SnapshotMetadata::now(Uuid::new_v4()),
    )
    .unwrap();
    let json = to_json(&request).unwrap();
    let back: PricingRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, request);
}

#[test]
fn request_requires_material() {
    let state = ProjectState::new();
    let result = build_request(&state, RequestToken(0), SnapshotMetadata::now(Uuid::nil()));
    assert_eq!(result, Err(SnapshotError::NoMaterial));
}

#[test]
fn request_requires_pieces() {
    let mut project = Project::default();
    project
        .dispatch(ProjectCommand::StageMaterial {
            selection: MaterialSelection::new("cuarzo-blanco"),
        })
        .unwrap();
    let result = build_request(
        &project.state,
        RequestToken(0),
        SnapshotMetadata::now(Uuid::nil()),
    );
    assert_eq!(result, Err(SnapshotError::NoPieces));
}

// ── Response Tests ────────────────────────────────────────────────────────

#[test]
fn ok_response_becomes_success_command() {
    let json = response(
        2,
        r#""status":"ok","breakdown":{"total":1830.0,"currency":"EUR",
            "lines":[{"label":"Encimera","amount":1500.0},{"label":"Unión","amount":330.0}]}"#,
    );
    let outcome = parse_response(&json).unwrap();
    assert_eq!(outcome.token, RequestToken(2));
    let breakdown = outcome.result.clone().unwrap();
    assert_eq!(breakdown.lines.len(), 2);

    match outcome.into_command() {
        ProjectCommand::CalculationSuccess { token, result } => {
            assert_eq!(token, RequestToken(2));
            assert_eq!(result.total, 1830.0);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn error_response_becomes_error_command() {
    let json = response(5, r#""status":"error","message":"material agotado""#);
    let command = parse_response(&json).unwrap().into_command();
    assert_eq!(
        command,
        ProjectCommand::CalculationError {
            token: RequestToken(5),
            message: "material agotado".to_string(),
        }
    );
}

#[test]
fn ok_response_without_breakdown_is_rejected() {
    let json = response(1, r#""status":"ok""#);
    assert!(matches!(parse_response(&json), Err(SnapshotError::Parse(_))));
}

#[test]
fn response_with_wrong_format_is_rejected() {
    let json = r#"{"format":"kitchen-cad","version":1,"token":0,"status":"error"}"#;
    assert_eq!(
        parse_response(json),
        Err(SnapshotError::UnknownFormat("kitchen-cad".to_string()))
    );
}

#[test]
fn response_from_newer_version_is_rejected() {
    let json = r#"{"format":"encimera-pricing","version":9,"token":0,"status":"error"}"#;
    assert!(matches!(
        parse_response(json),
        Err(SnapshotError::FutureVersion {
            response_version: 9,
            ..
        })
    ));
}

#[test]
fn garbage_response_is_a_parse_error() {
    assert!(matches!(
        parse_response("not json"),
        Err(SnapshotError::Parse(_))
    ));
}

#[test]
fn outcome_feeds_the_reducer() {
    let mut project = project_with_l();
    let token = project.begin_calculation();
    let json = response(token.0, r#""status":"ok","breakdown":{"total":99.0}"#);
    project
        .dispatch(parse_response(&json).unwrap().into_command())
        .unwrap();
    assert_eq!(project.state.calculation.result().unwrap().total, 99.0);
}
