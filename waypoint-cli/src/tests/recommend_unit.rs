//! Focused unit tests covering recommend CLI configuration and execution.

use super::helpers::{Workspace, on_site_request, write_utf8};
use super::*;
use crate::recommend::{
    RecommendConfig, config_from_layers_for_test, load_request, run_recommend_with,
};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use waypoint_core::{Mode, RequestValidationError};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn args_for(request_path: Utf8PathBuf) -> RecommendArgs {
    RecommendArgs {
        request_path: Some(request_path),
        ..RecommendArgs::default()
    }
}

fn run_to_json(args: RecommendArgs) -> Value {
    let mut stdout = Vec::new();
    run_recommend_with(args, &mut stdout).expect("recommend should succeed");
    serde_json::from_slice(&stdout).expect("stdout should be JSON")
}

fn ids(value: &Value) -> Vec<u64> {
    value["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item["id"].as_u64())
        .collect()
}

#[rstest]
fn converting_without_request_errors() {
    let err = RecommendConfig::try_from(RecommendArgs::default())
        .expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_RECOMMEND_REQUEST);
            assert_eq!(env, ENV_RECOMMEND_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case("live", Mode::Live)]
#[case("no-location", Mode::NoLocation)]
#[case("Preview", Mode::Preview)]
fn converting_parses_mode_labels(#[case] label: &str, #[case] expected: Mode) {
    let args = RecommendArgs {
        mode: Some(label.to_owned()),
        ..args_for(Utf8PathBuf::from("request.json"))
    };
    let config = RecommendConfig::try_from(args).expect("config should build");
    assert_eq!(config.mode, Some(expected));
}

#[rstest]
fn converting_rejects_unknown_mode() {
    let args = RecommendArgs {
        mode: Some("offline".to_owned()),
        ..args_for(Utf8PathBuf::from("request.json"))
    };
    let err = RecommendConfig::try_from(args).expect_err("unknown mode should error");
    match err {
        CliError::InvalidMode { value } => assert_eq!(value, "offline"),
        other => panic!("expected InvalidMode, found {other:?}"),
    }
}

#[rstest]
fn converting_rejects_malformed_timestamp() {
    let args = RecommendArgs {
        now: Some("tomorrow".to_owned()),
        ..args_for(Utf8PathBuf::from("request.json"))
    };
    let err = RecommendConfig::try_from(args).expect_err("bad timestamp should error");
    assert!(matches!(err, CliError::InvalidTimestamp { .. }), "{err:?}");
}

#[rstest]
fn validate_sources_reports_missing_preferences(workspace: Workspace) {
    let request = workspace.write_json("request.json", &on_site_request());
    let args = RecommendArgs {
        preferences: Some(workspace.path("missing-table.json")),
        ..args_for(request)
    };
    let config = RecommendConfig::try_from(args).expect("config should build");
    match config.validate_sources().expect_err("missing table") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_PREFERENCES),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file(workspace: Workspace) {
    let request_path = workspace.path("request.json");
    std::fs::create_dir(request_path.as_std_path()).expect("request directory");
    let config = RecommendConfig::try_from(args_for(request_path.clone())).expect("config");
    match config.validate_sources().expect_err("directory is not a file") {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_RECOMMEND_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_request_decodes_json(workspace: Workspace) {
    let path = workspace.write_json("request.json", &on_site_request());
    let request = load_request(&path).expect("request should decode");
    assert_eq!(request.context.venue_name, "Changi T3");
    assert_eq!(request.candidates.len(), 3);
    assert!(request.options.user_location.is_some());
    assert_eq!(request.options.max_results, 10);
}

#[rstest]
fn load_request_reports_parse_errors(workspace: Workspace) {
    let path = workspace.path("request.json");
    write_utf8(&path, b"{ not json");
    match load_request(&path).expect_err("invalid JSON") {
        CliError::ParseRequest { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[rstest]
fn recommend_prints_live_ranking(workspace: Workspace) {
    let path = workspace.write_json("request.json", &on_site_request());
    let output = run_to_json(args_for(path));
    assert_eq!(output["kind"], "ranked");
    assert_eq!(output["mode"], "live");
    assert_eq!(ids(&output), vec![1, 3, 2]);
    assert!(output["items"][0]["breakdown"].is_object());
}

#[rstest]
#[case(json!({ "open": 8 }))]
#[case(json!({ "open": -1, "close": 6 }))]
#[case(json!({ "open": 8.5, "close": 20 }))]
fn malformed_hours_rank_as_always_open(workspace: Workspace, #[case] hours: Value) {
    let baseline_path = workspace.write_json("baseline.json", &on_site_request());
    let baseline = run_to_json(args_for(baseline_path));

    let mut request = on_site_request();
    request["candidates"][0]["operating_hours"] = hours;
    let path = workspace.write_json("request.json", &request);
    let output = run_to_json(args_for(path));

    assert_eq!(ids(&output), vec![1, 3, 2]);
    assert_eq!(output["items"][0]["score"], baseline["items"][0]["score"]);
    assert!(output["items"][0]["operating_hours"].is_null());
}

#[rstest]
fn flags_override_request_options(workspace: Workspace) {
    let path = workspace.write_json("request.json", &on_site_request());
    let args = RecommendArgs {
        mode: Some("no-location".to_owned()),
        max_results: Some(2),
        ..args_for(path)
    };
    let output = run_to_json(args);
    assert_eq!(output["mode"], "no-location");
    assert_eq!(ids(&output), vec![2, 3]);
    assert_eq!(output["items"][0]["confidence"], 70.0);
}

#[rstest]
fn recommend_rejects_out_of_range_ratings(workspace: Workspace) {
    let mut request = on_site_request();
    request["candidates"][0]["rating"] = json!(7.5);
    let path = workspace.write_json("request.json", &request);

    let mut stdout = Vec::new();
    let err = run_recommend_with(args_for(path), &mut stdout).expect_err("invalid rating");
    match err {
        CliError::InvalidRequest { source, .. } => {
            assert!(matches!(
                source,
                RequestValidationError::InvalidRating { id: 1, .. }
            ));
        }
        other => panic!("expected InvalidRequest, found {other:?}"),
    }
    assert!(stdout.is_empty());
}

#[rstest]
fn recommend_rejects_negative_diversity_flag(workspace: Workspace) {
    let path = workspace.write_json("request.json", &on_site_request());
    let args = RecommendArgs {
        diversity_weight: Some(-1.0),
        ..args_for(path)
    };
    let err = run_recommend_with(args, &mut Vec::new()).expect_err("negative weight");
    assert!(
        matches!(
            err,
            CliError::InvalidRequest {
                source: RequestValidationError::InvalidDiversityWeight(_),
                ..
            }
        ),
        "{err:?}"
    );
}

#[rstest]
fn recommend_writes_to_output_file(workspace: Workspace) {
    let path = workspace.write_json("request.json", &on_site_request());
    let output_path = workspace.path("out/nested/results.json");
    let args = RecommendArgs {
        output: Some(output_path.clone()),
        ..args_for(path)
    };
    let mut stdout = Vec::new();
    run_recommend_with(args, &mut stdout).expect("recommend should succeed");
    assert!(stdout.is_empty());

    let written = std::fs::read(output_path.as_std_path()).expect("output written");
    let value: Value = serde_json::from_slice(&written).expect("output JSON");
    assert_eq!(ids(&value), vec![1, 3, 2]);
}

#[rstest]
fn recommend_reports_invalid_preference_tables(workspace: Workspace) {
    let path = workspace.write_json("request.json", &on_site_request());
    let table = workspace.write_json("table.json", &json!({ "vibes": {} }));
    let args = RecommendArgs {
        preferences: Some(table.clone()),
        ..args_for(path)
    };
    match run_recommend_with(args, &mut Vec::new()).expect_err("empty table") {
        CliError::InvalidPreferences { path, .. } => assert_eq!(path, table),
        other => panic!("expected InvalidPreferences, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": "from-file.json",
            "max_results": 4,
            "diversity_weight": 0.5,
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": "from-env.json",
        "mode": "preview",
    }));
    composer.push_cli(json!({ "max_results": 2 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.max_results, Some(2));
    assert_eq!(config.diversity_weight, Some(0.5));
    assert_eq!(config.mode, Some(Mode::Preview));
}
