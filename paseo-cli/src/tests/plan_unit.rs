//! Focused unit tests covering plan CLI configuration and request parsing.

use super::helpers::{PlanFiles, StubProviderBuilder, write_utf8};
use super::*;
use crate::plan::PlanArgs;
use paseo_core::{Category, DirectionsError, OrderingAuthority, RouteError, RouteResult};
use paseo_data::directions::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use rstest::rstest;
use std::time::Duration;

#[derive(Debug, Copy, Clone)]
enum MissingInput {
    Request,
    Places,
}

#[rstest]
#[case(MissingInput::Request, ARG_PLAN_REQUEST, ENV_PLAN_REQUEST)]
#[case(MissingInput::Places, ARG_PLAN_PLACES, ENV_PLAN_PLACES)]
fn converting_plan_without_inputs_errors(
    #[case] missing: MissingInput,
    #[case] expected_field: &str,
    #[case] expected_env: &str,
) {
    let files = PlanFiles::new();
    let mut args = files.args();
    match missing {
        MissingInput::Request => args.request_path = None,
        MissingInput::Places => args.places = None,
    }

    let err = PlanConfig::try_from(args).expect_err("missing input should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_defaults() {
    let files = PlanFiles::new();
    let args = PlanArgs {
        api_key: Some(String::new()),
        ..files.args()
    };

    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.request_path, files.request);
    assert_eq!(config.places, files.places);
    assert_eq!(config.directions_base_url, DEFAULT_ENDPOINT);
    assert_eq!(config.api_key, None);
    assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert_eq!(config.ordering, OrderingAuthority::Core);
}

#[rstest]
fn zero_timeout_is_rejected() {
    let files = PlanFiles::new();
    let args = PlanArgs {
        timeout_secs: Some(0),
        ..files.args()
    };

    let err = PlanConfig::try_from(args).expect_err("zero timeout should error");
    assert!(matches!(
        err,
        CliError::ZeroTimeout { field } if field == ARG_PLAN_TIMEOUT_SECS
    ));
}

#[rstest]
#[case(MissingInput::Request, ARG_PLAN_REQUEST)]
#[case(MissingInput::Places, ARG_PLAN_PLACES)]
fn validate_sources_reports_missing_files(#[case] missing: MissingInput, #[case] expected: &str) {
    let files = PlanFiles::new();
    files.write_defaults(&[]);
    let absent = match missing {
        MissingInput::Request => &files.request,
        MissingInput::Places => &files.places,
    };
    std::fs::remove_file(absent.as_std_path()).expect("remove fixture");

    let config = PlanConfig::try_from(files.args()).expect("config should build");
    let err = config.validate_sources().expect_err("missing file should error");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, expected);
            assert_eq!(&path, absent);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let files = PlanFiles::new();
    files.write_defaults(&[]);
    let args = PlanArgs {
        places: Some(files.root.clone()),
        ..files.args()
    };

    let config = PlanConfig::try_from(args).expect("config should build");
    let err = config.validate_sources().expect_err("directory should error");
    assert!(matches!(
        err,
        CliError::SourcePathNotFile { field, .. } if field == ARG_PLAN_PLACES
    ));
}

#[rstest]
fn load_plan_request_accepts_spanish_coordinate_keys() {
    let files = PlanFiles::new();
    files.write_defaults(&["Museo", "templo"]);

    let request = load_plan_request(&files.request).expect("request should parse");
    assert_eq!(request.origin.name, "Jardín Zenea");
    assert_eq!(request.destination.name, "Alameda Hidalgo");
    assert_eq!(
        request.categories,
        vec![Category::new("Museo"), Category::new("Templo")]
    );
}

#[rstest]
fn load_plan_request_defaults_categories_to_empty() {
    let files = PlanFiles::new();
    write_utf8(
        &files.request,
        br#"{"origin": {"name": "a", "lat": 20.59, "lng": -100.39},
             "destination": {"name": "b", "lat": 20.60, "lng": -100.40}}"#,
    );

    let request = load_plan_request(&files.request).expect("request should parse");
    assert!(request.categories.is_empty());
}

#[rstest]
fn load_plan_request_reports_missing_file() {
    let files = PlanFiles::new();
    let err = load_plan_request(&files.request).expect_err("missing request should error");
    match err {
        CliError::OpenPlanRequest { path, .. } => assert_eq!(path, files.request),
        other => panic!("expected OpenPlanRequest, found {other:?}"),
    }
}

#[rstest]
fn run_plan_hands_resolved_config_to_builder() {
    let files = PlanFiles::new();
    files.write_defaults(&["Museo"]);
    let args = PlanArgs {
        directions_base_url: Some("http://127.0.0.1:9/directions".to_owned()),
        api_key: Some("secret".to_owned()),
        timeout_secs: Some(3),
        ..files.args()
    };
    let builder = StubProviderBuilder::default();
    let mut stdout = Vec::new();

    run_plan_with(args, &builder, &mut stdout).expect("plan should succeed");

    let seen = builder.seen.take().expect("builder invoked");
    assert_eq!(seen.directions_base_url, "http://127.0.0.1:9/directions");
    assert_eq!(seen.api_key.as_deref(), Some("secret"));
    assert_eq!(seen.timeout, Duration::from_secs(3));
    let route: RouteResult = serde_json::from_slice(&stdout).expect("route JSON");
    assert_eq!(route.waypoints.len(), 1);
    assert_eq!(route.waypoints[0].id.as_str(), "m1");
}

#[rstest]
fn run_plan_surfaces_directions_failures() {
    let files = PlanFiles::new();
    files.write_defaults(&["Museo"]);
    let builder = StubProviderBuilder::failing(DirectionsError::Timeout { timeout_secs: 3 });
    let mut stdout = Vec::new();

    let err = run_plan_with(files.args(), &builder, &mut stdout).expect_err("plan should fail");
    match err {
        CliError::Plan {
            source: RouteError::Directions(DirectionsError::Timeout { timeout_secs }),
        } => assert_eq!(timeout_secs, 3),
        other => panic!("expected directions timeout, found {other:?}"),
    }
    assert!(stdout.is_empty());
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

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
    use serde_json::json;

    let files = PlanFiles::new();
    let env_request = files.root.join("from-env-request.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "places": files.root.join("from-file.json").as_str(),
            "timeout_secs": 30,
            "ordering": "provider",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": env_request.as_str(),
        "timeout_secs": 20,
    }));
    composer.push_cli(json!({
        "places": files.places.as_str(),
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, env_request);
    assert_eq!(config.places, files.places);
    assert_eq!(config.timeout, Duration::from_secs(20));
    assert_eq!(config.ordering, OrderingAuthority::Provider);
}
