//! Focused unit tests covering plan CLI configuration and request loading.

use super::helpers::{city_request, request_workspace, write_utf8};
use super::*;
use crate::plan::{
    DEFAULT_ENVIRONMENT, DefaultPlanSolverBuilder, PlanConfig, PlanEnvelope, PlanSolverBuilder,
    SolverKind, config_from_layers_for_test, load_delivery_requests, run_plan_with,
};
use camino::Utf8PathBuf;
use courier_core::{HaversineTravelTime, PlanStatus, Solver, Stop};
use courier_solver_astar::{AStarConfig, Deduplication, HeuristicKind};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

fn config_for(request_path: Utf8PathBuf) -> PlanConfig {
    PlanConfig {
        request_path,
        environment: DEFAULT_ENVIRONMENT.to_owned(),
        solver: SolverKind::AStar,
        search: AStarConfig::default(),
        travel_time: HaversineTravelTime::default(),
    }
}

#[rstest]
fn converting_plan_without_request_errors() {
    let args = PlanArgs {
        request_path: None,
        ..PlanArgs::default()
    };

    let err = PlanConfig::try_from(args).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(env, ENV_PLAN_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_applies_defaults() {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        ..PlanArgs::default()
    };

    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config, config_for(Utf8PathBuf::from("request.json")));
    assert_eq!(
        config.search.max_expansions,
        Some(AStarConfig::DEFAULT_MAX_EXPANSIONS)
    );
}

#[rstest]
fn plan_config_reads_search_options() {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        environment: Some("production".to_owned()),
        solver: Some("exhaustive".to_owned()),
        heuristic: Some("direct-sum".to_owned()),
        deduplication: Some("visited-set".to_owned()),
        max_expansions: Some(50),
        speed_kmh: Some(30.0),
    };

    let config = PlanConfig::try_from(args).expect("config should build");
    assert_eq!(config.environment, "production");
    assert_eq!(config.solver, SolverKind::Exhaustive);
    assert_eq!(config.search.heuristic, HeuristicKind::DirectSum);
    assert_eq!(config.search.deduplication, Deduplication::VisitedSet);
    assert_eq!(config.search.max_expansions, Some(50));
    assert_eq!(
        config.travel_time,
        HaversineTravelTime::new(30.0).expect("valid speed")
    );
}

#[rstest]
#[case::solver(ARG_PLAN_SOLVER)]
#[case::heuristic(ARG_PLAN_HEURISTIC)]
#[case::deduplication(ARG_PLAN_DEDUPLICATION)]
fn plan_config_rejects_unknown_option_values(#[case] field: &'static str) {
    let mut args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        ..PlanArgs::default()
    };
    let bogus = Some("bogus".to_owned());
    match field {
        ARG_PLAN_SOLVER => args.solver = bogus,
        ARG_PLAN_HEURISTIC => args.heuristic = bogus,
        _ => args.deduplication = bogus,
    }

    let err = PlanConfig::try_from(args).expect_err("unknown value should error");
    match err {
        CliError::InvalidOption {
            field: reported,
            source,
        } => {
            assert_eq!(reported, field);
            assert_eq!(source.value, "bogus");
        }
        other => panic!("expected InvalidOption, found {other:?}"),
    }
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
#[case(f64::NAN)]
fn plan_config_rejects_unusable_speeds(#[case] speed: f64) {
    let args = PlanArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        speed_kmh: Some(speed),
        ..PlanArgs::default()
    };

    let err = PlanConfig::try_from(args).expect_err("speed should be rejected");
    assert!(matches!(err, CliError::InvalidSpeed(_)), "found {err:?}");
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let (_tmp, request_path) = request_workspace();

    let err = config_for(request_path.clone())
        .validate_sources()
        .expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, request_path) = request_workspace();
    std::fs::create_dir(&request_path).expect("request directory");

    let err = config_for(request_path.clone())
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_delivery_requests_accepts_a_single_object() {
    let (_tmp, request_path) = request_workspace();
    let payload = serde_json::to_string_pretty(&city_request()).expect("serialize request");
    write_utf8(&request_path, payload.as_bytes());

    let decoded = load_delivery_requests(&request_path).expect("request should decode");
    assert_eq!(decoded, vec![city_request()]);
}

#[rstest]
fn load_delivery_requests_accepts_an_array() {
    let (_tmp, request_path) = request_workspace();
    let batch = vec![city_request(), city_request()];
    let payload = serde_json::to_string(&batch).expect("serialize requests");
    write_utf8(&request_path, payload.as_bytes());

    let decoded = load_delivery_requests(&request_path).expect("requests should decode");
    assert_eq!(decoded, batch);
}

#[rstest]
fn load_delivery_requests_accepts_short_field_names() {
    let (_tmp, request_path) = request_workspace();
    let payload = json!({
        "amanLat": 12.9716, "amanLon": 77.5946,
        "r1Lat": 12.9750, "r1Lon": 77.6050, "pt1": 0.5,
        "r2Lat": 12.9352, "r2Lon": 77.6245, "pt2": 0.25,
        "c1Lat": 12.9900, "c1Lon": 77.5700,
        "c2Lat": 12.9279, "c2Lon": 77.6271,
    });
    write_utf8(&request_path, payload.to_string().as_bytes());

    let decoded = load_delivery_requests(&request_path).expect("request should decode");
    assert_eq!(decoded, vec![city_request()]);
}

#[rstest]
fn load_delivery_requests_rejects_invalid_json() {
    let (_tmp, request_path) = request_workspace();
    write_utf8(&request_path, b"{ not valid json");

    let err = load_delivery_requests(&request_path).expect_err("invalid json should error");
    match err {
        CliError::ParseDeliveryRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn load_delivery_requests_io_error_returns_open_error() {
    let (_tmp, request_path) = request_workspace();

    let err = load_delivery_requests(&request_path).expect_err("missing request should error");
    match err {
        CliError::OpenDeliveryRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected OpenDeliveryRequest, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
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
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": "from-file.json",
            "environment": "staging",
            "heuristic": "zero",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": "from-env.json",
        "heuristic": "direct-sum",
    }));
    composer.push_cli(json!({ "heuristic": "nearest-unvisited" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.environment, "staging");
    assert_eq!(config.search.heuristic, HeuristicKind::NearestUnvisited);
}

#[rstest]
fn default_builder_produces_a_working_astar_solver() {
    let config = config_for(Utf8PathBuf::from("request.json"));
    let solver = DefaultPlanSolverBuilder
        .build(&config)
        .expect("astar is always available");
    let locations = city_request().validate().expect("valid request");
    let solution = solver.solve(&locations).expect("route");
    assert_eq!(solution.route.stops().first(), Some(&Stop::Hub));
}

#[cfg(feature = "solver-exhaustive")]
#[rstest]
fn default_builder_agrees_across_solvers() {
    let astar = config_for(Utf8PathBuf::from("request.json"));
    let exhaustive = PlanConfig {
        solver: SolverKind::Exhaustive,
        ..astar.clone()
    };
    let locations = city_request().validate().expect("valid request");

    let fast = DefaultPlanSolverBuilder
        .build(&astar)
        .expect("astar solver")
        .solve(&locations)
        .expect("astar route");
    let slow = DefaultPlanSolverBuilder
        .build(&exhaustive)
        .expect("exhaustive solver")
        .solve(&locations)
        .expect("exhaustive route");
    assert!((fast.total_hours - slow.total_hours).abs() < 1e-9);
}

#[cfg(not(feature = "solver-exhaustive"))]
#[rstest]
fn default_builder_reports_missing_exhaustive_feature() {
    let config = PlanConfig {
        solver: SolverKind::Exhaustive,
        ..config_for(Utf8PathBuf::from("request.json"))
    };
    match DefaultPlanSolverBuilder.build(&config) {
        Err(CliError::MissingFeature { feature, .. }) => assert_eq!(feature, "solver-exhaustive"),
        Err(other) => panic!("expected MissingFeature, found {other:?}"),
        Ok(_) => panic!("exhaustive solver needs its feature"),
    }
}

#[rstest]
fn run_plan_with_writes_one_envelope_per_request() {
    let (_tmp, request_path) = request_workspace();
    let mut invalid = city_request();
    invalid.restaurant2_prep_time = -1.0;
    let payload = serde_json::to_string(&vec![city_request(), invalid]).expect("serialize");
    write_utf8(&request_path, payload.as_bytes());

    let args = PlanArgs {
        request_path: Some(request_path),
        environment: Some("qa".to_owned()),
        ..PlanArgs::default()
    };
    let mut stdout = Vec::new();
    run_plan_with(args, &DefaultPlanSolverBuilder, &mut stdout).expect("plan should succeed");

    let output: Vec<PlanEnvelope> =
        serde_json::from_slice(&stdout).expect("output should be a JSON array");
    assert_eq!(output.len(), 2);
    assert!(output.iter().all(|envelope| envelope.environment == "qa"));
    let [first, second] = output.as_slice() else {
        panic!("expected two envelopes");
    };
    assert_eq!(first.response.status, PlanStatus::Ok);
    assert!(first.response.estimated_time_hours.is_some());
    assert_eq!(second.response.status, PlanStatus::InvalidInput);
    assert!(second.response.route.is_none());
}
