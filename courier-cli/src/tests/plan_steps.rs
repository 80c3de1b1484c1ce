//! Behaviour-driven step definitions driving the plan CLI scenarios.

use super::helpers::{city_request, out_of_range_request, write_utf8};
use super::*;
use crate::plan::{
    DefaultPlanSolverBuilder, PlanConfig, PlanEnvelope, PlanSolverBuilder, run_plan_with,
};
use camino::Utf8PathBuf;
use courier_core::{LocationSet, PlanStatus, Solution, SolveError, Solver};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug)]
struct PlanWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl PlanWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("request.json");

        Self {
            _tmp: tmp,
            request_path,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["courier".to_string(), "plan".to_string()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_string());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn run_with(&self, builder: &dyn PlanSolverBuilder) {
        let invocation = self.build_command_line();
        let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
        let outcome = parsed.and_then(|cli| match cli.command {
            Command::Plan(args) => {
                let mut buffer = self.stdout.borrow_mut();
                run_plan_with(args, builder, &mut *buffer)
            }
        });
        self.result.replace(Some(outcome));
    }

    fn envelopes(&self) -> Vec<PlanEnvelope> {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        serde_json::from_slice(&self.stdout.borrow()).expect("output should be a JSON array")
    }

    fn error_matches(&self, predicate: impl FnOnce(&CliError) -> bool) {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        assert!(predicate(error), "unexpected error {error:?}");
    }
}

#[fixture]
fn world() -> PlanWorld {
    PlanWorld::new()
}

struct AbortingSolver;

impl Solver for AbortingSolver {
    fn solve(&self, _locations: &LocationSet) -> Result<Solution, SolveError> {
        Err(SolveError::BudgetExceeded {
            expanded: 0,
            elapsed: Duration::ZERO,
        })
    }
}

struct AbortingSolverBuilder;

impl PlanSolverBuilder for AbortingSolverBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
        Ok(Box::new(AbortingSolver))
    }
}

#[given("a valid delivery request exists on disk")]
fn valid_request_exists(#[from(world)] world: &PlanWorld) {
    let payload = serde_json::to_string_pretty(&city_request()).expect("serialize request");
    write_utf8(&world.request_path, payload.as_bytes());
}

#[given("a batch with one invalid delivery request exists on disk")]
fn batch_with_invalid_request_exists(#[from(world)] world: &PlanWorld) {
    let batch = vec![city_request(), out_of_range_request()];
    let payload = serde_json::to_string_pretty(&batch).expect("serialize requests");
    write_utf8(&world.request_path, payload.as_bytes());
}

#[given("the delivery request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &PlanWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the delivery request path")]
fn omit_request_path(#[from(world)] world: &PlanWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("I set the environment to production")]
fn set_environment(#[from(world)] world: &PlanWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_PLAN_ENVIRONMENT}"), "production".to_string()]);
}

#[given("I ask for the heuristic clairvoyant")]
fn ask_for_unknown_heuristic(#[from(world)] world: &PlanWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_PLAN_HEURISTIC}"), "clairvoyant".to_string()]);
}

#[when("I run the plan command")]
fn run_plan_command(#[from(world)] world: &PlanWorld) {
    world.run_with(&DefaultPlanSolverBuilder);
}

#[when("I run the plan command with a solver that runs out of budget")]
fn run_plan_command_aborting(#[from(world)] world: &PlanWorld) {
    world.run_with(&AbortingSolverBuilder);
}

#[then("the command succeeds and prints one ok result")]
fn command_prints_one_ok_result(#[from(world)] world: &PlanWorld) {
    let envelopes = world.envelopes();
    let [envelope] = envelopes.as_slice() else {
        panic!("expected one result, found {envelopes:?}");
    };
    assert_eq!(envelope.response.status, PlanStatus::Ok);
    let route = envelope.response.route.as_ref().expect("route present");
    assert_eq!(route.len(), 5);
    assert!(envelope.response.estimated_time_hours.is_some());
}

#[then("every result names the development environment")]
fn results_name_development(#[from(world)] world: &PlanWorld) {
    assert!(
        world
            .envelopes()
            .iter()
            .all(|envelope| envelope.environment == "development")
    );
}

#[then("every result names the production environment")]
fn results_name_production(#[from(world)] world: &PlanWorld) {
    assert!(
        world
            .envelopes()
            .iter()
            .all(|envelope| envelope.environment == "production")
    );
}

#[then("the command succeeds and the second result is invalid input")]
fn second_result_is_invalid(#[from(world)] world: &PlanWorld) {
    let statuses: Vec<_> = world
        .envelopes()
        .iter()
        .map(|envelope| envelope.response.status)
        .collect();
    assert_eq!(statuses, vec![PlanStatus::Ok, PlanStatus::InvalidInput]);
}

#[then("the command succeeds and the result is search aborted")]
fn result_is_search_aborted(#[from(world)] world: &PlanWorld) {
    let envelopes = world.envelopes();
    let [envelope] = envelopes.as_slice() else {
        panic!("expected one result, found {envelopes:?}");
    };
    assert_eq!(envelope.response.status, PlanStatus::SearchAborted);
    assert!(envelope.response.route.is_none());
    assert!(envelope.response.message.is_some());
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &PlanWorld) {
    world.error_matches(|err| matches!(err, CliError::ParseDeliveryRequest { .. }));
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &PlanWorld) {
    world.error_matches(|err| {
        matches!(err, CliError::MissingArgument { field, .. } if *field == ARG_PLAN_REQUEST)
    });
}

#[then("the command fails because the heuristic is unknown")]
fn command_fails_unknown_heuristic(#[from(world)] world: &PlanWorld) {
    world.error_matches(|err| {
        matches!(err, CliError::InvalidOption { field, .. } if *field == ARG_PLAN_HEURISTIC)
    });
}

macro_rules! register_plan_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/plan_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: PlanWorld) {
            let _ = world;
        }
    };
}

register_plan_scenario!(plan_happy_path, "planning a request from JSON");
register_plan_scenario!(plan_invalid_request, "reporting invalid requests in the output");
register_plan_scenario!(plan_search_aborted, "reporting aborted searches in the output");
register_plan_scenario!(plan_environment, "labelling results with the configured environment");
register_plan_scenario!(plan_invalid_json, "rejecting invalid JSON input");
register_plan_scenario!(plan_missing_request, "rejecting missing request paths");
register_plan_scenario!(plan_unknown_heuristic, "rejecting unknown heuristics");
