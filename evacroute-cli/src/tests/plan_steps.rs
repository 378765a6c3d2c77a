//! Behaviour-driven step definitions driving the plan CLI scenarios.

use super::helpers::{Workspace, two_zone_request, write_request, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use evacroute_core::{EvacuationPlan, RequestValidationError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use std::cell::RefCell;

struct PlanWorld {
    workspace: Workspace,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl PlanWorld {
    fn new() -> Self {
        let workspace = Workspace::new();
        let request_path = workspace.path("request.json");
        Self {
            workspace,
            request_path,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["evacroute".to_owned(), "plan".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> PlanWorld {
    PlanWorld::new()
}

#[given("a valid plan request exists on disk")]
fn valid_plan_request_exists(#[from(world)] world: &PlanWorld) {
    write_request(&world.request_path, &two_zone_request());
}

#[given("the plan request contains invalid JSON")]
fn plan_request_contains_invalid_json(#[from(world)] world: &PlanWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("the plan request has no safe zone")]
fn plan_request_has_no_safe_zone(#[from(world)] world: &PlanWorld) {
    write_request(
        &world.request_path,
        &json!({
            "zones": [{ "lat": 0.0, "lng": 0.0, "population": 10, "severity": 6 }],
            "vehicle_capacity": 100
        }),
    );
}

#[given("I omit the plan request path")]
fn omit_plan_request_path(#[from(world)] world: &PlanWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("I ask for output in {name}")]
fn ask_for_output(#[from(world)] world: &PlanWorld, name: String) {
    let output = world.workspace.path(&name);
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_PLAN_OUTPUT}"), output.as_str().to_owned()]);
}

#[given("I set the average speed to {speed} km/h")]
fn set_average_speed(#[from(world)] world: &PlanWorld, speed: String) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_PLAN_AVERAGE_SPEED}"), speed]);
}

#[given("I limit requests to {count} zones")]
fn limit_zones(#[from(world)] world: &PlanWorld, count: String) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_PLAN_MAX_ZONES}"), count]);
}

#[when("I run the plan command")]
fn run_plan_command(#[from(world)] world: &PlanWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Plan(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_plan_with(args, &mut *buffer)
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints a plan for {people} people")]
fn command_prints_plan(#[from(world)] world: &PlanWorld, people: u64) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let plan: EvacuationPlan =
        serde_json::from_str(&stdout).expect("output should be a JSON plan");
    assert_eq!(plan.total_people, people);
}

#[then("the estimated time is {minutes} minutes")]
fn estimated_time_is(#[from(world)] world: &PlanWorld, minutes: f64) {
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let plan: EvacuationPlan =
        serde_json::from_str(&stdout).expect("output should be a JSON plan");
    assert_eq!(plan.estimated_time_min, minutes);
}

#[then("nothing is printed and {name} holds the plan")]
fn output_file_holds_plan(#[from(world)] world: &PlanWorld, name: String) {
    let borrowed = world.result.borrow();
    borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect("expected success");
    assert!(world.stdout.borrow().is_empty());

    let written = std::fs::read(world.workspace.path(&name)).expect("output should exist");
    let plan: EvacuationPlan =
        serde_json::from_slice(&written).expect("output should be a JSON plan");
    assert_eq!(plan.route.legs.len(), 3);
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::ParsePlanRequest { .. } => {}
        other => panic!("expected ParsePlanRequest, found {other:?}"),
    }
}

#[then("the command fails because the safe zone is missing")]
fn command_fails_missing_safe_zone(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::InvalidPlanRequest { source, .. } => {
            assert_eq!(*source, RequestValidationError::MissingSafeZone);
        }
        other => panic!("expected InvalidPlanRequest, found {other:?}"),
    }
}

#[then("the command fails because the request has too many zones")]
fn command_fails_too_many_zones(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::InvalidPlanRequest { source, .. } => {
            assert!(matches!(source, RequestValidationError::TooManyZones { .. }));
        }
        other => panic!("expected InvalidPlanRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_PLAN_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
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
register_plan_scenario!(plan_slower_vehicle, "adjusting the average speed");
register_plan_scenario!(plan_to_file, "writing the plan to a file");
register_plan_scenario!(plan_invalid_json, "rejecting invalid JSON input");
register_plan_scenario!(plan_missing_safe_zone, "rejecting requests without a safe zone");
register_plan_scenario!(plan_too_many_zones, "rejecting requests over the zone limit");
register_plan_scenario!(plan_missing_request, "rejecting missing request paths");
