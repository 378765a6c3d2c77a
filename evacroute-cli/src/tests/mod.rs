//! Shared test harness modules for the evacroute CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::plan::{PlanConfig, config_from_layers_for_test, load_plan_request, run_plan_with};

mod helpers;
mod plan_steps;
