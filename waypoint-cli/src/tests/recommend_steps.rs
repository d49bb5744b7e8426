//! Behaviour-driven step definitions driving the recommend CLI scenarios.

use super::helpers::{Workspace, on_site_request, write_utf8};
use super::*;
use crate::recommend::run_recommend_with;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;

struct RecommendWorld {
    workspace: Workspace,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RecommendWorld {
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
        let mut argv = vec!["waypoint".to_owned(), "recommend".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn output(&self) -> Value {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        serde_json::from_slice(&self.stdout.borrow()).expect("stdout should be JSON")
    }

    fn error_matches(&self, predicate: impl FnOnce(&CliError) -> bool) {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        match result {
            Err(err) => assert!(predicate(err), "unexpected error {err:?}"),
            Ok(()) => panic!("expected failure"),
        }
    }
}

#[fixture]
fn world() -> RecommendWorld {
    RecommendWorld::new()
}

#[given("an on-site request exists on disk")]
fn on_site_request_exists(#[from(world)] world: &RecommendWorld) {
    world
        .workspace
        .write_json("request.json", &on_site_request());
}

#[given("an on-site request without a vibe exists on disk")]
fn request_without_vibe_exists(#[from(world)] world: &RecommendWorld) {
    let mut request = on_site_request();
    if let Some(context) = request["context"].as_object_mut() {
        context.remove("selected_vibe");
    }
    world.workspace.write_json("request.json", &request);
}

#[given("I force the no-location mode")]
fn force_no_location(#[from(world)] world: &RecommendWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_MODE}"), "no-location".to_owned()]);
}

#[given("the request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &RecommendWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the request path")]
fn omit_request_path(#[from(world)] world: &RecommendWorld) {
    *world.include_request.borrow_mut() = false;
}

#[when("I run the recommend command")]
fn run_recommend_command(#[from(world)] world: &RecommendWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Recommend(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_recommend_with(args, &mut *buffer)
        }
        Command::Vibes(_) => panic!("expected recommend command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds with a live ranking led by the espresso bar")]
fn live_ranking_printed(#[from(world)] world: &RecommendWorld) {
    let output = world.output();
    assert_eq!(output["kind"], "ranked");
    assert_eq!(output["mode"], "live");
    assert_eq!(output["items"][0]["name"], "Gate Espresso");
    assert_eq!(output["items"][0]["rank"], 1);
}

#[then("the command succeeds with popular picks")]
fn popular_picks_printed(#[from(world)] world: &RecommendWorld) {
    let output = world.output();
    assert_eq!(output["mode"], "no-location");
    assert_eq!(output["items"][0]["name"], "Harbour Bistro");
    let note = output["items"][0]["note"].as_str().expect("note");
    assert!(note.starts_with("Popular choices"));
}

#[then("the command succeeds with a vibe prompt")]
fn vibe_prompt_printed(#[from(world)] world: &RecommendWorld) {
    let output = world.output();
    assert_eq!(output["kind"], "vibe-prompt");
    assert_eq!(output["venue_name"], "Changi T3");
    assert_eq!(output["vibes"].as_array().map(Vec::len), Some(6));
}

#[then("the command fails because the request JSON is invalid")]
fn fails_invalid_json(#[from(world)] world: &RecommendWorld) {
    world.error_matches(|err| matches!(err, CliError::ParseRequest { .. }));
}

#[then("the command fails because the request path is missing")]
fn fails_missing_request(#[from(world)] world: &RecommendWorld) {
    world.error_matches(|err| {
        matches!(err, CliError::MissingArgument { field, .. } if *field == ARG_RECOMMEND_REQUEST)
    });
}

macro_rules! register_recommend_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(
            path = "tests/features/recommend_command.feature",
            name = $scenario_title
        )]
        fn $fn_name(#[from(world)] world: RecommendWorld) {
            let _ = world;
        }
    };
}

register_recommend_scenario!(recommend_on_site, "recommending for an on-site traveller");
register_recommend_scenario!(recommend_forced_fallback, "forcing the no-location mode");
register_recommend_scenario!(recommend_vibe_prompt, "prompting for a vibe");
register_recommend_scenario!(recommend_invalid_json, "rejecting invalid JSON input");
register_recommend_scenario!(recommend_missing_request, "rejecting missing request paths");
