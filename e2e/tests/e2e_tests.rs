mod cucumber;

use std::env;

use ::cucumber::{codegen::LocalBoxFuture, event::ScenarioFinished, gherkin, writer, World};
use futures_util::FutureExt;
use log::*;
use tokio::runtime::Runtime;

use crate::cucumber::DealWorld;

const DEFAULT_FEATURES: &str = "tests/features";

/// Every scenario starts its own server and fake provider on random ports, so a few can run side by side.
const CONCURRENT_SCENARIOS: usize = 4;

fn main() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    // DS_E2E_FEATURES narrows a run down to a single feature file or directory.
    let features = env::var("DS_E2E_FEATURES").unwrap_or_else(|_| DEFAULT_FEATURES.to_string());
    let runtime = Runtime::new().expect("Could not start the Tokio runtime");
    runtime.block_on(
        DealWorld::cucumber()
            .max_concurrent_scenarios(CONCURRENT_SCENARIOS)
            .with_writer(writer::Libtest::or_basic())
            .before(|feature, _rule, scenario, _world| announce(feature, scenario))
            .after(|_feature, _rule, scenario, ev, world| tear_down(scenario, ev, world))
            .run(features),
    );
    info!("🌍️ DealStream scenarios complete");
}

fn announce<'a>(feature: &'a gherkin::Feature, scenario: &'a gherkin::Scenario) -> LocalBoxFuture<'a, ()> {
    async move {
        debug!("🌍️ {}: {}", feature.name, scenario.name);
    }
    .boxed_local()
}

/// Stops the server and the fake payment provider the scenario started, whether it passed or not.
fn tear_down<'a>(
    scenario: &'a gherkin::Scenario,
    ev: &'a ScenarioFinished,
    world: Option<&'a mut DealWorld>,
) -> LocalBoxFuture<'a, ()> {
    async move {
        match ev {
            ScenarioFinished::StepFailed(..) | ScenarioFinished::BeforeHookFailed(_) => {
                warn!("🌍️ \"{}\" failed. Tearing down its servers.", scenario.name)
            },
            _ => trace!("🌍️ Tearing down \"{}\"", scenario.name),
        }
        if let Some(w) = world {
            w.shut_down().await;
        }
    }
    .boxed_local()
}
