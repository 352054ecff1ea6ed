//! Scenario state for bulk removal behavioural tests.

use dockhand::api::BulkResponse;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

use crate::fake_engine::FakeEngine;

#[derive(Default, ScenarioState)]
pub(crate) struct BulkRemovalState {
    pub(crate) engine: Slot<FakeEngine>,
    pub(crate) response: Slot<BulkResponse>,
}

#[fixture]
pub(crate) fn bulk_removal_state() -> BulkRemovalState {
    let state = BulkRemovalState::default();
    state.engine.set(FakeEngine::default());
    state
}
