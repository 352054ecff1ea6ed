//! Given/when steps for bulk removal scenarios.

use std::time::Duration;

use dockhand::api::BulkResponse;
use rstest_bdd_macros::{given, when};

use super::StepResult;
use super::state::BulkRemovalState;
use crate::fake_engine::{FakeEngine, FakeFactory, api_for};

fn engine(bulk_removal_state: &BulkRemovalState) -> StepResult<FakeEngine> {
    bulk_removal_state
        .engine
        .get()
        .ok_or_else(|| String::from("engine should be initialised"))
}

/// Arrange the shared engine; the builders mutate shared state.
fn arrange(
    bulk_removal_state: &BulkRemovalState,
    build: impl FnOnce(FakeEngine) -> FakeEngine,
) -> StepResult<()> {
    let _ = build(engine(bulk_removal_state)?);
    Ok(())
}

fn invoke<Fut>(
    bulk_removal_state: &BulkRemovalState,
    operation: impl FnOnce(dockhand::api::Api<FakeFactory>) -> Fut,
) -> StepResult<()>
where
    Fut: Future<Output = dockhand::error::Result<BulkResponse>>,
{
    let api = api_for(&engine(bulk_removal_state)?, Duration::from_secs(5));
    let runtime =
        tokio::runtime::Runtime::new().map_err(|e| format!("failed to create runtime: {e}"))?;
    let response = runtime
        .block_on(operation(api))
        .map_err(|e| format!("bulk removal failed: {e}"))?;
    bulk_removal_state.response.set(response);
    Ok(())
}

#[given("a running container {id}")]
fn given_running_container(bulk_removal_state: &BulkRemovalState, id: String) -> StepResult<()> {
    arrange(bulk_removal_state, |engine| engine.with_running(&id))
}

#[given("a stopped container {id}")]
fn given_stopped_container(bulk_removal_state: &BulkRemovalState, id: String) -> StepResult<()> {
    arrange(bulk_removal_state, |engine| engine.with_stopped(&id, 0))
}

#[given("an image {id} tagged {tag}")]
fn given_tagged_image(
    bulk_removal_state: &BulkRemovalState,
    id: String,
    tag: String,
) -> StepResult<()> {
    arrange(bulk_removal_state, |engine| {
        engine.with_image(&id, &[tag.as_str()])
    })
}

#[given("a dangling image {id}")]
fn given_dangling_image(bulk_removal_state: &BulkRemovalState, id: String) -> StepResult<()> {
    arrange(bulk_removal_state, |engine| {
        engine.with_image(&id, &["<none>:<none>"])
    })
}

#[given("image {id} is used by a container")]
fn given_image_in_use(bulk_removal_state: &BulkRemovalState, id: String) -> StepResult<()> {
    arrange(bulk_removal_state, |engine| engine.with_image_in_use(&id))
}

#[when("all containers are removed")]
fn when_all_containers_removed(bulk_removal_state: &BulkRemovalState) -> StepResult<()> {
    invoke(bulk_removal_state, |api| async move {
        api.remove_all_containers().await
    })
}

#[when("all images are removed")]
fn when_all_images_removed(bulk_removal_state: &BulkRemovalState) -> StepResult<()> {
    invoke(bulk_removal_state, |api| async move {
        api.remove_all_images().await
    })
}

#[when("dangling images are removed")]
fn when_dangling_images_removed(bulk_removal_state: &BulkRemovalState) -> StepResult<()> {
    invoke(bulk_removal_state, |api| async move {
        api.remove_dangling_images().await
    })
}
