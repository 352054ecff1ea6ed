//! Assertion helpers for bulk removal behavioural tests.

use dockhand::api::BulkResponse;
use dockhand::engine::BulkSummary;
use rstest_bdd_macros::then;

use super::StepResult;
use super::state::BulkRemovalState;

fn response(bulk_removal_state: &BulkRemovalState) -> StepResult<BulkResponse> {
    bulk_removal_state
        .response
        .get()
        .ok_or_else(|| String::from("response should be set"))
}

fn remaining(bulk_removal_state: &BulkRemovalState, images: bool) -> StepResult<Vec<String>> {
    let engine = bulk_removal_state
        .engine
        .get()
        .ok_or_else(|| String::from("engine should be initialised"))?;
    Ok(if images {
        engine.image_ids()
    } else {
        engine.container_ids()
    })
}

#[then("the response message is {expected}")]
fn response_message_is(bulk_removal_state: &BulkRemovalState, expected: String) -> StepResult<()> {
    let actual = response(bulk_removal_state)?.message;
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected message '{expected}', got '{actual}'"))
    }
}

#[then("the only detail is {expected}")]
fn only_detail_is(bulk_removal_state: &BulkRemovalState, expected: String) -> StepResult<()> {
    let details = response(bulk_removal_state)?.details;
    if details == vec![expected.clone()] {
        Ok(())
    } else {
        Err(format!("expected only '{expected}', got {details:?}"))
    }
}

#[then("the detail for {id} is {expected}")]
fn detail_for_is(
    bulk_removal_state: &BulkRemovalState,
    id: String,
    expected: String,
) -> StepResult<()> {
    let details = response(bulk_removal_state)?.details;
    let line = details
        .iter()
        .find(|line| line.ends_with(&id))
        .ok_or_else(|| format!("no detail for {id} in {details:?}"))?;
    if *line == expected {
        Ok(())
    } else {
        Err(format!("expected '{expected}', got '{line}'"))
    }
}

#[then("container {id} is gone")]
fn container_is_gone(bulk_removal_state: &BulkRemovalState, id: String) -> StepResult<()> {
    if remaining(bulk_removal_state, false)?.contains(&id) {
        Err(format!("container {id} should have been removed"))
    } else {
        Ok(())
    }
}

#[then("container {id} remains")]
fn container_remains(bulk_removal_state: &BulkRemovalState, id: String) -> StepResult<()> {
    if remaining(bulk_removal_state, false)?.contains(&id) {
        Ok(())
    } else {
        Err(format!("container {id} should still exist"))
    }
}

#[then("image {id} is gone")]
fn image_is_gone(bulk_removal_state: &BulkRemovalState, id: String) -> StepResult<()> {
    if remaining(bulk_removal_state, true)?.contains(&id) {
        Err(format!("image {id} should have been removed"))
    } else {
        Ok(())
    }
}

#[then("image {id} remains")]
fn image_remains(bulk_removal_state: &BulkRemovalState, id: String) -> StepResult<()> {
    if remaining(bulk_removal_state, true)?.contains(&id) {
        Ok(())
    } else {
        Err(format!("image {id} should still exist"))
    }
}

#[then("the summary counts {removed} removed {skipped} skipped {failed} failed")]
fn summary_counts(
    bulk_removal_state: &BulkRemovalState,
    removed: usize,
    skipped: usize,
    failed: usize,
) -> StepResult<()> {
    let expected = BulkSummary {
        removed,
        skipped,
        failed,
    };
    let actual = response(bulk_removal_state)?.summary;
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {expected:?}, got {actual:?}"))
    }
}
