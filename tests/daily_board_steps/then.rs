//! Then steps for daily board BDD scenarios.

use super::world::{DailyBoardWorld, run_async};
use rstest_bdd_macros::then;
use tassko::task::{
    domain::{Lane, TaskDomainError},
    services::{PromotionOutcome, RolloverOutcome, TaskEngineError},
};

#[then(r#"the task is on the daily board in the "{lane}" lane"#)]
fn on_board_in_lane(world: &DailyBoardWorld, lane: String) -> Result<(), eyre::Report> {
    let expected = Lane::try_from(lane.as_str())?;
    let id = world.task()?.id();
    let stored = run_async(world.session()?.tasks().task(id))?;
    eyre::ensure!(stored.is_daily(), "task is not on the daily board");
    eyre::ensure!(
        stored.lane() == expected,
        "expected lane {expected}, found {}",
        stored.lane()
    );
    Ok(())
}

#[then("the promotion reports the task was already on the board")]
fn already_on_board(world: &DailyBoardWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_promotion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing promotion outcome"))?;
    eyre::ensure!(
        matches!(outcome, PromotionOutcome::AlreadyOnDailyBoard(_)),
        "expected AlreadyOnDailyBoard, got {outcome:?}"
    );
    Ok(())
}

#[then("the move fails because the task is not on the daily board")]
fn move_rejected(world: &DailyBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskEngineError::Domain(TaskDomainError::NotOnDailyBoard(_)))
        ),
        "expected NotOnDailyBoard error, got {result:?}"
    );
    Ok(())
}

#[then(r#"the task is in the pool in the "{lane}" lane"#)]
fn in_pool(world: &DailyBoardWorld, lane: String) -> Result<(), eyre::Report> {
    let expected = Lane::try_from(lane.as_str())?;
    let id = world.task()?.id();
    let stored = run_async(world.session()?.tasks().task(id))?;
    eyre::ensure!(!stored.is_daily(), "task is still on the daily board");
    eyre::ensure!(
        stored.lane() == expected,
        "expected lane {expected}, found {}",
        stored.lane()
    );
    Ok(())
}

#[then("the rollover returned {count:usize} task to the pool")]
fn rollover_count(world: &DailyBoardWorld, count: usize) -> Result<(), eyre::Report> {
    let outcome = world.session()?.last_rollover();
    eyre::ensure!(
        matches!(outcome, RolloverOutcome::Ran { returned_to_pool, .. } if returned_to_pool == count),
        "expected {count} task(s) returned, got {outcome:?}"
    );
    Ok(())
}
