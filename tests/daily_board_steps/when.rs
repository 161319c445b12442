//! When steps for daily board BDD scenarios.

use super::world::{DailyBoardWorld, run_async};
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tassko::task::domain::Lane;

#[when("the task is promoted to the daily board")]
fn promote(world: &mut DailyBoardWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let outcome = run_async(world.session()?.tasks().promote_to_daily(id))
        .wrap_err("promote task")?;
    world.task = Some(outcome.task().clone());
    world.last_promotion = Some(outcome);
    Ok(())
}

#[when(r#"the task is moved to the "{lane}" lane"#)]
fn move_lane(world: &mut DailyBoardWorld, lane: String) -> Result<(), eyre::Report> {
    let target = Lane::try_from(lane.as_str())?;
    let id = world.task()?.id();
    let result = run_async(world.session()?.tasks().move_lane(id, target));
    if let Ok(ref moved) = result {
        world.task = Some(moved.clone());
    }
    world.last_move = Some(result);
    Ok(())
}

#[when("a day passes and the planner is reopened")]
fn next_day(world: &mut DailyBoardWorld) -> Result<(), eyre::Report> {
    world
        .clock
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no clock in scenario world"))?
        .advance(TimeDelta::days(1));
    world.reopen().wrap_err("reopen planner on the next day")
}
