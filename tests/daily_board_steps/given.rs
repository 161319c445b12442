//! Given steps for daily board BDD scenarios.

use std::sync::Arc;

use super::world::{DailyBoardWorld, run_async};
use crate::test_helpers::{ManualClock, at, work};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tassko::task::{domain::Lane, services::CreateTaskRequest};

#[given(r#"a planner opened at "{timestamp}""#)]
fn planner_opened(world: &mut DailyBoardWorld, timestamp: String) -> Result<(), eyre::Report> {
    world.clock = Some(Arc::new(ManualClock::new(at(&timestamp)?)));
    world.reopen().wrap_err("open planner for scenario")
}

#[given(r#"a pool task titled "{title}""#)]
fn pool_task(world: &mut DailyBoardWorld, title: String) -> Result<(), eyre::Report> {
    let deadline = at("2025-03-12T17:00:00Z")?;
    let created = run_async(
        world
            .session()?
            .tasks()
            .create(CreateTaskRequest::new(title, work()?, deadline)),
    )
    .wrap_err("create pool task")?;
    world.task = Some(created);
    Ok(())
}

#[given("the task is on the daily board")]
fn task_on_board(world: &mut DailyBoardWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let outcome = run_async(world.session()?.tasks().promote_to_daily(id))
        .wrap_err("promote task in scenario setup")?;
    world.task = Some(outcome.task().clone());
    Ok(())
}

#[given(r#"the task has been moved to the "{lane}" lane"#)]
fn task_moved(world: &mut DailyBoardWorld, lane: String) -> Result<(), eyre::Report> {
    let target = Lane::try_from(lane.as_str())?;
    let id = world.task()?.id();
    let moved = run_async(world.session()?.tasks().move_lane(id, target))
        .wrap_err("move task in scenario setup")?;
    world.task = Some(moved);
    Ok(())
}
