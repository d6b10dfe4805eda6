//! Given steps for task manager BDD scenarios.

use super::world::{TaskManagerWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskpilot::{
    session::domain::GuardDecision,
    task::{domain::TaskPriority, domain::TaskId, services::AddOutcome},
};

#[given("nobody is signed in")]
fn nobody_signed_in(world: &mut TaskManagerWorld) {
    run_async(world.guard.sign_out());
}

#[given("a signed-in user with an empty task list")]
fn signed_in_user(world: &mut TaskManagerWorld) -> Result<(), eyre::Report> {
    world.identities.sign_in(world.identity());
    let GuardDecision::Proceed(identity) = run_async(world.guard.check()) else {
        return Err(eyre::eyre!("expected the session check to proceed"));
    };
    run_async(world.tasks.load(identity.id())).wrap_err("load tasks for scenario")?;
    if !world.tasks.tasks().is_empty() {
        return Err(eyre::eyre!("expected an empty task list"));
    }
    Ok(())
}

fn add_task(world: &mut TaskManagerWorld, title: &str) -> Result<TaskId, eyre::Report> {
    let outcome = run_async(world.tasks.add(title, TaskPriority::Medium))
        .wrap_err("add task for scenario")?;
    let AddOutcome::Added(task) = outcome else {
        return Err(eyre::eyre!("task '{title}' was skipped"));
    };
    world.current_task = Some(task.id().clone());
    Ok(task.id().clone())
}

#[given(r#"a task "{title}" with subtasks "{done}" done and "{open}" open"#)]
fn task_with_subtasks(
    world: &mut TaskManagerWorld,
    title: String,
    done: String,
    open: String,
) -> Result<(), eyre::Report> {
    let task_id = add_task(world, &title)?;
    let subtasks = world.tasks.subtasks();
    let AddOutcome::Added(finished) =
        run_async(subtasks.add(&task_id, &done)).wrap_err("add done subtask")?
    else {
        return Err(eyre::eyre!("subtask '{done}' was skipped"));
    };
    run_async(subtasks.add(&task_id, &open)).wrap_err("add open subtask")?;
    run_async(subtasks.toggle_completed(finished.id(), &task_id, false))
        .wrap_err("complete first subtask")?;
    Ok(())
}

#[given(r#"a task "{title}" for which the service suggests "{first}" and "{second}""#)]
fn task_with_suggestions(
    world: &mut TaskManagerWorld,
    title: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    add_task(world, &title)?;
    world.suggestion_client.answer(&title, [first, second]);
    Ok(())
}

#[given(r#"a task "{title}" for which the service fails"#)]
fn task_with_failing_suggestions(
    world: &mut TaskManagerWorld,
    title: String,
) -> Result<(), eyre::Report> {
    add_task(world, &title)?;
    world.suggestion_client.reject(&title, 500);
    Ok(())
}
