//! Then steps for task manager BDD scenarios.

use super::world::{PUBLIC_BASE, TaskManagerWorld, run_async};
use rstest_bdd_macros::then;
use taskpilot::{
    session::domain::GuardDecision,
    task::{domain::TaskPriority, domain::TaskStatus, ports::SubtaskRepository},
};

#[then("the visitor is redirected to login")]
fn redirected_to_login(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    if world.decision != Some(GuardDecision::RedirectToLogin) {
        return Err(eyre::eyre!(
            "expected a redirect to login, got {:?}",
            world.decision
        ));
    }
    if world.guard.identity().is_some() {
        return Err(eyre::eyre!("expected no stored identity"));
    }
    Ok(())
}

#[then("the list holds exactly one task")]
fn exactly_one_task(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let count = world.tasks.tasks().len();
    if count != 1 {
        return Err(eyre::eyre!("expected one task, found {count}"));
    }
    Ok(())
}

#[then("the task list is empty")]
fn task_list_empty(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let count = world.tasks.tasks().len();
    if count != 0 {
        return Err(eyre::eyre!("expected no tasks, found {count}"));
    }
    Ok(())
}

#[then(r#"the task "{title}" has priority "{priority}" and status "{status}""#)]
fn task_has_priority_and_status(
    world: &TaskManagerWorld,
    title: String,
    priority: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected_priority = TaskPriority::try_from(priority.as_str())?;
    let expected_status = TaskStatus::try_from(status.as_str())?;
    let tasks = world.tasks.tasks();
    let matching: Vec<_> = tasks.iter().filter(|task| task.title() == title).collect();
    let [task] = matching.as_slice() else {
        return Err(eyre::eyre!(
            "expected exactly one task '{title}', found {}",
            matching.len()
        ));
    };
    if task.priority() != expected_priority || task.status() != expected_status {
        return Err(eyre::eyre!(
            "task '{title}' is {:?}/{:?}",
            task.priority(),
            task.status()
        ));
    }
    Ok(())
}

#[then("every subtask of the task is completed")]
fn every_subtask_completed(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    let subtasks = world.tasks.subtasks().subtasks(&task_id);
    if subtasks.len() != 2 {
        return Err(eyre::eyre!("expected two subtasks, found {}", subtasks.len()));
    }
    if let Some(open) = subtasks.iter().find(|subtask| !subtask.completed()) {
        return Err(eyre::eyre!("subtask '{}' is still open", open.title()));
    }
    Ok(())
}

#[then(r#"the staged suggestions are "{list}""#)]
fn staged_suggestions_are(world: &TaskManagerWorld, list: String) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    let expected: Vec<String> = list.split(", ").map(str::to_owned).collect();
    let staged = world.suggestions.staged(&task_id);
    if staged != expected {
        return Err(eyre::eyre!("expected {expected:?} staged, found {staged:?}"));
    }
    Ok(())
}

#[then("nothing is staged for the task")]
fn nothing_staged(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    let staged = world.suggestions.staged(&task_id);
    if !staged.is_empty() {
        return Err(eyre::eyre!("expected nothing staged, found {staged:?}"));
    }
    Ok(())
}

#[then("the task is no longer generating")]
fn not_generating(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    if world.suggestions.is_generating(&task_id) {
        return Err(eyre::eyre!("task {task_id} is still generating"));
    }
    Ok(())
}

#[then("the task is expanded")]
fn task_expanded(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    if !world.tasks.expanded().is_expanded(&task_id) {
        return Err(eyre::eyre!("task {task_id} is collapsed"));
    }
    Ok(())
}

#[then(r#"the task has exactly one subtask "{title}""#)]
fn exactly_one_subtask(world: &TaskManagerWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    let stored = run_async(world.subtask_rows.list_for_task(&task_id))?;
    let titles: Vec<&str> = stored.iter().map(|subtask| subtask.title()).collect();
    if titles != [title.as_str()] {
        return Err(eyre::eyre!("expected only '{title}', found {titles:?}"));
    }
    if stored.iter().any(|subtask| subtask.completed()) {
        return Err(eyre::eyre!("saved suggestion should start incomplete"));
    }
    Ok(())
}

#[then("no subtasks of the task remain stored")]
fn no_subtasks_remain(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    let stored = run_async(world.subtask_rows.list_for_task(&task_id))?;
    if !stored.is_empty() {
        return Err(eyre::eyre!("{} subtasks survived", stored.len()));
    }
    if !world.tasks.subtasks().subtasks(&task_id).is_empty() {
        return Err(eyre::eyre!("local subtask list survived"));
    }
    Ok(())
}

#[then(r#"the alert "{message}" was shown"#)]
fn alert_shown(world: &TaskManagerWorld, message: String) -> Result<(), eyre::Report> {
    let messages = world.alerts.messages();
    if messages != [message.as_str()] {
        return Err(eyre::eyre!("expected alert '{message}', got {messages:?}"));
    }
    Ok(())
}

#[then("the profile picture is unchanged")]
fn picture_unchanged(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let current = world.profile.picture_url();
    if current != world.picture_before {
        return Err(eyre::eyre!(
            "picture changed from {:?} to {current:?}",
            world.picture_before
        ));
    }
    Ok(())
}

#[then("no object was stored")]
fn no_object_stored(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let paths = world.storage.paths();
    if !paths.is_empty() {
        return Err(eyre::eyre!("expected no objects, found {paths:?}"));
    }
    Ok(())
}

#[then("the profile picture points at the stored object")]
fn picture_points_at_object(world: &TaskManagerWorld) -> Result<(), eyre::Report> {
    let paths = world.storage.paths();
    let [path] = paths.as_slice() else {
        return Err(eyre::eyre!("expected one object, found {paths:?}"));
    };
    let expected = format!("{PUBLIC_BASE}/{path}");
    if world.profile.picture_url().as_deref() != Some(expected.as_str()) {
        return Err(eyre::eyre!(
            "expected picture {expected}, found {:?}",
            world.profile.picture_url()
        ));
    }
    Ok(())
}
