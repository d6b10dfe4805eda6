//! When steps for task manager BDD scenarios.

use super::world::{TaskManagerWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskpilot::{profile::domain::ImageUpload, task::domain::TaskPriority};

#[when("the session is checked")]
fn session_checked(world: &mut TaskManagerWorld) {
    world.decision = Some(run_async(world.guard.check()));
}

#[when(r#"the user adds the task "{title}" with priority "{priority}""#)]
fn add_task(
    world: &mut TaskManagerWorld,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let parsed = TaskPriority::try_from(priority.as_str())?;
    run_async(world.tasks.add(&title, parsed)).wrap_err("add task")?;
    Ok(())
}

#[when(r#"the user toggles the subtask "{title}""#)]
fn toggle_subtask(world: &mut TaskManagerWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    let subtasks = world.tasks.subtasks();
    let subtask = subtasks
        .subtasks(&task_id)
        .into_iter()
        .find(|subtask| subtask.title() == title)
        .ok_or_else(|| eyre::eyre!("no subtask '{title}'"))?;
    run_async(subtasks.toggle_completed(subtask.id(), &task_id, subtask.completed()))
        .wrap_err("toggle subtask")?;
    Ok(())
}

#[when("suggestions are generated for the task")]
fn generate_suggestions(world: &mut TaskManagerWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    let task = world
        .tasks
        .tasks()
        .into_iter()
        .find(|task| task.id() == &task_id)
        .ok_or_else(|| eyre::eyre!("task {task_id} is not loaded"))?;
    run_async(world.suggestions.generate(&task_id, task.title()));
    Ok(())
}

#[when(r#"the user saves the suggestion "{text}""#)]
fn save_suggestion(world: &mut TaskManagerWorld, text: String) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    run_async(world.suggestions.save(&task_id, &text)).wrap_err("save suggestion")?;
    Ok(())
}

#[when("the user removes the task")]
fn remove_task(world: &mut TaskManagerWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?;
    run_async(world.tasks.remove(&task_id)).wrap_err("remove task")?;
    world.suggestions.forget(&task_id);
    Ok(())
}

#[when(r#"the user uploads "{file_name}" of type "{content_type}""#)]
fn upload_picture(world: &mut TaskManagerWorld, file_name: String, content_type: String) {
    world.picture_before = world.profile.picture_url();
    let upload = ImageUpload::new(file_name, content_type, vec![0x89, b'P', b'N', b'G']);
    run_async(world.profile.upload(&world.user, upload));
}
