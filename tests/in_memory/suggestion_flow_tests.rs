//! In-memory integration tests for suggested subtasks.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskpilot::{
    alert::RecordingAlerts,
    session::domain::UserId,
    suggestion::{
        adapters::StaticSuggestionClient,
        services::{GenerateOutcome, SuggestionWorkflow},
    },
    task::{
        adapters::memory::{InMemorySubtaskRepository, InMemoryTaskRepository},
        domain::{TaskId, TaskPriority},
        services::{AddOutcome, SubtaskStore, TaskStore},
    },
};

struct Board {
    tasks: TaskStore<InMemoryTaskRepository, InMemorySubtaskRepository, DefaultClock>,
    suggestions: SuggestionWorkflow<StaticSuggestionClient, InMemorySubtaskRepository>,
    alerts: RecordingAlerts,
}

#[fixture]
fn board() -> Board {
    let subtasks = SubtaskStore::new(Arc::new(InMemorySubtaskRepository::new()));
    let tasks = TaskStore::new(
        Arc::new(InMemoryTaskRepository::new()),
        subtasks.clone(),
        Arc::new(DefaultClock),
    );
    let alerts = RecordingAlerts::new();
    let client = StaticSuggestionClient::new()
        .with_answer("Plan launch", ["Book venue", "Send invites"])
        .fail_for("Plan nothing", 503);
    let suggestions = SuggestionWorkflow::new(
        Arc::new(client),
        subtasks,
        tasks.expanded().clone(),
        Arc::new(alerts.clone()),
    );
    Board {
        tasks,
        suggestions,
        alerts,
    }
}

async fn task(board: &Board, title: &str) -> Result<TaskId, eyre::Report> {
    board.tasks.load(&UserId::new("user-1")).await?;
    match board.tasks.add(title, TaskPriority::Medium).await? {
        AddOutcome::Added(task) => Ok(task.id().clone()),
        AddOutcome::Skipped => Err(eyre::eyre!("task '{title}' was skipped")),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_every_suggestion_empties_the_staged_list(board: Board) -> Result<(), eyre::Report> {
    let launch = task(&board, "Plan launch").await?;

    let GenerateOutcome::Staged(titles) = board.suggestions.generate(&launch, "Plan launch").await
    else {
        return Err(eyre::eyre!("expected suggestions"));
    };
    for title in &titles {
        board.suggestions.save(&launch, title).await?;
    }

    eyre::ensure!(board.suggestions.staged(&launch).is_empty(), "staged left over");
    let saved: Vec<String> = board
        .tasks
        .subtasks()
        .subtasks(&launch)
        .iter()
        .map(|subtask| subtask.title().to_owned())
        .collect();
    eyre::ensure!(saved == titles, "saved {saved:?}, expected {titles:?}");
    eyre::ensure!(board.tasks.expanded().is_expanded(&launch), "task collapsed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_generation_writes_no_subtasks(board: Board) -> Result<(), eyre::Report> {
    let idle = task(&board, "Plan nothing").await?;

    let outcome = board.suggestions.generate(&idle, "Plan nothing").await;

    eyre::ensure!(outcome == GenerateOutcome::Failed, "expected failure");
    eyre::ensure!(board.alerts.messages().len() == 1, "expected one alert");
    eyre::ensure!(
        board.tasks.subtasks().subtasks(&idle).is_empty(),
        "failure must not write subtasks"
    );
    eyre::ensure!(!board.suggestions.is_generating(&idle), "still generating");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_task_drops_its_staged_suggestions(board: Board) -> Result<(), eyre::Report> {
    let launch = task(&board, "Plan launch").await?;
    board.suggestions.generate(&launch, "Plan launch").await;

    board.tasks.remove(&launch).await?;
    board.suggestions.forget(&launch);

    eyre::ensure!(board.suggestions.staged(&launch).is_empty(), "staged kept");
    eyre::ensure!(board.tasks.tasks().is_empty(), "task kept");
    Ok(())
}
