//! In-memory integration tests for the task list of a signed-in user.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskpilot::{
    session::{
        adapters::InMemoryIdentityProvider,
        domain::{GuardDecision, Identity, UserId},
        services::SessionGuard,
    },
    task::{
        adapters::memory::{InMemorySubtaskRepository, InMemoryTaskRepository},
        domain::{TaskPriority, TaskStatus},
        services::{AddOutcome, SubtaskStore, TaskStore},
    },
};

type TestStore = TaskStore<InMemoryTaskRepository, InMemorySubtaskRepository, DefaultClock>;

struct Session {
    guard: SessionGuard<InMemoryIdentityProvider>,
    store: TestStore,
    rows: InMemoryTaskRepository,
}

#[fixture]
fn session() -> Session {
    let identity = Identity::new(UserId::new("user-1")).with_name("Alice");
    let rows = InMemoryTaskRepository::new();
    Session {
        guard: SessionGuard::new(Arc::new(InMemoryIdentityProvider::signed_in(identity))),
        store: TaskStore::new(
            Arc::new(rows.clone()),
            SubtaskStore::new(Arc::new(InMemorySubtaskRepository::new())),
            Arc::new(DefaultClock),
        ),
        rows,
    }
}

async fn signed_in(session: &Session) -> Result<Identity, eyre::Report> {
    match session.guard.check().await {
        GuardDecision::Proceed(identity) => Ok(identity),
        GuardDecision::RedirectToLogin => Err(eyre::eyre!("expected a session")),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guarded_user_manages_tasks_end_to_end(session: Session) -> Result<(), eyre::Report> {
    let identity = signed_in(&session).await?;
    session.store.load(identity.id()).await?;

    let AddOutcome::Added(report) = session.store.add("Write report", TaskPriority::High).await?
    else {
        return Err(eyre::eyre!("report was skipped"));
    };
    session.store.add("Book flights", TaskPriority::Low).await?;
    session
        .store
        .set_status(report.id(), TaskStatus::Done)
        .await?;

    let tasks = session.store.tasks();
    let titles: Vec<&str> = tasks.iter().map(|task| task.title()).collect();
    eyre::ensure!(
        titles == ["Book flights", "Write report"],
        "unexpected order {titles:?}"
    );
    let stored = tasks
        .iter()
        .find(|task| task.id() == report.id())
        .ok_or_else(|| eyre::eyre!("report missing after reload"))?;
    eyre::ensure!(stored.status() == TaskStatus::Done, "status not persisted");
    eyre::ensure!(stored.priority() == TaskPriority::High, "priority changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtask_changes_survive_a_fresh_load(session: Session) -> Result<(), eyre::Report> {
    let identity = signed_in(&session).await?;
    session.store.load(identity.id()).await?;
    let AddOutcome::Added(task) = session.store.add("Prepare slides", TaskPriority::Medium).await?
    else {
        return Err(eyre::eyre!("task was skipped"));
    };
    let subtasks = session.store.subtasks();
    let AddOutcome::Added(outline) = subtasks.add(task.id(), "Outline").await? else {
        return Err(eyre::eyre!("subtask was skipped"));
    };
    subtasks.add(task.id(), "Draft").await?;
    subtasks
        .toggle_completed(outline.id(), task.id(), outline.completed())
        .await?;

    session.store.load(identity.id()).await?;

    let reloaded = subtasks.subtasks(task.id());
    let states: Vec<(&str, bool)> = reloaded
        .iter()
        .map(|subtask| (subtask.title(), subtask.completed()))
        .collect();
    eyre::ensure!(
        states == [("Outline", true), ("Draft", false)],
        "unexpected subtasks {states:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signing_out_blocks_the_next_check(session: Session) -> Result<(), eyre::Report> {
    signed_in(&session).await?;

    session.guard.sign_out().await;

    eyre::ensure!(session.guard.identity().is_none(), "identity kept");
    eyre::ensure!(
        session.guard.check().await == GuardDecision::RedirectToLogin,
        "expected redirect after sign-out"
    );
    eyre::ensure!(session.rows.snapshot()?.is_empty(), "no rows expected");
    Ok(())
}
