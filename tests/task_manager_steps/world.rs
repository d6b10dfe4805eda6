//! Shared world state for task manager BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskpilot::{
    alert::RecordingAlerts,
    profile::{
        adapters::memory::{InMemoryObjectStorage, InMemoryProfileRepository},
        services::ProfilePictureWorkflow,
    },
    session::{
        adapters::InMemoryIdentityProvider,
        domain::{GuardDecision, Identity, UserId},
        services::SessionGuard,
    },
    suggestion::{adapters::StaticSuggestionClient, services::SuggestionWorkflow},
    task::{
        adapters::memory::{InMemorySubtaskRepository, InMemoryTaskRepository},
        domain::TaskId,
        services::{SubtaskStore, TaskStore},
    },
};

/// Public base of stored pictures in scenarios.
pub const PUBLIC_BASE: &str = "https://demo.example.co/storage/v1/object/public/profile-pictures";

/// Task store type used by the BDD world.
pub type TestTaskStore =
    TaskStore<InMemoryTaskRepository, InMemorySubtaskRepository, DefaultClock>;

/// Suggestion workflow type used by the BDD world.
pub type TestSuggestions = SuggestionWorkflow<StaticSuggestionClient, InMemorySubtaskRepository>;

/// Profile workflow type used by the BDD world.
pub type TestProfile =
    ProfilePictureWorkflow<InMemoryProfileRepository, InMemoryObjectStorage, DefaultClock>;

/// Scenario world for task manager behaviour tests.
pub struct TaskManagerWorld {
    /// Identity provider the guard consults.
    pub identities: InMemoryIdentityProvider,
    /// Session guard under test.
    pub guard: SessionGuard<InMemoryIdentityProvider>,
    /// Outcome of the last session check.
    pub decision: Option<GuardDecision>,
    /// Signed-in user.
    pub user: UserId,
    /// Task store under test.
    pub tasks: TestTaskStore,
    /// Backing subtask rows.
    pub subtask_rows: InMemorySubtaskRepository,
    /// Canned suggestion endpoint.
    pub suggestion_client: StaticSuggestionClient,
    /// Suggestion workflow under test.
    pub suggestions: TestSuggestions,
    /// Profile workflow under test.
    pub profile: TestProfile,
    /// Backing picture objects.
    pub storage: InMemoryObjectStorage,
    /// Alerts shown to the user.
    pub alerts: RecordingAlerts,
    /// Task the scenario acts on.
    pub current_task: Option<TaskId>,
    /// Picture URL before the scenario's action.
    pub picture_before: Option<String>,
}

impl TaskManagerWorld {
    /// Creates a world with nobody signed in and empty stores.
    #[must_use]
    pub fn new() -> Self {
        let identities = InMemoryIdentityProvider::new();
        let guard = SessionGuard::new(Arc::new(identities.clone()));
        let subtask_rows = InMemorySubtaskRepository::new();
        let subtasks = SubtaskStore::new(Arc::new(subtask_rows.clone()));
        let tasks = TaskStore::new(
            Arc::new(InMemoryTaskRepository::new()),
            subtasks.clone(),
            Arc::new(DefaultClock),
        );
        let alerts = RecordingAlerts::new();
        let suggestion_client = StaticSuggestionClient::new();
        let suggestions = SuggestionWorkflow::new(
            Arc::new(suggestion_client.clone()),
            subtasks,
            tasks.expanded().clone(),
            Arc::new(alerts.clone()),
        );
        let storage = InMemoryObjectStorage::new(PUBLIC_BASE);
        let profile = ProfilePictureWorkflow::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(storage.clone()),
            Arc::new(DefaultClock),
            Arc::new(alerts.clone()),
        );
        Self {
            identities,
            guard,
            decision: None,
            user: UserId::new("user-1"),
            tasks,
            subtask_rows,
            suggestion_client,
            suggestions,
            profile,
            storage,
            alerts,
            current_task: None,
            picture_before: None,
        }
    }

    /// Identity signed in by `Given a signed-in user` steps.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.user.clone())
            .with_email("alice@example.com")
            .with_name("Alice")
    }

    /// Task the scenario acts on.
    ///
    /// # Errors
    ///
    /// Fails when no step has created a task yet.
    pub fn current_task(&self) -> Result<TaskId, eyre::Report> {
        self.current_task
            .clone()
            .ok_or_else(|| eyre::eyre!("no task in scenario world"))
    }
}

impl Default for TaskManagerWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskManagerWorld {
    TaskManagerWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
