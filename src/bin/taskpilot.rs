//! Command line front end for the hosted task manager.
//!
//! Usage:
//!
//! ```text
//! taskpilot [--config <path>] <command>
//! ```
//!
//! Connection settings come from the optional JSON file and the
//! `TASKPILOT_*` environment variables. Every command first checks for a
//! signed-in session and stops with a sign-in hint when there is none.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr, bail, eyre};
use mockable::DefaultClock;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use taskpilot::{
    alert::{Alerts, ConsoleAlerts},
    backend::BackendClient,
    config::BackendConfig,
    files,
    profile::{
        adapters::rest::{RestObjectStorage, RestProfileRepository},
        domain::ImageUpload,
        services::{ProfilePictureWorkflow, UploadOutcome},
    },
    session::{
        adapters::RestIdentityProvider,
        domain::{GuardDecision, Identity},
        services::SessionGuard,
    },
    suggestion::{
        adapters::RestSuggestionClient,
        services::{GenerateOutcome, SuggestionWorkflow},
    },
    task::{
        adapters::rest::{RestSubtaskRepository, RestTaskRepository},
        domain::{
            ParseTaskPriorityError, ParseTaskStatusError, SubtaskId, Task, TaskId, TaskPriority,
            TaskStatus,
        },
        services::{AddOutcome, SubtaskStore, TaskStore},
    },
    telemetry,
};

/// Manage tasks, subtasks, suggestions and the profile picture.
#[derive(Debug, Parser)]
#[command(name = "taskpilot", version)]
struct Cli {
    /// JSON configuration file; `TASKPILOT_*` variables override its values.
    #[arg(long, env = "TASKPILOT_CONFIG")]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the signed-in user.
    Whoami,
    /// End the current session.
    SignOut,
    /// List and change tasks.
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Change the subtasks of a task.
    Subtasks {
        #[command(subcommand)]
        action: SubtaskAction,
    },
    /// Ask for suggested subtasks of a task.
    Suggest {
        /// Task to suggest subtasks for.
        task_id: String,
        /// Save every suggestion as a subtask.
        #[arg(long)]
        save: bool,
    },
    /// Replace the profile picture.
    Avatar {
        /// Image file to upload.
        path: Utf8PathBuf,
        /// MIME type; guessed from the extension when omitted.
        #[arg(long)]
        mime: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum TaskAction {
    /// List tasks, newest first, with their subtasks.
    List,
    /// Add a pending task.
    Add {
        /// Task title.
        title: String,
        /// One of `low`, `medium` or `high`.
        #[arg(long, default_value = "medium", value_parser = parse_priority)]
        priority: TaskPriority,
    },
    /// Set the status of a task.
    Status {
        /// Task to update.
        task_id: String,
        /// One of `pending`, `in-progress` or `done`.
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Delete a task and its subtasks.
    Remove {
        /// Task to delete.
        task_id: String,
    },
}

#[derive(Debug, Subcommand)]
enum SubtaskAction {
    /// Add an incomplete subtask.
    Add {
        /// Parent task.
        task_id: String,
        /// Subtask title.
        title: String,
    },
    /// Flip the completion flag of a subtask.
    Toggle {
        /// Parent task.
        task_id: String,
        /// Subtask to flip.
        subtask_id: String,
    },
    /// Delete a subtask.
    Remove {
        /// Parent task.
        task_id: String,
        /// Subtask to delete.
        subtask_id: String,
    },
}

fn parse_priority(raw: &str) -> Result<TaskPriority, ParseTaskPriorityError> {
    TaskPriority::try_from(raw)
}

fn parse_status(raw: &str) -> Result<TaskStatus, ParseTaskStatusError> {
    TaskStatus::try_from(raw)
}

type Tasks = TaskStore<RestTaskRepository, RestSubtaskRepository, DefaultClock>;
type Suggestions = SuggestionWorkflow<RestSuggestionClient, RestSubtaskRepository>;
type Profile = ProfilePictureWorkflow<RestProfileRepository, RestObjectStorage, DefaultClock>;

/// Services wired to the hosted backend for one signed-in user.
struct App {
    identity: Identity,
    tasks: Tasks,
    suggestions: Suggestions,
    profile: Profile,
}

impl App {
    fn new(client: &BackendClient, config: &BackendConfig, identity: Identity) -> Self {
        let alerts: Arc<dyn Alerts> = Arc::new(ConsoleAlerts);
        let clock = Arc::new(DefaultClock);
        let subtasks = SubtaskStore::new(Arc::new(RestSubtaskRepository::new(client.clone())));
        let tasks = TaskStore::new(
            Arc::new(RestTaskRepository::new(client.clone())),
            subtasks.clone(),
            Arc::clone(&clock),
        );
        let suggestions = SuggestionWorkflow::new(
            Arc::new(RestSuggestionClient::new(
                client.clone(),
                config.suggestion_function.clone(),
            )),
            subtasks,
            tasks.expanded().clone(),
            Arc::clone(&alerts),
        );
        let profile = ProfilePictureWorkflow::new(
            Arc::new(RestProfileRepository::new(client.clone())),
            Arc::new(RestObjectStorage::new(
                client.clone(),
                config.picture_bucket.clone(),
            )),
            clock,
            alerts,
        );
        Self {
            identity,
            tasks,
            suggestions,
            profile,
        }
    }

    async fn load_tasks(&self) -> Result<Vec<Task>> {
        self.tasks
            .load(self.identity.id())
            .await
            .wrap_err("failed to load tasks")?;
        Ok(self.tasks.tasks())
    }

    async fn run_tasks(&self, action: TaskAction) -> Result<()> {
        self.load_tasks().await?;
        match action {
            TaskAction::List => self.print_tasks(),
            TaskAction::Add { title, priority } => match self.tasks.add(&title, priority).await? {
                AddOutcome::Added(task) => say(format_args!("added {}", task.id())),
                AddOutcome::Skipped => say("nothing added: the title is blank"),
            },
            TaskAction::Status { task_id, status } => {
                self.tasks
                    .set_status(&TaskId::new(task_id), status)
                    .await?;
                self.print_tasks()
            }
            TaskAction::Remove { task_id } => {
                let id = TaskId::new(task_id);
                self.tasks.remove(&id).await?;
                self.suggestions.forget(&id);
                say(format_args!("removed {id}"))
            }
        }
    }

    async fn run_subtasks(&self, action: SubtaskAction) -> Result<()> {
        self.load_tasks().await?;
        let store = self.tasks.subtasks();
        match action {
            SubtaskAction::Add { task_id, title } => {
                match store.add(&TaskId::new(task_id), &title).await? {
                    AddOutcome::Added(subtask) => say(format_args!("added {}", subtask.id())),
                    AddOutcome::Skipped => say("nothing added: the title is blank"),
                }
            }
            SubtaskAction::Toggle {
                task_id,
                subtask_id,
            } => {
                let task = TaskId::new(task_id);
                let id = SubtaskId::new(subtask_id);
                let Some(current) = store
                    .subtasks(&task)
                    .into_iter()
                    .find(|subtask| subtask.id() == &id)
                else {
                    bail!("task {task} has no subtask {id}");
                };
                store
                    .toggle_completed(&id, &task, current.completed())
                    .await?;
                self.print_tasks()
            }
            SubtaskAction::Remove {
                task_id,
                subtask_id,
            } => {
                store
                    .remove(&SubtaskId::new(subtask_id), &TaskId::new(task_id))
                    .await?;
                self.print_tasks()
            }
        }
    }

    async fn run_suggest(&self, task_id: String, save: bool) -> Result<()> {
        let tasks = self.load_tasks().await?;
        let id = TaskId::new(task_id);
        let Some(task) = tasks.iter().find(|task| task.id() == &id) else {
            bail!("no task {id}");
        };
        let GenerateOutcome::Staged(titles) = self.suggestions.generate(&id, task.title()).await
        else {
            return Ok(());
        };
        for title in &titles {
            if save {
                self.suggestions.save(&id, title).await?;
                say(format_args!("saved  {title}"))?;
            } else {
                say(format_args!("staged {title}"))?;
            }
        }
        Ok(())
    }

    async fn run_avatar(&self, path: &Utf8Path, mime: Option<String>) -> Result<()> {
        if let Err(err) = self.profile.load(self.identity.id()).await {
            tracing::debug!(error = %err, "uploading without a loaded profile");
        }
        let bytes = files::read_bytes(path).wrap_err_with(|| format!("failed to read {path}"))?;
        let content_type = mime.unwrap_or_else(|| guess_mime(path).to_owned());
        let file_name = path.file_name().unwrap_or(path.as_str());
        let upload = ImageUpload::new(file_name, content_type, bytes);
        match self.profile.upload(self.identity.id(), upload).await {
            UploadOutcome::Uploaded { public_url, .. } => say(public_url),
            UploadOutcome::Rejected => Ok(()),
            UploadOutcome::Failed(err) => Err(eyre!(err)),
        }
    }

    fn print_tasks(&self) -> Result<()> {
        let tasks = self.tasks.tasks();
        if tasks.is_empty() {
            return say("no tasks");
        }
        for task in &tasks {
            say(format_args!(
                "{}  [{}] ({}) {}",
                task.id(),
                task.status().as_str(),
                task.priority().as_str(),
                task.title()
            ))?;
            for subtask in self.tasks.subtasks().subtasks(task.id()) {
                let mark = if subtask.completed() { 'x' } else { ' ' };
                say(format_args!("    [{mark}] {} {}", subtask.id(), subtask.title()))?;
            }
        }
        Ok(())
    }
}

fn guess_mime(path: &Utf8Path) -> &'static str {
    match path.extension().map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn say(line: impl fmt::Display) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}").wrap_err("failed to write to stdout")
}

async fn run(cli: Cli) -> Result<()> {
    let config =
        BackendConfig::load(cli.config.as_deref()).wrap_err("failed to load configuration")?;
    let client = BackendClient::from_config(&config)?;
    let guard = SessionGuard::new(Arc::new(RestIdentityProvider::new(client.clone())));

    let GuardDecision::Proceed(identity) = guard.check().await else {
        return say("not signed in; sign in and set TASKPILOT_ACCESS_TOKEN");
    };

    let app = App::new(&client, &config, identity);
    match cli.command {
        Command::Whoami => say(format_args!(
            "{} {} {}",
            app.identity.id(),
            app.identity.email().unwrap_or("-"),
            app.identity.name().unwrap_or("-")
        )),
        Command::SignOut => {
            guard.sign_out().await;
            say("signed out")
        }
        Command::Tasks { action } => app.run_tasks(action).await,
        Command::Subtasks { action } => app.run_subtasks(action).await,
        Command::Suggest { task_id, save } => app.run_suggest(task_id, save).await,
        Command::Avatar { path, mime } => app.run_avatar(&path, mime).await,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(telemetry::DEFAULT_FILTER);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;
    runtime.block_on(run(cli))
}
