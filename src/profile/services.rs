//! Profile picture upload workflow.

use crate::alert::Alerts;
use crate::profile::{
    domain::{ImageUpload, ObjectPath, ProfileUpdate, UserProfile},
    ports::{ObjectStorage, ProfileRepository, ProfileRepositoryError, StorageError},
};
use crate::session::domain::UserId;
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Alert raised when the chosen file is not an image.
pub const NOT_AN_IMAGE_MESSAGE: &str = "Please select an image file";
/// Alert raised after a successful upload.
pub const UPLOAD_SUCCEEDED_MESSAGE: &str = "Profile picture uploaded successfully!";
/// Alert raised when any upload step fails.
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload profile picture. Please try again.";

/// Errors from the upload steps after validation.
#[derive(Debug, Error)]
pub enum ProfileWorkflowError {
    /// Storing the new object failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Reading or writing the profile row failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
}

/// Result type for profile workflow operations.
pub type ProfileWorkflowResult<T> = Result<T, ProfileWorkflowError>;

/// Result of [`ProfilePictureWorkflow::upload`].
#[derive(Debug)]
pub enum UploadOutcome {
    /// The file was not an image; nothing was sent.
    Rejected,
    /// The new picture is stored and referenced by the profile.
    Uploaded {
        /// Public URL now held by the profile.
        public_url: String,
        /// Whether the previous object was deleted, or `None` when there was
        /// no previous picture.
        previous_removed: Option<bool>,
    },
    /// A step failed; the held profile is unchanged.
    Failed(ProfileWorkflowError),
}

#[derive(Debug, Default)]
struct ProfileState {
    profile: Option<UserProfile>,
    picture_url: Option<String>,
    uploads_in_flight: usize,
}

/// Counts one upload in flight for as long as it lives.
struct UploadingFlag<'a> {
    state: &'a RwLock<ProfileState>,
}

impl<'a> UploadingFlag<'a> {
    fn raise(state: &'a RwLock<ProfileState>) -> Self {
        state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .uploads_in_flight += 1;
        Self { state }
    }
}

impl Drop for UploadingFlag<'_> {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.uploads_in_flight = state.uploads_in_flight.saturating_sub(1);
    }
}

/// Loads the user's profile and replaces its picture.
pub struct ProfilePictureWorkflow<R, O, C>
where
    R: ProfileRepository,
    O: ObjectStorage,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    storage: Arc<O>,
    clock: Arc<C>,
    alerts: Arc<dyn Alerts>,
    state: Arc<RwLock<ProfileState>>,
}

impl<R, O, C> Clone for ProfilePictureWorkflow<R, O, C>
where
    R: ProfileRepository,
    O: ObjectStorage,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            storage: Arc::clone(&self.storage),
            clock: Arc::clone(&self.clock),
            alerts: Arc::clone(&self.alerts),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R, O, C> ProfilePictureWorkflow<R, O, C>
where
    R: ProfileRepository,
    O: ObjectStorage,
    C: Clock + Send + Sync,
{
    /// Creates a workflow with no profile loaded.
    #[must_use]
    pub fn new(repository: Arc<R>, storage: Arc<O>, clock: Arc<C>, alerts: Arc<dyn Alerts>) -> Self {
        Self {
            repository,
            storage,
            clock,
            alerts,
            state: Arc::new(RwLock::new(ProfileState::default())),
        }
    }

    /// Fetches the profile of `user_id`.
    ///
    /// When the user has no profile row the held state is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileWorkflowError::Repository`] when the fetch fails; the
    /// held profile is kept.
    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn load(&self, user_id: &UserId) -> ProfileWorkflowResult<()> {
        let found = self
            .repository
            .find_by_user(user_id)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to load profile"))?;
        let Some(profile) = found else {
            tracing::debug!("no profile row");
            return Ok(());
        };
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.picture_url = profile.profile_picture_url().map(str::to_owned);
        state.profile = Some(profile);
        Ok(())
    }

    /// Replaces the user's profile picture.
    ///
    /// Non-images are rejected before any request. Otherwise the previous
    /// object is deleted on a best-effort basis, the new object is stored
    /// under a per-user timestamped path, and the profile row is upserted
    /// with its public URL. Every outcome is reported to the user through an
    /// alert.
    #[tracing::instrument(skip_all, fields(user_id = %user_id, file = image.file_name()))]
    pub async fn upload(&self, user_id: &UserId, image: ImageUpload) -> UploadOutcome {
        if let Err(err) = image.ensure_image() {
            tracing::info!(error = %err, "rejected upload");
            self.alerts.alert(NOT_AN_IMAGE_MESSAGE);
            return UploadOutcome::Rejected;
        }

        let _flag = UploadingFlag::raise(&self.state);
        match self.replace_picture(user_id, image).await {
            Ok(outcome) => {
                self.alerts.alert(UPLOAD_SUCCEEDED_MESSAGE);
                outcome
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile picture upload failed");
                self.alerts.alert(UPLOAD_FAILED_MESSAGE);
                UploadOutcome::Failed(err)
            }
        }
    }

    async fn replace_picture(
        &self,
        user_id: &UserId,
        image: ImageUpload,
    ) -> ProfileWorkflowResult<UploadOutcome> {
        let previous_removed = match self.picture_url() {
            Some(previous) => Some(self.remove_previous(&previous).await),
            None => None,
        };

        let now = self.clock.utc();
        let path = ObjectPath::for_upload(user_id, now, image.extension());
        let content_type = image.content_type().to_owned();
        self.storage
            .upload(&path, &content_type, image.into_bytes())
            .await?;
        tracing::debug!(%path, "object stored");

        let public_url = self.storage.public_url(&path);
        self.repository
            .upsert(&ProfileUpdate::new(user_id.clone(), public_url.clone(), now))
            .await?;
        tracing::info!(%path, "profile picture replaced");

        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .picture_url = Some(public_url.clone());
        if let Err(err) = self.load(user_id).await {
            tracing::debug!(error = %err, "keeping stale profile after upload");
        }
        Ok(UploadOutcome::Uploaded {
            public_url,
            previous_removed,
        })
    }

    /// Deletes the object behind `url`. Failures are logged, never raised.
    async fn remove_previous(&self, url: &str) -> bool {
        let path = match ObjectPath::from_public_url(url) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(error = %err, "cannot locate previous picture");
                return false;
            }
        };
        match self.storage.remove(&path).await {
            Ok(()) => {
                tracing::debug!(%path, "previous picture removed");
                true
            }
            Err(err) => {
                tracing::warn!(%path, error = %err, "failed to remove previous picture");
                false
            }
        }
    }

    /// Public URL of the current picture.
    #[must_use]
    pub fn picture_url(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .picture_url
            .clone()
    }

    /// Returns `true` while any upload is in progress.
    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .uploads_in_flight
            > 0
    }

    /// The loaded profile row.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .profile
            .clone()
    }
}
