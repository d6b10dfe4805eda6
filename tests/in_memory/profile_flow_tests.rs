//! In-memory integration tests for profile pictures.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;
use taskpilot::{
    alert::RecordingAlerts,
    profile::{
        adapters::memory::{InMemoryObjectStorage, InMemoryProfileRepository},
        domain::ImageUpload,
        services::{ProfilePictureWorkflow, UploadOutcome},
    },
    session::domain::UserId,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_workflow_sees_the_uploaded_picture() -> Result<(), eyre::Report> {
    let profiles = InMemoryProfileRepository::new();
    let storage = InMemoryObjectStorage::new("https://cdn.example.co/profile-pictures");
    let user = UserId::new("user-1");
    let uploader = ProfilePictureWorkflow::new(
        Arc::new(profiles.clone()),
        Arc::new(storage.clone()),
        Arc::new(DefaultClock),
        Arc::new(RecordingAlerts::new()),
    );

    let outcome = uploader
        .upload(&user, ImageUpload::new("me.webp", "image/webp", vec![1, 2, 3]))
        .await;
    let UploadOutcome::Uploaded { public_url, .. } = outcome else {
        return Err(eyre::eyre!("upload failed"));
    };

    let viewer = ProfilePictureWorkflow::new(
        Arc::new(profiles),
        Arc::new(storage),
        Arc::new(DefaultClock),
        Arc::new(RecordingAlerts::new()),
    );
    viewer.load(&user).await?;

    eyre::ensure!(
        viewer.picture_url().as_deref() == Some(public_url.as_str()),
        "viewer sees {:?}",
        viewer.picture_url()
    );
    eyre::ensure!(public_url.ends_with(".webp"), "extension lost: {public_url}");
    eyre::ensure!(
        viewer
            .profile()
            .is_some_and(|profile| profile.user_id() == &user),
        "profile owner mismatch"
    );
    Ok(())
}
