//! Composition root for the create-activity screen.

use crate::form_session::{ActivityFormSession, SessionDependencies};
use campus_core::config::ApiConfig;
use campus_core::error::Result;
use campus_core::media::MediaPlatform;
use campus_core::notice::Notifier;
use campus_core::submission::CredentialStore;
use campus_infrastructure::{ApiClient, ConfigLoader, JsonSessionStore};
use std::sync::Arc;

/// Mounts a session backed by the HTTP client for `config`.
///
/// The same client serves both the reference collections and the
/// activity endpoint.
pub fn mount_activity_form(
    config: ApiConfig,
    credentials: Arc<dyn CredentialStore>,
    media_platform: Arc<dyn MediaPlatform>,
    notifier: Arc<dyn Notifier>,
) -> Result<ActivityFormSession<ApiClient>> {
    let empty_media = config.empty_media;
    tracing::info!("[Bootstrap] Using API at {}", config.base_url);

    let client = Arc::new(ApiClient::new(config)?);
    Ok(ActivityFormSession::mount(SessionDependencies {
        source: client.clone(),
        media_platform,
        credentials,
        endpoint: client,
        notifier,
        empty_media,
    }))
}

/// Mounts a session from the user config file and the persisted session token.
pub fn mount_from_user_config(
    media_platform: Arc<dyn MediaPlatform>,
    notifier: Arc<dyn Notifier>,
) -> Result<ActivityFormSession<ApiClient>> {
    let config = ConfigLoader::new()?.load()?;
    let credentials = Arc::new(JsonSessionStore::new()?);
    mount_activity_form(config, credentials, media_platform, notifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference_options::OptionsState;
    use async_trait::async_trait;
    use campus_core::media::{ImagePickerOptions, PermissionStatus, SelectionResult};
    use campus_core::notice::TracingNotifier;
    use campus_core::reference::ResourceKind;
    use campus_infrastructure::InMemorySessionStore;

    struct CancellingPlatform;

    #[async_trait]
    impl MediaPlatform for CancellingPlatform {
        async fn request_media_permission(&self) -> Result<PermissionStatus> {
            Ok(PermissionStatus::Granted)
        }

        async fn select_image(&self, _options: &ImagePickerOptions) -> Result<SelectionResult> {
            Ok(SelectionResult::cancelled())
        }
    }

    #[tokio::test]
    async fn mounted_session_has_pending_options_and_default_form() {
        let session = mount_activity_form(
            ApiConfig::default(),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(CancellingPlatform),
            Arc::new(TracingNotifier),
        )
        .unwrap();

        for kind in [
            ResourceKind::Bulletins,
            ResourceKind::Faculties,
            ResourceKind::Semesters,
            ResourceKind::Criteria,
        ] {
            assert_eq!(session.options_state(kind).await, OptionsState::Loading);
        }
        assert!(session.form_snapshot().await.image().is_none());
        assert!(!session.is_submitting());
    }
}
