//! Permission-gated image acquisition.
//!
//! The platform side (permission prompt, picker UI) is reached through
//! [`MediaPlatform`]. Both calls may suspend for as long as the user
//! takes; there is deliberately no timeout.

use crate::error::Result;
use crate::notice::{Notice, Notifier};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A locally stored image selected by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaHandle {
    pub local_uri: String,
}

impl MediaHandle {
    pub fn new(local_uri: impl Into<String>) -> Self {
        Self {
            local_uri: local_uri.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Images,
}

/// Options handed to the platform picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePickerOptions {
    pub media_type: MediaType,
    pub allows_editing: bool,
    pub aspect: (u32, u32),
    pub quality: f32,
}

impl ImagePickerOptions {
    /// Single square image, editable, full quality.
    pub fn single_square_image() -> Self {
        Self {
            media_type: MediaType::Images,
            allows_editing: true,
            aspect: (4, 4),
            quality: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedAsset {
    pub uri: String,
}

/// What the picker returned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionResult {
    pub cancelled: bool,
    pub assets: Vec<PickedAsset>,
}

impl SelectionResult {
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            assets: Vec::new(),
        }
    }

    pub fn picked(uri: impl Into<String>) -> Self {
        Self {
            cancelled: false,
            assets: vec![PickedAsset { uri: uri.into() }],
        }
    }
}

/// Device permission and media picker APIs.
#[async_trait]
pub trait MediaPlatform: Send + Sync {
    async fn request_media_permission(&self) -> Result<PermissionStatus>;

    async fn select_image(&self, options: &ImagePickerOptions) -> Result<SelectionResult>;
}

/// Progress of one acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquisitionState {
    Idle,
    PermissionRequested,
    Granted,
    Denied,
    Selecting,
    Selected,
    Cancelled,
}

/// Runs the permission → picker flow and yields the chosen image.
pub struct MediaAcquirer {
    platform: Arc<dyn MediaPlatform>,
    notifier: Arc<dyn Notifier>,
    options: ImagePickerOptions,
    state: AcquisitionState,
}

impl MediaAcquirer {
    pub fn new(platform: Arc<dyn MediaPlatform>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            platform,
            notifier,
            options: ImagePickerOptions::single_square_image(),
            state: AcquisitionState::Idle,
        }
    }

    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    /// Asks for permission, then lets the user pick one image.
    ///
    /// Returns `Ok(None)` when permission is denied (after a
    /// [`Notice::PermissionDenied`]) or when the user cancels the picker
    /// (silently). `Err` is reserved for platform failures.
    pub async fn acquire(&mut self) -> Result<Option<MediaHandle>> {
        self.state = AcquisitionState::PermissionRequested;
        let permission = match self.platform.request_media_permission().await {
            Ok(permission) => permission,
            Err(e) => {
                self.state = AcquisitionState::Idle;
                return Err(e);
            }
        };

        if permission == PermissionStatus::Denied {
            self.state = AcquisitionState::Denied;
            tracing::warn!("[MediaAcquirer] Media library permission denied");
            self.notifier.notify(Notice::PermissionDenied);
            return Ok(None);
        }

        self.state = AcquisitionState::Granted;
        tracing::debug!("[MediaAcquirer] Permission granted, opening picker");

        self.state = AcquisitionState::Selecting;
        let selection = match self.platform.select_image(&self.options).await {
            Ok(selection) => selection,
            Err(e) => {
                self.state = AcquisitionState::Idle;
                return Err(e);
            }
        };

        match selection.assets.into_iter().next() {
            Some(asset) if !selection.cancelled => {
                self.state = AcquisitionState::Selected;
                tracing::debug!("[MediaAcquirer] Selected {}", asset.uri);
                Ok(Some(MediaHandle::new(asset.uri)))
            }
            _ => {
                self.state = AcquisitionState::Cancelled;
                tracing::debug!("[MediaAcquirer] Selection cancelled");
                Ok(None)
            }
        }
    }
}
