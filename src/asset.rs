//! Bird image asset handle
//!
//! Loading is asynchronous and best-effort. The host reports the outcome;
//! the renderer polls [`AssetHandle::status`] every frame and draws the
//! fallback circle unless the image is ready. Failures are never retried.

use serde::{Deserialize, Serialize};

/// Load state as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// No outcome yet (or no source configured)
    #[default]
    Pending,
    Ready,
    Failed,
}

/// The bird image: where it comes from and how loading went
#[derive(Debug, Clone, Default)]
pub struct AssetHandle {
    source: Option<String>,
    status: AssetStatus,
    failure: Option<String>,
}

impl AssetHandle {
    pub fn new(source: Option<String>) -> Self {
        Self {
            source,
            status: AssetStatus::Pending,
            failure: None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn status(&self) -> AssetStatus {
        self.status
    }

    /// Whether the renderer may draw the image
    pub fn is_available(&self) -> bool {
        self.status == AssetStatus::Ready
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Host callback: image decoded
    pub fn mark_ready(&mut self) {
        if self.status == AssetStatus::Pending {
            log::info!("Bird image loaded: {}", self.source.as_deref().unwrap_or("<none>"));
            self.status = AssetStatus::Ready;
        }
    }

    /// Host callback: image failed. Only a pending load can fail.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        if self.status == AssetStatus::Pending {
            let reason = reason.into();
            log::warn!(
                "Bird image failed to load ({}), using fallback: {}",
                self.source.as_deref().unwrap_or("<none>"),
                reason
            );
            self.failure = Some(reason);
            self.status = AssetStatus::Failed;
        }
    }
}
