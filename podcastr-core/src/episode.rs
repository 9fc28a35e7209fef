use crate::error::{PodcastrError, Result};
use crate::time::format_time;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable podcast episode.
///
/// Episodes are supplied from outside the player and never change once
/// queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Stable key from the catalog (may be empty for ad-hoc episodes)
    #[serde(default)]
    pub id: String,
    /// Episode title
    pub title: String,
    /// Credited contributors
    pub members: String,
    /// Artwork URI
    pub thumbnail: String,
    /// Length in whole seconds
    pub duration: u64,
    /// Display text for `duration`, always `format_time(duration)`
    pub duration_as_string: String,
    /// URI of the playable media
    pub url: String,
}

impl Episode {
    /// Create a new episode, computing its display duration
    pub fn new(
        title: impl Into<String>,
        members: impl Into<String>,
        thumbnail: impl Into<String>,
        duration: u64,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            members: members.into(),
            thumbnail: thumbnail.into(),
            duration,
            duration_as_string: format_time(duration),
            url: url.into(),
        }
    }

    /// Attach a catalog id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Episode length as a [`Duration`]
    #[must_use]
    pub const fn length(&self) -> Duration {
        Duration::from_secs(self.duration)
    }

    /// Check that the stored display duration still matches `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`PodcastrError::InconsistentDuration`] when `duration_as_string`
    /// was supplied out of sync with `duration`.
    pub fn validate(&self) -> Result<()> {
        let expected = format_time(self.duration);
        if self.duration_as_string == expected {
            Ok(())
        } else {
            Err(PodcastrError::InconsistentDuration {
                duration: self.duration,
                found: self.duration_as_string.clone(),
                expected,
            })
        }
    }
}
