//! Remote API configuration.

use crate::reference::ResourceKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// What to send for the `image` part when no image was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyMediaPolicy {
    /// Send an empty text part named `image`.
    #[default]
    EmptyText,
    /// Leave the part out entirely.
    Omit,
}

/// Endpoint paths relative to the base url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub bulletins: String,
    pub faculties: String,
    pub semesters: String,
    pub criteria: String,
    pub activities: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            bulletins: "/bulletins/".to_string(),
            faculties: "/faculties/".to_string(),
            semesters: "/semesters/".to_string(),
            criteria: "/criterions/".to_string(),
            activities: "/activities/".to_string(),
        }
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub empty_media: EmptyMediaPolicy,
    pub endpoints: EndpointPaths,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            empty_media: EmptyMediaPolicy::default(),
            endpoints: EndpointPaths::default(),
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Absolute url of a reference collection.
    pub fn resource_url(&self, kind: ResourceKind) -> String {
        let path = match kind {
            ResourceKind::Bulletins => &self.endpoints.bulletins,
            ResourceKind::Faculties => &self.endpoints.faculties,
            ResourceKind::Semesters => &self.endpoints.semesters,
            ResourceKind::Criteria => &self.endpoints.criteria,
        };
        self.join(path)
    }

    /// Absolute url of the activity-creation endpoint.
    pub fn activities_url(&self) -> String {
        self.join(&self.endpoints.activities)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let config = ApiConfig::default().with_base_url("https://campus.example/api/");

        assert_eq!(
            config.resource_url(ResourceKind::Criteria),
            "https://campus.example/api/criterions/"
        );
        assert_eq!(config.activities_url(), "https://campus.example/api/activities/");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ApiConfig = toml::from_str(
            r#"
            base_url = "https://campus.example"
            empty_media = "omit"

            [endpoints]
            faculties = "/faculty/"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.empty_media, EmptyMediaPolicy::Omit);
        assert_eq!(config.endpoints.faculties, "/faculty/");
        assert_eq!(config.endpoints.bulletins, "/bulletins/");
    }

    #[test]
    fn missing_image_is_sent_empty_by_default() {
        assert_eq!(ApiConfig::default().empty_media, EmptyMediaPolicy::EmptyText);
        let config: ApiConfig = toml::from_str("").unwrap();
        assert_eq!(config.empty_media, EmptyMediaPolicy::EmptyText);
    }
}
