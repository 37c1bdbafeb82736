//! Avatar synthesis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for synthesized avatar URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Base URL of the avatar service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl AvatarConfig {
    /// Synthesize an avatar URL for a display name.
    ///
    /// The name is passed through as-is (no percent-encoding), matching the
    /// URLs already persisted for existing accounts.
    pub fn url_for(&self, name: &str) -> String {
        format!(
            "{}?name={}&background=random",
            self.base_url.trim_end_matches('?'),
            name
        )
    }
}

fn default_base_url() -> String {
    "https://ui-avatars.com/api/".to_string()
}
