use serde::{Deserialize, Serialize};

/// Feature name that enables comment commands for a repository.
pub const COMMENTS_FEATURE: &str = "comments";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Named canned reply posted by the `message:` command.
pub struct CannedMessage {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Per-repository command policy, already loaded by the caller.
pub struct RepoCommandPolicy {
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub maintainers: Vec<String>,
    /// Alias for `maintainers`, consulted only when `maintainers` is empty.
    #[serde(default)]
    pub curators: Vec<String>,
    #[serde(default)]
    pub messages: Vec<CannedMessage>,
}

impl RepoCommandPolicy {
    pub fn feature_enabled(&self, feature: &str) -> bool {
        self.features
            .iter()
            .any(|enabled| enabled.eq_ignore_ascii_case(feature))
    }

    pub fn effective_maintainers(&self) -> &[String] {
        if self.maintainers.is_empty() {
            &self.curators
        } else {
            &self.maintainers
        }
    }

    pub fn is_maintainer(&self, login: &str) -> bool {
        self.effective_maintainers()
            .iter()
            .any(|maintainer| maintainer.eq_ignore_ascii_case(login))
    }

    /// True when `feature` is enabled and `login` is a maintainer.
    pub fn permits_user(&self, feature: &str, login: &str) -> bool {
        self.feature_enabled(feature) && self.is_maintainer(login)
    }

    /// Looks up a canned message by exact name.
    pub fn message_body(&self, name: &str) -> Option<&str> {
        self.messages
            .iter()
            .find(|message| message.name == name)
            .map(|message| message.value.as_str())
    }
}
