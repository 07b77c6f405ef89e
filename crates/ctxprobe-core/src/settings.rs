//! Invocation settings with HOME-derived defaults.
//!
//! Settings are an explicit object passed per call, never ambient process
//! state. Hosts load them once at startup, mutate them on user edits, and
//! persist them on change; this crate only defines the shape and defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::command::Model;

/// System PATH used when no HOME-derived augmentation applies.
const BASE_SEARCH_PATH: &str = "/usr/local/bin:/usr/bin:/bin:/usr/sbin:/sbin";

/// Everything needed to build and execute one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path or bare name of the claude binary.
    pub claude_path: String,

    /// PATH value exported to the spawned shell.
    pub search_path: String,

    /// Model tier requested on every call.
    pub model: Model,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            claude_path: default_claude_path(),
            search_path: default_search_path(),
            model: Model::default(),
        }
    }
}

impl Settings {
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }
}

/// Pick a plausible install location for the claude binary.
///
/// Checks common per-user install directories and falls back to the bare
/// name so PATH resolution gets the final say.
pub fn default_claude_path() -> String {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            let candidates = [
                format!("{home}/.bun/bin/claude"),
                format!("{home}/.local/bin/claude"),
                "/usr/local/bin/claude".to_string(),
            ];
            for candidate in candidates {
                if Path::new(&candidate).is_file() {
                    return candidate;
                }
            }
        }
    }
    "claude".to_string()
}

/// PATH augmentation covering per-user and Homebrew install locations on
/// top of the system default.
pub fn default_search_path() -> String {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => {
            format!("{home}/.bun/bin:/opt/homebrew/bin:/opt/homebrew/sbin:{BASE_SEARCH_PATH}")
        }
        _ => BASE_SEARCH_PATH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_search_path_keeps_the_system_directories() {
        let path = default_search_path();
        assert!(path.contains("/usr/bin"));
        assert!(path.contains("/bin"));
    }

    #[test]
    fn default_claude_path_is_never_empty() {
        assert!(!default_claude_path().is_empty());
    }

    #[test]
    fn settings_default_uses_sonnet() {
        let settings = Settings::default();
        assert_eq!(settings.model, Model::Sonnet);
        assert!(!settings.search_path.is_empty());
    }

    #[test]
    fn with_model_overrides_the_tier() {
        let settings = Settings::default().with_model(Model::Opus);
        assert_eq!(settings.model, Model::Opus);
    }
}
