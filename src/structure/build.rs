// Mon Oct 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which compilation of the game produced the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildIdentifier {
    Release,
    Beta,
    Debug,
    #[default]
    Unknown,
}

impl BuildIdentifier {
    /// Classifies a free-form build string such as an executable banner or a folder name.
    pub fn from_build_string(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        if lower.contains("debug") {
            BuildIdentifier::Debug
        } else if lower.contains("beta") || lower.contains("preview") {
            BuildIdentifier::Beta
        } else if lower.contains("release") || lower.contains("retail") || lower.contains("final") {
            BuildIdentifier::Release
        } else {
            BuildIdentifier::Unknown
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildIdentifier::Release => "release",
            BuildIdentifier::Beta => "beta",
            BuildIdentifier::Debug => "debug",
            BuildIdentifier::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BuildIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
