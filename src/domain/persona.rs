//! The three demo personas and their display metadata.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three canned demo datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Researcher,
    Consultant,
    Creator,
}

/// Display metadata shown on the persona picker.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PersonaMeta {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub blurb: &'static str,
    pub helper: &'static str,
}

impl Persona {
    /// All personas in picker order.
    pub const ALL: [Persona; 3] = [Self::Researcher, Self::Consultant, Self::Creator];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Researcher => "researcher",
            Self::Consultant => "consultant",
            Self::Creator => "creator",
        }
    }

    pub fn meta(&self) -> PersonaMeta {
        match self {
            Self::Researcher => PersonaMeta {
                key: self.key(),
                label: "Researcher",
                icon: "🔬",
                blurb: "Explore penguins in Chile: field notes, drone counts, grants.",
                helper: "Try 'drone' to get started.",
            },
            Self::Consultant => PersonaMeta {
                key: self.key(),
                label: "Consultant",
                icon: "🌍",
                blurb: "Expand beyond the US: markets, legal, payroll.",
                helper: "Try 'subsidiary' or 'EOR'.",
            },
            Self::Creator => PersonaMeta {
                key: self.key(),
                label: "Creator",
                icon: "🎥",
                blurb: "Northern Australia series: scripts, wildlife, gear.",
                helper: "Try 'reef' or 'crocodile'.",
            },
        }
    }

    /// File name of the persona's dataset (`dataset_<key>.json`).
    pub fn dataset_file(&self) -> String {
        format!("dataset_{}.json", self.key())
    }
}

impl FromStr for Persona {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "researcher" => Ok(Self::Researcher),
            "consultant" => Ok(Self::Consultant),
            "creator" => Ok(Self::Creator),
            _ => Err(ValidationError::UnknownPersona(s.to_string())),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
