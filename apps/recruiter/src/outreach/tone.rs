#![allow(dead_code)]

//! Tone selection for outreach drafts.
//!
//! The backend understands exactly two tones. Anything else is rejected here
//! and never reaches the wire.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::WorkflowError;

/// Writing register requested for a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Friendly,
    Professional,
}

impl Tone {
    pub const ALL: [Tone; 2] = [Tone::Friendly, Tone::Professional];

    /// Wire value sent to the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Friendly => "friendly",
            Tone::Professional => "professional",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tone::Friendly => "Friendly",
            Tone::Professional => "Professional",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tone::Friendly => "Casual first-name greeting, highlights the candidate's skills",
            Tone::Professional => "Formal greeting and sign-off, neutral phrasing",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = WorkflowError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                WorkflowError::validation(format!(
                    "unknown tone '{wanted}', expected one of: friendly, professional"
                ))
            })
    }
}
