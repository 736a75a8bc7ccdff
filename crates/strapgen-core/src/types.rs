use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// What a single run generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    GlobalPolicy,
    ApiPolicy,
    Lifecycle,
    Route,
}

impl Mode {
    pub fn all() -> &'static [Mode] {
        &[
            Mode::GlobalPolicy,
            Mode::ApiPolicy,
            Mode::Lifecycle,
            Mode::Route,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::GlobalPolicy => "global-policy",
            Mode::ApiPolicy => "api-policy",
            Mode::Lifecycle => "lifecycle",
            Mode::Route => "route",
        }
    }

    /// Short tag accepted by `--select`.
    pub fn tag(self) -> &'static str {
        match self {
            Mode::GlobalPolicy => "gp",
            Mode::ApiPolicy => "p",
            Mode::Lifecycle => "l",
            Mode::Route => "r",
        }
    }

    /// Label shown in the interactive prompt.
    pub fn label(self) -> &'static str {
        match self {
            Mode::GlobalPolicy => "global policy",
            Mode::ApiPolicy => "api policy",
            Mode::Lifecycle => "lifecycle",
            Mode::Route => "route",
        }
    }

    pub fn is_policy(self) -> bool {
        matches!(self, Mode::GlobalPolicy | Mode::ApiPolicy)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = crate::error::GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(crate::error::GenError::MissingMode),
            "gp" | "global-policy" | "global policy" => Ok(Mode::GlobalPolicy),
            "p" | "api-policy" | "api policy" => Ok(Mode::ApiPolicy),
            "l" | "lifecycle" => Ok(Mode::Lifecycle),
            "r" | "route" => Ok(Mode::Route),
            other => Err(crate::error::GenError::InvalidMode(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

/// Actions of a core router that can carry a policy list.
pub const CORE_ROUTES: &[&str] = &["create", "find", "findOne", "update", "delete"];

/// Content-type lifecycle hooks, in prompt order.
pub const LIFECYCLE_EVENTS: &[&str] = &[
    "beforeCreate",
    "beforeCreateMany",
    "afterCreate",
    "afterCreateMany",
    "beforeUpdate",
    "beforeUpdateMany",
    "afterUpdate",
    "afterUpdateMany",
    "beforeDelete",
    "beforeDeleteMany",
    "afterDelete",
    "afterDeleteMany",
    "beforeCount",
    "afterCount",
    "beforeFindOne",
    "afterFindOne",
    "beforeFindMany",
    "afterFindMany",
];
