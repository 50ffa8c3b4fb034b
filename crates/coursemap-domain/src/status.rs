//! Status module - declared and effective course statuses

use std::fmt;

/// Status the student declared for a course
///
/// Stored externally as a map from course id to status. A course with no
/// entry is `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Not attempted yet
    #[default]
    NotStarted,

    /// Completed successfully
    Passed,

    /// Attempted and failed
    Failed,
}

impl Status {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not_started",
            Status::Passed => "passed",
            Status::Failed => "failed",
        }
    }

    /// Parse a status from a string
    ///
    /// Accepts the storage form (`not_started`), the hyphenated form and the
    /// display label (`Not Started`), case-insensitively. `blocked` is not a
    /// status a student can declare and is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "not_started" | "notstarted" => Some(Status::NotStarted),
            "passed" => Some(Status::Passed),
            "failed" => Some(Status::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid status: {}", s))
    }
}

/// Displayed status of a course after ancestor failures are applied
///
/// Derived from the declared statuses and the prerequisite graph, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EffectiveStatus {
    /// Not attempted yet
    #[default]
    NotStarted,

    /// Completed successfully
    Passed,

    /// Attempted and failed
    Failed,

    /// A prerequisite is failed or itself blocked
    Blocked,
}

impl EffectiveStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveStatus::NotStarted => "not_started",
            EffectiveStatus::Passed => "passed",
            EffectiveStatus::Failed => "failed",
            EffectiveStatus::Blocked => "blocked",
        }
    }

    /// Human-readable label, as shown in the roadmap legend
    pub fn label(&self) -> &'static str {
        match self {
            EffectiveStatus::NotStarted => "Not Started",
            EffectiveStatus::Passed => "Passed",
            EffectiveStatus::Failed => "Failed",
            EffectiveStatus::Blocked => "Blocked",
        }
    }

    /// Parse an effective status from a string
    pub fn parse(s: &str) -> Option<Self> {
        if normalize(s) == "blocked" {
            return Some(EffectiveStatus::Blocked);
        }
        Status::parse(s).map(Into::into)
    }

    /// Whether this status blocks every course that depends on it
    pub fn blocks_dependents(&self) -> bool {
        matches!(self, EffectiveStatus::Failed | EffectiveStatus::Blocked)
    }
}

impl From<Status> for EffectiveStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::NotStarted => EffectiveStatus::NotStarted,
            Status::Passed => EffectiveStatus::Passed,
            Status::Failed => EffectiveStatus::Failed,
        }
    }
}

impl fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EffectiveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid effective status: {}", s))
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}
