use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    SnapshotNotConfigured,
    SnapshotNotFound,
    SnapshotParseError,
    SnapshotUnreadable,
    InvalidDeadline,
    InvalidWeekday,
    InvalidDate,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::SnapshotNotConfigured => "E1101",
            Self::SnapshotNotFound => "E1102",
            Self::SnapshotParseError => "E1103",
            Self::SnapshotUnreadable => "E1104",
            Self::InvalidDeadline => "E2101",
            Self::InvalidWeekday => "E2102",
            Self::InvalidDate => "E2103",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::SnapshotNotConfigured => "No task snapshot configured",
            Self::SnapshotNotFound => "Task snapshot not found",
            Self::SnapshotParseError => "Task snapshot is not valid JSON",
            Self::SnapshotUnreadable => "Task snapshot could not be read",
            Self::InvalidDeadline => "Invalid task deadline",
            Self::InvalidWeekday => "Invalid recurrence weekday",
            Self::InvalidDate => "Invalid calendar date",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .questlog/config.toml and retry."),
            Self::SnapshotNotConfigured => Some(
                "Pass --snapshot, set QUESTLOG_SNAPSHOT, or add [snapshot] path to .questlog/config.toml.",
            ),
            Self::SnapshotNotFound => Some("Check the snapshot path."),
            Self::SnapshotUnreadable => Some("Check that the snapshot is a regular file you can read."),
            Self::SnapshotParseError => Some("Export the task list again from the task service."),
            Self::InvalidDeadline => Some("Use YYYY-MM-DD or an RFC 3339 timestamp."),
            Self::InvalidWeekday => Some("Use one of: mon, tue, wed, thu, fri, sat, sun."),
            Self::InvalidDate => Some("Use the YYYY-MM-DD date format."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
