//! Threshold issue tiers and notification outcome statuses.

use serde::Serialize;

/// Which threshold a notification concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    /// Contacts reached `warning_at` but are still below `contacts_limit`.
    Warning,
    /// Contacts reached `contacts_limit`.
    Limit,
}

impl IssueType {
    /// The string stored in `notification_log.issue_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Warning => "warning",
            IssueType::Limit => "limit",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Failed,
}

impl NotificationStatus {
    /// The string stored in `notification_log.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationStatus::Sent => "sent",
            NotificationStatus::Failed => "failed",
        }
    }
}

/// Contact count at which a limit overshoot escalates to the engineer group.
///
/// The boundary is `ceil(contacts_limit * 1.1)`: a fixture 10% or more past
/// its limit CCs the plant's engineers in addition to its technicians.
/// Computed in integer arithmetic to keep the boundary exact.
pub fn critical_overshoot_floor(contacts_limit: i64) -> i64 {
    // Equivalent to `(contacts_limit * 11).div_ceil(10)`, but signed
    // `i64::div_ceil` is still unstable (`int_roundings`). This reproduces its
    // exact round-toward-positive-infinity semantics in stable arithmetic.
    let numerator = contacts_limit * 11;
    let quotient = numerator / 10;
    let remainder = numerator % 10;
    if remainder > 0 {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overshoot_floor_is_exact_at_round_limits() {
        // limit 100 -> 110: contacts 109 stays technician-only, 110 escalates.
        assert_eq!(critical_overshoot_floor(100), 110);
        assert_eq!(critical_overshoot_floor(1000), 1100);
    }

    #[test]
    fn overshoot_floor_rounds_up_on_fractional_limits() {
        // 55 * 1.1 = 60.5 -> 61
        assert_eq!(critical_overshoot_floor(55), 61);
        // 1 * 1.1 = 1.1 -> 2
        assert_eq!(critical_overshoot_floor(1), 2);
    }

    #[test]
    fn issue_type_db_strings_are_stable() {
        assert_eq!(IssueType::Warning.as_str(), "warning");
        assert_eq!(IssueType::Limit.as_str(), "limit");
        assert_eq!(NotificationStatus::Sent.as_str(), "sent");
        assert_eq!(NotificationStatus::Failed.as_str(), "failed");
    }
}
