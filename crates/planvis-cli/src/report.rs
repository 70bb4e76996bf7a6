//! Notice collection and reporting for CLI output
//!
//! The CLI observer forwards every layout notice to `tracing` as it happens and keeps
//! a copy, so commands can summarise them and decide the exit code.
//!
//! ## Exit Code Semantics
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success: plot produced (notices allowed) |
//! | 1 | Failure: an error occurred, or warnings were emitted under `--strict` |

use serde::Serialize;

use planvis_core::{LayoutNotice, LayoutObserver, TracingObserver};

// ============================================================================
// Exit Code
// ============================================================================

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
}

impl ExitCode {
    /// Warnings only fail the run in strict mode
    pub fn from_warnings(warnings: usize, strict: bool) -> Self {
        if strict && warnings > 0 {
            ExitCode::Failure
        } else {
            ExitCode::Success
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

// ============================================================================
// Observer
// ============================================================================

/// Logs notices through `tracing` and keeps them for the summary
#[derive(Debug, Default)]
pub struct CliObserver {
    notices: Vec<LayoutNotice>,
}

impl CliObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[LayoutNotice] {
        &self.notices
    }

    pub fn warning_count(&self) -> usize {
        self.notices.iter().filter(|n| n.is_warning()).count()
    }

    /// Notices as serialisable records
    pub fn records(&self) -> Vec<NoticeRecord> {
        self.notices.iter().map(NoticeRecord::from).collect()
    }
}

impl LayoutObserver for CliObserver {
    fn notice(&mut self, notice: LayoutNotice) {
        TracingObserver.notice(notice.clone());
        self.notices.push(notice);
    }
}

/// A notice in JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeRecord {
    pub severity: &'static str,
    pub message: String,
}

impl From<&LayoutNotice> for NoticeRecord {
    fn from(notice: &LayoutNotice) -> Self {
        Self {
            severity: if notice.is_warning() { "warning" } else { "info" },
            message: notice.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn strict_mode_escalates_warnings() {
        assert_eq!(ExitCode::from_warnings(0, true), ExitCode::Success);
        assert_eq!(ExitCode::from_warnings(2, false), ExitCode::Success);
        assert_eq!(ExitCode::from_warnings(1, true), ExitCode::Failure);
        assert_eq!(ExitCode::Failure.code(), 1);
    }

    #[test]
    fn observer_counts_warnings() {
        let mut observer = CliObserver::new();
        observer.notice(LayoutNotice::DateRangeDerived {
            min_start: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            max_end: NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
        });
        observer.notice(LayoutNotice::StyleFallback {
            requested: "today_line".into(),
        });

        assert_eq!(observer.notices().len(), 2);
        assert_eq!(observer.warning_count(), 1);
        let records = observer.records();
        assert_eq!(records[0].severity, "info");
        assert_eq!(records[1].severity, "warning");
        assert!(records[1].message.contains("today_line"));
    }
}
