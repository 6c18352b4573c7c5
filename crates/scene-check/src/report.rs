//! Findings and the append-only report log.
//!
//! The report is the sole output surface of the validators. It is passed
//! into each check explicitly so the engine stays independent of any UI;
//! a front end renders it as text or JSON after the run.

use serde::Serialize;

/// Which validator produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Scale,
    UvWinding,
    Pivot,
    VertexOverlap,
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CheckKind::Scale => "scale",
            CheckKind::UvWinding => "uv-winding",
            CheckKind::Pivot => "pivot",
            CheckKind::VertexOverlap => "vertex-overlap",
        };
        f.write_str(name)
    }
}

/// Outcome of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The object passed the check.
    Ok,
    /// The object failed the check (possibly auto-corrected).
    Violation,
    /// Nothing was checked: empty selection, or a no-op toggle combination.
    Notice,
}

/// One line of the report.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// The object the finding is about; absent for selection-level notices.
    pub object: Option<String>,
    /// The validator that produced the finding; absent for run-level notices.
    pub kind: Option<CheckKind>,
    pub status: Status,
    pub message: String,
}

/// One entry of the report log: a finding, or a separator between runs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "entry")]
pub enum ReportEntry {
    Separator,
    Finding(Finding),
}

/// Append-only log of findings, with separator lines between runs.
///
/// Lives for the whole session; everything else a check touches is
/// discarded when the check returns.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

/// The textual separator line between accumulated runs.
pub const SEPARATOR_LINE: &str = "*---------------------------*";

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append a separator line between runs.
    pub fn separator(&mut self) {
        self.entries.push(ReportEntry::Separator);
    }

    /// Start a check run: clear when auto-clear is on, otherwise separate
    /// from the previous run.
    pub fn begin_run(&mut self, auto_clear: bool) {
        if auto_clear {
            self.clear();
        } else {
            self.separator();
        }
    }

    /// Append a finding.
    pub fn push(&mut self, finding: Finding) {
        self.entries.push(ReportEntry::Finding(finding));
    }

    /// Append a passing finding for an object.
    pub fn ok(&mut self, kind: CheckKind, object: &str, message: impl Into<String>) {
        self.push(Finding {
            object: Some(object.to_string()),
            kind: Some(kind),
            status: Status::Ok,
            message: message.into(),
        });
    }

    /// Append a violation finding for an object.
    pub fn violation(&mut self, kind: CheckKind, object: &str, message: impl Into<String>) {
        self.push(Finding {
            object: Some(object.to_string()),
            kind: Some(kind),
            status: Status::Violation,
            message: message.into(),
        });
    }

    /// Append a check-level notice (empty selection, no-op toggles).
    pub fn notice(&mut self, kind: CheckKind, message: impl Into<String>) {
        self.push(Finding {
            object: None,
            kind: Some(kind),
            status: Status::Notice,
            message: message.into(),
        });
    }

    /// Append a run-level notice not tied to any one validator.
    pub fn run_notice(&mut self, message: impl Into<String>) {
        self.push(Finding {
            object: None,
            kind: None,
            status: Status::Notice,
            message: message.into(),
        });
    }

    /// Iterate over all entries, separators included.
    pub fn entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter()
    }

    /// Iterate over findings, skipping separators.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter().filter_map(|e| match e {
            ReportEntry::Finding(f) => Some(f),
            ReportEntry::Separator => None,
        })
    }

    /// Number of findings (separators excluded).
    pub fn finding_count(&self) -> usize {
        self.findings().count()
    }

    /// Whether any finding is a violation.
    pub fn has_violations(&self) -> bool {
        self.findings().any(|f| f.status == Status::Violation)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            match entry {
                ReportEntry::Separator => writeln!(f, "{}", SEPARATOR_LINE)?,
                ReportEntry::Finding(finding) => writeln!(f, "{}", finding.message)?,
            }
        }
        Ok(())
    }
}
