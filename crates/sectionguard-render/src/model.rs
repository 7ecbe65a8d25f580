#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderableSeverity {
    Error,
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

impl RenderableVerdictStatus {
    pub fn label(self) -> &'static str {
        match self {
            RenderableVerdictStatus::Pass => "PASS",
            RenderableVerdictStatus::Warn => "WARN",
            RenderableVerdictStatus::Fail => "FAIL",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableLocation {
    pub path: String,
    pub line: Option<u32>,
}

impl std::fmt::Display for RenderableLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => f.write_str(&self.path),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableIssue {
    pub severity: RenderableSeverity,
    pub check_id: String,
    /// Category code, e.g. `wrong_entity_context`.
    pub code: String,
    pub template: String,
    pub identifier: String,
    pub suggestion: Option<String>,
    pub message: String,
    pub location: Option<RenderableLocation>,
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub profile: String,
    pub templates_scanned: u32,
    pub issues_emitted: u32,
    pub issues_total: u32,
    pub errors: u32,
    pub warnings: u32,
    pub truncated_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub issues: Vec<RenderableIssue>,
    pub data: RenderableData,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableChange {
    pub rule: String,
    pub template: String,
    pub location: RenderableLocation,
    pub before: Option<String>,
    pub after: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFix {
    pub dry_run: bool,
    pub templates_scanned: u32,
    pub templates_changed: u32,
    pub changes: Vec<RenderableChange>,
    pub unresolved: Vec<RenderableIssue>,
    pub files_written: Vec<String>,
}
