use sectionguard_types::{Severity, ValidationData, ValidationIssue, Verdict};

#[derive(Clone, Debug, Default)]
pub struct SeverityCounts {
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        let mut counts = SeverityCounts::default();
        for issue in issues {
            match issue.severity {
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub issues: Vec<ValidationIssue>,
    pub data: ValidationData,
    pub counts: SeverityCounts,
}
