//! Formatted terminal output.
//!
//! Formatting lives in one place so the catalog and draw code stay clean and
//! output changes are localized.

use crate::domain::VariabilityKind;

/// Counts from one light-curve assignment run.
#[derive(Debug, Clone, Default)]
pub struct AssignSummary {
    pub n_stars: usize,
    pub n_eligible: usize,
    pub n_drawn: usize,
    pub n_constant: usize,
    pub n_sinusoid: usize,
    pub n_trapezoid: usize,
}

impl AssignSummary {
    pub fn new(n_stars: usize, n_eligible: usize) -> Self {
        Self {
            n_stars,
            n_eligible,
            ..Self::default()
        }
    }

    /// Record one completed draw. A draw may still land on Constant; those
    /// count toward `n_drawn` but not toward the variable kinds.
    pub fn record(&mut self, kind: VariabilityKind) {
        self.n_drawn += 1;
        match kind {
            VariabilityKind::Constant => self.n_constant += 1,
            VariabilityKind::Sinusoid => self.n_sinusoid += 1,
            VariabilityKind::Trapezoid => self.n_trapezoid += 1,
        }
    }

    pub fn n_variable(&self) -> usize {
        self.n_sinusoid + self.n_trapezoid
    }
}

/// Format the assignment summary for the terminal.
pub fn format_assign_summary(summary: &AssignSummary) -> String {
    let mut out = String::new();

    out.push_str("=== starvar - catalog light-curve assignment ===\n");
    out.push_str(&format!("Stars: n={}\n", summary.n_stars));
    out.push_str(&format!(
        "Eligible: n={} | drawn: n={}\n",
        summary.n_eligible, summary.n_drawn
    ));

    out.push_str("\nAssigned kinds:\n");
    out.push_str(&format!(
        "  {:<10} {}\n",
        "sinusoid", summary.n_sinusoid
    ));
    out.push_str(&format!(
        "  {:<10} {}\n",
        "trapezoid", summary.n_trapezoid
    ));
    out.push_str(&format!(
        "  {:<10} {}\n",
        "constant",
        summary.n_stars - summary.n_variable()
    ));
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tallies_by_kind() {
        let mut summary = AssignSummary::new(10, 6);
        summary.record(VariabilityKind::Sinusoid);
        summary.record(VariabilityKind::Sinusoid);
        summary.record(VariabilityKind::Trapezoid);
        summary.record(VariabilityKind::Constant);
        assert_eq!(summary.n_drawn, 4);
        assert_eq!(summary.n_variable(), 3);
        assert_eq!(summary.n_constant, 1);
    }

    #[test]
    fn summary_lists_every_kind() {
        let mut summary = AssignSummary::new(5, 5);
        summary.record(VariabilityKind::Trapezoid);
        let text = format_assign_summary(&summary);
        assert!(text.contains("n=5"));
        assert!(text.contains("sinusoid"));
        assert!(text.contains("trapezoid"));
        assert!(text.contains("constant"));
    }
}
