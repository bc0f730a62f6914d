//! Report generation for head-to-head comparisons.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use pitwall_domain::{ComparisonRow, ResolvedDriver, YearRange};

use crate::error::{AnalyticsError, Result};
use crate::series::AdvantagePoint;
use crate::stats::H2hSummary;

/// Bar of the wins chart: driver reference and races finished ahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinsBar {
    pub reference: String,
    pub wins: usize,
}

/// Complete head-to-head comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct H2hReport {
    pub generated_at: String,
    pub driver_a: ResolvedDriver,
    pub driver_b: ResolvedDriver,
    pub years: YearRange,
    pub summary: H2hSummary,
    pub series: Vec<AdvantagePoint>,
    pub wins_chart: Vec<WinsBar>,
    pub rows: Vec<ComparisonRow>,
}

impl H2hReport {
    /// Report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Conversion` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AnalyticsError::Conversion(e.to_string()))
    }

    /// Report as Markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let a = &self.driver_a;
        let b = &self.driver_b;

        let _ = writeln!(md, "# H2H: {} vs {}\n", a.full_name, b.full_name);
        let _ = writeln!(md, "**Generated:** {}  ", self.generated_at);
        let _ = writeln!(md, "**Seasons:** {}\n", self.years);

        md.push_str("## Summary\n\n");
        md.push_str("| Driver | H2H Wins | Ties | Races Together | Mean Finish | Median Finish | Mean Grid | Points (H2H) | Best Result |\n");
        md.push_str("|--------|----------|------|----------------|-------------|---------------|-----------|--------------|-------------|\n");
        for side in self.summary.rows() {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} | {:.2} | {:.1} | {:.2} | {:.1} | {} |",
                side.driver,
                side.h2h_wins,
                side.ties,
                side.races_together,
                side.mean_position,
                side.median_position,
                side.mean_grid,
                side.total_points,
                side.best_result
            );
        }
        md.push('\n');

        md.push_str("## Races Finished Ahead\n\n");
        md.push_str("| Driver | Wins |\n");
        md.push_str("|--------|------|\n");
        for bar in &self.wins_chart {
            let _ = writeln!(md, "| {} | {} |", bar.reference, bar.wins);
        }
        md.push('\n');

        if !self.series.is_empty() {
            let _ = writeln!(
                md,
                "## Cumulative Advantage ({} - {})\n",
                a.reference, b.reference
            );
            md.push_str("| Race | Step | Cumulative |\n");
            md.push_str("|------|------|------------|\n");
            for point in &self.series {
                let _ = writeln!(
                    md,
                    "| {} | {:+} | {:+} |",
                    point.label, point.step, point.cumulative
                );
            }
            md.push('\n');
        }

        md
    }
}
