use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::problem::Problem;
use crate::search::{SearchConfig, SearchOutcome, SearchStats, Termination};

/// Header printed above the step list in plain text.
pub const SEQUENCE_HEADER: &str = "Optimal Sequence:";

/// Presentation style for turning a [`DeliveryReport`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRenderMode {
    PlainText,
    Json,
}

/// Structured view of a search result that higher-level consumers can
/// serialise or print.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeliveryReport {
    pub success: bool,
    pub termination: Termination,
    /// Delivered pets, sorted by name.
    pub delivered: Vec<String>,
    pub total_pickups: usize,
    /// Fuel spent along the reported trace.
    pub moves: u32,
    pub fuel_limit: u32,
    pub fuel_remaining: u32,
    pub stats: SearchStats,
    pub steps: Vec<String>,
}

impl DeliveryReport {
    /// Summarise an outcome produced for `problem` under `config`.
    pub fn from_outcome(problem: &Problem, config: &SearchConfig, outcome: &SearchOutcome) -> Self {
        let best = &outcome.best;
        Self {
            success: outcome.success,
            termination: outcome.termination,
            delivered: problem
                .names(best.delivered)
                .into_iter()
                .map(str::to_string)
                .collect(),
            total_pickups: problem.pickup_count(),
            moves: config.fuel_limit.saturating_sub(best.fuel),
            fuel_limit: config.fuel_limit,
            fuel_remaining: best.fuel,
            stats: outcome.stats,
            steps: best.trace.clone(),
        }
    }

    /// One-line verdict shown after the steps.
    pub fn message(&self) -> String {
        if self.success {
            format!(
                "All {} pets delivered using {} of {} fuel.",
                self.total_pickups, self.moves, self.fuel_limit
            )
        } else {
            let reason = match self.termination {
                Termination::ExpansionLimit => "the expansion limit was reached",
                _ => "no sequence within the fuel budget delivers every pet",
            };
            format!(
                "Partial success: delivered {} of {} pets; {}.",
                self.delivered.len(),
                self.total_pickups,
                reason
            )
        }
    }

    /// Render the report using the requested mode.
    pub fn render(&self, mode: ReportRenderMode) -> Result<String> {
        match mode {
            ReportRenderMode::PlainText => Ok(self.render_plain()),
            ReportRenderMode::Json => self.render_json(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "{SEQUENCE_HEADER}");
        for step in &self.steps {
            let _ = writeln!(buffer, "{step}");
        }
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "{}", self.message());
        buffer
    }

    fn render_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
