//! Output formatting for delivery reports.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use petdetective_lib::{DeliveryReport, ReportRenderMode};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Step-by-step trace followed by a verdict line.
    #[default]
    Text,
    /// Pretty-printed JSON report.
    Json,
}

impl From<OutputFormat> for ReportRenderMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportRenderMode::PlainText,
            OutputFormat::Json => ReportRenderMode::Json,
        }
    }
}

/// Render `report` in `format` and write it to `writer`.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &DeliveryReport,
    format: OutputFormat,
) -> Result<()> {
    let rendered = report
        .render(format.into())
        .context("failed to render delivery report")?;
    writer
        .write_all(rendered.as_bytes())
        .context("failed to write delivery report")?;
    Ok(())
}
