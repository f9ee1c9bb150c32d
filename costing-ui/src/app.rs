//! Command implementations behind the `costing` binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use costing_core::calculations::common::format_amount;
use costing_core::{ChartPoint, CostingMethod, Section};
use costing_server::ServerConfig;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{info, warn};

use crate::csv_loader;
use crate::logging;
use crate::models::StatementSummary;
use crate::state::StatementForm;

/// Widest bar of the text chart, in characters.
const CHART_WIDTH: usize = 40;

/// Output style of the `report` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Overrides for the server settings read from the config file.
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Loads line items from `path` into a fresh form with `method` selected.
pub fn load_form(
    path: &Path,
    method: CostingMethod,
) -> Result<StatementForm> {
    let drafts = csv_loader::load_from_file(path)
        .with_context(|| format!("failed to load line items from {}", path.display()))?;

    let mut form = StatementForm::from_items(drafts);
    form.set_method(method);
    Ok(form)
}

/// Loads, submits and renders a statement.
pub fn run_report(
    path: &Path,
    method: CostingMethod,
    format: ReportFormat,
) -> Result<String> {
    let mut form = load_form(path, method)?;
    for list in Section::all().iter().map(|section| form.section(*section)) {
        info!(
            section = list.section().label(),
            items = list.len(),
            total = ?list.total(),
            "section loaded"
        );
    }

    if let Err(error) = form.submit().map(|_| ()) {
        let message = form.error().unwrap_or_default().to_string();
        return Err(anyhow::Error::new(error).context(message));
    }
    let summary = form.summary().context("statement was not produced")?;
    if summary.result.is_loss() {
        warn!(
            method = %summary.result.method,
            result = %summary.result.result,
            "statement shows a loss"
        );
    }

    match format {
        ReportFormat::Text => Ok(render_text(summary)),
        ReportFormat::Json => {
            serde_json::to_string_pretty(summary).context("failed to serialize statement")
        }
    }
}

/// Statement lines followed by a horizontal bar chart.
pub fn render_text(summary: &StatementSummary) -> String {
    let mut out = summary.to_string();
    out.push('\n');
    out.push_str(&render_chart(&summary.chart));
    out
}

/// One bar per point, scaled to the largest absolute value. Negative values
/// are drawn with `-` instead of `#`.
pub fn render_chart(points: &[ChartPoint]) -> String {
    let label_width = points.iter().map(|p| p.label.len()).max().unwrap_or(0);
    let largest = points
        .iter()
        .map(|p| p.value.abs())
        .max()
        .unwrap_or(Decimal::ZERO);

    let mut out = String::new();
    for point in points {
        let fill = if point.value < Decimal::ZERO { '-' } else { '#' };
        let bar: String = std::iter::repeat_n(fill, bar_len(point.value, largest)).collect();
        out.push_str(&format!(
            "  {:<label_width$} | {:<bar_width$} {}\n",
            point.label,
            bar,
            format_amount(point.value),
            bar_width = CHART_WIDTH,
        ));
    }
    out
}

fn bar_len(
    value: Decimal,
    largest: Decimal,
) -> usize {
    if largest.is_zero() {
        return 0;
    }
    (value.abs() / largest * Decimal::from(CHART_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
}

/// Resolves the server settings and runs the endpoint until shutdown.
pub async fn run_serve(options: ServeOptions) -> Result<()> {
    let mut config = ServerConfig::load(options.config.as_deref())?;
    if let Some(host) = options.host {
        config.host = host;
    }
    if let Some(port) = options.port {
        config.port = port;
    }

    if !logging::env_filter_is_set() {
        if let Err(error) = logging::set_log_level(&config.log_level) {
            warn!(%error, "keeping default log level");
        }
    }

    costing_server::start_server(config).await
}
