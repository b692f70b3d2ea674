//! Output formatting and display logic for trendscope

use std::io::Write;

use chrono::NaiveDate;

use crate::core::constants::{display, output_formats};
use crate::core::error::Result;
use crate::core::types::Record;
use crate::data::variant::interaction_columns;
use crate::pipeline::AggregateView;
use crate::reporting::DashboardSnapshot;
use crate::ui::color::{Role, paint, with_emoji};

/// Writes a dashboard snapshot in one output format
pub trait Renderer {
    fn render(&self, snapshot: &DashboardSnapshot, out: &mut dyn Write) -> Result<()>;
}

/// Titled sections with proportional bars
#[derive(Default)]
pub struct TextRenderer;

/// One pretty-printed JSON document
#[derive(Default)]
pub struct JsonRenderer;

/// Tab-separated rows, no colors, emojis, or bars. A view without rows
/// prints a `no data` line, and a notice prints as a `notice` line.
#[derive(Default)]
pub struct MinimalRenderer;

/// The renderer for an output format name. Unknown names render as text.
pub fn renderer_for(output_format: &str) -> Box<dyn Renderer> {
    match output_format {
        output_formats::MINIMAL => Box::new(MinimalRenderer),
        output_formats::JSON => Box::new(JsonRenderer),
        _ => Box::new(TextRenderer),
    }
}

/// Display a dashboard snapshot in the requested output format
pub fn display_snapshot(
    snapshot: &DashboardSnapshot,
    output_format: &str,
    out: &mut dyn Write,
) -> Result<()> {
    renderer_for(output_format).render(snapshot, out)
}

/// One line of caption: how many records are shown, over which dates
pub fn caption(snapshot: &DashboardSnapshot) -> String {
    let bound = |date: Option<NaiveDate>, open: &str| {
        date.map_or_else(|| open.to_string(), |d| d.format("%Y-%m-%d").to_string())
    };
    format!(
        "Showing {} of {} records from {} to {}",
        snapshot.filtered_records,
        snapshot.total_records,
        bound(snapshot.start_date, "the beginning"),
        bound(snapshot.end_date, "the end")
    )
}

impl Renderer for MinimalRenderer {
    fn render(&self, snapshot: &DashboardSnapshot, out: &mut dyn Write) -> Result<()> {
        if let Some(ref notice) = snapshot.notice {
            writeln!(out, "{}\t{notice}", display::NOTICE_LABEL)?;
        }
        for named in &snapshot.views {
            if named.view.is_empty() {
                writeln!(out, "{}\t{}", named.title, display::NO_DATA_LABEL)?;
            }
            for row in &named.view.rows {
                let keys: Vec<String> = row.keys.iter().map(ToString::to_string).collect();
                writeln!(out, "{}\t{}\t{}", named.title, keys.join("\t"), row.count)?;
            }
        }
        Ok(())
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, snapshot: &DashboardSnapshot, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, snapshot)?;
        writeln!(out)?;
        Ok(())
    }
}

impl Renderer for TextRenderer {
    fn render(&self, snapshot: &DashboardSnapshot, out: &mut dyn Write) -> Result<()> {
        display_text_output(snapshot, out)
    }
}

fn display_text_output(snapshot: &DashboardSnapshot, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", paint(&snapshot.title, Role::Title))?;
    writeln!(out, "{}", paint(&caption(snapshot), Role::Caption))?;

    if let Some(ref notice) = snapshot.notice {
        writeln!(
            out,
            "{}",
            paint(&with_emoji(display::WARNING_EMOJI, notice), Role::Notice)
        )?;
    }

    for named in &snapshot.views {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            paint(&with_emoji(display::CHART_EMOJI, &named.title), Role::Heading)
        )?;
        display_view(&named.view, out)?;
    }

    if let Some(ref sample) = snapshot.sample {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            paint(&with_emoji(display::SAMPLE_EMOJI, "Sample records"), Role::Heading)
        )?;
        if sample.is_empty() {
            writeln!(out, "  No data for the current filters")?;
        }
        for record in sample {
            writeln!(out, "  {}", sample_line(record))?;
        }
    }

    Ok(())
}

fn display_view(view: &AggregateView, out: &mut dyn Write) -> Result<()> {
    if view.is_empty() {
        writeln!(out, "  No data for the current filters")?;
        return Ok(());
    }

    let labels: Vec<String> = view
        .rows
        .iter()
        .map(|row| {
            row.keys
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" / ")
        })
        .collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max = view.max_count();

    for (label, row) in labels.iter().zip(&view.rows) {
        writeln!(
            out,
            "  {label:<width$}  {} {}",
            paint(&bar(row.count, max, display::BAR_WIDTH), Role::Bar),
            row.count
        )?;
    }
    Ok(())
}

/// A bar of `width` cells for the largest count, at least one cell otherwise
pub fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let cells = (count * width).div_ceil(max).clamp(1, width);
    "█".repeat(cells)
}

fn sample_line(record: &Record) -> String {
    let date = record
        .date
        .map_or_else(|| display::MISSING_LABEL.to_string(), |d| d.to_string());
    let who = record
        .get(interaction_columns::MSL_NAMES)
        .unwrap_or(display::MISSING_LABEL);
    let text = record.get(interaction_columns::TEXT).unwrap_or("");
    format!("{date}  {}  {text}", paint(who, Role::Name))
}
