//! Text and JSON views of the heatmap.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use daka_core::config::DisplayConfig;
use daka_core::{CheckinPartition, DayKey, MonthLabel, Project, WeekGrid, WEEKDAY_LABELS};

/// Each week column is a glyph plus a space.
const COLUMN_WIDTH: usize = 2;

#[derive(Serialize)]
struct CellView {
    key: DayKey,
    is_future: bool,
    checked: bool,
}

/// Grid as emitted by `daka grid --json`.
#[derive(Serialize)]
pub struct GridView<'a> {
    project: &'a Project,
    end: DayKey,
    month_labels: Vec<MonthLabel>,
    weeks: Vec<Vec<CellView>>,
}

impl<'a> GridView<'a> {
    pub fn new(project: &'a Project, grid: &WeekGrid, checkins: &CheckinPartition) -> Self {
        let weeks = grid
            .weeks
            .iter()
            .map(|week| {
                week.days
                    .iter()
                    .map(|day| CellView {
                        key: day.key,
                        is_future: day.is_future,
                        checked: checkins.is_checked(&project.id, day.key),
                    })
                    .collect()
            })
            .collect();

        Self {
            project,
            end: grid.end,
            month_labels: grid.month_labels(),
            weeks,
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

/// Month header line. A label wider than its column spills into the
/// following blank columns.
fn month_header(labels: &[MonthLabel]) -> String {
    let mut line = String::new();
    let mut spill = 0;
    for label in labels {
        if spill > 0 {
            spill -= 1;
            continue;
        }
        if label.label.is_empty() {
            line.push_str(&pad("", COLUMN_WIDTH));
            continue;
        }
        let columns = UnicodeWidthStr::width(label.label.as_str()).div_ceil(COLUMN_WIDTH);
        line.push_str(&pad(&label.label, columns * COLUMN_WIDTH));
        spill = columns - 1;
    }
    line.trim_end().to_string()
}

/// Seven rows (Sunday first), one column per week.
pub fn heatmap(
    grid: &WeekGrid,
    checkins: &CheckinPartition,
    project_id: &str,
    display: &DisplayConfig,
) -> String {
    let gutter = COLUMN_WIDTH + 1;
    let mut out = String::new();

    out.push_str(&pad("", gutter));
    out.push_str(&month_header(&grid.month_labels()));
    out.push('\n');

    for (row, weekday) in WEEKDAY_LABELS.iter().enumerate() {
        let label = if row % 2 == 1 { *weekday } else { "" };
        let mut line = pad(label, gutter);
        for week in &grid.weeks {
            let day = &week.days[row];
            let glyph = if day.is_future {
                &display.future_glyph
            } else if checkins.is_checked(project_id, day.key) {
                &display.checked_glyph
            } else {
                &display.empty_glyph
            };
            line.push_str(&pad(glyph, COLUMN_WIDTH));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
