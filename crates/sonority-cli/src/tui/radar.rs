use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use sonority_viz::RadarChart;

use crate::commands::truncate;

const COLUMN_WIDTH: u16 = 14;

/// Render the radar comparison as a table: one row per feature, one column
/// per song.
pub fn render(frame: &mut Frame, chart: &RadarChart, area: Rect) {
    let mut header =
        vec![Cell::from("Feature").style(Style::default().add_modifier(Modifier::BOLD))];
    header.extend(chart.traces.iter().enumerate().map(|(i, trace)| {
        let style = if i == 0 {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Cell::from(truncate(&trace.name, usize::from(COLUMN_WIDTH))).style(style)
    }));

    let rows: Vec<Row> = chart
        .open_axes()
        .iter()
        .enumerate()
        .map(|(axis, feature)| {
            let mut cells = vec![Cell::from(feature.as_str())];
            cells.extend(
                chart
                    .traces
                    .iter()
                    .map(|trace| Cell::from(format!("{:.3}", trace.values[axis]))),
            );
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(18)];
    widths.extend(chart.traces.iter().map(|_| Constraint::Length(COLUMN_WIDTH)));

    let table = Table::new(rows, widths)
        .header(Row::new(header).height(1))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Normalized features (0 to 1), query song first"),
        );

    frame.render_widget(table, area);
}
