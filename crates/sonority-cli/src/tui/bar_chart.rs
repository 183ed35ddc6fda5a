use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use sonority_viz::BarChart;

use crate::commands::{bar_cells, truncate};

const LABEL_WIDTH: u16 = 36;
const SCORE_WIDTH: u16 = 8;

/// Render the ranking as horizontal bars, best match on top.
pub fn render(frame: &mut Frame, chart: &BarChart, area: Rect) {
    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Song").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Similarity"),
        Cell::from("Score"),
    ])
    .height(1);

    // borders, rank column, label, score, column gaps
    let bar_width = usize::from(area.width.saturating_sub(2 + 4 + LABEL_WIDTH + SCORE_WIDTH + 3));

    let rows: Vec<Row> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let cells = bar_cells(chart.fraction(bar.value), bar_width);
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate(&bar.label, usize::from(LABEL_WIDTH))),
                Cell::from("█".repeat(cells)).style(Style::default().fg(Color::Cyan)),
                Cell::from(format!("{:.4}", bar.value)),
            ])
        })
        .collect();

    let title = format!("Axis {:.3} to {:.3}", chart.axis.0, chart.axis.1);
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(LABEL_WIDTH),
            Constraint::Min(1),
            Constraint::Length(SCORE_WIDTH),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}
