use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use sonority_viz::WordCloud;

/// Render the word cloud: heavier words are brighter and bolder.
pub fn render(frame: &mut Frame, cloud: &WordCloud, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Word cloud");

    if cloud.is_empty() {
        let empty = Paragraph::new("  No other songs in the catalog.").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut spans = Vec::new();
    for (label, size) in cloud.relative_sizes() {
        spans.push(Span::styled(label.to_string(), style_for(size)));
        spans.push(Span::raw("   "));
    }

    let words = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(words, area);
}

fn style_for(size: f64) -> Style {
    if size >= 0.75 {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if size >= 0.5 {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else if size >= 0.25 {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
