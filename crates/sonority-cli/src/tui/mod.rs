use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use sonority_viz::{BarChart, RadarChart, WordCloud};

pub mod bar_chart;
pub mod radar;
pub mod word_cloud;

/// Which chart is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    WordCloud,
    BarChart,
    Radar,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::WordCloud, Self::BarChart, Self::Radar];

    pub const fn title(self) -> &'static str {
        match self {
            Self::WordCloud => "1 Word cloud",
            Self::BarChart => "2 Bar chart",
            Self::Radar => "3 Radar",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::WordCloud => 0,
            Self::BarChart => 1,
            Self::Radar => 2,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::WordCloud => Self::BarChart,
            Self::BarChart => Self::Radar,
            Self::Radar => Self::WordCloud,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::WordCloud => Self::Radar,
            Self::BarChart => Self::WordCloud,
            Self::Radar => Self::BarChart,
        }
    }
}

/// Application state for the explore TUI.
#[derive(Debug)]
pub struct App {
    pub tab: Tab,
    pub word_cloud: WordCloud,
    pub bar_chart: BarChart,
    pub radar: RadarChart,
    pub should_quit: bool,
}

impl App {
    pub fn new(word_cloud: WordCloud, bar_chart: BarChart, radar: RadarChart) -> Self {
        Self {
            tab: Tab::WordCloud,
            word_cloud,
            bar_chart,
            radar,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.tab = self.tab.previous();
            }
            KeyCode::Char('1') => self.tab = Tab::WordCloud,
            KeyCode::Char('2') => self.tab = Tab::BarChart,
            KeyCode::Char('3') => self.tab = Tab::Radar,
            _ => {}
        }
    }
}

/// Run the explore TUI.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Chart
            Constraint::Length(3), // Help bar
        ])
        .split(frame.area());

    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
        .select(app.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.bar_chart.title.as_str()),
        );
    frame.render_widget(tabs, chunks[0]);

    match app.tab {
        Tab::WordCloud => word_cloud::render(frame, &app.word_cloud, chunks[1]),
        Tab::BarChart => bar_chart::render(frame, &app.bar_chart, chunks[1]),
        Tab::Radar => radar::render(frame, &app.radar, chunks[1]),
    }

    let help = Paragraph::new("  Tab/\u{2192} Next  \u{2190} Previous  1-3 Jump  q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}
