//! TUI (Terminal User Interface) モジュール
//!
//! ratatuiを使用した解析結果のプレビュー表示

use std::io::{self, Stdout};

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Row, Table},
    Frame, Terminal,
};

use crate::analysis::{Analysis, EntropyTable};

/// TUI状態
pub struct TuiState {
    /// (log10 順位, log10 頻度)
    pub zipf_points: Vec<(f64, f64)>,
    pub vocabulary: usize,
    pub word_table: EntropyTable,
    pub char_table: EntropyTable,
}

impl TuiState {
    pub fn new(analysis: &Analysis) -> Self {
        Self {
            zipf_points: log_points(&analysis.zipf.points()),
            vocabulary: analysis.zipf.len(),
            word_table: analysis.word_entropy.clone(),
            char_table: analysis.char_entropy.clone(),
        }
    }

    /// x・y軸の上限（log10、最低1）
    fn bounds(&self) -> (f64, f64) {
        let x = self.zipf_points.last().map_or(1.0, |p| p.0).max(1.0);
        let y = self.zipf_points.first().map_or(1.0, |p| p.1).max(1.0);
        (x.ceil(), y.ceil())
    }
}

/// 両対数表示用に常用対数へ変換
pub fn log_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points.iter().map(|&(x, y)| (x.log10(), y.log10())).collect()
}

/// TUIアプリケーション
pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiApp {
    /// TUIを初期化
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// TUIを描画
    pub fn draw(&mut self, state: &TuiState) -> io::Result<()> {
        self.terminal.draw(|f| {
            let main_chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Percentage(50), // Zipf chart
                    Constraint::Percentage(50), // Tables
                ])
                .split(f.area());

            let bottom_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(main_chunks[1]);

            render_zipf(f, main_chunks[0], state);
            render_table(f, bottom_chunks[0], &state.word_table);
            render_table(f, bottom_chunks[1], &state.char_table);
        })?;
        Ok(())
    }

    /// 終了キー（q / Esc）を待つ
    pub fn wait_for_quit(&self) -> io::Result<bool> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// TUIを終了
    pub fn cleanup(mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// 順位・頻度グラフを描画
fn render_zipf(f: &mut Frame, area: Rect, state: &TuiState) {
    let title = format!("Zipf's law (log10, {} types)", state.vocabulary);
    if state.zipf_points.is_empty() {
        f.render_widget(Block::default().borders(Borders::ALL).title(title), area);
        return;
    }

    let (max_x, max_y) = state.bounds();
    let datasets = vec![Dataset::default()
        .name("Frequency")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Yellow))
        .data(&state.zipf_points)];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .title("log10 Rank")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x])
                .labels(vec![
                    Span::raw("1"),
                    Span::raw(format!("1e{:.1}", max_x / 2.0)),
                    Span::raw(format!("1e{}", max_x)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("log10 Frequency")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_y])
                .labels(vec![
                    Span::raw("1"),
                    Span::raw(format!("1e{:.1}", max_y / 2.0)),
                    Span::raw(format!("1e{}", max_y)),
                ]),
        );

    f.render_widget(chart, area);
}

/// エントロピー表を描画
fn render_table(f: &mut Frame, area: Rect, table: &EntropyTable) {
    let header = Row::new(table.headers().into_iter().map(Cell::from)).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let last = table.rows.len().saturating_sub(1);
    let rows = table.rows.iter().enumerate().map(|(i, row)| {
        let [h1, h2, h3] = row.entropy.as_array();
        let style = if i == last {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(row.label.clone()),
            Cell::from(format!("{:.4}", h1)),
            Cell::from(format!("{:.4}", h2)),
            Cell::from(format!("{:.4}", h3)),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Percentage(34),
        Constraint::Percentage(22),
        Constraint::Percentage(22),
        Constraint::Percentage(22),
    ];
    let widget = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(table.title.clone()));

    f.render_widget(widget, area);
}

/// q / Esc が押されるまで結果を表示
pub fn run_tui(state: &TuiState) -> io::Result<()> {
    let mut app = TuiApp::new()?;
    let result = event_loop(&mut app, state);
    app.cleanup()?;
    result
}

fn event_loop(app: &mut TuiApp, state: &TuiState) -> io::Result<()> {
    loop {
        app.draw(state)?;
        if app.wait_for_quit()? {
            return Ok(());
        }
    }
}
