mod create;
mod list;
mod solve;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, Banner, Page};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    match app.page() {
        Page::List => list::render(frame, chunks[1], app),
        Page::Solve => solve::render(frame, chunks[1], app),
        Page::Create => create::render(frame, chunks[1], app),
    }
    render_banner(frame, chunks[2], app.banner());
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(" QUIZ BOARD ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(app.source(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_banner(frame: &mut Frame, area: Rect, banner: Option<&Banner>) {
    let Some(banner) = banner else {
        return;
    };
    let (text, color) = match banner {
        Banner::Info(text) => (text, Color::Green),
        Banner::Warning(text) => (text, Color::Yellow),
        Banner::Error(text) => (text, Color::Red),
    };
    let widget = Paragraph::new(format!(" {}", text)).fg(color);
    frame.render_widget(widget, area);
}

/// One-line key help at the bottom of a page.
fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
