use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    if app.question_set().is_empty() {
        render_empty(frame, chunks[0]);
        super::render_controls(frame, chunks[1], "n new quiz  ·  r reload  ·  q quit");
        return;
    }

    render_questions(frame, chunks[0], app);
    super::render_controls(
        frame,
        chunks[1],
        "j/k navigate  ·  enter solve  ·  n new quiz  ·  r reload  ·  q quit",
    );
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from("No quizzes yet.".fg(Color::White)),
        Line::from(""),
        Line::from(Span::styled(
            "Press N to create the first one!",
            Style::default().fg(Color::Green).bold(),
        )),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_questions(frame: &mut Frame, area: Rect, app: &App) {
    let cursor = app.list_cursor();
    let mut lines: Vec<Line> = Vec::with_capacity(app.question_set().len() * 2);

    for (index, question) in app.question_set().newest_first().enumerate() {
        let is_selected = index == cursor;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(truncate(&question.text), style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     by {}", question.creator),
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the cursor in view; each entry takes two lines.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (cursor * 2 + 2).saturating_sub(visible);

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Quizzes ")
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate(text: &str) -> String {
    if text.chars().count() > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
