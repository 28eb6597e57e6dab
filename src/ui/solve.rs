use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::{App, Outcome};

const OPTION_LABELS: [char; 4] = ['1', '2', '3', '4'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(9),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_question_text(frame, chunks[0], &question.text);
    render_creator(frame, chunks[1], &question.creator);
    render_options(frame, chunks[2], &question.options, app.selected_option());
    if let Some(outcome) = app.outcome() {
        render_outcome(frame, chunks[3], outcome);
    }
    super::render_controls(
        frame,
        chunks[5],
        "j/k navigate  ·  enter submit  ·  esc back to list  ·  q quit",
    );
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_creator(frame: &mut Frame, area: Rect, creator: &str) {
    let widget = Paragraph::new(format!("by {}", creator)).fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[String; 4], selected: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_outcome(frame: &mut Frame, area: Rect, outcome: &Outcome) {
    let (text, color) = match outcome {
        Outcome::Answered {
            evaluation,
            selected,
        } => {
            let color = if evaluation.is_correct {
                Color::Green
            } else {
                Color::Red
            };
            (evaluation.result_line(selected), color)
        }
        Outcome::DataError(message) => (
            format!("This quiz cannot be graded: {}", message),
            Color::Yellow,
        ),
    };

    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}
