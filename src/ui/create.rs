use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::{App, CreateForm, FORM_ORDER};
use crate::error::DraftField;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Length(11), Constraint::Fill(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    render_form(frame, chunks[0], app.form());
    super::render_controls(
        frame,
        chunks[2],
        "tab/↓ next  ·  shift-tab/↑ previous  ·  ←/→ answer  ·  enter submit  ·  esc back",
    );
}

fn render_form(frame: &mut Frame, area: Rect, form: &CreateForm) {
    let lines: Vec<Line> = FORM_ORDER
        .iter()
        .map(|field| field_line(form, *field))
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" New quiz ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(widget, area);
}

fn field_line(form: &CreateForm, field: DraftField) -> Line<'_> {
    let is_focused = form.focused() == field;
    let label_style = if form.invalid.contains(&field) {
        Style::default().fg(Color::Red)
    } else if is_focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(if is_focused { " > " } else { "   " }, label_style),
        Span::styled(format!("{:<10}", field.label()), label_style),
    ];

    match form.text(field) {
        Some(text) => {
            spans.push(Span::styled(text, Style::default().fg(Color::Yellow)));
            if is_focused {
                spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
            }
        }
        None => {
            let index = form.draft.answer_index;
            spans.push(Span::styled(
                format!("< option {} >", index),
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    Line::from(spans)
}
