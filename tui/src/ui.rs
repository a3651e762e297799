//! Rendering for the todo TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Focus, StatusKind};

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn hint() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn border(active: bool) -> Style {
        if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.size());

    draw_input(f, app, chunks[0]);
    draw_list(f, app, chunks[1]);
    draw_status(f, app, chunks[2]);
    draw_help(f, app, chunks[3]);

    if let Focus::Surface(key) = &app.focus {
        if let Some(control) = app.surfaces.get(key) {
            draw_update_surface(f, control.draft());
        }
    }
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let active = app.focus == Focus::Input;
    let text = if app.form.input().is_empty() && !active {
        Span::styled("Add a todo item", Styles::hint())
    } else {
        Span::raw(app.form.input())
    };
    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border(active))
            .title("New todo"),
    );
    f.render_widget(input, area);
}

fn draw_list(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.list.rows();
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let mut spans = vec![Span::raw(row.text.to_string())];
            if app.surfaces.is_open(&row.update_key) {
                spans.push(Span::styled("  (editing)", Styles::info()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let active = matches!(app.focus, Focus::List);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border(active))
                .title(format!("Todos ({})", rows.len())),
        )
        .highlight_style(Styles::selected())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.fetch_error {
        Line::from(Span::styled(error.as_str(), Styles::error()))
    } else if let Some(status) = &app.status {
        let style = match status.kind {
            StatusKind::Info => Styles::info(),
            StatusKind::Error => Styles::error(),
        };
        Line::from(Span::styled(status.text.as_str(), style))
    } else {
        Line::default()
    };
    let line = if app.in_flight > 0 {
        let mut spans = vec![Span::styled("[busy] ", Styles::hint())];
        spans.extend(line.spans);
        Line::from(spans)
    } else {
        line
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let help = match app.focus {
        Focus::Input => "Enter: add  Tab: list",
        Focus::List => "u: update  d: delete  r: refresh  Tab: input  q: quit",
        Focus::Surface(_) => "Enter: save  Esc: cancel  Ctrl+X: discard  Tab: back to list",
    };
    f.render_widget(Paragraph::new(Span::styled(help, Styles::hint())), area);
}

fn draw_update_surface(f: &mut Frame, draft: &str) {
    let area = centered_rect(60, 20, f.size());
    f.render_widget(Clear, area);
    let popup = Paragraph::new(draft).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border(true))
            .title("Update todo"),
    );
    f.render_widget(popup, area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
