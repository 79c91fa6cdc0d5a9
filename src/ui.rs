use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::board::BoardStats;
use crate::task::WorkItem;
use crate::view::{BoardView, PromptView, View};

/// Below this many rows the key hint bar is dropped to give the columns room.
const HINT_MIN_HEIGHT: u16 = 10;
const PROMPT_WIDTH: u16 = 50;
const PROMPT_HEIGHT: u16 = 9;

pub fn draw(frame: &mut Frame, view: &View) {
    let area = frame.area();
    match view {
        View::Board(board) => draw_board(frame, area, board),
        View::Details(item) => draw_details(frame, area, *item),
        View::Prompt(prompt) => draw_prompt(frame, area, prompt),
        View::Dashboard(stats) => draw_dashboard(frame, area, stats),
    }
}

fn draw_board(frame: &mut Frame, area: Rect, board: &BoardView) {
    let show_hints = board.viewport.height >= HINT_MIN_HEIGHT;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if show_hints {
            vec![Constraint::Min(0), Constraint::Length(1)]
        } else {
            vec![Constraint::Min(0)]
        })
        .split(area);

    let count = board.columns.len().max(1) as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(board.columns.iter().map(|_| Constraint::Ratio(1, count)))
        .split(rows[0]);

    for (i, column) in board.columns.iter().enumerate() {
        let items: Vec<ListItem> = column
            .cards
            .iter()
            .map(|card| {
                let style = if card.selected {
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(Span::styled(format!("• {}", card.title), style)))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!("{} ({})", column.status, column.cards.len()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if board.selection.0 == i {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        );

        frame.render_widget(list, chunks[i]);
    }

    if show_hints {
        frame.render_widget(status_line(board), rows[1]);
    }
}

fn status_line<'a>(board: &BoardView<'a>) -> Line<'a> {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = vec![];
    for (keys, label) in [
        ("q", "quit"),
        ("h/l", "columns"),
        ("j/k", "items"),
        ("H/L", "move"),
        ("n", "new"),
        ("s", "sprint"),
        ("f", "filter"),
        ("v", "dashboard"),
        ("d", "details"),
    ] {
        spans.push(Span::styled(format!(" {keys}"), key));
        spans.push(Span::raw(format!(" {label} ")));
    }
    if !board.filter.is_empty() {
        spans.push(Span::styled(
            format!(" filter: {} ", board.filter),
            Style::default().fg(Color::Magenta),
        ));
    }
    if let Some(message) = board.message {
        spans.push(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn draw_details(frame: &mut Frame, area: Rect, item: Option<&WorkItem>) {
    let block = Block::default()
        .title("Work Item")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(item) = item else {
        frame.render_widget(Paragraph::new("No item selected.").block(block), area);
        return;
    };

    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name:<10}"), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(value),
        ])
    };
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

    let dependencies = item
        .dependencies
        .iter()
        .map(|dep| {
            if dep.blocking {
                format!("{} ({}, blocking)", dep.id, dep.kind)
            } else {
                format!("{} ({})", dep.id, dep.kind)
            }
        })
        .collect::<Vec<_>>();

    let mut lines = vec![
        field("ID", or_dash(item.id.as_deref())),
        field("Title", item.title.clone()),
        field("Status", item.status.to_string()),
        field("Sprint", or_dash(item.sprint_id.as_deref())),
        field("Type", item.kind.to_string()),
        field("Priority", item.priority.map_or_else(|| "-".to_string(), |p| p.to_string())),
        field("Points", item.points.to_string()),
        field("Tags", item.tags.join(", ")),
        field("Parent", or_dash(item.parent_id.as_deref())),
        field("Depends", dependencies.join(", ")),
        field("Created", item.created_at.format("%Y-%m-%d %H:%M").to_string()),
        field("Updated", item.updated_at.format("%Y-%m-%d %H:%M").to_string()),
    ];
    if !item.description.is_empty() {
        lines.push(Line::default());
        lines.push(Line::raw(item.description.clone()));
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        "[Press q or esc to return]",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_prompt(frame: &mut Frame, area: Rect, prompt: &PromptView) {
    let popup = centered(area, PROMPT_WIDTH, PROMPT_HEIGHT);
    let lines = vec![
        Line::styled(prompt.heading, Style::default().add_modifier(Modifier::BOLD)),
        Line::default(),
        Line::from(vec![
            Span::raw(format!("{}: ", prompt.label)),
            Span::styled(prompt.input, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::default(),
        Line::styled(prompt.hint, Style::default().fg(Color::DarkGray)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn draw_dashboard(frame: &mut Frame, area: Rect, stats: &BoardStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let total = Line::from(vec![
        Span::raw("Total Tasks: "),
        Span::styled(
            stats.total.to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(total), chunks[0]);

    let rows = stats.columns.iter().map(|column| {
        Row::new(vec![
            column.status.to_string(),
            format!("{} tasks", column.count),
            format!("{} pts", column.points),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(vec!["Column", "Items", "Points"]).style(Style::default().add_modifier(Modifier::BOLD)))
    .block(
        Block::default()
            .title("Dashboard")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(table, chunks[1]);

    frame.render_widget(
        Line::styled("[Press q or esc to return]", Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

#[cfg(test)]
#[path = "ui_tests.rs"]
mod tests;
