use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};
use chrono::NaiveDate;
use taskboard_core::{due_bucket, Clock, DueDateFilter, Priority, TaskRepository};
use unicode_width::UnicodeWidthStr;

use crate::commands::describe_filters;
use crate::table::short_id;
use crate::tui::app::{App, InputMode};

pub fn draw<R: TaskRepository, C: Clock>(f: &mut Frame, app: &mut App<R, C>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input / message
            Constraint::Length(1), // Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    draw_task_list(f, app, content_chunks[0]);
    draw_detail_view(f, app, content_chunks[1]);
    draw_input(f, app, main_chunks[2]);

    let help = match app.input_mode {
        InputMode::Normal => {
            "j/k: move | space: toggle | a: add | d: delete | /: search | s/p/c/w: cycle filters | u: assignee | r: reset | q: quit"
        }
        _ => "enter: confirm | esc: cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_header<R: TaskRepository, C: Clock>(f: &mut Frame, app: &App<R, C>, area: Rect) {
    let filters = app.board.filters();
    let visible = app.visible_tasks().len();
    let total = app.board.tasks().len();

    let mut spans = vec![
        Span::styled("TASKBOARD ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("{visible}/{total} shown  ")),
        Span::styled(
            describe_filters(filters, app.board.search_term()),
            Style::default().fg(Color::Yellow),
        ),
    ];
    let active = filters.active_count();
    if active > 0 {
        spans.push(Span::styled(
            format!("  [{active} active]"),
            Style::default().fg(Color::Magenta),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_task_list<R: TaskRepository, C: Clock>(f: &mut Frame, app: &mut App<R, C>, area: Rect) {
    let today = app.board.today();
    let due_width = due_column_width(&app.date_format, today);
    let rows: Vec<Row> = app
        .visible_tasks()
        .into_iter()
        .map(|task| {
            let status_icon = if task.completed { "✔" } else { "☐" };

            let priority_style = match task.priority {
                Priority::High => Style::default().fg(Color::Red),
                Priority::Medium => Style::default().fg(Color::Yellow),
                Priority::Low => Style::default().fg(Color::Green),
            };
            let pri_str = match task.priority {
                Priority::High => "H",
                Priority::Medium => "M",
                Priority::Low => "L",
            };

            let due_style = match due_bucket(task, today) {
                DueDateFilter::Overdue if !task.completed => Style::default().fg(Color::Red),
                DueDateFilter::Today => Style::default().fg(Color::Yellow),
                _ => Style::default(),
            };
            let due_str = task
                .due_date
                .map(|d| d.format(&app.date_format).to_string())
                .unwrap_or_else(|| "-".to_string());

            let name_style = if task.completed {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };

            Row::new(vec![
                Span::raw(status_icon),
                Span::styled(pri_str, priority_style),
                Span::styled(due_str, due_style),
                Span::raw(task.category.to_string()),
                Span::styled(task.task_name.clone(), name_style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(3),  // Priority
            Constraint::Length(due_width), // Due
            Constraint::Length(9),  // Category
            Constraint::Min(10),    // Name
        ],
    )
    .header(Row::new(vec!["St", "Pr", "Due", "Category", "Task"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

/// Width of a formatted date, never narrower than the "Due" header.
fn due_column_width(date_format: &str, today: NaiveDate) -> u16 {
    let width = today.format(date_format).to_string().width().max(3);
    u16::try_from(width).unwrap_or(u16::MAX)
}

fn draw_detail_view<R: TaskRepository, C: Clock>(f: &mut Frame, app: &App<R, C>, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let Some(task) = app.selected_task() else {
        f.render_widget(block, area);
        return;
    };

    let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::Blue));
    let due = match task.due_date {
        Some(d) => format!(
            "{} ({})",
            d.format(&app.date_format),
            due_bucket(task, app.board.today())
        ),
        None => "None".to_string(),
    };
    let assignee = if task.assigned_user.is_empty() { "-" } else { task.assigned_user.as_str() };

    let detail_text = vec![
        Line::from(vec![
            label("Title: "),
            Span::styled(task.task_name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(short_id(task)),
        ]),
        Line::from(vec![
            label("Status: "),
            Span::raw(if task.completed { "Completed" } else { "Incomplete" }),
        ]),
        Line::from(vec![label("Priority: "), Span::raw(task.priority.to_string())]),
        Line::from(vec![label("Category: "), Span::raw(task.category.to_string())]),
        Line::from(vec![label("Due: "), Span::raw(due)]),
        Line::from(vec![label("Assigned to: "), Span::raw(assignee)]),
        Line::from(vec![
            label("Assigned on: "),
            Span::raw(task.assigned_on.format("%Y-%m-%d %H:%M").to_string()),
        ]),
    ];

    let detail = Paragraph::new(detail_text).block(block).wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn draw_input<R: TaskRepository, C: Clock>(f: &mut Frame, app: &App<R, C>, area: Rect) {
    let title = match app.input_mode {
        InputMode::Normal => {
            let text = app.message.as_deref().unwrap_or("");
            let message = Paragraph::new(text)
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
            f.render_widget(message, area);
            return;
        }
        InputMode::Adding => " Add: name [pri:h] [cat:backend] [due:fri] [user:name] ",
        InputMode::Searching => " Search ",
        InputMode::Assignee => " Assigned to ",
    };

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
    let offset = u16::try_from(before_cursor.width()).unwrap_or(u16::MAX);
    f.set_cursor_position(Position::new(area.x.saturating_add(1).saturating_add(offset), area.y + 1));
}
