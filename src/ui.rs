use crate::app::{App, Mode, NoticeKind, Section};
use crate::statistics::{percent, Statistics};
use crate::theme::Palette;
use chrono::Local;
use crossterm::event::{self, Event};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, List, ListItem, ListState,
        Paragraph, Tabs, Wrap,
    },
    Frame, Terminal,
};
use std::io;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}

pub fn draw(f: &mut Frame, app: &App) {
    let palette = app.theme.palette();
    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, app, &palette, chunks[0]);
    match app.section {
        Section::Dashboard => draw_dashboard(f, app, &palette, chunks[1]),
        Section::Tasks => draw_tasks(f, app, &palette, chunks[1]),
        Section::Statistics => draw_statistics(f, app, &palette, chunks[1]),
    }
    draw_footer(f, app, &palette, chunks[2]);

    match &app.mode {
        Mode::Normal => {}
        Mode::Adding(form) => {
            let area = centered(f.area(), 60, 7);
            let text = vec![
                Line::from(format!("Title: {}", form.title)),
                Line::from(format!("Description: {}", form.description)),
                Line::from(format!("Due: {}", form.due_date)),
                Line::from(Span::styled(
                    format!("{} > {}_", form.step.prompt(), form.current()),
                    palette.highlight(),
                )),
            ];
            f.render_widget(Clear, area);
            f.render_widget(
                Paragraph::new(text)
                    .style(palette.base())
                    .block(titled("New task (Enter: next, Esc: cancel)", &palette, true)),
                area,
            );
        }
        Mode::ConfirmDelete { title, .. } => {
            let area = centered(f.area(), 60, 5);
            f.render_widget(Clear, area);
            f.render_widget(
                Paragraph::new(format!("Are you sure you want to delete \"{title}\"? (y/n)"))
                    .style(palette.base())
                    .wrap(Wrap { trim: true })
                    .block(titled("Delete task", &palette, true)),
                area,
            );
        }
    }
}

fn draw_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Min(30), Constraint::Length(28)])
        .split(area);

    let titles: Vec<Line> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.section.index())
        .style(palette.base())
        .highlight_style(palette.highlight())
        .block(titled("Schedulr", palette, false));
    f.render_widget(tabs, chunks[0]);

    let profile = Paragraph::new(Line::from(vec![
        Span::raw(app.profile_name.as_str()),
        Span::styled(format!("  [{}]", app.theme.name()), Style::default().fg(palette.muted)),
    ]))
    .style(palette.base())
    .block(Block::default().borders(Borders::ALL).border_style(palette.border(false)));
    f.render_widget(profile, chunks[1]);
}

fn draw_dashboard(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let stats = app.store.statistics();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    let counts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(rows[0]);
    let cards = [
        ("Total Tasks", stats.total, palette.accent),
        ("Completed", stats.completed, palette.success),
        ("Pending", stats.pending, palette.warning),
    ];
    for (i, (label, value, color)) in cards.into_iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .style(palette.base())
        .block(titled(label, palette, false));
        f.render_widget(card, counts[i]);
    }

    draw_analytics(f, &stats, palette, rows[1]);
}

fn draw_analytics(f: &mut Frame, stats: &Statistics, palette: &Palette, area: Rect) {
    let bars = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let gauges = [
        (
            "Completion Rate",
            stats.completion_rate,
            format!("{}%", stats.completion_rate),
            palette.success,
        ),
        (
            "Productivity Score",
            stats.productivity_score,
            stats.productivity_score.to_string(),
            palette.accent,
        ),
        (
            "Current Streak",
            stats.streak_percent(),
            format!("{} days", stats.current_streak),
            palette.warning,
        ),
    ];
    for (i, (title, pct, label, color)) in gauges.into_iter().enumerate() {
        let gauge = Gauge::default()
            .block(titled(title, palette, false))
            .gauge_style(Style::default().fg(color).bg(palette.background))
            .percent(pct.min(100) as u16)
            .label(label);
        f.render_widget(gauge, bars[i]);
    }
}

fn draw_tasks(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let tasks = app.visible_tasks();
    if tasks.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from("No tasks yet!"),
            Line::from("Press 'a' to add your first task."),
        ])
        .style(Style::default().fg(palette.muted).bg(palette.background))
        .block(titled("Tasks", palette, true));
        f.render_widget(empty, area);
        return;
    }

    let today = Local::now().date_naive();
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|t| {
            let (mark, status_color) = if t.is_completed() {
                ("[x]", palette.success)
            } else {
                ("[ ]", palette.warning)
            };
            let mut due = vec![Span::styled(
                format!("  Due: {}", t.formatted_due()),
                Style::default().fg(palette.muted),
            )];
            if t.is_overdue(today) {
                due.push(Span::styled(
                    " (Overdue)",
                    Style::default().fg(palette.danger).add_modifier(Modifier::BOLD),
                ));
            } else if t.is_due_today(today) && !t.is_completed() {
                due.push(Span::styled(" (Today)", Style::default().fg(palette.warning)));
            }
            due.push(Span::styled(format!("  {}", t.status), Style::default().fg(status_color)));

            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{mark} "), Style::default().fg(status_color)),
                Span::raw(format!("[#{}] ", t.id)),
                Span::styled(t.title.as_str(), Style::default().fg(palette.text)),
            ])];
            if !t.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", t.description),
                    Style::default().fg(palette.muted),
                )));
            }
            lines.push(Line::from(due));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .style(palette.base())
        .block(titled("Tasks (a: add, Enter: toggle, d: delete)", palette, true))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_statistics(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let stats = app.store.statistics();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bars = [
        ("Completed", stats.completed, palette.success),
        ("Pending", stats.pending, palette.warning),
    ]
    .into_iter()
    .map(|(label, value, color)| {
        Bar::default()
            .label(Line::from(label))
            .value(value)
            .text_value(format!("{value} ({}%)", percent(value, stats.total)))
            .style(Style::default().fg(color))
    })
    .collect::<Vec<Bar>>();

    let chart = BarChart::default()
        .block(titled("Task Completion Overview", palette, false))
        .style(palette.base())
        .bar_width(14)
        .bar_gap(4)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, chunks[0]);

    draw_analytics(f, &stats, palette, chunks[1]);
}

fn draw_footer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let line = match &app.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Info => palette.accent,
                NoticeKind::Success => palette.success,
                NoticeKind::Error => palette.danger,
            };
            Line::from(Span::styled(notice.message.as_str(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "1/2/3: sections  t: theme  a: add  q: quit",
            Style::default().fg(palette.muted),
        )),
    };
    f.render_widget(
        Paragraph::new(line)
            .style(palette.base())
            .block(Block::default().borders(Borders::ALL).border_style(palette.border(false))),
        area,
    );
}

fn titled<'a>(title: &'a str, palette: &Palette, focused: bool) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(palette.border(focused))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
