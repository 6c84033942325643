use hepta_client::domain::ConnectionStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Tabs},
    Frame,
};
use tui_piechart::{PieChart, PieSlice};

use crate::app::{App, BoardFocus};
use crate::commands::QuickAction;
use crate::types::TaskTab;

use super::{palette, styled_list, utils, Palette};

pub(super) fn render_dashboard(frame: &mut Frame, app: &App, body: Rect) {
    let colors = palette(app.theme);

    let show_summary = app.prefs.is_visible("my-projects-summary-panel") && body.width >= 100;
    let cols = if show_summary {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(44)])
            .split(body)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0)])
            .split(body)
    };

    if app.prefs.is_visible("tasks-panel") {
        render_task_board(frame, app, cols[0], &colors);
    } else {
        let hidden = Paragraph::new("Panel de tareas oculto (p: paneles)")
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.dim));
        frame.render_widget(hidden, cols[0]);
    }

    if show_summary {
        render_summary_panel(frame, app, cols[1], &colors);
    }
}

fn render_task_board(frame: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let rows_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Length(3), // Filter bar
            Constraint::Min(0),    // Rows
        ])
        .split(area);

    let titles: Vec<Line> = TaskTab::ALL
        .iter()
        .map(|tab| Line::from(tab.title()))
        .collect();
    let selected = TaskTab::ALL
        .iter()
        .position(|t| *t == app.board.active_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(colors.dim))
        .highlight_style(
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, rows_chunk[0]);

    render_filter_bar(frame, app, rows_chunk[1], colors);
    render_rows(frame, app, rows_chunk[2], colors);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let board = &app.board;
    let search_focused = app.board_focus == BoardFocus::Search;

    let project = board
        .project_filter
        .as_ref()
        .map(|p| p.nombre.as_str())
        .unwrap_or("todos");
    let kind = board.kind_filter.as_deref().unwrap_or("todos");

    let (before, after) = board.search_input.split_at_cursor();
    let search = utils::input_with_cursor(before, after, search_focused);

    let line = Line::from(vec![
        Span::styled("Proyecto: ", Style::default().fg(colors.dim)),
        Span::styled(project, Style::default().fg(colors.fg)),
        Span::styled("  Tipo: ", Style::default().fg(colors.dim)),
        Span::styled(kind, Style::default().fg(colors.fg)),
        Span::styled("  Buscar: ", Style::default().fg(colors.dim)),
        Span::styled(
            search,
            if search_focused {
                Style::default().fg(colors.accent)
            } else {
                Style::default().fg(colors.fg)
            },
        ),
    ]);

    let border = if search_focused {
        Style::default().fg(colors.accent)
    } else {
        Style::default().fg(colors.dim)
    };
    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Filtros ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(bar, area);
}

fn render_rows(frame: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let board = &app.board;
    let visible = board.visible_rows();

    // The default unfiltered-empty state and the filtered-to-nothing state
    // read differently on purpose.
    if visible.is_empty() {
        let text = if board.no_results {
            "No se encontraron resultados para la búsqueda."
        } else {
            "No hay tareas en este panel."
        };
        let empty = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.dim))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.dim)),
            );
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let focused = i == board.cursor && app.board_focus == BoardFocus::Rows;
            let base = if focused {
                Style::default().fg(colors.accent)
            } else {
                Style::default().fg(colors.fg)
            };
            let actions: String = QuickAction::available_for(row.status)
                .iter()
                .map(|a| format!("[{}:{}] ", a.key(), a.label()))
                .collect();
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<22}", row.code), base),
                Span::styled(
                    format!("{:<18}", row.project_name),
                    Style::default().fg(colors.dim),
                ),
                Span::styled(format!("{:<14}", row.kind), Style::default().fg(colors.dim)),
                Span::styled(
                    format!("{:<12}", row.status.label()),
                    Style::default().fg(status_color(row.status)),
                ),
                Span::styled(
                    format!("{:<12}", row.created_at.format("%Y-%m-%d")),
                    Style::default().fg(colors.dim),
                ),
                Span::styled(actions, Style::default().fg(colors.dim)),
            ]))
        })
        .collect();

    let title = format!(
        " {} ({}/{}) ",
        board.active_tab.title(),
        visible.len(),
        board.panels.rows(board.active_tab).len()
    );
    let list = styled_list(items, title, app.board_focus == BoardFocus::Rows, colors);
    frame.render_widget(list, area);
}

fn render_summary_panel(frame: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(area);

    render_status_pie(frame, app, chunks[0], colors);
    render_project_summary(frame, app, chunks[1], colors);
}

/// Doughnut-equivalent of the original: share of connections per state.
fn render_status_pie(frame: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.dim))
        .title(" Estados ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total: u64 = app.board.estados.values().sum();
    if total == 0 {
        let empty = Paragraph::new("No hay datos para mostrar el gráfico.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.dim));
        frame.render_widget(empty, inner);
        return;
    }

    let slices: Vec<PieSlice> = ConnectionStatus::ALL
        .iter()
        .filter_map(|status| {
            let count = *app.board.estados.get(status)?;
            if count == 0 {
                return None;
            }
            let pct = count as f64 / total as f64 * 100.0;
            Some(PieSlice::new(status.label(), pct, status_color(*status)))
        })
        .collect();

    let pie = PieChart::new(slices).show_percentages(false);
    frame.render_widget(pie, inner);
}

fn render_project_summary(frame: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let board = &app.board;

    let items: Vec<ListItem> = board
        .summary
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let focused = i == board.summary_cursor;
            let name_style = if focused {
                Style::default().fg(colors.accent)
            } else {
                Style::default().fg(colors.fg)
            };
            ListItem::new(vec![
                Line::from(Span::styled(summary.nombre.clone(), name_style)),
                Line::from(vec![
                    Span::styled(
                        format!("  S:{} ", summary.solicitadas),
                        Style::default().fg(status_color(ConnectionStatus::Requested)),
                    ),
                    Span::styled(
                        format!("P:{} ", summary.en_proceso),
                        Style::default().fg(status_color(ConnectionStatus::InProgress)),
                    ),
                    Span::styled(
                        format!("A:{} ", summary.aprobadas),
                        Style::default().fg(status_color(ConnectionStatus::Approved)),
                    ),
                    Span::styled(
                        format!("R:{}", summary.rechazadas),
                        Style::default().fg(status_color(ConnectionStatus::Rejected)),
                    ),
                ]),
            ])
        })
        .collect();

    let title = format!(
        " Proyectos (d: detalle {}) ",
        board.summary_status.label()
    );
    let list = styled_list(items, title, false, colors);
    frame.render_widget(list, area);
}

/// One color per state, matching the original dashboard's state color map.
pub(super) fn status_color(status: ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Requested => Color::Blue,
        ConnectionStatus::InProgress => Color::Cyan,
        ConnectionStatus::Completed => Color::Yellow,
        ConnectionStatus::Approved => Color::Green,
        ConnectionStatus::Rejected => Color::Red,
    }
}
