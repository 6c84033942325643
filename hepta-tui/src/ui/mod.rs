use crate::app::{App, Theme, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

mod catalog_view;
mod dashboard_view;
mod dialogs;
mod form_view;
pub(super) mod utils;

/// Theme-dependent colors; everything else renders in the terminal's own
/// palette.
pub(super) struct Palette {
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub error: Color,
}

pub(super) fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Yellow,
            error: Color::Red,
        },
        Theme::Light => Palette {
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            error: Color::LightRed,
        },
    }
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, root[0], app);

    let body = root[1];
    match app.current_view {
        View::Dashboard => dashboard_view::render_dashboard(frame, app, body),
        View::Catalog => catalog_view::render_catalog(frame, app, body),
        View::NewConnection => form_view::render_connection_form(frame, app, body),
    }

    render_status_line(frame, root[2], app);

    // Overlays render on top of whatever view is active.
    if app.picker.is_some() {
        dialogs::render_project_picker(frame, app);
    } else if app.reject_dialog.is_some() {
        dialogs::render_reject_dialog(frame, app);
    } else if app.preferences.is_some() {
        dialogs::render_preferences_dialog(frame, app);
    } else if app.drilldown.is_some() {
        dialogs::render_drilldown_overlay(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = palette(app.theme);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(0),
            Constraint::Length(24),
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Hepta-Conexiones",
        Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, cols[0]);

    if app.is_loading {
        let throbber_area = Rect {
            x: cols[1].x,
            y: cols[1].y,
            width: 1,
            height: 1,
        };
        let throbber = throbber_widgets_tui::Throbber::default()
            .style(Style::default().fg(colors.accent))
            .throbber_style(Style::default().fg(colors.accent))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
        frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    }

    // Unread badge, cleared only once the server confirms the mark-read.
    let badge = if app.notifications_unread > 0 {
        Line::from(vec![
            Span::styled(
                format!("({}) sin leer ", app.notifications_unread),
                Style::default().fg(colors.error),
            ),
            Span::styled("n: leídas", Style::default().fg(colors.dim)),
        ])
    } else {
        Line::from(Span::styled("sin notificaciones", Style::default().fg(colors.dim)))
    };
    frame.render_widget(
        Paragraph::new(badge).alignment(Alignment::Right),
        cols[2],
    );
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let colors = palette(app.theme);

    let line = match &app.status {
        Some(notice) => {
            let style = if notice.is_error {
                Style::default().fg(colors.error).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.accent)
            };
            Line::from(Span::styled(notice.text.clone(), style))
        }
        None => {
            let hint = match app.current_view {
                View::Dashboard => {
                    "Tab: panel  /: buscar  f: proyecto  g: tipo  c: catálogo  p: paneles  T: tema  q: salir"
                }
                View::Catalog => {
                    "Ctrl+P: proyecto  escribe: filtrar  Enter: elegir tipología  Esc: volver"
                }
                View::NewConnection => {
                    "Tab: campo  ↑↓: sugerencias  Enter: aplicar  Ctrl+S: enviar  Esc: cancelar"
                }
            };
            Line::from(Span::styled(hint, Style::default().fg(colors.dim)))
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// A bordered list with the standard accent-on-focus styling used by every
/// list in the app.
pub(super) fn styled_list<'a>(
    items: Vec<ListItem<'a>>,
    title: String,
    focused: bool,
    colors: &Palette,
) -> List<'a> {
    let border = if focused {
        Style::default().fg(colors.fg)
    } else {
        Style::default().fg(colors.dim)
    };
    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
            .padding(Padding::horizontal(1)),
    )
}
