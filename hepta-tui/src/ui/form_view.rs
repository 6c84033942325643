use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::app::App;
use crate::suggest::LookupState;

use super::{palette, styled_list, utils, Palette};

pub(super) fn render_connection_form(frame: &mut Frame, app: &App, body: Rect) {
    let colors = palette(app.theme);
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let mut constraints = vec![Constraint::Length(2)]; // header
    for _ in &form.profiles {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(3)); // description
    constraints.push(Constraint::Min(0)); // suggestion list

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(body);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(
                "{} ({} / {})",
                form.selection.tipologia.nombre, form.selection.tipo, form.selection.subtipo
            ),
            Style::default().fg(colors.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({})", form.selection.project.nombre),
            Style::default().fg(colors.dim),
        ),
    ]));
    frame.render_widget(header, chunks[0]);

    for (i, profile) in form.profiles.iter().enumerate() {
        let focused = form.focused == i;
        let (before, after) = profile.input.split_at_cursor();
        let text = utils::input_with_cursor(before, after, focused);
        let border = if focused {
            Style::default().fg(colors.accent)
        } else {
            Style::default().fg(colors.dim)
        };
        let searching = profile.suggestions.state() == LookupState::Querying;
        let title = if searching {
            format!(" {} (buscando…) ", profile.label)
        } else {
            format!(" {} ", profile.label)
        };
        let input = Paragraph::new(Span::styled(text, Style::default().fg(colors.fg))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title)
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(input, chunks[1 + i]);
    }

    let description_chunk = chunks[1 + form.profiles.len()];
    let focused = form.description_focused();
    let (before, after) = form.description.split_at_cursor();
    let text = utils::input_with_cursor(before, after, focused);
    let border = if focused {
        Style::default().fg(colors.accent)
    } else {
        Style::default().fg(colors.dim)
    };
    let description = Paragraph::new(Span::styled(text, Style::default().fg(colors.fg))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Descripción (opcional) ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(description, description_chunk);

    render_suggestions(frame, form, chunks[2 + form.profiles.len()], &colors);
}

/// Suggestions for the focused profile field, ordered as the server returned
/// them.
fn render_suggestions(
    frame: &mut Frame,
    form: &crate::app::ConnectionFormState,
    area: Rect,
    colors: &Palette,
) {
    let Some(profile) = form.profiles.get(form.focused) else {
        return;
    };
    if profile.suggestions.items.is_empty() {
        return;
    }

    let items: Vec<ListItem> = profile
        .suggestions
        .items
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            let style = if profile.suggestions.selected == Some(i) {
                Style::default().fg(colors.accent)
            } else {
                Style::default().fg(colors.fg)
            };
            ListItem::new(Line::from(Span::styled(suggestion.label.clone(), style)))
        })
        .collect();

    let title = format!(" Perfiles sugeridos ({}) ", profile.suggestions.items.len());
    let list = styled_list(items, title, true, colors);
    frame.render_widget(list, area);
}
