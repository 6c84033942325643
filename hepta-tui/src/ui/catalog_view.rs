use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::app::App;

use super::{palette, styled_list, utils, Palette};

pub(super) fn render_catalog(frame: &mut Frame, app: &App, body: Rect) {
    let colors = palette(app.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Project picker line
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Tipología sections
        ])
        .split(body);

    render_picker_line(frame, app, chunks[0], &colors);
    render_search_box(frame, app, chunks[1], &colors);
    render_links(frame, app, chunks[2], &colors);
}

fn render_picker_line(frame: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let catalog = &app.catalog;
    let line = match &catalog.selected_project {
        Some(project) => Line::from(vec![
            Span::styled(project.nombre.clone(), Style::default().fg(colors.fg)),
            Span::styled("  Ctrl+P: cambiar", Style::default().fg(colors.dim)),
        ]),
        None => Line::from(Span::styled(
            "-- Selecciona un proyecto (Ctrl+P) --",
            Style::default().fg(colors.accent),
        )),
    };
    let picker = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.dim))
            .title(" Proyecto ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(picker, area);
}

fn render_search_box(frame: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let catalog = &app.catalog;

    // Disabled-section styling: the input greys out with the list.
    let (text, border) = if catalog.enabled {
        let (before, after) = catalog.search_input.split_at_cursor();
        (
            utils::input_with_cursor(before, after, true),
            Style::default().fg(colors.fg),
        )
    } else {
        (
            "(deshabilitado hasta elegir proyecto)".to_string(),
            Style::default().fg(colors.dim),
        )
    };

    let search = Paragraph::new(Span::styled(
        text,
        if catalog.enabled {
            Style::default().fg(colors.fg)
        } else {
            Style::default().fg(colors.dim)
        },
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Buscar tipología ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(search, area);
}

fn render_links(frame: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let catalog = &app.catalog;

    if catalog.no_results {
        let empty = Paragraph::new("No se encontraron tipologías para la búsqueda.")
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

    let link_style = if catalog.enabled {
        Style::default().fg(colors.fg)
    } else {
        Style::default().fg(colors.dim)
    };

    let mut items: Vec<ListItem> = Vec::new();
    let mut visible_index = 0usize;
    for group in &catalog.groups {
        if !group.visible {
            continue;
        }
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{} / {}", group.tipo, group.subtipo),
            Style::default()
                .fg(colors.dim)
                .add_modifier(Modifier::BOLD),
        ))));
        for link in &group.links {
            if !link.visible {
                continue;
            }
            let style = if catalog.enabled && visible_index == catalog.cursor {
                Style::default().fg(colors.accent)
            } else {
                link_style
            };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("  {}", link.tipologia.nombre), style),
                Span::styled(
                    format!("  ({} perfiles)", link.tipologia.perfiles),
                    Style::default().fg(colors.dim),
                ),
            ])));
            visible_index += 1;
        }
    }

    let title = format!(" Catálogo de conexiones ({}) ", catalog.visible_count());
    let list = styled_list(items, title, catalog.enabled, colors);
    frame.render_widget(list, area);
}
