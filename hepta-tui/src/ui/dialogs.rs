use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListItem, Padding, Paragraph},
    Frame,
};

use crate::app::{App, PickerPurpose};

use super::{palette, styled_list, utils};

pub(super) fn render_project_picker(frame: &mut Frame, app: &App) {
    let colors = palette(app.theme);
    let Some(picker) = app.picker.as_ref() else {
        return;
    };

    let area = utils::centered_rect(50, 18, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent))
        .title(match picker.purpose {
            PickerPurpose::CatalogProject => " Selecciona un proyecto ",
            PickerPurpose::BoardFilter => " Filtrar por proyecto ",
        })
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            ratatui::layout::Constraint::Length(2),
            ratatui::layout::Constraint::Min(0),
            ratatui::layout::Constraint::Length(1),
        ])
        .split(inner);

    let (before, after) = picker.search_input.split_at_cursor();
    let search = Paragraph::new(Span::styled(
        utils::input_with_cursor(before, after, true),
        Style::default().fg(colors.fg),
    ));
    frame.render_widget(search, chunks[0]);

    let items: Vec<ListItem> = picker
        .filtered
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let style = if i == picker.index {
                Style::default().fg(colors.accent)
            } else {
                Style::default().fg(colors.fg)
            };
            ListItem::new(Line::from(Span::styled(project.nombre.clone(), style)))
        })
        .collect();
    let title = format!(" Proyectos ({}/{}) ", picker.filtered.len(), picker.items.len());
    frame.render_widget(styled_list(items, title, true, &colors), chunks[1]);

    let hint = Paragraph::new(Span::styled(
        "Enter: elegir  Supr: ninguno  Esc: cancelar",
        Style::default().fg(colors.dim),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[2]);
}

pub(super) fn render_reject_dialog(frame: &mut Frame, app: &App) {
    let colors = palette(app.theme);
    let Some(dialog) = app.reject_dialog.as_ref() else {
        return;
    };

    let area = utils::centered_rect(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let (before, after) = dialog.motive.split_at_cursor();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Rechazar {}", dialog.code),
            Style::default().fg(colors.fg).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Motivo: ", Style::default().fg(colors.dim)),
            Span::styled(
                utils::input_with_cursor(before, after, true),
                Style::default().fg(colors.fg),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(colors.accent)),
            Span::raw(": Confirmar  "),
            Span::styled("Esc", Style::default().fg(colors.accent)),
            Span::raw(": Cancelar"),
        ]),
    ];

    let dialog_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.error))
            .title(" Rechazo ")
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(dialog_widget, area);
}

pub(super) fn render_preferences_dialog(frame: &mut Frame, app: &App) {
    let colors = palette(app.theme);
    let Some(prefs) = app.preferences.as_ref() else {
        return;
    };

    let area = utils::centered_rect(56, (prefs.toggles.len() + 6) as u16, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for (i, (panel, enabled)) in prefs.toggles.iter().enumerate() {
        let marker = if *enabled { "[x]" } else { "[ ]" };
        let style = if i == prefs.cursor {
            Style::default().fg(colors.accent)
        } else {
            Style::default().fg(colors.fg)
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}", marker, panel),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Espacio", Style::default().fg(colors.accent)),
        Span::raw(": Alternar  "),
        Span::styled("Enter", Style::default().fg(colors.accent)),
        Span::raw(": Guardar  "),
        Span::styled("Esc", Style::default().fg(colors.accent)),
        Span::raw(": Cancelar"),
    ]));

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.accent))
            .title(" Personalizar dashboard ")
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(dialog, area);
}

pub(super) fn render_drilldown_overlay(frame: &mut Frame, app: &App) {
    let colors = palette(app.theme);
    let Some(state) = app.drilldown.as_ref() else {
        return;
    };

    let area = utils::centered_rect(64, 16, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    if state.loading {
        lines.push(Line::from(Span::styled(
            "Cargando...",
            Style::default().fg(colors.dim),
        )));
    } else if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(colors.error),
        )));
    } else if state.rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No se encontraron conexiones.",
            Style::default().fg(colors.dim),
        )));
    } else {
        for detail in &state.rows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<24}", detail.codigo_conexion),
                    Style::default().fg(colors.fg).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    detail
                        .fecha_creacion
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                    Style::default().fg(colors.dim),
                ),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc: cerrar",
        Style::default().fg(colors.dim),
    )));

    let overlay = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.accent))
            .title(format!(" {} ", state.title))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(overlay, area);
}
