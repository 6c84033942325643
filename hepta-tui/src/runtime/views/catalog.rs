use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, ConnectionFormState, PickerPurpose, View};

use super::super::action_queue::ActionTx;

pub(super) fn handle_catalog_key(key: KeyEvent, app: &mut App, _action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.open_project_picker(PickerPurpose::CatalogProject);
        }
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.catalog.enabled {
                app.catalog.search_input_clear();
            }
        }
        KeyCode::Esc => app.navigate_to(View::Dashboard),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Down => app.catalog.cursor_down(),
        KeyCode::Up => app.catalog.cursor_up(),
        KeyCode::Enter => match app.catalog.activate_cursor() {
            Ok(selection) => {
                app.form = Some(ConnectionFormState::new(selection));
                app.navigate_to(View::NewConnection);
                app.clear_status();
            }
            // Guarded no-op: no navigation, blocking warning instead.
            Err(warning) => app.set_error(warning),
        },
        KeyCode::Backspace => {
            if app.catalog.enabled {
                app.catalog.search_input_backspace();
            }
        }
        // The search input is disabled until a project is picked, exactly
        // like the category links themselves.
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.catalog.enabled {
                app.catalog.search_input_char(c);
            }
        }
        _ => {}
    }
}
