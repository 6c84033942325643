use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, BoardFocus, PickerPurpose, RejectDialogState, TextInput, View};
use crate::commands::QuickAction;

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_dashboard_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.board_focus == BoardFocus::Search {
        handle_search_key(key, app);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Tab => app.board.next_tab(),
        KeyCode::BackTab => app.board.previous_tab(),
        KeyCode::Char('/') => {
            app.board_focus = BoardFocus::Search;
        }
        KeyCode::Char('j') | KeyCode::Down => app.board.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.board.cursor_up(),
        KeyCode::Char('f') => app.open_project_picker(PickerPurpose::BoardFilter),
        KeyCode::Char('g') => app.board.cycle_kind_filter(),
        KeyCode::Char('c') => app.navigate_to(View::Catalog),
        KeyCode::Char('n') => {
            if app.notifications_unread > 0 {
                enqueue_action(action_tx, Action::MarkNotificationsRead);
            }
        }
        KeyCode::Char('p') => app.open_preferences(),
        KeyCode::Char('R') => enqueue_action(action_tx, Action::RefreshDashboard),
        KeyCode::Char('T') => {
            app.toggle_theme();
            enqueue_action(action_tx, Action::PersistTheme);
        }
        // Summary navigation and drill-down
        KeyCode::Char('J') => app.board.summary_cursor_down(),
        KeyCode::Char('K') => app.board.summary_cursor_up(),
        KeyCode::Char('h') | KeyCode::Char('l') => app.board.cycle_summary_status(),
        KeyCode::Char('d') => {
            if let Some((summary, estado)) = app.board.drilldown_target() {
                enqueue_action(
                    action_tx,
                    Action::OpenDrilldown {
                        proyecto_id: summary.id.clone(),
                        proyecto_nombre: summary.nombre.clone(),
                        estado,
                    },
                );
            }
        }
        KeyCode::Char(c) => handle_quick_action_key(c, app, action_tx),
        _ => {}
    }
}

fn handle_search_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.board.search_input_clear();
        }
        // Every keystroke re-runs the filters, no debounce.
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.board.search_input_char(c);
        }
        KeyCode::Backspace => app.board.search_input_backspace(),
        KeyCode::Left => app.board.search_input.move_left(),
        KeyCode::Right => app.board.search_input.move_right(),
        KeyCode::Home => app.board.search_input.home(),
        KeyCode::End => app.board.search_input.end(),
        KeyCode::Esc | KeyCode::Enter => {
            app.board_focus = BoardFocus::Rows;
        }
        _ => {}
    }
}

/// Quick actions dispatch through the registry, keyed by the shortcut of an
/// action available for the focused row's current state.
fn handle_quick_action_key(c: char, app: &mut App, action_tx: &ActionTx) {
    let Some(row) = app.board.focused_row() else {
        return;
    };
    let (conexion_id, code, status) = (row.id, row.code.clone(), row.status);
    let Some(action) = QuickAction::available_for(status)
        .iter()
        .find(|a| a.key() == c)
        .copied()
    else {
        return;
    };

    if action.needs_motive() {
        // Rejection goes through the motive dialog before anything is sent.
        app.reject_dialog = Some(RejectDialogState {
            conexion_id,
            code,
            motive: TextInput::new(),
        });
        return;
    }

    enqueue_action(
        action_tx,
        Action::ExecuteQuickAction {
            conexion_id,
            code,
            action,
            motive: None,
        },
    );
}
