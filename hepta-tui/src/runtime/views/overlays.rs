use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::commands::QuickAction;

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

/// Overlays are modal: exactly one is up at a time and it swallows all keys.
pub(super) fn handle_overlay_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.picker.is_some() {
        handle_picker_key(key, app);
    } else if app.reject_dialog.is_some() {
        handle_reject_dialog_key(key, app, action_tx);
    } else if app.preferences.is_some() {
        handle_preferences_key(key, app, action_tx);
    } else if app.drilldown.is_some() {
        handle_drilldown_key(key, app);
    }
}

fn handle_picker_key(key: KeyEvent, app: &mut App) {
    let Some(picker) = app.picker.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.picker = None;
        }
        KeyCode::Enter => {
            let choice = picker.current().cloned();
            if choice.is_some() {
                app.apply_picker_choice(choice);
            } else {
                app.picker = None;
            }
        }
        // Explicitly select "no project": clears the board filter, or drops
        // the catalog selection (which disables its category list).
        KeyCode::Delete => app.apply_picker_choice(None),
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            picker.input_clear();
        }
        KeyCode::Down => picker.select_next(),
        KeyCode::Up => picker.select_previous(),
        KeyCode::Backspace => picker.input_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            picker.input_char(c);
        }
        _ => {}
    }
}

fn handle_reject_dialog_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(dialog) = app.reject_dialog.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.reject_dialog = None;
        }
        KeyCode::Enter => {
            let motive = dialog.motive.value.clone();
            enqueue_action(
                action_tx,
                Action::ExecuteQuickAction {
                    conexion_id: dialog.conexion_id,
                    code: dialog.code.clone(),
                    action: QuickAction::Reject,
                    // The empty-motive precondition is enforced before the
                    // request is built; the dialog stays up on violation.
                    motive: Some(motive),
                },
            );
        }
        KeyCode::Backspace => dialog.motive.backspace(),
        KeyCode::Left => dialog.motive.move_left(),
        KeyCode::Right => dialog.motive.move_right(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            dialog.motive.insert(c);
        }
        _ => {}
    }
}

fn handle_preferences_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(prefs) = app.preferences.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.preferences = None;
        }
        KeyCode::Enter => {
            enqueue_action(action_tx, Action::SavePreferences);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if prefs.cursor + 1 < prefs.toggles.len() {
                prefs.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            prefs.cursor = prefs.cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            if let Some((_, enabled)) = prefs.toggles.get_mut(prefs.cursor) {
                *enabled = !*enabled;
            }
        }
        _ => {}
    }
}

fn handle_drilldown_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.drilldown = None;
        }
        _ => {}
    }
}
