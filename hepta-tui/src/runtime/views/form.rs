use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, View};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(form) = app.form.as_mut() else {
        app.navigate_to(View::Dashboard);
        return;
    };

    match key.code {
        KeyCode::Esc => {
            // Abandon the draft and return to the catalog.
            app.form = None;
            app.navigate_to(View::Catalog);
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            enqueue_action(action_tx, Action::SubmitConnectionForm);
        }
        KeyCode::Tab => {
            if let Some(blurred) = form.focus_next() {
                enqueue_action(action_tx, Action::BlurProfileField { field: blurred });
            }
        }
        KeyCode::BackTab => {
            if let Some(blurred) = form.focus_previous() {
                enqueue_action(action_tx, Action::BlurProfileField { field: blurred });
            }
        }
        KeyCode::Down => {
            if let Some(profile) = form.focused_profile_mut() {
                profile.suggestions.select_next();
            }
        }
        KeyCode::Up => {
            if let Some(profile) = form.focused_profile_mut() {
                profile.suggestions.select_previous();
            }
        }
        KeyCode::Enter => {
            // Enter applies the highlighted suggestion; with none selected it
            // submits from the description field.
            if !form.apply_selected_suggestion() && form.description_focused() {
                enqueue_action(action_tx, Action::SubmitConnectionForm);
            }
        }
        KeyCode::Backspace => {
            let field = form.focused;
            if let Some(profile) = form.focused_profile_mut() {
                profile.input.backspace();
                let query = profile.input.value.clone();
                enqueue_action(action_tx, Action::StartProfileLookup { field, query });
            } else {
                form.description.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(profile) = form.focused_profile_mut() {
                profile.input.move_left();
            } else {
                form.description.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(profile) = form.focused_profile_mut() {
                profile.input.move_right();
            } else {
                form.description.move_right();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let field = form.focused;
            if let Some(profile) = form.focused_profile_mut() {
                profile.input.insert(c);
                // Every keystroke supersedes the in-flight lookup.
                let query = profile.input.value.clone();
                enqueue_action(action_tx, Action::StartProfileLookup { field, query });
            } else {
                form.description.insert(c);
            }
        }
        _ => {}
    }
}
