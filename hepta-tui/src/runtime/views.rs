use crossterm::event::KeyEvent;

use crate::app::{App, View};

use super::action_queue::{Action, ActionTx};

mod catalog;
mod dashboard;
mod form;
mod overlays;

pub(super) fn enqueue_action(action_tx: &ActionTx, action: Action) {
    // A send can only fail when the loop is shutting down; nothing to do.
    let _ = action_tx.send(action);
}

/// Route a key press to the active overlay, or to the current view.
pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.overlay_active() {
        overlays::handle_overlay_key(key, app, action_tx);
        return;
    }

    match app.current_view {
        View::Dashboard => dashboard::handle_dashboard_key(key, app, action_tx),
        View::Catalog => catalog::handle_catalog_key(key, app, action_tx),
        View::NewConnection => form::handle_form_key(key, app, action_tx),
    }
}
