use anyhow::Result;
use hepta_client::domain::DashboardPreferences;
use hepta_client::ClientError;
use tracing::warn;

use crate::app::{App, DrilldownState, View};
use crate::backend::Backend;
use crate::suggest::BLUR_GRACE_MS;

use super::action_queue::{Action, ActionTx};

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    backend: &Backend,
    action_tx: &ActionTx,
) -> Result<()> {
    match action {
        Action::ExecuteQuickAction {
            conexion_id,
            code,
            action,
            motive,
        } => {
            execute_quick_action(app, backend, conexion_id, code, action, motive).await;
        }
        Action::RefreshDashboard => {
            refresh_dashboard(app, backend).await;
        }
        Action::OpenDrilldown {
            proyecto_id,
            proyecto_nombre,
            estado,
        } => {
            open_drilldown(app, backend, action_tx, proyecto_id, proyecto_nombre, estado);
        }
        Action::FinishDrilldown { result } => {
            // Discarded when the overlay was closed before the fetch landed.
            if let Some(state) = app.drilldown.as_mut() {
                state.loading = false;
                match result {
                    Ok(rows) => state.rows = rows,
                    Err(e) => state.error = Some(e.to_string()),
                }
            }
        }
        Action::MarkNotificationsRead => {
            mark_notifications_read(app, backend).await;
        }
        Action::PersistTheme => {
            persist_theme(app, backend).await;
        }
        Action::SavePreferences => {
            save_preferences(app, backend).await;
        }
        Action::SubmitConnectionForm => {
            submit_connection_form(app, backend).await;
        }
        Action::StartProfileLookup { field, query } => {
            start_profile_lookup(app, backend, action_tx, field, query);
        }
        Action::FinishProfileLookup {
            field,
            generation,
            result,
        } => {
            if let Some(form) = app.form.as_mut() {
                if let Some(profile) = form.profiles.get_mut(field) {
                    profile.suggestions.complete(generation, result);
                }
            }
        }
        Action::BlurProfileField { field } => {
            blur_profile_field(app, action_tx, field);
        }
        Action::ClearSuggestionsAfterBlur { field, generation } => {
            if let Some(form) = app.form.as_mut() {
                if let Some(profile) = form.profiles.get_mut(field) {
                    // Only an empty field loses its suggestions on blur.
                    if profile.input.value.trim().is_empty() {
                        profile.suggestions.clear_after_blur(generation);
                    }
                }
            }
        }
    }
    Ok(())
}

async fn execute_quick_action(
    app: &mut App,
    backend: &Backend,
    conexion_id: i64,
    code: String,
    action: crate::commands::QuickAction,
    motive: Option<String>,
) {
    // Precondition check happens before any network access.
    let change = match action.build_change(motive.as_deref()) {
        Ok(change) => change,
        Err(violation) => {
            app.set_error(violation.to_string());
            return;
        }
    };

    app.is_loading = true;
    match backend.change_status(conexion_id, &change).await {
        Ok(message) => {
            app.reject_dialog = None;
            app.set_status(if message.is_empty() {
                format!("{}: estado actualizado.", code)
            } else {
                message
            });
            refresh_dashboard(app, backend).await;
        }
        Err(ClientError::Unauthorized) => {
            app.set_error("Sesión expirada. Ejecuta `hepta-tui login` de nuevo.");
        }
        Err(e) => {
            app.set_error(format!("Error: {}", e));
        }
    }
    app.is_loading = false;
}

pub(super) async fn refresh_dashboard(app: &mut App, backend: &Backend) {
    match backend.fetch_dashboard().await {
        Ok(data) => app.set_dashboard(data),
        Err(ClientError::Unauthorized) => {
            app.set_error("Sesión expirada. Ejecuta `hepta-tui login` de nuevo.");
        }
        Err(e) => {
            app.set_error(format!("No se pudo actualizar el tablero: {}", e));
        }
    }
}

fn open_drilldown(
    app: &mut App,
    backend: &Backend,
    action_tx: &ActionTx,
    proyecto_id: String,
    proyecto_nombre: String,
    estado: hepta_client::domain::ConnectionStatus,
) {
    let title = format!(
        "Conexiones en estado \"{}\" para {}",
        estado.label(),
        proyecto_nombre
    );
    app.drilldown = Some(DrilldownState::loading(title));

    // The overlay shows its loading line while the fetch runs off-loop; the
    // completion lands as a FinishDrilldown action.
    let backend = backend.clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = backend.project_details(&proyecto_id, estado).await;
        let _ = tx.send(Action::FinishDrilldown { result });
    });
}

async fn mark_notifications_read(app: &mut App, backend: &Backend) {
    match backend.mark_notifications_read().await {
        Ok(()) => {
            // The badge only clears when the server confirmed the update.
            app.notifications_unread = 0;
            app.set_status("Notificaciones marcadas como leídas.");
        }
        Err(e) => {
            warn!(error = %e, "failed to mark notifications as read");
        }
    }
}

async fn persist_theme(app: &mut App, backend: &Backend) {
    // The toggle already applied locally; persistence failures are logged
    // and otherwise silent.
    if let Err(e) = backend.set_theme(app.theme.as_str()).await {
        warn!(error = %e, "failed to persist theme preference");
    }
    if let Err(e) = app.config.save() {
        warn!(error = %e, "failed to save local config");
    }
}

async fn save_preferences(app: &mut App, backend: &Backend) {
    let Some(state) = app.preferences.as_ref() else {
        return;
    };
    let prefs = DashboardPreferences {
        widgets_config: state.toggles.iter().cloned().collect(),
    };

    match backend.save_preferences(&prefs).await {
        Ok(message) => {
            app.prefs = prefs;
            app.preferences = None;
            app.set_status(message);
        }
        Err(ClientError::Rejected { message }) => {
            app.set_error(format!("Error al guardar preferencias: {}", message));
        }
        Err(_) => {
            app.set_error("Ocurrió un error de red al guardar preferencias.");
        }
    }
}

async fn submit_connection_form(app: &mut App, backend: &Backend) {
    let request = match app.form.as_ref().map(|form| form.to_request()) {
        None => return,
        Some(Err(message)) => {
            app.set_error(message);
            return;
        }
        Some(Ok(request)) => request,
    };

    if let Some(form) = app.form.as_mut() {
        form.submitting = true;
    }
    match backend.create_connection(&request).await {
        Ok(message) => {
            app.form = None;
            app.navigate_to(View::Dashboard);
            app.set_status(message);
            refresh_dashboard(app, backend).await;
        }
        Err(e) => {
            if let Some(form) = app.form.as_mut() {
                form.submitting = false;
            }
            app.set_error(format!("Error: {}", e));
        }
    }
}

fn start_profile_lookup(
    app: &mut App,
    backend: &Backend,
    action_tx: &ActionTx,
    field: usize,
    query: String,
) {
    let Some(form) = app.form.as_mut() else {
        return;
    };
    let Some(profile) = form.profiles.get_mut(field) else {
        return;
    };

    // begin_lookup cancels the in-flight task and gates on query length.
    let Some(generation) = profile.suggestions.begin_lookup(&query) else {
        return;
    };

    let backend = backend.clone();
    let tx = action_tx.clone();
    let handle = tokio::spawn(async move {
        let result = backend.search_profiles(query.trim()).await;
        let _ = tx.send(Action::FinishProfileLookup {
            field,
            generation,
            result,
        });
    });
    profile.suggestions.attach_task(handle);
}

fn blur_profile_field(app: &mut App, action_tx: &ActionTx, field: usize) {
    let Some(form) = app.form.as_ref() else {
        return;
    };
    let Some(profile) = form.profiles.get(field) else {
        return;
    };

    let generation = profile.suggestions.generation();
    let tx = action_tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(BLUR_GRACE_MS)).await;
        let _ = tx.send(Action::ClearSuggestionsAfterBlur { field, generation });
    });
}
