use crate::app::App;
use crate::backend::Backend;

/// Load everything the UI needs before the first frame: dashboard payload
/// (task panels, projects, summary, unread badge, preferences) and the
/// catalog structure. Failures degrade to warnings; the app still starts.
pub async fn initialize_app_state(app: &mut App, backend: &Backend) {
    app.is_loading = true;

    match backend.fetch_dashboard().await {
        Ok(data) => app.set_dashboard(data),
        Err(e) => eprintln!("Warning: Could not load dashboard: {}", e),
    }

    match backend.fetch_catalog().await {
        Ok(structure) => app.set_catalog(structure),
        Err(e) => eprintln!("Warning: Could not load catalog: {}", e),
    }

    app.is_loading = false;
}
