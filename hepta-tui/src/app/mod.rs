use hepta_client::domain::{
    CatalogStructure, DashboardData, DashboardPreferences, ProjectRef,
};

mod board;
pub mod catalog;
mod form;
mod picker;
mod state;

pub use board::BoardState;
pub use catalog::{CatalogSelection, CatalogState};
pub use form::{ConnectionFormState, ProfileField};
pub use picker::ProjectPickerState;
pub use state::{
    BoardFocus, DrilldownState, PickerPurpose, PreferencesState, RejectDialogState, StatusNotice,
    TextInput, Theme, View,
};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub theme: Theme,
    pub status: Option<StatusNotice>,
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    // Dashboard task board and its filter controls
    pub board: BoardState,
    pub board_focus: BoardFocus,

    // Catalog screen
    pub catalog: CatalogState,

    // New-connection form, present while the user is filling one in
    pub form: Option<ConnectionFormState>,

    // Overlays
    pub picker: Option<ProjectPickerState>,
    pub reject_dialog: Option<RejectDialogState>,
    pub drilldown: Option<DrilldownState>,
    pub preferences: Option<PreferencesState>,

    // Dashboard preferences as last confirmed by the server
    pub prefs: DashboardPreferences,
    pub notifications_unread: u32,

    // Config values used at runtime (theme is written back on toggle)
    pub config: crate::config::HeptaConfig,
}

impl App {
    pub fn new(config: crate::config::HeptaConfig) -> Self {
        let theme = Theme::from_str_or_dark(&config.theme);
        Self {
            running: true,
            current_view: View::Dashboard,
            theme,
            status: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            board: BoardState::new(),
            board_focus: BoardFocus::Rows,
            catalog: CatalogState::default(),
            form: None,
            picker: None,
            reject_dialog: None,
            drilldown: None,
            preferences: None,
            prefs: DashboardPreferences::default(),
            notifications_unread: 0,
            config,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusNotice::info(text));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusNotice::error(text));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Apply a dashboard payload: board contents, unread badge and the saved
    /// widget preferences.
    pub fn set_dashboard(&mut self, data: DashboardData) {
        self.notifications_unread = data.notificaciones_sin_leer;
        self.prefs = data.preferencias.clone();
        self.board.set_data(data);
    }

    /// Apply a fetched catalog structure, preserving the current project
    /// selection across refreshes.
    pub fn set_catalog(&mut self, structure: CatalogStructure) {
        let preselected = self.catalog.selected_project.clone();
        self.catalog = CatalogState::from_structure(&structure, preselected);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.config.theme = self.theme.as_str().to_string();
    }

    pub fn open_project_picker(&mut self, purpose: PickerPurpose) {
        self.picker = Some(ProjectPickerState::new(
            purpose,
            self.board.projects.clone(),
        ));
    }

    /// Route a confirmed picker choice to whichever control opened it.
    /// `None` means the selection was cleared.
    pub fn apply_picker_choice(&mut self, choice: Option<ProjectRef>) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        match picker.purpose {
            PickerPurpose::CatalogProject => self.catalog.on_project_change(choice),
            PickerPurpose::BoardFilter => self.board.set_project_filter(choice),
        }
    }

    pub fn open_preferences(&mut self) {
        let toggles = DashboardPreferences::default_visible_widgets()
            .iter()
            .map(|&panel| (panel.to_string(), self.prefs.is_visible(panel)))
            .collect();
        self.preferences = Some(PreferencesState { toggles, cursor: 0 });
    }

    /// True while a modal overlay swallows every key.
    pub fn overlay_active(&self) -> bool {
        self.picker.is_some()
            || self.reject_dialog.is_some()
            || self.drilldown.is_some()
            || self.preferences.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hepta_client::domain::DashboardTasks;

    #[test]
    fn test_picker_choice_routes_by_purpose() {
        let mut app = App::new(crate::config::HeptaConfig::default());
        app.set_dashboard(DashboardData {
            tasks: DashboardTasks::default(),
            proyectos: vec![ProjectRef {
                id: "1".to_string(),
                nombre: "Torre Norte".to_string(),
            }],
            ..Default::default()
        });

        app.open_project_picker(PickerPurpose::CatalogProject);
        app.apply_picker_choice(Some(app.board.projects[0].clone()));
        assert!(app.catalog.enabled);
        assert!(app.picker.is_none());

        app.open_project_picker(PickerPurpose::BoardFilter);
        app.apply_picker_choice(Some(app.board.projects[0].clone()));
        assert_eq!(app.board.project_filter.as_ref().unwrap().id, "1");
    }

    #[test]
    fn test_preferences_overlay_starts_from_saved_state() {
        let mut app = App::new(crate::config::HeptaConfig::default());
        app.prefs
            .widgets_config
            .insert("tasks-panel".to_string(), false);
        app.open_preferences();
        let prefs = app.preferences.as_ref().unwrap();
        let tasks = prefs
            .toggles
            .iter()
            .find(|(panel, _)| panel == "tasks-panel")
            .unwrap();
        assert!(!tasks.1);
    }
}
