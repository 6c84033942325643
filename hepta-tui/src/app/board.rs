use std::collections::HashMap;

use hepta_client::domain::{ConnectionStatus, DashboardData, ProjectRef, ProjectSummary};

use crate::filter::FilterCriteria;
use crate::types::{BoardPanels, BoardRow, TaskTab};

use super::TextInput;

/// The dashboard task board: four panels filtered by one shared set of
/// controls (project, tipo, free-text search).
#[derive(Debug)]
pub struct BoardState {
    pub panels: BoardPanels,
    pub active_tab: TaskTab,
    pub projects: Vec<ProjectRef>,
    pub kinds: Vec<String>,
    pub project_filter: Option<ProjectRef>,
    pub kind_filter: Option<String>,
    pub search_input: TextInput,
    pub no_results: bool,
    pub cursor: usize,
    pub summary: Vec<ProjectSummary>,
    pub estados: HashMap<ConnectionStatus, u64>,
    pub summary_cursor: usize,
    pub summary_status: ConnectionStatus,
    criteria: FilterCriteria,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            panels: BoardPanels::default(),
            active_tab: TaskTab::PendingApproval,
            projects: Vec::new(),
            kinds: Vec::new(),
            project_filter: None,
            kind_filter: None,
            search_input: TextInput::new(),
            no_results: false,
            cursor: 0,
            summary: Vec::new(),
            estados: HashMap::new(),
            summary_cursor: 0,
            summary_status: ConnectionStatus::Requested,
            criteria: FilterCriteria::default(),
        }
    }

    /// Replace the board contents from a fresh dashboard payload. The active
    /// filter controls survive the refresh and are re-applied immediately.
    pub fn set_data(&mut self, data: DashboardData) {
        self.panels = BoardPanels::from_tasks(data.tasks);
        self.kinds = distinct_kinds(&self.panels);
        self.summary = data.resumen_proyectos;
        self.estados = data.estados;

        // Keep the project filter only if the project still exists.
        if let Some(filter) = &self.project_filter {
            if !data.proyectos.iter().any(|p| p.id == filter.id) {
                self.project_filter = None;
            }
        }
        self.projects = data.proyectos;

        self.apply_filters();
    }

    /// Rebuild the criteria from the current control values and re-evaluate
    /// every panel, so inactive tabs are correct the moment they are shown.
    pub fn apply_filters(&mut self) {
        self.criteria = FilterCriteria::new(
            self.project_filter.as_ref().map(|p| p.id.clone()),
            self.kind_filter.clone(),
            &self.search_input.value,
        );
        self.criteria.apply_all(&mut self.panels);

        let visible = self.visible_len();
        self.no_results = self.criteria.no_results(visible);
        if self.cursor >= visible {
            self.cursor = visible.saturating_sub(1);
        }
    }

    pub fn activate_tab(&mut self, tab: TaskTab) {
        self.active_tab = tab;
        self.cursor = 0;
        self.apply_filters();
    }

    pub fn next_tab(&mut self) {
        self.activate_tab(self.active_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.activate_tab(self.active_tab.previous());
    }

    pub fn search_input_char(&mut self, c: char) {
        self.search_input.insert(c);
        self.apply_filters();
    }

    pub fn search_input_backspace(&mut self) {
        self.search_input.backspace();
        self.apply_filters();
    }

    pub fn search_input_clear(&mut self) {
        self.search_input.clear();
        self.apply_filters();
    }

    pub fn set_project_filter(&mut self, project: Option<ProjectRef>) {
        self.project_filter = project;
        self.apply_filters();
    }

    /// Step the tipo filter through unset -> each known kind -> unset.
    pub fn cycle_kind_filter(&mut self) {
        self.kind_filter = match &self.kind_filter {
            None => self.kinds.first().cloned(),
            Some(current) => {
                let next = self
                    .kinds
                    .iter()
                    .position(|k| k == current)
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.kinds.get(next).cloned()
            }
        };
        self.apply_filters();
    }

    pub fn visible_rows(&self) -> Vec<&BoardRow> {
        self.panels
            .rows(self.active_tab)
            .iter()
            .filter(|r| r.visible)
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        self.panels
            .rows(self.active_tab)
            .iter()
            .filter(|r| r.visible)
            .count()
    }

    pub fn focused_row(&self) -> Option<&BoardRow> {
        self.visible_rows().get(self.cursor).copied()
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.visible_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn summary_cursor_down(&mut self) {
        if self.summary_cursor + 1 < self.summary.len() {
            self.summary_cursor += 1;
        }
    }

    pub fn summary_cursor_up(&mut self) {
        if self.summary_cursor > 0 {
            self.summary_cursor -= 1;
        }
    }

    /// Step the drill-down status column through the chartable states.
    pub fn cycle_summary_status(&mut self) {
        self.summary_status = match self.summary_status {
            ConnectionStatus::Requested => ConnectionStatus::InProgress,
            ConnectionStatus::InProgress => ConnectionStatus::Approved,
            ConnectionStatus::Approved => ConnectionStatus::Rejected,
            _ => ConnectionStatus::Requested,
        };
    }

    pub fn drilldown_target(&self) -> Option<(&ProjectSummary, ConnectionStatus)> {
        self.summary
            .get(self.summary_cursor)
            .map(|s| (s, self.summary_status))
    }
}

/// Distinct tipo values across every panel, sorted for stable display.
fn distinct_kinds(panels: &BoardPanels) -> Vec<String> {
    let mut kinds: Vec<String> = Vec::new();
    for tab in TaskTab::ALL {
        for row in panels.rows(tab) {
            if !kinds.iter().any(|k| k.eq_ignore_ascii_case(&row.kind)) {
                kinds.push(row.kind.clone());
            }
        }
    }
    kinds.sort();
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hepta_client::domain::{DashboardTasks, TaskRow};

    fn task(id: i64, project: &str, tipo: &str, code: &str) -> TaskRow {
        TaskRow {
            id,
            codigo_conexion: code.to_string(),
            proyecto_id: project.to_string(),
            proyecto_nombre: format!("Proyecto {}", project),
            tipo: tipo.to_string(),
            estado: ConnectionStatus::Requested,
            fecha_creacion: Utc::now(),
        }
    }

    fn board() -> BoardState {
        let mut board = BoardState::new();
        board.set_data(DashboardData {
            tasks: DashboardTasks {
                disponibles: vec![
                    task(1, "1", "A", "Foo"),
                    task(2, "1", "B", "Bar"),
                    task(3, "2", "A", "Foo"),
                ],
                mis_solicitudes: vec![task(4, "1", "A", "Baz")],
                ..Default::default()
            },
            proyectos: vec![
                ProjectRef {
                    id: "1".to_string(),
                    nombre: "Torre Norte".to_string(),
                },
                ProjectRef {
                    id: "2".to_string(),
                    nombre: "Puente Sur".to_string(),
                },
            ],
            ..Default::default()
        });
        board.activate_tab(TaskTab::Available);
        board
    }

    #[test]
    fn test_search_keystrokes_refilter_immediately() {
        let mut board = board();
        for c in "fo".chars() {
            board.search_input_char(c);
        }
        assert_eq!(board.visible_len(), 2);
        board.search_input_backspace();
        board.search_input_backspace();
        assert_eq!(board.visible_len(), 3);
    }

    #[test]
    fn test_project_and_search_combined() {
        let mut board = board();
        let torre = board.projects[0].clone();
        board.set_project_filter(Some(torre));
        for c in "fo".chars() {
            board.search_input_char(c);
        }
        let visible = board.visible_rows();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn test_tab_activation_reapplies_filters() {
        let mut board = board();
        for c in "baz".chars() {
            board.search_input_char(c);
        }
        assert_eq!(board.visible_len(), 0);
        assert!(board.no_results);

        // The hidden panel was filtered while inactive; switching to it must
        // show the correct subset straight away.
        board.activate_tab(TaskTab::MyRequests);
        assert_eq!(board.visible_len(), 1);
        assert!(!board.no_results);
    }

    #[test]
    fn test_kind_filter_cycles_through_known_kinds() {
        let mut board = board();
        assert_eq!(board.kinds, vec!["A".to_string(), "B".to_string()]);

        board.cycle_kind_filter();
        assert_eq!(board.kind_filter.as_deref(), Some("A"));
        assert_eq!(board.visible_len(), 2);

        board.cycle_kind_filter();
        assert_eq!(board.kind_filter.as_deref(), Some("B"));
        assert_eq!(board.visible_len(), 1);

        board.cycle_kind_filter();
        assert_eq!(board.kind_filter, None);
        assert_eq!(board.visible_len(), 3);
    }

    #[test]
    fn test_refresh_preserves_controls_and_drops_dead_projects() {
        let mut board = board();
        let puente = board.projects[1].clone();
        board.set_project_filter(Some(puente));
        assert_eq!(board.visible_len(), 1);

        board.set_data(DashboardData {
            tasks: DashboardTasks {
                disponibles: vec![task(9, "1", "A", "Foo")],
                ..Default::default()
            },
            proyectos: vec![ProjectRef {
                id: "1".to_string(),
                nombre: "Torre Norte".to_string(),
            }],
            ..Default::default()
        });
        assert_eq!(board.project_filter, None);
        assert_eq!(board.visible_len(), 1);
    }
}
