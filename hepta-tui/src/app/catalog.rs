use hepta_client::domain::{CatalogStructure, ProjectRef, Tipologia};

use super::TextInput;

pub const SELECT_PROJECT_FIRST: &str = "Por favor, selecciona un proyecto primero.";

/// One tipología entry in the catalog list.
#[derive(Debug, Clone)]
pub struct CatalogLink {
    pub tipologia: Tipologia,
    pub visible: bool,
}

/// One (tipo, subtipo) section of the catalog. A section is shown only while
/// at least one of its links is.
#[derive(Debug, Clone)]
pub struct CatalogGroup {
    pub tipo: String,
    pub subtipo: String,
    pub links: Vec<CatalogLink>,
    pub visible: bool,
}

/// A confirmed catalog choice, ready to prefill the request form.
#[derive(Debug, Clone)]
pub struct CatalogSelection {
    pub project: ProjectRef,
    pub tipo: String,
    pub subtipo: String,
    pub tipologia: Tipologia,
}

/// View state of the catalog screen.
///
/// The tipología list and its search input are enabled iff a project is
/// selected; dropping the selection force-clears the search term and re-runs
/// the filter so no link stays hidden behind a stale term.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub groups: Vec<CatalogGroup>,
    pub selected_project: Option<ProjectRef>,
    pub enabled: bool,
    pub search_input: TextInput,
    pub no_results: bool,
    pub cursor: usize,
}

impl CatalogState {
    /// Build the catalog from the fetched structure. The picker state is
    /// computed from the given selection, not assumed empty: the dashboard
    /// can hand over a preselected project.
    pub fn from_structure(
        structure: &CatalogStructure,
        preselected: Option<ProjectRef>,
    ) -> Self {
        let mut groups = Vec::new();
        for (tipo, entry) in structure {
            for (subtipo, sub) in &entry.subtipos {
                if sub.tipologias.is_empty() {
                    continue;
                }
                groups.push(CatalogGroup {
                    tipo: tipo.clone(),
                    subtipo: subtipo.clone(),
                    links: sub
                        .tipologias
                        .iter()
                        .map(|t| CatalogLink {
                            tipologia: t.clone(),
                            visible: true,
                        })
                        .collect(),
                    visible: true,
                });
            }
        }

        let mut state = Self {
            groups,
            selected_project: None,
            enabled: false,
            search_input: TextInput::new(),
            no_results: false,
            cursor: 0,
        };
        state.on_project_change(preselected);
        state.filter_links();
        state
    }

    /// Project picker change handler: recomputes the enable/disable cascade.
    pub fn on_project_change(&mut self, selected: Option<ProjectRef>) {
        self.selected_project = selected;
        self.enabled = self.selected_project.is_some();
        if !self.enabled {
            self.search_input.clear();
            self.filter_links();
        }
    }

    /// Re-evaluate link visibility against the current search term.
    pub fn filter_links(&mut self) {
        let term = self.search_input.value.to_lowercase().trim().to_string();
        let mut visible_count = 0;

        for group in &mut self.groups {
            let mut group_visible = 0;
            for link in &mut group.links {
                link.visible = link.tipologia.nombre.to_lowercase().contains(&term);
                if link.visible {
                    visible_count += 1;
                    group_visible += 1;
                }
            }
            group.visible = group_visible > 0;
        }

        self.no_results = visible_count == 0 && !term.is_empty();
        if self.cursor >= visible_count {
            self.cursor = visible_count.saturating_sub(1);
        }
    }

    pub fn search_input_char(&mut self, c: char) {
        self.search_input.insert(c);
        self.filter_links();
    }

    pub fn search_input_backspace(&mut self) {
        self.search_input.backspace();
        self.filter_links();
    }

    pub fn search_input_clear(&mut self) {
        self.search_input.clear();
        self.filter_links();
    }

    pub fn visible_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.links)
            .filter(|l| l.visible)
            .count()
    }

    pub fn cursor_down(&mut self) {
        let count = self.visible_count();
        if count > 0 && self.cursor + 1 < count {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn link_at_cursor(&self) -> Option<(&CatalogGroup, &CatalogLink)> {
        self.groups
            .iter()
            .flat_map(|g| g.links.iter().map(move |l| (g, l)))
            .filter(|(_, l)| l.visible)
            .nth(self.cursor)
    }

    /// Activate the link under the cursor. Guarded: while no project is
    /// selected this is a no-op that surfaces a blocking warning instead of
    /// navigating.
    pub fn activate_cursor(&self) -> Result<CatalogSelection, &'static str> {
        if !self.enabled {
            return Err(SELECT_PROJECT_FIRST);
        }
        let project = self
            .selected_project
            .clone()
            .ok_or(SELECT_PROJECT_FIRST)?;
        let (group, link) = self.link_at_cursor().ok_or(SELECT_PROJECT_FIRST)?;
        Ok(CatalogSelection {
            project,
            tipo: group.tipo.clone(),
            subtipo: group.subtipo.clone(),
            tipologia: link.tipologia.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hepta_client::domain::{SubtypeEntry, TypeEntry};
    use std::collections::BTreeMap;

    fn tipologia(nombre: &str) -> Tipologia {
        Tipologia {
            nombre: nombre.to_string(),
            plantilla: String::new(),
            perfiles: 2,
        }
    }

    fn structure() -> CatalogStructure {
        let mut momento_subtipos = BTreeMap::new();
        momento_subtipos.insert(
            "Viga-Columna".to_string(),
            SubtypeEntry {
                tipologias: vec![tipologia("Placa extrema"), tipologia("Placa apernada")],
            },
        );
        let mut cortante_subtipos = BTreeMap::new();
        cortante_subtipos.insert(
            "Viga-Viga".to_string(),
            SubtypeEntry {
                tipologias: vec![tipologia("Empalme simple")],
            },
        );

        let mut structure = BTreeMap::new();
        structure.insert(
            "Momento".to_string(),
            TypeEntry {
                subtipos: momento_subtipos,
            },
        );
        structure.insert(
            "Cortante".to_string(),
            TypeEntry {
                subtipos: cortante_subtipos,
            },
        );
        structure
    }

    fn project() -> ProjectRef {
        ProjectRef {
            id: "7".to_string(),
            nombre: "Torre Norte".to_string(),
        }
    }

    #[test]
    fn test_initial_state_without_project_is_disabled() {
        let state = CatalogState::from_structure(&structure(), None);
        assert!(!state.enabled);
        assert_eq!(state.visible_count(), 3);
        assert!(!state.no_results);
    }

    #[test]
    fn test_initial_state_with_preselection_is_enabled() {
        let state = CatalogState::from_structure(&structure(), Some(project()));
        assert!(state.enabled);
    }

    #[test]
    fn test_search_filters_links_and_groups() {
        let mut state = CatalogState::from_structure(&structure(), Some(project()));
        for c in "placa".chars() {
            state.search_input_char(c);
        }
        assert_eq!(state.visible_count(), 2);
        let empalme_group = state
            .groups
            .iter()
            .find(|g| g.subtipo == "Viga-Viga")
            .unwrap();
        assert!(!empalme_group.visible);
        assert!(!state.no_results);
    }

    #[test]
    fn test_no_results_needs_a_nonempty_term() {
        let mut state = CatalogState::from_structure(&structure(), Some(project()));
        for c in "zzz".chars() {
            state.search_input_char(c);
        }
        assert_eq!(state.visible_count(), 0);
        assert!(state.no_results);

        state.search_input_clear();
        assert_eq!(state.visible_count(), 3);
        assert!(!state.no_results);
    }

    #[test]
    fn test_dropping_project_clears_search_and_restores_links() {
        let mut state = CatalogState::from_structure(&structure(), Some(project()));
        for c in "empalme".chars() {
            state.search_input_char(c);
        }
        assert_eq!(state.visible_count(), 1);

        state.on_project_change(None);
        assert!(!state.enabled);
        assert!(state.search_input.value.is_empty());
        assert_eq!(state.visible_count(), 3);
        assert!(!state.no_results);
    }

    #[test]
    fn test_activation_is_guarded_while_disabled() {
        let state = CatalogState::from_structure(&structure(), None);
        assert_eq!(state.activate_cursor().unwrap_err(), SELECT_PROJECT_FIRST);
    }

    #[test]
    fn test_activation_yields_selection_under_cursor() {
        let mut state = CatalogState::from_structure(&structure(), Some(project()));
        for c in "empalme".chars() {
            state.search_input_char(c);
        }
        let selection = state.activate_cursor().unwrap();
        assert_eq!(selection.tipo, "Cortante");
        assert_eq!(selection.subtipo, "Viga-Viga");
        assert_eq!(selection.tipologia.nombre, "Empalme simple");
        assert_eq!(selection.project.id, "7");
    }
}
