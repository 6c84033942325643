use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use hepta_client::domain::ProjectRef;

use super::{PickerPurpose, TextInput};

/// Project picker overlay, shared by the catalog screen and the board's
/// project filter. Typing narrows the list with fuzzy matching.
#[derive(Debug)]
pub struct ProjectPickerState {
    pub purpose: PickerPurpose,
    pub items: Vec<ProjectRef>,
    pub search_input: TextInput,
    pub filtered: Vec<ProjectRef>,
    pub index: usize,
}

impl ProjectPickerState {
    pub fn new(purpose: PickerPurpose, items: Vec<ProjectRef>) -> Self {
        let filtered = items.clone();
        Self {
            purpose,
            items,
            search_input: TextInput::new(),
            filtered,
            index: 0,
        }
    }

    /// Filter projects based on the search input using fuzzy matching.
    pub fn filter(&mut self) {
        if self.search_input.value.is_empty() {
            self.filtered = self.items.clone();
            self.index = 0;
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(ProjectRef, i64)> = self
            .items
            .iter()
            .filter_map(|project| {
                matcher
                    .fuzzy_match(&project.nombre, &self.search_input.value)
                    .map(|score| (project.clone(), score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        self.filtered = scored.into_iter().map(|(p, _)| p).collect();
        self.index = 0;
    }

    pub fn input_char(&mut self, c: char) {
        self.search_input.insert(c);
        self.filter();
    }

    pub fn input_backspace(&mut self) {
        self.search_input.backspace();
        self.filter();
    }

    pub fn input_clear(&mut self) {
        self.search_input.clear();
        self.filter();
    }

    pub fn select_next(&mut self) {
        if !self.filtered.is_empty() && self.index + 1 < self.filtered.len() {
            self.index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    pub fn current(&self) -> Option<&ProjectRef> {
        self.filtered.get(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects() -> Vec<ProjectRef> {
        vec![
            ProjectRef {
                id: "1".to_string(),
                nombre: "Torre Norte".to_string(),
            },
            ProjectRef {
                id: "2".to_string(),
                nombre: "Puente Sur".to_string(),
            },
            ProjectRef {
                id: "3".to_string(),
                nombre: "Nave Industrial".to_string(),
            },
        ]
    }

    #[test]
    fn test_empty_search_shows_everything() {
        let picker = ProjectPickerState::new(PickerPurpose::CatalogProject, projects());
        assert_eq!(picker.filtered.len(), 3);
    }

    #[test]
    fn test_fuzzy_filter_narrows_and_resets_index() {
        let mut picker = ProjectPickerState::new(PickerPurpose::BoardFilter, projects());
        picker.select_next();
        for c in "torre".chars() {
            picker.input_char(c);
        }
        assert_eq!(picker.filtered.len(), 1);
        assert_eq!(picker.index, 0);
        assert_eq!(picker.current().unwrap().id, "1");
    }

    #[test]
    fn test_clearing_input_restores_full_list() {
        let mut picker = ProjectPickerState::new(PickerPurpose::BoardFilter, projects());
        for c in "nave".chars() {
            picker.input_char(c);
        }
        assert_eq!(picker.filtered.len(), 1);
        picker.input_clear();
        assert_eq!(picker.filtered.len(), 3);
    }
}
