use hepta_client::domain::ConnectionRequest;

use crate::app::catalog::CatalogSelection;
use crate::suggest::SuggestionField;

use super::TextInput;

/// One steel-profile input with its own autocomplete lookups.
#[derive(Debug)]
pub struct ProfileField {
    pub label: String,
    pub input: TextInput,
    pub suggestions: SuggestionField,
}

/// The new-connection request form, prefilled from a catalog selection. The
/// tipología decides how many profile fields the form carries.
#[derive(Debug)]
pub struct ConnectionFormState {
    pub selection: CatalogSelection,
    pub profiles: Vec<ProfileField>,
    pub description: TextInput,
    pub focused: usize,
    pub submitting: bool,
}

impl ConnectionFormState {
    pub fn new(selection: CatalogSelection) -> Self {
        let profiles = (1..=selection.tipologia.perfiles.max(1))
            .map(|i| ProfileField {
                label: format!("Perfil {}", i),
                input: TextInput::new(),
                suggestions: SuggestionField::new(),
            })
            .collect();
        Self {
            selection,
            profiles,
            description: TextInput::new(),
            focused: 0,
            submitting: false,
        }
    }

    /// Number of focusable fields: every profile plus the description.
    pub fn field_count(&self) -> usize {
        self.profiles.len() + 1
    }

    pub fn description_focused(&self) -> bool {
        self.focused == self.profiles.len()
    }

    pub fn focused_profile_mut(&mut self) -> Option<&mut ProfileField> {
        if self.description_focused() {
            None
        } else {
            self.profiles.get_mut(self.focused)
        }
    }

    /// Move focus forward. Returns the index of the profile field left
    /// behind, if any, so the caller can run its blur handling.
    pub fn focus_next(&mut self) -> Option<usize> {
        let left = if self.description_focused() {
            None
        } else {
            Some(self.focused)
        };
        self.focused = (self.focused + 1) % self.field_count();
        left
    }

    pub fn focus_previous(&mut self) -> Option<usize> {
        let left = if self.description_focused() {
            None
        } else {
            Some(self.focused)
        };
        self.focused = if self.focused == 0 {
            self.field_count() - 1
        } else {
            self.focused - 1
        };
        left
    }

    /// Replace the focused profile input with the highlighted suggestion.
    pub fn apply_selected_suggestion(&mut self) -> bool {
        let Some(field) = self.focused_profile_mut() else {
            return false;
        };
        let Some(suggestion) = field.suggestions.selected_suggestion().cloned() else {
            return false;
        };
        field.input = TextInput::from_str(&suggestion.value);
        field.suggestions.clear();
        true
    }

    /// Validate and assemble the form into the request payload. Every
    /// profile field is mandatory, checked before any network access.
    pub fn to_request(&self) -> Result<ConnectionRequest, String> {
        let mut perfiles = Vec::with_capacity(self.profiles.len());
        for field in &self.profiles {
            let value = field.input.value.trim();
            if value.is_empty() {
                return Err(format!("El campo '{}' es obligatorio.", field.label));
            }
            perfiles.push(value.to_string());
        }
        Ok(ConnectionRequest {
            proyecto_id: self.selection.project.id.clone(),
            tipo: self.selection.tipo.clone(),
            subtipo: self.selection.subtipo.clone(),
            tipologia_nombre: self.selection.tipologia.nombre.clone(),
            descripcion: self.description.value.trim().to_string(),
            perfiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hepta_client::domain::{ProfileSuggestion, ProjectRef, Tipologia};

    fn selection(perfiles: u8) -> CatalogSelection {
        CatalogSelection {
            project: ProjectRef {
                id: "7".to_string(),
                nombre: "Torre Norte".to_string(),
            },
            tipo: "Momento".to_string(),
            subtipo: "Viga-Columna".to_string(),
            tipologia: Tipologia {
                nombre: "Placa extrema".to_string(),
                plantilla: "PE-{p1}-{p2}".to_string(),
                perfiles,
            },
        }
    }

    #[test]
    fn test_field_count_follows_tipologia() {
        assert_eq!(ConnectionFormState::new(selection(3)).profiles.len(), 3);
        // A tipología with no profile count still renders one field.
        assert_eq!(ConnectionFormState::new(selection(0)).profiles.len(), 1);
    }

    #[test]
    fn test_empty_profile_blocks_submission() {
        let mut form = ConnectionFormState::new(selection(2));
        form.profiles[0].input = TextInput::from_str("HEB 200");
        let err = form.to_request().unwrap_err();
        assert_eq!(err, "El campo 'Perfil 2' es obligatorio.");
    }

    #[test]
    fn test_to_request_assembles_payload() {
        let mut form = ConnectionFormState::new(selection(2));
        form.profiles[0].input = TextInput::from_str("HEB 200");
        form.profiles[1].input = TextInput::from_str(" IPE 300 ");
        form.description = TextInput::from_str("Unión de pórtico principal");

        let request = form.to_request().unwrap();
        assert_eq!(request.proyecto_id, "7");
        assert_eq!(request.tipologia_nombre, "Placa extrema");
        assert_eq!(request.perfiles, vec!["HEB 200", "IPE 300"]);
    }

    #[test]
    fn test_apply_selected_suggestion_replaces_input() {
        let mut form = ConnectionFormState::new(selection(1));
        let field = form.focused_profile_mut().unwrap();
        let generation = field.suggestions.begin_lookup("heb").unwrap();
        field.suggestions.complete(
            generation,
            Ok(vec![ProfileSuggestion {
                value: "HEB 200".to_string(),
                label: "HEB200 (HEB 200)".to_string(),
            }]),
        );
        field.suggestions.select_next();

        assert!(form.apply_selected_suggestion());
        assert_eq!(form.profiles[0].input.value, "HEB 200");
        assert!(form.profiles[0].suggestions.items.is_empty());
    }

    #[test]
    fn test_focus_cycle_reports_blurred_profile() {
        let mut form = ConnectionFormState::new(selection(2));
        assert_eq!(form.focus_next(), Some(0));
        assert_eq!(form.focus_next(), Some(1));
        // Leaving the description is not a profile blur.
        assert!(form.description_focused());
        assert_eq!(form.focus_next(), None);
        assert_eq!(form.focused, 0);
    }
}
