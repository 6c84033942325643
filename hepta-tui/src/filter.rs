use crate::types::{BoardPanels, BoardRow, TaskTab};

/// The combined filter predicates active at a point in time.
///
/// Rebuilt from the current control values on every triggering event: a
/// filter control change, every search keystroke, and tab activation. The
/// search term is trimmed and lowercased once, here, so every comparison
/// downstream is a plain `contains`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub project_id: Option<String>,
    pub kind: Option<String>,
    search_term: String,
}

impl FilterCriteria {
    pub fn new(project_id: Option<String>, kind: Option<String>, search_term: &str) -> Self {
        Self {
            project_id: project_id.filter(|p| !p.is_empty()),
            kind: kind.filter(|k| !k.is_empty()),
            search_term: search_term.trim().to_lowercase(),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// A row is visible iff all three predicates hold independently.
    ///
    /// Project ids compare case-sensitively; the kind and the search term
    /// compare lowercased. An unset criterion always matches.
    pub fn matches(&self, row: &BoardRow) -> bool {
        let matches_project = self
            .project_id
            .as_ref()
            .map(|id| row.project_id == *id)
            .unwrap_or(true);
        let matches_kind = self
            .kind
            .as_ref()
            .map(|kind| row.kind.to_lowercase() == kind.to_lowercase())
            .unwrap_or(true);
        let matches_search =
            self.search_term.is_empty() || row.code.to_lowercase().contains(&self.search_term);

        matches_project && matches_kind && matches_search
    }

    /// Recompute visibility over one row set, returning the visible count.
    pub fn apply(&self, rows: &mut [BoardRow]) -> usize {
        let mut visible = 0;
        for row in rows.iter_mut() {
            row.visible = self.matches(row);
            if row.visible {
                visible += 1;
            }
        }
        visible
    }

    /// One pass over every panel with the same criteria, so panels hidden
    /// behind an inactive tab are already correct when shown.
    pub fn apply_all(&self, panels: &mut BoardPanels) {
        for tab in TaskTab::ALL {
            self.apply(panels.rows_mut(tab));
        }
    }

    /// The "no results" indicator: zero visible rows only counts as a
    /// filtered-out state when a search term is active. An empty term over an
    /// empty panel is just the default empty state.
    pub fn no_results(&self, visible_count: usize) -> bool {
        visible_count == 0 && !self.search_term.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hepta_client::domain::ConnectionStatus;

    fn row(project_id: &str, kind: &str, code: &str) -> BoardRow {
        BoardRow {
            id: 1,
            code: code.to_string(),
            project_id: project_id.to_string(),
            project_name: format!("Proyecto {}", project_id),
            kind: kind.to_string(),
            status: ConnectionStatus::Requested,
            created_at: Utc::now(),
            visible: true,
        }
    }

    fn sample_rows() -> Vec<BoardRow> {
        vec![row("1", "A", "Foo"), row("1", "B", "Bar"), row("2", "A", "Foo")]
    }

    #[test]
    fn test_unset_criteria_keep_every_row_visible() {
        let mut rows = sample_rows();
        let criteria = FilterCriteria::new(None, None, "");
        assert_eq!(criteria.apply(&mut rows), 3);
        assert!(rows.iter().all(|r| r.visible));
    }

    #[test]
    fn test_empty_strings_count_as_unset() {
        let criteria = FilterCriteria::new(Some(String::new()), Some(String::new()), "  ");
        assert_eq!(criteria, FilterCriteria::new(None, None, ""));
    }

    #[test]
    fn test_combined_project_and_search() {
        let mut rows = sample_rows();
        let criteria = FilterCriteria::new(Some("1".to_string()), None, "fo");
        assert_eq!(criteria.apply(&mut rows), 1);
        assert!(rows[0].visible);
        assert!(!rows[1].visible);
        assert!(!rows[2].visible);
    }

    #[test]
    fn test_project_id_is_case_sensitive() {
        let mut rows = vec![row("Abc", "A", "Foo")];
        assert_eq!(
            FilterCriteria::new(Some("abc".to_string()), None, "").apply(&mut rows),
            0
        );
        assert_eq!(
            FilterCriteria::new(Some("Abc".to_string()), None, "").apply(&mut rows),
            1
        );
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let mut rows = vec![row("1", "Viga-Columna", "Foo")];
        let criteria = FilterCriteria::new(None, Some("viga-columna".to_string()), "");
        assert_eq!(criteria.apply(&mut rows), 1);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let mut rows = vec![row("1", "A", "CON-Placa-012")];
        let criteria = FilterCriteria::new(None, None, "  placa ");
        assert_eq!(criteria.apply(&mut rows), 1);
        assert_eq!(criteria.search_term(), "placa");
    }

    #[test]
    fn test_no_results_requires_active_search_term() {
        let with_term = FilterCriteria::new(None, None, "xyz");
        assert!(with_term.no_results(0));
        assert!(!with_term.no_results(1));

        let without_term = FilterCriteria::new(None, None, "");
        assert!(!without_term.no_results(0));
    }

    #[test]
    fn test_whitespace_only_term_is_not_a_no_results_condition() {
        let criteria = FilterCriteria::new(None, None, "   ");
        assert!(!criteria.no_results(0));
    }

    #[test]
    fn test_unmatched_search_hides_all_rows() {
        let mut rows = sample_rows();
        let criteria = FilterCriteria::new(None, None, "xyz");
        let visible = criteria.apply(&mut rows);
        assert_eq!(visible, 0);
        assert!(criteria.no_results(visible));
        assert!(rows.iter().all(|r| !r.visible));
    }

    #[test]
    fn test_visibility_is_the_conjunction_of_the_three_predicates() {
        // Every combination of matching / non-matching criterion against a
        // fixed row; the row is visible exactly when all three hold.
        let target = row("1", "A", "Foo");
        let project_options = [None, Some("1"), Some("2")];
        let kind_options = [None, Some("a"), Some("B")];
        let term_options = ["", "fo", "zzz"];

        for project in project_options {
            for kind in kind_options {
                for term in term_options {
                    let criteria = FilterCriteria::new(
                        project.map(String::from),
                        kind.map(String::from),
                        term,
                    );
                    let expect_project = project != Some("2");
                    let expect_kind = kind != Some("B");
                    let expect_term = term != "zzz";

                    assert_eq!(
                        criteria.matches(&target),
                        expect_project && expect_kind && expect_term,
                        "criteria {:?}/{:?}/{:?}",
                        project,
                        kind,
                        term
                    );
                }
            }
        }
    }

    #[test]
    fn test_apply_all_covers_hidden_panels() {
        let mut panels = BoardPanels {
            pending_approval: vec![row("1", "A", "Foo")],
            assigned: vec![row("2", "A", "Foo")],
            available: vec![row("1", "B", "Bar")],
            my_requests: vec![],
        };
        let criteria = FilterCriteria::new(Some("1".to_string()), None, "");
        criteria.apply_all(&mut panels);
        assert!(panels.pending_approval[0].visible);
        assert!(!panels.assigned[0].visible);
        assert!(panels.available[0].visible);
    }
}
