use hepta_client::domain::ProfileSuggestion;
use hepta_client::ClientError;
use tokio::task::JoinHandle;
use tracing::warn;

/// Minimum trimmed query length before a lookup is issued.
pub const MIN_QUERY_LEN: usize = 2;

/// Grace period after blurring an empty field before suggestions vanish, so
/// a pending selection can still land.
pub const BLUR_GRACE_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Querying,
}

/// Cancellable autocomplete lookups for a single input field.
///
/// At most one lookup is live per field: starting a new one aborts the
/// previous task and bumps the generation counter. A completion is applied
/// only if it still carries the latest generation, so a superseded response
/// can never overwrite a fresher one even if its task got to send before the
/// abort landed.
#[derive(Debug, Default)]
pub struct SuggestionField {
    pub items: Vec<ProfileSuggestion>,
    pub selected: Option<usize>,
    state: LookupState,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl SuggestionField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LookupState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Qualify a new query. Too-short queries clear the displayed
    /// suggestions and return `None` (no network access); otherwise the
    /// in-flight lookup is cancelled and the generation to attach to the
    /// replacement lookup is returned.
    pub fn begin_lookup(&mut self, query: &str) -> Option<u64> {
        self.abort_in_flight();
        if query.trim().chars().count() < MIN_QUERY_LEN {
            self.items.clear();
            self.selected = None;
            self.state = LookupState::Idle;
            return None;
        }
        self.generation += 1;
        self.state = LookupState::Querying;
        Some(self.generation)
    }

    /// Track the spawned lookup task so a follow-up query can abort it.
    pub fn attach_task(&mut self, handle: JoinHandle<()>) {
        self.task = Some(handle);
    }

    /// Apply a finished lookup. Stale generations are discarded outright;
    /// cancellations are silent; other failures are logged and leave the
    /// displayed suggestions untouched.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<Vec<ProfileSuggestion>, ClientError>,
    ) {
        if generation != self.generation {
            return;
        }
        self.state = LookupState::Idle;
        self.task = None;
        match result {
            Ok(items) => {
                // Wholesale replacement, never a merge.
                self.items = items;
                self.selected = None;
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                warn!(error = %e, "profile suggestion lookup failed");
            }
        }
    }

    /// Blur handler: clear suggestions only if no new lookup started during
    /// the grace delay (the caller passes the generation captured at blur).
    pub fn clear_after_blur(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        self.abort_in_flight();
        self.items.clear();
        self.selected = None;
        self.state = LookupState::Idle;
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.items.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        self.selected = match self.selected {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn selected_suggestion(&self) -> Option<&ProfileSuggestion> {
        self.selected.and_then(|i| self.items.get(i))
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(value: &str) -> ProfileSuggestion {
        ProfileSuggestion {
            value: value.to_string(),
            label: value.to_string(),
        }
    }

    #[test]
    fn test_short_query_clears_without_network() {
        let mut field = SuggestionField::new();
        field.items = vec![suggestion("HEB 200")];
        assert_eq!(field.begin_lookup(" a "), None);
        assert!(field.items.is_empty());
        assert_eq!(field.state(), LookupState::Idle);
    }

    #[test]
    fn test_length_gate_uses_trimmed_query() {
        let mut field = SuggestionField::new();
        // Two spaces around a single char still trims to length 1.
        assert_eq!(field.begin_lookup("  h  "), None);
        assert!(field.begin_lookup("he").is_some());
    }

    #[test]
    fn test_generations_increase_per_lookup() {
        let mut field = SuggestionField::new();
        let first = field.begin_lookup("he").unwrap();
        let second = field.begin_lookup("heb").unwrap();
        assert!(second > first);
        assert_eq!(field.state(), LookupState::Querying);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut field = SuggestionField::new();
        let stale = field.begin_lookup("a b").unwrap();
        let fresh = field.begin_lookup("abc").unwrap();

        field.complete(fresh, Ok(vec![suggestion("abc-match")]));
        assert_eq!(field.items.len(), 1);

        // The superseded response arrives late and must change nothing.
        field.complete(stale, Ok(vec![suggestion("a-match"), suggestion("b")]));
        assert_eq!(field.items.len(), 1);
        assert_eq!(field.items[0].value, "abc-match");
    }

    #[test]
    fn test_success_replaces_wholesale() {
        let mut field = SuggestionField::new();
        let generation = field.begin_lookup("heb").unwrap();
        field.items = vec![suggestion("old-1"), suggestion("old-2")];
        field.complete(generation, Ok(vec![suggestion("new")]));
        assert_eq!(field.items.len(), 1);
        assert_eq!(field.items[0].value, "new");
        assert_eq!(field.state(), LookupState::Idle);
    }

    #[test]
    fn test_failure_leaves_displayed_suggestions_untouched() {
        let mut field = SuggestionField::new();
        field.items = vec![suggestion("kept")];
        let generation = field.begin_lookup("heb").unwrap();
        field.complete(generation, Err(ClientError::Network("offline".to_string())));
        assert_eq!(field.items.len(), 1);
        assert_eq!(field.items[0].value, "kept");
        assert_eq!(field.state(), LookupState::Idle);
    }

    #[test]
    fn test_cancellation_is_silent_and_keeps_suggestions() {
        let mut field = SuggestionField::new();
        field.items = vec![suggestion("kept")];
        let generation = field.begin_lookup("heb").unwrap();
        field.complete(generation, Err(ClientError::Cancelled));
        assert_eq!(field.items.len(), 1);
        assert_eq!(field.state(), LookupState::Idle);
    }

    #[test]
    fn test_blur_clear_is_skipped_after_new_input() {
        let mut field = SuggestionField::new();
        let generation = field.begin_lookup("heb").unwrap();
        field.complete(generation, Ok(vec![suggestion("HEB 200")]));

        let at_blur = field.generation();
        // New input between blur and the grace timer firing.
        let _ = field.begin_lookup("ipe").unwrap();
        field.clear_after_blur(at_blur);
        assert_eq!(field.state(), LookupState::Querying);

        // Without intervening input the clear goes through.
        let mut idle = SuggestionField::new();
        let generation = idle.begin_lookup("heb").unwrap();
        idle.complete(generation, Ok(vec![suggestion("HEB 200")]));
        idle.clear_after_blur(idle.generation());
        assert!(idle.items.is_empty());
    }

    #[tokio::test]
    async fn test_new_lookup_aborts_previous_task() {
        let mut field = SuggestionField::new();
        let _ = field.begin_lookup("heb").unwrap();
        let handle = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        });
        field.attach_task(handle);

        let _ = field.begin_lookup("heb 2").unwrap();
        // The previous task slot is vacated; the task itself is aborted.
        assert!(field.task.is_none());
    }

    #[test]
    fn test_selection_walks_the_list() {
        let mut field = SuggestionField::new();
        let generation = field.begin_lookup("he").unwrap();
        field.complete(generation, Ok(vec![suggestion("a"), suggestion("b")]));

        assert!(field.selected_suggestion().is_none());
        field.select_next();
        assert_eq!(field.selected_suggestion().unwrap().value, "a");
        field.select_next();
        field.select_next();
        assert_eq!(field.selected_suggestion().unwrap().value, "b");
        field.select_previous();
        field.select_previous();
        assert!(field.selected_suggestion().is_none());
    }
}
