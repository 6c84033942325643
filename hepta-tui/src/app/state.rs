use chrono::{DateTime, Utc};
use hepta_client::domain::ConnectionDetail;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Catalog,
    NewConnection,
}

/// UI theme, mirrored to the server when toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn from_str_or_dark(s: &str) -> Theme {
        if s == "light" {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

/// Whether dashboard keys drive the row list or the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardFocus {
    Rows,
    Search,
}

/// What the project picker overlay is selecting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPurpose {
    CatalogProject,
    BoardFilter,
}

/// Motive entry for a rejection quick action.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectDialogState {
    pub conexion_id: i64,
    pub code: String,
    pub motive: TextInput,
}

/// Drill-down overlay for one (project, status) cell of the summary.
#[derive(Debug, Clone)]
pub struct DrilldownState {
    pub title: String,
    pub loading: bool,
    pub rows: Vec<ConnectionDetail>,
    pub error: Option<String>,
}

impl DrilldownState {
    pub fn loading(title: String) -> Self {
        Self {
            title,
            loading: true,
            rows: Vec::new(),
            error: None,
        }
    }
}

/// Widget visibility editor backing the preferences overlay.
#[derive(Debug, Clone)]
pub struct PreferencesState {
    pub toggles: Vec<(String, bool)>,
    pub cursor: usize,
}

/// A transient user-facing notice shown in the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusNotice {
    pub text: String,
    pub is_error: bool,
    pub shown_at: DateTime<Utc>,
}

impl StatusNotice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            shown_at: Utc::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
            shown_at: Utc::now(),
        }
    }
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        debug_assert!(pos > 0, "prev_boundary called with pos == 0");
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        debug_assert!(
            pos < self.value.len(),
            "next_boundary called at end of string"
        );
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}
