use serde::{Deserialize, Serialize};

/// One autocomplete suggestion from `GET /api/perfiles/buscar`.
///
/// `value` is the canonical profile name to submit; `label` may additionally
/// show the alias that matched. Server order is preserved and the client
/// performs no dedup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSuggestion {
    pub value: String,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_parses_wire_shape() {
        let raw = r#"[{"value":"HEB 200","label":"HEB200 (HEB 200)"},{"value":"IPE 300","label":"IPE 300"}]"#;
        let parsed: Vec<ProfileSuggestion> = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].value, "HEB 200");
        assert_eq!(parsed[1].label, "IPE 300");
    }
}
