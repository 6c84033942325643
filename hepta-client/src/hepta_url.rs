use urlencoding::encode;

#[derive(Debug, Clone)]
pub struct HeptaUrl(String);

impl AsRef<str> for HeptaUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl HeptaUrl {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Append a query parameter, percent-encoding the value.
    pub fn with_param(&self, key: &str, value: &str) -> Self {
        if self.0.contains('?') {
            Self(format!("{}&{}={}", self.0, key, encode(value)))
        } else {
            Self(format!("{}?{}={}", self.0, key, encode(value)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_path_trims_slashes() {
        let url = HeptaUrl::new("http://localhost:5000/").append_path("/api/perfiles/buscar");
        assert_eq!(url.as_ref(), "http://localhost:5000/api/perfiles/buscar");
    }

    #[test]
    fn test_with_param_first_and_subsequent() {
        let url = HeptaUrl::new("http://localhost:5000")
            .append_path("api/dashboard/project-details")
            .with_param("proyecto_id", "7")
            .with_param("estado", "EN_PROCESO");
        assert_eq!(
            url.as_ref(),
            "http://localhost:5000/api/dashboard/project-details?proyecto_id=7&estado=EN_PROCESO"
        );
    }

    #[test]
    fn test_with_param_encodes_value() {
        let url = HeptaUrl::new("http://localhost:5000")
            .append_path("api/perfiles/buscar")
            .with_param("q", "HEB 200 x");
        assert_eq!(
            url.as_ref(),
            "http://localhost:5000/api/perfiles/buscar?q=HEB%20200%20x"
        );
    }
}
