use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub report_output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: var("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .expect("PORT must be a number"),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
            report_output_dir: var("REPORT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/mnt/data")),
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a number"),
            otel_service_name: var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| "seminar-report-api".to_string()),
            otel_exporter_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|| "http://localhost:4317".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_name, None);
        assert_eq!(config.report_output_dir, PathBuf::from("/mnt/data"));
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.otel_service_name, "seminar-report-api");
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9100"),
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "postgres://localhost/reports"),
            ("DATABASE_NAME", "reports"),
            ("REPORT_OUTPUT_DIR", "/tmp/reports"),
        ]);
        assert_eq!(config.port, 9100);
        assert!(config.is_production());
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/reports")
        );
        assert_eq!(config.database_name.as_deref(), Some("reports"));
        assert_eq!(config.report_output_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[("DATABASE_URL", "  "), ("PORT", "")]);
        assert_eq!(config.database_url, None);
        assert_eq!(config.port, 8000);
    }

    #[test]
    #[should_panic(expected = "PORT must be a number")]
    fn test_invalid_port_panics() {
        config_from(&[("PORT", "eighty")]);
    }
}
