//! INI file configuration adapter.

use crate::domain::error::TickerlensError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TickerlensError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| TickerlensError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[data]
csv_dir = /var/prices
exchange = NASDAQ

[metrics]
volatility_window = 20
trading_days_per_year = 252
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "csv_dir"),
            Some("/var/prices".to_string())
        );
        assert_eq!(adapter.get_int("metrics", "volatility_window", 0), 20);
        assert_eq!(adapter.get_double("metrics", "trading_days_per_year", 0.0), 252.0);
    }

    #[test]
    fn section_and_key_lookup_is_case_insensitive() {
        let adapter =
            FileConfigAdapter::from_string("[ASTS]\nName = AST SpaceMobile\n").unwrap();
        assert_eq!(
            adapter.get_string("ASTS", "name"),
            Some("AST SpaceMobile".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[data]\nexchange = NYSE\n").unwrap();
        assert_eq!(adapter.get_string("data", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[metrics]\nyear_window = abc\n").unwrap();
        assert_eq!(adapter.get_int("metrics", "year_window", 252), 252);
        assert_eq!(adapter.get_int("metrics", "missing", 90), 90);
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[metrics]\nsupport_percentile = low\n").unwrap();
        assert_eq!(adapter.get_double("metrics", "support_percentile", 0.1), 0.1);
    }

    #[test]
    fn get_bool_values() {
        let adapter =
            FileConfigAdapter::from_string("[x]\na = yes\nb = 0\nc = maybe\n").unwrap();
        assert!(adapter.get_bool("x", "a", false));
        assert!(!adapter.get_bool("x", "b", true));
        assert!(adapter.get_bool("x", "c", true));
        assert!(!adapter.get_bool("x", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[instruments]\ncodes = ASTS,RKLB\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("instruments", "codes"),
            Some("ASTS,RKLB".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(
            result,
            Err(TickerlensError::ConfigParse { file, .. }) if file == "/nonexistent/path/config.ini"
        ));
    }
}
