//! Runtime configuration read from the environment

use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = ".cmdtask-data";
pub const DEFAULT_DB_NAME: &str = "cmdtask";
pub const DEFAULT_LOG_FILTER: &str = "cmdtask=warn,cmdtask_core=warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the database file
    pub data_dir: PathBuf,
    /// Database name; the file is `<data_dir>/<db_name>.json`
    pub db_name: String,
    /// Whether output is colored
    pub color: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = non_empty(lookup("CMDTASK_DATA_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let db_name =
            non_empty(lookup("CMDTASK_DB_NAME")).unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
        let color = lookup("NO_COLOR").is_none()
            && parse_flag(lookup("CMDTASK_COLOR").as_deref(), true);

        Self {
            data_dir,
            db_name,
            color,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.db_name, DEFAULT_DB_NAME);
        assert!(config.color);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CMDTASK_DATA_DIR", "/tmp/tasks"),
            ("CMDTASK_DB_NAME", " work "),
            ("CMDTASK_COLOR", "off"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tasks"));
        assert_eq!(config.db_name, "work");
        assert!(!config.color);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[("CMDTASK_DATA_DIR", "  "), ("CMDTASK_DB_NAME", "")]);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.db_name, DEFAULT_DB_NAME);
    }

    #[test]
    fn test_no_color_wins() {
        let config = config_from(&[("NO_COLOR", "1"), ("CMDTASK_COLOR", "yes")]);
        assert!(!config.color);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("TRUE"), false));
        assert!(parse_flag(Some(" on "), false));
        assert!(!parse_flag(Some("0"), true));
        assert!(parse_flag(Some("maybe"), true));
        assert!(!parse_flag(None, false));
    }
}
