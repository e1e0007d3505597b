//! File-based configuration (`bqdml.toml`).
//!
//! Every section and key is optional; an empty file yields the legacy
//! defaults.
//!
//! ```toml
//! [literals]
//! mode = "escaped"
//!
//! [insert]
//! schema_check = "strict"
//!
//! [where]
//! null_predicate = "is_null"
//!
//! [executor]
//! timeout_ms = 30000
//! slow_statement_ms = 5000
//! log_sql_max_length = 200
//! ```

use crate::compose::{Composer, NullPredicate, SchemaCheck};
use crate::error::{DmlError, DmlResult};
use crate::literal::LiteralMode;
use crate::monitor::{MonitorConfig, TracingStatementHook};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposerConfig {
    #[serde(default)]
    pub literals: LiteralsConfig,
    #[serde(default)]
    pub insert: InsertConfig,
    #[serde(default, rename = "where")]
    pub predicates: WhereConfig,
    #[serde(default)]
    pub executor: ExecutorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiteralsConfig {
    #[serde(default)]
    pub mode: LiteralMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsertConfig {
    #[serde(default)]
    pub schema_check: SchemaCheck,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhereConfig {
    #[serde(default)]
    pub null_predicate: NullPredicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutorConfig {
    pub timeout_ms: Option<u64>,
    pub slow_statement_ms: Option<u64>,
    /// 0 disables truncation.
    #[serde(default = "default_log_sql_max_length")]
    pub log_sql_max_length: usize,
}

fn default_log_sql_max_length() -> usize {
    200
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            slow_statement_ms: None,
            log_sql_max_length: default_log_sql_max_length(),
        }
    }
}

impl ComposerConfig {
    /// Load and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> DmlResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DmlError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            DmlError::Config(msg) => DmlError::Config(format!(
                "failed to parse config file {}: {msg}",
                path.display()
            )),
            other => other,
        })
    }

    /// Parse TOML config text.
    pub fn from_toml_str(raw: &str) -> DmlResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Build the [`Composer`] described by this config.
    pub fn composer(&self) -> Composer {
        Composer::new()
            .with_literal_mode(self.literals.mode)
            .with_schema_check(self.insert.schema_check)
            .with_null_predicate(self.predicates.null_predicate)
    }

    /// Build the executor [`MonitorConfig`] described by this config.
    pub fn monitor_config(&self) -> MonitorConfig {
        let mut config = MonitorConfig::new();
        if let Some(ms) = self.executor.timeout_ms {
            config = config.with_statement_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.executor.slow_statement_ms {
            config = config.with_slow_statement_threshold(Duration::from_millis(ms));
        }
        config
    }

    /// Build a [`TracingStatementHook`] honouring `log_sql_max_length`.
    pub fn tracing_hook(&self) -> TracingStatementHook {
        match self.executor.log_sql_max_length {
            0 => TracingStatementHook::new().no_truncate(),
            len => TracingStatementHook::new().max_sql_length(len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_legacy() {
        let config = ComposerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ComposerConfig::default());
        assert_eq!(config.composer(), Composer::default());
        assert_eq!(config.monitor_config(), MonitorConfig::default());
        assert_eq!(config.tracing_hook().max_sql_length, Some(200));
    }

    #[test]
    fn full_config() {
        let raw = r#"
            [literals]
            mode = "escaped"

            [insert]
            schema_check = "strict"

            [where]
            null_predicate = "is_null"

            [executor]
            timeout_ms = 30000
            slow_statement_ms = 5000
            log_sql_max_length = 0
        "#;
        let config = ComposerConfig::from_toml_str(raw).unwrap();
        let composer = config.composer();
        assert_eq!(composer.literal_mode, LiteralMode::Escaped);
        assert_eq!(composer.schema_check, SchemaCheck::Strict);
        assert_eq!(composer.null_predicate, NullPredicate::IsNull);

        let monitor = config.monitor_config();
        assert_eq!(monitor.statement_timeout, Some(Duration::from_secs(30)));
        assert_eq!(monitor.slow_statement_threshold, Some(Duration::from_secs(5)));
        assert_eq!(config.tracing_hook().max_sql_length, None);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = ComposerConfig::from_toml_str("[literals]\nquote = \"double\"\n").unwrap_err();
        assert!(matches!(err, DmlError::Config(_)));
    }

    #[test]
    fn unknown_mode_rejected() {
        assert!(ComposerConfig::from_toml_str("[literals]\nmode = \"raw\"\n").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ComposerConfig::load("/nonexistent/bqdml.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bqdml.toml"));
    }
}
