use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences for the engine's embedding layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Reference budget the forecast trend flag compares against.
    #[serde(default = "Config::default_monthly_budget_limit")]
    pub monthly_budget_limit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_journal: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for journals. Defaults to `~/Documents/Journals`.
    pub default_journal_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            monthly_budget_limit: Self::default_monthly_budget_limit(),
            last_opened_journal: None,
            default_journal_root: None,
        }
    }
}

impl Config {
    pub fn default_monthly_budget_limit() -> f64 {
        1000.0
    }

    pub fn resolve_default_journal_root(&self) -> PathBuf {
        if let Some(path) = &self.default_journal_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Journals")
    }
}
