//! Process configuration.
//!
//! Built once at startup from environment variables and passed explicitly
//! into service construction, so tests can substitute the in-memory backend
//! without touching the environment.

use std::path::PathBuf;

use quotevend_sheets::SheetsConfig;

/// Which tabular-store backend to wire up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process tables; dev and tests.
    InMemory,
    /// Google Sheets, the production store.
    Sheets,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub sheets: SheetsConfig,
    pub allowed_origin: String,
    pub static_dir: PathBuf,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::InMemory,
            sheets: SheetsConfig {
                credentials_path: "client_secret.json".into(),
                spreadsheet_id: String::new(),
                items_sheet: "Items".to_string(),
                customers_sheet: "Customers".to_string(),
            },
            allowed_origin: "https://glotechsystem.com".to_string(),
            static_dir: "static".into(),
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// The store defaults to Google Sheets; `USE_IN_MEMORY_STORE=true`
    /// selects the in-process backend for local development.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let use_in_memory = std::env::var("USE_IN_MEMORY_STORE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        Self {
            store: if use_in_memory {
                StoreBackend::InMemory
            } else {
                StoreBackend::Sheets
            },
            sheets: SheetsConfig {
                credentials_path: std::env::var("GOOGLE_CREDS_JSON")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.sheets.credentials_path),
                spreadsheet_id: std::env::var("SPREADSHEET_ID")
                    .unwrap_or(defaults.sheets.spreadsheet_id),
                items_sheet: std::env::var("ITEMS_SHEET").unwrap_or(defaults.sheets.items_sheet),
                customers_sheet: std::env::var("CUSTOMERS_SHEET")
                    .unwrap_or(defaults.sheets.customers_sheet),
            },
            allowed_origin: std::env::var("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
        }
    }
}
