//! Store wiring: which `Table` pair the quotation service runs against.

use std::sync::Arc;

use quotevend_quotations::{
    InMemoryTable, QuotationService, Table, UnavailableTable, CUSTOMER_COLUMNS, ITEM_COLUMNS,
};

use crate::config::{AppConfig, StoreBackend};

/// Services shared by all handlers, built once at startup.
pub struct AppServices {
    pub quotations: QuotationService,
}

pub fn build_services(config: &AppConfig) -> AppServices {
    match config.store {
        StoreBackend::InMemory => build_in_memory_services(),
        StoreBackend::Sheets => build_sheets_services(config),
    }
}

fn build_in_memory_services() -> AppServices {
    // In-memory tables (dev/test): same headers the sheets carry.
    let items: Arc<dyn Table> = Arc::new(InMemoryTable::new(ITEM_COLUMNS));
    let customers: Arc<dyn Table> = Arc::new(InMemoryTable::new(CUSTOMER_COLUMNS));

    AppServices {
        quotations: QuotationService::new(items, customers),
    }
}

fn build_sheets_services(config: &AppConfig) -> AppServices {
    let (items, customers) = match quotevend_sheets::connect(&config.sheets) {
        Ok(tables) => tables,
        Err(e) => {
            // The process keeps serving; every request fails with the cause
            // until the configuration is fixed and the process restarted.
            tracing::warn!("failed to connect to google sheets: {e}");
            let items: Arc<dyn Table> = Arc::new(UnavailableTable::new(e.to_string()));
            let customers: Arc<dyn Table> = Arc::new(UnavailableTable::new(e.to_string()));
            (items, customers)
        }
    };

    AppServices {
        quotations: QuotationService::new(items, customers),
    }
}
