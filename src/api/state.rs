//! Application state for the payslip engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, TaxTables};

/// Shared application state.
///
/// Holds the loaded tax tables, shared read-only across handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the loaded tax tables.
    pub fn tables(&self) -> &TaxTables {
        self.config.tables()
    }
}
