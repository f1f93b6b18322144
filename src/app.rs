//! App Core for autoclick.
//!
//! The coordinator: owns the rule storage, the settings and the handle to
//! the currently open page context.

use crate::database::connection::Database;
use crate::managers::draft_manager::DraftManager;
use crate::managers::rule_manager::RuleManager;
use crate::services::page_channel::PageClient;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::StorageError;
use crate::types::settings::AppSettings;

/// Central application struct.
///
/// RuleManager and DraftManager borrow the database, so they are created on
/// demand through [`App::rules`] and [`App::drafts`].
pub struct App {
    pub db: Database,
    pub settings_engine: SettingsEngine,
    /// Page the coordinator currently talks to, if any.
    pub active_page: Option<PageClient>,
}

impl App {
    /// Opens the database at `db_path` and wraps it with the given settings.
    pub fn new(db_path: &str, settings_engine: SettingsEngine) -> Result<Self, StorageError> {
        let db = Database::open(db_path)?;
        Ok(Self::with_database(db, settings_engine))
    }

    pub fn with_database(db: Database, settings_engine: SettingsEngine) -> Self {
        Self {
            db,
            settings_engine,
            active_page: None,
        }
    }

    pub fn rules(&self) -> RuleManager<'_> {
        RuleManager::new(&self.db)
    }

    pub fn drafts(&self) -> DraftManager<'_> {
        DraftManager::new(&self.db)
    }

    pub fn settings(&self) -> &AppSettings {
        self.settings_engine.get_settings()
    }
}
