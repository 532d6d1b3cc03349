use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, i18n::DbPreferenceStore, repository::SeaStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SeaStore,
    pub preferences: DbPreferenceStore,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            store: SeaStore::new(orm.clone()),
            preferences: DbPreferenceStore::new(orm),
            config,
        }
    }
}
