use std::{collections::HashMap, future::Future, sync::Arc};

use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};
use tokio::sync::RwLock;

use super::{Language, LocaleContext};
use crate::{
    entity::app_preferences::{ActiveModel, Column, Entity as AppPreferences},
    error::AppResult,
};

/// Storage key of the persisted language selection.
pub const LANGUAGE_PREFERENCE_KEY: &str = "farmconnect-language";

/// Durable string-keyed storage for user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = AppResult<Option<String>>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = AppResult<()>> + Send;
}

/// Read the persisted language; a missing or unreadable value yields `default`.
pub async fn restore_language<S: PreferenceStore>(
    store: &S,
    default: Language,
) -> AppResult<LocaleContext> {
    let stored = store.get(LANGUAGE_PREFERENCE_KEY).await?;
    let language = match stored.as_deref().map(str::parse::<Language>) {
        Some(Ok(language)) => language,
        Some(Err(err)) => {
            tracing::warn!(error = %err, "ignoring stored language preference");
            default
        }
        None => default,
    };
    Ok(LocaleContext::new(language))
}

/// Persist a new language selection and return the context derived from it.
pub async fn change_language<S: PreferenceStore>(
    store: &S,
    language: Language,
) -> AppResult<LocaleContext> {
    store
        .set(LANGUAGE_PREFERENCE_KEY, language.as_str())
        .await?;
    tracing::info!(language = %language, currency = %language.currency(), "language changed");
    Ok(LocaleContext::new(language))
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in the `app_preferences` table.
#[derive(Debug, Clone)]
pub struct DbPreferenceStore {
    conn: DatabaseConnection,
}

impl DbPreferenceStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

impl PreferenceStore for DbPreferenceStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let row = AppPreferences::find_by_id(key.to_string())
            .one(&self.conn)
            .await?;
        Ok(row.map(|r| r.value))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let active = ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(Utc::now().into()),
        };
        AppPreferences::insert(active)
            .on_conflict(
                OnConflict::column(Column::Key)
                    .update_columns([Column::Value, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::Currency;

    #[tokio::test]
    async fn restores_default_when_nothing_is_stored() {
        let store = MemoryPreferenceStore::new();
        let ctx = restore_language(&store, Language::En).await.unwrap();
        assert_eq!(ctx.language(), Language::En);
    }

    #[tokio::test]
    async fn change_persists_and_switches_currency() {
        let store = MemoryPreferenceStore::new();
        let ctx = change_language(&store, Language::Ms).await.unwrap();
        assert_eq!(ctx.currency(), Currency::Myr);
        assert_eq!(
            store.get(LANGUAGE_PREFERENCE_KEY).await.unwrap().as_deref(),
            Some("ms")
        );

        let restored = restore_language(&store, Language::En).await.unwrap();
        assert_eq!(restored.language(), Language::Ms);
        assert_eq!(restored.currency(), Currency::Myr);
    }

    #[tokio::test]
    async fn garbage_in_storage_falls_back_to_default() {
        let store = MemoryPreferenceStore::new();
        store.set(LANGUAGE_PREFERENCE_KEY, "klingon").await.unwrap();
        let ctx = restore_language(&store, Language::Ms).await.unwrap();
        assert_eq!(ctx.language(), Language::Ms);
    }
}
