use crate::{
    dto::preferences::{LanguagePreference, SetLanguageRequest, TranslatedText, TranslationTable},
    error::{AppError, AppResult},
    i18n::{Language, LocaleContext, PreferenceStore, change_language, restore_language, table},
    response::{ApiResponse, Meta},
};

pub async fn get_language<S: PreferenceStore>(
    store: &S,
    default: Language,
) -> AppResult<ApiResponse<LanguagePreference>> {
    let ctx = restore_language(store, default)
        .await
        .map_err(AppError::operation_failed("Failed to load language preference"))?;
    Ok(ApiResponse::success(
        "Language",
        preference_of(&ctx),
        Some(Meta::empty()),
    ))
}

pub async fn set_language<S: PreferenceStore>(
    store: &S,
    payload: SetLanguageRequest,
) -> AppResult<ApiResponse<LanguagePreference>> {
    let ctx = change_language(store, payload.language)
        .await
        .map_err(AppError::operation_failed("Failed to save language preference"))?;
    Ok(ApiResponse::success(
        "Language updated",
        preference_of(&ctx),
        Some(Meta::empty()),
    ))
}

pub fn translations(ctx: &LocaleContext) -> ApiResponse<TranslationTable> {
    let entries = table(ctx.language())
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiResponse::success(
        "Translations",
        TranslationTable {
            language: ctx.language(),
            entries,
        },
        Some(Meta::empty()),
    )
}

pub fn translate_key(ctx: &LocaleContext, key: &str) -> ApiResponse<TranslatedText> {
    ApiResponse::success(
        "Translation",
        TranslatedText {
            key: key.to_string(),
            text: ctx.t(key).to_string(),
        },
        None,
    )
}

fn preference_of(ctx: &LocaleContext) -> LanguagePreference {
    LanguagePreference {
        language: ctx.language(),
        currency: ctx.currency(),
    }
}
