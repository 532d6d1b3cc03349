use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::preferences::{LanguagePreference, SetLanguageRequest, TranslatedText, TranslationTable},
    error::AppResult,
    middleware::locale::RequestLocale,
    response::ApiResponse,
    services::preference_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/translations", get(translations))
        .route("/translations/{key}", get(translate_key))
        .route(
            "/preferences/language",
            get(get_language).put(set_language),
        )
}

#[utoipa::path(
    get,
    path = "/api/translations",
    params(
        ("lang" = Option<String>, Query, description = "en or ms")
    ),
    responses(
        (status = 200, description = "Every UI string in the active language", body = ApiResponse<TranslationTable>),
        (status = 400, description = "Unsupported language"),
    ),
    tag = "I18n"
)]
pub async fn translations(
    RequestLocale(ctx): RequestLocale,
) -> AppResult<Json<ApiResponse<TranslationTable>>> {
    Ok(Json(preference_service::translations(&ctx)))
}

#[utoipa::path(
    get,
    path = "/api/translations/{key}",
    params(
        ("key" = String, Path, description = "Dotted key such as nav.orders"),
        ("lang" = Option<String>, Query, description = "en or ms")
    ),
    responses(
        (status = 200, description = "Translated text, or the key itself when unknown", body = ApiResponse<TranslatedText>),
    ),
    tag = "I18n"
)]
pub async fn translate_key(
    RequestLocale(ctx): RequestLocale,
    Path(key): Path<String>,
) -> AppResult<Json<ApiResponse<TranslatedText>>> {
    Ok(Json(preference_service::translate_key(&ctx, &key)))
}

#[utoipa::path(
    get,
    path = "/api/preferences/language",
    responses(
        (status = 200, description = "Stored language and its currency", body = ApiResponse<LanguagePreference>),
    ),
    tag = "I18n"
)]
pub async fn get_language(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<LanguagePreference>>> {
    let resp =
        preference_service::get_language(&state.preferences, state.config.default_language).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/preferences/language",
    request_body = SetLanguageRequest,
    responses(
        (status = 200, description = "Language switched and persisted", body = ApiResponse<LanguagePreference>),
        (status = 422, description = "Unsupported language"),
    ),
    tag = "I18n"
)]
pub async fn set_language(
    State(state): State<AppState>,
    Json(payload): Json<SetLanguageRequest>,
) -> AppResult<Json<ApiResponse<LanguagePreference>>> {
    let resp = preference_service::set_language(&state.preferences, payload).await?;
    Ok(Json(resp))
}
