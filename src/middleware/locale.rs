use axum::{
    extract::{FromRequestParts, Query},
    http::{HeaderMap, header},
};

use crate::{
    error::AppError,
    i18n::{Language, LocaleContext, restore_language},
    routes::params::LocaleQuery,
    state::AppState,
};

/// Locale for the current request.
///
/// Resolved from `?lang=`, then `Accept-Language`, then the persisted
/// preference, then the configured default.
#[derive(Debug, Clone, Copy)]
pub struct RequestLocale(pub LocaleContext);

/// The explicit language requested by the caller, if any.
pub fn requested_language(
    lang: Option<&str>,
    headers: &HeaderMap,
) -> Result<Option<Language>, AppError> {
    if let Some(lang) = lang.filter(|l| !l.trim().is_empty()) {
        return lang.parse::<Language>().map(Some).map_err(AppError::BadRequest);
    }

    let accept = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    Ok(accept.and_then(parse_accept_language))
}

/// First tag in an `Accept-Language` list whose primary subtag we support.
fn parse_accept_language(value: &str) -> Option<Language> {
    value
        .split(',')
        .filter_map(|tag| tag.split(';').next())
        .filter_map(|tag| tag.trim().split('-').next())
        .find_map(|primary| primary.parse::<Language>().ok())
}

impl FromRequestParts<AppState> for RequestLocale {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<LocaleQuery>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if let Some(language) = requested_language(query.lang.as_deref(), &parts.headers)? {
            return Ok(RequestLocale(LocaleContext::new(language)));
        }

        let default = state.config.default_language;
        match restore_language(&state.preferences, default).await {
            Ok(ctx) => Ok(RequestLocale(ctx)),
            Err(err) => {
                tracing::warn!(error = %err, "language preference unavailable, using default");
                Ok(RequestLocale(LocaleContext::new(default)))
            }
        }
    }
}
