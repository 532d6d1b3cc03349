use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{i18n::Language, pricing::Currency};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LanguagePreference {
    pub language: Language,
    pub currency: Currency,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetLanguageRequest {
    pub language: Language,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranslationTable {
    pub language: Language,
    pub entries: std::collections::BTreeMap<String, String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranslatedText {
    pub key: String,
    pub text: String,
}
