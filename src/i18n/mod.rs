//! Bilingual text lookup and the locale context threaded through rendering.
//!
//! The active language fixes the currency; there is no other way to pick one.

mod preferences;
mod translations;

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pricing::Currency;

pub use preferences::{
    DbPreferenceStore, LANGUAGE_PREFERENCE_KEY, MemoryPreferenceStore, PreferenceStore,
    change_language, restore_language,
};
pub use translations::{table, translate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ms,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ms => "ms",
        }
    }

    pub fn currency(self) -> Currency {
        match self {
            Language::En => Currency::Usd,
            Language::Ms => Currency::Myr,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ms" => Ok(Language::Ms),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Language plus everything derived from it, passed explicitly to view builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocaleContext {
    language: Language,
}

impl LocaleContext {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn currency(&self) -> Currency {
        self.language.currency()
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.language, key)
    }

    /// Choose between the two halves of a bilingual record field.
    pub fn pick<'a>(&self, en: &'a str, ms: &'a str) -> &'a str {
        match self.language {
            Language::En => en,
            Language::Ms => ms,
        }
    }

    pub fn pick_opt<'a>(&self, en: Option<&'a str>, ms: Option<&'a str>) -> Option<&'a str> {
        match self.language {
            Language::En => en,
            Language::Ms => ms,
        }
    }

    pub fn format_money(&self, amount: Decimal) -> String {
        self.currency().format(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_fixes_currency() {
        assert_eq!(Language::En.currency(), Currency::Usd);
        assert_eq!(Language::Ms.currency(), Currency::Myr);
        assert_eq!(LocaleContext::new(Language::Ms).currency().code(), "MYR");
        assert_eq!(LocaleContext::new(Language::En).currency().code(), "USD");
    }

    #[test]
    fn parses_language_codes() {
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert_eq!(" MS ".parse::<Language>(), Ok(Language::Ms));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn context_translates_and_picks_fields() {
        let ms = LocaleContext::new(Language::Ms);
        assert_eq!(ms.t("nav.orders"), "Pesanan");
        assert_eq!(ms.t("nav.unknown"), "nav.unknown");
        assert_eq!(ms.pick("Chicken Breast", "Dada Ayam"), "Dada Ayam");
        assert_eq!(ms.pick_opt(Some("Lean"), None), None);

        let en = LocaleContext::default();
        assert_eq!(en.language(), Language::En);
        assert_eq!(en.format_money(Decimal::new(1299, 2)), "$12.99");
    }
}
