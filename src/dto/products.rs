use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{NewProduct, Product},
    pricing::{fits_price_column, resolve_myr_price, round_minor},
};

/// Admin product form, field values exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductDraft {
    pub name_en: String,
    pub name_ms: String,
    pub description_en: String,
    pub description_ms: String,
    pub category_id: String,
    pub cut_id: String,
    pub price_usd: String,
    pub price_myr: String,
    pub stock_quantity: String,
    pub image_url: String,
    pub is_active: Option<bool>,
}

impl ProductDraft {
    /// Prefill an edit form from a stored product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name_en: product.name_en.clone(),
            name_ms: product.name_ms.clone(),
            description_en: product.description_en.clone().unwrap_or_default(),
            description_ms: product.description_ms.clone().unwrap_or_default(),
            category_id: product.category_id.to_string(),
            cut_id: product.cut_id.map(|id| id.to_string()).unwrap_or_default(),
            price_usd: product.price_usd.to_string(),
            price_myr: product.price_myr.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
            is_active: Some(product.is_active),
        }
    }

    /// Returns an empty `Vec` if the draft may be submitted.
    ///
    /// Only the name, the category and a non-zero primary price are required.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name_en.trim().is_empty() {
            errors.push("Product name must not be empty".to_string());
        }

        if self.category_id.trim().is_empty() {
            errors.push("Category must be selected".to_string());
        }

        let price_usd = parse_price(&self.price_usd);
        match price_usd {
            Some(price) if price <= Decimal::ZERO => {
                errors.push("Price (USD) must be greater than zero".to_string())
            }
            Some(price) if !fits_price_column(price) => {
                errors.push("Price (USD) is too large".to_string())
            }
            Some(_) => {}
            None => errors.push("Price (USD) is required".to_string()),
        }

        let price_myr = parse_price(&self.price_myr);
        match price_myr {
            None if !self.price_myr.trim().is_empty() => {
                errors.push("Price (MYR) must be a number".to_string())
            }
            Some(price) if price < Decimal::ZERO => {
                errors.push("Price (MYR) must not be negative".to_string())
            }
            Some(price) if !fits_price_column(price) => {
                errors.push("Price (MYR) is too large".to_string())
            }
            _ => {}
        }

        // Blank or zero MYR is derived, and the derived amount must fit as well.
        if let Some(usd) = price_usd.filter(|p| *p > Decimal::ZERO && fits_price_column(*p)) {
            let myr = price_myr.filter(|p| *p > Decimal::ZERO);
            if myr.is_none() && resolve_myr_price(round_minor(usd), None).is_none() {
                errors.push("Price (MYR) derived from USD is too large".to_string());
            }
        }

        errors
    }

    /// Validate and apply form defaults.
    pub fn into_new_product(self) -> AppResult<NewProduct> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let price_usd = parse_price(&self.price_usd)
            .map(round_minor)
            .ok_or_else(|| AppError::Validation(vec!["Price (USD) is required".into()]))?;
        let price_myr = resolve_myr_price(price_usd, parse_price(&self.price_myr).map(round_minor))
            .ok_or_else(|| {
                AppError::Validation(vec!["Price (MYR) derived from USD is too large".into()])
            })?;
        let name_en = self.name_en.trim().to_string();
        let name_ms = non_blank(self.name_ms).unwrap_or_else(|| name_en.clone());

        Ok(NewProduct {
            category_id: self.category_id.trim().to_string(),
            cut_id: non_blank(self.cut_id),
            name_en,
            name_ms,
            description_en: non_blank(self.description_en),
            description_ms: non_blank(self.description_ms),
            price_usd,
            price_myr,
            stock_quantity: parse_stock(&self.stock_quantity),
            image_url: non_blank(self.image_url),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

fn parse_price(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw).ok()
}

/// Blank or garbage stock counts as zero; stock is never negative.
fn parse_stock(raw: &str) -> i32 {
    raw.trim().parse::<i32>().unwrap_or(0).max(0)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicken_breast() -> ProductDraft {
        ProductDraft {
            name_en: "Chicken Breast".into(),
            category_id: "cat-1".into(),
            price_usd: "12.99".into(),
            ..Default::default()
        }
    }

    #[test]
    fn blank_myr_and_stock_take_derived_defaults() {
        let product = chicken_breast().into_new_product().unwrap();
        assert_eq!(product.price_usd, Decimal::new(1299, 2));
        assert_eq!(product.price_myr, Decimal::new(5521, 2));
        assert_eq!(product.stock_quantity, 0);
        assert_eq!(product.category_id, "cat-1");
        assert_eq!(product.name_ms, "Chicken Breast");
        assert_eq!(product.cut_id, None);
        assert!(product.is_active);
    }

    #[test]
    fn supplied_myr_and_stock_are_kept() {
        let draft = ProductDraft {
            price_myr: "55.25".into(),
            stock_quantity: " 25 ".into(),
            name_ms: "Dada Ayam".into(),
            ..chicken_breast()
        };
        let product = draft.into_new_product().unwrap();
        assert_eq!(product.price_myr, Decimal::new(5525, 2));
        assert_eq!(product.stock_quantity, 25);
        assert_eq!(product.name_ms, "Dada Ayam");
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let errors = ProductDraft::default().validate();
        assert_eq!(errors.len(), 3);

        let zero_price = ProductDraft {
            price_usd: "0".into(),
            ..chicken_breast()
        };
        assert_eq!(
            zero_price.validate(),
            vec!["Price (USD) must be greater than zero".to_string()]
        );

        let err = ProductDraft {
            category_id: "  ".into(),
            ..chicken_breast()
        }
        .into_new_product()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn zero_myr_is_derived_and_negative_rejected() {
        let zero = ProductDraft {
            price_myr: "0".into(),
            ..chicken_breast()
        };
        assert!(zero.validate().is_empty());
        assert_eq!(
            zero.into_new_product().unwrap().price_myr,
            Decimal::new(5521, 2)
        );

        let negative = ProductDraft {
            price_myr: "-1.00".into(),
            ..chicken_breast()
        };
        assert_eq!(
            negative.validate(),
            vec!["Price (MYR) must not be negative".to_string()]
        );
        assert!(matches!(
            negative.into_new_product(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn prices_beyond_the_column_are_validation_errors() {
        let huge = ProductDraft {
            price_usd: "79228162514264337593543950335".into(),
            ..chicken_breast()
        };
        assert_eq!(huge.validate(), vec!["Price (USD) is too large".to_string()]);
        assert!(matches!(huge.into_new_product(), Err(AppError::Validation(_))));

        // Fits as USD but not once converted.
        let derived_too_large = ProductDraft {
            price_usd: "9000000000".into(),
            ..chicken_breast()
        };
        assert_eq!(
            derived_too_large.validate(),
            vec!["Price (MYR) derived from USD is too large".to_string()]
        );

        let explicit_myr = ProductDraft {
            price_usd: "9000000000".into(),
            price_myr: "9999999999.99".into(),
            ..chicken_breast()
        };
        assert!(explicit_myr.validate().is_empty());

        let myr_too_large = ProductDraft {
            price_myr: "10000000000".into(),
            ..chicken_breast()
        };
        assert_eq!(
            myr_too_large.validate(),
            vec!["Price (MYR) is too large".to_string()]
        );
    }

    #[test]
    fn garbage_stock_parses_to_zero() {
        assert_eq!(parse_stock(""), 0);
        assert_eq!(parse_stock("abc"), 0);
        assert_eq!(parse_stock("-4"), 0);
        assert_eq!(parse_stock("7"), 7);
    }
}
