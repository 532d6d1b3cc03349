use farmconnect_api::{
    dto::{
        catalog::{CartLineRequest, CartQuoteRequest},
        preferences::SetLanguageRequest,
        products::ProductDraft,
    },
    error::AppError,
    i18n::{Language, LocaleContext, MemoryPreferenceStore},
    middleware::auth::{AuthUser, Role},
    models::Product,
    repository::MemoryStore,
    services::{catalog_service, preference_service, product_service},
};
use rust_decimal::Decimal;
use uuid::Uuid;

async fn add(
    store: &MemoryStore,
    category: &str,
    name: &str,
    usd: &str,
) -> anyhow::Result<Product> {
    let admin = AuthUser {
        user_id: Uuid::new_v4(),
        role: Role::Admin,
    };
    let category_id = store
        .category_by_code(category)
        .await
        .map(|c| c.id.to_string())
        .unwrap_or_default();
    let draft = ProductDraft {
        name_en: name.into(),
        name_ms: format!("{name} MS"),
        category_id,
        price_usd: usd.into(),
        stock_quantity: "10".into(),
        ..ProductDraft::default()
    };
    product_service::create_product(store, &admin, draft)
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing product"))
}

#[tokio::test]
async fn catalog_tabs_follow_category_order() -> anyhow::Result<()> {
    let store = MemoryStore::with_reference_data().await;
    add(&store, "chicken", "Chicken Breast", "12.99").await?;
    add(&store, "beef", "Beef Ribs", "32.99").await?;

    let view = catalog_service::catalog(&store, &LocaleContext::new(Language::Ms))
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing catalog"))?;
    let tabs: Vec<_> = view.tabs.iter().map(|t| (t.code.as_str(), t.products.len())).collect();
    assert_eq!(tabs, [("beef", 1), ("chicken", 1), ("mutton", 0)]);
    assert_eq!(view.tabs[1].products[0].name, "Chicken Breast MS");
    assert_eq!(view.tabs[1].products[0].price_display, "RM55.21");

    let beef_only = catalog_service::list_products(&store, Some("beef".into()))
        .await?
        .data
        .map(|l| l.items)
        .unwrap_or_default();
    assert_eq!(beef_only.len(), 1);
    assert_eq!(beef_only[0].name_en, "Beef Ribs");
    Ok(())
}

#[tokio::test]
async fn cart_quote_prices_in_active_currency() -> anyhow::Result<()> {
    let store = MemoryStore::with_reference_data().await;
    let breast = add(&store, "chicken", "Chicken Breast", "12.99").await?;

    let request = CartQuoteRequest {
        items: vec![
            CartLineRequest {
                product_id: breast.id,
                quantity: 2,
            },
            CartLineRequest {
                product_id: breast.id,
                quantity: 1,
            },
        ],
    };
    let cart = catalog_service::quote_cart(&store, &LocaleContext::new(Language::En), request)
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing cart"))?;
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.item_count, 3);
    assert_eq!(cart.total, Decimal::new(3897, 2));
    assert_eq!(cart.badge, "3 items in cart");

    let zero = CartQuoteRequest {
        items: vec![CartLineRequest {
            product_id: breast.id,
            quantity: 0,
        }],
    };
    let err = catalog_service::quote_cart(&store, &LocaleContext::default(), zero)
        .await
        .err();
    assert!(matches!(err, Some(AppError::BadRequest(_))));

    let unknown = CartQuoteRequest {
        items: vec![CartLineRequest {
            product_id: Uuid::new_v4(),
            quantity: 1,
        }],
    };
    let err = catalog_service::quote_cart(&store, &LocaleContext::default(), unknown)
        .await
        .err();
    assert!(matches!(err, Some(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn cart_quote_rejects_more_units_than_it_can_count() -> anyhow::Result<()> {
    let store = MemoryStore::with_reference_data().await;
    let breast = add(&store, "chicken", "Chicken Breast", "12.99").await?;
    let ribs = add(&store, "beef", "Beef Ribs", "32.99").await?;

    for second in [breast.id, ribs.id] {
        let request = CartQuoteRequest {
            items: vec![
                CartLineRequest {
                    product_id: breast.id,
                    quantity: u32::MAX,
                },
                CartLineRequest {
                    product_id: second,
                    quantity: 1,
                },
            ],
        };
        let err = catalog_service::quote_cart(&store, &LocaleContext::default(), request)
            .await
            .err();
        assert!(matches!(err, Some(AppError::BadRequest(_))), "got {err:?}");
    }

    let largest = CartQuoteRequest {
        items: vec![CartLineRequest {
            product_id: breast.id,
            quantity: u32::MAX,
        }],
    };
    let cart = catalog_service::quote_cart(&store, &LocaleContext::new(Language::En), largest)
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing cart"))?;
    assert_eq!(cart.item_count, u32::MAX);
    assert_eq!(cart.total, Decimal::new(1299, 2) * Decimal::from(u32::MAX));
    Ok(())
}

#[tokio::test]
async fn language_preference_round_trip() -> anyhow::Result<()> {
    let prefs = MemoryPreferenceStore::new();

    let initial = preference_service::get_language(&prefs, Language::En)
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing preference"))?;
    assert_eq!(initial.language, Language::En);

    preference_service::set_language(
        &prefs,
        SetLanguageRequest {
            language: Language::Ms,
        },
    )
    .await?;
    let restored = preference_service::get_language(&prefs, Language::En)
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing preference"))?;
    assert_eq!(restored.language, Language::Ms);
    assert_eq!(restored.currency.code(), "MYR");

    let table = preference_service::translations(&LocaleContext::new(Language::Ms))
        .data
        .ok_or_else(|| anyhow::anyhow!("missing table"))?;
    assert_eq!(table.entries.get("nav.orders").map(String::as_str), Some("Pesanan"));
    Ok(())
}
