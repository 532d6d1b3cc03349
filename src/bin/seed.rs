use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use farmconnect_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    models::OrderItem,
    pricing::derive_myr_price,
};

const CATEGORIES: [(&str, &str, &str); 3] = [
    ("beef", "Beef", "Daging Lembu"),
    ("chicken", "Chicken", "Ayam"),
    ("mutton", "Mutton", "Daging Kambing"),
];

const CUTS: [(&str, &str, &str); 6] = [
    ("belly", "Belly", "Perut"),
    ("breast", "Breast", "Dada"),
    ("leg", "Leg", "Kaki"),
    ("ribs", "Ribs", "Tulang Rusuk"),
    ("shoulder", "Shoulder", "Bahu"),
    ("thigh", "Thigh", "Peha"),
];

struct SeedProduct {
    category: &'static str,
    cut: &'static str,
    name_en: &'static str,
    name_ms: &'static str,
    description_en: &'static str,
    /// Cents.
    price_usd: i64,
    stock: i32,
}

const PRODUCTS: [SeedProduct; 4] = [
    SeedProduct {
        category: "chicken",
        cut: "breast",
        name_en: "Chicken Breast",
        name_ms: "Dada Ayam",
        description_en: "Fresh boneless chicken breast",
        price_usd: 1299,
        stock: 50,
    },
    SeedProduct {
        category: "beef",
        cut: "ribs",
        name_en: "Beef Ribs",
        name_ms: "Rusuk Lembu",
        description_en: "Premium beef ribs for BBQ",
        price_usd: 3299,
        stock: 20,
    },
    SeedProduct {
        category: "mutton",
        cut: "leg",
        name_en: "Mutton Leg",
        name_ms: "Kaki Kambing",
        description_en: "Whole mutton leg, bone in",
        price_usd: 2450,
        stock: 15,
    },
    SeedProduct {
        category: "chicken",
        cut: "thigh",
        name_en: "Chicken Thigh",
        name_ms: "Peha Ayam",
        description_en: "Juicy chicken thigh, skin on",
        price_usd: 1075,
        stock: 40,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    let pool = create_pool(&config.database_url).await?;

    for (code, en, ms) in CATEGORIES {
        upsert_reference(&pool, "categories", code, en, ms).await?;
    }
    for (code, en, ms) in CUTS {
        upsert_reference(&pool, "cuts", code, en, ms).await?;
    }
    let products = seed_products(&pool).await?;
    let customer_id = ensure_customer(&pool, "Sunrise Cafe", "orders@sunrisecafe.my").await?;
    seed_orders(&pool, customer_id, &products).await?;

    println!("Seed completed. Customer ID: {customer_id}");
    Ok(())
}

/// Categories and cuts share a shape; `table` is one of our own constants.
async fn upsert_reference(
    pool: &PgPool,
    table: &str,
    code: &str,
    name_en: &str,
    name_ms: &str,
) -> anyhow::Result<Uuid> {
    let sql = format!(
        r#"
        INSERT INTO {table} (id, code, name_en, name_ms)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (code) DO UPDATE SET name_en = EXCLUDED.name_en, name_ms = EXCLUDED.name_ms
        RETURNING id
        "#
    );
    let (id,): (Uuid,) = sqlx::query_as(&sql)
        .bind(Uuid::new_v4())
        .bind(code)
        .bind(name_en)
        .bind(name_ms)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn id_by_code(pool: &PgPool, table: &str, code: &str) -> anyhow::Result<Uuid> {
    let sql = format!("SELECT id FROM {table} WHERE code = $1");
    let (id,): (Uuid,) = sqlx::query_as(&sql).bind(code).fetch_one(pool).await?;
    Ok(id)
}

async fn seed_products(pool: &PgPool) -> anyhow::Result<Vec<(Uuid, Decimal)>> {
    let mut seeded = Vec::with_capacity(PRODUCTS.len());
    for product in PRODUCTS {
        let existing: Option<(Uuid, Decimal)> =
            sqlx::query_as("SELECT id, price_usd FROM products WHERE name_en = $1")
                .bind(product.name_en)
                .fetch_optional(pool)
                .await?;
        if let Some(row) = existing {
            seeded.push(row);
            continue;
        }

        let category_id = id_by_code(pool, "categories", product.category).await?;
        let cut_id = id_by_code(pool, "cuts", product.cut).await?;
        let price_usd = Decimal::new(product.price_usd, 2);
        let myr = derive_myr_price(price_usd)
            .ok_or_else(|| anyhow::anyhow!("{} is priced out of range", product.name_en))?;
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO products
                (id, category_id, cut_id, name_en, name_ms, description_en,
                 price_usd, price_myr, stock_quantity, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE)
            "#,
        )
        .bind(id)
        .bind(category_id)
        .bind(cut_id)
        .bind(product.name_en)
        .bind(product.name_ms)
        .bind(product.description_en)
        .bind(price_usd)
        .bind(myr)
        .bind(product.stock)
        .execute(pool)
        .await?;
        seeded.push((id, price_usd));
    }

    println!("Seeded {} products", seeded.len());
    Ok(seeded)
}

async fn ensure_customer(pool: &PgPool, business_name: &str, email: &str) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO customers (id, business_name, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET business_name = EXCLUDED.business_name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(business_name)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn seed_orders(
    pool: &PgPool,
    customer_id: Uuid,
    products: &[(Uuid, Decimal)],
) -> anyhow::Result<()> {
    let orders: [(&str, &str, &[(usize, i32)]); 3] = [
        ("ORD-001", "pending", &[(0, 2), (3, 1)]),
        ("ORD-002", "packed", &[(1, 1)]),
        ("ORD-003", "delivered", &[(2, 3)]),
    ];

    let mut tx = pool.begin().await?;
    for (number, status, lines) in orders {
        let items: Vec<(Uuid, i32, Decimal)> = lines
            .iter()
            .filter_map(|&(idx, qty)| products.get(idx).map(|&(id, price)| (id, qty, price)))
            .collect();
        let subtotal: Decimal = items
            .iter()
            .map(|&(_, qty, unit)| OrderItem::line_total(qty, unit))
            .sum();

        let inserted: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO orders (id, order_number, status, currency, subtotal, total, customer_id)
            VALUES ($1, $2, $3, 'USD', $4, $4, $5)
            ON CONFLICT (order_number) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(number)
        .bind(status)
        .bind(subtotal)
        .bind(customer_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((order_id,)) = inserted else {
            continue;
        };

        for (product_id, qty, unit) in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, quantity, unit_price, total_price)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(order_id)
            .bind(product_id)
            .bind(qty)
            .bind(unit)
            .bind(OrderItem::line_total(qty, unit))
            .execute(&mut *tx)
            .await?;
        }
        println!("Seeded order {number}");
    }
    tx.commit().await?;
    Ok(())
}
