//! 示例数据
//!
//! 以 `seed_history` 表中的标记保证每个库只写入一次。

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::info;

pub const SEED_MARKER: &str = "catalog-sample-v1";

struct SeedCategory {
    name: &'static str,
    description: &'static str,
}

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    // 以分为单位
    price_cents: i64,
    category: &'static str,
}

const CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "Electronics",
        description: "Electronic devices and gadgets",
    },
    SeedCategory {
        name: "Clothing",
        description: "Fashion and apparel",
    },
    SeedCategory {
        name: "Books",
        description: "Books and publications",
    },
    SeedCategory {
        name: "Home & Garden",
        description: "Home improvement and garden items",
    },
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Laptop",
        description: "High-performance laptop for work and gaming",
        price_cents: 99999,
        category: "Electronics",
    },
    SeedProduct {
        name: "Smartphone",
        description: "Latest smartphone with advanced features",
        price_cents: 69999,
        category: "Electronics",
    },
    SeedProduct {
        name: "T-Shirt",
        description: "Comfortable cotton t-shirt",
        price_cents: 1999,
        category: "Clothing",
    },
    SeedProduct {
        name: "Jeans",
        description: "Classic blue jeans",
        price_cents: 4999,
        category: "Clothing",
    },
    SeedProduct {
        name: "The Great Novel",
        description: "Bestselling fiction novel",
        price_cents: 1499,
        category: "Books",
    },
    SeedProduct {
        name: "Garden Tool Set",
        description: "Complete set of garden tools",
        price_cents: 8999,
        category: "Home & Garden",
    },
];

/// 写入示例数据；已写过则跳过。返回本次是否写入。
pub async fn seed_data(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let applied: Option<String> =
        sqlx::query_scalar("SELECT applied_at FROM seed_history WHERE name = ?")
            .bind(SEED_MARKER)
            .fetch_optional(&mut *tx)
            .await?;

    if let Some(applied_at) = applied {
        info!("Seed {} already applied at {}, skipping", SEED_MARKER, applied_at);
        return Ok(false);
    }

    info!("Seeding database with example data...");

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for category in CATEGORIES {
        let result = sqlx::query("INSERT INTO categories (name, description) VALUES (?, ?)")
            .bind(category.name)
            .bind(category.description)
            .execute(&mut *tx)
            .await?;
        category_ids.push((category.name, result.last_insert_rowid()));
    }

    for product in PRODUCTS {
        let category_id = category_ids
            .iter()
            .find(|(name, _)| *name == product.category)
            .map(|(_, id)| *id)
            .ok_or_else(|| {
                sqlx::Error::Protocol(format!("unknown seed category {}", product.category))
            })?;

        sqlx::query(
            "INSERT INTO products (name, description, price, category_id) VALUES (?, ?, ?, ?)",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(Decimal::new(product.price_cents, 2).to_string())
        .bind(category_id)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("INSERT INTO seed_history (name, applied_at) VALUES (?, ?)")
        .bind(SEED_MARKER)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        "Database seeded with {} categories and {} products",
        CATEGORIES.len(),
        PRODUCTS.len()
    );
    Ok(true)
}
