use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::collections::HashSet;
use std::path::Path;

/// SQLite ограничивает число параметров запроса (32766).
/// Списки `IN (...)` режутся на части такого размера
pub const MAX_IN_LIST: usize = 500;

/// Строк в одном `INSERT ... VALUES` (до 7 параметров на строку)
pub const INSERT_BATCH_ROWS: usize = 1000;

/// Ключи для `IN (...)`: без повторов, в порядке первого появления
pub fn unique_keys(keys: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(keys.len());
    keys.iter()
        .filter(|k| seen.insert(k.as_str()))
        .cloned()
        .collect()
}

/// Схема склада: таблицы создаются при первом запуске
const SCHEMA: &[(&str, &str)] = &[
    (
        "products",
        r#"
        CREATE TABLE products (
            id TEXT PRIMARY KEY NOT NULL,
            sku TEXT NOT NULL UNIQUE,
            msku TEXT NOT NULL DEFAULT 'UNMAPPED',
            name TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "warehouses",
        r#"
        CREATE TABLE warehouses (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "inventory",
        r#"
        CREATE TABLE inventory (
            id TEXT PRIMARY KEY NOT NULL,
            product_id TEXT NOT NULL REFERENCES products(id),
            warehouse_id TEXT NOT NULL REFERENCES warehouses(id),
            quantity INTEGER NOT NULL DEFAULT 0,
            last_updated TEXT NOT NULL,
            UNIQUE (product_id, warehouse_id)
        );
        "#,
    ),
    (
        "sales",
        r#"
        CREATE TABLE sales (
            id TEXT PRIMARY KEY NOT NULL,
            order_number TEXT NOT NULL,
            customer_name TEXT,
            sale_date TEXT NOT NULL,
            total_amount REAL NOT NULL DEFAULT 0,
            status TEXT NOT NULL
        );
        "#,
    ),
    (
        "sale_items",
        r#"
        CREATE TABLE sale_items (
            id TEXT PRIMARY KEY NOT NULL,
            sale_id TEXT NOT NULL REFERENCES sales(id),
            product_id TEXT NOT NULL REFERENCES products(id),
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL
        );
        "#,
    ),
    (
        "returns",
        r#"
        CREATE TABLE returns (
            id TEXT PRIMARY KEY NOT NULL,
            sale_id TEXT NOT NULL REFERENCES sales(id),
            return_date TEXT NOT NULL,
            reason TEXT,
            status TEXT NOT NULL
        );
        "#,
    ),
    (
        "return_items",
        r#"
        CREATE TABLE return_items (
            id TEXT PRIMARY KEY NOT NULL,
            return_id TEXT NOT NULL REFERENCES returns(id),
            product_id TEXT NOT NULL REFERENCES products(id),
            quantity INTEGER NOT NULL
        );
        "#,
    ),
];

fn build_sqlite_url(path: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

async fn table_exists(conn: &DatabaseConnection, table_name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [table_name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

/// Открыть (или создать) SQLite-базу и досоздать недостающие таблицы.
///
/// Соединение возвращается вызывающему и дальше передаётся явно
/// через `AppState`.
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let conn = Database::connect(build_sqlite_url(&absolute_path)).await?;

    for (table, ddl) in SCHEMA {
        if table_exists(&conn, table).await? {
            continue;
        }
        tracing::info!("Creating {} table", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }

    Ok(conn)
}
