//! Apply the schema to the database: CREATE SCHEMA, then the catalog and inventory tables.
//! Idempotent: every statement is IF NOT EXISTS.

use crate::error::AppError;
use crate::repository::{CATALOG_ENTRY_TABLE, INVENTORY_RECORD_TABLE};
use sqlx::PgPool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// DDL in dependency order: schema, referenced table, referencing table.
pub fn schema_statements(schema: &str) -> Vec<String> {
    let schema_name = quote(schema);
    let catalog = format!("{}.{}", schema_name, quote(CATALOG_ENTRY_TABLE));
    let inventory = format!("{}.{}", schema_name, quote(INVENTORY_RECORD_TABLE));
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", schema_name),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                "id" BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "name" TEXT NOT NULL CHECK ("name" <> ''),
                "description" TEXT,
                "price" NUMERIC NOT NULL CHECK ("price" >= 0)
            )
            "#,
            catalog
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                "id" BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "quantity_in_stock" INTEGER NOT NULL,
                "catalog_entry_id" BIGINT UNIQUE REFERENCES {} ("id") ON DELETE SET NULL
            )
            "#,
            inventory, catalog
        ),
    ]
}

pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    for statement in schema_statements(schema) {
        tracing::debug!(sql = %statement.trim(), "migration");
        sqlx::query(&statement).execute(pool).await?;
    }
    tracing::info!(schema, "schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_link_is_unique_and_nulls_on_delete() {
        let statements = schema_statements("pharmacy");
        assert_eq!(statements[0], "CREATE SCHEMA IF NOT EXISTS \"pharmacy\"");
        assert!(statements[1].contains("\"pharmacy\".\"catalog_entry\""));
        let inventory = &statements[2];
        assert!(inventory.contains(
            "\"catalog_entry_id\" BIGINT UNIQUE REFERENCES \"pharmacy\".\"catalog_entry\" (\"id\") ON DELETE SET NULL"
        ));
    }
}
