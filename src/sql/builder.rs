//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for a table with a BIGINT `id` key.
//! Identifiers come from code and the validated schema setting; values are always bound.

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

const PK: &str = "id";

#[derive(Clone, Debug)]
pub struct Table {
    pub schema: String,
    pub name: &'static str,
    /// Non-key columns, in bind order for INSERT and UPDATE.
    pub columns: &'static [&'static str],
}

impl Table {
    pub fn new(schema: impl Into<String>, name: &'static str, columns: &'static [&'static str]) -> Self {
        Table {
            schema: schema.into(),
            name,
            columns,
        }
    }

    pub fn qualified(&self) -> String {
        qualified_table(&self.schema, self.name)
    }

    /// `"id", "col_a", "col_b"`, optionally prefixed with a table alias.
    fn column_list(&self, alias: Option<&str>) -> String {
        std::iter::once(PK)
            .chain(self.columns.iter().copied())
            .map(|c| match alias {
                Some(a) => format!("{}.{}", a, quoted(c)),
                None => quoted(c),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// SELECT by primary key. Binds: $1 = id.
pub fn select_by_id(table: &Table) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        table.column_list(None),
        table.qualified(),
        quoted(PK)
    )
}

/// SELECT every row ORDER BY id.
pub fn select_all(table: &Table) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        table.column_list(None),
        table.qualified(),
        quoted(PK)
    )
}

/// SELECT rows where one column equals $1, ORDER BY id.
pub fn select_by_column(table: &Table, column: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
        table.column_list(None),
        table.qualified(),
        quoted(column),
        quoted(PK)
    )
}

/// SELECT rows of `table` that no row of `referencing` points at through `fk_column`.
pub fn select_unreferenced(table: &Table, referencing: &Table, fk_column: &str) -> String {
    const MAIN_ALIAS: &str = "main";
    format!(
        "SELECT {} FROM {} {} WHERE NOT EXISTS (SELECT 1 FROM {} ref WHERE ref.{} = {}.{}) ORDER BY {}.{}",
        table.column_list(Some(MAIN_ALIAS)),
        table.qualified(),
        MAIN_ALIAS,
        referencing.qualified(),
        quoted(fk_column),
        MAIN_ALIAS,
        quoted(PK),
        MAIN_ALIAS,
        quoted(PK)
    )
}

/// SELECT EXISTS by primary key. Binds: $1 = id.
pub fn exists_by_id(table: &Table) -> String {
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1)",
        table.qualified(),
        quoted(PK)
    )
}

/// INSERT letting the identity column assign the key. Binds: columns in order.
pub fn insert(table: &Table) -> String {
    let cols: Vec<String> = table.columns.iter().map(|c| quoted(c)).collect();
    let placeholders: Vec<String> = (1..=table.columns.len()).map(|n| format!("${}", n)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table.qualified(),
        cols.join(", "),
        placeholders.join(", "),
        table.column_list(None)
    )
}

/// UPDATE every non-key column by id. Binds: columns in order, then id.
pub fn update_by_id(table: &Table) -> String {
    let sets: Vec<String> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quoted(c), i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        table.qualified(),
        sets.join(", "),
        quoted(PK),
        table.columns.len() + 1,
        table.column_list(None)
    )
}

/// DELETE by id. Binds: $1 = id.
pub fn delete_by_id(table: &Table) -> String {
    format!("DELETE FROM {} WHERE {} = $1", table.qualified(), quoted(PK))
}
