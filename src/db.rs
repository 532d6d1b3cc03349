use anyhow::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, SqlxPostgresConnector, Statement};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::path::PathBuf;
use tokio::fs;

pub type DbPool = PgPool;

/// Create a raw sqlx pool, used by the seeding binary.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// A SeaORM connection that only dials the database on first use.
pub fn create_lazy_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let pool = PgPoolOptions::new().connect_lazy(database_url)?;
    Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
}

/// Minimal migration runner that executes SQL files in `migrations/` in filename order.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let mut entries = fs::read_dir("migrations").await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    let backend = conn.get_database_backend();
    for file in files {
        tracing::info!(file = %file.display(), "applying migration");
        let sql = fs::read_to_string(&file).await?;
        // Postgres prepared statements cannot contain multiple commands,
        // so split the migration file and run each statement individually.
        for stmt in split_statements(&sql) {
            conn.execute(Statement::from_string(backend, format!("{stmt};")))
                .await?;
        }
    }

    Ok(())
}

/// Split on `;` outside of `$$ ... $$` bodies, dropping comment-only chunks.
fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_dollar_body = false;

    for (idx, segment) in sql.split("$$").enumerate() {
        if idx > 0 {
            current.push_str("$$");
            in_dollar_body = !in_dollar_body;
        }
        if in_dollar_body {
            current.push_str(segment);
            continue;
        }
        let mut parts = segment.split(';');
        if let Some(first) = parts.next() {
            current.push_str(first);
        }
        for part in parts {
            statements.push(std::mem::take(&mut current));
            current.push_str(part);
        }
    }
    statements.push(current);

    statements
        .iter()
        .map(|stmt| strip_comments(stmt))
        .filter(|stmt| !stmt.is_empty())
        .collect()
}

fn strip_comments(stmt: &str) -> String {
    stmt.lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{split_statements, strip_comments};

    #[test]
    fn comment_only_chunks_are_empty() {
        assert_eq!(strip_comments("\n-- trailing note\n  "), "");
        assert_eq!(
            strip_comments("-- cuts\nCREATE TABLE cuts (id uuid)"),
            "CREATE TABLE cuts (id uuid)"
        );
    }

    #[test]
    fn function_bodies_are_not_split() {
        let sql = "CREATE TABLE a (id int);\n\
                   CREATE FUNCTION f() RETURNS trigger AS $$\n\
                   BEGIN NEW.x := 1; RETURN NEW; END;\n\
                   $$ LANGUAGE plpgsql;\n\
                   -- done\n";
        let statements = split_statements(sql);
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0], "CREATE TABLE a (id int)");
        assert!(statements[1].starts_with("CREATE FUNCTION f()"));
        assert!(statements[1].contains("RETURN NEW; END;"));
        assert!(statements[1].ends_with("$$ LANGUAGE plpgsql"));
    }
}
