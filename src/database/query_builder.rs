use sqlx::{
    postgres::{PgRow, Postgres},
    FromRow, PgPool,
};

use crate::database::manager::DatabaseError;
use crate::database::models::{ColumnValue, Columns};

/// Builds single-table statements. Identifiers are validated and quoted;
/// every value is a bound parameter.
pub struct QueryBuilder<T> {
    table_name: String,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: impl Into<String>) -> Result<Self, DatabaseError> {
        let table_name = table_name.into();
        validate_identifier(&table_name)?;
        Ok(Self {
            table_name,
            _phantom: std::marker::PhantomData,
        })
    }

    pub async fn select_all(&self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" ORDER BY \"id\"", self.table_name);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn select_by_id(&self, pool: &PgPool, id: i32) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" WHERE \"id\" = $1", self.table_name);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn insert_returning(&self, pool: &PgPool, columns: Columns) -> Result<T, DatabaseError> {
        let mut query = self.insert_query(columns)?;
        let row = query.build_query_as::<T>().fetch_one(pool).await?;
        Ok(row)
    }

    /// Returns the number of rows changed; an empty column set touches nothing
    pub async fn update(&self, pool: &PgPool, id: i32, columns: Columns) -> Result<u64, DatabaseError> {
        if columns.is_empty() {
            return Ok(0);
        }
        let mut query = self.update_query(id, columns)?;
        let result = query.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, pool: &PgPool, id: i32) -> Result<u64, DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = $1", self.table_name);
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected())
    }

    fn insert_query(&self, columns: Columns) -> Result<sqlx::QueryBuilder<'static, Postgres>, DatabaseError> {
        let mut query = sqlx::QueryBuilder::new(format!("INSERT INTO \"{}\" ", self.table_name));

        if columns.is_empty() {
            query.push("DEFAULT VALUES");
        } else {
            for (name, _) in columns.iter() {
                validate_identifier(name)?;
            }

            query.push("(");
            for (i, (name, _)) in columns.iter().enumerate() {
                if i > 0 {
                    query.push(", ");
                }
                query.push(format!("\"{}\"", name));
            }
            query.push(") VALUES (");
            for (i, (_, value)) in columns.into_iter().enumerate() {
                if i > 0 {
                    query.push(", ");
                }
                bind_value(&mut query, value);
            }
            query.push(")");
        }

        query.push(" RETURNING *");
        Ok(query)
    }

    fn update_query(&self, id: i32, columns: Columns) -> Result<sqlx::QueryBuilder<'static, Postgres>, DatabaseError> {
        let mut query = sqlx::QueryBuilder::new(format!("UPDATE \"{}\" SET ", self.table_name));

        for (i, (name, value)) in columns.into_iter().enumerate() {
            validate_identifier(name)?;
            if i > 0 {
                query.push(", ");
            }
            query.push(format!("\"{}\" = ", name));
            bind_value(&mut query, value);
        }

        query.push(" WHERE \"id\" = ");
        query.push_bind(id);
        Ok(query)
    }
}

fn bind_value(query: &mut sqlx::QueryBuilder<'static, Postgres>, value: ColumnValue) {
    match value {
        ColumnValue::Text(s) => {
            query.push_bind(s);
        }
        ColumnValue::Integer(n) => {
            query.push_bind(n);
        }
    }
}

/// Accepts `[A-Za-z_][A-Za-z0-9_]*`, at most 63 bytes (the Postgres limit)
pub fn validate_identifier(name: &str) -> Result<(), DatabaseError> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    let valid = valid_start
        && name.len() <= 63
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DatabaseError::InvalidIdentifier(name.to_string()))
    }
}
