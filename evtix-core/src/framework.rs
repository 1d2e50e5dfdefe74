use sqlx::PgPool;

/// Executes the SQL query objects defined in [`crate::entities`].
///
/// Each query is a plain struct with a `Processor<Query>` impl on this type,
/// so handlers and stores compose queries without touching SQL directly.
#[derive(Debug, Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
