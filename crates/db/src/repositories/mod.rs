//! Repository layer: one zero-sized struct per table with async CRUD methods
//! taking a `&PgPool`.

mod category_repo;
mod order_repo;
mod product_repo;

pub use category_repo::CategoryRepo;
pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;

/// Build the page-slice `SELECT` shared by every list query.
///
/// Placeholders: `$1` = LIMIT, `$2` = OFFSET and, when `searching`, `$3` = the
/// search term. The term is matched literally with `strpos`, so `%` and `_`
/// carry no special meaning.
fn list_query(table: &str, columns: &str, search_columns: &[&str], searching: bool) -> String {
    let mut query = format!("SELECT {columns} FROM {table}");
    if searching && !search_columns.is_empty() {
        let clause = search_columns
            .iter()
            .map(|column| format!("strpos({column}, $3) > 0"))
            .collect::<Vec<_>>()
            .join(" OR ");
        query.push_str(&format!(" WHERE {clause}"));
    }
    query.push_str(" ORDER BY id LIMIT $1 OFFSET $2");
    query
}
