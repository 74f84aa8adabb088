use crate::context::FetchContext;
use crate::state::{HeaderInfo, Row, RowSet};

use super::Driver;
use super::traits::{DatabaseServer, FetchResult};

const TABLE_NAMES: [&str; 20] = [
    "users",
    "products",
    "orders",
    "categories",
    "inventory",
    "payments",
    "reviews",
    "addresses",
    "coupons",
    "wishlists",
    "cart_items",
    "shipping",
    "notifications",
    "logs",
    "sessions",
    "permissions",
    "roles",
    "settings",
    "audit_trail",
    "api_keys",
];

const MOCK_TABLE_ROWS: usize = 50;
const MOCK_SQL_ROWS: usize = 10;

/// In-memory catalog used by `--mock` and the demo shell.
#[derive(Debug, Clone)]
pub struct MockServer {
    driver: Driver,
}

impl MockServer {
    pub fn new(driver: Driver) -> Self {
        Self { driver }
    }
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new(Driver::Mysql)
    }
}

impl DatabaseServer for MockServer {
    fn fetch_tables(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        let rows = TABLE_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Row::new([
                    (*name).to_string(),
                    "BASE TABLE".to_string(),
                    self.driver.engine().to_string(),
                    ((i + 1) * 1000 + 500).to_string(),
                    format!("{:.1}MB", (i + 1) as f64 * 2.5),
                ])
            })
            .collect();
        FetchResult::rows(RowSet::new(["NAME", "TYPE", "ENGINE", "ROWS", "SIZE"], rows))
    }

    fn fetch_databases(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        let rows = [
            ("production_db", "utf8mb4", "utf8mb4_unicode_ci"),
            ("staging_db", "utf8mb4", "utf8mb4_unicode_ci"),
            ("test_db", "utf8", "utf8_general_ci"),
            ("analytics_db", "utf8mb4", "utf8mb4_unicode_ci"),
        ]
        .into_iter()
        .map(|(name, charset, collation)| Row::new([name, charset, collation]))
        .collect();
        FetchResult::rows(RowSet::new(["NAME", "CHARSET", "COLLATION"], rows))
    }

    fn fetch_views(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        let rows = [
            ("active_users", "SELECT * FROM users WHERE active = 1"),
            ("order_summary", "SELECT user_id, COUNT(*), SUM(total) FROM orders"),
            ("product_stats", "SELECT category_id, COUNT(*) FROM products"),
            ("monthly_sales", "SELECT DATE_FORMAT(order_date, '%Y-%m'), SUM(total)"),
        ]
        .into_iter()
        .map(|(name, definition)| Row::new([name, "VIEW", definition]))
        .collect();
        FetchResult::rows(RowSet::new(["NAME", "TYPE", "DEFINITION"], rows))
    }

    fn fetch_procedures(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        let rows = [
            ("update_inventory", "root@localhost", "2024-01-01 12:00:00"),
            ("process_payment", "admin@%", "2024-02-11 09:30:00"),
            ("archive_orders", "root@localhost", "2024-03-05 18:45:00"),
        ]
        .into_iter()
        .map(|(name, definer, created)| Row::new([name, "PROCEDURE", definer, created]))
        .collect();
        FetchResult::rows(RowSet::new(["NAME", "TYPE", "DEFINER", "CREATED"], rows))
    }

    fn fetch_functions(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        let rows = [
            ("calculate_tax", "decimal(10,2)"),
            ("full_name", "varchar(101)"),
            ("is_weekend", "tinyint(1)"),
        ]
        .into_iter()
        .map(|(name, returns)| Row::new([name, "FUNCTION", returns]))
        .collect();
        FetchResult::rows(RowSet::new(["NAME", "TYPE", "RETURNS"], rows))
    }

    fn fetch_triggers(&self, ctx: &FetchContext) -> FetchResult<RowSet> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        let rows = [
            ("update_modified_time", "UPDATE", "users", "BEFORE"),
            ("audit_changes", "INSERT", "orders", "AFTER"),
            ("validate_email", "INSERT", "users", "BEFORE"),
            ("sync_inventory", "UPDATE", "products", "AFTER"),
        ]
        .into_iter()
        .map(|(name, event, table, timing)| Row::new([name, event, table, timing]))
        .collect();
        FetchResult::rows(RowSet::new(["NAME", "EVENT", "TABLE", "TIMING"], rows))
    }

    fn fetch_table_rows(&self, ctx: &FetchContext, name: &str) -> FetchResult<RowSet> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        if name.is_empty() {
            return FetchResult::Empty;
        }
        let rows = (1..=MOCK_TABLE_ROWS)
            .map(|i| {
                Row::new([
                    i.to_string(),
                    format!("Mock_{name}_Row_{i}"),
                    format!("Sample data for {name} row {i}"),
                    "2024-01-01 12:00:00".to_string(),
                ])
            })
            .collect();
        FetchResult::rows(RowSet::new(["id", "name", "value", "created_at"], rows))
    }

    fn fetch_sql_rows(&self, ctx: &FetchContext, query: &str) -> FetchResult<RowSet> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        let query = query.trim();
        if query.is_empty() {
            return FetchResult::failed("empty query");
        }
        let rows = (1..=MOCK_SQL_ROWS)
            .map(|i| {
                Row::new([
                    i.to_string(),
                    format!("Mock result row {i}"),
                    query.to_string(),
                ])
            })
            .collect();
        FetchResult::rows(RowSet::new(["id", "result", "query_executed"], rows))
    }

    fn fetch_table_descr(&self, ctx: &FetchContext, name: &str) -> FetchResult<String> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        if name.is_empty() {
            return FetchResult::Empty;
        }
        if self.driver == Driver::Postgres {
            return FetchResult::Ok(format!(
                "CREATE TABLE {name} (\n  id serial PRIMARY KEY,\n  data varchar(255)\n);"
            ));
        }
        let columns = match name {
            "users" => {
                "  `id` int NOT NULL AUTO_INCREMENT,\n  `username` varchar(50) NOT NULL,\n  `email` varchar(100) NOT NULL,\n  `created_at` timestamp DEFAULT CURRENT_TIMESTAMP,"
            }
            "products" => {
                "  `id` int NOT NULL AUTO_INCREMENT,\n  `name` varchar(100) NOT NULL,\n  `price` decimal(10,2) NOT NULL,\n  `category_id` int,"
            }
            "orders" => {
                "  `id` int NOT NULL AUTO_INCREMENT,\n  `user_id` int NOT NULL,\n  `total` decimal(10,2) NOT NULL,\n  `order_date` timestamp DEFAULT CURRENT_TIMESTAMP,"
            }
            _ => "  `id` int NOT NULL AUTO_INCREMENT,\n  `data` varchar(255),",
        };
        FetchResult::Ok(format!(
            "CREATE TABLE `{name}` (\n{columns}\n  PRIMARY KEY (`id`)\n) ENGINE={} DEFAULT CHARSET=utf8mb4",
            self.driver.engine()
        ))
    }

    fn server_info(&self, ctx: &FetchContext) -> FetchResult<HeaderInfo> {
        if ctx.is_expired() {
            return FetchResult::expired();
        }
        let mut info = HeaderInfo::new();
        info.insert("Driver".to_string(), self.driver.id().to_string());
        info.insert("Version".to_string(), self.driver.mock_version().to_string());
        info.insert("Database".to_string(), "demo".to_string());
        info.insert("User".to_string(), "mock".to_string());
        FetchResult::Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::MockServer;
    use crate::context::FetchContext;
    use crate::db::{CatalogKind, DatabaseServer, Driver, FetchResult};

    #[test]
    fn every_catalog_lists_named_rows() {
        let server = MockServer::default();
        let ctx = FetchContext::background();
        for kind in [
            CatalogKind::Tables,
            CatalogKind::Databases,
            CatalogKind::Views,
            CatalogKind::Procedures,
            CatalogKind::Functions,
            CatalogKind::Triggers,
        ] {
            let rows = server
                .fetch_catalog(&ctx, kind)
                .ok()
                .expect("mock catalog should have rows");
            assert_eq!(rows.headers[0], "NAME");
            assert!(rows.rows.iter().all(|row| row.name(&rows.headers).is_some()));
        }
    }

    #[test]
    fn expired_context_reports_failure() {
        let server = MockServer::default();
        let ctx = FetchContext::background();
        ctx.cancel();
        assert_eq!(server.fetch_tables(&ctx), FetchResult::expired());
        assert!(matches!(server.server_info(&ctx), FetchResult::Failed(_)));
    }

    #[test]
    fn sql_rows_echo_query_and_reject_blank_input() {
        let server = MockServer::new(Driver::Postgres);
        let ctx = FetchContext::background();
        let rows = server
            .fetch_sql_rows(&ctx, " select 1 ")
            .ok()
            .expect("query should return rows");
        assert_eq!(rows.rows[0].cells[2], "select 1");
        assert!(matches!(server.fetch_sql_rows(&ctx, "  "), FetchResult::Failed(_)));
    }

    #[test]
    fn table_description_names_the_table() {
        let server = MockServer::default();
        let ctx = FetchContext::background();
        let descr = server
            .fetch_table_descr(&ctx, "orders")
            .ok()
            .expect("description should exist");
        assert!(descr.starts_with("CREATE TABLE `orders`"));
        assert_eq!(server.fetch_table_descr(&ctx, ""), FetchResult::Empty);
    }
}
