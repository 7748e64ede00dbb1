//! In-memory SQLite copy of the Superstore star schema for tests.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
    Value,
};

const SCHEMA: [&str; 6] = [
    "CREATE TABLE customer (customerguid TEXT PRIMARY KEY NOT NULL, segment TEXT)",
    "CREATE TABLE product (productguid TEXT PRIMARY KEY NOT NULL, category TEXT, subcategory TEXT)",
    "CREATE TABLE address (addressguid TEXT PRIMARY KEY NOT NULL, region TEXT, state_code TEXT, state_province TEXT)",
    "CREATE TABLE shipping (shippingguid TEXT PRIMARY KEY NOT NULL, addressguid TEXT NOT NULL, shipmode TEXT)",
    r#"CREATE TABLE "Order" (orderguid TEXT PRIMARY KEY NOT NULL, customerguid TEXT NOT NULL, shippingguid TEXT NOT NULL, dateordered TEXT, priority TEXT)"#,
    "CREATE TABLE sales (salesguid TEXT PRIMARY KEY NOT NULL, orderguid TEXT NOT NULL, productguid TEXT NOT NULL, sales NUMERIC, profit NUMERIC)",
];

/// Measure as stored: a number, or currency-formatted text
#[derive(Debug, Clone)]
pub enum Amount {
    Number(f64),
    Text(&'static str),
}

impl From<Amount> for Value {
    fn from(amount: Amount) -> Self {
        match amount {
            Amount::Number(v) => Value::from(v),
            Amount::Text(v) => Value::from(v.to_string()),
        }
    }
}

/// One denormalized sale; seeding splits it over the six tables
#[derive(Debug, Clone)]
pub struct SaleRow {
    pub segment: &'static str,
    pub category: &'static str,
    pub subcategory: &'static str,
    pub region: &'static str,
    pub state_code: &'static str,
    pub state_province: &'static str,
    pub priority: &'static str,
    pub ship_mode: &'static str,
    pub date_ordered: &'static str,
    pub sales: Amount,
    pub profit: Amount,
}

impl Default for SaleRow {
    fn default() -> Self {
        Self {
            segment: "Consumer",
            category: "Office Supplies",
            subcategory: "Paper",
            region: "West",
            state_code: "CA",
            state_province: "California",
            priority: "Medium",
            ship_mode: "Standard Class",
            date_ordered: "2023-01-01",
            sales: Amount::Number(0.0),
            profit: Amount::Number(0.0),
        }
    }
}

/// Seven orders across four months, three categories and three segments.
///
/// Totals: sales 3640, profit 282.
pub fn sample_sales() -> Vec<SaleRow> {
    vec![
        SaleRow {
            segment: "Consumer",
            category: "Furniture",
            subcategory: "Chairs",
            region: "West",
            state_code: "CA",
            state_province: "California",
            priority: "Critical",
            ship_mode: "First Class",
            date_ordered: "2023-01-15",
            sales: Amount::Number(500.0),
            profit: Amount::Number(50.0),
        },
        SaleRow {
            segment: "Consumer",
            category: "Technology",
            subcategory: "Phones",
            region: "West",
            state_code: "WA",
            state_province: "Washington",
            priority: "High",
            ship_mode: "Second Class",
            date_ordered: "2023-01-20",
            sales: Amount::Number(1200.0),
            profit: Amount::Number(300.0),
        },
        SaleRow {
            segment: "Corporate",
            category: "Office Supplies",
            subcategory: "Paper",
            region: "East",
            state_code: "NY",
            state_province: "New York",
            priority: "Low",
            ship_mode: "Standard Class",
            date_ordered: "2023-02-03",
            sales: Amount::Number(80.0),
            profit: Amount::Number(12.0),
        },
        SaleRow {
            segment: "Home Office",
            category: "Technology",
            subcategory: "Phones",
            region: "Central",
            state_code: "TX",
            state_province: "Texas",
            priority: "Medium",
            ship_mode: "Same Day",
            date_ordered: "2023-03-11",
            sales: Amount::Number(950.0),
            profit: Amount::Number(-45.0),
        },
        SaleRow {
            segment: "Consumer",
            category: "Office Supplies",
            subcategory: "Binders",
            region: "East",
            state_code: "NY",
            state_province: "New York",
            priority: "High",
            ship_mode: "Standard Class",
            date_ordered: "2023-03-28",
            sales: Amount::Number(150.0),
            profit: Amount::Number(20.0),
        },
        SaleRow {
            segment: "Corporate",
            category: "Furniture",
            subcategory: "Tables",
            region: "West",
            state_code: "CA",
            state_province: "California",
            priority: "Medium",
            ship_mode: "First Class",
            date_ordered: "2023-02-14",
            sales: Amount::Number(700.0),
            profit: Amount::Number(-70.0),
        },
        SaleRow {
            segment: "Consumer",
            category: "Technology",
            subcategory: "Accessories",
            region: "South",
            state_code: "FL",
            state_province: "Florida",
            priority: "Low",
            ship_mode: "Second Class",
            date_ordered: "2022-12-05",
            sales: Amount::Number(60.0),
            profit: Amount::Number(15.0),
        },
    ]
}

/// Empty schema in a private in-memory database
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    // one connection, or every pooled connection gets its own empty database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("open in-memory sqlite");

    for ddl in SCHEMA {
        db.execute(Statement::from_string(DatabaseBackend::Sqlite, ddl.to_string()))
            .await
            .expect("create schema");
    }
    db
}

pub async fn seed(db: &DatabaseConnection, rows: &[SaleRow]) {
    for (i, row) in rows.iter().enumerate() {
        let id = format!("{}", i + 1);
        let inserts: Vec<(&str, Vec<Value>)> = vec![
            (
                "INSERT INTO customer (customerguid, segment) VALUES (?, ?)",
                vec![format!("c{id}").into(), row.segment.into()],
            ),
            (
                "INSERT INTO product (productguid, category, subcategory) VALUES (?, ?, ?)",
                vec![
                    format!("p{id}").into(),
                    row.category.into(),
                    row.subcategory.into(),
                ],
            ),
            (
                "INSERT INTO address (addressguid, region, state_code, state_province) VALUES (?, ?, ?, ?)",
                vec![
                    format!("a{id}").into(),
                    row.region.into(),
                    row.state_code.into(),
                    row.state_province.into(),
                ],
            ),
            (
                "INSERT INTO shipping (shippingguid, addressguid, shipmode) VALUES (?, ?, ?)",
                vec![
                    format!("sh{id}").into(),
                    format!("a{id}").into(),
                    row.ship_mode.into(),
                ],
            ),
            (
                r#"INSERT INTO "Order" (orderguid, customerguid, shippingguid, dateordered, priority) VALUES (?, ?, ?, ?, ?)"#,
                vec![
                    format!("o{id}").into(),
                    format!("c{id}").into(),
                    format!("sh{id}").into(),
                    row.date_ordered.into(),
                    row.priority.into(),
                ],
            ),
            (
                "INSERT INTO sales (salesguid, orderguid, productguid, sales, profit) VALUES (?, ?, ?, ?, ?)",
                vec![
                    format!("s{id}").into(),
                    format!("o{id}").into(),
                    format!("p{id}").into(),
                    row.sales.clone().into(),
                    row.profit.clone().into(),
                ],
            ),
        ];

        for (sql, values) in inserts {
            db.execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                sql,
                values,
            ))
            .await
            .expect("seed row");
        }
    }
}

/// Schema plus [`sample_sales`]
pub async fn sample_db() -> DatabaseConnection {
    let db = memory_db().await;
    seed(&db, &sample_sales()).await;
    db
}
