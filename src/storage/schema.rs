//! Database schema definitions

/// SQL to create the locations table
///
/// `AUTOINCREMENT` keeps ids monotonic and never reused, even after deletes.
pub const CREATE_LOCATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT,
    note TEXT,
    latitude REAL,
    longitude REAL,
    date TEXT,
    time TEXT,
    captured_at INTEGER
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_LOCATIONS_TABLE]
}
