//! SQL DDL for the rule and feedback tables.
//! SQLite-first design; `case` is quoted because it is an SQL keyword.

/// SQLite schema with:
/// - `tbl_rules`: `id` INTEGER PRIMARY KEY AUTOINCREMENT, `case`, `instruction`
/// - `tbl_feedbacks`: `id` INTEGER PRIMARY KEY AUTOINCREMENT, `feedback`
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS tbl_rules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    "case" TEXT NOT NULL,
    instruction TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tbl_feedbacks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    feedback TEXT NOT NULL
);
"#;
