use crate::db::models::{Feedback, NewFeedback, NewRule, Rule};
use crate::db::schema::SQLITE_INIT;
use crate::error::TranslatorError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Rules and feedback read together for one prompt assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptSources {
    pub rules: Vec<Rule>,
    pub feedbacks: Vec<Feedback>,
}

#[derive(Clone)]
pub struct TranslatorStorage {
    pool: SqlitePool,
}

impl TranslatorStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`, creating the file if needed, and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, TranslatorError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        info!(database_url = %database_url, "database schema ready");
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), TranslatorError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Read every rule and every feedback inside one transaction, so the
    /// caller sees a single snapshot even while the admin surface writes.
    pub async fn prompt_sources(&self) -> Result<PromptSources, TranslatorError> {
        let mut tx = self.pool.begin().await?;
        let rules =
            sqlx::query_as::<_, Rule>(r#"SELECT id, "case", instruction FROM tbl_rules ORDER BY id"#)
                .fetch_all(&mut *tx)
                .await?;
        let feedbacks =
            sqlx::query_as::<_, Feedback>("SELECT id, feedback FROM tbl_feedbacks ORDER BY id")
                .fetch_all(&mut *tx)
                .await?;
        tx.commit().await?;
        Ok(PromptSources { rules, feedbacks })
    }

    pub async fn list_rules(&self) -> Result<Vec<Rule>, TranslatorError> {
        let rows =
            sqlx::query_as::<_, Rule>(r#"SELECT id, "case", instruction FROM tbl_rules ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_rule(&self, id: i64) -> Result<Rule, TranslatorError> {
        sqlx::query_as::<_, Rule>(r#"SELECT id, "case", instruction FROM tbl_rules WHERE id = ?"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(TranslatorError::NotFound { kind: "rule", id })
    }

    /// Insert a rule. Returns the stored row with its assigned id.
    pub async fn add_rule(&self, rule: NewRule) -> Result<Rule, TranslatorError> {
        let id = sqlx::query(r#"INSERT INTO tbl_rules ("case", instruction) VALUES (?, ?)"#)
            .bind(&rule.case)
            .bind(&rule.instruction)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        Ok(rule.into_rule(id))
    }

    pub async fn update_rule(&self, id: i64, rule: NewRule) -> Result<Rule, TranslatorError> {
        let affected = sqlx::query(r#"UPDATE tbl_rules SET "case" = ?, instruction = ? WHERE id = ?"#)
            .bind(&rule.case)
            .bind(&rule.instruction)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(TranslatorError::NotFound { kind: "rule", id });
        }
        Ok(rule.into_rule(id))
    }

    pub async fn delete_rule(&self, id: i64) -> Result<(), TranslatorError> {
        let affected = sqlx::query("DELETE FROM tbl_rules WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(TranslatorError::NotFound { kind: "rule", id });
        }
        Ok(())
    }

    pub async fn list_feedbacks(&self) -> Result<Vec<Feedback>, TranslatorError> {
        let rows = sqlx::query_as::<_, Feedback>("SELECT id, feedback FROM tbl_feedbacks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn add_feedback(&self, feedback: NewFeedback) -> Result<Feedback, TranslatorError> {
        let id = sqlx::query("INSERT INTO tbl_feedbacks (feedback) VALUES (?)")
            .bind(&feedback.feedback)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        Ok(feedback.into_feedback(id))
    }

    pub async fn delete_feedback(&self, id: i64) -> Result<(), TranslatorError> {
        let affected = sqlx::query("DELETE FROM tbl_feedbacks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(TranslatorError::NotFound {
                kind: "feedback",
                id,
            });
        }
        Ok(())
    }
}
