use sqlx::{PgConnection, PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use crate::domains::credits::models::{CreditTransaction, LedgerEntry, TransactionType};

fn map_transaction(row: &PgRow) -> CreditTransaction {
    CreditTransaction {
        id: row.get::<i64, _>("id") as u64,
        user_id: row.get::<i64, _>("user_id") as u64,
        amount: row.get("amount"),
        transaction_type: row
            .get::<String, _>("type")
            .parse()
            .unwrap_or(TransactionType::CreditAdd),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

/// 크레딧 원장 Repository
/// Ledger rows plus the cached balance on `users.credits`
pub struct CreditTransactionRepository {
    pool: PgPool,
}

impl CreditTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 사용자 잔액 행 잠금 후 현재 캐시 잔액 반환
    /// Lock the user row and return the cached balance
    pub async fn lock_balance(conn: &mut PgConnection, user_id: u64) -> Result<Option<Decimal>> {
        let row = sqlx::query("SELECT credits FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id as i64)
            .fetch_optional(&mut *conn)
            .await
            .context("Failed to lock user balance")?;

        Ok(row.map(|r| r.get("credits")))
    }

    pub async fn set_balance(conn: &mut PgConnection, user_id: u64, balance: Decimal) -> Result<()> {
        sqlx::query("UPDATE users SET credits = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id as i64)
            .bind(balance)
            .execute(&mut *conn)
            .await
            .context("Failed to update cached balance")?;

        Ok(())
    }

    /// 원장 기록
    pub async fn insert(conn: &mut PgConnection, entry: &LedgerEntry) -> Result<CreditTransaction> {
        let row = sqlx::query(
            r#"
            INSERT INTO credit_transactions (user_id, amount, type, description, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, user_id, amount, type, description, created_at
            "#,
        )
        .bind(entry.user_id as i64)
        .bind(entry.amount)
        .bind(entry.transaction_type.as_str())
        .bind(&entry.description)
        .fetch_one(&mut *conn)
        .await
        .context("Failed to insert credit transaction")?;

        Ok(map_transaction(&row))
    }

    /// 원장 합계 (유입 - 유출)
    /// Balance derived from the ledger
    pub async fn ledger_balance(conn: &mut PgConnection, user_id: u64) -> Result<Decimal> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(
                CASE WHEN type IN ('credit_add', 'swap_credit', 'item_upload') THEN amount
                     ELSE -amount
                END
            ), 0) AS balance
            FROM credit_transactions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id as i64)
        .fetch_one(&mut *conn)
        .await
        .context("Failed to compute ledger balance")?;

        Ok(row.get("balance"))
    }

    /// 거래 내역 (최신순)
    pub async fn list_for_user(&self, user_id: u64) -> Result<Vec<CreditTransaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, amount, type, description, created_at
            FROM credit_transactions
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list credit transactions")?;

        Ok(rows.iter().map(map_transaction).collect())
    }
}
