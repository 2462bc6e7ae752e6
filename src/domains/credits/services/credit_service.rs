use rust_decimal::Decimal;
use crate::shared::database::{Database, CreditTransactionRepository, UserRepository};
use crate::shared::errors::CreditError;
use crate::domains::credits::models::{
    CreditAddResponse, CreditBalanceResponse, CreditDeductResponse, CreditTransaction,
    LedgerEntry, TransactionType,
};
use crate::domains::credits::services::ledger;

/// 크레딧 서비스
/// CreditService: balance queries and manual adjustments
#[derive(Clone)]
pub struct CreditService {
    db: Database,
}

impl CreditService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn ensure_user(&self, user_id: u64) -> Result<(), CreditError> {
        UserRepository::new(self.db.pool().clone())
            .get_user_by_id(user_id)
            .await
            .map_err(|e| CreditError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .map(|_| ())
            .ok_or(CreditError::UserNotFound { id: user_id })
    }

    /// 원장 기준 잔액 조회
    /// Ledger-derived balance
    pub async fn get_balance(&self, user_id: u64) -> Result<CreditBalanceResponse, CreditError> {
        self.ensure_user(user_id).await?;

        let mut conn = self
            .db
            .pool()
            .acquire()
            .await
            .map_err(|e| CreditError::DatabaseError(format!("Failed to acquire connection: {}", e)))?;

        let balance = CreditTransactionRepository::ledger_balance(&mut *conn, user_id)
            .await
            .map_err(|e| CreditError::DatabaseError(format!("Failed to compute balance: {}", e)))?;

        Ok(CreditBalanceResponse {
            user_id,
            balance: balance.normalize(),
        })
    }

    async fn adjust(
        &self,
        user_id: u64,
        amount: Decimal,
        kind: TransactionType,
        description: &str,
    ) -> Result<Decimal, CreditError> {
        if amount <= Decimal::ZERO {
            return Err(CreditError::NonPositiveAmount);
        }

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| CreditError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let new_balance =
            ledger::apply(&mut *tx, &LedgerEntry::new(user_id, amount, kind, description)).await?;

        tx.commit()
            .await
            .map_err(|e| CreditError::DatabaseError(format!("Failed to commit: {}", e)))?;

        tracing::info!(user_id, kind = %kind, amount = %amount, balance = %new_balance, "credits adjusted");
        Ok(new_balance)
    }

    /// 크레딧 추가
    pub async fn add_credits(&self, user_id: u64, amount: Decimal) -> Result<CreditAddResponse, CreditError> {
        let new_balance = self
            .adjust(user_id, amount, TransactionType::CreditAdd, "Manual credit addition")
            .await?;

        Ok(CreditAddResponse {
            user_id,
            amount_added: amount.normalize(),
            new_balance: new_balance.normalize(),
            message: format!("Successfully added {} credits", amount.normalize()),
        })
    }

    /// 크레딧 차감 (잔액 부족 시 400)
    pub async fn deduct_credits(&self, user_id: u64, amount: Decimal) -> Result<CreditDeductResponse, CreditError> {
        let new_balance = self
            .adjust(user_id, amount, TransactionType::CreditDeduct, "Manual credit deduction")
            .await?;

        Ok(CreditDeductResponse {
            user_id,
            amount_deducted: amount.normalize(),
            new_balance: new_balance.normalize(),
            message: format!("Successfully deducted {} credits", amount.normalize()),
        })
    }

    /// 거래 내역 (최신순)
    pub async fn transactions(&self, user_id: u64) -> Result<Vec<CreditTransaction>, CreditError> {
        CreditTransactionRepository::new(self.db.pool().clone())
            .list_for_user(user_id)
            .await
            .map_err(|e| CreditError::DatabaseError(format!("Failed to list transactions: {}", e)))
    }

    /// users.credits 를 원장 합계로 재계산
    /// Recompute the cached balance from the ledger
    pub async fn sync_balance(&self, user_id: u64) -> Result<CreditBalanceResponse, CreditError> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| CreditError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let cached = ledger::lock_balance(&mut *tx, user_id).await?;
        let mut balance = CreditTransactionRepository::ledger_balance(&mut *tx, user_id)
            .await
            .map_err(|e| CreditError::DatabaseError(format!("Failed to compute balance: {}", e)))?;

        if balance < Decimal::ZERO {
            tracing::warn!(user_id, ledger = %balance, "ledger sums below zero, clamping cached balance");
            balance = Decimal::ZERO;
        }

        if cached != balance {
            CreditTransactionRepository::set_balance(&mut *tx, user_id, balance)
                .await
                .map_err(|e| CreditError::DatabaseError(format!("Failed to update balance: {}", e)))?;
            tracing::info!(user_id, cached = %cached, ledger = %balance, "cached balance resynced");
        }

        tx.commit()
            .await
            .map_err(|e| CreditError::DatabaseError(format!("Failed to commit: {}", e)))?;

        Ok(CreditBalanceResponse {
            user_id,
            balance: balance.normalize(),
        })
    }
}
