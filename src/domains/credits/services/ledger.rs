use sqlx::PgConnection;
use rust_decimal::Decimal;
use crate::domains::credits::models::LedgerEntry;
use crate::shared::database::CreditTransactionRepository;
use crate::shared::errors::CreditError;

// =====================================================
// 크레딧 원장 적용
// =====================================================
// 모든 잔액 변경은 여기를 거침:
//   1. users 행 잠금 (FOR UPDATE)
//   2. 새 잔액 계산 (음수 불가)
//   3. credit_transactions 기록 + users.credits 갱신
// 호출자가 연 트랜잭션 안에서 실행되어야 함
// =====================================================

fn db_err(e: anyhow::Error) -> CreditError {
    CreditError::DatabaseError(format!("{:#}", e))
}

/// 잠긴 잔액에 거래를 적용했을 때의 새 잔액
/// New balance after applying a signed entry, or the reason it is refused
pub fn next_balance(balance: Decimal, entry: &LedgerEntry) -> Result<Decimal, CreditError> {
    if entry.amount <= Decimal::ZERO {
        return Err(CreditError::NonPositiveAmount);
    }

    let next = balance + entry.transaction_type.signed(entry.amount);
    if next < Decimal::ZERO {
        return Err(CreditError::InsufficientCredits {
            balance: balance.normalize(),
            required: entry.amount.normalize(),
        });
    }
    Ok(next)
}

/// 잔액 행을 잠그고 현재 잔액 반환
pub async fn lock_balance(conn: &mut PgConnection, user_id: u64) -> Result<Decimal, CreditError> {
    CreditTransactionRepository::lock_balance(conn, user_id)
        .await
        .map_err(db_err)?
        .ok_or(CreditError::UserNotFound { id: user_id })
}

/// 원장 기록 + 캐시 잔액 갱신, 새 잔액 반환
/// Apply one ledger entry inside the caller's transaction
pub async fn apply(conn: &mut PgConnection, entry: &LedgerEntry) -> Result<Decimal, CreditError> {
    let balance = lock_balance(conn, entry.user_id).await?;
    let next = next_balance(balance, entry)?;

    CreditTransactionRepository::insert(conn, entry).await.map_err(db_err)?;
    CreditTransactionRepository::set_balance(conn, entry.user_id, next)
        .await
        .map_err(db_err)?;

    tracing::debug!(
        user_id = entry.user_id,
        kind = %entry.transaction_type,
        amount = %entry.amount,
        balance = %next,
        "ledger entry applied"
    );
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::credits::models::TransactionType;

    fn entry(amount: i64, kind: TransactionType) -> LedgerEntry {
        LedgerEntry::new(1, Decimal::new(amount, 0), kind, "test")
    }

    #[test]
    fn inflow_increases_balance() {
        let next = next_balance(Decimal::ONE, &entry(2, TransactionType::SwapCredit)).unwrap();
        assert_eq!(next, Decimal::new(3, 0));
    }

    #[test]
    fn outflow_cannot_go_negative() {
        let err = next_balance(Decimal::ONE, &entry(2, TransactionType::SwapDebit)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Insufficient credits. Current balance: 1, required: 2"
        );
        // 잔액 전부 사용은 허용
        let next = next_balance(Decimal::new(2, 0), &entry(2, TransactionType::CreditDeduct)).unwrap();
        assert_eq!(next, Decimal::ZERO);
    }

    #[test]
    fn zero_and_negative_amounts_are_refused() {
        assert!(matches!(
            next_balance(Decimal::TEN, &entry(0, TransactionType::CreditAdd)),
            Err(CreditError::NonPositiveAmount)
        ));
        assert!(matches!(
            next_balance(Decimal::TEN, &entry(-1, TransactionType::CreditAdd)),
            Err(CreditError::NonPositiveAmount)
        ));
    }
}
