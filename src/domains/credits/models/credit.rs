use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// 크레딧 거래 종류
/// Ledger entry kind; the direction is implied by the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    CreditAdd,
    CreditDeduct,
    ItemUpload,
    SwapCredit,
    SwapDebit,
    ItemDeletion,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::CreditAdd => "credit_add",
            TransactionType::CreditDeduct => "credit_deduct",
            TransactionType::ItemUpload => "item_upload",
            TransactionType::SwapCredit => "swap_credit",
            TransactionType::SwapDebit => "swap_debit",
            TransactionType::ItemDeletion => "item_deletion",
        }
    }

    /// 잔액을 늘리는 거래인지
    pub fn is_inflow(&self) -> bool {
        matches!(
            self,
            TransactionType::CreditAdd | TransactionType::SwapCredit | TransactionType::ItemUpload
        )
    }

    /// 부호가 붙은 금액 (유입 +, 유출 -)
    /// Signed amount applied to the balance
    pub fn signed(&self, amount: Decimal) -> Decimal {
        if self.is_inflow() { amount } else { -amount }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_add" => Ok(TransactionType::CreditAdd),
            "credit_deduct" => Ok(TransactionType::CreditDeduct),
            "item_upload" => Ok(TransactionType::ItemUpload),
            "swap_credit" => Ok(TransactionType::SwapCredit),
            "swap_debit" => Ok(TransactionType::SwapDebit),
            "item_deletion" => Ok(TransactionType::ItemDeletion),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}

/// 원장 거래 한 건
/// One ledger row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = CreditTransaction)]
pub struct CreditTransaction {
    pub id: u64,
    pub user_id: u64,

    /// Always positive; see `transaction_type` for direction
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,

    pub transaction_type: TransactionType,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// 원장 기록 요청 (서비스 내부용)
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub user_id: u64,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub description: String,
}

impl LedgerEntry {
    pub fn new(
        user_id: u64,
        amount: Decimal,
        transaction_type: TransactionType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            amount,
            transaction_type,
            description: description.into(),
        }
    }
}

/// 크레딧 추가/차감 요청
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = CreditAmountRequest)]
pub struct CreditAmountRequest {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 5.0)]
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = CreditBalanceResponse)]
pub struct CreditBalanceResponse {
    pub user_id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = CreditAddResponse)]
pub struct CreditAddResponse {
    pub user_id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount_added: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub new_balance: Decimal,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = CreditDeductResponse)]
pub struct CreditDeductResponse {
    pub user_id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount_deducted: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub new_balance: Decimal,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = CreditTransactionsResponse)]
pub struct CreditTransactionsResponse {
    pub user_id: u64,
    pub transactions: Vec<CreditTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflows_are_add_swap_credit_and_upload() {
        let inflows: Vec<_> = [
            TransactionType::CreditAdd,
            TransactionType::CreditDeduct,
            TransactionType::ItemUpload,
            TransactionType::SwapCredit,
            TransactionType::SwapDebit,
            TransactionType::ItemDeletion,
        ]
        .into_iter()
        .filter(|t| t.is_inflow())
        .collect();

        assert_eq!(
            inflows,
            vec![
                TransactionType::CreditAdd,
                TransactionType::ItemUpload,
                TransactionType::SwapCredit
            ]
        );
    }

    #[test]
    fn signed_amount_follows_direction() {
        let two = Decimal::new(2, 0);
        assert_eq!(TransactionType::SwapCredit.signed(two), two);
        assert_eq!(TransactionType::SwapDebit.signed(two), -two);
        assert_eq!(TransactionType::ItemDeletion.signed(two), -two);
    }

    #[test]
    fn kinds_parse_from_their_column_value() {
        assert_eq!("swap_debit".parse::<TransactionType>(), Ok(TransactionType::SwapDebit));
        assert!("refund".parse::<TransactionType>().is_err());
    }
}
