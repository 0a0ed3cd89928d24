//! Income and expense tracking. Amounts are integer cents.

use super::{AccountScope, text, title};
use crate::LifeError;
use crate::records::Transaction;
use crate::types::{RecordId, TransactionKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Listing filter (query string). Date bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount_cents: u64,
    pub category: String,
    pub description: Option<String>,
    /// Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// Totals over every transaction of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_income_cents: u64,
    pub total_expenses_cents: u64,
    /// Income minus expenses; negative when overspent.
    pub balance_cents: i64,
}

impl AccountScope<'_> {
    /// Transactions matching `filter`, most recent date first.
    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, LifeError> {
        let mut transactions: Vec<Transaction> = self
            .store
            .read(|r| r.list::<Transaction>(self.account))?
            .into_iter()
            .filter(|t| filter.kind.is_none_or(|k| t.kind == k))
            .filter(|t| filter.start_date.is_none_or(|start| t.date >= start))
            .filter(|t| filter.end_date.is_none_or(|end| t.date <= end))
            .collect();
        transactions.sort_by_key(|t| (Reverse(t.date), Reverse(t.id)));
        Ok(transactions)
    }

    pub fn transaction_summary(&self) -> Result<TransactionSummary, LifeError> {
        let transactions = self.store.read(|r| r.list::<Transaction>(self.account))?;
        let (mut income, mut expenses) = (0u64, 0u64);
        for t in &transactions {
            match t.kind {
                TransactionKind::Income => income = income.saturating_add(t.amount_cents),
                TransactionKind::Expense => expenses = expenses.saturating_add(t.amount_cents),
            }
        }
        let balance = i128::from(income) - i128::from(expenses);
        Ok(TransactionSummary {
            total_income_cents: income,
            total_expenses_cents: expenses,
            balance_cents: i64::try_from(balance).unwrap_or(if balance < 0 {
                i64::MIN
            } else {
                i64::MAX
            }),
        })
    }

    pub fn create_transaction(&self, input: NewTransaction) -> Result<Transaction, LifeError> {
        if input.amount_cents == 0 {
            return Err(LifeError::Invalid("amount must be positive".to_string()));
        }
        let transaction_category = title("category", &input.category)?;
        let description = text("description", input.description)?;

        self.store.write(|tx| {
            let transaction = Transaction {
                id: tx.allocate_record_id()?,
                kind: input.kind,
                amount_cents: input.amount_cents,
                category: transaction_category,
                description,
                date: input.date.unwrap_or(self.now),
                created_at: self.now,
            };
            tx.put(self.account, &transaction)?;
            Ok(transaction)
        })
    }

    pub fn delete_transaction(&self, id: RecordId) -> Result<(), LifeError> {
        self.store.write(|tx| tx.remove::<Transaction>(self.account, id))
    }
}
