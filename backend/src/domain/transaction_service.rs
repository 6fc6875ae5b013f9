//! Transaction service domain logic for the shop books tracker.

use anyhow::{anyhow, Result};
use chrono::Local;
use log::{error, info};
use shared::{
    CreateTransactionRequest, CreateTransactionResponse, DeleteTransactionResponse, MonthRef,
    Transaction, TransactionFilter, UndoDeleteResponse, UpdateTransactionRequest, ValidationError,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use time::format_description::well_known::Rfc3339;

use crate::domain::reporting::ReportingService;
use crate::domain::settings_service::{evaluate_goal_notice, SettingsService};
use crate::storage::file::{FileConnection, TransactionRepository};
use crate::storage::traits::TransactionStorage;

/// Grace window during which a staged delete can still be undone
pub const UNDO_GRACE_MILLIS: u64 = 5_000;

#[derive(Debug, Clone)]
struct PendingDelete {
    transaction: Transaction,
    deadline_millis: u64,
}

#[derive(Clone)]
pub struct TransactionService {
    transaction_repository: TransactionRepository,
    settings_service: SettingsService,
    reporting: ReportingService,
    /// Deletes staged but not yet committed to the store. Transactions in
    /// here are hidden from listings, the optimistic-removal analogue.
    pending_deletes: Arc<Mutex<HashMap<String, PendingDelete>>>,
}

impl TransactionService {
    pub fn new(
        connection: Arc<FileConnection>,
        username: &str,
        settings_service: SettingsService,
    ) -> Self {
        let transaction_repository = TransactionRepository::new((*connection).clone(), username);
        Self {
            transaction_repository,
            settings_service,
            reporting: ReportingService::new(),
            pending_deletes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Validate entry fields; any error aborts before a write happens
    fn validate(&self, description: &str, amount: f64, date: &str) -> Result<(), ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if description.len() > 256 {
            return Err(ValidationError::DescriptionTooLong(description.len()));
        }
        if !amount.is_finite() {
            return Err(ValidationError::AmountNotFinite);
        }
        if amount <= 0.0 {
            return Err(ValidationError::AmountNotPositive);
        }
        if date.trim().is_empty() {
            return Err(ValidationError::MissingDate);
        }
        if self.reporting.parse_transaction_date(date).is_none() {
            return Err(ValidationError::InvalidDate(date.to_string()));
        }
        Ok(())
    }

    pub async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<CreateTransactionResponse> {
        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let created_at = {
            let now = time::OffsetDateTime::from(SystemTime::now());
            let bangkok_offset = time::UtcOffset::from_hms(7, 0, 0)?;
            now.to_offset(bangkok_offset).format(&Rfc3339)?
        };

        let transaction_date = match request.date {
            Some(date) => date,
            None => Local::now().format("%Y-%m-%d").to_string(),
        };

        self.validate(&request.description, request.amount, &transaction_date)?;

        let transaction = Transaction {
            id: Transaction::generate_id(request.transaction_type, now_millis),
            date: transaction_date,
            description: request.description,
            amount: request.amount,
            category: request.category,
            transaction_type: request.transaction_type,
            created_at,
        };

        // Month balance before the write, for goal-crossing detection
        let month = self.month_of(&transaction);
        let previous_balance = self.month_balance(month).await?;

        self.transaction_repository
            .store_transaction(&transaction)
            .await?;
        info!("Created transaction {}", transaction.id);

        let goal = self.settings_service.monthly_goal().await?;
        let new_balance = self.month_balance(month).await?;
        let goal_notice = evaluate_goal_notice(previous_balance, new_balance, goal);

        Ok(CreateTransactionResponse { transaction, goal_notice })
    }

    pub async fn update_transaction(&self, request: UpdateTransactionRequest) -> Result<Transaction> {
        self.validate(&request.description, request.amount, &request.date)?;

        let existing = self
            .transaction_repository
            .get_transaction(&request.id)
            .await?
            .ok_or_else(|| anyhow!("Transaction {} not found", request.id))?;

        let transaction = Transaction {
            id: existing.id,
            date: request.date,
            description: request.description,
            amount: request.amount,
            category: request.category,
            transaction_type: request.transaction_type,
            created_at: existing.created_at,
        };

        self.transaction_repository
            .update_transaction(&transaction)
            .await?;
        info!("Updated transaction {}", transaction.id);
        Ok(transaction)
    }

    /// Full collection ordered by date descending, with staged deletes
    /// hidden — the snapshot the aggregation engine consumes.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let transactions = self.transaction_repository.list_transactions().await?;
        let pending = self.pending_deletes.lock().unwrap();
        Ok(transactions
            .into_iter()
            .filter(|t| !pending.contains_key(&t.id))
            .collect())
    }

    /// Listing with search/type/period filters and sorting applied
    pub async fn list_filtered(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let transactions = self.list_transactions().await?;
        let today = Local::now().date_naive();
        Ok(self.reporting.filter_transactions(&transactions, filter, today))
    }

    /// Stage a delete. The transaction disappears from listings immediately
    /// but the destructive store write only happens once the grace window
    /// elapses without an undo.
    pub async fn delete_transaction(
        &self,
        transaction_id: &str,
        now_millis: u64,
    ) -> Result<DeleteTransactionResponse> {
        let transaction = self
            .transaction_repository
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| anyhow!("Transaction {} not found", transaction_id))?;

        let deadline_millis = now_millis + UNDO_GRACE_MILLIS;
        self.pending_deletes.lock().unwrap().insert(
            transaction_id.to_string(),
            PendingDelete { transaction, deadline_millis },
        );
        info!(
            "Staged delete of {} (undo until {})",
            transaction_id, deadline_millis
        );

        Ok(DeleteTransactionResponse {
            transaction_id: transaction_id.to_string(),
            undo_deadline_millis: deadline_millis,
            success_message: "1 transaction deleted successfully".to_string(),
        })
    }

    /// Cancel a staged delete within its grace window
    pub fn undo_delete(&self, transaction_id: &str) -> Result<UndoDeleteResponse> {
        let pending = self
            .pending_deletes
            .lock()
            .unwrap()
            .remove(transaction_id)
            .ok_or_else(|| anyhow!("Nothing to undo for {}", transaction_id))?;

        info!("Undid delete of {}", transaction_id);
        Ok(UndoDeleteResponse {
            transaction: pending.transaction,
            success_message: "Transaction restored".to_string(),
        })
    }

    /// Commit staged deletes whose grace window has elapsed. A failed store
    /// write reverses the optimistic removal: the entry is dropped from the
    /// pending set so the transaction shows up in listings again.
    pub async fn commit_due_deletes(&self, now_millis: u64) -> Result<Vec<String>> {
        let due: Vec<String> = {
            let pending = self.pending_deletes.lock().unwrap();
            pending
                .iter()
                .filter(|(_, p)| p.deadline_millis <= now_millis)
                .map(|(id, _)| id.clone())
                .collect()
        };

        let mut committed = Vec::new();
        for id in due {
            match self.transaction_repository.delete_transaction(&id).await {
                Ok(_) => {
                    self.pending_deletes.lock().unwrap().remove(&id);
                    info!("Committed delete of {}", id);
                    committed.push(id);
                }
                Err(e) => {
                    error!("Failed to delete {}: {}. Restoring.", id, e);
                    self.pending_deletes.lock().unwrap().remove(&id);
                }
            }
        }
        Ok(committed)
    }

    fn month_of(&self, transaction: &Transaction) -> MonthRef {
        match self.reporting.parse_transaction_date(&transaction.date) {
            Some(date) => {
                use chrono::Datelike;
                MonthRef::new(date.year(), date.month())
            }
            None => MonthRef::default(),
        }
    }

    async fn month_balance(&self, month: MonthRef) -> Result<f64> {
        let transactions = self.list_transactions().await?;
        let month_data = self.reporting.month_data(&transactions, month);
        Ok(self.reporting.month_summary(&month_data).balance)
    }
}
