//! CSV-backed transaction repository.
//!
//! One `transactions.csv` per user with the columns
//! `id,date,description,amount,category,type,created_at`. The file is
//! rewritten in full on every mutation; the collection is small enough that
//! this is the simple, crash-safe option when combined with atomic writes.

use anyhow::Result;
use async_trait::async_trait;
use csv::{Reader, Writer};
use log::warn;
use shared::{Transaction, TransactionType};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use super::connection::FileConnection;
use crate::storage::traits::TransactionStorage;

#[derive(Clone)]
pub struct TransactionRepository {
    connection: FileConnection,
    username: String,
}

const HEADERS: [&str; 7] = [
    "id", "date", "description", "amount", "category", "type", "created_at",
];

impl TransactionRepository {
    pub fn new(connection: FileConnection, username: &str) -> Self {
        Self { connection, username: username.to_string() }
    }

    fn file_path(&self) -> Result<PathBuf> {
        Ok(self.connection.user_directory(&self.username)?.join("transactions.csv"))
    }

    fn read_all(&self) -> Result<Vec<Transaction>> {
        let path = self.file_path()?;
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));
        let mut transactions = Vec::new();

        for result in csv_reader.records() {
            let record = result?;
            let transaction_type = match record.get(5) {
                Some("expense") => TransactionType::Expense,
                Some("income") => TransactionType::Income,
                other => {
                    warn!("Skipping row with unknown transaction type {:?}", other);
                    continue;
                }
            };
            transactions.push(Transaction {
                id: record.get(0).unwrap_or("").to_string(),
                date: record.get(1).unwrap_or("").to_string(),
                description: record.get(2).unwrap_or("").to_string(),
                amount: record.get(3).unwrap_or("0").parse::<f64>().unwrap_or(0.0),
                category: record.get(4).unwrap_or("").to_string(),
                transaction_type,
                created_at: record.get(6).unwrap_or("").to_string(),
            });
        }

        Ok(transactions)
    }

    fn write_all(&self, transactions: &[Transaction]) -> Result<()> {
        let mut csv_writer = Writer::from_writer(Vec::new());
        csv_writer.write_record(HEADERS)?;
        for t in transactions {
            csv_writer.write_record([
                t.id.as_str(),
                t.date.as_str(),
                t.description.as_str(),
                &t.amount.to_string(),
                t.category.as_str(),
                &t.transaction_type.to_string(),
                t.created_at.as_str(),
            ])?;
        }

        let buffer = csv_writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
        let content = String::from_utf8(buffer)?;
        self.connection.write_atomic(&self.file_path()?, &content)
    }
}

#[async_trait]
impl TransactionStorage for TransactionRepository {
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.read_all()?;
        transactions.push(transaction.clone());
        self.write_all(&transactions)
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        Ok(self.read_all()?.into_iter().find(|t| t.id == transaction_id))
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let mut transactions = self.read_all()?;
        // Date descending, creation order as the tie-break
        transactions.sort_by(|a, b| {
            b.date.cmp(&a.date).then_with(|| {
                b.extract_timestamp()
                    .unwrap_or(0)
                    .cmp(&a.extract_timestamp().unwrap_or(0))
            })
        });
        Ok(transactions)
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.read_all()?;
        let slot = transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", transaction.id))?;
        *slot = transaction.clone();
        self.write_all(&transactions)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<bool> {
        let mut transactions = self.read_all()?;
        let before = transactions.len();
        transactions.retain(|t| t.id != transaction_id);
        if transactions.len() == before {
            return Ok(false);
        }
        self.write_all(&transactions)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TransactionRepository, TempDir) {
        let dir = TempDir::new().unwrap();
        let connection = FileConnection::new(dir.path()).unwrap();
        (TransactionRepository::new(connection, "somchai"), dir)
    }

    fn transaction(id_millis: u64, date: &str, amount: f64) -> Transaction {
        Transaction {
            id: Transaction::generate_id(TransactionType::Income, id_millis),
            date: date.to_string(),
            description: "ขายสินค้า".to_string(),
            amount,
            category: "ขายสินค้า".to_string(),
            transaction_type: TransactionType::Income,
            created_at: "2024-03-05T09:00:00+07:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_read_roundtrip() {
        let (repo, _dir) = setup();
        let t = transaction(1, "2024-03-05", 150.5);
        repo.store_transaction(&t).await.unwrap();

        let loaded = repo.get_transaction(&t.id).await.unwrap().unwrap();
        assert_eq!(loaded, t);
    }

    #[tokio::test]
    async fn test_list_sorted_date_descending_with_tiebreak() {
        let (repo, _dir) = setup();
        repo.store_transaction(&transaction(1, "2024-03-05", 10.0)).await.unwrap();
        repo.store_transaction(&transaction(2, "2024-03-20", 20.0)).await.unwrap();
        repo.store_transaction(&transaction(3, "2024-03-05", 30.0)).await.unwrap();

        let listed = repo.list_transactions().await.unwrap();
        assert_eq!(listed[0].amount, 20.0);
        // Same date: newer creation timestamp first
        assert_eq!(listed[1].amount, 30.0);
        assert_eq!(listed[2].amount, 10.0);
    }

    #[tokio::test]
    async fn test_update_missing_transaction_fails() {
        let (repo, _dir) = setup();
        let t = transaction(1, "2024-03-05", 10.0);
        assert!(repo.update_transaction(&t).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_transaction() {
        let (repo, _dir) = setup();
        let t = transaction(1, "2024-03-05", 10.0);
        repo.store_transaction(&t).await.unwrap();

        assert!(repo.delete_transaction(&t.id).await.unwrap());
        assert!(!repo.delete_transaction(&t.id).await.unwrap());
        assert!(repo.list_transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_description_with_commas_survives() {
        let (repo, _dir) = setup();
        let mut t = transaction(1, "2024-03-05", 10.0);
        t.description = "ซื้อของ, ส่งด่วน \"พิเศษ\"".to_string();
        repo.store_transaction(&t).await.unwrap();

        let loaded = repo.get_transaction(&t.id).await.unwrap().unwrap();
        assert_eq!(loaded.description, t.description);
    }
}
