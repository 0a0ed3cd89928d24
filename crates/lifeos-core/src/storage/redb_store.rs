//! # redb-backed Record Store
//!
//! A disk-backed (or in-memory) store for accounts and their records.
//!
//! redb gives us:
//! - ACID transactions
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//!
//! All access goes through [`RedbStore::read`] and [`RedbStore::write`]. A
//! write closure runs inside one redb write transaction: it commits when the
//! closure returns `Ok` and is rolled back on `Err`. Because redb admits a
//! single writer at a time, read-recompute-write sequences (habit toggles,
//! XP grants) never interleave.

use super::{RECORD_TABLES, Record};
use crate::records::Account;
use crate::types::{AccountId, RecordId};
use crate::LifeError;
use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, ReadableTableMetadata,
    TableDefinition, WriteTransaction,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Table for accounts: AccountId(u64) -> serialized Account bytes
const ACCOUNTS: TableDefinition<u64, &[u8]> = TableDefinition::new("accounts");

/// Table for the e-mail index: lower-cased e-mail -> AccountId(u64)
const EMAILS: TableDefinition<&str, u64> = TableDefinition::new("emails");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

/// Metadata key of the store-wide id counter.
const NEXT_ID: &str = "next_id";

/// Counts reported by [`RedbStore::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub accounts: u64,
    pub records: u64,
    pub next_id: u64,
}

/// Account and record store backed by redb.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a database file at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LifeError> {
        let db = Database::create(path.as_ref()).map_err(|e| LifeError::Io(e.to_string()))?;
        Self::init(db)
    }

    /// Create a store that lives only as long as the returned value.
    pub fn in_memory() -> Result<Self, LifeError> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(storage)?;
        Self::init(db)
    }

    /// Make sure every table exists so read transactions can open them.
    fn init(db: Database) -> Result<Self, LifeError> {
        let write_txn = db.begin_write().map_err(storage)?;
        {
            let _ = write_txn.open_table(ACCOUNTS).map_err(storage)?;
            let _ = write_txn.open_table(EMAILS).map_err(storage)?;
            let _ = write_txn.open_table(METADATA).map_err(storage)?;
            for table in RECORD_TABLES {
                let _ = write_txn.open_table(table).map_err(storage)?;
            }
        }
        write_txn.commit().map_err(storage)?;
        Ok(Self { db })
    }

    /// Run `f` inside a read transaction (consistent snapshot).
    pub fn read<T>(&self, f: impl FnOnce(&ReadTxn) -> Result<T, LifeError>) -> Result<T, LifeError> {
        let tx = self.db.begin_read().map_err(storage)?;
        f(&ReadTxn { tx })
    }

    /// Run `f` inside a write transaction.
    ///
    /// Commits if `f` returns `Ok`; on `Err` nothing `f` wrote is kept.
    pub fn write<T>(
        &self,
        f: impl FnOnce(&WriteTxn<'_>) -> Result<T, LifeError>,
    ) -> Result<T, LifeError> {
        let tx = self.db.begin_write().map_err(storage)?;
        let result = f(&WriteTxn { tx: &tx });
        match result {
            Ok(value) => {
                tx.commit().map_err(storage)?;
                Ok(value)
            }
            Err(err) => {
                // Dropping an uncommitted write transaction rolls it back.
                drop(tx);
                Err(err)
            }
        }
    }

    /// Number of accounts and records currently stored.
    pub fn status(&self) -> Result<StoreStatus, LifeError> {
        self.read(|r| {
            let accounts = r.tx.open_table(ACCOUNTS).map_err(storage)?.len().map_err(storage)?;
            let mut records = 0u64;
            for table in RECORD_TABLES {
                let len = r.tx.open_table(table).map_err(storage)?.len().map_err(storage)?;
                records = records.saturating_add(len);
            }
            let next_id = r
                .tx
                .open_table(METADATA)
                .map_err(storage)?
                .get(NEXT_ID)
                .map_err(storage)?
                .map(|v| v.value())
                .unwrap_or(1);
            Ok(StoreStatus {
                accounts,
                records,
                next_id,
            })
        })
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Read-only view handed to [`RedbStore::read`] closures.
pub struct ReadTxn {
    tx: ReadTransaction,
}

impl ReadTxn {
    /// Load an account.
    pub fn account(&self, id: AccountId) -> Result<Account, LifeError> {
        let table = self.tx.open_table(ACCOUNTS).map_err(storage)?;
        load_account(&table, id)
    }

    /// Load a record owned by `account`, if present.
    pub fn get<R: Record>(&self, account: AccountId, id: RecordId) -> Result<Option<R>, LifeError> {
        let table = self.tx.open_table(R::TABLE).map_err(storage)?;
        fetch(&table, account, id)
    }

    /// Load a record owned by `account`, or fail with `NotFound`.
    pub fn require<R: Record>(&self, account: AccountId, id: RecordId) -> Result<R, LifeError> {
        self.get(account, id)?
            .ok_or_else(|| LifeError::not_found(R::KIND, id))
    }

    /// All records of one kind owned by `account`, in creation order.
    pub fn list<R: Record>(&self, account: AccountId) -> Result<Vec<R>, LifeError> {
        let table = self.tx.open_table(R::TABLE).map_err(storage)?;
        scan(&table, account)
    }
}

/// Read-write view handed to [`RedbStore::write`] closures.
pub struct WriteTxn<'t> {
    tx: &'t WriteTransaction,
}

impl WriteTxn<'_> {
    /// Allocate the next identifier from the store-wide counter.
    pub fn allocate_id(&self) -> Result<u64, LifeError> {
        let mut meta = self.tx.open_table(METADATA).map_err(storage)?;
        let id = meta
            .get(NEXT_ID)
            .map_err(storage)?
            .map(|v| v.value())
            .unwrap_or(1);
        meta.insert(NEXT_ID, id.saturating_add(1)).map_err(storage)?;
        Ok(id)
    }

    /// Allocate a record id.
    pub fn allocate_record_id(&self) -> Result<RecordId, LifeError> {
        self.allocate_id().map(RecordId)
    }

    /// Load an account.
    pub fn account(&self, id: AccountId) -> Result<Account, LifeError> {
        let table = self.tx.open_table(ACCOUNTS).map_err(storage)?;
        load_account(&table, id)
    }

    /// Insert or replace an account.
    pub fn put_account(&self, account: &Account) -> Result<(), LifeError> {
        let bytes = encode(account)?;
        let mut table = self.tx.open_table(ACCOUNTS).map_err(storage)?;
        table
            .insert(account.id.0, bytes.as_slice())
            .map_err(storage)?;
        Ok(())
    }

    /// Account registered under `email` (already lower-cased), if any.
    pub fn account_by_email(&self, email: &str) -> Result<Option<AccountId>, LifeError> {
        let table = self.tx.open_table(EMAILS).map_err(storage)?;
        Ok(table
            .get(email)
            .map_err(storage)?
            .map(|v| AccountId(v.value())))
    }

    /// Point `email` at `account` in the e-mail index.
    pub fn index_email(&self, email: &str, account: AccountId) -> Result<(), LifeError> {
        let mut table = self.tx.open_table(EMAILS).map_err(storage)?;
        table.insert(email, account.0).map_err(storage)?;
        Ok(())
    }

    /// Load a record owned by `account`, if present.
    pub fn get<R: Record>(&self, account: AccountId, id: RecordId) -> Result<Option<R>, LifeError> {
        let table = self.tx.open_table(R::TABLE).map_err(storage)?;
        fetch(&table, account, id)
    }

    /// Load a record owned by `account`, or fail with `NotFound`.
    pub fn require<R: Record>(&self, account: AccountId, id: RecordId) -> Result<R, LifeError> {
        self.get(account, id)?
            .ok_or_else(|| LifeError::not_found(R::KIND, id))
    }

    /// All records of one kind owned by `account`, in creation order.
    pub fn list<R: Record>(&self, account: AccountId) -> Result<Vec<R>, LifeError> {
        let table = self.tx.open_table(R::TABLE).map_err(storage)?;
        scan(&table, account)
    }

    /// Insert or replace a record owned by `account`.
    pub fn put<R: Record>(&self, account: AccountId, record: &R) -> Result<(), LifeError> {
        let bytes = encode(record)?;
        let mut table = self.tx.open_table(R::TABLE).map_err(storage)?;
        table
            .insert((account.0, record.id().0), bytes.as_slice())
            .map_err(storage)?;
        Ok(())
    }

    /// Delete a record owned by `account`.
    ///
    /// # Errors
    ///
    /// Returns `LifeError::NotFound` if `account` owns no such record.
    pub fn remove<R: Record>(&self, account: AccountId, id: RecordId) -> Result<(), LifeError> {
        let mut table = self.tx.open_table(R::TABLE).map_err(storage)?;
        let removed = table.remove((account.0, id.0)).map_err(storage)?.is_some();
        if removed {
            Ok(())
        } else {
            Err(LifeError::not_found(R::KIND, id))
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn storage(e: impl std::fmt::Display) -> LifeError {
    LifeError::Storage(e.to_string())
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LifeError> {
    postcard::to_allocvec(value).map_err(|e| LifeError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LifeError> {
    postcard::from_bytes(bytes).map_err(|e| LifeError::Serialization(e.to_string()))
}

fn load_account(
    table: &impl ReadableTable<u64, &'static [u8]>,
    id: AccountId,
) -> Result<Account, LifeError> {
    let guard = table
        .get(id.0)
        .map_err(storage)?
        .ok_or(LifeError::NotFound {
            kind: "Account",
            id: id.0,
        })?;
    decode(guard.value())
}

fn fetch<R: Record>(
    table: &impl ReadableTable<(u64, u64), &'static [u8]>,
    account: AccountId,
    id: RecordId,
) -> Result<Option<R>, LifeError> {
    table
        .get((account.0, id.0))
        .map_err(storage)?
        .map(|guard| decode(guard.value()))
        .transpose()
}

fn scan<R: Record>(
    table: &impl ReadableTable<(u64, u64), &'static [u8]>,
    account: AccountId,
) -> Result<Vec<R>, LifeError> {
    let mut records = Vec::new();
    for entry in table
        .range((account.0, 0u64)..=(account.0, u64::MAX))
        .map_err(storage)?
    {
        let (_key, value) = entry.map_err(storage)?;
        records.push(decode(value.value())?);
    }
    Ok(records)
}

// =============================================================================
// TESTS
// =============================================================================
