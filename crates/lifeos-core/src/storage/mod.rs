//! # Storage
//!
//! redb-backed persistence for accounts and the records they own.
//!
//! Every record kind lives in its own table keyed by `(account_id, record_id)`,
//! so ownership is part of the key: a lookup through the wrong account simply
//! finds nothing. Values are postcard-encoded records.

mod redb_store;

pub use redb_store::{ReadTxn, RedbStore, StoreStatus, WriteTxn};

use crate::records::{
    FocusSession, Goal, Habit, HealthEntry, Idea, LearningItem, Reflection, Task, Transaction,
};
use crate::types::RecordId;
use redb::TableDefinition;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Table layout shared by every owned record kind.
pub type RecordTable = TableDefinition<'static, (u64, u64), &'static [u8]>;

/// A record kind stored under `(account_id, record_id)`.
pub trait Record: Serialize + DeserializeOwned {
    /// Human-readable kind, used in `NotFound` errors.
    const KIND: &'static str;
    /// Backing table.
    const TABLE: RecordTable;

    fn id(&self) -> RecordId;
}

macro_rules! record {
    ($ty:ty, $kind:literal, $table:literal) => {
        impl Record for $ty {
            const KIND: &'static str = $kind;
            const TABLE: RecordTable = TableDefinition::new($table);

            fn id(&self) -> RecordId {
                self.id
            }
        }
    };
}

record!(Task, "Task", "tasks");
record!(Habit, "Habit", "habits");
record!(Goal, "Goal", "goals");
record!(Transaction, "Transaction", "transactions");
record!(HealthEntry, "HealthEntry", "health_entries");
record!(LearningItem, "LearningItem", "learning_items");
record!(Idea, "Idea", "ideas");
record!(FocusSession, "FocusSession", "focus_sessions");
record!(Reflection, "Reflection", "reflections");

/// Every owned-record table, for initialization and status counts.
pub(crate) const RECORD_TABLES: [RecordTable; 9] = [
    Task::TABLE,
    Habit::TABLE,
    Goal::TABLE,
    Transaction::TABLE,
    HealthEntry::TABLE,
    LearningItem::TABLE,
    Idea::TABLE,
    FocusSession::TABLE,
    Reflection::TABLE,
];
