//! Transactional data model with undo/redo.
//!
//! Every data edit made by a tool happens inside a named transaction.
//! Transactions nest; only the outermost commit pushes one undo step,
//! holding every property change made since the outermost start.
//! Rolling back reverts the pending changes in reverse order.

use crate::data::DataRecord;
use crate::id::PartId;
use serde_json::Value;
use std::collections::HashMap;

/// One recorded property edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub part: PartId,
    pub property: String,
    /// `None` when the property did not exist before the edit.
    pub old: Option<Value>,
    pub new: Value,
}

/// A committed group of changes, undone and redone as one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub name: String,
    pub changes: Vec<Change>,
}

#[derive(Debug)]
pub struct Model {
    records: HashMap<PartId, DataRecord>,
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    /// Maximum undo depth.
    max_depth: usize,
    /// Transaction nesting depth (0 = no open transaction).
    depth: usize,
    /// Name given to the outermost open transaction.
    pending_name: Option<String>,
    /// Changes recorded since the outermost start.
    pending: Vec<Change>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Model {
    pub fn new(max_depth: usize) -> Self {
        Self {
            records: HashMap::new(),
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
            depth: 0,
            pending_name: None,
            pending: Vec::new(),
        }
    }

    /// Bind a record to a part. Not recorded for undo.
    pub fn add_record(&mut self, part: PartId, record: DataRecord) {
        self.records.insert(part, record);
    }

    pub fn remove_record(&mut self, part: PartId) -> Option<DataRecord> {
        self.records.remove(&part)
    }

    pub fn data(&self, part: PartId) -> Option<&DataRecord> {
        self.records.get(&part)
    }

    // ─── Transactions ────────────────────────────────────────────────────

    /// Open a (possibly nested) transaction.
    pub fn start_transaction(&mut self, name: &str) {
        if self.depth == 0 {
            self.pending_name = Some(name.to_string());
            self.pending.clear();
        }
        self.depth += 1;
        log::debug!("start transaction {name:?} (level {})", self.depth);
    }

    /// Close one nesting level. When the outermost level closes and any
    /// change was recorded, push one undo step and clear redo.
    /// Returns `false` if no transaction was open.
    pub fn commit_transaction(&mut self, name: &str) -> bool {
        if self.depth == 0 {
            log::warn!("commit_transaction({name:?}) without an open transaction");
            return false;
        }
        self.depth -= 1;
        if self.depth > 0 {
            return true;
        }

        let outer = self.pending_name.take().unwrap_or_else(|| name.to_string());
        let changes = std::mem::take(&mut self.pending);
        log::debug!("commit transaction {outer:?} ({} changes)", changes.len());
        if !changes.is_empty() {
            self.undo_stack.push(Transaction {
                name: outer,
                changes,
            });
            if self.undo_stack.len() > self.max_depth {
                self.undo_stack.remove(0);
            }
            self.redo_stack.clear();
        }
        true
    }

    /// Abandon the whole open transaction, reverting its changes.
    /// Returns `false` if no transaction was open.
    pub fn rollback_transaction(&mut self) -> bool {
        if self.depth == 0 {
            return false;
        }
        let changes = std::mem::take(&mut self.pending);
        log::debug!(
            "rollback transaction {:?} ({} changes)",
            self.pending_name.as_deref().unwrap_or_default(),
            changes.len()
        );
        for change in changes.iter().rev() {
            self.write(change.part, &change.property, change.old.clone());
        }
        self.depth = 0;
        self.pending_name = None;
        true
    }

    pub fn is_in_transaction(&self) -> bool {
        self.depth > 0
    }

    pub fn transaction_level(&self) -> usize {
        self.depth
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Set one property of a part's record. This is the only sanctioned
    /// way to edit bound data. Returns `false` if the part has no record.
    pub fn set_data_property(&mut self, part: PartId, property: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        let Some(record) = self.records.get_mut(&part) else {
            log::warn!("set_data_property: {part:?} has no data record");
            return false;
        };
        if record.get(property) == Some(&value) {
            return true;
        }
        let old = record.insert(property, value.clone());
        if self.depth == 0 {
            log::warn!("change of {part:?}.{property} not within a transaction; it cannot be undone");
            return true;
        }
        self.pending.push(Change {
            part,
            property: property.to_string(),
            old,
            new: value,
        });
        true
    }

    fn write(&mut self, part: PartId, property: &str, value: Option<Value>) {
        if let Some(record) = self.records.get_mut(&part) {
            match value {
                Some(v) => {
                    record.insert(property, v);
                }
                None => {
                    record.remove(property);
                }
            }
        }
    }

    // ─── Undo / Redo ─────────────────────────────────────────────────────

    /// Undo the last committed transaction, returning its name.
    pub fn undo(&mut self) -> Option<String> {
        if self.depth > 0 {
            return None;
        }
        let tx = self.undo_stack.pop()?;
        for change in tx.changes.iter().rev() {
            self.write(change.part, &change.property, change.old.clone());
        }
        let name = tx.name.clone();
        self.redo_stack.push(tx);
        Some(name)
    }

    /// Redo the last undone transaction, returning its name.
    pub fn redo(&mut self) -> Option<String> {
        if self.depth > 0 {
            return None;
        }
        let tx = self.redo_stack.pop()?;
        for change in &tx.changes {
            self.write(change.part, &change.property, Some(change.new.clone()));
        }
        let name = tx.name.clone();
        self.undo_stack.push(tx);
        Some(name)
    }

    pub fn can_undo(&self) -> bool {
        self.depth == 0 && !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.depth == 0 && !self.redo_stack.is_empty()
    }

    /// The most recent committed transaction, if any.
    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.undo_stack.last()
    }
}
