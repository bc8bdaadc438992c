use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::operator::Operator;

/// Records kept by default; the oldest one goes first
pub const MAX_RECORDS: usize = 100;

/// Operator shown in the history. A percent calculation is displayed with
/// both the percent sign and the operator it modified
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordOperator {
    Single(Operator),
    Compound(Operator, Operator),
}

impl From<Operator> for RecordOperator {
    fn from(op: Operator) -> Self {
        RecordOperator::Single(op)
    }
}

impl fmt::Display for RecordOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordOperator::Single(op) => write!(f, "{}", op),
            RecordOperator::Compound(first, second) => write!(f, "{} {}", first, second),
        }
    }
}

/// A finished calculation before it gets an id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calculation {
    pub previous_operand: String,
    pub operator: RecordOperator,
    pub argument_operand: Option<String>,
    pub result_operand: String,
}

/// History entry. Only the memo can change after the record is stored
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: u64,
    previous_operand: String,
    operator: RecordOperator,
    argument_operand: Option<String>,
    result_operand: String,
    memo: Option<String>,
}

impl Record {
    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn previous_operand(&self) -> &str {
        &self.previous_operand
    }
    pub fn operator(&self) -> RecordOperator {
        self.operator
    }
    pub fn argument_operand(&self) -> Option<&str> {
        self.argument_operand.as_deref()
    }
    pub fn result_operand(&self) -> &str {
        &self.result_operand
    }
    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.argument_operand {
            Some(arg) => write!(f, "{} {} {} = {}", self.previous_operand, self.operator, arg, self.result_operand),
            None => write!(f, "{} {} = {}", self.operator, self.previous_operand, self.result_operand),
        }
    }
}

/// Bounded calculation history, newest record first
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecords")]
pub struct RecordStore {
    records: VecDeque<Record>,
    capacity: usize,
}

// persisted form, goes through the same bounds as `with_capacity`
#[derive(Deserialize)]
struct StoredRecords {
    records: VecDeque<Record>,
    capacity: usize,
}

impl From<StoredRecords> for RecordStore {
    fn from(stored: StoredRecords) -> RecordStore {
        let mut store = RecordStore::with_capacity(stored.capacity);
        store.records = stored.records;
        store.records.truncate(store.capacity);
        store
    }
}

impl Default for RecordStore {
    fn default() -> RecordStore {
        RecordStore::with_capacity(MAX_RECORDS)
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Store that keeps at most `capacity` records (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        RecordStore {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Stores a calculation as the newest record and returns its id. The id
    /// is one more than the biggest id in the store
    pub fn add(&mut self, calc: Calculation) -> u64 {
        let id = self.records.iter().map(|r| r.id).max().map_or(1, |m| m + 1);
        self.records.push_front(Record {
            id,
            previous_operand: calc.previous_operand,
            operator: calc.operator,
            argument_operand: calc.argument_operand,
            result_operand: calc.result_operand,
            memo: None,
        });
        while self.records.len() > self.capacity {
            self.records.pop_back();
        }
        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records from the newest to the oldest
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn get_by_index(&self, index: usize) -> CalcResult<&Record> {
        self.records.get(index).ok_or(CalcError::InvalidRecordIndex(index))
    }

    pub fn get_by_id(&self, id: u64) -> CalcResult<&Record> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(CalcError::RecordNotFound(id))
    }

    pub fn index_of(&self, id: u64) -> CalcResult<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or(CalcError::RecordNotFound(id))
    }

    pub fn delete(&mut self, id: u64) -> CalcResult<Record> {
        let idx = self.index_of(id)?;
        self.records.remove(idx).ok_or(CalcError::RecordNotFound(id))
    }

    /// Drops the newest record, if any
    pub fn remove_newest(&mut self) -> Option<Record> {
        self.records.pop_front()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn set_memo(&mut self, id: u64, memo: &str) -> CalcErrorResult {
        let idx = self.index_of(id)?;
        self.records[idx].memo = Some(memo.to_owned());
        Ok(())
    }

    pub fn memo(&self, id: u64) -> CalcResult<Option<&str>> {
        Ok(self.get_by_id(id)?.memo())
    }

    pub fn delete_memo(&mut self, id: u64) -> CalcErrorResult {
        let idx = self.index_of(id)?;
        self.records[idx].memo = None;
        Ok(())
    }
}
