use chrono::{DateTime, SecondsFormat, Utc};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::sorting::natural_cmp;

/// Separates cell texts inside a search haystack. Never produced by a cell.
pub const CELL_SEPARATOR: char = '\u{1f}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: u8,
    pub registered: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Id,
    Name,
    Email,
    Age,
    Registered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl ColumnId {
    /// Display order.
    pub const ALL: [ColumnId; 5] = [
        ColumnId::Id,
        ColumnId::Name,
        ColumnId::Email,
        ColumnId::Age,
        ColumnId::Registered,
    ];

    pub fn header(self) -> &'static str {
        match self {
            ColumnId::Id => "ID",
            ColumnId::Name => "Name",
            ColumnId::Email => "Email",
            ColumnId::Age => "Age",
            ColumnId::Registered => "Registered",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ColumnId::Id => "id",
            ColumnId::Name => "name",
            ColumnId::Email => "email",
            ColumnId::Age => "age",
            ColumnId::Registered => "registered",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.key() == key)
    }

    /// Timestamps are rendered as ISO strings and therefore behave as text.
    pub fn kind(self) -> ColumnKind {
        match self {
            ColumnId::Id | ColumnId::Age => ColumnKind::Numeric,
            ColumnId::Name | ColumnId::Email | ColumnId::Registered => ColumnKind::Text,
        }
    }
}

impl Record {
    pub fn new(id: u64, age: u8, registered: DateTime<Utc>) -> Self {
        Self {
            id,
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
            age,
            registered,
        }
    }

    pub fn registered_iso(&self) -> String {
        self.registered.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn cell_text(&self, column: ColumnId) -> String {
        match column {
            ColumnId::Id => self.id.to_string(),
            ColumnId::Name => self.name.clone(),
            ColumnId::Email => self.email.clone(),
            ColumnId::Age => self.age.to_string(),
            ColumnId::Registered => self.registered_iso(),
        }
    }

    pub fn compare_by(&self, column: ColumnId, other: &Record) -> Ordering {
        match column {
            ColumnId::Id => self.id.cmp(&other.id),
            ColumnId::Age => self.age.cmp(&other.age),
            ColumnId::Name => natural_cmp(&self.name, &other.name),
            ColumnId::Email => natural_cmp(&self.email, &other.email),
            // Fixed-width ISO strings order the same way as the instants they encode
            ColumnId::Registered => self.registered.cmp(&other.registered),
        }
    }

    fn search_haystack(&self) -> Box<str> {
        let mut haystack = String::with_capacity(64);
        for (i, column) in ColumnId::ALL.into_iter().enumerate() {
            if i > 0 {
                haystack.push(CELL_SEPARATOR);
            }
            haystack.push_str(&self.cell_text(column).to_lowercase());
        }
        haystack.into_boxed_str()
    }
}

/// The generated records plus a lowercase search haystack per record.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<Record>,
    haystacks: Vec<Box<str>>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let haystacks = records.par_iter().map(Record::search_haystack).collect();
        Self { records, haystacks }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `needle` must already be lowercase.
    pub fn matches(&self, index: usize, needle: &str) -> bool {
        if needle.contains(CELL_SEPARATOR) {
            return false;
        }
        self.haystacks
            .get(index)
            .is_some_and(|haystack| haystack.contains(needle))
    }
}

/// Shared handle to a dataset. Equality is identity so it can travel as a prop
/// without comparing a million records on every diff.
#[derive(Debug, Clone, Default)]
pub struct SharedDataset(Arc<Dataset>);

impl SharedDataset {
    pub fn new(dataset: Dataset) -> Self {
        Self(Arc::new(dataset))
    }
}

impl std::ops::Deref for SharedDataset {
    type Target = Dataset;

    fn deref(&self) -> &Dataset {
        &self.0
    }
}

impl PartialEq for SharedDataset {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
