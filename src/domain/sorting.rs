use std::cmp::Ordering;

use crate::domain::record::{ColumnId, ColumnKind, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Direction a column takes the first time it is sorted.
    pub fn first_for(column: ColumnId) -> Self {
        match column.kind() {
            ColumnKind::Numeric => SortDirection::Desc,
            ColumnKind::Text => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: ColumnId,
    pub direction: SortDirection,
}

/// Ordered sort specification. The first key is the primary one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortingState(Vec<SortKey>);

impl SortingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn direction_of(&self, column: ColumnId) -> Option<SortDirection> {
        self.0
            .iter()
            .find(|key| key.column == column)
            .map(|key| key.direction)
    }

    /// `None` means the next toggle removes the column from the sort.
    pub fn next_direction(&self, column: ColumnId) -> Option<SortDirection> {
        let first = SortDirection::first_for(column);
        match self.direction_of(column) {
            None => Some(first),
            Some(current) if current == first => Some(first.reversed()),
            Some(_) => None,
        }
    }

    /// Header click. `multi` is a shift-click that adds to the existing sort.
    pub fn toggle(&mut self, column: ColumnId, multi: bool) {
        let first = SortDirection::first_for(column);
        let next = self.next_direction(column);
        let existing = self.0.iter().position(|key| key.column == column);

        if multi && !self.0.is_empty() {
            match (existing, next) {
                (Some(i), Some(direction)) => self.0[i].direction = direction,
                (Some(i), None) => {
                    self.0.remove(i);
                }
                (None, direction) => self.0.push(SortKey {
                    column,
                    direction: direction.unwrap_or(first),
                }),
            }
            return;
        }

        match existing {
            Some(i) if i + 1 == self.0.len() => match next {
                Some(direction) => self.0[i].direction = direction,
                None => {
                    self.0.remove(i);
                }
            },
            // A replace never removes; a removal step falls back to ascending
            _ => {
                self.0 = vec![SortKey {
                    column,
                    direction: next.unwrap_or(SortDirection::Asc),
                }];
            }
        }
    }

    pub fn indicator(&self, column: ColumnId) -> &'static str {
        match self.direction_of(column) {
            Some(SortDirection::Asc) => " 🔼",
            Some(SortDirection::Desc) => " 🔽",
            None => "",
        }
    }

    pub fn aria_sort(&self, column: ColumnId) -> &'static str {
        match self.direction_of(column) {
            Some(SortDirection::Asc) => "ascending",
            Some(SortDirection::Desc) => "descending",
            None => "none",
        }
    }

    /// Equal records stay in their original order under a stable sort.
    pub fn compare_records(&self, a: &Record, b: &Record) -> Ordering {
        for key in &self.0 {
            let ordering = a.compare_by(key.column, b);
            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Runs of ASCII digits and runs of everything else.
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

fn is_digit_chunk(chunk: &str) -> bool {
    chunk.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

fn compare_chunks(a: &str, b: &str) -> Ordering {
    match (is_digit_chunk(a), is_digit_chunk(b)) {
        (true, true) => {
            let (ta, tb) = (a.trim_start_matches('0'), b.trim_start_matches('0'));
            ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb))
        }
        // Text sorts before numbers
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, false) => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    }
}

/// Case-insensitive natural ordering: `User 9` < `User 10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks { rest: a };
    let mut right = Chunks { rest: b };
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = compare_chunks(x, y);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}
