pub mod record;
pub mod sorting;

pub use record::{ColumnId, ColumnKind, Dataset, Record, SharedDataset};
pub use sorting::{SortDirection, SortKey, SortingState};
