pub mod data_table;
pub mod search_input;
pub mod table_header;
pub mod timings_panel;
pub mod virtual_body;

pub use data_table::{begin_search, begin_sort, finish_render, DataTable, DataTableProps};
pub use search_input::SearchInput;
pub use table_header::TableHeader;
pub use timings_panel::TimingsPanel;
pub use virtual_body::{VirtualBody, VisibleRow};
