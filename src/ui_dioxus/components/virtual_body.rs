use dioxus::prelude::*;

use crate::domain::record::{ColumnId, Record};
use crate::services::virtualizer::VirtualItem;

/// One rendered row: where it sits and what it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow {
    pub item: VirtualItem,
    pub record: Record,
}

/// Body of the table. A spacer row gives the scroll container its full
/// height; only the visible rows are rendered, each pinned at its offset.
#[component]
pub fn VirtualBody(rows: Vec<VisibleRow>, total_size: f64, row_height: f64) -> Element {
    let column_count = ColumnId::ALL.len();

    rsx! {
        tbody {
            style: "position: relative;",
            tr { style: "height: {total_size}px;" }

            if rows.is_empty() {
                tr {
                    class: "empty-row",
                    td {
                        colspan: "{column_count}",
                        style: "padding: 12px; text-align: center; color: #6b7280;",
                        "No results found"
                    }
                }
            }

            for row in rows {
                tr {
                    key: "{row.record.id}",
                    class: "bench-row",
                    role: "row",
                    style: "position: absolute; top: 0; transform: translateY({row.item.start}px); height: {row_height}px;",
                    for column in ColumnId::ALL {
                        td {
                            key: "{column.key()}",
                            role: "cell",
                            style: "padding: 4px; border-bottom: 1px solid #eee;",
                            "{row.record.cell_text(column)}"
                        }
                    }
                }
            }
        }
    }
}
