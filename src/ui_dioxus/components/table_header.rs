use dioxus::prelude::*;

use crate::domain::record::ColumnId;
use crate::domain::sorting::SortingState;

/// Column headers. Click toggles a column's sort; shift-click adds it to the
/// existing sort.
#[component]
pub fn TableHeader(sorting: SortingState, on_sort: EventHandler<(ColumnId, bool)>) -> Element {
    rsx! {
        thead {
            tr {
                role: "row",
                for column in ColumnId::ALL {
                    th {
                        key: "{column.key()}",
                        role: "columnheader",
                        aria_sort: sorting.aria_sort(column),
                        style: "cursor: pointer; border-bottom: 1px solid black; background: #f0f0f0; position: sticky; top: 0; z-index: 1;",
                        onclick: move |evt: MouseEvent| {
                            on_sort.call((column, evt.modifiers().contains(Modifiers::SHIFT)));
                        },
                        "{column.header()}{sorting.indicator(column)}"
                    }
                }
            }
        }
    }
}
