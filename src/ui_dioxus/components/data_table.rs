use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

use crate::config::BenchConfig;
use crate::domain::record::{ColumnId, SharedDataset};
use crate::domain::sorting::SortingState;
use crate::services::error_handling::LogHelper;
use crate::services::perf::{marks, measures, Measurement, PerfRecorder};
use crate::services::row_model::{GlobalFilter, RowModel};
use crate::services::url_sync;
use crate::services::virtualizer::Virtualizer;
use crate::ui_dioxus::components::{SearchInput, TableHeader, TimingsPanel, VirtualBody, VisibleRow};

#[derive(Props, Clone, PartialEq)]
pub struct DataTableProps {
    pub dataset: SharedDataset,
    pub config: BenchConfig,

    /// Filter text present when the table mounts, e.g. from the URL.
    #[props(default)]
    pub initial_search: String,

    #[props(default)]
    pub initial_sorting: SortingState,
}

/// Header click: marks `sort-start`, then applies the toggle.
pub fn begin_sort(recorder: &PerfRecorder, sorting: &mut SortingState, column: ColumnId, multi: bool) {
    recorder.mark(marks::SORT_START);
    sorting.toggle(column, multi);
    debug!(column = column.key(), multi = multi, sorting = ?sorting.keys(), "Sort changed");
}

/// Search input: marks `search-start`, optionally mirrors the text into the
/// URL, and returns the new filter.
pub fn begin_search(recorder: &PerfRecorder, value: String, sync_url: bool) -> GlobalFilter {
    recorder.mark(marks::SEARCH_START);
    if sync_url {
        if let Err(e) = url_sync::write_search_param(&value) {
            LogHelper::log_recoverable("search url", &e);
        }
    }
    GlobalFilter::new(value)
}

/// Runs once the changed view is on screen. Only the interactions that set a
/// start mark since the last render produce a measurement.
pub fn finish_render(recorder: &PerfRecorder) -> Vec<Measurement> {
    recorder.mark(marks::RENDER_END);
    recorder.measure_pending(measures::SORT_DURATION, marks::SORT_START, marks::RENDER_END);
    recorder.measure_pending(measures::SEARCH_DURATION, marks::SEARCH_START, marks::RENDER_END);
    recorder.measurements()
}

/// Searchable, sortable, virtualized table over the whole dataset.
///
/// Expects a [`PerfRecorder`] in context. Each search input marks
/// `search-start`, each header click marks `sort-start`, and once the view
/// has been re-rendered the pending durations are measured against
/// `render-end`.
#[component]
pub fn DataTable(props: DataTableProps) -> Element {
    let DataTableProps {
        dataset,
        config,
        initial_search,
        initial_sorting,
    } = props;
    let recorder = use_context::<PerfRecorder>();

    let render_count = use_hook(|| Rc::new(Cell::new(0_u64)));
    render_count.set(render_count.get() + 1);

    let mut filter = use_signal(move || GlobalFilter::new(initial_search));
    let mut sorting = use_signal(move || initial_sorting);
    let mut scroll_offset = use_signal(|| 0.0_f64);
    let mut container = use_signal(|| None::<Rc<MountedData>>);
    let mut timings = use_signal(Vec::<Measurement>::new);

    let row_model = use_memo({
        let dataset = dataset.clone();
        let mut previous = RowModel::default();
        move || {
            let next = previous.refine(&dataset, &filter.read(), &sorting.read());
            previous = next.clone();
            next
        }
    });

    use_effect({
        let recorder = recorder.clone();
        move || {
            // Subscribes the effect to every view change
            let _ = row_model.read();
            timings.set(finish_render(&recorder));
        }
    });

    let on_search = {
        let recorder = recorder.clone();
        let sync_url = config.sync_search_to_url;
        move |value: String| filter.set(begin_search(&recorder, value, sync_url))
    };

    let on_sort = {
        let recorder = recorder.clone();
        move |(column, multi): (ColumnId, bool)| {
            begin_sort(&recorder, &mut sorting.write(), column, multi)
        }
    };

    let onscroll = move |_: ScrollEvent| async move {
        let Some(element) = container() else {
            return;
        };
        match element.get_scroll_offset().await {
            Ok(offset) => scroll_offset.set(offset.y),
            Err(e) => debug!(error = ?e, "Could not read scroll offset"),
        }
    };

    let model = row_model.read();
    let mut virtualizer = Virtualizer::new(config.virtualizer_options(model.len()));
    virtualizer.set_scroll_offset(scroll_offset());
    let visible: Vec<VisibleRow> = virtualizer
        .virtual_items()
        .into_iter()
        .filter_map(|item| {
            model.record_at(&dataset, item.index).map(|record| VisibleRow {
                item,
                record: record.clone(),
            })
        })
        .collect();
    let matched = model.len();
    let total = model.total();
    drop(model);

    let search_value = filter.read().raw().to_string();
    let viewport_height = config.viewport_height_px;

    rsx! {
        div {
            class: "data-table",
            style: "padding: 20px; font-family: sans-serif;",

            h1 {
                style: "font-size: 1.6rem; font-weight: bold; margin-bottom: 8px;",
                "Table Bench ({total} rows)"
            }

            TimingsPanel {
                measurements: timings(),
                renders: render_count.get(),
                matched: matched,
                total: total,
            }

            SearchInput {
                value: search_value,
                placeholder: "Search...",
                on_search: on_search,
            }

            div {
                class: "table-viewport",
                style: "height: {viewport_height}px; overflow: auto; border: 1px solid #ccc;",
                onmounted: move |e: MountedEvent| container.set(Some(e.data())),
                onscroll: onscroll,

                table {
                    role: "table",
                    style: "width: 100%; border-collapse: collapse;",
                    TableHeader {
                        sorting: sorting(),
                        on_sort: on_sort,
                    }
                    VirtualBody {
                        rows: visible,
                        total_size: virtualizer.total_size(),
                        row_height: config.row_height_px,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sorting::SortDirection;

    #[test]
    fn test_sort_click_marks_and_toggles() {
        let recorder = PerfRecorder::default();
        let mut sorting = SortingState::new();

        begin_sort(&recorder, &mut sorting, ColumnId::Age, false);
        assert!(recorder.has_mark(marks::SORT_START));
        assert_eq!(sorting.direction_of(ColumnId::Age), Some(SortDirection::Desc));

        begin_sort(&recorder, &mut sorting, ColumnId::Name, true);
        assert_eq!(sorting.keys().len(), 2);
    }

    #[test]
    fn test_search_input_marks_and_builds_filter() {
        let recorder = PerfRecorder::default();
        let filter = begin_search(&recorder, "User 7".to_string(), false);
        assert!(recorder.has_mark(marks::SEARCH_START));
        assert_eq!(filter.raw(), "User 7");
        assert_eq!(filter.needle(), "user 7");
    }

    #[test]
    fn test_render_measures_only_pending_interactions() {
        let recorder = PerfRecorder::default();
        let mut sorting = SortingState::new();
        begin_sort(&recorder, &mut sorting, ColumnId::Id, false);

        let timings = finish_render(&recorder);
        assert_eq!(timings.len(), 1);
        assert_eq!(timings[0].name, measures::SORT_DURATION);
        assert!(timings[0].duration_ms >= 0.0);

        // A render with no new interaction records nothing
        assert_eq!(finish_render(&recorder).len(), 1);

        begin_search(&recorder, "user".to_string(), false);
        let timings = finish_render(&recorder);
        assert_eq!(timings.len(), 2);
        assert!(recorder.latest(measures::SEARCH_DURATION).is_some());
    }
}
