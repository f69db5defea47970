#[cfg(test)]
mod row_model_performance_tests {
    use chrono::{TimeZone, Utc};
    use table_bench::config::BenchConfig;
    use table_bench::domain::record::{ColumnId, Dataset};
    use table_bench::domain::sorting::{SortDirection, SortKey, SortingState};
    use table_bench::services::data_generator::generate_dataset;
    use table_bench::services::row_model::{GlobalFilter, RowModel};
    use std::time::Instant;

    const ROWS: usize = 200_000;

    fn dataset() -> Dataset {
        let config = BenchConfig {
            row_count: ROWS,
            seed: Some(2024),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        generate_dataset(&config, now).unwrap()
    }

    fn ids(model: &RowModel, dataset: &Dataset) -> Vec<u64> {
        (0..model.len())
            .map(|pos| model.record_at(dataset, pos).unwrap().id)
            .collect()
    }

    #[test]
    fn test_search_over_many_rows() {
        let ds = dataset();

        let start = Instant::now();
        let model = RowModel::build(&ds, &GlobalFilter::new("user 19999"), &SortingState::new());
        println!("Filtered {} rows in {:?}", ROWS, start.elapsed());

        let mut expected = vec![19_999];
        expected.extend(199_990..=199_999);
        assert_eq!(ids(&model, &ds), expected);
        assert!(start.elapsed().as_secs() < 10, "Filtering took too long: {:?}", start.elapsed());
    }

    #[test]
    fn test_typing_narrows_without_losing_rows() {
        let ds = dataset();
        let sorting = SortingState::new();

        let mut model = RowModel::build(&ds, &GlobalFilter::default(), &sorting);
        for typed in ["u", "us", "use", "user", "user ", "user 4", "user 42"] {
            let filter = GlobalFilter::new(typed);
            model = model.refine(&ds, &filter, &sorting);
            assert_eq!(model, RowModel::build(&ds, &filter, &sorting), "after typing {typed:?}");
        }
        assert!(model.len() > 1);
    }

    #[test]
    fn test_sort_by_age_descending_is_stable() {
        let ds = dataset();
        let sorting = SortingState::from_keys(vec![SortKey {
            column: ColumnId::Age,
            direction: SortDirection::Desc,
        }]);

        let start = Instant::now();
        let model = RowModel::build(&ds, &GlobalFilter::default(), &sorting);
        println!("Sorted {} rows in {:?}", ROWS, start.elapsed());

        assert_eq!(model.len(), ROWS);
        for pair in model.rows().windows(2) {
            let (a, b) = (&ds.records()[pair[0] as usize], &ds.records()[pair[1] as usize]);
            assert!(a.age >= b.age);
            if a.age == b.age {
                assert!(a.id < b.id, "ties must keep id order");
            }
        }
        assert_eq!(model.record_at(&ds, 0).unwrap().age, 97);
    }

    #[test]
    fn test_multi_sort_age_then_name() {
        let ds = dataset();
        let sorting = SortingState::from_keys(vec![
            SortKey {
                column: ColumnId::Age,
                direction: SortDirection::Asc,
            },
            SortKey {
                column: ColumnId::Name,
                direction: SortDirection::Desc,
            },
        ]);

        let model = RowModel::build(&ds, &GlobalFilter::new("user 1"), &sorting);
        for pair in model.rows().windows(2) {
            let (a, b) = (&ds.records()[pair[0] as usize], &ds.records()[pair[1] as usize]);
            assert!(a.age <= b.age);
            if a.age == b.age {
                // Natural descending order on names is descending id order
                assert!(a.id > b.id);
            }
        }
    }
}
