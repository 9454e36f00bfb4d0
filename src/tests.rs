use std::collections::BTreeSet;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::bar_height;
use crate::data::sample_queries::sample_queries;
use crate::domain::entities::chart::{project, CHART_ROW_CAP};
use crate::domain::entities::dataset::{CellValue, Dataset, DatasetError, Row};
use crate::domain::entities::query::{filter_entries, LibraryEntry, SavedQuery};
use crate::domain::entities::view::{
    entries_summary, paginate, sort_rows, Selection, SortDirection, ViewState, DEFAULT_PAGE_SIZE,
};
use crate::infra::export::clipboard::selected_rows_tsv;
use crate::infra::export::csv::to_csv;
use crate::infra::export::json::to_json;
use crate::infra::export::pdf::to_pdf;
use crate::infra::export::xlsx::to_xlsx;
use crate::infra::store::saved_queries::JsonQueryStore;
use crate::usecase::ports::sink::{ArtifactSink, SinkError, SinkReceipt};
use crate::usecase::ports::store::QueryStore;
use crate::usecase::services::export_service::{ExportFormat, ExportService};
use crate::usecase::services::library_service::LibraryService;
use crate::usecase::services::query_service::QueryService;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("querydesk-{prefix}-{nanos}"))
}

fn row(cells: &[(&str, CellValue)]) -> Row {
    cells
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn numbered_dataset(count: usize) -> Dataset {
    let columns = vec!["id".to_string(), "name".to_string()];
    let rows: Vec<Row> = (0..count)
        .map(|i| {
            row(&[
                ("id", CellValue::from((i + 1) as i64)),
                ("name", CellValue::from(format!("Item {}", i + 1))),
            ])
        })
        .collect();
    Dataset::new(columns, rows).expect("test dataset should be well-formed")
}

#[test]
fn dataset_rejects_empty_columns() {
    let result = Dataset::new(Vec::new(), Vec::new());

    assert_eq!(result.unwrap_err(), DatasetError::NoColumns);
}

#[test]
fn dataset_rejects_duplicate_columns() {
    let result = Dataset::new(vec!["a".to_string(), "a".to_string()], Vec::new());

    assert_eq!(
        result.unwrap_err(),
        DatasetError::DuplicateColumn("a".to_string())
    );
}

#[test]
fn dataset_rejects_rows_with_unknown_keys() {
    let result = Dataset::new(
        vec!["a".to_string()],
        vec![row(&[("b", CellValue::from(1_i64))])],
    );

    assert_eq!(
        result.unwrap_err(),
        DatasetError::UnknownRowKey {
            row: 0,
            key: "b".to_string()
        }
    );
}

#[test]
fn cell_render_drops_trailing_zero_for_integral_numbers() {
    assert_eq!(CellValue::Number(42.0).render(), "42");
    assert_eq!(CellValue::Number(42.5).render(), "42.5");
    assert_eq!(CellValue::Null.render(), "");
    assert_eq!(CellValue::Text("hi".to_string()).render(), "hi");
}

#[test]
fn mixed_type_cells_compare_equal() {
    let number = CellValue::Number(1.0);
    let text = CellValue::Text("1".to_string());

    assert_eq!(number.compare(&text), std::cmp::Ordering::Equal);
    assert_eq!(CellValue::Null.compare(&number), std::cmp::Ordering::Equal);
}

#[test]
fn sort_toggles_direction_on_repeated_column() {
    let view = ViewState::new().sort_by("revenue");
    assert_eq!(view.sort.key.as_deref(), Some("revenue"));
    assert_eq!(view.sort.direction, SortDirection::Ascending);

    let view = view.sort_by("revenue");
    assert_eq!(view.sort.direction, SortDirection::Descending);

    // A third click starts over ascending, as does a different column.
    let view = view.sort_by("revenue");
    assert_eq!(view.sort.direction, SortDirection::Ascending);

    let view = view.sort_by("revenue").sort_by("month");
    assert_eq!(view.sort.key.as_deref(), Some("month"));
    assert_eq!(view.sort.direction, SortDirection::Ascending);
}

#[test]
fn sort_clears_selection_but_keeps_page() {
    let view = ViewState::new().go_next(100).toggle_row(3).sort_by("id");

    assert_eq!(view.page.current_page, 2, "sorting should not move the page");
    assert!(view.selection.is_empty(), "sorting should clear selection");
}

#[test]
fn sort_rows_is_stable_for_equal_keys() {
    let rows = vec![
        row(&[("k", CellValue::from(1_i64)), ("tag", CellValue::from("first"))]),
        row(&[("k", CellValue::from(1_i64)), ("tag", CellValue::from("second"))]),
        row(&[("k", CellValue::from(0_i64)), ("tag", CellValue::from("third"))]),
    ];
    let spec = ViewState::new().sort_by("k").sort;

    let sorted = sort_rows(&rows, &spec);

    assert_eq!(Dataset::cell_text(&sorted[0], "tag"), "third");
    assert_eq!(
        Dataset::cell_text(&sorted[1], "tag"),
        "first",
        "equal keys should keep input order"
    );
    assert_eq!(Dataset::cell_text(&sorted[2], "tag"), "second");
}

#[test]
fn sorting_an_already_sorted_sequence_changes_nothing() {
    let rows = vec![
        row(&[("k", CellValue::from(1_i64)), ("tag", CellValue::from("a"))]),
        row(&[("k", CellValue::from(1_i64)), ("tag", CellValue::from("b"))]),
        row(&[("k", CellValue::from(2_i64)), ("tag", CellValue::from("c"))]),
        row(&[("k", CellValue::from(3_i64)), ("tag", CellValue::from("d"))]),
    ];
    let spec = ViewState::new().sort_by("k").sort;

    let once = sort_rows(&rows, &spec);
    let twice = sort_rows(&once, &spec);

    assert_eq!(twice, once, "resorting a sorted sequence should be a no-op");
}

#[test]
fn sort_rows_without_key_keeps_natural_order() {
    let dataset = numbered_dataset(5);
    let sorted = sort_rows(dataset.rows(), &ViewState::new().sort);

    assert_eq!(sorted, dataset.rows().to_vec());
}

#[test]
fn descending_sort_reverses_ascending_order() {
    let dataset = numbered_dataset(10);
    let ascending = sort_rows(dataset.rows(), &ViewState::new().sort_by("id").sort);
    let descending = sort_rows(
        dataset.rows(),
        &ViewState::new().sort_by("id").sort_by("id").sort,
    );

    let reversed: Vec<Row> = ascending.into_iter().rev().collect();
    assert_eq!(descending, reversed);
}

#[test]
fn pagination_reassembles_the_full_dataset() {
    let dataset = numbered_dataset(1000);
    let mut view = ViewState::new();
    assert_eq!(view.page.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(view.page.display_pages(dataset.row_count()), 100);

    let mut seen = Vec::new();
    loop {
        let page_view = paginate(dataset.rows(), &view.page);
        seen.extend(page_view.page_rows);
        if view.on_last_page(dataset.row_count()) {
            break;
        }
        view = view.go_next(dataset.row_count());
    }

    assert_eq!(seen.len(), 1000, "every row should appear exactly once");
    assert_eq!(seen, dataset.rows().to_vec());
}

#[test]
fn page_navigation_clamps_at_both_ends() {
    let view = ViewState::new();

    let still_first = view.go_previous(100);
    assert_eq!(still_first.page.current_page, 1);

    let last = view.go_last(95);
    assert_eq!(last.page.current_page, 10);

    let past_last = last.go_next(95);
    assert_eq!(past_last.page.current_page, 10);
}

#[test]
fn page_change_clears_selection_but_noop_keeps_it() {
    let view = ViewState::new().toggle_row(2).toggle_row(5);

    let moved = view.go_next(100);
    assert!(moved.selection.is_empty(), "a real move should clear selection");

    let unchanged = view.go_previous(100);
    assert_eq!(
        unchanged.selection,
        [2, 5].into_iter().collect::<Selection>(),
        "a clamped no-op should keep selection"
    );
}

#[test]
fn page_size_change_resets_to_first_page_and_clears_selection() {
    let view = ViewState::new().go_last(1000).toggle_row(1);

    let resized = view.set_page_size(100);
    assert_eq!(resized.page.page_size, 100);
    assert_eq!(resized.page.current_page, 1);
    assert!(resized.selection.is_empty());
}

#[test]
fn page_size_outside_fixed_set_is_ignored() {
    let view = ViewState::new().go_next(100).toggle_row(0);

    let unchanged = view.set_page_size(42);
    assert_eq!(unchanged, view);
}

#[test]
fn select_all_then_toggle_all_off_leaves_nothing_selected() {
    let view = ViewState::new().select_all(10);
    assert!(view.all_selected(10));
    assert_eq!(view.selection.len(), 10);

    let cleared = view.clear_selection();
    assert!(cleared.selection.is_empty());
}

#[test]
fn toggle_row_adds_then_removes_a_position() {
    let view = ViewState::new().toggle_row(4);
    assert!(view.selection.contains(&4));

    let view = view.toggle_row(4);
    assert!(!view.selection.contains(&4));
}

#[test]
fn entries_summary_reads_zero_for_empty_results() {
    let view = ViewState::new();

    assert_eq!(entries_summary(&view.page, 0), "Showing 0 to 0 of 0 entries");
}

#[test]
fn entries_summary_caps_at_the_final_row() {
    let view = ViewState::new().go_last(95);

    assert_eq!(
        entries_summary(&view.page, 95),
        "Showing 91 to 95 of 95 entries"
    );
    assert_eq!(
        entries_summary(&ViewState::new().page, 95),
        "Showing 1 to 10 of 95 entries"
    );
}

#[test]
fn empty_results_degrade_to_one_empty_page_and_header_only_csv() {
    let dataset = Dataset::new(vec!["a".to_string(), "b".to_string()], Vec::new())
        .expect("dataset should be well-formed");
    let view = ViewState::new();

    assert_eq!(view.page.display_pages(0), 1);
    assert!(paginate(dataset.rows(), &view.page).page_rows.is_empty());
    assert_eq!(to_csv(&dataset), "a,b");
}

#[test]
fn last_page_of_a_thousand_rows_holds_the_final_window() {
    let dataset = numbered_dataset(1000);
    let view = ViewState::new().set_page_size(100).go_last(1000);

    assert_eq!(view.page.current_page, 10);
    let page_view = paginate(dataset.rows(), &view.page);
    assert_eq!(page_view.start_index, 900);
    assert_eq!(page_view.page_rows.len(), 100);
    assert_eq!(Dataset::cell_text(&page_view.page_rows[0], "id"), "901");
    assert_eq!(Dataset::cell_text(&page_view.page_rows[99], "id"), "1000");
    assert!(view.on_last_page(1000), "next and last should be disabled");
}

#[test]
fn chart_projection_splits_category_numeric_and_text_columns() {
    let columns = vec![
        "month".to_string(),
        "revenue".to_string(),
        "region".to_string(),
    ];
    let rows = vec![
        row(&[
            ("month", CellValue::from("2026-01")),
            ("revenue", CellValue::from(100_i64)),
            ("region", CellValue::from("west")),
        ]),
        row(&[
            ("month", CellValue::from("2026-02")),
            ("revenue", CellValue::from(200_i64)),
            ("region", CellValue::from("east")),
        ]),
    ];
    let dataset = Dataset::new(columns, rows).expect("dataset should be well-formed");

    let projection = project(&dataset);

    assert_eq!(projection.category_column, "month");
    assert_eq!(projection.numeric_columns(), vec!["revenue"]);
    assert_eq!(projection.points[1].category, "2026-02");
    assert_eq!(projection.points[1].values, vec![200.0]);
}

#[test]
fn csv_export_quotes_every_data_cell() {
    let dataset = Dataset::new(
        vec!["a".to_string(), "b".to_string()],
        vec![row(&[
            ("a", CellValue::from(1_i64)),
            ("b", CellValue::from("x")),
        ])],
    )
    .expect("dataset should be well-formed");

    assert_eq!(to_csv(&dataset), "a,b\n\"1\",\"x\"");
}

#[test]
fn csv_export_writes_embedded_quotes_verbatim() {
    let dataset = Dataset::new(
        vec!["note".to_string()],
        vec![row(&[("note", CellValue::from("say \"hi\""))])],
    )
    .expect("dataset should be well-formed");

    assert_eq!(to_csv(&dataset), "note\n\"say \"hi\"\"");
}

#[test]
fn csv_export_round_trips_through_a_strict_reader() {
    let dataset = numbered_dataset(3);
    let text = to_csv(&dataset);

    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let headers = reader.headers().expect("csv should have headers").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["id", "name"]);

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("records should parse");
    assert_eq!(records.len(), 3);
    assert_eq!(&records[0][0], "1");
    assert_eq!(&records[2][1], "Item 3");
}

#[test]
fn json_export_is_a_pretty_printed_row_array() {
    let dataset = Dataset::new(
        vec!["a".to_string()],
        vec![row(&[("a", CellValue::from(1_i64))])],
    )
    .expect("dataset should be well-formed");

    let text = to_json(&dataset).expect("json export should succeed");

    assert_eq!(text, "[\n  {\n    \"a\": 1\n  }\n]");
    let parsed: serde_json::Value =
        serde_json::from_str(&text).expect("exported json should parse");
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
}

#[test]
fn json_export_renders_each_scalar_kind() {
    let dataset = Dataset::new(
        vec!["n".to_string(), "f".to_string(), "t".to_string(), "e".to_string()],
        vec![row(&[
            ("n", CellValue::from(7_i64)),
            ("f", CellValue::from(2.5)),
            ("t", CellValue::from("x")),
            ("e", CellValue::Null),
        ])],
    )
    .expect("dataset should be well-formed");

    let text = to_json(&dataset).expect("json export should succeed");

    assert!(text.contains("\"n\": 7"), "integral numbers drop the decimal point: {text}");
    assert!(text.contains("\"f\": 2.5"));
    assert!(text.contains("\"t\": \"x\""));
    assert!(text.contains("\"e\": null"));
}

#[test]
fn xlsx_export_is_a_readable_workbook() {
    let dataset = numbered_dataset(2);
    let bytes = to_xlsx(&dataset).expect("xlsx export should succeed");

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).expect("workbook should be a valid zip");
    let names: BTreeSet<String> = (0..archive.len())
        .map(|i| {
            archive
                .by_index(i)
                .expect("zip entry should be readable")
                .name()
                .to_string()
        })
        .collect();
    assert!(names.contains("[Content_Types].xml"));
    assert!(names.contains("xl/workbook.xml"));
    assert!(names.contains("xl/worksheets/sheet1.xml"));

    let mut sheet = String::new();
    std::io::Read::read_to_string(
        &mut archive
            .by_name("xl/worksheets/sheet1.xml")
            .expect("sheet should exist"),
        &mut sheet,
    )
    .expect("sheet should be utf-8");
    assert!(sheet.contains("<t>Item 1</t>"), "sheet should hold row text");
    assert!(sheet.contains("<v>2</v>"), "sheet should hold numeric cells");
    // Header row plus two data rows.
    assert_eq!(sheet.matches("<row>").count(), 3);
}

#[test]
fn xlsx_export_of_empty_dataset_has_no_rows() {
    let dataset =
        Dataset::new(vec!["a".to_string()], Vec::new()).expect("dataset should be well-formed");
    let bytes = to_xlsx(&dataset).expect("xlsx export should succeed");

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).expect("workbook should be a valid zip");
    let mut sheet = String::new();
    std::io::Read::read_to_string(
        &mut archive
            .by_name("xl/worksheets/sheet1.xml")
            .expect("sheet should exist"),
        &mut sheet,
    )
    .expect("sheet should be utf-8");
    assert_eq!(sheet.matches("<row>").count(), 0);
}

#[test]
fn pdf_export_has_header_trailer_and_expected_page_count() {
    let dataset = numbered_dataset(100);
    let bytes = to_pdf(&dataset);

    assert!(bytes.starts_with(b"%PDF-1.4\n"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.ends_with("%%EOF\n"));
    // 60 data rows fit under the title band per page.
    assert!(text.contains("/Count 2"), "100 rows should span two pages");
    assert_eq!(text.matches("/Type /Page ").count(), 2);
}

#[test]
fn pdf_export_escapes_parentheses_in_cells() {
    let dataset = Dataset::new(
        vec!["note".to_string()],
        vec![row(&[("note", CellValue::from("a (b) \\c"))])],
    )
    .expect("dataset should be well-formed");

    let text = String::from_utf8_lossy(&to_pdf(&dataset)).into_owned();
    assert!(text.contains("(a \\(b\\) \\\\c) Tj"));
}

#[test]
fn pdf_export_of_empty_dataset_still_prints_the_header() {
    let dataset =
        Dataset::new(vec!["only".to_string()], Vec::new()).expect("dataset should be well-formed");

    let text = String::from_utf8_lossy(&to_pdf(&dataset)).into_owned();
    assert!(text.contains("/Count 1"));
    assert!(text.contains("(only) Tj"));
}

#[test]
fn selected_rows_copy_as_tab_separated_lines() {
    let dataset = numbered_dataset(5);
    let selection: Selection = [0, 2].into_iter().collect();

    let text = selected_rows_tsv(dataset.columns(), dataset.rows(), &selection);

    assert_eq!(text, "1\tItem 1\n3\tItem 3");
}

#[test]
fn selection_positions_past_the_page_are_skipped() {
    let dataset = numbered_dataset(2);
    let selection: Selection = [1, 9].into_iter().collect();

    let text = selected_rows_tsv(dataset.columns(), dataset.rows(), &selection);

    assert_eq!(text, "2\tItem 2");
}

#[test]
fn chart_projection_keeps_only_fully_numeric_columns() {
    let samples = sample_queries();
    let revenue = &samples[0].results;

    let projection = project(revenue);

    assert_eq!(projection.category_column, "month");
    assert_eq!(
        projection.numeric_columns(),
        vec!["total_orders", "revenue", "avg_order_value", "unique_customers"]
    );
    assert_eq!(projection.points.len(), 12);
}

#[test]
fn chart_projection_of_empty_dataset_has_no_series() {
    let dataset = Dataset::new(
        vec!["month".to_string(), "revenue".to_string()],
        Vec::new(),
    )
    .expect("dataset should be well-formed");

    let projection = project(&dataset);

    assert!(projection.series.is_empty());
    assert!(projection.points.is_empty());
}

#[test]
fn chart_projection_caps_points_at_fifty_rows() {
    let dataset = numbered_dataset(120);

    let projection = project(&dataset);

    assert_eq!(projection.points.len(), CHART_ROW_CAP);
}

#[test]
fn chart_series_hues_are_evenly_spaced() {
    let samples = sample_queries();
    let projection = project(&samples[0].results);

    let hues: Vec<f64> = projection.series.iter().map(|s| s.hue).collect();
    assert_eq!(hues, vec![0.0, 90.0, 180.0, 270.0]);
    assert_eq!(projection.series[1].color(), "hsl(90, 70%, 50%)");
}

#[test]
fn chart_projection_excludes_columns_with_any_text_value() {
    let samples = sample_queries();
    let cohorts = &samples[1].results;

    let projection = project(cohorts);

    assert!(
        !projection
            .numeric_columns()
            .contains(&"retention_rate"),
        "text-rendered rate column should not chart"
    );
}

#[test]
fn bar_height_clamps_negative_values_to_the_baseline() {
    assert_eq!(bar_height(5.0, 10.0, 100.0), 50.0);
    assert_eq!(bar_height(-5.0, 10.0, 100.0), 0.0, "negative bars draw as zero");
    assert_eq!(bar_height(0.0, 10.0, 100.0), 0.0);
}

#[test]
fn query_service_matches_library_queries_ignoring_case_and_whitespace() {
    let service = QueryService::new(sample_queries());
    let original = &service.library()[1];

    let run = service.run_query(&format!("  {}  ", original.query.to_uppercase()));

    assert_eq!(run.matched.as_deref(), Some("Customer Cohort Analysis"));
    assert_eq!(run.dataset, Some(original.results.clone()));
}

#[test]
fn query_service_falls_back_to_the_first_sample() {
    let service = QueryService::new(sample_queries());

    let run = service.run_query("SELECT * FROM nowhere");

    assert_eq!(run.matched, None);
    assert_eq!(run.dataset, Some(service.library()[0].results.clone()));
}

#[test]
fn query_service_with_an_empty_library_returns_no_dataset() {
    let service = QueryService::new(Vec::new());

    let run = service.run_query("SELECT * FROM anywhere");

    assert_eq!(run.matched, None);
    assert_eq!(run.dataset, None, "nothing to fall back on");
}

#[test]
fn large_dataset_marker_inflates_to_a_thousand_rows() {
    let service = QueryService::new(sample_queries());

    let run = service.run_query("SELECT * FROM orders --large-dataset");
    let dataset = run.dataset.expect("fallback dataset should exist");

    assert_eq!(dataset.row_count(), 1000);
    assert_eq!(dataset.columns(), service.library()[0].results.columns());
}

#[test]
fn huge_dataset_marker_wins_over_large() {
    let service = QueryService::new(sample_queries());

    let run = service.run_query("SELECT 1 --large-dataset --huge-dataset");
    let dataset = run.dataset.expect("fallback dataset should exist");

    assert_eq!(dataset.row_count(), 10_000);
}

#[test]
fn inflation_rewrites_the_id_column_sequentially() {
    let base = numbered_dataset(3);
    let service = QueryService::new(vec![crate::domain::entities::query::SampleQuery {
        name: "Numbered".to_string(),
        description: "ids".to_string(),
        query: "SELECT id, name FROM items".to_string(),
        results: base,
    }]);

    let run = service.run_query("SELECT id, name FROM items --large-dataset");
    let dataset = run.dataset.expect("matched dataset should exist");

    let ids: Vec<String> = dataset
        .rows()
        .iter()
        .take(5)
        .map(|r| Dataset::cell_text(r, "id"))
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(
        Dataset::cell_text(&dataset.rows()[3], "name"),
        "Item 1",
        "other columns should cycle the base rows"
    );
    assert_eq!(
        Dataset::cell_text(dataset.rows().last().expect("rows"), "id"),
        "1000"
    );
}

#[test]
fn sample_library_has_the_expected_shapes() {
    let samples = sample_queries();

    assert_eq!(samples.len(), 4);
    assert_eq!(samples[0].results.row_count(), 12);
    assert_eq!(samples[1].results.row_count(), 6);
    assert_eq!(samples[2].results.row_count(), 50);
    assert_eq!(samples[3].results.row_count(), 100);

    let again = sample_queries();
    assert_eq!(
        samples[3].results, again[3].results,
        "mock results should be deterministic"
    );
}

#[test]
fn filter_entries_searches_names_and_query_bodies() {
    let entries = vec![
        LibraryEntry {
            name: "Revenue Analysis".to_string(),
            description: String::new(),
            query: "SELECT revenue FROM orders".to_string(),
        },
        LibraryEntry {
            name: "Cohorts".to_string(),
            description: String::new(),
            query: "SELECT cohort_month FROM first_purchases".to_string(),
        },
    ];

    assert_eq!(filter_entries(&entries, "REVENUE").len(), 1);
    assert_eq!(filter_entries(&entries, "first_purchases").len(), 1);
    assert_eq!(filter_entries(&entries, "").len(), 2);
    assert!(filter_entries(&entries, "nothing").is_empty());
}

#[test]
fn saved_queries_round_trip_through_the_json_store() {
    let temp_dir = unique_test_dir("saved-queries");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let store = JsonQueryStore::new(temp_dir.join("saved_queries.json"));

    assert!(
        store.load().expect("missing file should load").is_empty(),
        "a missing store file should read as empty"
    );

    let queries = vec![SavedQuery {
        name: "Mine".to_string(),
        query: "SELECT 1".to_string(),
        saved_at: "2026-08-30T10:00:00+00:00".to_string(),
    }];
    store.save(&queries).expect("save should succeed");

    let loaded = store.load().expect("load should succeed");
    assert_eq!(loaded, queries);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn library_merges_samples_with_saved_queries() {
    let temp_dir = unique_test_dir("library");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let store = Arc::new(JsonQueryStore::new(temp_dir.join("saved_queries.json")));
    let service = LibraryService::new(store);
    let samples = sample_queries();

    service
        .save_query("Mine", "SELECT 1", "2026-08-30T10:00:00+00:00".to_string())
        .expect("save should succeed");

    let entries = service.entries(&samples).expect("entries should load");
    assert_eq!(entries.len(), samples.len() + 1);
    let saved = entries.last().expect("saved entry should be last");
    assert_eq!(saved.name, "Mine");
    assert_eq!(saved.description, "Custom saved query");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

struct RecordingSink {
    saved: Mutex<Option<(String, Vec<u8>)>>,
    clipboard: Mutex<Option<String>>,
    cancel: bool,
}

impl RecordingSink {
    fn new(cancel: bool) -> Self {
        Self {
            saved: Mutex::new(None),
            clipboard: Mutex::new(None),
            cancel,
        }
    }
}

impl ArtifactSink for RecordingSink {
    fn save_file(&self, default_name: &str, bytes: &[u8]) -> Result<SinkReceipt, SinkError> {
        if self.cancel {
            return Ok(SinkReceipt::Cancelled);
        }
        *self.saved.lock().expect("lock should not be poisoned") =
            Some((default_name.to_string(), bytes.to_vec()));
        Ok(SinkReceipt::Written(default_name.to_string()))
    }

    fn set_clipboard(&self, text: &str) -> Result<(), SinkError> {
        *self.clipboard.lock().expect("lock should not be poisoned") = Some(text.to_string());
        Ok(())
    }
}

#[test]
fn export_confirmations_name_the_format() {
    let sink = Arc::new(RecordingSink::new(false));
    let service = ExportService::new(sink.clone());
    let dataset = numbered_dataset(2);

    let message = service
        .export(&dataset, ExportFormat::Xlsx)
        .expect("export should succeed");
    assert_eq!(message, "Results exported to Excel!");

    let (name, bytes) = sink
        .saved
        .lock()
        .expect("lock should not be poisoned")
        .clone()
        .expect("sink should receive the artifact");
    assert_eq!(name, "query_results.xlsx");
    assert!(!bytes.is_empty());
}

#[test]
fn cancelled_export_reports_without_error() {
    let service = ExportService::new(Arc::new(RecordingSink::new(true)));
    let dataset = numbered_dataset(1);

    let message = service
        .export(&dataset, ExportFormat::Csv)
        .expect("cancellation is not an error");
    assert_eq!(message, "Export cancelled");
}

#[test]
fn copy_selected_sends_tsv_to_the_clipboard() {
    let sink = Arc::new(RecordingSink::new(false));
    let service = ExportService::new(sink.clone());
    let dataset = numbered_dataset(3);
    let selection: Selection = [1].into_iter().collect();

    let message = service
        .copy_selected(dataset.columns(), dataset.rows(), &selection)
        .expect("copy should succeed");
    assert_eq!(message, "Selected rows copied to clipboard!");

    let copied = sink
        .clipboard
        .lock()
        .expect("lock should not be poisoned")
        .clone()
        .expect("clipboard should receive text");
    assert_eq!(copied, "2\tItem 2");
}

#[test]
fn copy_text_confirms_query_copy() {
    let sink = Arc::new(RecordingSink::new(false));
    let service = ExportService::new(sink.clone());

    let message = service
        .copy_text("SELECT 1")
        .expect("copy should succeed");
    assert_eq!(message, "Query copied to clipboard!");
    assert_eq!(
        sink.clipboard
            .lock()
            .expect("lock should not be poisoned")
            .clone(),
        Some("SELECT 1".to_string())
    );
}
