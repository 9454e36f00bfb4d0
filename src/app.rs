use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use dioxus::prelude::*;

use crate::data::sample_queries::sample_queries;
use crate::domain::entities::chart::{project, ChartKind, ChartProjection};
use crate::domain::entities::dataset::{render_number, Dataset};
use crate::domain::entities::query::{filter_entries, HistoryEntry, LibraryEntry};
use crate::domain::entities::view::{
    entries_summary, paginate, sort_rows, SortDirection, ViewState, PAGE_SIZES,
};
use crate::infra::sink::desktop::DesktopSink;
use crate::infra::store::saved_queries::JsonQueryStore;
use crate::ui::state::app_state::{AppState, ResultsMode};
use crate::usecase::services::export_service::{ExportFormat, ExportService};
use crate::usecase::services::library_service::LibraryService;
use crate::usecase::services::query_service::QueryService;

const SIDEBAR_MIN_WIDTH: f64 = 200.0;
const SIDEBAR_MAX_WIDTH: f64 = 520.0;
const SIMULATED_QUERY_DELAY_MS: u64 = 500;

fn surface_colors(dark: bool) -> (&'static str, &'static str, &'static str) {
    if dark {
        ("#1f2937", "#f9fafb", "#374151")
    } else {
        ("#ffffff", "#1f2937", "#d1d5db")
    }
}

fn panel_style(dark: bool) -> String {
    let (background, color, border) = surface_colors(dark);
    format!(
        "background: {background}; color: {color}; border: 1px solid {border}; \
         border-radius: 6px; padding: 12px; display: flex; flex-direction: column; gap: 8px;"
    )
}

fn button_style(dark: bool) -> String {
    let (background, color, border) = surface_colors(dark);
    format!(
        "background: {background}; color: {color}; border: 1px solid {border}; \
         border-radius: 4px; padding: 4px 10px; cursor: pointer;"
    )
}

fn active_button_style(dark: bool) -> String {
    let color = if dark { "#f9fafb" } else { "#ffffff" };
    format!(
        "background: #2563eb; color: {color}; border: 1px solid #2563eb; \
         border-radius: 4px; padding: 4px 10px; cursor: pointer;"
    )
}

#[component]
pub fn App() -> Element {
    let AppState {
        mut editor_text,
        mut results,
        mut view,
        results_mode,
        chart_kind,
        mut library,
        library_search,
        mut history,
        mut show_history,
        mut dark_mode,
        mut busy,
        mut status,
        mut execution_ms,
        show_export_menu,
        mut show_save_prompt,
        mut save_name,
        mut sidebar_width,
        mut resizing_sidebar,
    } = AppState::new();

    let store = match JsonQueryStore::at_default_location() {
        Ok(store) => store,
        Err(err) => {
            return rsx! {
                div {
                    p { "Failed to resolve the saved-query location: {err}" }
                }
            };
        }
    };
    let query_service = Arc::new(QueryService::new(sample_queries()));
    let library_service = Arc::new(LibraryService::new(Arc::new(store)));

    let query_service_for_init = query_service.clone();
    let library_service_for_init = library_service.clone();
    use_effect(move || {
        match library_service_for_init.entries(query_service_for_init.library()) {
            Ok(entries) => {
                *library.write() = entries;
            }
            Err(err) => {
                *status.write() = format!("Failed to load saved queries: {err}");
            }
        }
        // A fresh session opens on the first canned query and its result.
        if let Some(first) = query_service_for_init.library().first() {
            *editor_text.write() = first.query.clone();
            *results.write() = Some(first.results.clone());
            *view.write() = ViewState::new();
        }
    });

    let query_service_for_run = query_service.clone();
    let run_query = move |_: ()| {
        if busy() {
            return;
        }
        let query_text = editor_text();
        *busy.write() = true;
        let query_service = query_service_for_run.clone();
        spawn(async move {
            let started = Instant::now();
            // A timer stands in for a real database round trip.
            tokio::time::sleep(Duration::from_millis(SIMULATED_QUERY_DELAY_MS)).await;
            let run = query_service.run_query(&query_text);
            let row_count = run.dataset.as_ref().map_or(0, Dataset::row_count);
            let has_dataset = run.dataset.is_some();

            *results.write() = run.dataset;
            // A new dataset replaces sort, page and selection wholesale.
            *view.write() = ViewState::new();
            *execution_ms.write() = Some(started.elapsed().as_millis() as u64);

            let mut entries = history();
            entries.insert(
                0,
                HistoryEntry {
                    query: query_text,
                    timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                    row_count,
                },
            );
            *history.write() = entries;

            *status.write() = match run.matched {
                Some(name) => format!("Executed \"{name}\""),
                None if has_dataset => {
                    "No matching query in the library; showing the default sample".to_string()
                }
                None => "Query library is empty".to_string(),
            };
            *busy.write() = false;
        });
    };

    let library_service_for_save = library_service.clone();
    let query_service_for_save = query_service.clone();
    let save_current_query = move |_| {
        let name = save_name();
        let name = name.trim();
        if name.is_empty() {
            *status.write() = "Please enter a name for your query".to_string();
            return;
        }
        let saved_at = Local::now().to_rfc3339();
        match library_service_for_save.save_query(name, &editor_text(), saved_at) {
            Ok(()) => {
                match library_service_for_save.entries(query_service_for_save.library()) {
                    Ok(entries) => *library.write() = entries,
                    Err(err) => *status.write() = format!("Failed to reload saved queries: {err}"),
                }
                *status.write() = format!("Query saved as \"{name}\"");
                show_save_prompt.set(false);
                save_name.set(String::new());
            }
            Err(err) => {
                *status.write() = format!("Failed to save query: {err}");
            }
        }
    };

    let (background, color, _) = surface_colors(dark_mode());

    rsx! {
        div {
            style: "display: flex; flex-direction: column; height: 100vh; overflow: hidden; \
                    font-family: 'Segoe UI', 'Helvetica Neue', sans-serif; \
                    background: {background}; color: {color};",
            // The drag listeners live on the root so the handle keeps tracking
            // the pointer even when it leaves the 5px strip.
            onmousemove: move |event| {
                if resizing_sidebar() {
                    let x = event.client_coordinates().x;
                    sidebar_width.set(x.clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH));
                }
            },
            onmouseup: move |_| {
                resizing_sidebar.set(false);
            },

            header {
                style: "display: flex; justify-content: space-between; align-items: center; \
                        padding: 10px 16px; border-bottom: 1px solid #4b5563;",
                div {
                    h1 { style: "margin: 0; font-size: 18px;", "QueryDesk" }
                    p { style: "margin: 0; font-size: 12px; opacity: 0.7;", "SQL query workbench" }
                }
                div {
                    style: "display: flex; gap: 8px;",
                    button {
                        style: button_style(dark_mode()),
                        onclick: move |_| show_history.set(!show_history()),
                        "History"
                    }
                    button {
                        style: button_style(dark_mode()),
                        onclick: move |_| dark_mode.set(!dark_mode()),
                        if dark_mode() { "Light Theme" } else { "Dark Theme" }
                    }
                }
            }

            main {
                style: "display: flex; flex: 1; min-height: 0;",
                div {
                    style: "width: {sidebar_width}px; min-width: {SIDEBAR_MIN_WIDTH}px; \
                            overflow-y: auto; padding: 12px;",
                    SavedQueriesPanel {
                        library,
                        library_search,
                        dark: dark_mode(),
                        on_select: move |query: String| {
                            editor_text.set(query);
                        },
                    }
                }
                div {
                    style: "width: 5px; cursor: col-resize; background: #6b7280;",
                    onmousedown: move |event| {
                        event.prevent_default();
                        resizing_sidebar.set(true);
                    },
                }
                div {
                    style: "flex: 1; display: flex; flex-direction: column; gap: 12px; \
                            padding: 12px; min-width: 0; overflow-y: auto;",
                    EditorPanel {
                        editor_text,
                        busy,
                        status,
                        dark: dark_mode(),
                        on_execute: run_query,
                        on_save: move |_| show_save_prompt.set(true),
                    }
                    if show_history() {
                        QueryHistoryPanel {
                            history,
                            dark: dark_mode(),
                            on_select: move |query: String| {
                                editor_text.set(query);
                            },
                        }
                    }
                    ResultsPanel {
                        results,
                        view,
                        results_mode,
                        chart_kind,
                        show_export_menu,
                        busy,
                        status,
                        execution_ms,
                        dark: dark_mode(),
                    }
                }
            }

            footer {
                style: "padding: 6px 16px; font-size: 12px; border-top: 1px solid #4b5563;",
                "{status}"
            }

            if show_save_prompt() {
                div {
                    style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); \
                            display: flex; align-items: center; justify-content: center; z-index: 1200;",
                    div {
                        style: panel_style(dark_mode()) + " min-width: 320px;",
                        h3 { style: "margin: 0;", "Save Query" }
                        input {
                            r#type: "text",
                            placeholder: "Enter query name",
                            value: "{save_name}",
                            oninput: move |event| save_name.set(event.value()),
                        }
                        div {
                            style: "display: flex; justify-content: flex-end; gap: 8px;",
                            button {
                                style: button_style(dark_mode()),
                                onclick: move |_| {
                                    show_save_prompt.set(false);
                                    save_name.set(String::new());
                                },
                                "Cancel"
                            }
                            button {
                                style: active_button_style(dark_mode()),
                                onclick: save_current_query,
                                "Save"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SavedQueriesPanel(
    library: Signal<Vec<LibraryEntry>>,
    mut library_search: Signal<String>,
    dark: bool,
    on_select: EventHandler<String>,
) -> Element {
    let entries = filter_entries(&library(), &library_search());

    rsx! {
        div {
            style: panel_style(dark),
            h2 { style: "margin: 0; font-size: 15px;", "Saved Queries" }
            input {
                r#type: "text",
                placeholder: "Search queries...",
                value: "{library_search}",
                oninput: move |event| library_search.set(event.value()),
            }
            div {
                style: "display: flex; flex-direction: column; gap: 6px;",
                {entries.into_iter().map(|entry| {
                    let query = entry.query.clone();
                    rsx! {
                        div {
                            key: "{entry.name}",
                            style: "padding: 6px; border: 1px solid #9ca3af; border-radius: 4px; cursor: pointer;",
                            onclick: move |_| on_select.call(query.clone()),
                            div { style: "font-weight: 600; font-size: 13px;", "{entry.name}" }
                            div { style: "font-size: 11px; opacity: 0.7;", "{entry.description}" }
                        }
                    }
                })}
            }
            div {
                style: "font-size: 11px; opacity: 0.8;",
                h3 { style: "margin: 8px 0 4px; font-size: 13px;", "Tips" }
                ul {
                    style: "margin: 0; padding-left: 16px;",
                    li { "Execute with Ctrl+Enter" }
                    li { "Append --large-dataset for 1000 rows" }
                    li { "Append --huge-dataset for 10,000 rows" }
                    li { "Drag the handle to resize this panel" }
                }
            }
        }
    }
}

#[component]
fn QueryHistoryPanel(
    history: Signal<Vec<HistoryEntry>>,
    dark: bool,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            style: panel_style(dark),
            h2 { style: "margin: 0; font-size: 15px;", "Query History" }
            if history().is_empty() {
                div { style: "font-size: 12px; opacity: 0.7;", "No queries executed yet" }
            } else {
                div {
                    style: "display: flex; flex-direction: column; gap: 4px; max-height: 160px; overflow-y: auto;",
                    {history().into_iter().enumerate().map(|(index, entry)| {
                        let query = entry.query.clone();
                        rsx! {
                            div {
                                key: "{index}",
                                style: "padding: 4px 6px; border: 1px solid #9ca3af; border-radius: 4px; cursor: pointer;",
                                onclick: move |_| on_select.call(query.clone()),
                                div {
                                    style: "font-family: monospace; font-size: 11px; white-space: nowrap; \
                                            overflow: hidden; text-overflow: ellipsis;",
                                    "{entry.query}"
                                }
                                div {
                                    style: "display: flex; justify-content: space-between; font-size: 10px; opacity: 0.7;",
                                    span { "{entry.timestamp}" }
                                    span { "{entry.row_count} rows" }
                                }
                            }
                        }
                    })}
                }
            }
        }
    }
}

#[component]
fn EditorPanel(
    mut editor_text: Signal<String>,
    busy: Signal<bool>,
    mut status: Signal<String>,
    dark: bool,
    on_execute: EventHandler<()>,
    on_save: EventHandler<()>,
) -> Element {
    let export_service = Arc::new(ExportService::new(Arc::new(DesktopSink::new())));

    rsx! {
        div {
            style: panel_style(dark),
            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                h2 { style: "margin: 0; font-size: 15px;", "Query Editor" }
                div {
                    style: "display: flex; gap: 8px;",
                    button {
                        style: button_style(dark),
                        onclick: move |_| {
                            match export_service.copy_text(&editor_text()) {
                                Ok(message) => *status.write() = message,
                                Err(err) => *status.write() = format!("Copy failed: {err}"),
                            }
                        },
                        "Copy"
                    }
                    button {
                        style: button_style(dark),
                        onclick: move |_| on_save.call(()),
                        "Save"
                    }
                }
            }
            textarea {
                style: "width: 100%; min-height: 140px; resize: vertical; font-family: monospace; \
                        font-size: 13px; box-sizing: border-box;",
                value: "{editor_text}",
                oninput: move |event| editor_text.set(event.value()),
                onkeydown: move |event| {
                    if event.key() == Key::Enter && event.modifiers().contains(Modifiers::CONTROL) {
                        event.prevent_default();
                        on_execute.call(());
                    }
                },
            }
            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                button {
                    style: active_button_style(dark),
                    disabled: busy(),
                    onclick: move |_| on_execute.call(()),
                    if busy() { "Executing..." } else { "Execute Query" }
                }
                span {
                    style: "font-size: 11px; opacity: 0.7;",
                    "Ctrl+Enter to execute"
                }
            }
        }
    }
}

#[component]
fn ResultsPanel(
    results: Signal<Option<Dataset>>,
    mut view: Signal<ViewState>,
    mut results_mode: Signal<ResultsMode>,
    mut chart_kind: Signal<ChartKind>,
    mut show_export_menu: Signal<bool>,
    busy: Signal<bool>,
    mut status: Signal<String>,
    execution_ms: Signal<Option<u64>>,
    dark: bool,
) -> Element {
    // While the simulated execution runs the table is suppressed entirely.
    if busy() {
        return rsx! {
            div {
                style: panel_style(dark),
                "Executing query..."
            }
        };
    }

    let Some(dataset) = results() else {
        return rsx! {
            div {
                style: panel_style(dark),
                "Run a query to see results"
            }
        };
    };

    let export_service = Arc::new(ExportService::new(Arc::new(DesktopSink::new())));

    let state = view();
    let row_count = dataset.row_count();
    let sorted = sort_rows(dataset.rows(), &state.sort);
    let page_view = paginate(&sorted, &state.page);
    let page_rows = Arc::new(page_view.page_rows);
    let page_row_count = page_rows.len();
    let display_pages = state.page.display_pages(row_count);
    let summary = entries_summary(&state.page, row_count);
    let all_selected = page_row_count > 0 && state.all_selected(page_row_count);
    let columns = Arc::new(dataset.columns().to_vec());

    let export_service_for_copy = export_service.clone();
    let columns_for_copy = columns.clone();
    let page_rows_for_copy = page_rows.clone();
    let dataset_for_export = dataset.clone();

    rsx! {
        div {
            style: panel_style(dark),
            div {
                style: "display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 8px;",
                div {
                    h2 { style: "margin: 0; font-size: 15px;", "Query Results" }
                    if let Some(ms) = execution_ms() {
                        span { style: "font-size: 11px; opacity: 0.7;", "Execution time: {ms}ms" }
                    }
                }
                div {
                    style: "display: flex; gap: 8px; align-items: center; flex-wrap: wrap;",
                    button {
                        style: if results_mode() == ResultsMode::Table { active_button_style(dark) } else { button_style(dark) },
                        onclick: move |_| results_mode.set(ResultsMode::Table),
                        "Table"
                    }
                    button {
                        style: if results_mode() == ResultsMode::Chart { active_button_style(dark) } else { button_style(dark) },
                        onclick: move |_| results_mode.set(ResultsMode::Chart),
                        "Chart"
                    }
                    if results_mode() == ResultsMode::Chart {
                        button {
                            style: if chart_kind() == ChartKind::Bar { active_button_style(dark) } else { button_style(dark) },
                            onclick: move |_| chart_kind.set(ChartKind::Bar),
                            "Bar"
                        }
                        button {
                            style: if chart_kind() == ChartKind::Line { active_button_style(dark) } else { button_style(dark) },
                            onclick: move |_| chart_kind.set(ChartKind::Line),
                            "Line"
                        }
                    }
                    button {
                        style: button_style(dark),
                        disabled: state.selection.is_empty(),
                        onclick: move |_| {
                            let selection = view().selection;
                            match export_service_for_copy.copy_selected(
                                &columns_for_copy,
                                &page_rows_for_copy,
                                &selection,
                            ) {
                                Ok(message) => *status.write() = message,
                                Err(err) => *status.write() = format!("Copy failed: {err}"),
                            }
                        },
                        "Copy Selected"
                    }
                    div {
                        style: "position: relative;",
                        button {
                            style: button_style(dark),
                            onclick: move |_| show_export_menu.set(!show_export_menu()),
                            "Export"
                        }
                        if show_export_menu() {
                            div {
                                style: panel_style(dark)
                                    + " position: absolute; right: 0; top: 32px; z-index: 1100; min-width: 150px;",
                                {ExportFormat::ALL.iter().map(|format| {
                                    let format = *format;
                                    let label = format.label();
                                    let export_service = export_service.clone();
                                    let dataset = dataset_for_export.clone();
                                    rsx! {
                                        button {
                                            key: "{label}",
                                            style: button_style(dark),
                                            onclick: move |_| {
                                                show_export_menu.set(false);
                                                match export_service.export(&dataset, format) {
                                                    Ok(message) => *status.write() = message,
                                                    Err(err) => *status.write() = format!("Export failed: {err}"),
                                                }
                                            },
                                            "Export as {label}"
                                        }
                                    }
                                })}
                            }
                        }
                    }
                    select {
                        value: "{state.page.page_size}",
                        onchange: move |event| {
                            if let Ok(size) = event.value().parse::<usize>() {
                                view.set(view().set_page_size(size));
                            }
                        },
                        {PAGE_SIZES.iter().map(|size| rsx! {
                            option { key: "{size}", value: "{size}", "{size} rows" }
                        })}
                    }
                    span { style: "font-size: 12px; opacity: 0.7;", "{row_count} rows" }
                }
            }

            if results_mode() == ResultsMode::Chart {
                ChartView {
                    projection: project(&dataset),
                    kind: chart_kind(),
                    dark,
                }
            } else {
                div {
                    style: "overflow: auto; max-height: 420px;",
                    table {
                        style: "border-collapse: collapse; width: 100%; font-size: 12px;",
                        thead {
                            tr {
                                th {
                                    style: "border: 1px solid #9ca3af; padding: 4px; width: 28px;",
                                    input {
                                        r#type: "checkbox",
                                        checked: all_selected,
                                        onclick: move |_| {
                                            let current = view();
                                            let next = if current.all_selected(page_row_count) {
                                                current.clear_selection()
                                            } else {
                                                current.select_all(page_row_count)
                                            };
                                            view.set(next);
                                        },
                                    }
                                }
                                {columns.iter().map(|column| {
                                    let column = column.clone();
                                    let label = column.clone();
                                    let indicator = match &state.sort.key {
                                        Some(key) if *key == column => match state.sort.direction {
                                            SortDirection::Ascending => " \u{2191}",
                                            SortDirection::Descending => " \u{2193}",
                                        },
                                        _ => "",
                                    };
                                    rsx! {
                                        th {
                                            key: "{label}",
                                            style: "border: 1px solid #9ca3af; padding: 4px; \
                                                    text-align: left; cursor: pointer; white-space: nowrap;",
                                            onclick: move |_| {
                                                view.set(view().sort_by(&column));
                                            },
                                            "{label}{indicator}"
                                        }
                                    }
                                })}
                            }
                        }
                        tbody {
                            {page_rows.iter().enumerate().map(|(position, row)| {
                                let selected = state.selection.contains(&position);
                                let row_background = if selected { "background: rgba(37, 99, 235, 0.25);" } else { "" };
                                let cells: Vec<String> = columns
                                    .iter()
                                    .map(|column| Dataset::cell_text(row, column))
                                    .collect();
                                rsx! {
                                    tr {
                                        key: "{position}",
                                        style: "{row_background}",
                                        onclick: move |_| {
                                            view.set(view().toggle_row(position));
                                        },
                                        td {
                                            style: "border: 1px solid #9ca3af; padding: 4px; text-align: center;",
                                            input {
                                                r#type: "checkbox",
                                                checked: selected,
                                                onclick: move |event| {
                                                    event.stop_propagation();
                                                    view.set(view().toggle_row(position));
                                                },
                                            }
                                        }
                                        {cells.into_iter().enumerate().map(|(cell_index, text)| rsx! {
                                            td {
                                                key: "{cell_index}",
                                                style: "border: 1px solid #9ca3af; padding: 4px; white-space: nowrap;",
                                                "{text}"
                                            }
                                        })}
                                    }
                                }
                            })}
                        }
                    }
                }
                div {
                    style: "display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 8px;",
                    div {
                        style: "display: flex; gap: 6px; align-items: center;",
                        button {
                            style: button_style(dark),
                            disabled: view().on_first_page(),
                            onclick: move |_| view.set(view().go_first(row_count)),
                            "\u{27EA}"
                        }
                        button {
                            style: button_style(dark),
                            disabled: view().on_first_page(),
                            onclick: move |_| view.set(view().go_previous(row_count)),
                            "\u{27E8}"
                        }
                        span {
                            style: "font-size: 12px;",
                            "Page {state.page.current_page} of {display_pages}"
                        }
                        button {
                            style: button_style(dark),
                            disabled: view().on_last_page(row_count),
                            onclick: move |_| view.set(view().go_next(row_count)),
                            "\u{27E9}"
                        }
                        button {
                            style: button_style(dark),
                            disabled: view().on_last_page(row_count),
                            onclick: move |_| view.set(view().go_last(row_count)),
                            "\u{27EB}"
                        }
                    }
                    span { style: "font-size: 12px; opacity: 0.8;", "{summary}" }
                }
            }
        }
    }
}

const CHART_WIDTH: f64 = 860.0;
const CHART_HEIGHT: f64 = 320.0;
const CHART_MARGIN_LEFT: f64 = 50.0;
const CHART_MARGIN_RIGHT: f64 = 20.0;
const CHART_MARGIN_TOP: f64 = 20.0;
const CHART_MARGIN_BOTTOM: f64 = 40.0;

/// Bar heights never go below the baseline; negative values draw as zero
/// so the rect stays a valid SVG shape.
pub(crate) fn bar_height(value: f64, max_value: f64, plot_height: f64) -> f64 {
    (plot_height * value / max_value).max(0.0)
}

#[component]
fn ChartView(projection: ChartProjection, kind: ChartKind, dark: bool) -> Element {
    if projection.series.is_empty() || projection.points.is_empty() {
        return rsx! {
            div {
                style: "padding: 24px; text-align: center; opacity: 0.7;",
                "No numeric columns to chart"
            }
        };
    }

    let plot_width = CHART_WIDTH - CHART_MARGIN_LEFT - CHART_MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - CHART_MARGIN_TOP - CHART_MARGIN_BOTTOM;
    let point_count = projection.points.len();
    let series_count = projection.series.len();

    let max_value = projection
        .points
        .iter()
        .flat_map(|point| point.values.iter().copied())
        .fold(f64::MIN, f64::max)
        .max(1.0);

    let axis_color = if dark { "#9ca3af" } else { "#4b5563" };
    let group_width = plot_width / point_count as f64;
    let label_step = point_count.div_ceil(12).max(1);
    let baseline = CHART_MARGIN_TOP + plot_height;
    let x_axis_end = CHART_MARGIN_LEFT + plot_width;
    let y_zero_label_x = CHART_MARGIN_LEFT - 6.0;
    let y_max_label_y = CHART_MARGIN_TOP + 4.0;

    let bars: Vec<(f64, f64, f64, f64, String)> = if kind == ChartKind::Bar {
        let bar_width = group_width / (series_count + 1) as f64;
        projection
            .points
            .iter()
            .enumerate()
            .flat_map(|(point_index, point)| {
                let series = &projection.series;
                point
                    .values
                    .iter()
                    .enumerate()
                    .map(move |(series_index, value)| {
                        let height = bar_height(*value, max_value, plot_height);
                        let x = CHART_MARGIN_LEFT
                            + point_index as f64 * group_width
                            + (series_index as f64 + 0.5) * bar_width;
                        (x, baseline - height, bar_width, height, series[series_index].color())
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    } else {
        Vec::new()
    };

    let lines: Vec<(String, String)> = if kind == ChartKind::Line {
        projection
            .series
            .iter()
            .enumerate()
            .map(|(series_index, series)| {
                let path = projection
                    .points
                    .iter()
                    .enumerate()
                    .map(|(point_index, point)| {
                        let x = CHART_MARGIN_LEFT + (point_index as f64 + 0.5) * group_width;
                        let y = baseline - plot_height * point.values[series_index] / max_value;
                        format!("{x:.1},{y:.1}")
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                (path, series.color())
            })
            .collect()
    } else {
        Vec::new()
    };

    let max_label = render_number(max_value);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; overflow-x: auto;",
            svg {
                width: "{CHART_WIDTH}",
                height: "{CHART_HEIGHT}",
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                line {
                    x1: "{CHART_MARGIN_LEFT}",
                    y1: "{CHART_MARGIN_TOP}",
                    x2: "{CHART_MARGIN_LEFT}",
                    y2: "{baseline}",
                    stroke: "{axis_color}",
                }
                line {
                    x1: "{CHART_MARGIN_LEFT}",
                    y1: "{baseline}",
                    x2: "{x_axis_end}",
                    y2: "{baseline}",
                    stroke: "{axis_color}",
                }
                text {
                    x: "{y_zero_label_x}",
                    y: "{y_max_label_y}",
                    text_anchor: "end",
                    font_size: "9",
                    fill: "{axis_color}",
                    "{max_label}"
                }
                text {
                    x: "{y_zero_label_x}",
                    y: "{baseline}",
                    text_anchor: "end",
                    font_size: "9",
                    fill: "{axis_color}",
                    "0"
                }
                {bars.iter().enumerate().map(|(index, (x, y, width, height, color))| rsx! {
                    rect {
                        key: "{index}",
                        x: "{x:.1}",
                        y: "{y:.1}",
                        width: "{width:.1}",
                        height: "{height:.1}",
                        fill: "{color}",
                    }
                })}
                {lines.iter().enumerate().map(|(index, (points, color))| rsx! {
                    polyline {
                        key: "{index}",
                        points: "{points}",
                        fill: "none",
                        stroke: "{color}",
                        stroke_width: "2",
                    }
                })}
                {projection.points.iter().enumerate().step_by(label_step).map(|(point_index, point)| {
                    let x = CHART_MARGIN_LEFT + (point_index as f64 + 0.5) * group_width;
                    let y = baseline + 14.0;
                    rsx! {
                        text {
                            key: "{point_index}",
                            x: "{x:.1}",
                            y: "{y:.1}",
                            text_anchor: "middle",
                            font_size: "9",
                            fill: "{axis_color}",
                            "{point.category}"
                        }
                    }
                })}
            }
            div {
                style: "display: flex; gap: 12px; flex-wrap: wrap; font-size: 12px;",
                {projection.series.iter().map(|series| {
                    let swatch = series.color();
                    rsx! {
                        span {
                            key: "{series.column}",
                            style: "display: inline-flex; align-items: center; gap: 4px;",
                            span {
                                style: "width: 10px; height: 10px; display: inline-block; background: {swatch};",
                            }
                            "{series.column}"
                        }
                    }
                })}
            }
        }
    }
}
