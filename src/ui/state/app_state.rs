use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::chart::ChartKind;
use crate::domain::entities::dataset::Dataset;
use crate::domain::entities::query::{HistoryEntry, LibraryEntry};
use crate::domain::entities::view::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsMode {
    Table,
    Chart,
}

pub struct AppState {
    pub editor_text: Signal<String>,
    pub results: Signal<Option<Dataset>>,
    pub view: Signal<ViewState>,
    pub results_mode: Signal<ResultsMode>,
    pub chart_kind: Signal<ChartKind>,
    pub library: Signal<Vec<LibraryEntry>>,
    pub library_search: Signal<String>,
    pub history: Signal<Vec<HistoryEntry>>,
    pub show_history: Signal<bool>,
    pub dark_mode: Signal<bool>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub execution_ms: Signal<Option<u64>>,
    pub show_export_menu: Signal<bool>,
    pub show_save_prompt: Signal<bool>,
    pub save_name: Signal<String>,
    pub sidebar_width: Signal<f64>,
    pub resizing_sidebar: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            editor_text: use_signal(String::new),
            results: use_signal(|| None::<Dataset>),
            view: use_signal(ViewState::new),
            results_mode: use_signal(|| ResultsMode::Table),
            chart_kind: use_signal(|| ChartKind::Bar),
            library: use_signal(Vec::<LibraryEntry>::new),
            library_search: use_signal(String::new),
            history: use_signal(Vec::<HistoryEntry>::new),
            show_history: use_signal(|| false),
            dark_mode: use_signal(|| false),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
            execution_ms: use_signal(|| None::<u64>),
            show_export_menu: use_signal(|| false),
            show_save_prompt: use_signal(|| false),
            save_name: use_signal(String::new),
            sidebar_width: use_signal(|| 300.0_f64),
            resizing_sidebar: use_signal(|| false),
        }
    }
}
