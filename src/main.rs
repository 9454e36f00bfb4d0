mod app;
mod data;
mod domain;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use crate::platform::desktop::paths::default_webview_data_dir;

fn main() {
    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create webview data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("QueryDesk"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
