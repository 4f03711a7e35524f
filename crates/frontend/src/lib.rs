pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

/// Уровень логов задаётся при сборке: `PURCHASING_LOG_LEVEL=info trunk build`
fn log_level() -> log::Level {
    option_env!("PURCHASING_LOG_LEVEL")
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::Level::Debug)
}

#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(log_level());
    console_error_panic_hook::set_once();
    log::info!("purchasing frontend starting");

    leptos::mount::mount_to_body(app::App);
}
