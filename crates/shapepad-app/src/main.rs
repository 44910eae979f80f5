//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Shapepad");

    // Optional board preset (JSON) for the first page.
    let config = shapepad_app::AppConfig {
        preset: std::env::args_os().nth(1).map(std::path::PathBuf::from),
        ..shapepad_app::AppConfig::default()
    };
    pollster::block_on(shapepad_app::App::run_with_config(config));
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
