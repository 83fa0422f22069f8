#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod content;
mod gate;
mod logging;
mod motion;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let config = config::SiteConfig::from_env();
    for error in config::rejected_values(|name| std::env::var(name).ok()) {
        logging::log_event(
            config.log_level,
            logging::LogLevel::Warn,
            "config_value_rejected",
            serde_json::json!({ "error": error.to_string() }),
        );
    }
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
