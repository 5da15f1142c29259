//! Booking Widget
//!
//! Browser entry point: loads the embedded configuration, installs logging and starts
//! the booking widget on the current page.

use booking::config::BookingConfig;
use tracing::error;
use wasm_bindgen::JsValue;

mod bootstrap;
mod logging;
mod notifier;
mod storage;
mod surface;

const CONFIG_YAML: &str = include_str!("../booking.yml");

/// Main entry point
fn main() {
    console_error_panic_hook::set_once();

    let config = match BookingConfig::from_yaml(CONFIG_YAML) {
        Ok(config) => config,
        Err(error) => {
            web_sys::console::error_1(&JsValue::from(format!(
                "invalid booking configuration: {error}"
            )));
            return;
        }
    };

    if let Err(error) = logging::init_subscriber(&config.log_level) {
        web_sys::console::error_1(&JsValue::from(format!(
            "booking logging disabled: {error}"
        )));
    }

    if let Err(error) = bootstrap::run_when_ready(config) {
        error!(%error, "failed to start booking widget");
    }
}
