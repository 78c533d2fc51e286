use rigquote_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => [
            format!("defaults.shop_location = {}", config.defaults.shop_location),
            format!("defaults.shipment_type = {}", config.defaults.shipment_type),
            format!("logging.level = {}", config.logging.level),
            format!("logging.format = {}", config.logging.format.as_str()),
        ]
        .join("\n"),
        Err(error) => format!("configuration error: {error}"),
    }
}
