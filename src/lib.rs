pub mod app;
pub mod condition;
pub mod config;
pub mod display;
pub mod error;
pub mod lookup;
pub mod weather;

pub use app::WeatherApp;
pub use condition::{condition_emoji, Condition};
pub use config::Config;
pub use display::{describe, describe_error, DisplayState, TemperatureStyle};
pub use error::{ErrorKind, WeatherError};
pub use lookup::lookup;
pub use weather::{WeatherClient, WeatherReading};

pub fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(520.0, 640.0)),
        ..Default::default()
    };

    tracing::info!("Starting egui application");
    eframe::run_native(
        "Weather App",
        native_options,
        Box::new(|_cc| Box::new(WeatherApp::new())),
    )?;

    Ok(())
}
