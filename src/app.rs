use std::sync::{Arc, Mutex};

use eframe::{egui, App, Frame};
use tracing::{debug, error};

use crate::config::Config;
use crate::display::{describe_error, DisplayState, TemperatureStyle};
use crate::error::WeatherError;
use crate::lookup::lookup_blocking;

const PROMPT_SIZE: f32 = 40.0;
const INPUT_SIZE: f32 = 40.0;
const BUTTON_SIZE: f32 = 30.0;
const TEMPERATURE_SIZE: f32 = 75.0;
const ERROR_SIZE: f32 = 30.0;
const EMOJI_SIZE: f32 = 100.0;
const DESCRIPTION_SIZE: f32 = 50.0;

pub struct WeatherApp {
    city_input: String,
    display: DisplayState,
    fetch_in_progress: Arc<Mutex<bool>>,
    fetch_result: Arc<Mutex<Option<DisplayState>>>,
}

impl Default for WeatherApp {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherApp {
    pub fn new() -> Self {
        Self {
            city_input: String::new(),
            display: DisplayState::default(),
            fetch_in_progress: Arc::new(Mutex::new(false)),
            fetch_result: Arc::new(Mutex::new(None)),
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn is_busy(&self) -> bool {
        self.fetch_in_progress.lock().map(|busy| *busy).unwrap_or(false)
    }

    /// Handles a button press. Blank input is rejected on the spot; anything
    /// else goes to a worker thread. Ignored while a request is in flight.
    pub fn submit(&mut self, ctx: &egui::Context) {
        if self.city_input.trim().is_empty() {
            self.display = describe_error(&WeatherError::EmptyInput);
            return;
        }

        {
            let Ok(mut in_progress) = self.fetch_in_progress.lock() else {
                return;
            };
            if *in_progress {
                debug!("Request already in flight; ignoring trigger");
                return;
            }
            *in_progress = true;
        }

        let city = self.city_input.clone();
        let result_slot = Arc::clone(&self.fetch_result);
        let in_progress = Arc::clone(&self.fetch_in_progress);
        let ctx = ctx.clone();

        let spawned = std::thread::Builder::new()
            .name("weather-fetch".to_string())
            .spawn(move || {
                let config = Config::load();
                let state = lookup_blocking(&city, &config);
                if let Ok(mut slot) = result_slot.lock() {
                    *slot = Some(state);
                }
                if let Ok(mut flag) = in_progress.lock() {
                    *flag = false;
                }
                ctx.request_repaint();
            });

        if let Err(e) = spawned {
            error!("Failed to spawn fetch thread: {}", e);
            if let Ok(mut flag) = self.fetch_in_progress.lock() {
                *flag = false;
            }
            self.display = describe_error(&WeatherError::OtherHttp {
                status: None,
                detail: format!("Could not start request: {}", e),
            });
        }
    }

    /// Moves a finished result into the visible state, all regions at once.
    pub fn poll_result(&mut self) -> bool {
        let finished = self.fetch_result.lock().ok().and_then(|mut slot| slot.take());
        match finished {
            Some(state) => {
                self.display = state;
                true
            }
            None => false,
        }
    }
}

impl App for WeatherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_result();
        let busy = self.is_busy();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Enter city name")
                        .size(PROMPT_SIZE)
                        .italics()
                        .strong(),
                );
                ui.add_space(10.0);

                let input = ui.add(
                    egui::TextEdit::singleline(&mut self.city_input)
                        .font(egui::FontId::proportional(INPUT_SIZE)),
                );
                let enter_pressed =
                    input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(10.0);
                let clicked = ui
                    .add_enabled(
                        !busy,
                        egui::Button::new(
                            egui::RichText::new("Get Weather").size(BUTTON_SIZE).strong(),
                        ),
                    )
                    .clicked();

                if (clicked || enter_pressed) && !busy {
                    self.submit(ctx);
                }

                ui.add_space(20.0);
                if self.is_busy() {
                    ui.spinner();
                }

                let temperature_size = match self.display.style {
                    TemperatureStyle::Reading => TEMPERATURE_SIZE,
                    TemperatureStyle::Error => ERROR_SIZE,
                };
                ui.label(egui::RichText::new(&self.display.temperature).size(temperature_size));
                ui.label(egui::RichText::new(&self.display.emoji).size(EMOJI_SIZE));
                ui.label(egui::RichText::new(&self.display.description).size(DESCRIPTION_SIZE));
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_submit_shows_validation_error_without_fetching() {
        let ctx = egui::Context::default();
        let mut app = WeatherApp::new();
        app.city_input = "   ".to_string();

        app.submit(&ctx);

        assert!(!app.is_busy());
        assert!(!app.poll_result());
        assert_eq!(app.display().temperature, "Input Error:\nPlease enter a city name.");
        assert!(app.display().is_error());
    }

    #[test]
    fn finished_result_replaces_whole_display() {
        let mut app = WeatherApp::new();
        app.display = DisplayState {
            temperature: "12°C".to_string(),
            emoji: "☁️".to_string(),
            description: "Overcast clouds".to_string(),
            style: TemperatureStyle::Reading,
        };
        let fresh = describe_error(&WeatherError::Unauthorized);
        *app.fetch_result.lock().unwrap() = Some(fresh.clone());

        assert!(app.poll_result());
        assert_eq!(app.display(), &fresh);
        assert!(!app.poll_result());
    }

    #[test]
    fn trigger_is_ignored_while_busy() {
        let ctx = egui::Context::default();
        let mut app = WeatherApp::new();
        app.city_input = "London".to_string();
        *app.fetch_in_progress.lock().unwrap() = true;

        app.submit(&ctx);

        assert!(app.is_busy());
        assert!(!app.poll_result());
        assert_eq!(app.display(), &DisplayState::default());
    }
}
