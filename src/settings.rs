use std::path::PathBuf;

use iced::widget::{button, column, container, text, text_input};
use iced::{Alignment, Element, Length};
use serde::{Deserialize, Serialize};

use crate::catalog::{ACCENT_AMBER, BACKGROUND_DARK, ERROR_RED, SURFACE_GRAY, TEXT_GRAY, TEXT_WHITE};
use crate::tmdb::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    pub api_key: String,
    #[serde(default)]
    pub base_url: String,
    pub language: String,
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("cinedex")
                .join("config.json")
        })
    }

    /// Environment variables win over the config file, so a key exported in
    /// the shell works without a first-run setup pass.
    pub fn load() -> Option<Self> {
        let mut settings = Self::load_file().unwrap_or_default();
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            settings.api_key = key;
        }
        if let Ok(base_url) = std::env::var("TMDB_BASE_URL") {
            settings.base_url = base_url;
        }
        settings.is_valid().then_some(settings)
    }

    fn load_file() -> Option<Self> {
        let path = Self::config_path()?;
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path().ok_or("Could not determine config path")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())
    }

    pub fn is_valid(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn base_url(&self) -> &str {
        if self.base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            self.base_url.trim()
        }
    }
}

#[derive(Debug, Clone)]
pub enum SetupMessage {
    ApiKeyChanged(String),
    BaseUrlChanged(String),
    LanguageChanged(String),
    Submit,
}

#[derive(Default)]
pub struct SetupPage {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub error: Option<String>,
}

impl SetupPage {
    pub fn update(&mut self, message: SetupMessage) -> Option<AppSettings> {
        match message {
            SetupMessage::ApiKeyChanged(key) => {
                self.api_key = key;
                self.error = None;
                None
            }
            SetupMessage::BaseUrlChanged(url) => {
                self.base_url = url;
                None
            }
            SetupMessage::LanguageChanged(lang) => {
                self.language = lang;
                None
            }
            SetupMessage::Submit => match self.settings() {
                Ok(settings) => {
                    if let Err(e) = settings.save() {
                        self.error = Some(format!("Failed to save: {}", e));
                        return None;
                    }
                    Some(settings)
                }
                Err(message) => {
                    self.error = Some(message);
                    None
                }
            },
        }
    }

    /// Validates and normalizes the form into settings. The base URL is
    /// optional; an empty language falls back to `en-US`.
    fn settings(&self) -> Result<AppSettings, String> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(String::from("An API key is required"));
        }
        let language = match self.language.trim() {
            "" => "en-US",
            lang => lang,
        };
        Ok(AppSettings {
            api_key: String::from(api_key),
            base_url: String::from(self.base_url.trim()),
            language: String::from(language),
        })
    }

    pub fn view(&self) -> Element<'_, SetupMessage> {
        let heading = column![
            text("CINEDEX").size(40).color(ACCENT_AMBER).font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            }),
            text("Connect to TMDB to start browsing")
                .size(14)
                .color(TEXT_GRAY),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        let fields = column![
            labeled_input(
                "TMDB API key",
                "Paste your v3 API key",
                &self.api_key,
                SetupMessage::ApiKeyChanged,
            ),
            text("Free keys are issued at themoviedb.org/settings/api")
                .size(12)
                .color(TEXT_GRAY),
            labeled_input(
                "API base URL (optional)",
                DEFAULT_BASE_URL,
                &self.base_url,
                SetupMessage::BaseUrlChanged,
            ),
            labeled_input(
                "Language (optional)",
                "en-US",
                &self.language,
                SetupMessage::LanguageChanged,
            ),
        ]
        .spacing(16);

        let submit = button(
            container(text("Start browsing").size(15).color(BACKGROUND_DARK))
                .width(Length::Fill)
                .center_x(Length::Fill),
        )
        .width(Length::Fill)
        .padding(12)
        .style(|_theme, status| {
            let background = match status {
                button::Status::Hovered => iced::Color::from_rgb(0.9, 0.65, 0.1),
                _ => ACCENT_AMBER,
            };
            button::Style {
                background: Some(iced::Background::Color(background)),
                text_color: BACKGROUND_DARK,
                border: iced::Border::default().rounded(8),
                ..Default::default()
            }
        })
        .on_press(SetupMessage::Submit);

        let mut card = column![heading, fields].spacing(28);
        if let Some(ref error) = self.error {
            card = card.push(text(error.clone()).size(13).color(ERROR_RED));
        }
        card = card.push(submit);

        let framed = container(card)
            .width(Length::Fixed(440.0))
            .padding(36)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_GRAY)),
                border: iced::Border::default().rounded(12),
                ..Default::default()
            });

        container(framed)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_DARK)),
                ..Default::default()
            })
            .into()
    }
}

fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: fn(String) -> SetupMessage,
) -> Element<'a, SetupMessage> {
    column![
        text(label).size(13).color(TEXT_WHITE),
        text_input(placeholder, value)
            .on_input(on_input)
            .on_submit(SetupMessage::Submit)
            .padding(10)
            .size(14)
            .width(Length::Fill),
    ]
    .spacing(6)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitting_without_a_key_sets_an_error_and_saves_nothing() {
        let mut page = SetupPage::default();
        let result = page.update(SetupMessage::Submit);
        assert!(result.is_none());
        assert!(page.error.is_some());
    }

    #[test]
    fn form_values_are_trimmed_and_defaulted() {
        let page = SetupPage {
            api_key: String::from("  abc123  "),
            base_url: String::from(" http://proxy.local/3 "),
            language: String::new(),
            error: None,
        };
        let settings = page.settings().unwrap();
        assert_eq!(settings.api_key, "abc123");
        assert_eq!(settings.base_url, "http://proxy.local/3");
        assert_eq!(settings.language, "en-US");
    }

    #[test]
    fn empty_base_url_falls_back_to_the_public_api() {
        let settings = AppSettings {
            api_key: String::from("abc123"),
            base_url: String::from("   "),
            language: String::from("en-US"),
        };
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn typing_a_key_clears_the_previous_error() {
        let mut page = SetupPage::default();
        page.update(SetupMessage::Submit);
        assert!(page.error.is_some());
        page.update(SetupMessage::ApiKeyChanged(String::from("abc")));
        assert!(page.error.is_none());
    }
}
