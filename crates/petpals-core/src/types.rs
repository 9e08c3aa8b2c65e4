// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic position of a pet or of the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Where a pet's picture comes from.
///
/// Custom pets store `{ "uri": "..." }`; seed pets reference a bundled asset by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PetImage {
    Uri { uri: String },
    Asset(String),
}

impl PetImage {
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri { uri: uri.into() }
    }

    pub fn asset(name: impl Into<String>) -> Self {
        Self::Asset(name.into())
    }

    /// An image reference is usable only if it points somewhere
    pub fn is_present(&self) -> bool {
        match self {
            Self::Uri { uri } => !uri.trim().is_empty(),
            Self::Asset(name) => !name.trim().is_empty(),
        }
    }
}

/// A single adoptable pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    pub id: String,
    pub name: String,
    pub species: String,
    pub age: String,
    pub breed: String,
    pub description: String,
    pub image: PetImage,
    /// Only seed pets carry a location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    /// Only user-added pets carry a creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Species offered by the add-pet form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    #[default]
    Dog,
    Cat,
    Rabbit,
    Bird,
    Other,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Dog,
        Species::Cat,
        Species::Rabbit,
        Species::Bird,
        Species::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Rabbit => "Rabbit",
            Self::Bird => "Bird",
            Self::Other => "Other",
        }
    }

    /// Parse a species name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form input for a user-added pet, validated by `PetCatalog::add_pet`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetDraft {
    pub name: String,
    pub age: String,
    pub breed: String,
    pub description: String,
    pub species: Species,
    pub image: Option<PetImage>,
}

/// Colour scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Interface languages with bundled translations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
    Ms,
    Ta,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Zh, Language::Ms, Language::Ta];

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
            Self::Ms => "ms",
            Self::Ta => "ta",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "Chinese",
            Self::Ms => "Malay",
            Self::Ta => "Tamil",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

/// Application settings (GUI-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Colour scheme
    #[serde(default)]
    pub theme: Theme,
    /// Interface language
    #[serde(default)]
    pub language: Language,
    /// Show adoption notifications
    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,
}

fn default_notifications_enabled() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: Language::default(),
            notifications_enabled: default_notifications_enabled(),
        }
    }
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No favorites to choose from")]
    EmptySelection,

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl AppError {
    /// Text shown to the user when an operation fails
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::EmptySelection => "No favorites yet. Please favorite a pet first!".to_string(),
            Self::StorageRead(_) => "Could not load your data. Please try again.".to_string(),
            Self::StorageWrite(_) | Self::Serialization(_) => {
                "Could not save. Please try again.".to_string()
            }
            Self::PermissionDenied(what) => format!("Permission to access {} was denied", what),
            Self::Notification(_) => "Could not send notification.".to_string(),
        }
    }
}

/// Bare I/O failures come from creating or writing the storage file;
/// reads map their errors explicitly.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageWrite(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.language, Language::En);
        assert!(settings.notifications_enabled);
    }

    #[test]
    fn test_custom_pet_parses_stored_shape() {
        let json = r#"{
            "id": "0b6f",
            "name": "Buddy",
            "species": "Dog",
            "age": "2",
            "breed": "Beagle",
            "description": "Good boy",
            "image": { "uri": "file:///buddy.jpg" },
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let pet: PetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(pet.image, PetImage::uri("file:///buddy.jpg"));
        assert!(pet.location.is_none());
        assert!(pet.created_at.is_some());
    }

    #[test]
    fn test_theme_from_stored() {
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("purple"), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("ms"), Some(Language::Ms));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::Ta.label(), "Tamil");
    }

    #[test]
    fn test_species_from_name() {
        assert_eq!(Species::from_name("rabbit"), Some(Species::Rabbit));
        assert_eq!(Species::from_name("Hamster"), None);
        assert_eq!(Species::default(), Species::Dog);
    }

    #[test]
    fn test_io_error_converts_to_storage_write() {
        let err: AppError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only fs").into();
        assert!(matches!(err, AppError::StorageWrite(ref m) if m.contains("read-only fs")));
        assert_eq!(err.user_message(), "Could not save. Please try again.");
    }

    #[test]
    fn test_write_errors_share_retry_message() {
        let write = AppError::StorageWrite("disk full".to_string());
        let encode = AppError::Serialization("bad".to_string());
        assert_eq!(write.user_message(), encode.user_message());
        assert!(write.user_message().contains("try again"));
    }
}
