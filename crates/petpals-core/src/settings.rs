// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Settings persistence
//
// Theme, language and notification preference each live under their own
// storage key so older installs keep working.

use crate::storage::{keys, Storage};
use crate::types::{AppError, AppSettings, Language, Theme};

pub struct SettingsStore {
    storage: Storage,
}

impl SettingsStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Current settings; unreadable or unknown values fall back to defaults
    pub fn get(&self) -> AppSettings {
        let mut settings = AppSettings::default();

        match self.storage.get(keys::THEME) {
            Ok(Some(theme)) => settings.theme = Theme::from_stored(&theme),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read theme, using default: {}", e),
        }

        match self.storage.get(keys::LANGUAGE) {
            Ok(Some(code)) => match Language::from_code(&code) {
                Some(language) => settings.language = language,
                None => tracing::warn!("Unknown language code {:?}, using default", code),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read language, using default: {}", e),
        }

        match self.storage.get(keys::NOTIFICATIONS_ENABLED) {
            Ok(Some(enabled)) => settings.notifications_enabled = enabled == "true",
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read notification preference: {}", e),
        }

        settings
    }

    /// Switch between light and dark and return the new theme
    pub fn toggle_theme(&self) -> Result<Theme, AppError> {
        let theme = self.storage.update(keys::THEME, |stored| {
            let theme = stored.map(Theme::from_stored).unwrap_or_default().toggled();
            Ok((theme.as_str().to_string(), theme))
        })?;
        tracing::info!("Theme set to {}", theme.as_str());
        Ok(theme)
    }

    /// Change the interface language. Unknown codes are ignored and yield `None`.
    pub fn set_language(&self, code: &str) -> Result<Option<Language>, AppError> {
        let Some(language) = Language::from_code(code) else {
            tracing::warn!("Ignoring unsupported language {:?}", code);
            return Ok(None);
        };

        self.storage.set(keys::LANGUAGE, language.code())?;
        tracing::info!("Language set to {}", language.label());
        Ok(Some(language))
    }

    pub fn set_notifications_enabled(&self, enabled: bool) -> Result<(), AppError> {
        self.storage
            .set(keys::NOTIFICATIONS_ENABLED, if enabled { "true" } else { "false" })
            .map_err(|e| {
                tracing::error!("Failed to save notification preference: {}", e);
                e
            })
    }

    /// Overwrite all settings at once
    pub fn update(&self, settings: &AppSettings) -> Result<(), AppError> {
        tracing::info!("Updating settings, theme: {}", settings.theme.as_str());
        self.storage.set(keys::THEME, settings.theme.as_str())?;
        self.storage.set(keys::LANGUAGE, settings.language.code())?;
        self.set_notifications_enabled(settings.notifications_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let settings = SettingsStore::new(Storage::in_memory());
        assert_eq!(settings.get(), AppSettings::default());
    }

    #[test]
    fn test_toggle_theme_persists_dark_light() {
        let storage = Storage::in_memory();
        let settings = SettingsStore::new(storage.clone());

        assert_eq!(settings.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("dark"));
        assert_eq!(settings.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_concurrent_theme_toggles_are_not_lost() {
        let storage = Storage::in_memory();
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let settings = SettingsStore::new(storage.clone());
                std::thread::spawn(move || settings.toggle_theme().unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // An even number of toggles lands back on light.
        assert_eq!(SettingsStore::new(storage).get().theme, Theme::Light);
    }

    #[test]
    fn test_unknown_language_is_ignored() {
        let settings = SettingsStore::new(Storage::in_memory());
        assert_eq!(settings.set_language("zh").unwrap(), Some(Language::Zh));
        assert_eq!(settings.set_language("fr").unwrap(), None);
        assert_eq!(settings.get().language, Language::Zh);
    }

    #[test]
    fn test_notifications_flag_round_trips_as_text() {
        let storage = Storage::in_memory();
        let settings = SettingsStore::new(storage.clone());

        settings.set_notifications_enabled(false).unwrap();
        assert_eq!(
            storage.get(keys::NOTIFICATIONS_ENABLED).unwrap().as_deref(),
            Some("false")
        );
        assert!(!settings.get().notifications_enabled);
    }

    #[test]
    fn test_update_writes_every_key() {
        let settings = SettingsStore::new(Storage::in_memory());
        let wanted = AppSettings {
            theme: Theme::Dark,
            language: Language::Ta,
            notifications_enabled: false,
        };
        settings.update(&wanted).unwrap();
        assert_eq!(settings.get(), wanted);
    }
}
