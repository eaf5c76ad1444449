//! Language type: validated language representation.

use crate::error::{Error, Result};
use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings, ENGLISH_STRINGS, GERMAN_STRINGS};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A language validated against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "de")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const GERMAN: Language = Language { code: "de" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is known and enabled
    /// * `Err(Error::Validation)` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => Err(Error::Validation(format!(
                "Language '{}' is not enabled",
                code
            ))),
            None => Err(Error::Validation(format!(
                "Unknown language code: '{}'",
                code
            ))),
        }
    }

    /// The default language for visitors with no stored preference.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for values built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// The next enabled language in toggle order (en → de → en).
    pub fn toggle(&self) -> Language {
        let enabled = LanguageRegistry::get().list_enabled();
        let position = enabled
            .iter()
            .position(|config| config.code == self.code)
            .unwrap_or(0);
        let next = enabled[(position + 1) % enabled.len()];
        Language { code: next.code }
    }

    /// Label for the language toggle button, e.g. `🇩🇪 DE`.
    pub fn button_label(&self) -> String {
        format!("{} {}", self.config().flag, self.code.to_uppercase())
    }

    /// Localized user-facing strings.
    pub fn strings(&self) -> &'static LanguageStrings {
        match self.code {
            "de" => &GERMAN_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Language::from_code(&code).map_err(serde::de::Error::custom)
    }
}
