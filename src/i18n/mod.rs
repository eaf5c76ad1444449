//! Internationalization (i18n) for the bilingual site.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Validated `Language` type used everywhere a language code travels
//! - `strings`: Localized user-facing messages (notifications, labels, prompts)
//!
//! # Example
//!
//! ```rust,ignore
//! use site_admin::i18n::{Language, LanguageRegistry};
//!
//! let german = Language::from_code("de")?;
//! assert_eq!(german.toggle(), Language::ENGLISH);
//!
//! let languages = LanguageRegistry::get().list_enabled();
//! ```

mod language;
mod registry;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{LanguageStrings, ENGLISH_STRINGS, GERMAN_STRINGS};
