use crate::error::Result;
use crate::i18n::Language;
use crate::supabase::SupabaseClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

const TABLE: &str = "user_preferences";

/// A visitor's stored language preference, keyed by session id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub session_id: String,
    pub language: Language,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct PreferenceClient {
    backend: SupabaseClient,
}

impl PreferenceClient {
    pub fn new(backend: SupabaseClient) -> Self {
        Self { backend }
    }

    /// Upsert the preference for `session_id`. Saving the same pair again
    /// only refreshes `updated_at`.
    pub async fn save(&self, session_id: &str, language: Language) -> Result<Preference> {
        let row = Preference {
            session_id: session_id.to_string(),
            language,
            updated_at: Some(Utc::now()),
        };

        let saved: Vec<Preference> = self
            .backend
            .from(TABLE)
            .on_conflict("session_id")
            .upsert(&[row.clone()])
            .await?;

        debug!("Saved language {} for {}", language, session_id);
        Ok(saved.into_iter().next().unwrap_or(row))
    }

    /// Stored preference for `session_id`, or `None` when there is none yet.
    pub async fn get(&self, session_id: &str) -> Result<Option<Preference>> {
        let result = self
            .backend
            .from(TABLE)
            .select("*")
            .eq("session_id", session_id)
            .fetch_single::<Preference>()
            .await;

        match result {
            Ok(preference) => Ok(Some(preference)),
            Err(e) if e.is_no_rows() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
