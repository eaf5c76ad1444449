use crate::error::{Error, Result};
use crate::i18n::Language;
use crate::supabase::SupabaseClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

const TABLE: &str = "contacts";

/// Contact form fields as entered by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub service: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
}

/// Row inserted into `contacts`.
#[derive(Debug, Serialize)]
struct NewContact<'a> {
    name: &'a str,
    email: &'a str,
    phone: Option<&'a str>,
    service: &'a str,
    message: Option<&'a str>,
    language: Language,
}

impl<'a> From<&'a ContactForm> for NewContact<'a> {
    fn from(form: &'a ContactForm) -> Self {
        Self {
            name: &form.name,
            email: &form.email,
            phone: non_blank(&form.phone),
            service: &form.service,
            message: non_blank(&form.message),
            language: form.language.unwrap_or(Language::ENGLISH),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// A stored contact submission. Write-once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: String,
    pub message: Option<String>,
    pub language: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ContactClient {
    backend: SupabaseClient,
}

impl ContactClient {
    pub fn new(backend: SupabaseClient) -> Self {
        Self { backend }
    }

    /// Insert one submission. Validation is left to the table schema;
    /// a missing language is stored as `en`.
    pub async fn submit(&self, form: &ContactForm) -> Result<ContactSubmission> {
        let row = NewContact::from(form);

        let inserted: Vec<ContactSubmission> = self
            .backend
            .from(TABLE)
            .insert(&[row])
            .await
            .map_err(|e| Error::Submission(e.user_message()))?;

        let submission = inserted
            .into_iter()
            .next()
            .ok_or_else(|| Error::Submission("Insert returned no row".to_string()))?;

        info!("Contact submission stored for service '{}'", submission.service);
        Ok(submission)
    }

    /// All submissions, newest first. Requires an admin session server-side.
    pub async fn list_all(&self) -> Result<Vec<ContactSubmission>> {
        self.backend
            .from(TABLE)
            .select("*")
            .order("created_at", false)
            .fetch()
            .await
    }
}
