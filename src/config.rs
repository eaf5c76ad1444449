use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Hosted backend
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub request_timeout_secs: u64,

    // Local durable storage
    pub storage_path: String,

    // Public blog grid
    pub public_post_limit: usize,
    pub blog_base_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Hosted backend (project URL + anonymous API key)
            supabase_url: std::env::var("SUPABASE_URL")
                .context("SUPABASE_URL not set")?
                .trim_end_matches('/')
                .to_string(),
            supabase_anon_key: std::env::var("SUPABASE_ANON_KEY")
                .context("SUPABASE_ANON_KEY not set")?,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),

            // Local durable storage
            storage_path: std::env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "data/local_storage.json".to_string()),

            // Public blog grid
            public_post_limit: std::env::var("PUBLIC_POST_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            blog_base_path: std::env::var("BLOG_BASE_PATH")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "/blog".to_string()),
        })
    }

    /// Config pointing at a given backend URL, with defaults for everything else.
    pub fn for_backend(supabase_url: &str, supabase_anon_key: &str) -> Self {
        Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key: supabase_anon_key.to_string(),
            request_timeout_secs: 15,
            storage_path: "data/local_storage.json".to_string(),
            public_post_limit: 3,
            blog_base_path: "/blog".to_string(),
        }
    }
}
