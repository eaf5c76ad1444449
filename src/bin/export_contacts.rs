use anyhow::{Context, Result};
use site_admin::auth::AuthClient;
use site_admin::config::Config;
use site_admin::contacts::ContactClient;
use site_admin::storage::LocalStorage;
use site_admin::supabase::SupabaseClient;
use std::fs;
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("export_contacts=info".parse()?)
                .add_directive("site_admin=info".parse()?),
        )
        .init();

    info!("Starting contact submissions export");

    // Load config from environment
    let config = Config::from_env()?;
    let storage = LocalStorage::open_or_memory(&config.storage_path);
    let backend = SupabaseClient::new(&config).context("Failed to build HTTP client")?;
    let auth = AuthClient::new(backend.clone(), storage);

    // Reuse a stored admin session, otherwise sign in from the environment
    if auth.get_current_session().is_none() {
        let email = std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL not set")?;
        let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD not set")?;
        auth.sign_in(&email, &password)
            .await
            .context("Admin sign-in failed")?;
    }

    let contacts = ContactClient::new(backend)
        .list_all()
        .await
        .context("Failed to fetch contact submissions")?;

    // Save to file
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/contacts.json".to_string());
    if let Some(parent) = Path::new(&output_path).parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    fs::write(&output_path, serde_json::to_string_pretty(&contacts)?)
        .context("Failed to write contacts to file")?;

    info!("✓ Exported {} contact submissions to {}", contacts.len(), output_path);

    Ok(())
}
