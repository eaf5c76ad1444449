use anyhow::{Context, Result};
use site_admin::app::SiteApp;
use site_admin::config::Config;
use site_admin::notify::LogNotifier;
use site_admin::storage::LocalStorage;
use site_admin::ui::{Page, TranslatableElement};
use tracing::info;

/// Translatable elements of the landing page.
fn landing_page() -> Page {
    Page::new(vec![
        TranslatableElement::title(
            "Green Garden Services | Landscaping & Maintenance",
            "Green Garden Services | Landschaftsbau & Pflege",
        ),
        TranslatableElement::text("nav-home", "Home", "Startseite"),
        TranslatableElement::text("nav-services", "Services", "Leistungen"),
        TranslatableElement::text("nav-blog", "Blog", "Blog"),
        TranslatableElement::text("nav-contact", "Contact", "Kontakt"),
        TranslatableElement::input("contact-name", "Your Name", "Ihr Name"),
        TranslatableElement::input("contact-email", "Your Email", "Ihre E-Mail"),
        TranslatableElement::input("contact-phone", "Your Phone", "Ihre Telefonnummer"),
        TranslatableElement::textarea("contact-message", "Your Message", "Ihre Nachricht"),
    ])
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_admin=info".parse()?),
        )
        .init();

    info!("Starting site page load");

    // Load configuration from environment
    let config = Config::from_env()?;
    let storage = LocalStorage::open_or_memory(&config.storage_path);

    let app = SiteApp::new(config, storage, LogNotifier { auto_confirm: false })
        .context("Failed to initialize site client")?
        .with_page(landing_page());

    app.on_page_load().await;

    let view = app.view();
    info!(
        "Session {} | language {} | admin mode: {}",
        app.session_id(),
        view.page.language_button,
        view.page.admin_section_visible
    );

    if view.page.admin_section_visible {
        println!("{}", view.page.admin_table);
    } else {
        println!("{}", view.page.blog_grid);
    }

    Ok(())
}
