//! Integration tests for the site client
//!
//! These tests drive `SiteApp` handlers end to end against a mocked backend
//! (data API and identity service) and check the rendered page model, the
//! requests that were sent and the notifications the user saw.

use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_partial_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use site_admin::app::{EditorState, SiteApp};
use site_admin::config::Config;
use site_admin::contacts::ContactForm;
use site_admin::error::{AuthError, Error};
use site_admin::guard::Action;
use site_admin::i18n::Language;
use site_admin::notify::{NotificationKind, RecordingNotifier};
use site_admin::posts::{PostDraft, PostStatus};
use site_admin::storage::{LocalStorage, AUTH_SESSION_KEY, PREFERRED_LANGUAGE_KEY};
use site_admin::ui::{Page, TranslatableElement};

// ==================== Test Helpers ====================

fn create_app(
    uri: &str,
    storage: LocalStorage,
    confirm_answer: bool,
) -> SiteApp<RecordingNotifier> {
    SiteApp::new(
        Config::for_backend(uri, "test-anon-key"),
        storage,
        RecordingNotifier::new(confirm_answer),
    )
    .expect("Failed to create app")
    .with_page(sample_page())
}

fn sample_page() -> Page {
    Page::new(vec![
        TranslatableElement::title("Green Garden Services", "Grüne Gartendienste"),
        TranslatableElement::text("nav-contact", "Contact", "Kontakt"),
        TranslatableElement::input("contact-name", "Your Name", "Ihr Name"),
        TranslatableElement::textarea("contact-message", "Your Message", "Ihre Nachricht"),
    ])
}

/// Storage holding a still-valid admin session.
fn signed_in_storage() -> LocalStorage {
    storage_with_session(3600)
}

/// Storage holding an admin session that expires in `expires_in` seconds.
fn storage_with_session(expires_in: i64) -> LocalStorage {
    let storage = LocalStorage::in_memory();
    let session = json!({
        "access_token": "stored-admin-token",
        "token_type": "bearer",
        "expires_at": chrono::Utc::now().timestamp() + expires_in,
        "user": { "id": "admin-1", "email": "admin@example.com" }
    });
    storage
        .set_item(AUTH_SESSION_KEY, &session.to_string())
        .expect("seed session");
    storage
}

fn post_json(id: &str, title: &str, status: &str) -> serde_json::Value {
    let published_at = (status == "published").then_some("2026-10-03T10:00:00+00:00");
    json!({
        "id": id,
        "title": title,
        "excerpt": format!("About {}", title),
        "content": "Body",
        "cover_image": null,
        "status": status,
        "category_id": null,
        "slug": title.to_lowercase().replace(' ', "-"),
        "author_id": "admin-1",
        "created_at": "2026-10-01T10:00:00+00:00",
        "updated_at": "2026-10-02T10:00:00+00:00",
        "published_at": published_at,
        "is_published": status == "published"
    })
}

fn draft(title: &str, content: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        content: content.to_string(),
        status: PostStatus::Draft,
        ..Default::default()
    }
}

async fn mount_no_preference(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_preferences"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "details": "The result contains 0 rows",
            "message": "JSON object requested, multiple (or no) rows returned"
        })))
        .mount(mock_server)
        .await;
}

async fn mount_admin_list(mock_server: &MockServer, posts: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/blogs"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts))
        .mount(mock_server)
        .await;
}

async fn mount_public_list(mock_server: &MockServer, posts: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/blogs"))
        .and(query_param("status", "eq.published"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts))
        .mount(mock_server)
        .await;
}

async fn mount_categories(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/blog_categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "c1", "name": "Guides" }
        ])))
        .mount(mock_server)
        .await;
}

/// App restored into admin mode with one draft in the posts table.
async fn admin_app(mock_server: &MockServer, confirm_answer: bool) -> SiteApp<RecordingNotifier> {
    mount_no_preference(mock_server).await;
    mount_admin_list(mock_server, json!([post_json("1", "First Post", "draft")])).await;
    mount_categories(mock_server).await;

    let app = create_app(&mock_server.uri(), signed_in_storage(), confirm_answer);
    app.on_page_load().await;
    assert!(app.view().page.admin_section_visible);
    app
}

// ==================== Page Load Tests ====================

#[tokio::test]
async fn test_anonymous_page_load_renders_public_grid() {
    let mock_server = MockServer::start().await;
    mount_no_preference(&mock_server).await;
    mount_public_list(
        &mock_server,
        json!([
            post_json("1", "Spring Planting", "published"),
            post_json("2", "Lawn Care", "published")
        ]),
    )
    .await;

    let app = create_app(&mock_server.uri(), LocalStorage::in_memory(), true);
    app.on_page_load().await;

    let view = app.view();
    assert_eq!(view.page.language, Language::ENGLISH);
    assert!(!view.page.has_admin_ui());
    assert!(view.page.blog_grid.contains("Spring Planting"));
    assert!(view.page.blog_grid.contains(r#"href="/blog/lawn-care""#));
}

#[tokio::test]
async fn test_public_grid_never_shows_drafts_or_more_than_limit() {
    let mock_server = MockServer::start().await;
    mount_no_preference(&mock_server).await;
    mount_public_list(
        &mock_server,
        json!([
            post_json("1", "One", "published"),
            post_json("2", "Secret Draft", "draft"),
            post_json("3", "Three", "published"),
            post_json("4", "Four", "published"),
            post_json("5", "Five", "published")
        ]),
    )
    .await;

    let app = create_app(&mock_server.uri(), LocalStorage::in_memory(), true);
    app.on_page_load().await;

    let grid = app.view().page.blog_grid;
    assert_eq!(grid.matches(r#"class="blog-card""#).count(), 3);
    assert!(!grid.contains("Secret Draft"));
    assert!(!grid.contains("Five"));
}

#[tokio::test]
async fn test_page_load_prefers_locally_stored_language() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/user_preferences"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    mount_public_list(&mock_server, json!([])).await;

    let storage = LocalStorage::in_memory();
    storage
        .set_item(PREFERRED_LANGUAGE_KEY, "de")
        .expect("seed language");

    let app = create_app(&mock_server.uri(), storage, true);
    app.on_page_load().await;

    let view = app.view();
    assert_eq!(view.page.language, Language::GERMAN);
    assert_eq!(view.page.language_button, "🇩🇪 DE");
    assert!(view.page.blog_grid.contains("Keine Blogbeiträge verfügbar."));
}

#[tokio::test]
async fn test_page_load_falls_back_to_remote_preference() {
    let mock_server = MockServer::start().await;

    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::open(temp_dir.path().join("storage.json")).expect("storage");

    let app = create_app(&mock_server.uri(), storage, true);

    Mock::given(method("GET"))
        .and(path("/rest/v1/user_preferences"))
        .and(query_param("session_id", format!("eq.{}", app.session_id())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": app.session_id(),
            "language": "de",
            "updated_at": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_public_list(&mock_server, json!([])).await;

    app.on_page_load().await;
    assert_eq!(app.language(), Language::GERMAN);
}

#[tokio::test]
async fn test_page_load_survives_backend_outage() {
    let mock_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server.uri(), LocalStorage::in_memory(), true);
    app.on_page_load().await;

    let view = app.view();
    assert_eq!(view.page.language, Language::ENGLISH);
    assert!(!view.page.has_admin_ui());
    assert!(view.page.blog_grid.is_empty());
}

// ==================== Session Tests ====================

#[test]
fn test_session_id_is_stable_across_reloads() {
    let temp_dir = TempDir::new().unwrap();
    let storage_path = temp_dir.path().join("storage.json");

    let first = {
        let storage = LocalStorage::open(&storage_path).expect("storage");
        create_app("http://localhost:54321", storage, true)
            .session_id()
            .to_string()
    };
    let second = {
        let storage = LocalStorage::open(&storage_path).expect("storage");
        create_app("http://localhost:54321", storage, true)
            .session_id()
            .to_string()
    };

    assert!(first.starts_with("session_"));
    assert_eq!(first, second);
}

// ==================== Language Toggle Tests ====================

#[tokio::test]
async fn test_toggle_language_twice_restores_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/user_preferences"))
        .and(query_param("on_conflict", "session_id"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let storage = LocalStorage::in_memory();
    let app = create_app(&mock_server.uri(), storage.clone(), true);
    let original = app.view().page;

    assert_eq!(app.toggle_language().await.expect("toggle"), Language::GERMAN);
    let german = app.view().page;
    assert_eq!(german.element("nav-contact").unwrap().text, "Kontakt");
    assert_eq!(
        german.element("contact-message").unwrap().placeholder.as_deref(),
        Some("Ihre Nachricht")
    );
    assert_eq!(storage.get_item(PREFERRED_LANGUAGE_KEY).as_deref(), Some("de"));

    assert_eq!(app.toggle_language().await.expect("toggle"), Language::ENGLISH);
    assert_eq!(app.view().page, original);
    assert_eq!(storage.get_item(PREFERRED_LANGUAGE_KEY).as_deref(), Some("en"));
}

#[tokio::test]
async fn test_toggle_language_remote_failure_is_not_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/user_preferences"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": "XX000",
            "message": "internal error"
        })))
        .mount(&mock_server)
        .await;

    let storage = LocalStorage::in_memory();
    let app = create_app(&mock_server.uri(), storage.clone(), true);

    assert_eq!(app.toggle_language().await.expect("toggle"), Language::GERMAN);
    assert_eq!(app.language(), Language::GERMAN);
    assert_eq!(storage.get_item(PREFERRED_LANGUAGE_KEY).as_deref(), Some("de"));
    assert!(app.notifier().notifications().is_empty());
}

// ==================== Contact Form Tests ====================

#[tokio::test]
async fn test_contact_submission_stored_with_default_language() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/contacts"))
        .and(body_partial_json(json!([{
            "name": "A",
            "email": "a@b.com",
            "service": "x",
            "language": "en"
        }])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 1,
            "name": "A",
            "email": "a@b.com",
            "phone": null,
            "service": "x",
            "message": null,
            "language": "en",
            "created_at": "2026-10-17T10:00:00+00:00"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server.uri(), LocalStorage::in_memory(), true);
    let form = ContactForm {
        name: "A".to_string(),
        email: "a@b.com".to_string(),
        service: "x".to_string(),
        ..Default::default()
    };

    let submission = app.submit_contact(form).await.expect("submit");
    assert_eq!(submission.language, "en");

    let (kind, message) = app.notifier().last().expect("notification");
    assert_eq!(kind, NotificationKind::Success);
    assert!(message.starts_with("Thank you for your message!"));

    let button = app.view().page.contact_submit;
    assert!(!button.disabled);
    assert_eq!(button.label, "Send Message");
}

#[tokio::test]
async fn test_contact_submission_failure_is_localized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/user_preferences"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/contacts"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "23502",
            "message": "null value in column \"email\" violates not-null constraint"
        })))
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server.uri(), LocalStorage::in_memory(), true);
    app.toggle_language().await.expect("toggle");
    assert_eq!(app.view().page.contact_submit.label, "Nachricht senden");

    let err = app.submit_contact(ContactForm::default()).await.unwrap_err();
    assert!(matches!(err, Error::Submission(_)));

    let (kind, message) = app.notifier().last().expect("notification");
    assert_eq!(kind, NotificationKind::Error);
    assert!(message.starts_with("Es gab einen Fehler"));

    let button = app.view().page.contact_submit;
    assert!(!button.disabled);
    assert_eq!(button.label, "Nachricht senden");
}

// ==================== Auth Tests ====================

#[tokio::test]
async fn test_login_then_logout_removes_admin_ui() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-access-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-token",
            "user": { "id": "admin-1", "email": "admin@example.com" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_admin_list(&mock_server, json!([post_json("1", "First Post", "draft")])).await;
    mount_public_list(&mock_server, json!([])).await;

    let app = create_app(&mock_server.uri(), LocalStorage::in_memory(), true);
    app.open_login_modal();
    app.login("admin@example.com", "secret").await.expect("login");

    let view = app.view();
    assert!(!view.page.login_modal.visible);
    assert!(view.page.admin_section_visible);
    assert_eq!(view.page.auth_nav.login_label, "Admin");
    assert!(view.page.admin_table.contains("First Post"));

    app.logout().await.expect("logout");

    let view = app.view();
    assert!(!view.page.has_admin_ui());
    assert_eq!(view.page.auth_nav.logout_item, None);
    assert_eq!(view.page.auth_nav.login_label, "Login");
    assert!(app.auth().get_current_session().is_none());
}

#[tokio::test]
async fn test_login_rejected_keeps_modal_open() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server.uri(), LocalStorage::in_memory(), true);
    app.open_login_modal();

    let err = app.login("admin@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials(_))));

    let view = app.view();
    assert!(view.page.login_modal.visible);
    assert_eq!(view.page.login_modal.error, "Invalid login credentials");
    assert!(!view.page.has_admin_ui());
    assert!(!app.auth().state().is_authenticated());
}

#[tokio::test]
async fn test_login_with_blank_fields_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server.uri(), LocalStorage::in_memory(), true);
    app.open_login_modal();

    let err = app.login("  ", "secret").await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::MissingCredentials)));
    assert_eq!(
        app.view().page.login_modal.error,
        "Please enter both email and password"
    );
}

#[tokio::test]
async fn test_logout_failure_keeps_admin_mode() {
    let mock_server = MockServer::start().await;
    let app = admin_app(&mock_server, true).await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "msg": "database error"
        })))
        .mount(&mock_server)
        .await;

    assert!(app.logout().await.is_err());

    let view = app.view();
    assert!(view.page.admin_section_visible);
    assert!(view.page.auth_nav.logout_item.is_some());
    assert_eq!(
        app.notifier().last(),
        Some((
            NotificationKind::Error,
            "Error logging out. Please try again.".to_string()
        ))
    );
    assert!(app.auth().get_current_session().is_some());
}

// ==================== Post Editor Tests ====================

#[tokio::test]
async fn test_create_post_with_empty_title_issues_no_request() {
    let mock_server = MockServer::start().await;
    let app = admin_app(&mock_server, true).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/blogs"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    app.open_new_post().await.expect("open");
    let err = app.save_post(draft("", "Body")).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(app.editor_state(), EditorState::New);
    assert!(app.view().page.post_modal.visible);
}

#[tokio::test]
async fn test_create_post_closes_modal_and_refreshes_table() {
    let mock_server = MockServer::start().await;
    let app = admin_app(&mock_server, true).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/blogs"))
        .and(body_partial_json(json!([{
            "title": "Hello, World!  Test",
            "slug": "hello-world-test",
            "author_id": "admin-1",
            "status": "draft"
        }])))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([post_json("2", "Hello World Test", "draft")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    app.open_new_post().await.expect("open");
    let view = app.view();
    assert_eq!(view.page.post_modal.title, "New Blog Post");
    assert!(view.page.category_options.contains("Guides"));

    app.save_post(draft("Hello, World!  Test", "Body"))
        .await
        .expect("save");

    let view = app.view();
    assert_eq!(view.editor, EditorState::Closed);
    assert!(!view.page.post_modal.visible);
    assert_eq!(
        app.notifier().last(),
        Some((
            NotificationKind::Success,
            "Post created successfully".to_string()
        ))
    );
}

#[tokio::test]
async fn test_save_after_session_expiry_notifies_and_keeps_modal() {
    let mock_server = MockServer::start().await;
    mount_no_preference(&mock_server).await;
    mount_admin_list(&mock_server, json!([])).await;
    mount_categories(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/blogs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server.uri(), storage_with_session(2), true);
    app.on_page_load().await;
    assert!(app.view().page.admin_section_visible);
    app.open_new_post().await.expect("open");

    tokio::time::sleep(Duration::from_millis(3100)).await;

    let err = app.save_post(draft("Title", "Body")).await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::NotAuthenticated)));

    let (kind, message) = app.notifier().last().expect("notification");
    assert_eq!(kind, NotificationKind::Error);
    assert!(message.starts_with("Error saving post"));
    assert!(app.view().page.post_modal.visible);
    assert!(!app.is_in_flight(Action::SavePost));
}

#[tokio::test]
async fn test_concurrent_duplicate_save_inserts_once() {
    let mock_server = MockServer::start().await;
    let app = admin_app(&mock_server, true).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/blogs"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!([post_json("2", "Twice", "draft")]))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    app.open_new_post().await.expect("open");

    let (first, second) = tokio::join!(
        app.save_post(draft("Twice", "Body")),
        app.save_post(draft("Twice", "Body"))
    );

    let (saved, rejected) = if first.is_ok() {
        (first, second)
    } else {
        (second, first)
    };
    assert!(saved.is_ok());
    assert!(matches!(rejected, Err(Error::InFlight(Action::SavePost))));
    assert!(!app.is_in_flight(Action::SavePost));
    assert!(app
        .notifier()
        .notifications()
        .iter()
        .any(|(_, message)| message == "Please wait, the previous request is still running."));
}

#[tokio::test]
async fn test_edit_post_then_update() {
    let mock_server = MockServer::start().await;
    let app = admin_app(&mock_server, true).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/blogs"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json("1", "First Post", "draft")))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/blogs"))
        .and(query_param("id", "eq.1"))
        .and(body_partial_json(json!({
            "title": "First Post Revised",
            "slug": "first-post-revised",
            "status": "published",
            "is_published": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json(
            "1",
            "First Post Revised",
            "published"
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let post = app.edit_post("1").await.expect("edit");
    let view = app.view();
    assert_eq!(view.editor, EditorState::Editing("1".to_string()));
    assert_eq!(view.page.post_modal.title, "Edit Blog Post");
    assert_eq!(
        view.page.post_modal.fields.get("title").map(String::as_str),
        Some("First Post")
    );

    let mut changes = post.to_draft();
    changes.title = "First Post Revised".to_string();
    changes.status = PostStatus::Published;
    app.save_post(changes).await.expect("update");

    assert_eq!(app.editor_state(), EditorState::Closed);
    assert_eq!(
        app.notifier().last(),
        Some((
            NotificationKind::Success,
            "Post updated successfully".to_string()
        ))
    );
}

#[tokio::test]
async fn test_rejected_write_keeps_modal_open_and_table_unchanged() {
    let mock_server = MockServer::start().await;
    let app = admin_app(&mock_server, true).await;
    let table_before = app.view().page.admin_table;

    Mock::given(method("POST"))
        .and(path("/rest/v1/blogs"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "42501",
            "message": "permission denied for table blogs"
        })))
        .mount(&mock_server)
        .await;

    app.open_new_post().await.expect("open");
    let err = app.save_post(draft("Title", "Body")).await.unwrap_err();

    assert!(matches!(err, Error::Remote { status: 403, .. }));
    let view = app.view();
    assert!(view.page.post_modal.visible);
    assert_eq!(view.editor, EditorState::New);
    assert_eq!(view.page.admin_table, table_before);

    let (kind, message) = app.notifier().last().expect("notification");
    assert_eq!(kind, NotificationKind::Error);
    assert!(message.contains("permission denied for table blogs"));
}

// ==================== Delete Tests ====================

#[tokio::test]
async fn test_delete_declined_sends_no_request() {
    let mock_server = MockServer::start().await;
    let app = admin_app(&mock_server, false).await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = app.delete_post("1").await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert_eq!(
        app.notifier().prompts(),
        vec!["Are you sure you want to delete this post? This action cannot be undone.".to_string()]
    );
    assert!(app.view().page.admin_table.contains("First Post"));
}

#[tokio::test]
async fn test_delete_confirmed_notifies_and_refreshes() {
    let mock_server = MockServer::start().await;
    let app = admin_app(&mock_server, true).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/blogs"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    app.delete_post("1").await.expect("delete");
    assert_eq!(
        app.notifier().last(),
        Some((
            NotificationKind::Success,
            "Post deleted successfully".to_string()
        ))
    );
}
