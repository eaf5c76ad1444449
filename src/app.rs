//! Site application context.
//!
//! `SiteApp` owns everything the page scripts share: configuration, local
//! storage, the visitor session id, the backend clients, the page model and
//! the in-flight registry. Handlers take `&self`; the view lock is only held
//! for synchronous updates, never across an `.await`.

use crate::auth::{AuthClient, AuthState};
use crate::config::Config;
use crate::contacts::{ContactClient, ContactForm, ContactSubmission};
use crate::error::{AuthError, Error, Result};
use crate::guard::{Action, InFlight, InFlightGuard};
use crate::i18n::{Language, LanguageStrings};
use crate::notify::{NotificationKind, Notifier};
use crate::posts::{Post, PostDraft, PostStore};
use crate::preferences::PreferenceClient;
use crate::render;
use crate::session::get_or_create_session_id;
use crate::storage::{LocalStorage, PREFERRED_LANGUAGE_KEY};
use crate::supabase::SupabaseClient;
use crate::ui::{ModalKind, Page};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info, warn};

/// Post editor modal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    New,
    Editing(String),
}

/// Everything a handler may re-render.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub page: Page,
    pub editor: EditorState,
}

pub struct SiteApp<N: Notifier> {
    config: Config,
    storage: LocalStorage,
    session_id: String,
    auth: AuthClient,
    preferences: PreferenceClient,
    contacts: ContactClient,
    posts: PostStore,
    notifier: N,
    view: Mutex<ViewState>,
    in_flight: InFlight,
}

impl<N: Notifier> SiteApp<N> {
    /// Wire up the clients and resolve the visitor session id.
    pub fn new(config: Config, storage: LocalStorage, notifier: N) -> Result<Self> {
        let backend = SupabaseClient::new(&config)?;
        let session_id = get_or_create_session_id(&storage);
        debug!("Visitor session {}", session_id);

        Ok(Self {
            auth: AuthClient::new(backend.clone(), storage.clone()),
            preferences: PreferenceClient::new(backend.clone()),
            contacts: ContactClient::new(backend.clone()),
            posts: PostStore::new(backend),
            config,
            storage,
            session_id,
            notifier,
            view: Mutex::new(ViewState::default()),
            in_flight: InFlight::new(),
        })
    }

    /// Replace the page model, e.g. with the page's translatable elements.
    pub fn with_page(self, page: Page) -> Self {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = ViewState {
            page,
            editor: EditorState::Closed,
        };
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_in_flight(&self, action: Action) -> bool {
        self.in_flight.is_active(action)
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> ViewState {
        self.with_view(|view| view.clone())
    }

    pub fn language(&self) -> Language {
        self.with_view(|view| view.page.language)
    }

    pub fn editor_state(&self) -> EditorState {
        self.with_view(|view| view.editor.clone())
    }

    fn with_view<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut view)
    }

    fn strings(&self) -> &'static LanguageStrings {
        self.language().strings()
    }

    fn begin(&self, action: Action) -> Result<InFlightGuard> {
        self.in_flight.begin(action).inspect_err(|_| {
            warn!("Ignoring duplicate {} while one is pending", action);
            self.notifier
                .notify(self.strings().action_in_progress, NotificationKind::Info);
        })
    }

    /// Admin handlers only check the UI mode; the backend authorizes the write.
    fn require_admin_mode(&self) -> Result<()> {
        if self.with_view(|view| view.page.admin_section_visible) {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated.into())
        }
    }

    // ==================== Page Load ====================

    /// Restore language and auth mode, then render the matching listing.
    pub async fn on_page_load(&self) {
        let language = self.resolve_language().await;
        self.with_view(|view| view.page.apply_language(language));
        info!("Page loaded in {}", language.name());

        match self.auth.state() {
            AuthState::Authenticated(session) => {
                debug!("Existing session for {}", session.user.id);
                self.with_view(|view| view.page.show_admin());
                self.refresh_admin_table().await;
            }
            AuthState::Anonymous => {
                self.with_view(|view| view.page.show_public());
                self.refresh_public_grid().await;
            }
        }
    }

    /// Local choice first, then the stored preference, then the canonical language.
    async fn resolve_language(&self) -> Language {
        if let Some(code) = self.storage.get_item(PREFERRED_LANGUAGE_KEY) {
            match Language::from_code(&code) {
                Ok(language) => return language,
                Err(e) => warn!("Ignoring stored language '{}': {}", code, e),
            }
        }

        match self.preferences.get(&self.session_id).await {
            Ok(Some(preference)) => preference.language,
            Ok(None) => Language::canonical(),
            Err(e) => {
                warn!("Could not load language preference: {}", e);
                Language::canonical()
            }
        }
    }

    // ==================== Language ====================

    /// Switch en <-> de, re-label the page and persist the choice.
    ///
    /// A failed remote save is logged; the page stays in the new language.
    pub async fn toggle_language(&self) -> Result<Language> {
        let _guard = self.begin(Action::SaveLanguage)?;

        let language = self.language().toggle();
        self.with_view(|view| view.page.apply_language(language));

        if let Err(e) = self.storage.set_item(PREFERRED_LANGUAGE_KEY, language.code()) {
            warn!("Failed to store preferred language locally: {}", e);
        }
        if let Err(e) = self.preferences.save(&self.session_id, language).await {
            warn!("Language preference not saved remotely: {}", e);
        }

        Ok(language)
    }

    // ==================== Contact Form ====================

    /// Submit the contact form in the current language.
    pub async fn submit_contact(&self, mut form: ContactForm) -> Result<ContactSubmission> {
        let _guard = self.begin(Action::SubmitContact)?;

        let strings = self.strings();
        form.language = Some(self.language());
        self.with_view(|view| view.page.contact_submit.begin_sending(strings.sending));

        let result = self.contacts.submit(&form).await;
        self.with_view(|view| view.page.contact_submit.finish_sending());

        match result {
            Ok(submission) => {
                self.notifier
                    .notify(strings.contact_success, NotificationKind::Success);
                Ok(submission)
            }
            Err(e) => {
                error!("Form submission error: {}", e);
                self.notifier
                    .notify(strings.contact_error, NotificationKind::Error);
                Err(e)
            }
        }
    }

    // ==================== Auth ====================

    pub fn open_login_modal(&self) {
        self.with_view(|view| view.page.open_modal(ModalKind::Login));
    }

    pub fn close_login_modal(&self) {
        self.with_view(|view| view.page.close_modal(ModalKind::Login));
    }

    /// Sign in from the login modal.
    ///
    /// Failures are shown inline and keep the modal open.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let _guard = self.begin(Action::Login)?;
        let strings = self.strings();

        match self.auth.sign_in(email, password).await {
            Ok(_) => {
                self.with_view(|view| {
                    view.page.close_modal(ModalKind::Login);
                    view.page.show_admin();
                });
                self.refresh_admin_table().await;
                Ok(())
            }
            Err(e) => {
                error!("Login error: {}", e);
                let message = match &e {
                    AuthError::MissingCredentials => strings.login_missing_credentials.to_string(),
                    AuthError::InvalidCredentials(message) | AuthError::Remote { message, .. }
                        if !message.is_empty() =>
                    {
                        message.clone()
                    }
                    _ => strings.login_failed.to_string(),
                };
                self.with_view(|view| view.page.set_modal_error(ModalKind::Login, &message));
                Err(e.into())
            }
        }
    }

    /// Sign out and drop every admin-only element.
    ///
    /// On failure the user is told and the page stays in admin mode.
    pub async fn logout(&self) -> Result<()> {
        let _guard = self.begin(Action::Logout)?;

        if let Err(e) = self.auth.sign_out().await {
            error!("Logout error: {}", e);
            self.notifier
                .notify(self.strings().logout_failed, NotificationKind::Error);
            return Err(e.into());
        }

        self.with_view(|view| {
            view.editor = EditorState::Closed;
            view.page.close_modal(ModalKind::Post);
            view.page.show_public();
        });
        self.refresh_public_grid().await;
        Ok(())
    }

    // ==================== Post Editor ====================

    /// Open the editor for a new draft.
    pub async fn open_new_post(&self) -> Result<()> {
        self.require_admin_mode()?;

        self.with_view(|view| {
            let title = view.page.language.strings().post_modal_new.to_string();
            view.editor = EditorState::New;
            view.page.close_modal(ModalKind::Post);
            view.page.post_modal.title = title;
            view.page
                .post_modal
                .fields
                .insert("status".to_string(), "draft".to_string());
            view.page.open_modal(ModalKind::Post);
        });

        self.load_categories(None).await;
        Ok(())
    }

    /// Load post `id` and open the editor pre-filled with it.
    pub async fn edit_post(&self, id: &str) -> Result<Post> {
        self.require_admin_mode()?;
        let _guard = self.begin(Action::LoadPost)?;

        let post = match self.posts.get(id).await {
            Ok(post) => post,
            Err(e) => {
                error!("Error editing post: {}", e);
                self.notifier
                    .notify(self.strings().post_load_error, NotificationKind::Error);
                return Err(e);
            }
        };

        self.with_view(|view| {
            let title = view.page.language.strings().post_modal_edit.to_string();
            view.editor = EditorState::Editing(post.id.clone());

            let modal = &mut view.page.post_modal;
            modal.title = title;
            modal.error.clear();
            modal.fields = [
                ("title", post.title.clone()),
                ("excerpt", post.excerpt.clone().unwrap_or_default()),
                ("content", post.content.clone()),
                ("cover_image", post.cover_image.clone().unwrap_or_default()),
                ("status", post.status.as_str().to_string()),
                ("category_id", post.category_id.clone().unwrap_or_default()),
            ]
            .into_iter()
            .map(|(field, value)| (field.to_string(), value))
            .collect();
            view.page.open_modal(ModalKind::Post);
        });

        self.load_categories(post.category_id.as_deref()).await;
        Ok(post)
    }

    /// Create or update depending on the editor state.
    ///
    /// Success closes the modal and refreshes the table. Failure keeps the
    /// modal open with the table unchanged.
    pub async fn save_post(&self, draft: PostDraft) -> Result<Post> {
        self.require_admin_mode()?;
        let strings = self.strings();

        if let Err(e) = draft.validate() {
            self.notifier
                .notify(strings.post_required, NotificationKind::Error);
            return Err(e);
        }

        let _guard = self.begin(Action::SavePost)?;

        let result = match self.editor_state() {
            EditorState::Editing(id) => self
                .posts
                .update(&id, &draft)
                .await
                .map(|post| (post, strings.post_updated)),
            EditorState::New | EditorState::Closed => {
                match self.auth.get_current_session() {
                    Some(session) => self
                        .posts
                        .create(&draft, &session.user.id)
                        .await
                        .map(|post| (post, strings.post_created)),
                    None => Err(AuthError::NotAuthenticated.into()),
                }
            }
        };

        match result {
            Ok((post, message)) => {
                self.notifier.notify(message, NotificationKind::Success);
                self.close_post_modal();
                self.refresh_admin_table().await;
                Ok(post)
            }
            Err(e) => {
                error!("Error saving post: {}", e);
                self.notifier.notify(
                    &format!("{}: {}", strings.post_save_error, e.user_message()),
                    NotificationKind::Error,
                );
                Err(e)
            }
        }
    }

    /// Delete post `id` after confirmation. Declining is `Error::Cancelled`.
    pub async fn delete_post(&self, id: &str) -> Result<()> {
        self.require_admin_mode()?;
        let _guard = self.begin(Action::DeletePost)?;
        let strings = self.strings();

        match self
            .posts
            .delete(id, &self.notifier, strings.delete_confirm)
            .await
        {
            Ok(()) => {
                self.notifier
                    .notify(strings.post_deleted, NotificationKind::Success);
                self.refresh_admin_table().await;
                Ok(())
            }
            Err(Error::Cancelled) => Err(Error::Cancelled),
            Err(e) => {
                error!("Error deleting post: {}", e);
                self.notifier.notify(
                    &format!("{}: {}", strings.post_delete_error, e.user_message()),
                    NotificationKind::Error,
                );
                Err(e)
            }
        }
    }

    pub fn close_post_modal(&self) {
        self.with_view(|view| {
            view.editor = EditorState::Closed;
            view.page.close_modal(ModalKind::Post);
        });
    }

    // ==================== Rendering ====================

    /// Re-render the admin table. On failure the old table stays.
    pub async fn refresh_admin_table(&self) {
        match self.posts.list_all().await {
            Ok(posts) => self.with_view(|view| {
                view.page.admin_table = render::admin_table_rows(&posts, view.page.language);
            }),
            Err(e) => {
                error!("Error loading blog posts: {}", e);
                self.notifier
                    .notify(self.strings().posts_load_error, NotificationKind::Error);
            }
        }
    }

    /// Re-render the public grid. Failures are only logged.
    pub async fn refresh_public_grid(&self) {
        match self.posts.list_published(self.config.public_post_limit).await {
            Ok(posts) => self.with_view(|view| {
                view.page.blog_grid =
                    render::public_grid(&posts, &self.config.blog_base_path, view.page.language);
            }),
            Err(e) => error!("Error loading public blog posts: {}", e),
        }
    }

    async fn load_categories(&self, selected: Option<&str>) {
        match self.posts.list_categories().await {
            Ok(categories) => self.with_view(|view| {
                view.page.category_options = render::category_options(&categories, selected);
            }),
            Err(e) => error!("Error loading categories: {}", e),
        }
    }
}
