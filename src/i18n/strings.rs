/// All localized user-facing strings for a language.
///
/// Strings are stored raw; HTML escaping happens in `render`.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Contact Form ====================
    /// Submit button text when idle
    pub send_message: &'static str,

    /// Submit button text while the submission is in flight
    pub sending: &'static str,

    /// Notification after a successful submission
    pub contact_success: &'static str,

    /// Notification after a failed submission
    pub contact_error: &'static str,

    // ==================== Auth ====================
    /// Login button label for anonymous visitors
    pub login_button: &'static str,

    /// Login button label once signed in
    pub admin_button: &'static str,

    /// Logout nav item label
    pub logout: &'static str,

    /// Inline login error when a field is blank
    pub login_missing_credentials: &'static str,

    /// Inline login error when the service gives no message of its own
    pub login_failed: &'static str,

    /// Notification when sign-out fails
    pub logout_failed: &'static str,

    // ==================== Post Editor ====================
    /// Post modal heading when creating
    pub post_modal_new: &'static str,

    /// Post modal heading when editing
    pub post_modal_edit: &'static str,

    pub post_required: &'static str,
    pub post_created: &'static str,
    pub post_updated: &'static str,
    pub post_deleted: &'static str,
    pub post_save_error: &'static str,
    pub post_delete_error: &'static str,
    pub post_load_error: &'static str,
    pub posts_load_error: &'static str,

    /// Confirmation prompt before an irreversible delete
    pub delete_confirm: &'static str,

    // ==================== Listings ====================
    /// Admin table placeholder row
    pub no_posts_admin: &'static str,

    /// Public grid placeholder
    pub no_posts_public: &'static str,

    pub read_more: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,

    /// Category column fallback
    pub uncategorized: &'static str,

    // ==================== Other ====================
    /// Notification when an action is triggered again before it finished
    pub action_in_progress: &'static str,
}

/// English language strings (canonical)
pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    // Contact form
    send_message: "Send Message",
    sending: "Sending...",
    contact_success: "Thank you for your message! We'll get back to you within 24 hours.",
    contact_error: "There was an error sending your message. Please try again later.",

    // Auth
    login_button: "Login",
    admin_button: "Admin",
    logout: "Logout",
    login_missing_credentials: "Please enter both email and password",
    login_failed: "Login failed. Please check your credentials.",
    logout_failed: "Error logging out. Please try again.",

    // Post editor
    post_modal_new: "New Blog Post",
    post_modal_edit: "Edit Blog Post",
    post_required: "Title and content are required",
    post_created: "Post created successfully",
    post_updated: "Post updated successfully",
    post_deleted: "Post deleted successfully",
    post_save_error: "Error saving post",
    post_delete_error: "Error deleting post",
    post_load_error: "Error loading post for editing",
    posts_load_error: "Error loading blog posts",
    delete_confirm: "Are you sure you want to delete this post? This action cannot be undone.",

    // Listings
    no_posts_admin: "No blog posts found. Create your first post!",
    no_posts_public: "No blog posts available.",
    read_more: "Read More",
    edit: "Edit",
    delete: "Delete",
    uncategorized: "Uncategorized",

    // Other
    action_in_progress: "Please wait, the previous request is still running.",
};

/// German language strings
pub const GERMAN_STRINGS: LanguageStrings = LanguageStrings {
    // Contact form
    send_message: "Nachricht senden",
    sending: "Wird gesendet...",
    contact_success:
        "Vielen Dank für Ihre Nachricht! Wir melden uns innerhalb von 24 Stunden bei Ihnen.",
    contact_error:
        "Es gab einen Fehler beim Senden Ihrer Nachricht. Bitte versuchen Sie es später erneut.",

    // Auth
    login_button: "Anmelden",
    admin_button: "Admin",
    logout: "Abmelden",
    login_missing_credentials: "Bitte geben Sie E-Mail und Passwort ein",
    login_failed: "Anmeldung fehlgeschlagen. Bitte überprüfen Sie Ihre Zugangsdaten.",
    logout_failed: "Fehler beim Abmelden. Bitte versuchen Sie es erneut.",

    // Post editor
    post_modal_new: "Neuer Blogbeitrag",
    post_modal_edit: "Blogbeitrag bearbeiten",
    post_required: "Titel und Inhalt sind erforderlich",
    post_created: "Beitrag erfolgreich erstellt",
    post_updated: "Beitrag erfolgreich aktualisiert",
    post_deleted: "Beitrag erfolgreich gelöscht",
    post_save_error: "Fehler beim Speichern des Beitrags",
    post_delete_error: "Fehler beim Löschen des Beitrags",
    post_load_error: "Fehler beim Laden des Beitrags",
    posts_load_error: "Fehler beim Laden der Blogbeiträge",
    delete_confirm:
        "Möchten Sie diesen Beitrag wirklich löschen? Dies kann nicht rückgängig gemacht werden.",

    // Listings
    no_posts_admin: "Keine Blogbeiträge gefunden. Erstellen Sie Ihren ersten Beitrag!",
    no_posts_public: "Keine Blogbeiträge verfügbar.",
    read_more: "Weiterlesen",
    edit: "Bearbeiten",
    delete: "Löschen",
    uncategorized: "Ohne Kategorie",

    // Other
    action_in_progress: "Bitte warten, die vorherige Anfrage läuft noch.",
};
