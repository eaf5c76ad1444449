//! Presentation state of the page shell.
//!
//! Nothing here talks to the backend. `Page` is the in-memory model of the
//! DOM parts the handlers touch (translatable elements, nav, modals, rendered
//! fragments); the free functions compute scroll and animation effects from
//! viewport readings.

use crate::i18n::Language;
use std::collections::BTreeMap;

/// Header height the smooth scroll and section tracking leave room for.
pub const HEADER_OFFSET: f64 = 80.0;
/// Scroll distance after which the navbar gets its `scrolled` class.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;
/// Intersection ratio at which an element is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Hero image moves at this fraction of the scroll speed.
pub const PARALLAX_FACTOR: f64 = 0.2;

// ==================== Translatable Elements ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Input,
    TextArea,
    Title,
}

/// An element carrying `data-en` / `data-de` (and optionally
/// `data-en-placeholder` / `data-de-placeholder`) attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatableElement {
    pub id: String,
    pub kind: ElementKind,
    pub en: Option<String>,
    pub de: Option<String>,
    pub placeholder_en: Option<String>,
    pub placeholder_de: Option<String>,
    /// Currently displayed text content.
    pub text: String,
    /// Currently displayed placeholder, for inputs and textareas.
    pub placeholder: Option<String>,
}

impl TranslatableElement {
    pub fn text(id: &str, en: &str, de: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: ElementKind::Text,
            en: Some(en.to_string()),
            de: Some(de.to_string()),
            placeholder_en: None,
            placeholder_de: None,
            text: en.to_string(),
            placeholder: None,
        }
    }

    pub fn title(en: &str, de: &str) -> Self {
        Self {
            kind: ElementKind::Title,
            ..Self::text("title", en, de)
        }
    }

    /// An input whose placeholder is translated through `data-<lang>-placeholder`.
    pub fn input(id: &str, placeholder_en: &str, placeholder_de: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: ElementKind::Input,
            en: None,
            de: None,
            placeholder_en: Some(placeholder_en.to_string()),
            placeholder_de: Some(placeholder_de.to_string()),
            text: String::new(),
            placeholder: Some(placeholder_en.to_string()),
        }
    }

    pub fn textarea(id: &str, placeholder_en: &str, placeholder_de: &str) -> Self {
        Self {
            kind: ElementKind::TextArea,
            ..Self::input(id, placeholder_en, placeholder_de)
        }
    }

    fn variant(&self, lang: Language) -> Option<&str> {
        if lang == Language::GERMAN {
            self.de.as_deref()
        } else {
            self.en.as_deref()
        }
    }

    fn placeholder_variant(&self, lang: Language) -> Option<&str> {
        if lang == Language::GERMAN {
            self.placeholder_de.as_deref()
        } else {
            self.placeholder_en.as_deref()
        }
    }

    /// Swap displayed text (or placeholder, for form fields) to `lang`.
    /// Elements without a variant for `lang` keep what they show.
    pub fn apply_language(&mut self, lang: Language) {
        if let Some(translation) = self.variant(lang).filter(|t| !t.is_empty()) {
            let translation = translation.to_string();
            match self.kind {
                ElementKind::Input | ElementKind::TextArea => self.placeholder = Some(translation),
                ElementKind::Text | ElementKind::Title => self.text = translation,
            }
        }

        if let Some(placeholder) = self.placeholder_variant(lang).filter(|p| !p.is_empty()) {
            self.placeholder = Some(placeholder.to_string());
        }
    }
}

// ==================== Modals ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Login,
    Post,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modal {
    /// Whether the `show` class is set.
    pub visible: bool,
    pub title: String,
    /// Form field values by field name.
    pub fields: BTreeMap<String, String>,
    /// Inline error message; empty when there is none.
    pub error: String,
}

impl Modal {
    fn reset(&mut self) {
        self.fields.clear();
        self.error.clear();
    }
}

// ==================== Navigation ====================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavMenu {
    /// Hamburger and menu both carry `active`.
    pub open: bool,
}

impl NavMenu {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn on_link_click(&mut self) {
        self.open = false;
    }
}

/// Auth-dependent parts of the navigation bar.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthNav {
    /// Label of the Login button: "Login" for visitors, "Admin" when signed in.
    pub login_label: String,
    /// Whether the "Logout" nav item is present.
    pub logout_item: Option<String>,
}

// ==================== Contact Form ====================

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
    idle_label: String,
}

impl SubmitButton {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
            idle_label: label.to_string(),
        }
    }

    pub fn begin_sending(&mut self, sending_label: &str) {
        self.label = sending_label.to_string();
        self.disabled = true;
    }

    pub fn finish_sending(&mut self) {
        self.label = self.idle_label.clone();
        self.disabled = false;
    }

    /// Swap the idle text; a button mid-send keeps its sending label.
    pub fn set_idle_label(&mut self, label: &str) {
        self.idle_label = label.to_string();
        if !self.disabled {
            self.label = label.to_string();
        }
    }
}

// ==================== Page ====================

/// In-memory model of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub language: Language,
    /// Flag and code shown on the language button.
    pub language_button: String,
    pub elements: Vec<TranslatableElement>,
    pub nav_menu: NavMenu,
    pub auth_nav: AuthNav,
    /// `display: block` on the admin section.
    pub admin_section_visible: bool,
    pub login_modal: Modal,
    pub post_modal: Modal,
    /// `overflow: hidden` on the body while a modal is open.
    pub scroll_locked: bool,
    pub contact_submit: SubmitButton,
    /// Admin posts table body.
    pub admin_table: String,
    /// Public blog grid.
    pub blog_grid: String,
    /// Category select options in the post editor.
    pub category_options: String,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Page {
    pub fn new(elements: Vec<TranslatableElement>) -> Self {
        let language = Language::canonical();
        Self {
            language,
            language_button: language.button_label(),
            elements,
            nav_menu: NavMenu::default(),
            auth_nav: AuthNav {
                login_label: language.strings().login_button.to_string(),
                logout_item: None,
            },
            admin_section_visible: false,
            login_modal: Modal::default(),
            post_modal: Modal::default(),
            scroll_locked: false,
            contact_submit: SubmitButton::new(language.strings().send_message),
            admin_table: String::new(),
            blog_grid: String::new(),
            category_options: String::new(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&TranslatableElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Re-label every translatable element and the language button.
    pub fn apply_language(&mut self, lang: Language) {
        self.language = lang;
        self.language_button = lang.button_label();

        for element in &mut self.elements {
            element.apply_language(lang);
        }

        let strings = lang.strings();
        self.contact_submit.set_idle_label(strings.send_message);
        self.auth_nav.login_label = if self.admin_section_visible {
            strings.admin_button.to_string()
        } else {
            strings.login_button.to_string()
        };
        if self.auth_nav.logout_item.is_some() {
            self.auth_nav.logout_item = Some(strings.logout.to_string());
        }
    }

    pub fn modal(&self, kind: ModalKind) -> &Modal {
        match kind {
            ModalKind::Login => &self.login_modal,
            ModalKind::Post => &self.post_modal,
        }
    }

    fn modal_mut(&mut self, kind: ModalKind) -> &mut Modal {
        match kind {
            ModalKind::Login => &mut self.login_modal,
            ModalKind::Post => &mut self.post_modal,
        }
    }

    pub fn open_modal(&mut self, kind: ModalKind) {
        self.modal_mut(kind).visible = true;
        self.scroll_locked = true;
    }

    /// Hide the modal, reset its form and clear its inline error.
    pub fn close_modal(&mut self, kind: ModalKind) {
        let modal = self.modal_mut(kind);
        modal.visible = false;
        modal.reset();
        self.scroll_locked = self.login_modal.visible || self.post_modal.visible;
    }

    pub fn set_modal_error(&mut self, kind: ModalKind, message: &str) {
        self.modal_mut(kind).error = message.to_string();
    }

    /// Admin mode: admin section shown, Login becomes Admin, Logout added.
    pub fn show_admin(&mut self) {
        let strings = self.language.strings();
        self.admin_section_visible = true;
        self.auth_nav.login_label = strings.admin_button.to_string();
        if self.auth_nav.logout_item.is_none() {
            self.auth_nav.logout_item = Some(strings.logout.to_string());
        }
    }

    /// Visitor mode: admin-only UI removed.
    pub fn show_public(&mut self) {
        self.admin_section_visible = false;
        self.auth_nav.login_label = self.language.strings().login_button.to_string();
        self.auth_nav.logout_item = None;
        self.admin_table.clear();
        self.category_options.clear();
    }

    /// Whether any admin-only element is part of the rendered page.
    pub fn has_admin_ui(&self) -> bool {
        self.admin_section_visible
            || self.auth_nav.logout_item.is_some()
            || !self.admin_table.is_empty()
    }
}

// ==================== Scroll Effects ====================

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD
}

/// Scroll progress in percent, clamped to `0..=100`. Zero when the page
/// does not scroll.
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let max_scroll = scroll_height - client_height;
    if max_scroll <= 0.0 {
        return 0.0;
    }
    (scroll_top / max_scroll * 100.0).clamp(0.0, 100.0)
}

/// Hero image translation, only while the hero is still in view.
pub fn parallax_offset(scroll_y: f64, viewport_height: f64) -> Option<f64> {
    (scroll_y < viewport_height).then(|| scroll_y * PARALLAX_FACTOR)
}

/// Where to scroll so the target clears the fixed header.
pub fn smooth_scroll_target(offset_top: f64) -> f64 {
    offset_top - HEADER_OFFSET
}

/// Id of the nav section to highlight: the last one whose top is at or above
/// `scroll_y + HEADER_OFFSET`. `sections` must be in document order.
pub fn active_section<'a>(sections: &[(&'a str, f64)], scroll_y: f64) -> Option<&'a str> {
    sections
        .iter()
        .filter(|(_, top)| *top <= scroll_y + HEADER_OFFSET)
        .last()
        .map(|(id, _)| *id)
}

pub fn should_reveal(intersection_ratio: f64) -> bool {
    intersection_ratio >= REVEAL_THRESHOLD
}

// ==================== Hero Counter ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterSuffix {
    Plus,
    Percent,
    /// Value is hundredths of a star rating.
    Star,
    None,
}

impl CounterSuffix {
    /// Suffix of a counter's initial text, e.g. `"500+"`.
    pub fn detect(text: &str) -> Self {
        if text.contains('+') {
            CounterSuffix::Plus
        } else if text.contains('★') {
            CounterSuffix::Star
        } else if text.contains('%') {
            CounterSuffix::Percent
        } else {
            CounterSuffix::None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

/// Counter text `elapsed_ms` into an animation from `start` to `end`.
pub fn counter_frame(
    start: i64,
    end: i64,
    elapsed_ms: f64,
    duration_ms: f64,
    suffix: CounterSuffix,
) -> CounterFrame {
    let progress = if duration_ms <= 0.0 {
        1.0
    } else {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    };
    let value = (progress * (end - start) as f64 + start as f64).floor() as i64;

    let text = match suffix {
        CounterSuffix::Plus => format!("{}+", value),
        CounterSuffix::Percent => format!("{}%", value),
        CounterSuffix::Star => format!("{:.1}★", value as f64 / 100.0),
        CounterSuffix::None => value.to_string(),
    };

    CounterFrame {
        text,
        done: progress >= 1.0,
    }
}
