//! HTML fragments for the admin table, the public blog grid and the editor's
//! category select.
//!
//! Translatable labels carry both variants as `data-en` / `data-de` so the
//! language toggle can swap them in place; the displayed text is the variant
//! for the language active at render time.

use crate::i18n::{Language, ENGLISH_STRINGS, GERMAN_STRINGS};
use crate::posts::{Category, Post};
use chrono::{DateTime, Utc};

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 4);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// Short date in the reader's convention.
pub fn format_date(date: &DateTime<Utc>, lang: Language) -> String {
    if lang == Language::GERMAN {
        date.format("%d.%m.%Y").to_string()
    } else {
        date.format("%m/%d/%Y").to_string()
    }
}

/// `<span data-en=".." data-de="..">..</span>`
fn bilingual_span(en: &str, de: &str, lang: Language) -> String {
    let shown = if lang == Language::GERMAN { de } else { en };
    format!(
        r#"<span data-en="{}" data-de="{}">{}</span>"#,
        escape_html(en),
        escape_html(de),
        escape_html(shown)
    )
}

/// Rows for the admin posts table body.
pub fn admin_table_rows(posts: &[Post], lang: Language) -> String {
    if posts.is_empty() {
        return format!(
            r#"<tr><td colspan="5" class="text-center">{}</td></tr>"#,
            bilingual_span(
                ENGLISH_STRINGS.no_posts_admin,
                GERMAN_STRINGS.no_posts_admin,
                lang
            )
        );
    }

    posts
        .iter()
        .map(|post| admin_row(post, lang))
        .collect::<Vec<_>>()
        .join("\n")
}

fn admin_row(post: &Post, lang: Language) -> String {
    let category = match post.category_name() {
        Some(name) if !name.is_empty() => escape_html(name),
        _ => bilingual_span(
            ENGLISH_STRINGS.uncategorized,
            GERMAN_STRINGS.uncategorized,
            lang,
        ),
    };
    let id = escape_html(&post.id);
    let status = post.status.as_str();

    format!(
        concat!(
            "<tr>",
            "<td>{title}</td>",
            "<td>{category}</td>",
            r#"<td><span class="status-badge status-{status}">{status}</span></td>"#,
            "<td>{updated}</td>",
            r#"<td class="actions">"#,
            r#"<button class="btn-action edit-post" data-id="{id}"><i class="fas fa-edit"></i>{edit}</button>"#,
            r#"<button class="btn-action delete delete-post" data-id="{id}"><i class="fas fa-trash"></i>{delete}</button>"#,
            "</td>",
            "</tr>"
        ),
        title = escape_html(&post.title),
        category = category,
        status = status,
        updated = format_date(&post.updated_at, lang),
        id = id,
        edit = bilingual_span(ENGLISH_STRINGS.edit, GERMAN_STRINGS.edit, lang),
        delete = bilingual_span(ENGLISH_STRINGS.delete, GERMAN_STRINGS.delete, lang),
    )
}

/// Cards for the public blog grid. Links point at `<base_path>/<slug>`.
pub fn public_grid(posts: &[Post], base_path: &str, lang: Language) -> String {
    if posts.is_empty() {
        return format!(
            r#"<div class="no-posts"><p>{}</p></div>"#,
            bilingual_span(
                ENGLISH_STRINGS.no_posts_public,
                GERMAN_STRINGS.no_posts_public,
                lang
            )
        );
    }

    let base_path = base_path.trim_end_matches('/');
    posts
        .iter()
        .map(|post| public_card(post, base_path, lang))
        .collect::<Vec<_>>()
        .join("\n")
}

fn public_card(post: &Post, base_path: &str, lang: Language) -> String {
    let mut html = String::from(r#"<article class="blog-card">"#);

    if let Some(cover) = post.cover_image.as_deref().filter(|c| !c.is_empty()) {
        html.push_str(&format!(
            r#"<img src="{}" alt="{}" class="blog-image">"#,
            escape_html(cover),
            escape_html(&post.title)
        ));
    }

    html.push_str(r#"<div class="blog-content">"#);
    if let Some(category) = post.category_name().filter(|c| !c.is_empty()) {
        html.push_str(&format!(
            r#"<span class="blog-category">{}</span>"#,
            escape_html(category)
        ));
    }
    html.push_str(&format!(
        r#"<h3 class="blog-title">{}</h3>"#,
        escape_html(&post.title)
    ));
    html.push_str(&format!(
        r#"<p class="blog-excerpt">{}</p>"#,
        escape_html(post.excerpt.as_deref().unwrap_or(""))
    ));

    html.push_str(r#"<div class="blog-meta">"#);
    let date = post
        .published_at
        .as_ref()
        .map(|d| format_date(d, lang))
        .unwrap_or_default();
    html.push_str(&format!(r#"<span class="blog-date">{}</span>"#, date));
    if let Some(author) = post.author_name() {
        html.push_str(&format!(
            r#"<span class="blog-author">{}</span>"#,
            escape_html(author)
        ));
    }
    html.push_str("</div>");

    html.push_str(&format!(
        r#"<a href="{}/{}" class="btn btn-outline btn-small">{}</a>"#,
        escape_html(base_path),
        escape_html(&post.slug),
        bilingual_span(ENGLISH_STRINGS.read_more, GERMAN_STRINGS.read_more, lang)
    ));
    html.push_str("</div></article>");

    html
}

/// `<option>`s for the editor's category select, with `selected` marked.
pub fn category_options(categories: &[Category], selected: Option<&str>) -> String {
    let mut html = String::from(r#"<option value="">-</option>"#);

    for category in categories {
        let marker = if selected == Some(category.id.as_str()) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            escape_html(&category.id),
            marker,
            escape_html(&category.name)
        ));
    }

    html
}
