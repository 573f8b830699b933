//! Landing page.
use actix_web::HttpResponse;
use serde::Serialize;

use super::messages::Messages;
use super::render::render_with_messages;

/// Sections linked from the landing page, as `(title, path)`.
pub const SECTIONS: [(&str, &str); 4] = [
    ("Books", "/books/"),
    ("Authors", "/authors/"),
    ("Stores", "/stores/"),
    ("Publishers", "/publishers/"),
];

/// A link to a catalog section.
#[derive(Serialize, Debug)]
pub struct Link {
    /// Section title.
    pub title: &'static str,
    /// Section path.
    pub href: &'static str,
}

/// Context of the landing page.
#[derive(Serialize, Debug)]
pub struct Index {
    /// Catalog sections.
    pub links: Vec<Link>,
    /// Confirmation messages queued by a previous edit.
    pub messages: Vec<&'static str>,
}

/// Render the landing page.
pub async fn index(messages: Messages) -> HttpResponse {
    let links = SECTIONS
        .iter()
        .map(|&(title, href)| Link { title, href })
        .collect();
    let context = Index {
        links,
        messages: messages.texts(),
    };
    render_with_messages(&context, &messages)
}
