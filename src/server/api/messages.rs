//! One-time confirmation messages.
//!
//! A mutating handler queues a message on its redirect response, and the next
//! page that displays messages shows it once and clears it. Messages travel in
//! the `messages` cookie as `.`-separated codes, so the cookie value never needs
//! escaping.
use std::future::{ready, Ready};

use actix_web::{
    cookie::{Cookie, SameSite},
    dev::Payload,
    FromRequest, HttpRequest, HttpResponse, HttpResponseBuilder,
};

/// Name of the cookie carrying queued messages.
pub const MESSAGES_COOKIE: &str = "messages";

/// Separator between message codes in the cookie value.
const SEPARATOR: char = '.';

/// A confirmation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// An author was created.
    AuthorCreated,
    /// An author was updated.
    AuthorUpdated,
    /// An author was deleted.
    AuthorDeleted,
}

impl Message {
    /// Code stored in the cookie.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AuthorCreated => "author_created",
            Self::AuthorUpdated => "author_updated",
            Self::AuthorDeleted => "author_deleted",
        }
    }

    /// Parse a cookie code. Unknown codes are ignored.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "author_created" => Some(Self::AuthorCreated),
            "author_updated" => Some(Self::AuthorUpdated),
            "author_deleted" => Some(Self::AuthorDeleted),
            _ => None,
        }
    }

    /// Text shown to the user.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::AuthorCreated => "New author was created successfully!",
            Self::AuthorUpdated => "Profile was updated successfully!",
            Self::AuthorDeleted => "Profile was deleted successfully!",
        }
    }
}

/// Messages queued for the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages(Vec<Message>);

impl Messages {
    /// Parse a `messages` cookie value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self(value.split(SEPARATOR).filter_map(Message::from_code).collect())
    }

    /// Whether no message is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Texts of all queued messages, oldest first.
    #[must_use]
    pub fn texts(&self) -> Vec<&'static str> {
        self.0.iter().map(|msg| msg.text()).collect()
    }

    /// Queue `message` after the already pending ones on a response.
    pub fn push_to(&self, builder: &mut HttpResponseBuilder, message: Message) {
        let value = self
            .0
            .iter()
            .chain(std::iter::once(&message))
            .map(|msg| msg.code())
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string());
        let mut cookie = Cookie::new(MESSAGES_COOKIE, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        builder.cookie(cookie);
    }

    /// Mark the messages as shown by clearing the cookie on `response`.
    pub fn consume(&self, response: &mut HttpResponse) {
        if self.is_empty() {
            return;
        }
        let mut cookie = Cookie::new(MESSAGES_COOKIE, "");
        cookie.set_path("/");
        cookie.make_removal();
        if let Err(err) = response.add_cookie(&cookie) {
            tracing::warn!("Unable to clear messages cookie: {err}");
        }
    }
}

impl FromRequest for Messages {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let messages = req
            .cookie(MESSAGES_COOKIE)
            .map(|cookie| Self::parse(cookie.value()))
            .unwrap_or_default();
        ready(Ok(messages))
    }
}
