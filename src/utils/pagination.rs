//! Page number arithmetic for paginated listings.
//!
//! A listing always has at least one page, so an empty listing can still be
//! shown as an empty first page. Any other page outside `1..=num_pages` is
//! invalid.
use derive_more::Display;

/// Query-string keyword selecting the last page.
pub const LAST_PAGE: &str = "last";

/// Reasons a requested page cannot be served.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InvalidPage {
    /// Page is neither an integer nor `last`.
    #[display(fmt = "page '{}' is not an integer", _0)]
    NotAnInteger(String),
    /// Page number is below 1.
    #[display(fmt = "page {} is less than 1", _0)]
    LessThanOne(i64),
    /// Page number is past the last page.
    #[display(fmt = "page {} contains no results", _0)]
    Empty(i64),
}

impl std::error::Error for InvalidPage {}

/// One validated page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Current page number (1-indexed).
    pub number: i64,
    /// Total number of pages, at least 1.
    pub num_pages: i64,
    /// Total number of rows in the listing.
    pub count: i64,
    /// Rows per page.
    pub per_page: i64,
}

impl Page {
    /// Resolve the requested page of a listing with `count` rows.
    ///
    /// `requested` is the raw `page` query parameter, `None` meaning the first page.
    ///
    /// # Errors
    /// Errors if the page is not a number, or falls outside the listing.
    pub fn resolve(count: i64, per_page: i64, requested: Option<&str>) -> Result<Self, InvalidPage> {
        let per_page = per_page.max(1);
        let num_pages = num_pages(count, per_page);
        let number = match requested.map(str::trim) {
            None | Some("") => 1,
            Some(LAST_PAGE) => num_pages,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| InvalidPage::NotAnInteger(raw.to_owned()))?,
        };
        if number < 1 {
            return Err(InvalidPage::LessThanOne(number));
        }
        if number > num_pages {
            return Err(InvalidPage::Empty(number));
        }
        Ok(Self {
            number,
            num_pages,
            count,
            per_page,
        })
    }

    /// Offset of the first row of the page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    /// Whether there is a page after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// Whether there is a page before this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Number of the next page, if any.
    #[must_use]
    pub const fn next_page_number(&self) -> Option<i64> {
        if self.has_next() {
            Some(self.number + 1)
        } else {
            None
        }
    }

    /// Number of the previous page, if any.
    #[must_use]
    pub const fn previous_page_number(&self) -> Option<i64> {
        if self.has_previous() {
            Some(self.number - 1)
        } else {
            None
        }
    }
}

/// Number of pages needed for `count` rows, never less than 1.
#[must_use]
pub const fn num_pages(count: i64, per_page: i64) -> i64 {
    if count <= 0 {
        return 1;
    }
    (count + per_page - 1) / per_page
}
