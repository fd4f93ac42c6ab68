//! Route state for the buttons screen.
//!
//! The current page lives in a query string (`/buttons?page=N`), the way a
//! browser address bar would carry it.

use reqwest::Url;
use std::fmt;

/// Path of the buttons screen.
pub const BUTTONS_PATH: &str = "/buttons";

/// Placeholder origin used only to parse relative locations.
const PARSE_BASE: &str = "http://local.invalid/";

/// Navigation state of the buttons screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// 1-based page number
    pub page: u32,
}

impl Default for Route {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Route {
    pub fn with_page(page: u32) -> Self {
        Self { page: page.max(1) }
    }

    /// Parse a location such as `/buttons?page=2`, `?page=2` or `page=2`.
    ///
    /// # Details
    /// Missing, non-numeric, zero or negative pages all fall back to 1.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let location = if location.contains('?') || location.starts_with('/') {
            location.to_string()
        } else {
            format!("?{}", location)
        };

        let page = Url::parse(PARSE_BASE)
            .and_then(|base| base.join(&location))
            .ok()
            .and_then(|url| {
                url.query_pairs()
                    .find(|(key, _)| key == "page")
                    .map(|(_, value)| parse_page(&value))
            })
            .unwrap_or(1);

        Self { page }
    }

    /// Same route on another page.
    pub fn to_page(self, page: u32) -> Self {
        Self::with_page(page)
    }
}

/// Lenient page parsing: anything that is not an integer ≥ 1 becomes 1.
pub fn parse_page(value: &str) -> u32 {
    match value.trim().parse::<i64>() {
        Ok(page) if page >= 1 => u32::try_from(page).unwrap_or(u32::MAX),
        _ => 1,
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?page={}", BUTTONS_PATH, self.page)
    }
}
