//! URL Utility Functions
//!
//! Validation of result URLs, unwrapping of the results page's redirect
//! links, the denylist of the search engine's own non-content pages, and the
//! normalization used for deduplication.

use url::Url;

use crate::patterns::SEARCH_ENGINE_HOST;

/// Base used to resolve relative hrefs found on the results page.
pub const SEARCH_ENGINE_BASE: &str = "https://www.google.com";

/// Redirect links nested deeper than this are treated as undecodable.
const MAX_REDIRECT_DEPTH: usize = 4;

/// Query parameters a redirect link may carry its destination in.
const REDIRECT_PARAMS: &[&str] = &["q", "url"];

/// Subdomains of the search engine that never host organic content.
const DENIED_SUBDOMAINS: &[&str] = &[
    "accounts",
    "myaccount",
    "support",
    "policies",
    "maps",
    "images",
    "consent",
];

/// Paths on the search engine's main site that never host organic content.
const DENIED_PATHS: &[&str] = &[
    "/search",
    "/imgres",
    "/maps",
    "/preferences",
    "/setprefs",
    "/advanced_search",
    "/url",
    "/sorry",
    "/webhp",
    "/intl/",
    "/policies",
    "/support",
    "/accounts",
    "/history",
];

/// Cache host that serves stored copies of result pages.
const CACHE_HOST: &str = "webcache.googleusercontent.com";

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) => {
            if url.host().is_some() {
                (true, Some(url))
            } else {
                (false, None)
            }
        }
        Err(_) => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Normalize a URL by removing fragments and a trailing path slash.
///
/// Used as the deduplication key, so two hrefs differing only in fragment
/// count as the same destination.
#[must_use]
pub fn normalize_url(url_str: &str) -> String {
    let Some(mut url) = parse_url(url_str) else {
        return url_str.to_string();
    };

    url.set_fragment(None);

    // Remove trailing slash from path (unless root)
    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(&path[..path.len() - 1]);
    }

    url.to_string()
}

/// One step of redirect decoding.
enum RedirectStep {
    /// Not a redirect link; use as-is.
    Plain,
    /// A redirect link carrying this destination.
    Target(String),
    /// A redirect link whose destination cannot be recovered.
    Undecodable,
}

fn redirect_step(href: &str) -> RedirectStep {
    let is_relative_wrapper = href.starts_with("/url?");
    let resolved = if is_relative_wrapper {
        Url::parse(SEARCH_ENGINE_BASE).and_then(|base| base.join(href)).ok()
    } else {
        parse_url(href)
    };

    let Some(url) = resolved else {
        return RedirectStep::Plain;
    };

    let engine_host = url
        .host_str()
        .is_some_and(|h| SEARCH_ENGINE_HOST.is_match(h));
    if url.path() != "/url" || !(is_relative_wrapper || engine_host) {
        return RedirectStep::Plain;
    }

    for param in REDIRECT_PARAMS {
        let found = url
            .query_pairs()
            .find(|(k, v)| k.as_ref() == *param && !v.is_empty());
        if let Some((_, value)) = found {
            return RedirectStep::Target(value.into_owned());
        }
    }

    RedirectStep::Undecodable
}

/// Decode the destination of a redirect-wrapper link.
///
/// Non-wrapper hrefs are returned trimmed and otherwise unchanged. Wrappers are
/// decoded repeatedly until a plain URL remains, so the output is never itself
/// a wrapper and applying this twice gives the same answer as applying it once.
///
/// Returns `None` when a wrapper carries no usable destination.
///
/// # Examples
///
/// ```
/// use serp_proxy::url_utils::unwrap_redirect;
///
/// assert_eq!(
///     unwrap_redirect("/url?q=https://www.rust-lang.org/&sa=U").as_deref(),
///     Some("https://www.rust-lang.org/")
/// );
/// assert_eq!(
///     unwrap_redirect("https://www.rust-lang.org/").as_deref(),
///     Some("https://www.rust-lang.org/")
/// );
/// ```
#[must_use]
pub fn unwrap_redirect(href: &str) -> Option<String> {
    let mut current = href.trim().to_string();

    for _ in 0..=MAX_REDIRECT_DEPTH {
        match redirect_step(&current) {
            RedirectStep::Plain => return Some(current),
            RedirectStep::Target(target) => current = target.trim().to_string(),
            RedirectStep::Undecodable => return None,
        }
    }

    None
}

/// Check whether a URL points at one of the search engine's own
/// non-content pages (search, image results, maps, account, preference,
/// policy, support, or cache pages).
#[must_use]
pub fn is_denied_destination(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return true;
    };
    let host = host.to_ascii_lowercase();

    if host == CACHE_HOST {
        return true;
    }
    if !SEARCH_ENGINE_HOST.is_match(&host) {
        return false;
    }

    let bare = host.strip_prefix("www.").unwrap_or(&host);
    if bare.starts_with("google.") {
        let path = url.path();
        return path == "/" || DENIED_PATHS.iter().any(|p| path.starts_with(p));
    }

    host.split('.')
        .next()
        .is_some_and(|sub| DENIED_SUBDOMAINS.contains(&sub))
}

/// Turn a result link's href into an acceptable destination URL.
///
/// Unwraps redirect links, then requires an absolute http(s) URL that is not
/// on the denylist. Deduplication is the caller's concern.
#[must_use]
pub fn resolve_result_url(href: &str) -> Option<String> {
    let unwrapped = unwrap_redirect(href)?;
    let parsed = parse_url(&unwrapped)?;
    if is_denied_destination(&parsed) {
        return None;
    }
    Some(unwrapped)
}

/// Results-page URL for a bare query, used by placeholder results.
///
/// # Examples
///
/// ```
/// use serp_proxy::url_utils::search_page_url;
///
/// assert_eq!(
///     search_page_url("rust programming"),
///     "https://www.google.com/search?q=rust+programming"
/// );
/// ```
#[must_use]
pub fn search_page_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{SEARCH_ENGINE_BASE}/search?q={encoded}")
}
