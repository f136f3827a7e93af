//! Extension-based admission filter.
//!
//! Decides from the URL alone whether a download belongs to the companion
//! downloader. This is a heuristic on the path's final extension, not content
//! sniffing: unknown extensions stay in the browser.

mod extensions;
mod wildcard;

pub use extensions::{is_allowed_extension, ALLOWED_EXTENSIONS};
pub use wildcard::is_split_archive_part;

/// Uppercased text after the last `.` of the URL path.
///
/// Returns `None` if the URL cannot be parsed. A path with no `.` yields the
/// whole path (e.g. `/DOWNLOAD`), which never matches an extension.
pub fn path_extension(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let path = parsed.path();
    let ext = path.rsplit('.').next().unwrap_or(path);
    Some(ext.to_ascii_uppercase())
}

/// True if a download of `url` should be handed to the companion downloader.
///
/// Unparsable URLs are rejected.
///
/// # Examples
///
/// - `is_admitted("http://x/file.ZIP")` → `true`
/// - `is_admitted("http://x/a.r01")` → `true`
/// - `is_admitted("http://x/page.html")` → `false`
pub fn is_admitted(url: &str) -> bool {
    match path_extension(url) {
        Some(ext) => is_allowed_extension(&ext) || is_split_archive_part(&ext),
        None => false,
    }
}

/// True if `url` parses with an `http` or `https` scheme.
pub fn is_http_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
