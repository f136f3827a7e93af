//! `turbo check <url>...` – dry-run the admission filter.

use turbo_core::admission;

/// Verdict for one URL, matching what the host would do past the grace window.
pub(crate) fn verdict(url: &str) -> &'static str {
    if !admission::is_http_url(url) {
        "ignored (unsupported scheme)"
    } else if admission::is_admitted(url) {
        "admitted"
    } else {
        "ignored (not admitted)"
    }
}

pub fn run_check(urls: &[String]) {
    for url in urls {
        println!("{:<30} {}", verdict(url), url);
    }
}
