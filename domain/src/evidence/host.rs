//! Domain-name derivation for search results and sources.

use url::Url;

/// Derive the normalized domain of a URL.
///
/// Scheme-less inputs such as `reuters.com/markets` are retried with an
/// `https://` prefix. Returns `None` when no host can be found.
///
/// ```
/// use sensing_domain::evidence::domain_of;
///
/// assert_eq!(
///     domain_of("https://www.reuters.com/markets/rates"),
///     Some("reuters.com".to_string())
/// );
/// assert_eq!(domain_of("not a url"), None);
/// ```
pub fn domain_of(raw_url: &str) -> Option<String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = Url::parse(trimmed)
        .ok()
        .filter(|u| u.host_str().is_some())
        .or_else(|| Url::parse(&format!("https://{}", trimmed)).ok())?;

    let host = parsed.host_str()?;
    if !host.contains('.') {
        return None;
    }
    Some(normalize_domain(host))
}

/// Normalize a domain for comparison: lowercase, no trailing dot, no `www.`.
///
/// `www.bloomberg.com` and `bloomberg.com` are the same publisher and must not
/// count as two independent sources.
pub fn normalize_domain(domain: &str) -> String {
    let lower = domain.trim().trim_end_matches('.').to_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => lower,
    }
}

/// Suffix match on label boundaries.
///
/// `markets.reuters.com` is under `reuters.com`; `notreuters.com` is not.
pub fn is_same_or_subdomain(domain: &str, parent: &str) -> bool {
    let domain = normalize_domain(domain);
    let parent = normalize_domain(parent);
    if parent.is_empty() {
        return false;
    }
    domain == parent || domain.ends_with(&format!(".{}", parent))
}
