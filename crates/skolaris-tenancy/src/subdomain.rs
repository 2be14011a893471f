//! Host-header → tenant subdomain parsing.
//!
//! Parsing is total: every malformed, reserved, or non-tenant host
//! yields `None`. "No tenant" is always a representable, safe outcome
//! — the resolution stage decides what to do with it.

/// Labels that can never be tenant subdomains: operational hostnames
/// of the platform itself.
const RESERVED_SUBDOMAINS: &[&str] = &[
    "www", "api", "admin", "app", "portal", "auth", "mail", "static", "assets", "status", "docs",
];

/// Extract the tenant subdomain from a raw `Host` header value.
///
/// Returns `None` for localhost/loopback hosts, hosts outside
/// `base_domain`, the bare base domain, invalid DNS labels, and
/// reserved labels. Matching is case-insensitive; the returned label
/// is lowercase.
pub fn parse_subdomain(host: &str, base_domain: &str) -> Option<String> {
    // Strip a trailing :port, if any. Bracketed IPv6 literals keep
    // their colons.
    let host = host.trim();
    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };

    let host = host.to_ascii_lowercase();
    let base = base_domain.to_ascii_lowercase();

    // Local/dev bypass.
    if host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]" {
        return None;
    }

    // Bare base domain — no tenant.
    if host == base {
        return None;
    }

    let prefix = host.strip_suffix(&base)?.strip_suffix('.')?;
    if prefix.is_empty() {
        return None;
    }

    // Deeper names like `sso.acme.<base>` resolve to the first label.
    let label = prefix.split('.').next()?;

    if !is_valid_label(label) {
        return None;
    }

    if RESERVED_SUBDOMAINS.contains(&label) {
        return None;
    }

    Some(label.to_string())
}

/// DNS-label rules: 1–63 chars, lowercase alphanumeric or hyphen, no
/// leading/trailing hyphen.
fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "skolaris.io";

    #[test]
    fn plain_subdomain_parses() {
        assert_eq!(parse_subdomain("acme.skolaris.io", BASE), Some("acme".into()));
    }

    #[test]
    fn port_is_stripped() {
        assert_eq!(
            parse_subdomain("acme.skolaris.io:8443", BASE),
            Some("acme".into())
        );
    }

    #[test]
    fn host_case_is_folded() {
        assert_eq!(
            parse_subdomain("ACME.Skolaris.IO", BASE),
            Some("acme".into())
        );
    }

    #[test]
    fn hyphenated_and_numeric_labels_are_valid() {
        assert_eq!(
            parse_subdomain("north-42.skolaris.io", BASE),
            Some("north-42".into())
        );
    }

    #[test]
    fn deeper_names_use_first_label() {
        assert_eq!(
            parse_subdomain("sso.acme.skolaris.io", BASE),
            Some("sso".into())
        );
    }

    #[test]
    fn bare_base_domain_is_none() {
        assert_eq!(parse_subdomain("skolaris.io", BASE), None);
        assert_eq!(parse_subdomain("skolaris.io:443", BASE), None);
    }

    #[test]
    fn localhost_and_loopback_are_none() {
        assert_eq!(parse_subdomain("localhost", BASE), None);
        assert_eq!(parse_subdomain("localhost:3000", BASE), None);
        assert_eq!(parse_subdomain("127.0.0.1:3000", BASE), None);
        assert_eq!(parse_subdomain("[::1]:3000", BASE), None);
    }

    #[test]
    fn foreign_domains_are_none() {
        assert_eq!(parse_subdomain("acme.example.com", BASE), None);
        // Suffix match must be on label boundaries, not raw strings.
        assert_eq!(parse_subdomain("evilskolaris.io", BASE), None);
    }

    #[test]
    fn reserved_labels_are_none() {
        for reserved in ["www", "api", "admin", "app", "portal", "auth"] {
            assert_eq!(parse_subdomain(&format!("{reserved}.skolaris.io"), BASE), None);
        }
    }

    #[test]
    fn invalid_labels_are_none() {
        assert_eq!(parse_subdomain("-acme.skolaris.io", BASE), None);
        assert_eq!(parse_subdomain("acme-.skolaris.io", BASE), None);
        assert_eq!(parse_subdomain("ac_me.skolaris.io", BASE), None);
        let long = "a".repeat(64);
        assert_eq!(parse_subdomain(&format!("{long}.skolaris.io"), BASE), None);
    }

    #[test]
    fn sixty_three_char_label_is_valid() {
        let label = "a".repeat(63);
        assert_eq!(
            parse_subdomain(&format!("{label}.skolaris.io"), BASE),
            Some(label)
        );
    }

    #[test]
    fn empty_prefix_is_none() {
        assert_eq!(parse_subdomain(".skolaris.io", BASE), None);
    }
}
