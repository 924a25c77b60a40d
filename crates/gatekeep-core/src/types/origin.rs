//! Allowed-origin matching for redirect URLs.

use url::Url;

/// Whether `url` is permitted by the `allowed` origin patterns.
///
/// The URL is parsed and patterns are compared against its host, or its
/// `host:port` when the pattern names a port. Userinfo, path and query
/// never take part. A lone `*` allows everything; elsewhere `*` matches any
/// run of characters. A pattern without a port also matches the same host
/// on any port.
pub fn is_valid_origin(url: &str, allowed: &[String]) -> bool {
    if allowed.iter().any(|p| p.trim() == "*") {
        return true;
    }

    let Some((host, port)) = host_parts(url) else {
        return false;
    };
    let origin = match port {
        Some(port) => format!("{host}:{port}"),
        None => host.clone(),
    };

    allowed.iter().any(|pattern| {
        let pattern = pattern_authority(pattern.trim());
        if pattern.contains(':') {
            glob_match(pattern, &origin)
        } else {
            glob_match(pattern, &host)
        }
    })
}

/// Host and effective port of a URL. Bare `host[:port]` values are read as
/// `http` URLs.
fn host_parts(url: &str) -> Option<(String, Option<u16>)> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let parsed = if url.contains("://") {
        Url::parse(url)
    } else {
        Url::parse(&format!("http://{url}"))
    }
    .ok()?;

    let host = parsed.host_str().filter(|h| !h.is_empty())?.to_string();
    Some((host, parsed.port_or_known_default()))
}

/// `host[:port]` part of a configured pattern. Patterns may hold `*`, so
/// they are trimmed textually rather than parsed.
fn pattern_authority(pattern: &str) -> &str {
    let rest = match pattern.find("://") {
        Some(idx) => &pattern[idx + 3..],
        None => pattern,
    };
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

/// Anchored, case-insensitive match where `*` spans any run of characters.
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.to_ascii_lowercase().chars().collect();
    let t: Vec<char> = text.to_ascii_lowercase().chars().collect();

    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while ti < t.len() {
        if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            pi += 1;
            resume = ti;
        } else if pi < p.len() && p[pi] == t[ti] {
            pi += 1;
            ti += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            resume += 1;
            ti = resume;
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}
