//! Path pattern matching with named parameters and wildcards.
//!
//! Supported pattern syntax:
//! - `{name}` or `:name` captures one path segment
//! - `*` matches any remainder, including slashes
//! - an absolute pattern (`https://host/path`) must match the request origin too

use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathMatch {
    pub matched: bool,
    pub params: HashMap<String, String>,
}

/// Split `scheme://host[:port]` off an absolute URL.
///
/// Relative URLs come back with no origin and unchanged. A `://` that does not
/// follow a scheme at the very start (e.g. inside a query value) is not an origin.
pub fn split_origin(url: &str) -> (Option<&str>, &str) {
    let Some(scheme_end) = url.find("://") else {
        return (None, url);
    };
    if !is_scheme(&url[..scheme_end]) {
        return (None, url);
    }
    let authority_start = scheme_end + 3;
    let end = url[authority_start..]
        .find(|c: char| c == '/' || c == '?' || c == '#')
        .map(|i| authority_start + i)
        .unwrap_or(url.len());
    (Some(&url[..end]), &url[end..])
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

pub fn path_matches(pattern: &str, url: &str) -> PathMatch {
    let (pattern_origin, pattern_path) = split_origin(pattern);
    let (url_origin, url_path) = split_origin(url);

    if let Some(expected) = pattern_origin {
        match url_origin {
            Some(actual) if actual.eq_ignore_ascii_case(expected) => {}
            _ => return PathMatch::default(),
        }
    }

    let pattern_path = normalize_path(pattern_path);
    let url_path = normalize_path(url_path);

    let Some((regex, param_names)) = pattern_to_regex(&pattern_path) else {
        return PathMatch::default();
    };

    let Some(caps) = regex.captures(&url_path) else {
        return PathMatch::default();
    };

    let params = param_names
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| {
            caps.get(i + 1).map(|m| {
                let value = urlencoding::decode(m.as_str())
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| m.as_str().to_owned());
                (name, value)
            })
        })
        .collect();

    PathMatch {
        matched: true,
        params,
    }
}

fn normalize_path(path: &str) -> String {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/".into()
    } else {
        trimmed.into()
    }
}

fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn pattern_to_regex(pattern: &str) -> Option<(Regex, Vec<String>)> {
    let mut param_names = Vec::new();
    let mut regex_str = String::from("^");
    let mut chars = pattern.chars().peekable();
    let mut segment_start = true;

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                param_names.push(name);
                regex_str.push_str("([^/]+)");
            }
            ':' if segment_start && chars.peek().is_some_and(|&c| is_param_char(c)) => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if !is_param_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                param_names.push(name);
                regex_str.push_str("([^/]+)");
            }
            '*' => regex_str.push_str("(?:.*)"),
            _ => regex_str.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        segment_start = c == '/';
    }
    regex_str.push('$');

    Regex::new(&regex_str).ok().map(|regex| (regex, param_names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/health", "/api/health", true, &[])]
    #[case("/api/health", "/api/health/", true, &[])]
    #[case("/api/health", "/api/health?verbose=1", true, &[])]
    #[case("/api/health", "/api/healthz", false, &[])]
    #[case("/api/birds/{id}", "/api/birds/123", true, &[("id", "123")])]
    #[case("/api/birds/:id", "/api/birds/abc-123", true, &[("id", "abc-123")])]
    #[case("/api/birds/:id/sightings/{sid}", "/api/birds/1/sightings/2", true, &[("id", "1"), ("sid", "2")])]
    #[case("/api/birds/{name}", "/api/birds/white%20sparrow", true, &[("name", "white sparrow")])]
    #[case("/api/birds/{id}", "/api/birds", false, &[])]
    #[case("/api/birds/{id}", "/api/birds/1/extra", false, &[])]
    #[case("/api/*", "/api/birds/1/extra", true, &[])]
    #[case("/api/*", "/static/app.js", false, &[])]
    #[case("/", "/", true, &[])]
    #[case("/api/users.json", "/api/users.json", true, &[])]
    #[case("/api/users.json", "/api/usersXjson", false, &[])]
    #[case("/api/health", "http://localhost:5173/api/health", true, &[])]
    #[case("http://localhost:8000/api/health", "http://localhost:8000/api/health", true, &[])]
    #[case("http://localhost:8000/api/health", "http://localhost:5173/api/health", false, &[])]
    #[case("http://localhost:8000/api/health", "/api/health", false, &[])]
    #[case("/api/health", "/api/health?next=http://localhost/home", true, &[])]
    #[case("/home", "/api/health?next=http://localhost/home", false, &[])]
    #[case("/api/birds/{id}", "/api/birds/7#from=https://example.org/x", true, &[("id", "7")])]
    fn test_path_matches(
        #[case] pattern: &str,
        #[case] url: &str,
        #[case] expected: bool,
        #[case] params: &[(&str, &str)],
    ) {
        let result = path_matches(pattern, url);
        assert_eq!(result.matched, expected);
        for (k, v) in params {
            assert_eq!(result.params.get(*k), Some(&(*v).to_owned()));
        }
    }

    #[rstest]
    #[case("http://localhost:8000/api?x=1", Some("http://localhost:8000"), "/api?x=1")]
    #[case("https://example.org", Some("https://example.org"), "")]
    #[case("/api/health", None, "/api/health")]
    #[case("/api/health?next=http://localhost/home", None, "/api/health?next=http://localhost/home")]
    #[case("/redirect/http://example.org", None, "/redirect/http://example.org")]
    #[case("1http://example.org/x", None, "1http://example.org/x")]
    #[case("svn+ssh://host/repo", Some("svn+ssh://host"), "/repo")]
    fn test_split_origin(
        #[case] url: &str,
        #[case] origin: Option<&str>,
        #[case] rest: &str,
    ) {
        assert_eq!(split_origin(url), (origin, rest));
    }
}
