use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    request::Parts,
    HeaderValue, Method, Uri,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Which browser origins may call the API.
///
/// An origin passes if it matches an entry of `exact` verbatim, or if its
/// host ends with one of `suffixes` (`.vercel.app` admits every preview
/// deployment). Requests that carry no `Origin` header are not browser
/// cross-origin requests and are always let through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    exact: Vec<String>,
    suffixes: Vec<String>,
}

impl OriginPolicy {
    pub fn new(exact: Vec<String>, suffixes: Vec<String>) -> Self {
        let exact = exact
            .into_iter()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();
        let suffixes = suffixes
            .into_iter()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .map(|s| if s.starts_with('.') { s } else { format!(".{s}") })
            .collect();
        Self { exact, suffixes }
    }

    pub fn allows(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        if self.exact.iter().any(|o| o == origin) {
            return true;
        }

        let Ok(uri) = origin.parse::<Uri>() else {
            return false;
        };
        let Some(host) = uri.host().map(str::to_ascii_lowercase) else {
            return false;
        };
        self.suffixes.iter().any(|suffix| host.ends_with(suffix.as_str()))
    }

    /// `None` means the request had no `Origin` header
    pub fn allows_request(&self, origin: Option<&str>) -> bool {
        origin.map_or(true, |o| self.allows(o))
    }
}

pub fn build_cors_layer(policy: OriginPolicy, allow_credentials: bool) -> CorsLayer {
    let policy = Arc::new(policy);

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| policy.allows_request(Some(o)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(allow_credentials)
}
