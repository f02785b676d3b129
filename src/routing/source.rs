//! Request context and routing source

use std::collections::HashMap;

use crate::logging::generate_request_id;

/// Routing-relevant attributes of an inbound request.
///
/// Header names are stored lowercased so lookups are case-insensitive.
///
/// # Examples
///
/// ```
/// use route_balancer::routing::RequestContext;
///
/// let ctx = RequestContext::new()
///     .with_path("/orders/42")
///     .with_header("Region", "eu");
/// assert_eq!(ctx.header("region"), Some("eu"));
/// assert_eq!(ctx.path(), Some("/orders/42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
    method: Option<String>,
    path: Option<String>,
    headers: HashMap<String, String>,
}

impl RequestContext {
    /// Create an empty context with a freshly generated request ID
    pub fn new() -> Self {
        Self::with_request_id(generate_request_id())
    }

    /// Create an empty context with a caller-supplied request ID
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            method: None,
            path: None,
            headers: HashMap::new(),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into().to_uppercase());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a header. A later value for the same name replaces the earlier one.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_lowercase(), value.into());
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable, request-scoped input handed to a [`Router`](super::Router).
///
/// Built fresh for every selection from the coordinator's service ID and the
/// caller's [`RequestContext`]. Routers only ever see a shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingSource {
    service_id: String,
    request: RequestContext,
}

impl RoutingSource {
    pub fn new(service_id: impl Into<String>, request: RequestContext) -> Self {
        Self {
            service_id: service_id.into(),
            request,
        }
    }

    /// Logical service the request is addressed to
    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// Shorthand for `self.request().header(name)`
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.header(name)
    }
}
