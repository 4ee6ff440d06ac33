// Declared endpoint table.
//
// Each backend route is described once: HTTP method, path template and
// the shape of its success body. The client decodes by the declared
// shape, so adding a bare-payload route is a table edit, not a branch
// on the request path.

use std::fmt;

use crate::error::Error;

/// How a success body is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{ "status", "message", "data" }`; only `data` is returned.
    Enveloped,
    /// The body is the payload itself.
    Bare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// A single backend route.
///
/// `path` is relative to the API base URL. Placeholders are written as
/// `{name}` and each one occupies a whole path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: &'static str,
    pub shape: ResponseShape,
}

impl Endpoint {
    const fn new(method: HttpMethod, path: &'static str, shape: ResponseShape) -> Self {
        Self {
            method,
            path,
            shape,
        }
    }

    // ── Auth ─────────────────────────────────────────────────────────

    pub const LOGIN: Self = Self::new(HttpMethod::Post, "/login", ResponseShape::Enveloped);
    pub const REGISTER: Self = Self::new(HttpMethod::Post, "/register", ResponseShape::Enveloped);

    // ── Users ────────────────────────────────────────────────────────

    pub const LIST_USERS: Self = Self::new(HttpMethod::Get, "/users", ResponseShape::Enveloped);
    pub const GET_USER: Self = Self::new(HttpMethod::Get, "/user/{id}", ResponseShape::Enveloped);
    pub const USER_DEVICES: Self = Self::new(
        HttpMethod::Get,
        "/user/{id}/devices",
        ResponseShape::Enveloped,
    );
    pub const UPDATE_USER: Self = Self::new(HttpMethod::Patch, "/user", ResponseShape::Enveloped);
    pub const CHANGE_PASSWORD: Self = Self::new(
        HttpMethod::Patch,
        "/user/{id}/password",
        ResponseShape::Enveloped,
    );
    pub const USER_HEALTH_DATA: Self = Self::new(
        HttpMethod::Get,
        "/user/{id}/{deviceUuid}/health-data",
        ResponseShape::Enveloped,
    );

    // ── Devices ──────────────────────────────────────────────────────

    pub const LIST_DEVICES: Self =
        Self::new(HttpMethod::Get, "/devices", ResponseShape::Enveloped);
    pub const REGISTER_DEVICE: Self =
        Self::new(HttpMethod::Post, "/device", ResponseShape::Enveloped);
    pub const CONFIGURE_DEVICE: Self = Self::new(
        HttpMethod::Put,
        "/devices/{id}/config",
        ResponseShape::Enveloped,
    );

    // ── Health ───────────────────────────────────────────────────────

    pub const SYNC_HEALTH_DATA: Self = Self::new(
        HttpMethod::Post,
        "/sync/health-data",
        ResponseShape::Enveloped,
    );
    pub const DASHBOARD: Self = Self::new(HttpMethod::Get, "/dashboard", ResponseShape::Bare);

    // ── Alerts ───────────────────────────────────────────────────────

    pub const LIST_ALERTS: Self = Self::new(HttpMethod::Get, "/alerts", ResponseShape::Enveloped);
    pub const GET_ALERT: Self =
        Self::new(HttpMethod::Get, "/alerts/{id}", ResponseShape::Enveloped);
    pub const MARK_ALERT_VIEWED: Self = Self::new(
        HttpMethod::Patch,
        "/alerts/{id}/viewed",
        ResponseShape::Enveloped,
    );
    pub const MARK_ALERT_RESOLVED: Self = Self::new(
        HttpMethod::Patch,
        "/alerts/{id}/resolved",
        ResponseShape::Enveloped,
    );

    /// Expand the path template into concrete segments.
    ///
    /// Arguments fill `{..}` placeholders left to right. Returned segments
    /// are unencoded; the URL builder percent-encodes each one.
    pub fn segments<'a>(&self, args: &[&'a str]) -> Result<Vec<&'a str>, Error> {
        let mut args = args.iter();
        let mut out = Vec::new();

        for segment in self.path.split('/').filter(|s| !s.is_empty()) {
            if segment.starts_with('{') && segment.ends_with('}') {
                let value = args.next().ok_or_else(|| Error::PathTemplate {
                    template: self.path,
                    reason: format!("is missing a value for {segment}"),
                })?;
                out.push(*value);
            } else {
                out.push(segment);
            }
        }

        let surplus = args.count();
        if surplus > 0 {
            return Err(Error::PathTemplate {
                template: self.path,
                reason: format!("received {surplus} unused argument(s)"),
            });
        }

        Ok(out)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
