// API client module: a small blocking HTTP client for the apidoc service.
// Each operation maps to exactly one request. Whatever status the service
// answers with is handed back untouched in an `ApiResponse`; only failures
// to complete the request surface as errors.

use crate::error::{ApiError, ApiResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Public service endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.apidoc.me/";

/// Who may see an application or a version on the service.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    User,
    Organization,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::User, Visibility::Organization];

    /// Wire name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::User => "user",
            Visibility::Organization => "organization",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the visibility levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVisibilityError(pub String);

impl fmt::Display for ParseVisibilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown visibility '{}'", self.0)
    }
}

impl std::error::Error for ParseVisibilityError {}

impl FromStr for Visibility {
    type Err = ParseVisibilityError;

    /// Case-insensitive: `Organization` and `ORGANIZATION` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Visibility::ALL
            .into_iter()
            .find(|v| v.as_str() == lowered)
            .ok_or_else(|| ParseVisibilityError(s.to_string()))
    }
}

/// Body of the create-application call.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ApplicationDescriptor {
    pub name: String,
    pub key: String,
    pub description: String,
    pub visibility: Visibility,
}

/// Body of the version upsert call. `original_form` carries the raw
/// documentation under the single key `data`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VersionUpsertPayload {
    pub original_form: BTreeMap<String, String>,
    pub visibility: Visibility,
}

impl VersionUpsertPayload {
    pub fn new(document: &str, visibility: Visibility) -> Self {
        let mut original_form = BTreeMap::new();
        original_form.insert("data".to_string(), document.to_string());
        VersionUpsertPayload {
            original_form,
            visibility,
        }
    }
}

/// Raw outcome of a call: status code, reason phrase and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub http_response_code: u16,
    pub reason: String,
    pub message: String,
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "httpresponsecode={}reason={}message={}",
            self.http_response_code, self.reason, self.message
        )
    }
}

/// Encode a token for the `Authorization: Basic` header: drop every
/// whitespace character, then base64 the remaining bytes. No `user:` prefix.
pub fn encrypt_token(token: &str) -> String {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.encode(compact.as_bytes())
}

/// Blocking client bound to one service endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`. A trailing slash is optional.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let client = Client::builder().build().map_err(ApiError::Client)?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an application under `org_key`. Insert only: the service
    /// answers 200 on success and 409 when `app_key` already exists.
    pub fn create_app(
        &self,
        token: &str,
        org_key: &str,
        app_name: &str,
        app_key: &str,
        description: &str,
        visibility: Visibility,
    ) -> ApiResult<ApiResponse> {
        let url = self.endpoint(&[org_key]);
        let application = ApplicationDescriptor {
            name: app_name.to_string(),
            key: app_key.to_string(),
            description: description.to_string(),
            visibility,
        };
        debug!(%url, app_key, %visibility, "creating application");
        let req = self.authorized(self.client.post(&url), token).json(&application);
        self.execute(req, url)
    }

    /// Delete an application and all of its versions. 204 on success.
    pub fn delete_app(&self, token: &str, org_key: &str, app_key: &str) -> ApiResult<ApiResponse> {
        let url = self.endpoint(&[org_key, app_key]);
        debug!(%url, "deleting application");
        let req = self.authorized(self.client.delete(&url), token);
        self.execute(req, url)
    }

    /// Create or replace `version` of an application. `document` is sent
    /// verbatim as `original_form.data`. 200 on success, both for a new
    /// version and for an overwrite.
    pub fn create_app_version(
        &self,
        token: &str,
        org_key: &str,
        app_key: &str,
        version: &str,
        document: &str,
        visibility: Visibility,
    ) -> ApiResult<ApiResponse> {
        let url = self.endpoint(&[org_key, app_key, version]);
        let payload = VersionUpsertPayload::new(document, visibility);
        debug!(%url, bytes = document.len(), %visibility, "upserting version");
        let req = self.authorized(self.client.put(&url), token).json(&payload);
        self.execute(req, url)
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Headers shared by every call. Content-Type is sent even on DELETE.
    fn authorized(&self, req: RequestBuilder, token: &str) -> RequestBuilder {
        req.header(ACCEPT, "text/plain")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Basic {}", encrypt_token(token)))
    }

    fn execute(&self, req: RequestBuilder, url: String) -> ApiResult<ApiResponse> {
        let res = match req.send() {
            Ok(res) => res,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };
        let status = res.status();
        let message = match res.text() {
            Ok(body) => body,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };
        info!(%url, status = status.as_u16(), "service responded");
        Ok(ApiResponse {
            http_response_code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            message,
        })
    }
}
