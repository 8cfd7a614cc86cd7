// API client module: a small blocking HTTP client for the snippet service.
// Every public method maps to exactly one endpoint and returns the service's
// answer untouched; the only thing the client ever reads out of a body is the
// token handed back by `/authenticate`.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::ErrorBody;
use crate::session::{SessionStore, Token};

/// One call against the service, before it is bound to a base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments below the base URL, unescaped.
    pub segments: Vec<String>,
    /// JSON text, serialized from one of the typed bodies below so field
    /// order follows the struct.
    pub body: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            body: None,
        }
    }

    fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Human-readable path, e.g. `/snippets/42/vote`.
    pub fn path(&self) -> String {
        self.segments.iter().fold(String::new(), |mut acc, s| {
            acc.push('/');
            acc.push_str(s);
            acc
        })
    }

    /// Append the segments to `base`, percent-encoding each one so an id can
    /// never add or remove path levels.
    pub fn url(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl {
                url: base.to_string(),
                reason: "URL cannot carry path segments".into(),
            })?
            .pop_if_empty()
            .extend(&self.segments);
        Ok(url)
    }
}

/// Status and body exactly as the service sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body into one of the [`crate::models`] shapes.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// For a non-2xx answer, the service's own error message (or the raw
    /// body when it is not the usual `{"StatusCode", "Error"}` payload).
    pub fn service_error(&self) -> Option<ApiError> {
        if self.is_success() {
            return None;
        }
        let message = match serde_json::from_str::<ErrorBody>(&self.body) {
            Ok(err) => err.error,
            Err(_) => self.body.trim().to_string(),
        };
        Some(ApiError::Service {
            status: self.status,
            message,
        })
    }
}

/// Moves one request over the wire. Split out so tests can see exactly what
/// would have been sent.
pub trait Transport {
    fn execute(
        &self,
        url: Url,
        request: &ApiRequest,
        token: Option<&Token>,
    ) -> Result<RawResponse, ApiError>;
}

/// `Transport` backed by a reqwest blocking client. No timeout is set beyond
/// reqwest's own defaults.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        url: Url,
        request: &ApiRequest,
        token: Option<&Token>,
    ) -> Result<RawResponse, ApiError> {
        let mut req = self.client.request(request.method.clone(), url);
        // The service expects the bare token, no "Bearer" prefix.
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, token.as_str());
        }
        if let Some(body) = &request.body {
            req = req
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }
        let res = req.send()?;
        let status = res.status().as_u16();
        let body = res.text()?;
        Ok(RawResponse { status, body })
    }
}

/// Login / registration payload.
#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct NewSnippet<'a> {
    pub language: &'a str,
    pub contents: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct NewComment<'a> {
    pub contents: &'a str,
}

#[derive(Serialize, Debug)]
pub struct VoteBody {
    #[serde(rename = "Vote")]
    pub delta: i64,
}

#[derive(Deserialize)]
struct AuthenticateResponse {
    #[serde(rename = "Token")]
    token: Token,
}

/// Result of a successful login: the token now on disk, and the response it
/// came from.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: Token,
    pub response: RawResponse,
}

/// Client for the snippet service. Holds the transport, the base URL and the
/// session store the token is read from and written to.
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Ok(Self::with_transport(
            HttpTransport::new()?,
            config.base_url.clone(),
            SessionStore::new(&config.token_path),
        ))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T, base_url: Url, session: SessionStore) -> Self {
        Self {
            transport,
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn dispatch(&self, request: ApiRequest, token: Option<Token>) -> Result<RawResponse, ApiError> {
        let url = request.url(&self.base_url)?;
        debug!(
            method = %request.method,
            path = %request.path(),
            authorized = token.is_some(),
            "Sending request"
        );
        let response = self.transport.execute(url, &request, token.as_ref())?;
        debug!(status = response.status, bytes = response.body.len(), "Response received");
        Ok(response)
    }

    /// Send with whatever token the session store has, or none.
    fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let token = self.session.load();
        self.dispatch(request, token)
    }

    /// `POST /authenticate`. On success the returned token replaces the one
    /// in the session store. If the body carries no usable `Token`, nothing
    /// is written and the response is returned inside the error.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome, ApiError> {
        let request = ApiRequest::new(Method::POST, &["authenticate"])
            .json(&Credentials { username, password })?;
        let response = self.dispatch(request, None)?;

        let token = match serde_json::from_str::<AuthenticateResponse>(&response.body) {
            Ok(parsed) if !parsed.token.as_str().is_empty() => parsed.token,
            Ok(_) => {
                return Err(ApiError::Extraction {
                    reason: "empty Token field".into(),
                    response,
                })
            }
            Err(e) => {
                return Err(ApiError::Extraction {
                    reason: e.to_string(),
                    response,
                })
            }
        };

        self.session.save(&token)?;
        info!(username, "Authenticated");
        Ok(AuthOutcome { token, response })
    }

    /// `POST /create_account`
    pub fn create_account(&self, username: &str, password: &str) -> Result<RawResponse, ApiError> {
        let request = ApiRequest::new(Method::POST, &["create_account"])
            .json(&Credentials { username, password })?;
        self.dispatch(request, None)
    }

    /// `GET /users/{id}`
    pub fn get_user(&self, id: &str) -> Result<RawResponse, ApiError> {
        self.send(ApiRequest::new(Method::GET, &["users", id]))
    }

    /// `GET /users/current`
    pub fn get_current_user(&self) -> Result<RawResponse, ApiError> {
        self.send(ApiRequest::new(Method::GET, &["users", "current"]))
    }

    /// `GET /users/{user_id}/snippets`
    pub fn get_snippets_by_user(&self, user_id: &str) -> Result<RawResponse, ApiError> {
        self.send(ApiRequest::new(Method::GET, &["users", user_id, "snippets"]))
    }

    /// `GET /snippets/language/{language}`
    pub fn get_snippets_by_language(&self, language: &str) -> Result<RawResponse, ApiError> {
        self.send(ApiRequest::new(Method::GET, &["snippets", "language", language]))
    }

    /// `GET /snippets/{id}`
    pub fn get_snippet(&self, id: &str) -> Result<RawResponse, ApiError> {
        self.send(ApiRequest::new(Method::GET, &["snippets", id]))
    }

    /// `POST /snippets`
    pub fn post_snippet(&self, language: &str, contents: &str) -> Result<RawResponse, ApiError> {
        let request = ApiRequest::new(Method::POST, &["snippets"])
            .json(&NewSnippet { language, contents })?;
        self.send(request)
    }

    /// `DELETE /snippets/{id}`
    pub fn delete_snippet(&self, id: &str) -> Result<RawResponse, ApiError> {
        self.send(ApiRequest::new(Method::DELETE, &["snippets", id]))
    }

    /// `POST /snippets/{id}/vote`. The sign and size of `delta` are left to
    /// the service to judge.
    pub fn vote_snippet(&self, id: &str, delta: i64) -> Result<RawResponse, ApiError> {
        let request =
            ApiRequest::new(Method::POST, &["snippets", id, "vote"]).json(&VoteBody { delta })?;
        self.send(request)
    }

    /// `GET /snippets/{snippet_id}/comments`
    pub fn get_comments(&self, snippet_id: &str) -> Result<RawResponse, ApiError> {
        self.send(ApiRequest::new(Method::GET, &["snippets", snippet_id, "comments"]))
    }

    /// `POST /snippets/{snippet_id}/comments`
    pub fn post_comment(&self, snippet_id: &str, contents: &str) -> Result<RawResponse, ApiError> {
        let request = ApiRequest::new(Method::POST, &["snippets", snippet_id, "comments"])
            .json(&NewComment { contents })?;
        self.send(request)
    }

    /// `DELETE /comments/{id}`
    pub fn delete_comment(&self, id: &str) -> Result<RawResponse, ApiError> {
        self.send(ApiRequest::new(Method::DELETE, &["comments", id]))
    }
}
