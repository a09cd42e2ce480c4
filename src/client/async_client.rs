//! High-level asynchronous Genius client.

use crate::{
    API_ROOT, Auth, BodySnippetConfig, Error, HttpError, PUBLIC_API_ROOT, RequestHookContext, api,
    auth::{self, PublicFallback},
    transport::{
        ApiContent, ApiRoot, TransportBody, TransportRequest,
        async_transport::{AsyncTransport, DynAsyncTransport, ReqwestAsync},
        middleware::{HookAsync, ThrottleAsync, ThrottleConfig},
        request::{Request, Response},
    },
    types::TextFormat,
    util::{
        diagnostics::{self, redact_text},
        url::{endpoint_url, normalize_base_url, sanitize_url_for_error},
    },
};
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use std::{io, sync::Arc, time::Duration};
use url::Url;

#[cfg(feature = "tracing")]
use tracing::field;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures and constructs [`Client`].
pub struct ClientBuilder {
    api_root: String,
    public_root: String,
    auth: Option<Auth>,
    insecure: bool,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    no_proxy: bool,
    throttle: ThrottleConfig,
    response_format: TextFormat,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    request_hook: Option<crate::RequestHook>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a builder with opinionated defaults.
    #[must_use]
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("application", HeaderValue::from_static(env!("CARGO_PKG_NAME")));

        Self {
            api_root: API_ROOT.to_owned(),
            public_root: PUBLIC_API_ROOT.to_owned(),
            auth: None,
            insecure: false,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(10),
            no_proxy: false,
            throttle: ThrottleConfig::default(),
            response_format: TextFormat::default(),
            default_headers,
            body_snippet: BodySnippetConfig::default(),
            request_hook: None,
        }
    }

    /// Authenticate with a developer access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(Auth::bearer(token));
        self
    }

    /// Apply an authentication strategy.
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Override the authenticated developer API root (testing/proxies).
    pub fn api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = root.into();
        self
    }

    /// Override the public API root (testing/proxies).
    pub fn public_root(mut self, root: impl Into<String>) -> Self {
        self.public_root = root.into();
        self
    }

    /// Requested wait between API calls; floored at 0.2s when building.
    pub fn sleep_time(mut self, value: Duration) -> Self {
        self.throttle = ThrottleConfig::new(value);
        self
    }

    /// Body format requested via `text_format` (informational pass-through).
    pub fn response_format(mut self, format: TextFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Ignore system proxy environment variables.
    pub fn no_system_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Accept invalid TLS certificates (**dangerous**).
    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.insecure = yes;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Adjust the per-request timeout.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    /// Adjust the connection establishment timeout.
    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    /// Add a default header applied to every request.
    pub fn default_header(
        mut self,
        name: http::header::HeaderName,
        value: http::HeaderValue,
    ) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Add a set of default headers applied to every request.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    /// Enable/disable capturing `body_snippet` on errors and decode failures.
    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.body_snippet.enabled = enabled;
        self
    }

    /// Set max bytes to keep for `body_snippet`.
    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.body_snippet.max_bytes = max_bytes;
        self
    }

    /// Add a hook invoked for every request before it is sent.
    pub fn request_hook<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.request_hook = Some(Arc::new(hook));
        self
    }

    /// Finalise configuration and build the client.
    pub fn build(self) -> Result<Client, Error> {
        let api_root = normalize_base_url(&self.api_root)?;
        let public_root = normalize_base_url(&self.public_root)?;

        let mut transport: DynAsyncTransport = Arc::new(ReqwestAsync::try_new(
            self.insecure,
            &self.user_agent,
            self.timeout,
            self.connect_timeout,
            self.no_proxy,
        )?);

        if let Some(hook) = self.request_hook {
            transport = Arc::new(HookAsync::new(transport, hook));
        }

        transport = Arc::new(ThrottleAsync::new(transport, self.throttle));

        Ok(Client {
            inner: Arc::new(Inner {
                api_root,
                public_root,
                auth: self.auth,
                timeout: self.timeout,
                response_format: self.response_format,
                default_headers: self.default_headers,
                body_snippet: self.body_snippet,
                transport,
            }),
        })
    }
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    api_root: Url,
    public_root: Url,
    auth: Option<Auth>,
    timeout: Duration,
    response_format: TextFormat,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    transport: DynAsyncTransport,
}

impl Client {
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Quick path: authenticated client with all default settings.
    pub fn new(access_token: impl Into<String>) -> Result<Self, Error> {
        Self::builder().access_token(access_token).build()
    }

    /// Unauthenticated client; only `public_api` capable methods will work.
    pub fn public() -> Result<Self, Error> {
        Self::builder().build()
    }

    #[must_use]
    pub fn account(&self) -> api::AccountService {
        api::AccountService::new(self.clone())
    }

    #[must_use]
    pub fn search(&self) -> api::SearchService {
        api::SearchService::new(self.clone())
    }

    #[must_use]
    pub fn songs(&self) -> api::SongsService {
        api::SongsService::new(self.clone())
    }

    #[must_use]
    pub fn artists(&self) -> api::ArtistsService {
        api::ArtistsService::new(self.clone())
    }

    #[must_use]
    pub fn annotations(&self) -> api::AnnotationsService {
        api::AnnotationsService::new(self.clone())
    }

    #[must_use]
    pub fn web_pages(&self) -> api::WebPagesService {
        api::WebPagesService::new(self.clone())
    }

    pub(crate) fn require_token(
        &self,
        fallback: PublicFallback,
        public_api: bool,
    ) -> Result<(), Error> {
        auth::require_token(self.inner.auth.as_ref(), fallback, public_api)
    }

    pub(crate) fn text_format(&self) -> TextFormat {
        self.inner.response_format
    }

    fn root_url(&self, root: ApiRoot) -> &Url {
        match root {
            ApiRoot::Developer => &self.inner.api_root,
            ApiRoot::Public => &self.inner.public_root,
        }
    }

    /// Send a request and unwrap the `{"response": ...}` envelope.
    ///
    /// Low-level entry point for endpoints the typed services do not cover;
    /// the token guard is the caller's responsibility here.
    pub async fn send_api(&self, req: Request) -> Result<ApiContent, Error> {
        let (_, content) = self.execute_api(&req).await?;
        Ok(content)
    }

    /// Send a request and deserialize the unwrapped payload into `T`.
    pub(crate) async fn send_json<T: DeserializeOwned + Send + 'static>(
        &self,
        req: Request,
    ) -> Result<T, Error> {
        let url = endpoint_url(self.root_url(req.root), req.segments.iter().map(|s| s.as_str()))?;
        let (resp, content) = self.execute_api(&req).await?;

        let decode_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::Decode {
            status: resp.status,
            method: req.method.clone(),
            path: url.path().to_string().into_boxed_str(),
            request_id: diagnostics::request_id(&resp.headers),
            body_snippet: diagnostics::body_snippet(
                &resp.body,
                self.inner.body_snippet,
                self.inner.auth.as_ref(),
            ),
            source,
        };

        match content {
            ApiContent::Payload(value) => {
                serde_json::from_value(value).map_err(|source| decode_error(Box::new(source)))
            }
            ApiContent::NoContent => Err(decode_error(Box::new(io::Error::new(
                io::ErrorKind::InvalidData,
                "expected a payload, got 204 No Content",
            )))),
        }
    }

    async fn execute_api(&self, req: &Request) -> Result<(Response, ApiContent), Error> {
        let resp = self.execute_request(req).await?;

        let content = match resp.status {
            StatusCode::OK => {
                let mut value: serde_json::Value =
                    resp.json().map_err(|source| Error::Decode {
                        status: resp.status,
                        method: req.method.clone(),
                        path: req.segments.join("/").into_boxed_str(),
                        request_id: diagnostics::request_id(&resp.headers),
                        body_snippet: diagnostics::body_snippet(
                            &resp.body,
                            self.inner.body_snippet,
                            self.inner.auth.as_ref(),
                        ),
                        source: Box::new(source),
                    })?;
                let value = match value.as_object_mut().and_then(|obj| obj.remove("response")) {
                    Some(inner) => inner,
                    None => value,
                };
                ApiContent::Payload(value)
            }
            StatusCode::NO_CONTENT => ApiContent::NoContent,
            status => {
                // 2xx outside the documented contract: fail fast.
                return Err(Error::UnexpectedStatus {
                    status,
                    method: req.method.clone(),
                    path: req.segments.join("/").into_boxed_str(),
                });
            }
        };

        Ok((resp, content))
    }

    pub(crate) async fn execute_request(&self, req: &Request) -> Result<Response, Error> {
        #[cfg(feature = "metrics")]
        let _inflight = crate::transport::metrics::InFlightGuard::new();

        let url = endpoint_url(self.root_url(req.root), req.segments.iter().map(|s| s.as_str()))?;

        // Headers are assembled per request: the bearer token is applied only
        // for the developer root, so a public call can never leak it and a
        // failed public call leaves nothing to restore.
        let mut headers = self.inner.default_headers.clone();
        if req.root == ApiRoot::Developer
            && let Some(auth) = &self.inner.auth
        {
            auth.apply(&mut headers)?;
        }
        headers.extend(req.headers.clone());

        let body = req.body.clone().map(|body| TransportBody {
            bytes: body.bytes,
            content_type: body.content_type,
        });

        #[cfg(any(feature = "tracing", feature = "metrics"))]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "genius.request",
            http.method = %req.method,
            http.host = %url.host_str().unwrap_or_default(),
            http.path = %url.path(),
            http.status = field::Empty,
            request_id = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let timeout = req.timeout_override.unwrap_or(self.inner.timeout);
        let resp = match self
            .inner
            .transport
            .send(TransportRequest {
                method: req.method.clone(),
                root: req.root,
                url: url.clone(),
                headers,
                query: req.query.clone(),
                form: req.form.clone(),
                body,
                timeout,
            })
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                #[cfg(feature = "metrics")]
                crate::transport::metrics::record_outcome(
                    &req.method,
                    err.status(),
                    start.elapsed(),
                    None,
                    Some(err.kind()),
                );
                #[cfg(feature = "tracing")]
                {
                    span.record("error_kind", field::debug(err.kind()));
                    span.record("latency_ms", start.elapsed().as_millis() as i64);
                }
                return Err(err);
            }
        };

        let request_id = diagnostics::request_id(&resp.headers);

        #[cfg(feature = "tracing")]
        {
            span.record("http.status", resp.status.as_u16() as i64);
            span.record("latency_ms", start.elapsed().as_millis() as i64);
            if let Some(rid) = request_id.as_deref() {
                span.record("request_id", field::display(rid));
            }
        }

        if resp.status.is_client_error() || resp.status.is_server_error() {
            let safe_url = sanitize_url_for_error(&url);
            let message = diagnostics::extract_message(&resp.body)
                .map(|msg| redact_text(msg.into(), self.inner.auth.as_ref()).into_boxed_str());
            let http_error = HttpError {
                status: resp.status,
                method: req.method.clone(),
                url: Box::new(safe_url),
                message,
                request_id,
                body_snippet: diagnostics::body_snippet(
                    &resp.body,
                    self.inner.body_snippet,
                    self.inner.auth.as_ref(),
                ),
            };

            let retry_after =
                diagnostics::parse_retry_after(&resp.headers, std::time::SystemTime::now());
            let err = Error::from_http(http_error, retry_after);

            #[cfg(feature = "metrics")]
            crate::transport::metrics::record_outcome(
                &req.method,
                err.status(),
                start.elapsed(),
                None,
                Some(err.kind()),
            );
            #[cfg(feature = "tracing")]
            span.record("error_kind", field::debug(err.kind()));

            return Err(err);
        }

        #[cfg(feature = "metrics")]
        crate::transport::metrics::record_outcome(
            &req.method,
            Some(resp.status),
            start.elapsed(),
            resp.meta.throttled,
            None,
        );

        Ok(Response {
            status: resp.status,
            headers: resp.headers,
            body: resp.body,
        })
    }
}
