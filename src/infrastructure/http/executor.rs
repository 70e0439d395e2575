//! reqwest-backed request executor.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;

use crate::domain::entities::{
    Failure, FailureKind, FormValue, HttpMethod, MultipartForm, RequestBody, RequestConfig,
    RequestOutcome,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::RequestExecutorPort;

const USER_AGENT: &str = concat!("sms-client/", env!("CARGO_PKG_VERSION"));

/// Executes requests against `base_url + path` with reqwest.
///
/// The deadline covers the whole exchange, body included. Expiry drops the
/// in-flight future, which aborts the connection.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
    base_url: String,
}

impl ReqwestExecutor {
    /// Creates executor with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ApiError::new(
                    FailureKind::Network,
                    format!("failed to create HTTP client: {e}"),
                    0,
                )
            })?;

        Ok(Self::with_client(client, base_url))
    }

    /// Creates executor around an existing client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, config: &RequestConfig) -> Result<RequestBuilder, Failure> {
        let url = format!("{}{}", self.base_url, config.path());
        let mut request = self.client.request(to_method(config.method()), url);

        for (name, value) in config.headers() {
            request = request.header(name.as_str(), value.as_str());
        }

        request = match config.body() {
            None => request,
            Some(RequestBody::Json(value)) => request.body(value.to_string()),
            Some(RequestBody::Binary(data)) => request.body(data.clone()),
            Some(RequestBody::Multipart(form)) => request.multipart(to_form(form)?),
        };

        Ok(request)
    }

    async fn dispatch(request: RequestBuilder) -> RequestOutcome {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Failure::timeout().into(),
            Err(_) => return Failure::network().into(),
        };

        read_response(response).await
    }
}

#[async_trait]
impl RequestExecutorPort for ReqwestExecutor {
    async fn execute(&self, config: &RequestConfig) -> RequestOutcome {
        let request = match self.build_request(config) {
            Ok(request) => request,
            Err(failure) => return failure.into(),
        };

        tokio::time::timeout(config.timeout(), Self::dispatch(request))
            .await
            .unwrap_or_else(|_| Failure::timeout().into())
    }
}

async fn read_response(response: Response) -> RequestOutcome {
    let status = response.status();
    let declares_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));

    let decoded = if declares_json {
        match response.bytes().await {
            Ok(bytes) if bytes.is_empty() => Ok(Value::Null),
            Ok(bytes) => serde_json::from_slice::<Value>(&bytes).map_err(|e| e.to_string()),
            Err(e) if e.is_timeout() => return Failure::timeout().into(),
            Err(_) => return Failure::network().into(),
        }
    } else {
        Ok(Value::Null)
    };

    let code = status.as_u16();
    match FailureKind::from_status(code) {
        None => match decoded {
            Ok(body) => RequestOutcome::success(code, body),
            Err(e) => Failure::parse(code, format!("Invalid response from server: {e}")).into(),
        },
        Some(kind) => {
            let body = decoded.ok().filter(|b| !b.is_null());
            Failure::from_response(kind, code, status.canonical_reason(), body).into()
        }
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn to_form(form: &MultipartForm) -> Result<Form, Failure> {
    let mut multipart = Form::new();

    for part in form.parts() {
        multipart = match &part.value {
            FormValue::Text(text) => multipart.text(part.name.clone(), text.clone()),
            FormValue::File {
                data,
                file_name,
                mime,
            } => {
                let mut file = Part::bytes(data.to_vec());
                if let Some(file_name) = file_name {
                    file = file.file_name(file_name.clone());
                }
                if let Some(mime) = mime {
                    file = file.mime_str(mime).map_err(|_| Failure {
                        kind: FailureKind::ClientError,
                        status: None,
                        body: None,
                        message: format!("invalid MIME type for field {}: {mime}", part.name),
                    })?;
                }
                multipart.part(part.name.clone(), file)
            }
        };
    }

    Ok(multipart)
}
