use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, Url};
use tracing::{debug, instrument};
use transcoder::{
    ConnectError, CreateJobRequest, GetJobRequest, Job, ServiceError, StatusCode,
    TranscoderConnector, TranscoderService,
};

use crate::status;
use crate::RestConfig;

/// Builds an authenticated HTTP client per operation.
#[derive(Debug, Clone)]
pub struct RestConnector {
    config: RestConfig,
}

impl RestConnector {
    pub fn new(config: RestConfig) -> Self {
        Self { config }
    }

    /// Validates the endpoint and returns it without a trailing `/`.
    fn base_url(&self) -> Result<String, ConnectError> {
        let endpoint = self.config.endpoint.trim();
        let invalid = |reason: String| ConnectError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };
        let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed".to_string()));
        }
        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    fn http_client(&self, token: &str) -> Result<Client, ConnectError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ConnectError::Transport {
                message: "access token is not a valid header value".to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        Client::builder()
            .default_headers(headers)
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.as_str())
            .build()
            .map_err(|e| ConnectError::Transport {
                message: status::error_chain(&e),
            })
    }
}

#[async_trait]
impl TranscoderConnector for RestConnector {
    #[instrument(skip(self))]
    async fn connect(&self) -> Result<Box<dyn TranscoderService>, ConnectError> {
        let token = self
            .config
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConnectError::MissingCredentials)?;
        let base = self.base_url()?;
        let http = self.http_client(token)?;
        debug!(base = %base, "http client ready");
        Ok(Box::new(RestService { http, base }))
    }
}

/// One open handle; the underlying connection pool is dropped with it.
pub struct RestService {
    http: Client,
    base: String,
}

impl RestService {
    fn url(&self, resource: &str) -> String {
        format!("{}/v1/{}", self.base, resource)
    }

    async fn decode(response: Response) -> Result<Job, ServiceError> {
        let http_status = response.status();
        if http_status.is_success() {
            return response.json::<Job>().await.map_err(|e| {
                ServiceError::new(
                    StatusCode::Internal,
                    format!("malformed job in response: {}", status::error_chain(&e)),
                )
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| status::from_transport(&e))?;
        let err = status::from_response(http_status.as_u16(), &body);
        debug!(http_status = http_status.as_u16(), code = %err.code, "request rejected");
        Err(err)
    }
}

#[async_trait]
impl TranscoderService for RestService {
    #[instrument(skip(self, request), fields(parent = %request.parent))]
    async fn create_job(&self, request: CreateJobRequest) -> Result<Job, ServiceError> {
        let url = self.url(&format!("{}/jobs", request.parent));
        debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(&request.job)
            .send()
            .await
            .map_err(|e| status::from_transport(&e))?;
        Self::decode(response).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn get_job(&self, request: GetJobRequest) -> Result<Job, ServiceError> {
        let url = self.url(&request.name.to_string());
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| status::from_transport(&e))?;
        Self::decode(response).await
    }

    /// Marks the end of the handle's use. HTTP holds no session to tear down;
    /// the connection pool is released when the caller drops the boxed
    /// service, which [`transcoder::JobClient`] does right after this call.
    async fn close(&self) {
        debug!(base = %self.base, "service handle closed");
    }
}
