//! Contest site client
//!
//! Builds the listing URL for a [`ContestFamily`], fetches pages through the
//! [`RequestSerializer`] and hands the bodies to the extractors.

pub mod serializer;

pub use serializer::{DEFAULT_REQUEST_INTERVAL, RequestSerializer};

use crate::config::HttpConfig;
use crate::contests::ContestFamily;
use crate::error::{Error, Result};
use crate::extract;
use crate::types::Task;
use std::sync::Arc;
use url::Url;

/// HTTP client bound to one contest
pub struct Client {
    family: Arc<dyn ContestFamily>,
    base_url: Url,
    http: reqwest::Client,
    serializer: RequestSerializer,
}

impl Client {
    /// Create a client for `family` using the HTTP settings from the configuration
    ///
    /// Must be called from within a tokio runtime; the request worker is spawned here.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not a valid URL or the HTTP client cannot be built.
    pub fn new(family: Arc<dyn ContestFamily>, config: &HttpConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL {}: {}", config.base_url, e),
            key: Some("http.base_url".to_string()),
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        let serializer = RequestSerializer::new(http.clone(), config.request_interval);

        Ok(Self {
            family,
            base_url,
            http,
            serializer,
        })
    }

    /// The contest this client fetches from
    pub fn family(&self) -> &dyn ContestFamily {
        self.family.as_ref()
    }

    /// `{base_url}/contests/{name}/tasks`
    pub fn task_list_url(&self) -> Result<Url> {
        let name = self.family.contest_name();
        Ok(self.base_url.join(&format!("contests/{}/tasks", name))?)
    }

    /// Fetch the listing page and extract its tasks
    pub async fn fetch_task_list(&self) -> Result<Vec<Task>> {
        let url = self.task_list_url()?;
        tracing::info!(contest = %self.family.contest_name(), url = %url, "fetching task list");

        let body = self.fetch_page(&url).await?;
        extract::parse_task_list(&body, &url)
    }

    /// Fetch `task`'s detail page and fill in its examples
    ///
    /// Returns how many example sections were populated.
    pub async fn fetch_sample_ios(&self, task: &mut Task) -> Result<usize> {
        tracing::info!(index = %task.index, url = %task.url, "fetching sample IOs");

        let body = self.fetch_page(&task.url).await?;
        Ok(extract::parse_sample_ios(&body, task))
    }

    /// GET `url` through the serializer and return the body of a successful response
    ///
    /// # Errors
    ///
    /// - [`Error::HttpStatus`] for a non-success status
    /// - [`Error::Network`] or [`Error::ClientClosed`] from the transport
    pub async fn fetch_page(&self, url: &Url) -> Result<String> {
        let request = self.http.get(url.clone()).build()?;

        let response = self.serializer.submit(request).await.inspect_err(|e| {
            tracing::error!(url = %url, error = %e, "failed to fetch page");
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = %url, status = status.as_u16(), "unexpected response status");
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Stop the request worker and wait for it to exit
    pub async fn shutdown(&self) {
        self.serializer.shutdown_and_wait().await;
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::contests::dp;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn http_config(base_url: &str) -> HttpConfig {
        HttpConfig {
            base_url: base_url.to_string(),
            request_interval: std::time::Duration::from_millis(1),
            ..HttpConfig::default()
        }
    }

    #[tokio::test]
    async fn task_list_url_joins_contest_name() {
        let client = Client::new(Arc::new(dp::Family), &http_config("https://atcoder.jp")).unwrap();
        assert_eq!(
            client.task_list_url().unwrap().as_str(),
            "https://atcoder.jp/contests/dp/tasks"
        );
    }

    #[tokio::test]
    async fn task_list_url_keeps_base_path() {
        let client =
            Client::new(Arc::new(dp::Family), &http_config("http://localhost:8080/mirror")).unwrap();
        assert_eq!(
            client.task_list_url().unwrap().as_str(),
            "http://localhost:8080/mirror/contests/dp/tasks"
        );
    }

    #[tokio::test]
    async fn invalid_base_url_is_a_config_error() {
        let err = Client::new(Arc::new(dp::Family), &http_config("not a url")).err().unwrap();
        assert!(matches!(err, Error::Config { key: Some(ref k), .. } if k == "http.base_url"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contests/dp/tasks"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let client = Client::new(Arc::new(dp::Family), &http_config(&server.uri())).unwrap();

        let err = client.fetch_task_list().await.unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
        client.shutdown().await;
    }

    #[tokio::test]
    async fn fetch_after_shutdown_is_closed() {
        let server = MockServer::start().await;
        let client = Client::new(Arc::new(dp::Family), &http_config(&server.uri())).unwrap();

        client.shutdown().await;

        let err = client.fetch_task_list().await.unwrap_err();
        assert!(err.is_closed());
    }
}
