//! HTTP client for the dispatch REST API.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ClientError;

/// HTTP client for the dispatch server.
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        self.get_json_with_query(segments, &[]).await
    }

    /// GET a JSON document with query parameters.
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let request = self.get_request(segments, query)?;
        debug!(url = %request.url(), "GET request");

        let response = self.inner.execute(request).await?;
        Self::decode(response).await
    }

    /// Build a GET request. Path segments and query values are percent-encoded.
    pub fn get_request(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<reqwest::Request, ClientError> {
        let url = self.endpoint(segments)?;
        Ok(self.inner.get(url).query(query).build()?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ClientError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "POST request");

        let response = self.inner.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Error bodies are `{"error": "..."}`; fall back to the raw text.
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or(body);
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_query_value_is_encoded() {
        let client = HttpClient::new("http://[::1]:8080");
        let request = client
            .get_request(&["v1", "reports", "driver-rank"], &[("city_id", "tel&aviv #1")])
            .unwrap();

        assert_eq!(request.url().path(), "/v1/reports/driver-rank");
        assert_eq!(
            pairs(&request),
            vec![("city_id".to_string(), "tel&aviv #1".to_string())]
        );
    }

    #[test]
    fn test_path_segment_is_encoded() {
        let client = HttpClient::new("http://localhost:8080/");
        let request = client
            .get_request(&["v1", "drivers", "a/b?c", "distance"], &[])
            .unwrap();

        let segments: Vec<&str> = request.url().path_segments().unwrap().collect();
        assert_eq!(segments, vec!["v1", "drivers", "a%2Fb%3Fc", "distance"]);
        assert!(request.url().query().is_none());
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = HttpClient::new("http://localhost:8080/walt/");
        let request = client.get_request(&["health"], &[]).unwrap();
        assert_eq!(request.url().path(), "/walt/health");
    }
}
