use crate::error::ScrapeError;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The GET capability the scraper needs. Non-200 responses are returned as
/// they are; callers decide what a bad status means.
pub trait HttpClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ScrapeError>;
}

impl HttpClient for reqwest::Client {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ScrapeError> {
        let network = |source| ScrapeError::Network {
            url: url.to_string(),
            source,
        };

        let mut request = reqwest::Client::get(self, url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network)?;
        Ok(HttpResponse { status, body })
    }
}
