//! HTTP client for the lookup API.

use async_trait::async_trait;
use fitment_observability::StructuredLogger;
use serde_json::Value;
use url::Url;

use crate::api::LookupApi;
use crate::error::LookupError;
use crate::response::{parse_options, parse_seat_rows};
use crate::stage::LookupStage;
use crate::timeout::LookupSettings;

/// `reqwest`-backed [`LookupApi`].
///
/// Requests are plain GETs with the selection values as percent-encoded path
/// segments. There are no retries; each request is bounded by the
/// configured timeout.
#[derive(Debug, Clone)]
pub struct HttpLookupClient {
    client: reqwest::Client,
    base: Url,
    logger: StructuredLogger,
}

impl HttpLookupClient {
    /// Build a client with its own connection pool.
    pub fn new(settings: &LookupSettings) -> Result<Self, LookupError> {
        let timeout = settings.timeout();
        let client = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .build()?;
        Self::with_client(client, settings)
    }

    /// Use an existing `reqwest` client; its own timeouts apply.
    pub fn with_client(client: reqwest::Client, settings: &LookupSettings) -> Result<Self, LookupError> {
        let base = Url::parse(&settings.base_url)?;
        if base.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(settings.base_url.clone()));
        }
        Ok(Self {
            client,
            base,
            logger: StructuredLogger::new("lookup"),
        })
    }

    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger.child("lookup");
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Endpoint for a stage with its selection values appended.
    pub fn endpoint(&self, stage: LookupStage, values: &[&str]) -> Result<Url, LookupError> {
        if values.len() != stage.arity() {
            return Err(LookupError::Request(format!(
                "{} lookup takes {} values, got {}",
                stage,
                stage.arity(),
                values.len()
            )));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(stage.path())
            .extend(values);
        Ok(url)
    }

    async fn fetch(&self, stage: LookupStage, values: &[&str]) -> Result<Value, LookupError> {
        let url = self.endpoint(stage, values)?;
        self.logger
            .debug_builder("lookup request")
            .field("stage", stage.name())
            .field("url", url.as_str())
            .emit();

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                LookupError::malformed(stage, e.to_string())
            } else {
                LookupError::from(e)
            }
        })
    }
}

#[async_trait]
impl LookupApi for HttpLookupClient {
    async fn makes(&self) -> Result<Vec<String>, LookupError> {
        let body = self.fetch(LookupStage::Makes, &[]).await?;
        parse_options(LookupStage::Makes, &body)
    }

    async fn models(&self, make: &str) -> Result<Vec<String>, LookupError> {
        let body = self.fetch(LookupStage::Models, &[make]).await?;
        parse_options(LookupStage::Models, &body)
    }

    async fn years(&self, make: &str, model: &str) -> Result<Vec<String>, LookupError> {
        let body = self.fetch(LookupStage::Years, &[make, model]).await?;
        parse_options(LookupStage::Years, &body)
    }

    async fn seat_rows(&self, make: &str, model: &str, year: &str) -> Result<u32, LookupError> {
        let body = self.fetch(LookupStage::SeatRows, &[make, model, year]).await?;
        parse_seat_rows(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpLookupClient {
        let settings = LookupSettings {
            base_url: base.to_string(),
            ..LookupSettings::default()
        };
        HttpLookupClient::new(&settings).unwrap()
    }

    #[test]
    fn test_endpoints() {
        let c = client("https://mat-car-type-api.fly.dev/api");
        assert_eq!(
            c.endpoint(LookupStage::Makes, &[]).unwrap().as_str(),
            "https://mat-car-type-api.fly.dev/api/car_type_options/makes"
        );
        assert_eq!(
            c.endpoint(LookupStage::SeatRows, &["Toyota", "Camry", "2021"])
                .unwrap()
                .as_str(),
            "https://mat-car-type-api.fly.dev/api/car_type/seat_rows/Toyota/Camry/2021"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let c = client("https://example.test/api/");
        let url = c.endpoint(LookupStage::Years, &["Land Rover", "Range/Rover"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/api/car_type_options/years/Land%20Rover/Range%2FRover"
        );
    }

    #[test]
    fn test_arity_checked() {
        let c = client("https://example.test/api");
        assert!(c.endpoint(LookupStage::Models, &[]).is_err());
    }

    #[test]
    fn test_bad_base_url() {
        let settings = LookupSettings {
            base_url: "not a url".to_string(),
            ..LookupSettings::default()
        };
        assert!(matches!(
            HttpLookupClient::new(&settings),
            Err(LookupError::InvalidUrl(_))
        ));
    }
}
