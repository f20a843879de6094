use crate::backend::{http::HttpCalculationClient, CalculationBackend};
use crate::config::AppConfig;
use crate::places::services::{NominatimClient, PlaceSearch};
use crate::session::Session;
use std::{sync::Arc, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Tried in order: local service, then the remote fallback.
    pub backends: Arc<Vec<Arc<dyn CalculationBackend>>>,
    pub geocoder: Arc<dyn PlaceSearch>,
    pub session: Arc<Session>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(config.geocoder.user_agent.clone())
            .build()?;

        let backends: Vec<Arc<dyn CalculationBackend>> = config
            .calculation_urls()
            .into_iter()
            .map(|(label, url)| {
                tracing::info!(backend = label, %url, "calculation backend configured");
                Arc::new(HttpCalculationClient::new(http.clone(), url, label))
                    as Arc<dyn CalculationBackend>
            })
            .collect();

        let geocoder =
            Arc::new(NominatimClient::new(http, &config.geocoder.url)) as Arc<dyn PlaceSearch>;

        Ok(Self::from_parts(config, backends, geocoder))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        backends: Vec<Arc<dyn CalculationBackend>>,
        geocoder: Arc<dyn PlaceSearch>,
    ) -> Self {
        Self {
            config,
            backends: Arc::new(backends),
            geocoder,
            session: Arc::new(Session::default()),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::testing::{FakeCalculation, FakeGeocoder};

        let backend: Arc<dyn CalculationBackend> = Arc::new(FakeCalculation::complete());
        Self::fake_with(
            vec![backend],
            FakeGeocoder::with_results(vec![FakeGeocoder::chennai()]),
        )
    }

    #[cfg(test)]
    pub fn fake_with(
        backends: Vec<Arc<dyn CalculationBackend>>,
        geocoder: crate::testing::FakeGeocoder,
    ) -> Self {
        use crate::config::{CalculationConfig, GeocoderConfig};

        let config = Arc::new(AppConfig {
            calculation: CalculationConfig {
                api_url: "http://fake.local".into(),
                fallback_url: None,
            },
            geocoder: GeocoderConfig {
                url: "http://fake.local/search".into(),
                user_agent: "kundali-test".into(),
            },
            http_timeout_secs: 5,
        });
        Self::from_parts(config, backends, Arc::new(geocoder))
    }
}
