use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CalculationConfig {
    /// Local PyJHora service, tried first.
    pub api_url: String,
    /// Remote deployment tried when the local one fails.
    pub fallback_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderConfig {
    pub url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub calculation: CalculationConfig,
    pub geocoder: GeocoderConfig,
    pub http_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let calculation = CalculationConfig {
            api_url: std::env::var("CALC_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".into()),
            fallback_url: std::env::var("CALC_FALLBACK_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        };
        let geocoder = GeocoderConfig {
            url: std::env::var("GEOCODER_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/search".into()),
            user_agent: std::env::var("GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| format!("kundali/{}", env!("CARGO_PKG_VERSION"))),
        };
        let http_timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        if url_scheme_missing(&calculation.api_url) {
            anyhow::bail!("CALC_API_URL must start with http:// or https://");
        }
        Ok(Self {
            calculation,
            geocoder,
            http_timeout_secs,
        })
    }

    /// Base URLs in the order they are tried.
    pub fn calculation_urls(&self) -> Vec<(&'static str, &str)> {
        let mut urls = vec![("local", self.calculation.api_url.as_str())];
        if let Some(fallback) = &self.calculation.fallback_url {
            urls.push(("remote", fallback.as_str()));
        }
        urls
    }
}

fn url_scheme_missing(url: &str) -> bool {
    !(url.starts_with("http://") || url.starts_with("https://"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_url_follows_local() {
        let config = AppConfig {
            calculation: CalculationConfig {
                api_url: "http://localhost:8000".into(),
                fallback_url: Some("https://kundali.example.com".into()),
            },
            geocoder: GeocoderConfig {
                url: "http://geo".into(),
                user_agent: "test".into(),
            },
            http_timeout_secs: 5,
        };
        assert_eq!(
            config.calculation_urls(),
            vec![
                ("local", "http://localhost:8000"),
                ("remote", "https://kundali.example.com")
            ]
        );
    }

    #[test]
    fn scheme_is_required() {
        assert!(url_scheme_missing("localhost:8000"));
        assert!(!url_scheme_missing("https://api"));
    }
}
