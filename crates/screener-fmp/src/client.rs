//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{CashFlowStatement, CompanyProfile, FundamentalData, KeyMetricsTtm, RatiosTtm},
};
use reqwest::Client;
use screener_traits::{FetchResult, FundamentalsRecord, FundamentalsSource};
use std::env;
use tracing::debug;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, text));
        }

        let text = response.text().await?;

        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            if text.contains("Limit Reach") {
                return Err(FmpError::RateLimitExceeded);
            }
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get the company profile for a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::SymbolNotFound`] if FMP has no profile for the
    /// symbol, or an error if the API request fails.
    pub async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let endpoint = format!("profile?symbol={}", symbol.to_uppercase());
        let profiles: Vec<CompanyProfile> = self.get(&endpoint).await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get trailing twelve month ratios for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns nothing.
    pub async fn ratios_ttm(&self, symbol: &str) -> Result<RatiosTtm> {
        let endpoint = format!("ratios-ttm?symbol={}", symbol.to_uppercase());
        first(self.get(&endpoint).await?, symbol)
    }

    /// Get trailing twelve month key metrics for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns nothing.
    pub async fn key_metrics_ttm(&self, symbol: &str) -> Result<KeyMetricsTtm> {
        let endpoint = format!("key-metrics-ttm?symbol={}", symbol.to_uppercase());
        first(self.get(&endpoint).await?, symbol)
    }

    /// Get the latest annual cash flow statement for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns nothing.
    pub async fn latest_cash_flow(&self, symbol: &str) -> Result<CashFlowStatement> {
        let endpoint = format!(
            "cash-flow-statement?symbol={}&period=annual&limit=1",
            symbol.to_uppercase()
        );
        first(self.get(&endpoint).await?, symbol)
    }

    /// Get everything the screener needs for a symbol.
    ///
    /// The four endpoints are fetched in parallel. The profile is required;
    /// the other three only fill in fields and are skipped when FMP has no
    /// data for them. A rate limit on any endpoint fails the whole fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be fetched or FMP is rate
    /// limiting.
    pub async fn fundamental_data(&self, symbol: &str) -> Result<FundamentalData> {
        let (profile, ratios, metrics, cash) = tokio::join!(
            self.profile(symbol),
            self.ratios_ttm(symbol),
            self.key_metrics_ttm(symbol),
            self.latest_cash_flow(symbol),
        );

        Ok(FundamentalData {
            symbol: symbol.to_string(),
            profile: profile?,
            ratios: optional(ratios, symbol, "ratios-ttm")?,
            key_metrics: optional(metrics, symbol, "key-metrics-ttm")?,
            cash_flow: optional(cash, symbol, "cash-flow-statement")?,
        })
    }

    /// Get the fundamentals record for a symbol.
    ///
    /// # Errors
    ///
    /// See [`fundamental_data`](Self::fundamental_data).
    pub async fn fundamentals(&self, symbol: &str) -> Result<FundamentalsRecord> {
        Ok(self.fundamental_data(symbol).await?.into_record())
    }
}

impl FundamentalsSource for FmpClient {
    async fn fetch(&self, symbol: &str) -> FetchResult<FundamentalsRecord> {
        Ok(self.fundamentals(symbol).await?)
    }
}

/// Client errors are the caller's fault and will not clear up on retry.
fn status_error(status: reqwest::StatusCode, text: String) -> FmpError {
    if status.is_client_error() {
        FmpError::Rejected {
            status: status.as_u16(),
            message: text,
        }
    } else {
        FmpError::Api(format!("HTTP {status}: {text}"))
    }
}

fn first<T>(rows: Vec<T>, symbol: &str) -> Result<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| FmpError::NoData(symbol.to_string()))
}

/// Keep rate limiting fatal, turn every other failure into a missing part.
fn optional<T>(result: Result<T>, symbol: &str, endpoint: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(FmpError::RateLimitExceeded) => Err(FmpError::RateLimitExceeded),
        Err(e) => {
            debug!(%symbol, endpoint, error = %e, "FMP endpoint unavailable, leaving fields empty");
            Ok(None)
        }
    }
}
