//! Data types for FMP API responses.

use screener_traits::FundamentalsRecord;
use serde::{Deserialize, Serialize};

/// Company profile from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Sector classification.
    #[serde(default)]
    pub sector: Option<String>,
    /// Business summary.
    #[serde(default)]
    pub description: Option<String>,
    /// Last price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Beta against the broad market.
    #[serde(default)]
    pub beta: Option<f64>,
    /// Market capitalization.
    #[serde(default, alias = "mktCap")]
    pub market_cap: Option<f64>,
}

/// Trailing twelve month ratios from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatiosTtm {
    /// Price to earnings.
    #[serde(default, rename = "priceToEarningsRatioTTM")]
    pub pe_ratio: Option<f64>,
    /// Earnings per share.
    #[serde(default, rename = "netIncomePerShareTTM")]
    pub eps: Option<f64>,
    /// Dividend yield as a fraction.
    #[serde(default, rename = "dividendYieldTTM")]
    pub dividend_yield: Option<f64>,
    /// Dividend payout ratio.
    #[serde(default, rename = "dividendPayoutRatioTTM")]
    pub payout_ratio: Option<f64>,
    /// Debt to equity.
    #[serde(default, rename = "debtToEquityRatioTTM")]
    pub debt_to_equity: Option<f64>,
}

/// Trailing twelve month key metrics from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetricsTtm {
    /// Return on equity as a fraction.
    #[serde(default, rename = "returnOnEquityTTM")]
    pub roe: Option<f64>,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// Cash flow statement from FMP, only the fields the screener reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Filing date.
    #[serde(default)]
    pub date: String,
    /// Free cash flow.
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
}

/// Everything fetched for one symbol.
#[derive(Debug, Clone, Default)]
pub struct FundamentalData {
    /// Ticker symbol as requested.
    pub symbol: String,
    /// Company profile.
    pub profile: CompanyProfile,
    /// Latest trailing ratios, if available.
    pub ratios: Option<RatiosTtm>,
    /// Latest trailing key metrics, if available.
    pub key_metrics: Option<KeyMetricsTtm>,
    /// Latest annual cash flow statement, if available.
    pub cash_flow: Option<CashFlowStatement>,
}

impl FundamentalData {
    /// Fold the responses into one fundamentals record.
    ///
    /// Market cap prefers the profile value and falls back to key metrics.
    #[must_use]
    pub fn into_record(self) -> FundamentalsRecord {
        let ratios = self.ratios.unwrap_or_default();
        let metrics = self.key_metrics.unwrap_or_default();

        FundamentalsRecord {
            name: self.profile.company_name,
            sector: self.profile.sector.filter(|s| !s.is_empty()),
            description: self.profile.description,
            price: self.profile.price,
            trailing_pe: ratios.pe_ratio,
            return_on_equity: metrics.roe,
            trailing_eps: ratios.eps,
            dividend_yield: ratios.dividend_yield,
            payout_ratio: ratios.payout_ratio,
            debt_to_equity: ratios.debt_to_equity,
            free_cashflow: self.cash_flow.and_then(|c| c.free_cash_flow),
            beta: self.profile.beta,
            market_cap: self.profile.market_cap.or(metrics.market_cap),
            ..FundamentalsRecord::new(self.symbol)
        }
    }
}
