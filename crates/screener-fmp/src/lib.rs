//! Financial Modeling Prep (FMP) fundamentals source for the screener.
//!
//! [`FmpClient`] pulls a company profile, trailing ratios, trailing key
//! metrics and the latest annual cash flow statement from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API and
//! folds them into one [`FundamentalsRecord`](screener_traits::FundamentalsRecord).
//!
//! # Usage
//!
//! ```rust,ignore
//! use screener_fmp::FmpClient;
//! use screener_traits::FundamentalsSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!     let record = client.fetch("KO").await?;
//!     println!("{:?}", record.pe());
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
