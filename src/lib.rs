pub mod adapters;
pub mod config;
pub mod content;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpScholarSource, LocalStorage};
pub use config::PortfolioConfig;
pub use core::{BuildEngine, PortfolioPipeline, ProfileDataProvider, ProviderSettings};
pub use domain::model::{FetchOutcome, MetricsStatus, ProfileMetrics, Publication};
pub use utils::error::{LookupError, PortfolioError, Result};
