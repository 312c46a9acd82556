pub mod engine;
pub mod pipeline;
pub mod provider;

pub use engine::BuildEngine;
pub use pipeline::PortfolioPipeline;
pub use provider::{ProfileDataProvider, ProviderSettings};
