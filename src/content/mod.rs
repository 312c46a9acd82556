//! Builders for what the portfolio page shows besides the live metrics.

pub mod archive;
pub mod dlts;
pub mod lattice;
pub mod page;
pub mod research_map;
pub mod sections;

pub use dlts::DltsSpectrum;
pub use lattice::{LatticeParams, LatticeScene};
pub use page::PortfolioPage;
pub use research_map::MapScene;
pub use sections::PageSection;
