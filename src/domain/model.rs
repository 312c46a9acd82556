use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    /// `0` when the index does not report a year.
    pub year: u32,
    pub authors: String,
    pub source_venue: String,
    /// Index key for the per-publication detail lookup.
    #[serde(default)]
    pub author_pub_id: Option<String>,
}

/// Citation metrics and publications of one researcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMetrics {
    pub total_citations: u64,
    pub h_index: u32,
    pub i10_index: u32,
    pub publication_list: Vec<Publication>,
}

impl ProfileMetrics {
    /// Snapshot served when the scholarly index cannot be reached.
    pub fn placeholder() -> Self {
        Self {
            total_citations: 5,
            h_index: 1,
            i10_index: 0,
            publication_list: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsStatus {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub status: MetricsStatus,
    pub metrics: Arc<ProfileMetrics>,
}

impl FetchOutcome {
    pub fn live(metrics: ProfileMetrics) -> Self {
        Self {
            status: MetricsStatus::Live,
            metrics: Arc::new(metrics),
        }
    }

    pub fn fallback(metrics: Arc<ProfileMetrics>) -> Self {
        Self {
            status: MetricsStatus::Fallback,
            metrics,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == MetricsStatus::Live
    }
}

/// Result of the author search step, consumed by the fill step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorHandle {
    pub scholar_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSection {
    Basics,
    Indices,
    Counts,
}

impl ProfileSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileSection::Basics => "basics",
            ProfileSection::Indices => "indices",
            ProfileSection::Counts => "counts",
        }
    }
}

/// Serialized files of one portfolio build.
#[derive(Debug, Clone)]
pub struct SiteBundle {
    pub status: MetricsStatus,
    pub profile_json: String,
    pub publications_csv: String,
    pub spectrum_tsv: String,
    pub lattice_json: String,
    pub research_map_json: String,
}

impl SiteBundle {
    pub fn files(&self) -> [(&'static str, &str); 5] {
        [
            ("profile.json", self.profile_json.as_str()),
            ("publications.csv", self.publications_csv.as_str()),
            ("dlts_spectrum.tsv", self.spectrum_tsv.as_str()),
            ("lattice.json", self.lattice_json.as_str()),
            ("research_map.json", self.research_map_json.as_str()),
        ]
    }
}
