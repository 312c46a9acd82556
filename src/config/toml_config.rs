use crate::content::lattice::LatticeParams;
use crate::domain::model::ProfileMetrics;
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SCHOLAR_ID: &str = "GIBw1REAAAAJ";
pub const DEFAULT_SCHOLAR_ENDPOINT: &str = "http://localhost:8765";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 8;
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 86_400;
pub const DEFAULT_CACHE_CAPACITY: u64 = 64;
pub const DEFAULT_BUNDLE_NAME: &str = "portfolio_bundle.zip";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub scholar: ScholarConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub lattice: Option<LatticeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Academic & Research Portfolio".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub affiliation: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub researchgate_url: Option<String>,
    pub orcid_url: Option<String>,
    /// Shown as a fourth metric card; maintained by hand.
    pub research_interest: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Kaveer Nagessar".to_string(),
            affiliation: Some("University of Pretoria".to_string()),
            location: Some("Pretoria, South Africa".to_string()),
            email: Some("nagessar.kaveer@gmail.com".to_string()),
            researchgate_url: Some(
                "https://www.researchgate.net/profile/Kaveer-Nagessar".to_string(),
            ),
            orcid_url: Some("https://orcid.org/0009-0000-9829-1608".to_string()),
            research_interest: Some("15.7".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarConfig {
    pub id: String,
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub cache_ttl_seconds: Option<u64>,
    pub fallback_ttl_seconds: Option<u64>,
    pub cache_capacity: Option<u64>,
    /// Look up an abstract for each live publication. On by default.
    pub fetch_abstracts: Option<bool>,
}

impl Default for ScholarConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_SCHOLAR_ID.to_string(),
            endpoint: DEFAULT_SCHOLAR_ENDPOINT.to_string(),
            timeout_seconds: None,
            cache_ttl_seconds: None,
            fallback_ttl_seconds: None,
            cache_capacity: None,
            fetch_abstracts: None,
        }
    }
}

/// Numbers served while the scholarly index is unreachable. Needs a manual
/// refresh now and then.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub total_citations: u64,
    pub h_index: u32,
    pub i10_index: u32,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        let placeholder = ProfileMetrics::placeholder();
        Self {
            total_citations: placeholder.total_citations,
            h_index: placeholder.h_index,
            i10_index: placeholder.i10_index,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_path: String,
    pub bundle_name: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: "./site".to_string(),
            bundle_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatticeConfig {
    pub lattice_constant: Option<f64>,
    pub cells: Option<usize>,
    pub bond_cutoff: Option<f64>,
}

impl PortfolioConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PortfolioError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PortfolioError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCHOLAR_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PortfolioError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn scholar_id(&self) -> &str {
        &self.scholar.id
    }

    pub fn scholar_endpoint(&self) -> &str {
        &self.scholar.endpoint
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.scholar.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(
            self.scholar
                .cache_ttl_seconds
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
        )
    }

    /// Falls back to the live TTL, so a failed lookup is memoized as long as
    /// a successful one unless configured otherwise.
    pub fn fallback_ttl(&self) -> Duration {
        self.scholar
            .fallback_ttl_seconds
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.cache_ttl())
    }

    pub fn cache_capacity(&self) -> u64 {
        self.scholar.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY)
    }

    pub fn fetch_abstracts(&self) -> bool {
        self.scholar.fetch_abstracts.unwrap_or(true)
    }

    pub fn fallback_metrics(&self) -> ProfileMetrics {
        ProfileMetrics {
            total_citations: self.fallback.total_citations,
            h_index: self.fallback.h_index,
            i10_index: self.fallback.i10_index,
            publication_list: Vec::new(),
        }
    }

    pub fn output_path(&self) -> &str {
        &self.output.output_path
    }

    pub fn bundle_name(&self) -> &str {
        self.output
            .bundle_name
            .as_deref()
            .unwrap_or(DEFAULT_BUNDLE_NAME)
    }

    pub fn lattice_params(&self) -> LatticeParams {
        let defaults = LatticeParams::default();
        match &self.lattice {
            Some(lattice) => LatticeParams {
                lattice_constant: lattice.lattice_constant.unwrap_or(defaults.lattice_constant),
                cells: lattice.cells.unwrap_or(defaults.cells),
                bond_cutoff: lattice.bond_cutoff.unwrap_or(defaults.bond_cutoff),
            },
            None => defaults,
        }
    }

    pub fn research_interest(&self) -> &str {
        self.profile.research_interest.as_deref().unwrap_or("N/A")
    }
}

impl Validate for PortfolioConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("site.title", &self.site.title)?;
        validation::validate_non_empty_string("profile.name", &self.profile.name)?;
        if self.scholar.id.trim().is_empty() {
            return Err(PortfolioError::MissingConfigError {
                field: "scholar.id".to_string(),
            });
        }
        validation::validate_url("scholar.endpoint", &self.scholar.endpoint)?;

        if let Some(timeout) = self.scholar.timeout_seconds {
            validation::validate_range("scholar.timeout_seconds", timeout, 1, 60)?;
        }
        if let Some(ttl) = self.scholar.cache_ttl_seconds {
            validation::validate_positive_number("scholar.cache_ttl_seconds", ttl, 1)?;
        }
        if let Some(ttl) = self.scholar.fallback_ttl_seconds {
            validation::validate_positive_number("scholar.fallback_ttl_seconds", ttl, 1)?;
        }
        if let Some(capacity) = self.scholar.cache_capacity {
            validation::validate_positive_number("scholar.cache_capacity", capacity, 1)?;
        }

        for (field, link) in [
            ("profile.researchgate_url", &self.profile.researchgate_url),
            ("profile.orcid_url", &self.profile.orcid_url),
        ] {
            if let Some(url) = link {
                validation::validate_url(field, url)?;
            }
        }

        validation::validate_path("output.output_path", &self.output.output_path)?;
        if let Some(name) = &self.output.bundle_name {
            validation::validate_file_name("output.bundle_name", name, ".zip")?;
        }

        let lattice = self.lattice_params();
        validation::validate_range("lattice.cells", lattice.cells, 1, 6)?;
        validation::validate_range(
            "lattice.lattice_constant",
            lattice.lattice_constant,
            0.5,
            50.0,
        )?;
        validation::validate_range("lattice.bond_cutoff", lattice.bond_cutoff, 0.1, 50.0)?;

        Ok(())
    }
}
