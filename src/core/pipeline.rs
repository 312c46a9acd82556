use crate::config::PortfolioConfig;
use crate::content::page::PublicationSource;
use crate::content::{DltsSpectrum, LatticeScene, MapScene, PortfolioPage};
use crate::core::provider::{ProfileDataProvider, NO_ABSTRACT};
use crate::domain::model::{FetchOutcome, SiteBundle};
use crate::domain::ports::{Pipeline, ScholarSource, Storage};
use crate::utils::error::Result;
use std::io::Write;
use std::sync::Arc;
use zip::write::{FileOptions, ZipWriter};

pub const SPECTRUM_FILE: &str = "dlts_spectrum.tsv";

pub struct PortfolioPipeline<S: Storage, L: ScholarSource> {
    storage: S,
    config: PortfolioConfig,
    provider: Arc<ProfileDataProvider<L>>,
}

impl<S: Storage, L: ScholarSource> PortfolioPipeline<S, L> {
    pub fn new(
        storage: S,
        config: PortfolioConfig,
        provider: Arc<ProfileDataProvider<L>>,
    ) -> Self {
        Self {
            storage,
            config,
            provider,
        }
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    /// Attach abstracts to live entries. Archived entries stay as they are.
    async fn attach_abstracts(&self, page: &mut PortfolioPage) {
        if page.publications.source != PublicationSource::Live || !self.config.fetch_abstracts() {
            return;
        }
        for entry in &mut page.publications.entries {
            let text = match &entry.author_pub_id {
                Some(id) => self.provider.publication_abstract(id).await.to_string(),
                None => NO_ABSTRACT.to_string(),
            };
            entry.abstract_text = Some(text);
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, L: ScholarSource> Pipeline for PortfolioPipeline<S, L> {
    async fn extract(&self) -> Result<FetchOutcome> {
        tracing::debug!("Fetching metrics for {}", self.config.scholar_id());
        Ok(self.provider.fetch_metrics(self.config.scholar_id()).await)
    }

    async fn transform(&self, outcome: FetchOutcome) -> Result<SiteBundle> {
        let spectrum = DltsSpectrum::embedded()?;
        let mut page =
            PortfolioPage::assemble(&self.config, &outcome, spectrum.summary(SPECTRUM_FILE));
        self.attach_abstracts(&mut page).await;
        let lattice = LatticeScene::build(self.config.lattice_params())?;
        let research_map = MapScene::research_visits();

        tracing::debug!(
            "Page has {} publications ({:?}), lattice has {} bonds",
            page.publications.entries.len(),
            page.publications.source,
            lattice.bonds.len()
        );

        Ok(SiteBundle {
            status: outcome.status,
            profile_json: serde_json::to_string_pretty(&page)?,
            publications_csv: page.publications.to_csv()?,
            spectrum_tsv: spectrum.to_tsv()?,
            lattice_json: serde_json::to_string_pretty(&lattice)?,
            research_map_json: serde_json::to_string_pretty(&research_map)?,
        })
    }

    async fn load(&self, bundle: SiteBundle) -> Result<String> {
        let bundle_name = self.config.bundle_name();
        let output_path = format!("{}/{}", self.config.output_path(), bundle_name);

        // 在記憶體中打包
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, content) in bundle.files() {
                zip.start_file::<_, ()>(name, FileOptions::default())?;
                zip.write_all(content.as_bytes())?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing bundle ({} bytes) to storage", zip_data.len());
        self.storage.write_file(bundle_name, &zip_data).await?;

        Ok(output_path)
    }
}
