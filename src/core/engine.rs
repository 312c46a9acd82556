use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct BuildEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BuildEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting portfolio build...");

        // Extract
        let outcome = self.pipeline.extract().await?;
        tracing::info!(
            "Metrics ready ({:?}): {} citations, {} publications",
            outcome.status,
            outcome.metrics.total_citations,
            outcome.metrics.publication_list.len()
        );

        // Transform
        let bundle = self.pipeline.transform(outcome).await?;
        tracing::info!("Rendered {} bundle files", bundle.files().len());

        // Load
        let output_path = self.pipeline.load(bundle).await?;
        tracing::info!(
            "Bundle saved to: {} ({} ms)",
            output_path,
            started.elapsed().as_millis()
        );

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FetchOutcome, MetricsStatus, ProfileMetrics, SiteBundle};
    use crate::utils::error::PortfolioError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubPipeline {
        stages: Arc<AtomicUsize>,
        fail_load: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<FetchOutcome> {
            self.stages.fetch_add(1, Ordering::SeqCst);
            Ok(FetchOutcome::fallback(Arc::new(ProfileMetrics::placeholder())))
        }

        async fn transform(&self, outcome: FetchOutcome) -> Result<SiteBundle> {
            self.stages.fetch_add(1, Ordering::SeqCst);
            Ok(SiteBundle {
                status: outcome.status,
                profile_json: "{}".to_string(),
                publications_csv: String::new(),
                spectrum_tsv: String::new(),
                lattice_json: "{}".to_string(),
                research_map_json: "{}".to_string(),
            })
        }

        async fn load(&self, bundle: SiteBundle) -> Result<String> {
            self.stages.fetch_add(1, Ordering::SeqCst);
            assert_eq!(bundle.status, MetricsStatus::Fallback);
            if self.fail_load {
                return Err(PortfolioError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only output",
                )));
            }
            Ok("out/portfolio_bundle.zip".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_executes_all_stages() {
        let stages = Arc::new(AtomicUsize::new(0));
        let engine = BuildEngine::new(StubPipeline {
            stages: Arc::clone(&stages),
            fail_load: false,
        });

        let path = engine.run().await.unwrap();

        assert_eq!(path, "out/portfolio_bundle.zip");
        assert_eq!(stages.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_propagates_load_error() {
        let engine = BuildEngine::new(StubPipeline {
            stages: Arc::new(AtomicUsize::new(0)),
            fail_load: true,
        });

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, PortfolioError::IoError(_)));
    }
}
