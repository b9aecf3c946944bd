use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct CatalogEngine<P: Pipeline> {
    pipeline: P,
    monitor: Option<RunMonitor>,
}

impl<P: Pipeline> CatalogEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: None,
        }
    }

    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: enabled.then(RunMonitor::new),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting catalog generation...");

        // Extract
        let tables = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} listing rows and {} pricing rows",
            tables.listing.len(),
            tables.pricing.len()
        );

        // Transform
        let result = self.pipeline.transform(tables).await?;
        tracing::info!("Rendered {} product cards", result.cards.len());

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Catalog saved to: {}", output_path);

        if let Some(monitor) = &self.monitor {
            monitor.log_summary("Catalog run");
        }

        Ok(output_path)
    }
}
