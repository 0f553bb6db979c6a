use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Drive the full export: collect, flatten, write, email. Returns the
    /// names of the files that were written.
    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("Collecting resource listings...");
        let collections = self.pipeline.extract().await?;
        tracing::info!("Collected {} resource kind(s)", collections.len());

        tracing::info!("Flattening records...");
        let tables = self.pipeline.transform(collections).await?;

        tracing::info!("Writing workbooks...");
        let files = self.pipeline.load(tables).await?;

        tracing::info!("Delivering report...");
        self.pipeline.deliver(&files).await?;

        Ok(files)
    }
}
