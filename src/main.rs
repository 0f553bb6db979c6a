use clap::Parser;
use ipam_xls_export::utils::{logger, validation::Validate};
use ipam_xls_export::{CliConfig, ExportEngine, ExportPipeline, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ipam-xls-export");

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let output_path = config.output_path.clone();
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ExportPipeline::new(storage, config)?;
    let engine = ExportEngine::new(pipeline);

    match engine.run().await {
        Ok(files) => {
            tracing::info!("✅ Export completed successfully!");
            println!("✅ Export completed successfully!");
            for file in &files {
                println!("📁 {}/{}", output_path, file);
            }
        }
        Err(e) => {
            tracing::error!("❌ Export failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
