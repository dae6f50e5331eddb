//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::commands::upload::upload_file;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use brdx_workflow::{
    AppConfig, ExtractionClient, ExtractionResult, FileEvent, ProcessFileWorkflow, SchemaRegistry,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Execute the process command.
pub async fn execute_process<C: ExtractionClient>(
    args: ProcessArgs,
    config: &AppConfig,
    client: Arc<C>,
    formatter: &Formatter,
) -> Result<()> {
    let result = process(args, config, client).await?;
    println!("{}", formatter.format_extraction(&result)?);
    Ok(())
}

async fn process<C: ExtractionClient>(
    args: ProcessArgs,
    config: &AppConfig,
    client: Arc<C>,
) -> Result<ExtractionResult> {
    let file_id = match (args.file_id, args.path) {
        (Some(file_id), _) => file_id,
        (None, Some(path)) => {
            let file_id = upload_file(&path, client.as_ref()).await?;
            info!("Uploaded {} as {}", path.display(), file_id);
            file_id
        }
        (None, None) => {
            return Err(CliError::InvalidInput(
                "either a path or --file-id is required".to_string(),
            ));
        }
    };

    let registry = Arc::new(SchemaRegistry::from_config(config));
    let workflow = ProcessFileWorkflow::new(registry, client);
    let run = workflow.run(FileEvent::new(file_id));

    let result = match args.timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), run)
            .await
            .map_err(|_| CliError::Timeout(secs))??,
        None => run.await?,
    };

    Ok(result)
}
