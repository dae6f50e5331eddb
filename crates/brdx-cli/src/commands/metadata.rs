//! Metadata command implementation.

use crate::error::Result;
use crate::output::Formatter;
use brdx_workflow::{AppConfig, MetadataWorkflow, SchemaRegistry, StartEvent};
use std::sync::Arc;

/// Execute the metadata command.
pub async fn execute_metadata(config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let registry = Arc::new(SchemaRegistry::from_config(config));
    let workflow = MetadataWorkflow::from_config(config, registry);

    let response = workflow.run(StartEvent::default()).await?;
    println!("{}", formatter.format_metadata(&response)?);

    Ok(())
}
