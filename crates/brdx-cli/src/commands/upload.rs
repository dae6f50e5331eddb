//! Upload command implementation.

use crate::cli::UploadArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use brdx_workflow::ExtractionClient;

/// Execute the upload command.
pub async fn execute_upload<C: ExtractionClient>(
    args: UploadArgs,
    client: &C,
    formatter: &Formatter,
) -> Result<()> {
    let file_id = upload_file(&args.path, client).await?;
    println!("{}", formatter.format_upload(&file_id));
    Ok(())
}

/// Upload `path`, rejecting paths that are not regular files before any backend call.
pub(crate) async fn upload_file<C: ExtractionClient>(
    path: &std::path::Path,
    client: &C,
) -> Result<String> {
    if !path.is_file() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a readable file",
            path.display()
        )));
    }
    Ok(client.upload(path).await?)
}
