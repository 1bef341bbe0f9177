use crate::cli::Cli;
use crate::commands::{connector, spinner, Result};
use crate::output::{format_output, OutputData};

pub async fn run(cli: &Cli, query: &str, limit: u8) -> Result<()> {
    let youtube = connector(cli)?;

    let progress = spinner(format!("Searching YouTube for '{}'...", query));
    let results = youtube.search(query, limit).await;
    progress.finish_and_clear();
    let results = results?;

    tracing::info!(query, count = results.len(), "search finished");
    format_output(
        &OutputData::SearchResults {
            query: query.to_string(),
            results,
        },
        cli.output,
    )
}
