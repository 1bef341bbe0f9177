use crate::cli::Cli;
use crate::commands::{connector, spinner, Result};
use crate::output::{format_output, OutputData};

pub async fn run(cli: &Cli, input: &str) -> Result<()> {
    let youtube = connector(cli)?;

    let progress = spinner(format!("Fetching transcript for {}...", input));
    let transcript = youtube.transcript(input).await;
    progress.finish_and_clear();
    let transcript = transcript?;

    tracing::info!(cues = transcript.transcript.len(), "transcript fetched");
    format_output(&OutputData::Transcript(transcript), cli.output)
}
