use crate::cli::Cli;
use crate::commands::{connector, spinner, Result};
use crate::output::{format_output, OutputData};

pub async fn run(cli: &Cli, input: &str) -> Result<()> {
    let youtube = connector(cli)?;

    let progress = spinner(format!("Fetching video details for {}...", input));
    let info = youtube.video_info(input).await;
    progress.finish_and_clear();

    format_output(&OutputData::VideoInfo(info?), cli.output)
}
