use crate::cli::OutputFormat;
use crate::commands::Result;
use serde_json::Value;
use ytlens_core::connectors::youtube::{SearchResultItem, TranscriptResult, VideoInfo};

mod pretty;
pub use pretty::format_pretty;

#[derive(Debug, Clone)]
pub enum OutputData {
    SearchResults {
        query: String,
        results: Vec<SearchResultItem>,
    },
    VideoInfo(VideoInfo),
    Transcript(TranscriptResult),
}

impl OutputData {
    /// The value an MCP client would receive for the same call.
    fn entity(&self) -> Result<Value> {
        Ok(match self {
            OutputData::SearchResults { results, .. } => serde_json::to_value(results)?,
            OutputData::VideoInfo(info) => serde_json::to_value(info)?,
            OutputData::Transcript(transcript) => serde_json::to_value(transcript)?,
        })
    }
}

pub fn format_output(data: &OutputData, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&data.entity()?)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&data.entity()?)?);
        }
        OutputFormat::Text => {
            print!("{}", format_text(data));
        }
        OutputFormat::Pretty => {
            format_pretty(data);
        }
    }
    Ok(())
}

pub fn format_text(data: &OutputData) -> String {
    let mut out = String::new();
    match data {
        OutputData::SearchResults { results, .. } => {
            for (i, item) in results.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("{}. {}\n", i + 1, item.title));
                out.push_str(&format!("   {}\n", item.url));
                push_field(&mut out, "   channel", &item.channel.name);
                push_field(&mut out, "   views", &item.view_count);
                push_field(&mut out, "   published", &item.published_time);
            }
        }
        OutputData::VideoInfo(info) => {
            push_field(&mut out, "title", &info.title);
            push_field(&mut out, "url", &info.url);
            push_field(&mut out, "channel", &info.channel.name);
            push_field(&mut out, "channel url", &info.channel.url);
            push_field(&mut out, "views", &info.view_count);
            push_field(&mut out, "published", &info.publish_date);
            push_field(&mut out, "thumbnail", &info.thumbnail_url);
            if !info.description.is_empty() {
                out.push('\n');
                out.push_str(&info.description);
                out.push('\n');
            }
        }
        OutputData::Transcript(result) => {
            for entry in &result.transcript {
                out.push_str(&format!("[{}] {}\n", entry.time, entry.text));
            }
        }
    }
    out
}

fn push_field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("{}: {}\n", label, value));
    }
}
