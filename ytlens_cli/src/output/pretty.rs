//! Pretty formatter for terminal output.
//!
//! Search results render as numbered cards, video details as a title block
//! with dimmed metadata, transcripts as a header followed by timed lines.

use super::OutputData;
use owo_colors::OwoColorize;
use ytlens_core::connectors::youtube::{SearchResultItem, TranscriptResult, VideoInfo};

/// Wrap width for descriptions.
const WRAP_WIDTH: usize = 80;

/// Indent for card content (after number)
const CARD_INDENT: usize = 5;

/// Longest description shown on a search card.
const SNIPPET_CHARS: usize = 200;

pub fn format_pretty(data: &OutputData) {
    match data {
        OutputData::SearchResults { query, results } => search_results(query, results),
        OutputData::VideoInfo(info) => video_info(info),
        OutputData::Transcript(result) => transcript(result),
    }
}

fn search_results(query: &str, results: &[SearchResultItem]) {
    println!();
    println!(
        "{} {}",
        "Search results for".dimmed(),
        format!("'{}'", query).bold()
    );
    println!();

    if results.is_empty() {
        println!("  {}", "No videos found.".yellow());
        println!();
        return;
    }

    let indent = " ".repeat(CARD_INDENT);
    for (i, item) in results.iter().enumerate() {
        println!(
            "{:>3}. {}",
            (i + 1).to_string().cyan().bold(),
            item.title.bold()
        );

        let meta = metadata_line(&[
            &item.channel.name,
            &item.view_count,
            &item.published_time,
        ]);
        if !meta.is_empty() {
            println!("{}{}", indent, meta.dimmed());
        }
        if !item.description.is_empty() {
            let snippet = truncate(&item.description, SNIPPET_CHARS);
            for line in wrap(&snippet, &indent) {
                println!("{}", line);
            }
        }
        println!("{}{}", indent, item.url.blue().underline());
        println!();
    }
}

fn video_info(info: &VideoInfo) {
    println!();
    println!("{}", info.title.bold());

    let meta = metadata_line(&[&info.channel.name, &info.view_count, &info.publish_date]);
    if !meta.is_empty() {
        println!("{}", meta.dimmed());
    }
    println!("{}", info.url.blue().underline());
    if !info.channel.url.is_empty() {
        println!("{} {}", "Channel:".dimmed(), info.channel.url.blue());
    }

    if !info.description.is_empty() {
        println!();
        for paragraph in info.description.lines() {
            if paragraph.trim().is_empty() {
                println!();
                continue;
            }
            for line in wrap(paragraph, "") {
                println!("{}", line);
            }
        }
    }
    println!();
}

fn transcript(result: &TranscriptResult) {
    let details = &result.video_info;
    println!();
    if !details.title.is_empty() {
        println!("{}", details.title.bold());
    }
    let duration = if details.duration.is_empty() {
        String::new()
    } else {
        format!("{}s", details.duration)
    };
    let meta = metadata_line(&[&details.channel.name, &duration]);
    if !meta.is_empty() {
        println!("{}", meta.dimmed());
    }
    println!(
        "{}",
        format!("{} caption lines", result.transcript.len()).dimmed()
    );
    println!();

    let width = result
        .transcript
        .iter()
        .map(|entry| entry.time.len())
        .max()
        .unwrap_or(0);
    for entry in &result.transcript {
        println!(
            "{}  {}",
            format!("{:>width$}", entry.time, width = width).green(),
            entry.text
        );
    }
    println!();
}

/// Non-empty parts joined with a middle dot.
fn metadata_line(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" · ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

fn wrap(text: &str, indent: &str) -> Vec<String> {
    let options = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_skips_empty_parts() {
        assert_eq!(metadata_line(&["Chan", "", "1 day ago"]), "Chan · 1 day ago");
        assert_eq!(metadata_line(&["", ""]), "");
    }

    #[test]
    fn long_snippets_are_truncated_on_char_boundaries() {
        let text = "é".repeat(300);
        let cut = truncate(&text, SNIPPET_CHARS);
        assert_eq!(cut.chars().count(), SNIPPET_CHARS + 1);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("short", SNIPPET_CHARS), "short");
    }

    #[test]
    fn wrapped_lines_keep_the_indent() {
        let text = "word ".repeat(40);
        let lines = wrap(text.trim(), "     ");
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.starts_with("     ") && l.len() <= WRAP_WIDTH));
    }
}
