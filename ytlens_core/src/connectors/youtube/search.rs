use serde_json::Value;

use super::path::{lookup, text_at};
use super::types::{Channel, SearchResultItem};
use crate::path;

pub const MIN_LIMIT: u8 = 1;
pub const MAX_LIMIT: u8 = 10;

const CHANNEL_ORIGIN: &str = "https://youtube.com";

/// Projects the search page's `ytInitialData` into at most `limit` video results.
///
/// Only `videoRenderer` items are considered; shelves, ads and other node kinds are
/// skipped. Scanning stops as soon as `limit` results have been produced.
pub fn project_search(data: &Value, limit: usize) -> Vec<SearchResultItem> {
    let items = lookup(
        data,
        path![
            "contents",
            "twoColumnSearchResultsRenderer",
            "primaryContents",
            "sectionListRenderer",
            "contents",
            0,
            "itemSectionRenderer",
            "contents"
        ],
    )
    .and_then(Value::as_array);

    let Some(items) = items else {
        tracing::debug!("search payload has no item section");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.get("videoRenderer"))
        .filter_map(project_video_renderer)
        .take(limit)
        .collect()
}

fn project_video_renderer(renderer: &Value) -> Option<SearchResultItem> {
    let video_id = text_at(renderer, path!["videoId"]);
    let title = text_at(renderer, path!["title", "runs", 0, "text"]);
    if video_id.is_empty() || title.is_empty() {
        return None;
    }

    let owner = path!["ownerText", "runs", 0];
    let owner_url = text_at(
        renderer,
        &[
            owner,
            path!["navigationEndpoint", "commandMetadata", "webCommandMetadata", "url"],
        ]
        .concat(),
    );

    Some(SearchResultItem {
        url: format!("https://youtube.com/watch?v={}", video_id),
        video_id,
        title,
        thumbnail_url: text_at(renderer, path!["thumbnail", "thumbnails", 0, "url"]),
        description: text_at(renderer, path!["descriptionSnippet", "runs", 0, "text"]),
        channel: Channel {
            name: text_at(renderer, &[owner, path!["text"]].concat()),
            url: absolute_channel_url(&owner_url),
        },
        view_count: text_at(renderer, path!["viewCountText", "simpleText"]),
        published_time: text_at(renderer, path!["publishedTimeText", "simpleText"]),
    })
}

/// Navigation metadata carries site-relative paths such as `/@handle`.
pub(crate) fn absolute_channel_url(raw: &str) -> String {
    if raw.starts_with('/') {
        format!("{}{}", CHANNEL_ORIGIN, raw)
    } else {
        raw.to_string()
    }
}
