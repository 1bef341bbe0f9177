use serde_json::Value;

use super::path::{joined_runs, lookup, text_at};
use super::search::absolute_channel_url;
use super::types::{Channel, VideoInfo};
use super::video_id::VideoId;
use crate::error::ConnectorError;
use crate::path;

/// The two renderers at the head of the watch-next results column.
///
/// YouTube has always emitted the primary info (title, views, date) first and the
/// secondary info (description, owner) second. Nothing in the payload tags them by
/// position, so this pairing is read off the observed order.
#[derive(Debug, Clone, Copy)]
pub struct WatchNodes<'a> {
    pub primary: &'a Value,
    pub secondary: Option<&'a Value>,
}

impl<'a> WatchNodes<'a> {
    pub fn locate(data: &'a Value) -> Result<Self, ConnectorError> {
        let contents = path![
            "contents",
            "twoColumnWatchNextResults",
            "results",
            "results",
            "contents"
        ];
        let primary = lookup(data, &[contents, path![0, "videoPrimaryInfoRenderer"]].concat())
            .ok_or(ConnectorError::VideoDataNotFound)?;
        let secondary = lookup(data, &[contents, path![1, "videoSecondaryInfoRenderer"]].concat());
        if secondary.is_none() {
            tracing::warn!("watch page has no secondary info renderer; description and channel left empty");
        }
        Ok(Self { primary, secondary })
    }
}

/// Projects a watch page's `ytInitialData` into [`VideoInfo`].
///
/// Fails only when the primary info renderer is missing. The thumbnail and watch URLs
/// are always derived from `id`.
pub fn project_video_info(data: &Value, id: &VideoId) -> Result<VideoInfo, ConnectorError> {
    let nodes = WatchNodes::locate(data)?;
    let primary = nodes.primary;

    let (description, channel) = match nodes.secondary {
        Some(secondary) => (description_of(secondary), channel_of(secondary)),
        None => (String::new(), Channel::default()),
    };

    Ok(VideoInfo {
        video_id: id.to_string(),
        title: text_at(primary, path!["title", "runs", 0, "text"]),
        description,
        view_count: text_at(
            primary,
            path!["viewCount", "videoViewCountRenderer", "viewCount", "simpleText"],
        ),
        publish_date: text_at(primary, path!["dateText", "simpleText"]),
        channel,
        thumbnail_url: id.thumbnail_url(),
        url: id.watch_url(),
    })
}

fn description_of(secondary: &Value) -> String {
    joined_runs(secondary, path!["description"])
        // Newer layouts only carry the flattened attributed string.
        .unwrap_or_else(|| text_at(secondary, path!["attributedDescription", "content"]))
}

fn channel_of(secondary: &Value) -> Channel {
    let owner_run = path!["owner", "videoOwnerRenderer", "title", "runs", 0];
    let url = text_at(
        secondary,
        &[
            owner_run,
            path!["navigationEndpoint", "commandMetadata", "webCommandMetadata", "url"],
        ]
        .concat(),
    );
    Channel {
        name: text_at(secondary, &[owner_run, path!["text"]].concat()),
        url: absolute_channel_url(&url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id() -> VideoId {
        VideoId::parse("dQw4w9WgXcQ").unwrap()
    }

    fn watch(contents: Vec<Value>) -> Value {
        json!({"contents": {"twoColumnWatchNextResults": {"results": {"results": {"contents": contents}}}}})
    }

    fn primary() -> Value {
        json!({"videoPrimaryInfoRenderer": {
            "title": {"runs": [{"text": "Never Gonna Give You Up"}]},
            "viewCount": {"videoViewCountRenderer": {"viewCount": {"simpleText": "1,000 views"}}},
            "dateText": {"simpleText": "Oct 25, 2009"}
        }})
    }

    #[test]
    fn reads_both_renderers() {
        let data = watch(vec![
            primary(),
            json!({"videoSecondaryInfoRenderer": {
                "description": {"runs": [{"text": "Line 1\n"}, {"text": "Line 2"}]},
                "owner": {"videoOwnerRenderer": {"title": {"runs": [{
                    "text": "Rick Astley",
                    "navigationEndpoint": {"commandMetadata": {"webCommandMetadata": {"url": "/@RickAstleyYT"}}}
                }]}}}
            }}),
        ]);

        let info = project_video_info(&data, &id()).unwrap();
        assert_eq!(info.title, "Never Gonna Give You Up");
        assert_eq!(info.view_count, "1,000 views");
        assert_eq!(info.publish_date, "Oct 25, 2009");
        assert_eq!(info.description, "Line 1\nLine 2");
        assert_eq!(info.channel.name, "Rick Astley");
        assert_eq!(info.channel.url, "https://youtube.com/@RickAstleyYT");
    }

    #[test]
    fn missing_secondary_degrades_to_empty_fields() {
        let info = project_video_info(&watch(vec![primary()]), &id()).unwrap();
        assert_eq!(info.description, "");
        assert_eq!(info.channel, Channel::default());
        assert_eq!(info.thumbnail_url, "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg");
        assert_eq!(info.url, "https://youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn minimal_primary_still_has_derived_urls() {
        let data = watch(vec![json!({"videoPrimaryInfoRenderer": {}}), json!({"videoSecondaryInfoRenderer": {}})]);
        let info = project_video_info(&data, &id()).unwrap();
        assert_eq!(info.title, "");
        assert_eq!(info.description, "");
        assert!(!info.thumbnail_url.is_empty());
        assert!(!info.url.is_empty());
    }

    #[test]
    fn attributed_description_fallback() {
        let data = watch(vec![
            primary(),
            json!({"videoSecondaryInfoRenderer": {"attributedDescription": {"content": "Flat text"}}}),
        ]);
        assert_eq!(project_video_info(&data, &id()).unwrap().description, "Flat text");
    }

    #[test]
    fn missing_primary_is_video_data_not_found() {
        let data = watch(vec![json!({"somethingElse": {}})]);
        let err = project_video_info(&data, &id()).unwrap_err();
        assert!(matches!(err, ConnectorError::VideoDataNotFound));

        let err = project_video_info(&json!({}), &id()).unwrap_err();
        assert_eq!(err.to_string(), "video data not found");
    }
}
