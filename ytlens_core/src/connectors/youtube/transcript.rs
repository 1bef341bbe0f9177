use serde::Deserialize;
use serde_json::Value;

use super::fetch::PageFetcher;
use super::path::{lookup, text_at};
use super::types::{TranscriptChannel, TranscriptEntry, TranscriptResult, TranscriptVideoInfo};
use crate::error::ConnectorError;
use crate::path;

/// Language picked when a video offers it; otherwise the first listed track is used.
pub const PREFERRED_LANGUAGE: &str = "en";

/// Asks the timedtext endpoint for JSON cues instead of the default XML.
const JSON3_FORMAT: &str = "&fmt=json3";

/// Caption tracks from `captions.playerCaptionsTracklistRenderer.captionTracks`.
/// `None` when the list is absent or empty.
pub fn caption_tracks(player: &Value) -> Option<&[Value]> {
    lookup(
        player,
        path!["captions", "playerCaptionsTracklistRenderer", "captionTracks"],
    )
    .and_then(Value::as_array)
    .map(Vec::as_slice)
    .filter(|tracks| !tracks.is_empty())
}

/// The English track if there is one, else the first track regardless of language.
pub fn select_caption_track(tracks: &[Value]) -> Option<&Value> {
    tracks
        .iter()
        .find(|track| text_at(track, path!["languageCode"]) == PREFERRED_LANGUAGE)
        .or_else(|| tracks.first())
}

pub fn caption_body_url(track: &Value) -> Result<String, ConnectorError> {
    let base = text_at(track, path!["baseUrl"]);
    if base.is_empty() {
        return Err(ConnectorError::CaptionUrlMissing);
    }
    Ok(format!("{}{}", base, JSON3_FORMAT))
}

#[derive(Debug, Deserialize)]
struct CaptionBody {
    #[serde(default)]
    events: Vec<CaptionEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionEvent {
    #[serde(default)]
    t_start_ms: u64,
    segs: Option<Vec<CaptionSegment>>,
}

#[derive(Debug, Deserialize)]
struct CaptionSegment {
    #[serde(default)]
    utf8: Option<String>,
}

/// Parses a json3 caption body into entries, in source order.
///
/// Events without `segs` (window and style events) are dropped.
pub fn parse_caption_body(body: &str) -> Result<Vec<TranscriptEntry>, ConnectorError> {
    let body: CaptionBody =
        serde_json::from_str(body).map_err(|e| ConnectorError::CaptionFormat(e.to_string()))?;

    Ok(body
        .events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let text = segs
                .iter()
                .filter_map(|seg| seg.utf8.as_deref())
                .collect::<Vec<_>>()
                .join(" ");
            Some(TranscriptEntry {
                time: format_seconds(event.t_start_ms),
                text: text.trim().to_string(),
            })
        })
        .collect())
}

/// Seconds with two decimals. Exact halves (odd multiples of 125 ms, the only
/// ones an f64 holds exactly) round up; everything else rounds from the nearest
/// f64, so 1005 ms stays "1.00".
fn format_seconds(start_ms: u64) -> String {
    if start_ms % 250 == 125 {
        let centis = (start_ms + 5) / 10;
        return format!("{}.{:02}", centis / 100, centis % 100);
    }
    format!("{:.2}", start_ms as f64 / 1000.0)
}

/// Title, author and raw `lengthSeconds` from `videoDetails`.
pub fn project_transcript_details(player: &Value) -> TranscriptVideoInfo {
    TranscriptVideoInfo {
        title: text_at(player, path!["videoDetails", "title"]),
        channel: TranscriptChannel {
            name: text_at(player, path!["videoDetails", "author"]),
        },
        duration: text_at(player, path!["videoDetails", "lengthSeconds"]),
    }
}

/// Selects a caption track from the player response, fetches its cues and pairs them
/// with the video details from the same response.
pub async fn project_transcript(
    player: &Value,
    fetcher: &dyn PageFetcher,
    referer: Option<&str>,
) -> Result<TranscriptResult, ConnectorError> {
    let tracks = caption_tracks(player).ok_or(ConnectorError::NoTranscript)?;
    let track = select_caption_track(tracks).ok_or(ConnectorError::NoTranscript)?;
    let url = caption_body_url(track)?;
    tracing::debug!(
        language = %text_at(track, path!["languageCode"]),
        available = tracks.len(),
        "selected caption track"
    );

    let body = fetcher.fetch_text(&url, referer).await?;
    let transcript = parse_caption_body(&body)?;

    Ok(TranscriptResult {
        transcript,
        video_info: project_transcript_details(player),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(lang: &str) -> Value {
        json!({"languageCode": lang, "baseUrl": format!("https://www.youtube.com/api/timedtext?v=x&lang={}", lang)})
    }

    #[test]
    fn prefers_english_track() {
        let tracks = vec![track("fr"), track("en"), track("de")];
        assert_eq!(select_caption_track(&tracks).unwrap()["languageCode"], "en");
    }

    #[test]
    fn falls_back_to_first_track() {
        let tracks = vec![track("fr"), track("de")];
        assert_eq!(select_caption_track(&tracks).unwrap()["languageCode"], "fr");
    }

    #[test]
    fn regional_english_is_not_english() {
        let tracks = vec![track("de"), track("en-GB")];
        assert_eq!(select_caption_track(&tracks).unwrap()["languageCode"], "de");
    }

    #[test]
    fn empty_or_missing_track_list_is_none() {
        let empty = json!({"captions": {"playerCaptionsTracklistRenderer": {"captionTracks": []}}});
        assert!(caption_tracks(&empty).is_none());
        assert!(caption_tracks(&json!({"videoDetails": {}})).is_none());
    }

    #[test]
    fn body_url_requests_json3() {
        let url = caption_body_url(&track("en")).unwrap();
        assert!(url.ends_with("lang=en&fmt=json3"));
        assert!(matches!(
            caption_body_url(&json!({"languageCode": "en"})),
            Err(ConnectorError::CaptionUrlMissing)
        ));
    }

    #[test]
    fn parses_cues_in_source_order() {
        let body = json!({"events": [
            {"tStartMs": 0, "dDurationMs": 5000, "id": 1, "wpWinPosId": 1},
            {"tStartMs": 2500, "dDurationMs": 1000, "segs": [{"utf8": "hello"}, {"utf8": "world"}]},
            {"tStartMs": 1200, "segs": [{"utf8": " earlier in time "}]},
            {"tStartMs": 61000, "segs": [{"utf8": "\n"}]}
        ]})
        .to_string();

        let entries = parse_caption_body(&body).unwrap();
        assert_eq!(
            entries,
            vec![
                TranscriptEntry { time: "2.50".into(), text: "hello world".into() },
                TranscriptEntry { time: "1.20".into(), text: "earlier in time".into() },
                TranscriptEntry { time: "61.00".into(), text: "".into() },
            ]
        );
    }

    #[test]
    fn halfway_times_round_up() {
        let body = json!({"events": [
            {"tStartMs": 1125, "segs": [{"utf8": "a"}]},
            {"tStartMs": 625, "segs": [{"utf8": "b"}]},
            {"tStartMs": 375, "segs": [{"utf8": "c"}]},
            {"tStartMs": 3875, "segs": [{"utf8": "d"}]}
        ]})
        .to_string();

        let times: Vec<String> = parse_caption_body(&body)
            .unwrap()
            .into_iter()
            .map(|entry| entry.time)
            .collect();
        assert_eq!(times, vec!["1.13", "0.63", "0.38", "3.88"]);
    }

    #[test]
    fn inexact_halves_follow_the_nearest_double() {
        assert_eq!(format_seconds(1005), "1.00");
        assert_eq!(format_seconds(1250), "1.25");
        assert_eq!(format_seconds(0), "0.00");
        assert_eq!(format_seconds(59_999), "60.00");
    }

    #[test]
    fn null_or_missing_segment_text_is_skipped() {
        let body = json!({"events": [
            {"tStartMs": 1000, "segs": [{"utf8": "kept"}, {"utf8": null}, {}, {"utf8": "too"}]}
        ]})
        .to_string();

        let entries = parse_caption_body(&body).unwrap();
        assert_eq!(
            entries,
            vec![TranscriptEntry { time: "1.00".into(), text: "kept too".into() }]
        );
    }

    #[test]
    fn unparseable_body_is_caption_format_error() {
        assert!(matches!(
            parse_caption_body("<transcript></transcript>"),
            Err(ConnectorError::CaptionFormat(_))
        ));
    }

    #[test]
    fn details_keep_raw_length() {
        let player = json!({"videoDetails": {"title": "T", "author": "A", "lengthSeconds": "213"}});
        let details = project_transcript_details(&player);
        assert_eq!(details.title, "T");
        assert_eq!(details.channel.name, "A");
        assert_eq!(details.duration, "213");
        assert_eq!(project_transcript_details(&json!({})), TranscriptVideoInfo::default());
    }
}
