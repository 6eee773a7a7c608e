pub mod config;
pub mod detect;
pub mod error;
pub mod normalize;
pub mod output;
pub mod search;
pub mod walker;

#[cfg(test)]
mod fixtures;

use serde::{Deserialize, Serialize};

pub use error::ScrapeError;
pub use search::{SearchClient, SearchRequest};

/// Root that relative upstream paths are resolved against
pub const YOUTUBE_ORIGIN: &str = "https://www.youtube.com";

/// A single normalized search result
///
/// Every field is a presentation string and is always present; gaps in the
/// upstream data are filled with sentinels such as `"Live"` or `"0 views"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    pub duration: String,
    pub snippet: String,
    pub channel: String,
    pub channel_link: String,
    pub release_date: String,
    pub thumbnail_src: String,
    pub num_views: String,
}

/// Complete response for one search or continuation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    pub results: Vec<ResultRecord>,
    pub version: String,
    pub parser: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub estimated_results: String,
}

/// What the orchestrator hands back: an envelope, or an `{"error": ...}` value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Found(ResultEnvelope),
    Failed { error: String },
}

impl SearchResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, SearchResponse::Failed { .. })
    }

    /// Convert into a `Result` for callers that would rather use `?`
    pub fn into_result(self) -> Result<ResultEnvelope, String> {
        match self {
            SearchResponse::Found(envelope) => Ok(envelope),
            SearchResponse::Failed { error } => Err(error),
        }
    }
}

impl From<ResultEnvelope> for SearchResponse {
    fn from(envelope: ResultEnvelope) -> Self {
        SearchResponse::Found(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_envelope() -> ResultEnvelope {
        ResultEnvelope {
            results: vec![ResultRecord {
                id: "dQw4w9WgXcQ".to_string(),
                title: "Never Gonna Give You Up".to_string(),
                link: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                duration: "3:33".to_string(),
                snippet: "".to_string(),
                channel: "Rick Astley".to_string(),
                channel_link: "https://www.youtube.com/@RickAstley".to_string(),
                release_date: "15 years ago".to_string(),
                thumbnail_src: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg".to_string(),
                num_views: "1,500,000,000 views".to_string(),
            }],
            version: "0.1.0".to_string(),
            parser: "json_format.original".to_string(),
            key: None,
            next_page_token: None,
            estimated_results: "0".to_string(),
        }
    }

    #[test]
    fn test_record_field_names() {
        let json = serde_json::to_value(&sample_envelope().results[0]).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "channel",
                "channelLink",
                "duration",
                "id",
                "link",
                "numViews",
                "releaseDate",
                "snippet",
                "thumbnailSrc",
                "title"
            ]
        );
    }

    #[test]
    fn test_envelope_omits_absent_key_and_token() {
        let json = serde_json::to_value(sample_envelope()).unwrap();
        assert!(json.get("key").is_none());
        assert!(json.get("nextPageToken").is_none());
        assert_eq!(json["estimatedResults"], "0");
        assert_eq!(json["parser"], "json_format.original");
    }

    #[test]
    fn test_envelope_includes_token_when_present() {
        let mut envelope = sample_envelope();
        envelope.next_page_token = Some("TOKEN123".to_string());
        envelope.key = Some("AIzaSyB123".to_string());
        let json = serde_json::to_value(envelope).unwrap();
        assert_eq!(json["nextPageToken"], "TOKEN123");
        assert_eq!(json["key"], "AIzaSyB123");
    }

    #[test]
    fn test_failed_response_shape() {
        let response = SearchResponse::Failed {
            error: "connection refused".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "connection refused" }));
        assert!(response.is_error());
        assert_eq!(response.into_result(), Err("connection refused".to_string()));
    }
}
