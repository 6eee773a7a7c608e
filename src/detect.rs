//! Format detection for search result pages.
//!
//! A results page arrives in one of three shapes, decided once up front:
//!
//! - legacy server-rendered markup with `.yt-lockup-dismissable` tiles,
//! - HTML embedding a `ytInitialData` JSON blob, found behind one of two
//!   textual anchors,
//! - a `youtubei/v1/search` continuation response (JSON only).
//!
//! Neither anchor is a stable contract. Anything that cannot be located or
//! parsed is logged and treated as an empty section list, so the caller
//! always gets an envelope back.

use log::{debug, info, warn};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::{Result, ScrapeError};
use crate::normalize::normalize_lockup;
use crate::walker::{Walk, walk_sections};
use crate::{ResultEnvelope, ResultRecord};

const LEGACY_TILE: &str = ".yt-lockup-dismissable";

const ORIGINAL_ANCHOR: &str = r#"(?s)ytInitialData"[^{]*(.*);\s*window\["ytInitialPlayerResponse"\]"#;
const SCRAPER_DATA_ANCHOR: &str = r"(?s)ytInitialData[^{]*(.*);\s*// scraper_data_end";

const SEARCH_SECTIONS: &str = "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents";
const CONTINUATION_ITEMS: &str = "/onResponseReceivedCommands/0/appendContinuationItemsAction/continuationItems";

const NO_ESTIMATE: &str = "0";

/// Which textual anchor the embedded JSON was found behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonAnchor {
    /// `ytInitialData` followed by `window["ytInitialPlayerResponse"]`
    Original,
    /// `ytInitialData` followed by a `// scraper_data_end` comment
    ScraperData,
}

/// The detection path a response went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Continuation,
    LegacyMarkup,
    EmbeddedJson(JsonAnchor),
}

impl SourceFormat {
    /// Tag reported in the envelope's `parser` field
    pub fn parser_tag(&self) -> &'static str {
        match self {
            SourceFormat::Continuation => "json_format.page_token",
            SourceFormat::LegacyMarkup => "html_format",
            SourceFormat::EmbeddedJson(JsonAnchor::Original) => "json_format.original",
            SourceFormat::EmbeddedJson(JsonAnchor::ScraperData) => "json_format.scraper_data",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parser_tag())
    }
}

/// Everything pulled out of one page or continuation response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub format: SourceFormat,
    pub results: Vec<ResultRecord>,
    pub key: Option<String>,
    pub next_page_token: Option<String>,
    pub estimated_results: String,
}

impl Extraction {
    fn from_walk(format: SourceFormat, walk: Walk, key: Option<String>, estimated_results: String) -> Self {
        Self {
            format,
            results: walk.results,
            key,
            next_page_token: walk.next_page_token,
            estimated_results,
        }
    }

    pub fn into_envelope(self, version: &str) -> ResultEnvelope {
        ResultEnvelope {
            results: self.results,
            version: version.to_string(),
            parser: self.format.parser_tag().to_string(),
            key: self.key,
            next_page_token: self.next_page_token,
            estimated_results: self.estimated_results,
        }
    }
}

/// A classified page, carrying the part each path needs
enum Detected<'a> {
    LegacyMarkup(Html),
    EmbeddedJson { anchor: JsonAnchor, blob: Option<&'a str> },
}

fn detect(html: &str) -> Detected<'_> {
    let doc = Html::parse_document(html);
    match has_legacy_tiles(&doc) {
        Ok(true) => return Detected::LegacyMarkup(doc),
        Ok(false) => {}
        Err(e) => warn!("Legacy markup check failed: {e}"),
    }

    match find_blob(html) {
        Ok((anchor, blob)) => Detected::EmbeddedJson { anchor, blob },
        Err(e) => {
            warn!("Embedded data lookup failed: {e}");
            Detected::EmbeddedJson {
                anchor: JsonAnchor::ScraperData,
                blob: None,
            }
        }
    }
}

fn has_legacy_tiles(doc: &Html) -> Result<bool> {
    Ok(doc.select(&tile_selector()?).next().is_some())
}

fn tile_selector() -> Result<Selector> {
    Selector::parse(LEGACY_TILE).map_err(|e| ScrapeError::Parse(format!("bad selector {LEGACY_TILE}: {e}")))
}

/// Locate the `ytInitialData` blob, preferring the original anchor
fn find_blob(html: &str) -> Result<(JsonAnchor, Option<&str>)> {
    if let Some(caps) = Regex::new(ORIGINAL_ANCHOR)?.captures(html) {
        return Ok((JsonAnchor::Original, caps.get(1).map(|m| m.as_str())));
    }
    let blob = Regex::new(SCRAPER_DATA_ANCHOR)?
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());
    Ok((JsonAnchor::ScraperData, blob))
}

fn extract_api_key(html: &str) -> Result<String> {
    let re = Regex::new(r#""innertubeApiKey"\s*:\s*"([^"]*)""#)?;
    if let Some(caps) = re.captures(html) {
        return Ok(caps[1].to_string());
    }

    // Fallback: the ytcfg constant
    let re2 = Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#)?;
    if let Some(caps) = re2.captures(html) {
        return Ok(caps[1].to_string());
    }

    Err(ScrapeError::Parse("could not extract InnerTube API key from results page".to_string()))
}

fn estimated_results(data: &Value) -> String {
    match data.get("estimatedResults") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => NO_ESTIMATE.to_string(),
    }
}

fn sections_at<'a>(data: &'a Value, path: &str) -> Result<&'a [Value]> {
    data.pointer(path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| ScrapeError::Parse(format!("no section list at {path}")))
}

fn walk_at(data: &Value, path: &str) -> Walk {
    match sections_at(data, path) {
        Ok(sections) => walk_sections(sections),
        Err(e) => {
            warn!("Proceeding with no sections: {e}");
            Walk::default()
        }
    }
}

/// Classify a results page and extract its records
pub fn extract_page(html: &str) -> Extraction {
    let extraction = match detect(html) {
        Detected::LegacyMarkup(doc) => extract_legacy(&doc),
        Detected::EmbeddedJson { anchor, blob } => extract_embedded(html, anchor, blob),
    };
    info!(
        "Extracted {} results via {}",
        extraction.results.len(),
        extraction.format
    );
    extraction
}

fn extract_legacy(doc: &Html) -> Extraction {
    let mut results = Vec::new();
    match tile_selector() {
        Ok(sel) => {
            for tile in doc.select(&sel) {
                match normalize_lockup(tile) {
                    Ok(record) => results.push(record),
                    Err(e) => {
                        warn!("Skipping lockup: {e}");
                        debug!("Offending lockup: {}", tile.html());
                    }
                }
            }
        }
        Err(e) => warn!("Legacy extraction failed: {e}"),
    }

    Extraction {
        format: SourceFormat::LegacyMarkup,
        results,
        key: None,
        next_page_token: None,
        estimated_results: NO_ESTIMATE.to_string(),
    }
}

fn extract_embedded(html: &str, anchor: JsonAnchor, blob: Option<&str>) -> Extraction {
    let format = SourceFormat::EmbeddedJson(anchor);

    let key = match extract_api_key(html) {
        Ok(key) => Some(key),
        Err(e) => {
            warn!("{e}");
            None
        }
    };

    let parsed = blob
        .ok_or_else(|| ScrapeError::Parse(format!("ytInitialData not found ({format})")))
        .and_then(|b| serde_json::from_str::<Value>(b).map_err(|e| ScrapeError::Parse(format!("invalid ytInitialData: {e}"))));

    match parsed {
        Ok(data) => {
            let walk = walk_at(&data, SEARCH_SECTIONS);
            Extraction::from_walk(format, walk, key, estimated_results(&data))
        }
        Err(e) => {
            warn!("Failed to parse data: {e}");
            Extraction::from_walk(format, Walk::default(), key, NO_ESTIMATE.to_string())
        }
    }
}

/// Extract records from a continuation response body
pub fn extract_continuation(body: &Value, key: &str) -> Extraction {
    let walk = walk_at(body, CONTINUATION_ITEMS);
    debug!("Continuation yielded {} results", walk.results.len());
    Extraction::from_walk(
        SourceFormat::Continuation,
        walk,
        Some(key.to_string()),
        estimated_results(body),
    )
}
