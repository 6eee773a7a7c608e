use log::debug;
use scraper::{ElementRef, Selector};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ScrapeError};
use crate::{ResultRecord, YOUTUBE_ORIGIN};

const LIVE: &str = "Live";
const PLAYLIST: &str = "Playlist";
const NO_VIEWS: &str = "0 views";
const NO_WATCHERS: &str = "0 watching";

const LIVE_BADGE_STYLE: &str = "BADGE_STYLE_TYPE_LIVE_NOW";
const LIVE_OVERLAY_STYLE: &str = "LIVE";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoRenderer {
    #[serde(default)]
    video_id: String,
    navigation_endpoint: NavigationEndpoint,
    thumbnail: ThumbnailList,
    title: Text,
    length_text: Option<Text>,
    description_snippet: Option<Text>,
    #[serde(default)]
    detailed_metadata_snippets: Vec<MetadataSnippet>,
    owner_text: Option<Text>,
    long_byline_text: Option<Text>,
    published_time_text: Option<Text>,
    view_count_text: Option<Text>,
    #[serde(default)]
    badges: Vec<Value>,
    #[serde(default)]
    thumbnail_overlays: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NavigationEndpoint {
    command_metadata: CommandMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommandMetadata {
    web_command_metadata: WebCommandMetadata,
}

#[derive(Debug, Deserialize)]
struct WebCommandMetadata {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ThumbnailList {
    thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Upstream text: either a plain `simpleText` or a run list
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Text {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<Run>,
}

/// Only the owner run's endpoint is ever read, so it stays untyped here
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Run {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    bold: Option<bool>,
    navigation_endpoint: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataSnippet {
    snippet_text: Text,
}


impl Text {
    /// Runs concatenated in order, no separator
    fn joined(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    /// Titles come as runs; a bare `simpleText` is accepted too
    fn joined_or_simple(&self) -> String {
        if self.runs.is_empty() {
            self.simple_text.clone().unwrap_or_default()
        } else {
            self.joined()
        }
    }

    /// `simpleText` when it is non-empty, otherwise the joined runs
    fn plain(&self) -> String {
        match self.simple_text.as_deref() {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => self.joined(),
        }
    }

    /// Snippet fragment: run text escaped, bold spans wrapped in `<b>`
    fn emphasized(&self) -> String {
        self.runs
            .iter()
            .map(|r| {
                let text = html_escape::encode_text(r.text());
                if r.bold == Some(true) { format!("<b>{text}</b>") } else { text.into_owned() }
            })
            .collect()
    }
}

impl Run {
    fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    fn link(&self) -> Option<&str> {
        self.navigation_endpoint
            .as_ref()?
            .pointer("/commandMetadata/webCommandMetadata/url")?
            .as_str()
    }
}

/// `style` of the renderer under `key`, tolerating any other shape
fn style_of<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key)?.get("style")?.as_str()
}

impl VideoRenderer {
    fn is_live(&self) -> bool {
        let badge = self
            .badges
            .iter()
            .any(|b| style_of(b, "metadataBadgeRenderer") == Some(LIVE_BADGE_STYLE));
        let overlay = self
            .thumbnail_overlays
            .iter()
            .any(|o| style_of(o, "thumbnailOverlayTimeStatusRenderer") == Some(LIVE_OVERLAY_STYLE));
        badge || overlay
    }
}

fn absolute(path: &str) -> String {
    format!("{YOUTUBE_ORIGIN}{path}")
}

/// Normalize one `videoRenderer` node from the JSON forms
pub fn normalize_video_renderer(node: &Value) -> Result<ResultRecord> {
    let renderer = VideoRenderer::deserialize(node)?;

    let thumbnail_src = renderer
        .thumbnail
        .thumbnails
        .last()
        .map(|t| t.url.clone())
        .ok_or_else(|| ScrapeError::Item(format!("video {} has no thumbnails", renderer.video_id)))?;

    let owner = renderer
        .owner_text
        .as_ref()
        .or(renderer.long_byline_text.as_ref())
        .and_then(|t| t.runs.first())
        .ok_or_else(|| ScrapeError::Item(format!("video {} has no owner", renderer.video_id)))?;
    let owner_url = owner
        .link()
        .ok_or_else(|| ScrapeError::Item(format!("video {} owner has no link", renderer.video_id)))?;

    let duration = match &renderer.length_text {
        Some(text) => text.plain(),
        None if renderer.is_live() => LIVE.to_string(),
        None => PLAYLIST.to_string(),
    };

    let snippet = match (&renderer.description_snippet, renderer.detailed_metadata_snippets.first()) {
        (Some(text), _) => text.emphasized(),
        (None, Some(detailed)) => detailed.snippet_text.emphasized(),
        (None, None) => String::new(),
    };

    let release_date = renderer
        .published_time_text
        .as_ref()
        .map(Text::plain)
        .unwrap_or_else(|| LIVE.to_string());

    let num_views = match (&renderer.view_count_text, &renderer.published_time_text) {
        (Some(views), _) => views.plain(),
        (None, Some(_)) => NO_VIEWS.to_string(),
        (None, None) => NO_WATCHERS.to_string(),
    };

    Ok(ResultRecord {
        link: absolute(&renderer.navigation_endpoint.command_metadata.web_command_metadata.url),
        title: renderer.title.joined_or_simple(),
        channel: owner.text().to_string(),
        channel_link: absolute(owner_url),
        id: renderer.video_id,
        duration,
        snippet,
        release_date,
        thumbnail_src,
        num_views,
    })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("bad selector {css}: {e}")))
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first<'a>(el: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    Ok(el.select(&selector(css)?).next())
}

/// Normalize one legacy `.yt-lockup-dismissable` tile by direct DOM lookups
pub fn normalize_lockup(tile: ElementRef<'_>) -> Result<ResultRecord> {
    let id = tile
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(|p| p.value().attr("data-context-item-id"))
        .unwrap_or_default()
        .to_string();

    let title_anchor = first(tile, ".yt-lockup-title")?.and_then(|t| t.children().find_map(ElementRef::wrap));
    let href = title_anchor
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| ScrapeError::Item(format!("lockup {id:?} has no title link")))?;
    let title = title_anchor.map(text_of).unwrap_or_default();

    let live = first(tile, ".yt-badge-live")?.is_some();
    let duration = first(tile, ".video-time")?
        .map(text_of)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| (if live { LIVE } else { PLAYLIST }).to_string());

    let snippet = first(tile, ".yt-lockup-description")?
        .map(|d| html_escape::encode_text(&text_of(d)).into_owned())
        .unwrap_or_default();

    let byline = first(tile, ".yt-lockup-byline")?;
    let channel = byline.map(text_of).unwrap_or_default();
    let channel_path = match byline {
        Some(b) => first(b, "a")?.and_then(|a| a.value().attr("href")).unwrap_or_default(),
        None => "",
    };

    let meta_sel = selector(".yt-lockup-meta-info li")?;
    let meta: Vec<String> = tile.select(&meta_sel).map(text_of).collect();
    let release_date = if live {
        LIVE.to_string()
    } else {
        meta.first().cloned().unwrap_or_default()
    };
    let num_views = meta
        .last()
        .cloned()
        .unwrap_or_else(|| (if live { NO_WATCHERS } else { NO_VIEWS }).to_string());

    let thumbnail_src = first(tile, ".yt-thumb img")?
        .and_then(|img| img.value().attr("data-thumb").or_else(|| img.value().attr("src")))
        .unwrap_or_default()
        .to_string();

    debug!("Normalized lockup {id}");

    Ok(ResultRecord {
        id,
        title,
        link: absolute(href),
        duration,
        snippet,
        channel,
        channel_link: absolute(channel_path),
        release_date,
        thumbnail_src,
        num_views,
    })
}
