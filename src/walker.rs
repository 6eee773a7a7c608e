use log::{debug, warn};
use serde_json::Value;

use crate::ResultRecord;
use crate::error::{Result, ScrapeError};
use crate::normalize::normalize_video_renderer;

/// What a walk over a section list produced
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Walk {
    pub results: Vec<ResultRecord>,
    pub next_page_token: Option<String>,
    /// Sections and items that failed to normalize and were dropped
    pub skipped: usize,
}

impl Walk {
    /// Fold one fallible outcome in: keep the value, or log the node and move on
    fn absorb<T>(&mut self, outcome: Result<T>, node: &Value, what: &str) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping {what}: {e}");
                debug!("Offending {what}: {node}");
                self.skipped += 1;
                None
            }
        }
    }
}

/// Walk sections in order, normalizing every `videoRenderer` found under an
/// `itemSectionRenderer` and picking up the continuation token
pub fn walk_sections(sections: &[Value]) -> Walk {
    sections.iter().fold(Walk::default(), |mut walk, section| {
        let outcome = walk_section(section, &mut walk);
        walk.absorb(outcome, section, "section");
        walk
    })
}

fn walk_section(section: &Value, walk: &mut Walk) -> Result<()> {
    if let Some(renderer) = section.get("itemSectionRenderer") {
        let contents = renderer
            .get("contents")
            .and_then(Value::as_array)
            .ok_or_else(|| ScrapeError::Parse("itemSectionRenderer without contents".to_string()))?;
        for content in contents {
            if let Some(video) = content.get("videoRenderer") {
                let outcome = normalize_video_renderer(video);
                if let Some(record) = walk.absorb(outcome, content, "video") {
                    walk.results.push(record);
                }
            }
        }
    } else if let Some(renderer) = section.get("continuationItemRenderer") {
        let token = renderer
            .pointer("/continuationEndpoint/continuationCommand/token")
            .and_then(Value::as_str)
            .ok_or_else(|| ScrapeError::Parse("continuationItemRenderer without token".to_string()))?;
        walk.next_page_token = Some(token.to_string());
    }
    Ok(())
}
