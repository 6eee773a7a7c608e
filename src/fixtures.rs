//! Upstream-shaped fixtures shared by the unit tests

use serde_json::{Value, json};

pub(crate) fn video(id: &str) -> Value {
    json!({
        "videoId": id,
        "navigationEndpoint": {
            "commandMetadata": { "webCommandMetadata": { "url": format!("/watch?v={id}") } }
        },
        "thumbnail": {
            "thumbnails": [
                { "url": format!("https://i.ytimg.com/vi/{id}/default.jpg"), "width": 120 },
                { "url": format!("https://i.ytimg.com/vi/{id}/hq720.jpg"), "width": 720 }
            ]
        },
        "title": { "runs": [ { "text": "Rust in " }, { "text": "100 Seconds" } ] },
        "lengthText": { "simpleText": "2:25" },
        "descriptionSnippet": {
            "runs": [ { "text": "Learn " }, { "text": "Rust", "bold": true }, { "text": " fast" } ]
        },
        "ownerText": {
            "runs": [ {
                "text": "Fireship",
                "navigationEndpoint": {
                    "commandMetadata": { "webCommandMetadata": { "url": "/@Fireship" } }
                }
            } ]
        },
        "publishedTimeText": { "simpleText": "3 years ago" },
        "viewCountText": { "simpleText": "2,100,000 views" }
    })
}

pub(crate) fn continuation(token: &str) -> Value {
    json!({
        "continuationItemRenderer": {
            "trigger": "CONTINUATION_TRIGGER_ON_ITEM_SHOWN",
            "continuationEndpoint": {
                "continuationCommand": { "token": token, "request": "CONTINUATION_REQUEST_TYPE_SEARCH" }
            }
        }
    })
}

/// An `itemSectionRenderer` holding one `videoRenderer` per id, plus a shelf
/// that the walker must skip
pub(crate) fn item_section(ids: &[&str]) -> Value {
    let mut contents: Vec<Value> = ids.iter().map(|id| json!({ "videoRenderer": video(id) })).collect();
    contents.insert(1.min(contents.len()), json!({ "shelfRenderer": { "title": { "simpleText": "People also watched" } } }));
    json!({ "itemSectionRenderer": { "contents": contents } })
}

/// A results page carrying `ytInitialData` behind the `original` anchor
pub(crate) fn original_page(data: &Value) -> String {
    format!(
        r#"<html><head><script>ytcfg.set({{"INNERTUBE_CONTEXT_CLIENT_NAME":1,"innertubeApiKey":"AIzaSyTESTKEY"}});</script>
<script>window["ytInitialData"] = {data};
window["ytInitialPlayerResponse"] = null;</script></head><body></body></html>"#
    )
}

/// A results page carrying `ytInitialData` behind the `scraper_data_end` marker
pub(crate) fn scraper_data_page(data: &Value) -> String {
    format!(
        r#"<html><head><script>var cfg = {{"innertubeApiKey":"AIzaSySCRAPER"}};</script>
<script>var ytInitialData = {data};
// scraper_data_end
</script></head><body></body></html>"#
    )
}

pub(crate) fn initial_data(sections: Vec<Value>) -> Value {
    json!({
        "estimatedResults": "41000",
        "contents": {
            "twoColumnSearchResultsRenderer": {
                "primaryContents": { "sectionListRenderer": { "contents": sections } }
            }
        }
    })
}
