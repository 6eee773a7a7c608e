use crate::SearchResponse;

/// Render the response as JSON, with the field names downstream consumers key off
pub fn render_json(response: &SearchResponse, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };
    // Plain structs of strings; serialization cannot fail
    rendered.unwrap_or_default()
}

/// Render the response as plain text (one result per line)
pub fn render_text(response: &SearchResponse) -> String {
    let envelope = match response {
        SearchResponse::Found(envelope) => envelope,
        SearchResponse::Failed { error } => return format!("error: {error}"),
    };

    let mut lines: Vec<String> = envelope
        .results
        .iter()
        .map(|r| format!("{} | {} | {} | {}", r.title, r.channel, r.duration, r.link))
        .collect();

    if let Some(ref token) = envelope.next_page_token {
        lines.push(format!("next page: {token}"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ResultEnvelope, ResultRecord};

    fn sample_response() -> SearchResponse {
        SearchResponse::Found(ResultEnvelope {
            results: vec![
                ResultRecord {
                    id: "a1".to_string(),
                    title: "First".to_string(),
                    link: "https://www.youtube.com/watch?v=a1".to_string(),
                    duration: "1:00".to_string(),
                    channel: "Chan".to_string(),
                    ..ResultRecord::default()
                },
                ResultRecord {
                    id: "a2".to_string(),
                    title: "Second".to_string(),
                    link: "https://www.youtube.com/watch?v=a2".to_string(),
                    duration: "Live".to_string(),
                    channel: "Chan".to_string(),
                    ..ResultRecord::default()
                },
            ],
            version: "0.1.0".to_string(),
            parser: "html_format".to_string(),
            key: None,
            next_page_token: Some("TOKEN123".to_string()),
            estimated_results: "0".to_string(),
        })
    }

    #[test]
    fn test_render_text() {
        let output = render_text(&sample_response());
        assert_eq!(
            output,
            "First | Chan | 1:00 | https://www.youtube.com/watch?v=a1\n\
             Second | Chan | Live | https://www.youtube.com/watch?v=a2\n\
             next page: TOKEN123"
        );
    }

    #[test]
    fn test_render_text_error() {
        let response = SearchResponse::Failed {
            error: "timed out".to_string(),
        };
        assert_eq!(render_text(&response), "error: timed out");
    }

    #[test]
    fn test_render_json_compact() {
        let output = render_json(&sample_response(), false);
        assert!(output.starts_with(r#"{"results":[{"id":"a1""#));
        assert!(output.contains(r#""nextPageToken":"TOKEN123""#));
        assert!(!output.contains("\"key\""));
    }
}
