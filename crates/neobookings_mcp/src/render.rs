//! Markdown rendering of response envelopes for MCP clients.

use std::fmt::Write;

use neobookings_core::ResponseEnvelope;
use serde_json::Value;

use crate::catalog::ToolSpec;

/// Keys of `data` shown in the footer rather than as sections.
const FOOTER_KEYS: &[&str] = &["request_metadata", "api_response"];

pub fn render(tool: &ToolSpec, response: &ResponseEnvelope) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", tool.title);

    if response.success {
        let _ = writeln!(out, "## Success\n");
        let _ = writeln!(out, "{}\n", response.message());
        if let Some(Value::Object(data)) = &response.data {
            for (key, value) in data.iter().filter(|(key, _)| !FOOTER_KEYS.contains(&key.as_str())) {
                let _ = writeln!(out, "### {}\n", heading(key));
                let _ = writeln!(out, "```json\n{}\n```\n", pretty(value));
            }
        }
        footer(&mut out, response);
    } else {
        let _ = writeln!(out, "## Failed\n");
        let _ = writeln!(out, "{}\n", response.message());
        if let Some(error) = &response.error {
            let _ = writeln!(out, "### Error\n");
            let _ = writeln!(out, "```json\n{}\n```\n", pretty(error));
        }
        let _ = writeln!(out, "---\n*Timestamp: {}*", response.timestamp);
    }
    out
}

fn footer(out: &mut String, response: &ResponseEnvelope) {
    let _ = writeln!(out, "---");
    if let Some(id) = response
        .data_field("request_metadata")
        .and_then(|metadata| metadata.get("RequestId"))
        .and_then(Value::as_str)
    {
        let _ = writeln!(out, "*Request ID: {}*", id);
    }
    let _ = writeln!(out, "*Timestamp: {}*", response.timestamp);
    if let Some(elapsed) = response
        .data_field("api_response")
        .and_then(|block| block.get("TimeResponse"))
        .filter(|elapsed| !elapsed.is_null())
    {
        let _ = writeln!(out, "*Upstream time: {} ms*", elapsed);
    }
}

/// `hotel_room_avail` -> `Hotel Room Avail`
fn heading(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find;
    use neobookings_core::GatewayError;
    use serde_json::json;

    #[test]
    fn success_lists_sections_and_footer() {
        let response = ResponseEnvelope::success(
            json!({
                "zone_detail": [{"Code": "ES.MAD"}],
                "request_metadata": {"RequestId": "req-42", "Language": "es"},
                "api_response": {"StatusCode": 200, "TimeResponse": 37}
            }),
            "Zone Search completed successfully",
        );
        let text = render(find("zone_search_rq").unwrap(), &response);

        assert!(text.starts_with("# Zone Search\n"));
        assert!(text.contains("## Success"));
        assert!(text.contains("### Zone Detail"));
        assert!(text.contains("\"Code\": \"ES.MAD\""));
        assert!(text.contains("*Request ID: req-42*"));
        assert!(text.contains("*Upstream time: 37 ms*"));
        assert!(!text.contains("### Request Metadata"));
    }

    #[test]
    fn failures_show_the_error_payload() {
        let error = GatewayError::missing_fields(vec!["basket_id".into()]);
        let response = ResponseEnvelope::failure(&error);
        let text = render(find("basket_summary_rq").unwrap(), &response);

        assert!(text.contains("## Failed"));
        assert!(text.contains("Validation error: Missing required fields: basket_id"));
        assert!(text.contains("MISSING_REQUIRED_FIELDS"));
    }

    #[test]
    fn headings_title_case_each_word() {
        assert_eq!(heading("hotel_room_not_avail"), "Hotel Room Not Avail");
        assert_eq!(heading("token"), "Token");
    }
}
