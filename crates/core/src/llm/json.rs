use anyhow::Context;
use serde_json::Value;

pub fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        // Remove Markdown fences (```json ... ``` or ``` ... ```).
        let mut inner = trimmed;
        if let Some(after_first) = inner.splitn(2, '\n').nth(1) {
            inner = after_first;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    // Already bare JSON: leave it untouched so arrays stay arrays.
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return None;
    }

    // Best-effort extraction: first '{' to last '}'.
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(trimmed[start..=end].trim().to_string())
}

/// Parses a JSON-mode reply. The shape is not checked here.
pub fn parse_json_reply(text: &str) -> anyhow::Result<Value> {
    let json_str = extract_json(text).unwrap_or_else(|| text.trim().to_string());
    serde_json::from_str::<Value>(&json_str)
        .with_context(|| format!("LLM output is not valid JSON: {json_str}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_json_handles_fenced_blocks() {
        let body = "{\"a\":1}";
        let fenced = format!("```json\n{body}\n```\n");
        assert_eq!(extract_json(&fenced), Some(body.to_string()));
    }

    #[test]
    fn extract_json_falls_back_to_braces() {
        let s = "prefix {\"a\":1} suffix";
        assert_eq!(extract_json(s), Some("{\"a\":1}".to_string()));
    }

    #[test]
    fn extract_json_gives_up_without_braces() {
        assert_eq!(extract_json("sem json aqui"), None);
    }

    #[test]
    fn parse_json_reply_accepts_plain_object() {
        let v = parse_json_reply("{\"summary\": \"ok\", \"warnings\": []}").unwrap();
        assert_eq!(v, json!({"summary": "ok", "warnings": []}));
    }

    #[test]
    fn parse_json_reply_accepts_fenced_object() {
        let v = parse_json_reply("```json\n{\"summary\": \"ok\"}\n```").unwrap();
        assert_eq!(v["summary"], "ok");
    }

    #[test]
    fn extract_json_leaves_bare_json_alone() {
        assert_eq!(extract_json("[{\"a\":1}]"), None);
        assert_eq!(extract_json("{\"a\":1}"), None);
    }

    #[test]
    fn parse_json_reply_keeps_top_level_array() {
        let v = parse_json_reply("[{\"summary\": \"ok\"}]").unwrap();
        assert_eq!(v, json!([{"summary": "ok"}]));
    }

    #[test]
    fn parse_json_reply_rejects_truncated_output() {
        assert!(parse_json_reply("{\"summary\": \"ok\", \"warnings\": [").is_err());
        assert!(parse_json_reply("").is_err());
    }
}
