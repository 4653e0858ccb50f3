//! Free-text intents.
//!
//! Stream intents carry raw text instead of selectors. They never touch a
//! profile, a catalog or the guardrails, and never produce a declarative
//! document.

use serde_json::Value;

use crate::config::MapperConfig;
use crate::profile::ProfileInfo;
use crate::result::model::{InputSummary, MapperResult, OkResult, StreamPreview};

/// Collect text from `text` and `messages[].text`, in that order.
pub fn collect_texts(intent: &Value) -> Vec<&str> {
    let single = intent.get("text").and_then(Value::as_str);

    let messages = intent
        .get("messages")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|msg| msg.get("text").and_then(Value::as_str));

    single.into_iter().chain(messages).collect()
}

pub fn run_stream_mapper(intent: &Value, config: &MapperConfig) -> MapperResult {
    let report_path = config.report_path().display().to_string();
    let texts = collect_texts(intent);

    if texts.is_empty() {
        return MapperResult::error(None, report_path, "No text content found for stream intent");
    }

    let combined = texts.join("\n");
    let preview: String = combined.chars().take(config.stream_preview_chars).collect();
    let preview = preview.trim().to_string();

    log::info!(
        "stream intent: {} text blocks, {} preview chars",
        texts.len(),
        preview.chars().count()
    );

    MapperResult::Ok(OkResult::Stream(StreamPreview {
        input_summary: InputSummary::Stream {
            messages_count: texts.len(),
        },
        profile: ProfileInfo::stream(),
        summary_md: render_stream_summary(&preview),
        preview,
        report_path,
    }))
}

fn render_stream_summary(preview: &str) -> String {
    format!("# Stream analysis result\n\n---\n\n## Input preview\n\n{preview}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Status;
    use serde_json::json;

    fn preview_of(result: &MapperResult) -> &StreamPreview {
        match result {
            MapperResult::Ok(OkResult::Stream(s)) => s,
            other => panic!("expected stream preview, got {other:?}"),
        }
    }

    #[test]
    fn joins_messages_with_newlines() {
        let result = run_stream_mapper(
            &json!({"intent_type": "stream", "messages": [{"text": "a"}, {"text": "b"}]}),
            &MapperConfig::default(),
        );

        assert_eq!(result.status(), Status::Ok);
        let stream = preview_of(&result);
        assert_eq!(stream.preview, "a\nb");
        assert!(stream.summary_md.contains("a\nb"));
        assert_eq!(stream.input_summary, InputSummary::Stream { messages_count: 2 });
        assert!(result.task().is_none());
    }

    #[test]
    fn single_text_comes_first_and_bad_messages_are_skipped() {
        let doc = json!({
            "text": "head",
            "messages": [{"text": "one"}, {"text": 5}, "raw", {"body": "x"}, {"text": "two"}]
        });
        let texts = collect_texts(&doc);
        assert_eq!(texts, vec!["head", "one", "two"]);
    }

    #[test]
    fn preview_is_capped_by_characters() {
        let long = "é".repeat(600);
        let result = run_stream_mapper(&json!({"text": long}), &MapperConfig::default());
        assert_eq!(preview_of(&result).preview.chars().count(), 500);
    }

    #[test]
    fn no_text_is_an_error_result() {
        let result = run_stream_mapper(&json!({"messages": []}), &MapperConfig::default());
        let MapperResult::Error(failed) = &result else {
            panic!("expected error, got {result:?}");
        };
        assert_eq!(failed.message, "No text content found for stream intent");
        assert!(failed.profile.is_none());
    }
}
