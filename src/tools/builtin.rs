//! Built-in web page crawling tool.
//!
//! Fetches a page over HTTP and reduces it to the visible text an agent can
//! summarize: script and style blocks go, tags go, whitespace collapses,
//! repeated words are de-duplicated, and the result is capped so one page
//! cannot flood the run's context.

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::error::StrandError;
use crate::tools::tool::{FunctionTool, Tool};
use crate::tools::types::ToolParameters;

const PAGE_TEXT_MAX_CHARS: usize = 5_000;
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

fn script_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").expect("valid regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]+>|<!--.*?-->").expect("valid regex"))
}

/// Strip markup and collapse a page down to its visible text.
pub fn extract_visible_text(html: &str) -> String {
    let without_blocks = script_style_re().replace_all(html, " ");
    let without_tags = tag_re().replace_all(&without_blocks, " ");

    let mut seen = std::collections::HashSet::new();
    let mut words = Vec::new();
    for word in without_tags.split_whitespace() {
        if seen.insert(word.to_string()) {
            words.push(word);
        }
    }

    let text = words.join(" ");
    match text.char_indices().nth(PAGE_TEXT_MAX_CHARS) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text,
    }
}

/// Create the `crawlUrl` tool — fetches a webpage and returns its visible text.
///
/// Arguments arrive in a `params` envelope: `{"params": {"url": "..."}}`.
pub fn crawl_url_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "crawlUrl",
        "Crawl a webpage and return the visible text content.",
        ToolParameters::object()
            .nested(
                "params",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "url": { "type": "string", "description": "The URL to crawl" }
                    },
                    "required": ["url"],
                }),
                true,
            )
            .build(),
        |args, _ctx| async move {
            let params = args.get_object("params")?;
            let url = params
                .get("url")
                .and_then(|v| v.as_str())
                .ok_or_else(|| StrandError::InvalidArgument("Missing string argument: url".to_string()))?;

            let client = reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .map_err(|e| StrandError::tool("crawlUrl", e.to_string()))?;

            let html = client
                .get(url)
                .send()
                .await
                .and_then(|resp| resp.error_for_status())
                .map_err(|e| StrandError::tool("crawlUrl", format!("{url}: {e}")))?
                .text()
                .await
                .map_err(|e| StrandError::tool("crawlUrl", format!("{url}: {e}")))?;

            Ok(serde_json::Value::String(extract_visible_text(&html)))
        },
    ))
}
