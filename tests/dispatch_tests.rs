//! Tests for the batch tool dispatcher.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use strand::error::StrandError;
use strand::tools::{
    dispatch_tool_calls, ArgumentCodec, FunctionTool, Tool, ToolParameters, ToolRegistry,
};
use strand::types::{RuntimeContext, ToolCallFunction, ToolCallRequest};

fn call(id: &str, name: &str, arguments: &str) -> ToolCallRequest {
    ToolCallRequest {
        id: id.to_string(),
        function: ToolCallFunction {
            name: name.to_string(),
            arguments: arguments.to_string(),
        },
    }
}

fn echo_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "echo",
        "Echo the text argument",
        ToolParameters::object().string("text", "Text", true).build(),
        |args, _ctx| async move {
            let text = args.get_str("text")?.to_string();
            Ok(serde_json::Value::String(text))
        },
    ))
}

fn boom_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "boom",
        "Always fails",
        ToolParameters::empty(),
        |_args, _ctx| async move { Err(StrandError::tool("boom", "boom")) },
    ))
}

#[tokio::test]
async fn batch_returns_one_output_per_call() {
    let registry = ToolRegistry::new(vec![echo_tool(), boom_tool()]);
    let calls = vec![
        call("call_1", "echo", r#"{"text":"ok"}"#),
        call("call_2", "boom", "{}"),
        call("call_3", "missing", "{}"),
    ];

    let outputs = dispatch_tool_calls(&registry, &calls, &RuntimeContext::default()).await;

    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs[0].tool_call_id, "call_1");
    assert_eq!(outputs[0].output, "ok");
    assert_eq!(outputs[1].tool_call_id, "call_2");
    assert_eq!(outputs[1].output, "boom");
    assert_eq!(outputs[2].tool_call_id, "call_3");
    assert_eq!(outputs[2].output, "Tool not found: missing");
}

#[tokio::test]
async fn unknown_tool_is_recorded_not_raised() {
    let registry = ToolRegistry::new(vec![]);
    let calls = vec![call("call_9", "nope", "{}")];

    let outputs = dispatch_tool_calls(&registry, &calls, &RuntimeContext::default()).await;

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].output, "Tool not found: nope");
}

#[tokio::test]
async fn crawl_scenario_passes_output_through() {
    // A stand-in crawler with the real tool's nested argument envelope.
    let crawler: Arc<dyn Tool> = Arc::new(FunctionTool::new(
        "crawlUrl",
        "Crawl a webpage",
        ToolParameters::empty(),
        |args, _ctx| async move {
            let params = args.get_object("params")?;
            assert_eq!(params["url"], "http://example.test");
            Ok(serde_json::Value::String("hello world".to_string()))
        },
    ));
    let registry = ToolRegistry::new(vec![crawler]);
    let calls = vec![call(
        "call_1",
        "crawlUrl",
        r#"{"params":{"url":"http://example.test"}}"#,
    )];

    let outputs = dispatch_tool_calls(&registry, &calls, &RuntimeContext::default()).await;

    assert_eq!(outputs[0].tool_call_id, "call_1");
    assert_eq!(outputs[0].output, "hello world");
}

#[tokio::test]
async fn failing_call_does_not_abort_the_batch() {
    let registry = ToolRegistry::new(vec![echo_tool(), boom_tool()]);
    let calls = vec![
        call("call_1", "boom", "{}"),
        call("call_2", "echo", r#"{"text":"still here"}"#),
    ];

    let outputs = dispatch_tool_calls(&registry, &calls, &RuntimeContext::default()).await;

    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].output.contains("boom"));
    assert_eq!(outputs[1].output, "still here");
}

#[tokio::test]
async fn invalid_arguments_fail_only_their_call() {
    let registry = ToolRegistry::new(vec![echo_tool()]);
    let calls = vec![
        call("call_1", "echo", "{not json"),
        call("call_2", "echo", r#"{"text":"fine"}"#),
    ];

    let outputs = dispatch_tool_calls(&registry, &calls, &RuntimeContext::default()).await;

    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].output.starts_with("Invalid arguments for tool echo:"));
    assert_eq!(outputs[1].output, "fine");
}

#[tokio::test]
async fn null_result_becomes_no_output_text() {
    let silent: Arc<dyn Tool> = Arc::new(FunctionTool::new(
        "silent",
        "Returns nothing",
        ToolParameters::empty(),
        |_args, _ctx| async move { Ok(serde_json::Value::Null) },
    ));
    let registry = ToolRegistry::new(vec![silent]);
    let calls = vec![call("call_1", "silent", "{}")];

    let outputs = dispatch_tool_calls(&registry, &calls, &RuntimeContext::default()).await;

    assert_eq!(outputs[0].output, "No output from tool: silent");
}

#[tokio::test]
async fn structured_result_is_serialized() {
    let json_tool: Arc<dyn Tool> = Arc::new(FunctionTool::new(
        "stats",
        "Returns structured data",
        ToolParameters::empty(),
        |_args, _ctx| async move { Ok(serde_json::json!({"count": 2})) },
    ));
    let registry = ToolRegistry::new(vec![json_tool]);
    let calls = vec![call("call_1", "stats", "{}")];

    let outputs = dispatch_tool_calls(&registry, &calls, &RuntimeContext::default()).await;

    assert_eq!(outputs[0].output, r#"{"count":2}"#);
}

#[tokio::test]
async fn raw_codec_tool_receives_unparsed_text() {
    let raw_tool: Arc<dyn Tool> = Arc::new(
        FunctionTool::new(
            "raw",
            "Consumes raw text",
            ToolParameters::empty(),
            |args, _ctx| async move {
                Ok(serde_json::Value::String(format!(
                    "got: {}",
                    args.raw().as_str().unwrap_or_default()
                )))
            },
        )
        .with_codec(ArgumentCodec::Raw),
    );
    let registry = ToolRegistry::new(vec![raw_tool]);
    let calls = vec![call("call_1", "raw", "anything {goes")];

    let outputs = dispatch_tool_calls(&registry, &calls, &RuntimeContext::default()).await;

    assert_eq!(outputs[0].output, "got: anything {goes");
}

#[tokio::test]
async fn runtime_context_reaches_the_executor() {
    let ctx_tool: Arc<dyn Tool> = Arc::new(FunctionTool::new(
        "whoami",
        "Reports the runtime context",
        ToolParameters::empty(),
        |_args, ctx| async move { Ok(serde_json::Value::String(ctx.message_id)) },
    ));
    let registry = ToolRegistry::new(vec![ctx_tool]);
    let ctx = RuntimeContext {
        message_id: "msg-42".to_string(),
        ..Default::default()
    };
    let calls = vec![call("call_1", "whoami", "{}")];

    let outputs = dispatch_tool_calls(&registry, &calls, &ctx).await;

    assert_eq!(outputs[0].output, "msg-42");
}
