use crate::prelude::eprintln;
use serde::Deserialize;

use super::{CallToolResult, Content, JsonRpcError};

pub async fn handle_title_derive(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct TitleDeriveArgs {
        url: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        enrich: Option<bool>,
    }

    let args: TitleDeriveArgs =
        serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| {
            JsonRpcError {
                code: -32602,
                message: format!("Invalid arguments: {e}"),
                data: None,
            }
        })?;

    if global.verbose {
        eprintln!(
            "Calling title_derive: url={}, name={:?}, enrich={:?}",
            args.url, args.name, args.enrich
        );
    }

    let output = crate::title::derive_data(
        args.url,
        args.name,
        args.enrich.unwrap_or(true),
        &global.github_api,
    )
    .await
    .map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Tool execution error: {e}"),
        data: None,
    })?;

    let json_string = serde_json::to_string_pretty(&output).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Serialization error: {e}"),
        data: None,
    })?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}
