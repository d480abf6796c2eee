//! Line-delimited JSON-RPC host for [`BlogApi`].
//!
//! One request per input line, one response per output line. Logs go to
//! stderr; stdout carries protocol traffic only.

use crate::api::BlogApi;
use crate::error::ApiError;
use crate::rpc_types::{
    RpcError, RpcRequest, RpcResponse, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND, OPERATION_FAILED, PARSE_ERROR,
};
use crate::selection::Selection;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{
    stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
    #[serde(default)]
    select: Value,
}

impl From<ApiError> for RpcError {
    fn from(err: ApiError) -> Self {
        match &err {
            ApiError::UnknownOperation(_) => RpcError::new(METHOD_NOT_FOUND, err.to_string()),
            ApiError::InvalidArguments(_) | ApiError::UnknownField { .. } => {
                RpcError::new(INVALID_PARAMS, err.to_string())
            }
            ApiError::Blog(blog) => RpcError::new(OPERATION_FAILED, blog.to_string())
                .with_data(json!({ "kind": blog.kind().as_str() })),
        }
    }
}

pub async fn run_stdio(api: Arc<BlogApi>) -> anyhow::Result<()> {
    serve(api, BufReader::new(stdin()), stdout()).await
}

/// Serves requests from `reader` until EOF, writing responses to `writer`.
pub async fn serve<R, W>(api: Arc<BlogApi>, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = handle_bytes(&api, &buf);
        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

pub fn handle_line(api: &BlogApi, line: &str) -> RpcResponse {
    handle_bytes(api, line.as_bytes())
}

/// Handles one raw input line. Bytes that are not valid UTF-8 JSON get a
/// parse error response like any other malformed request.
pub fn handle_bytes(api: &BlogApi, line: &[u8]) -> RpcResponse {
    match serde_json::from_slice::<RpcRequest>(line) {
        Ok(request) => handle_request(api, request),
        Err(e) => {
            warn!("unparseable request: {}", e);
            RpcResponse::failure(None, RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)))
        }
    }
}

pub fn handle_request(api: &BlogApi, request: RpcRequest) -> RpcResponse {
    let id = request.id;
    debug!(method = %request.method, "request");

    if request.jsonrpc.as_deref() != Some(JSONRPC_VERSION) {
        return RpcResponse::failure(
            id,
            RpcError::new(INVALID_REQUEST, "Invalid request: jsonrpc must be \"2.0\""),
        );
    }

    match request.method.as_str() {
        "initialize" => RpcResponse::success(
            id,
            json!({
                "serverInfo": {
                    "name": "bloggraph",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": { "operations": {} }
            }),
        ),
        "operations/list" => RpcResponse::success(
            id,
            json!({ "operations": api.list_operations() }),
        ),
        "operations/call" => match call(api, request.params) {
            Ok(data) => RpcResponse::success(id, json!({ "data": data })),
            Err(err) => {
                warn!("operation failed: {}", err);
                RpcResponse::failure(id, err.into())
            }
        },
        other => RpcResponse::failure(
            id,
            RpcError::new(METHOD_NOT_FOUND, format!("Method not found: {}", other)),
        ),
    }
}

fn call(api: &BlogApi, params: Option<Value>) -> Result<Value, ApiError> {
    let params: CallParams = serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| ApiError::InvalidArguments(e.to_string()))?;
    let select = Selection::from_json(&params.select)?;
    api.call(&params.name, params.arguments, &select)
}
