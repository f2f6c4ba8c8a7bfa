//! The MCP tool surface: a single `convert_file` tool wired to the core
//! dispatcher.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::warn;

use mimeshift_core::{Dispatcher, MimeType};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ConvertFileRequest {
    /// Absolute path to the source file to convert
    /// (e.g. /home/alice/Documents/input.docx)
    #[schemars(length(min = 1))]
    pub source_path: String,

    /// Desired output MIME type
    /// (e.g. application/pdf, image/png, audio/mpeg)
    pub target_mime_type: String,
}

/// MCP server exposing file conversion.
///
/// Every failure is rendered as a textual tool result; nothing escapes
/// past the dispatch boundary to crash the serve loop.
#[derive(Clone)]
pub struct ConverterServer {
    dispatcher: Arc<Dispatcher>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ConverterServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Convert a file on local disk to a target MIME type. Detects the source type from the file extension, converts within the same category (image, audio, video, or document), writes the output next to the source, and deletes the source on success."
    )]
    async fn convert_file(
        &self,
        Parameters(request): Parameters<ConvertFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        let target = match MimeType::parse(&request.target_mime_type) {
            Ok(target) => target,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(e.to_string())]));
            }
        };

        match self
            .dispatcher
            .convert_file(Path::new(&request.source_path), &target)
            .await
        {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Converted file written to: {}",
                result.output_path.display()
            ))])),
            Err(e) => {
                warn!(source = %request.source_path, error = %e, "conversion failed");
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for ConverterServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "File converter. Call convert_file with an absolute source path and a \
                 target MIME type; conversions stay within one category (image, audio, \
                 video, document). The source file is deleted after a successful \
                 conversion."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
