use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting urltitle MCP server with stdio transport...");
        eprintln!();
    }

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break; // EOF
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("Received: {message}");
        }

        // Notifications get no reply
        let Some(response) = super::handle_request(message, &global).await else {
            continue;
        };
        let response_json = serde_json::to_string(&response)?;

        if global.verbose {
            eprintln!("Sending: {response_json}");
        }

        write_message(&mut stdout, &response_json).await?;
    }

    log::debug!("stdin closed, stopping mcp server");
    Ok(())
}

/// Write one newline-delimited message and flush it
async fn write_message<W: AsyncWrite + Unpin>(writer: &mut W, message: &str) -> Result<()> {
    writer.write_all(message.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_message_is_newline_delimited() {
        let mut buffer = Vec::new();
        write_message(&mut buffer, r#"{"jsonrpc":"2.0"}"#).await.unwrap();
        write_message(&mut buffer, r#"{"id":1}"#).await.unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\"jsonrpc\":\"2.0\"}\n{\"id\":1}\n"
        );
    }
}
