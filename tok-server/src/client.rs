use tok_core::{frame_document, TokError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::AppError;

/// Envia um documento ao servidor e devolve a resposta completa.
pub async fn send_document(host: &str, port: u16, text: &str) -> Result<String, AppError> {
    let mut stream = TcpStream::connect((host, port)).await?;
    debug!(host, port, chars = text.chars().count(), "enviando documento");

    stream.write_all(frame_document(text).as_bytes()).await?;
    stream.flush().await?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await?;
    Ok(String::from_utf8(response).map_err(TokError::from)?)
}
