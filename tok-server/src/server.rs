//! Servidor TCP: um documento por conexão.
//!
//! Cada conexão aceita vira uma tarefa tokio. A tarefa lê linhas até o
//! sentinela, roda a anotação no pool de bloqueio (`spawn_blocking`),
//! escreve a resposta inteira e fecha. Em caso de erro a conexão é fechada
//! sem resposta parcial.

use std::sync::Arc;

use tok_core::{Annotator, DocumentAssembler};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::error::AppError;

/// Aceita conexões para sempre.
pub async fn serve(listener: TcpListener, annotator: Arc<Annotator>) -> Result<(), AppError> {
    info!(
        addr = %listener.local_addr()?,
        lang = %annotator.config().language,
        "servidor de tokenização pronto"
    );

    loop {
        let (stream, peer) = listener.accept().await?;
        let annotator = Arc::clone(&annotator);
        tokio::spawn(async move {
            debug!(%peer, "conexão aceita");
            match handle_connection(stream, annotator).await {
                Ok(bytes) => debug!(%peer, bytes, "documento anotado"),
                Err(e) => warn!(%peer, error = %e, "conexão encerrada sem resposta"),
            }
        });
    }
}

/// Atende uma conexão. Retorna o tamanho da resposta enviada.
pub async fn handle_connection<S>(stream: S, annotator: Arc<Annotator>) -> Result<usize, AppError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let text = read_document(BufReader::new(reader)).await?;

    let output = tokio::task::spawn_blocking(move || annotator.process(&text)).await??;

    writer.write_all(output.as_bytes()).await?;
    writer.flush().await?;
    writer.shutdown().await?;
    Ok(output.len())
}

/// Versão assíncrona de [`tok_core::read_document`].
pub async fn read_document<R>(mut reader: R) -> Result<String, AppError>
where
    R: AsyncBufRead + Unpin,
{
    let mut assembler = DocumentAssembler::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if assembler.push_line(&line)? {
            break;
        }
    }
    Ok(assembler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::send_document;
    use tok_core::{Language, OutputFormat, TokConfig, TokError};
    use tokio::io::AsyncReadExt;

    fn annotator() -> Arc<Annotator> {
        Arc::new(Annotator::new(
            TokConfig::new(Language::En).with_output(OutputFormat::Oneline),
        ))
    }

    #[tokio::test]
    async fn test_handle_connection_over_duplex() {
        let (mut client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(handle_connection(server, annotator()));

        client
            .write_all(b"Hello world.\r\n<ENDOFDOCUMENT>\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        client.read_to_string(&mut response).await.unwrap();

        assert_eq!(response, "Hello\nworld\n.\n\n");
        assert_eq!(handle.await.unwrap().unwrap(), response.len());
    }

    #[tokio::test]
    async fn test_invalid_utf8_closes_without_response() {
        let (mut client, server) = tokio::io::duplex(4096);
        let handle = tokio::spawn(handle_connection(server, annotator()));

        client.write_all(b"a\xff\n<ENDOFDOCUMENT>\n").await.unwrap();
        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();

        assert!(response.is_empty());
        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(err, AppError::Tok(TokError::Encoding(_))));
    }

    #[tokio::test]
    async fn test_serve_over_loopback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(serve(listener, annotator()));

        let first = send_document("127.0.0.1", port, "One. Two.").await.unwrap();
        let second = send_document("127.0.0.1", port, "Title\nBody").await.unwrap();

        assert_eq!(first, "One\n.\n\nTwo\n.\n\n");
        assert_eq!(second, "Title\nBody\n\n");
    }
}
