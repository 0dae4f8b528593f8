//! # Protocolo de documento por conexão
//!
//! O cliente envia linhas UTF-8 e termina o documento com a linha literal
//! `<ENDOFDOCUMENT>`. As linhas anteriores ao sentinela, unidas por `\n`,
//! formam o texto bruto. Finais de linha `\r\n` são aceitos.
//!
//! A montagem é separada da E/S ([`DocumentAssembler`]) para que o servidor
//! assíncrono, o cliente e a leitura de stdin compartilhem as mesmas regras.

use std::io::BufRead;

use crate::error::Result;

/// Linha que encerra um documento.
pub const END_OF_DOCUMENT: &str = "<ENDOFDOCUMENT>";

/// Acumula linhas até o sentinela.
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    lines: Vec<String>,
    complete: bool,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recebe uma linha (com ou sem o terminador). Retorna `true` quando a
    /// linha é o sentinela; linhas após ele são ignoradas.
    pub fn push_line(&mut self, raw: &[u8]) -> Result<bool> {
        if self.complete {
            return Ok(true);
        }
        let mut end = raw.len();
        while end > 0 && (raw[end - 1] == b'\n' || raw[end - 1] == b'\r') {
            end -= 1;
        }
        let line = String::from_utf8(raw[..end].to_vec())?;
        if line == END_OF_DOCUMENT {
            self.complete = true;
            return Ok(true);
        }
        self.lines.push(line);
        Ok(false)
    }

    /// Texto bruto do documento (linhas unidas por `\n`).
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Lê um documento de um leitor síncrono. Fim de fluxo antes do sentinela
/// devolve o que foi recebido.
pub fn read_document<R: BufRead>(mut reader: R) -> Result<String> {
    let mut assembler = DocumentAssembler::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if assembler.push_line(&buf)? {
            break;
        }
    }
    Ok(assembler.finish())
}

/// Texto pronto para envio: cada linha terminada em `\n`, seguida do sentinela.
pub fn frame_document(text: &str) -> String {
    let mut framed = String::with_capacity(text.len() + END_OF_DOCUMENT.len() + 2);
    for line in text.lines() {
        framed.push_str(line);
        framed.push('\n');
    }
    framed.push_str(END_OF_DOCUMENT);
    framed.push('\n');
    framed
}
