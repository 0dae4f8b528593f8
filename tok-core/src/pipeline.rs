//! # Endpoint de anotação
//!
//! Compõe as etapas em uma única chamada `process(texto) -> saída codificada`:
//!
//! ```text
//! entrada ──▶ (modo de entrada) ──▶ tokenização ──▶ segmentação ──▶ codificação
//! ```
//!
//! O [`Annotator`] é construído uma vez por configuração (regras do idioma
//! carregadas na construção) e pode ser compartilhado entre threads: cada
//! chamada só lê o próprio estado.

use crate::config::{InputMode, OutputFormat, TokConfig};
use crate::document::Document;
use crate::error::Result;
use crate::output::{raw_text_from_structured, to_conll, to_naf, to_oneline, Provenance, PRODUCER_PREFIX};
use crate::segmenter::{segment, segment_lines};
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone)]
pub struct Annotator {
    config: TokConfig,
    tokenizer: Tokenizer,
}

impl Annotator {
    pub fn new(config: TokConfig) -> Self {
        let tokenizer = Tokenizer::from_config(&config);
        Self { config, tokenizer }
    }

    pub fn config(&self) -> &TokConfig {
        &self.config
    }

    /// Nome do processador registrado na proveniência (ex: "tok-core-en").
    pub fn producer_name(&self) -> String {
        match self.config.input {
            InputMode::Pretokenized => format!("{}-notok-{}", PRODUCER_PREFIX, self.config.language),
            _ => format!("{}-{}", PRODUCER_PREFIX, self.config.language),
        }
    }

    /// Tokeniza e segmenta `text` segundo o modo de entrada configurado.
    pub fn annotate(&self, text: &str) -> Result<Document> {
        let language = self.config.language;
        match self.config.input {
            InputMode::Raw => {
                let tokens = self.tokenizer.tokenize(text);
                let sentences = segment(&tokens, self.config.segment_on_linebreak);
                Ok(Document::new(text, language, sentences))
            }
            InputMode::Pretokenized => {
                let tokens = Tokenizer::tokens_from_pretokenized(text);
                Ok(Document::new(text, language, segment_lines(&tokens)))
            }
            InputMode::Structured => {
                let raw = raw_text_from_structured(text)?;
                let tokens = self.tokenizer.tokenize(&raw);
                let sentences = segment(&tokens, self.config.segment_on_linebreak);
                Ok(Document::new(raw, language, sentences))
            }
        }
    }

    /// Anota e codifica no formato de saída configurado.
    pub fn process(&self, text: &str) -> Result<String> {
        match self.config.output_format {
            OutputFormat::Oneline => Ok(to_oneline(&self.annotate(text)?)),
            OutputFormat::Conll => Ok(to_conll(&self.annotate(text)?, self.config.offsets)),
            OutputFormat::Naf => {
                let mut provenance = Provenance::start(self.producer_name());
                let document = self.annotate(text)?;
                provenance.finish();
                to_naf(&document, &self.config.naf_version, provenance)
            }
        }
    }

    /// Como [`Annotator::process`], validando UTF-8 antes.
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<String> {
        let text = String::from_utf8(bytes.to_vec())?;
        self.process(&text)
    }

    /// Formas de superfície de `text`, como o avaliador as consome.
    pub fn surfaces(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.annotate(text)?.surfaces())
    }
}

/// Anotação avulsa: constrói um [`Annotator`] para `config` e processa `raw`.
pub fn process(raw: &str, config: &TokConfig) -> Result<String> {
    Annotator::new(config.clone()).process(raw)
}
