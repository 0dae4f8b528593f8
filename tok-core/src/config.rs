//! # Configuração do tokenizador
//!
//! Toda a configuração é um valor imutável ([`TokConfig`]) passado
//! explicitamente para cada ponto de entrada. Não há estado global: dois
//! pedidos com configurações diferentes podem rodar lado a lado.
//!
//! Cada enum aceita as grafias da linha de comando via [`FromStr`] e
//! serializa em `snake_case` / minúsculas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TokError;

/// Idiomas com conjunto de regras próprio (abreviações, contrações, elisões).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    En,
    Es,
    Eu,
    Fr,
    Gl,
    It,
    Nl,
    Pl,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::De,
        Language::En,
        Language::Es,
        Language::Eu,
        Language::Fr,
        Language::Gl,
        Language::It,
        Language::Nl,
        Language::Pl,
    ];

    /// Código ISO 639-1 do idioma (ex: "en").
    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Es => "es",
            Language::Eu => "eu",
            Language::Fr => "fr",
            Language::Gl => "gl",
            Language::It => "it",
            Language::Nl => "nl",
            Language::Pl => "pl",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = TokError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == tag)
            .ok_or_else(|| TokError::UnsupportedLanguage(s.to_string()))
    }
}

/// Convenções de normalização por corpus.
///
/// `Default` não reescreve nada; os demais perfis seguem o estilo de
/// escape de cada corpus de referência (ver [`crate::normalizer`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationProfile {
    Default,
    /// Corpus Alpino (holandês).
    Alpino,
    /// Corpus AnCora (espanhol/catalão).
    Ancora,
    Ctag,
    /// Penn Treebank.
    Ptb,
    /// Corpus TIGER (alemão).
    Tiger,
    /// Turin University Treebank em formato Penn (italiano).
    Tutpenn,
}

impl NormalizationProfile {
    pub const ALL: [NormalizationProfile; 7] = [
        NormalizationProfile::Default,
        NormalizationProfile::Alpino,
        NormalizationProfile::Ancora,
        NormalizationProfile::Ctag,
        NormalizationProfile::Ptb,
        NormalizationProfile::Tiger,
        NormalizationProfile::Tutpenn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NormalizationProfile::Default => "default",
            NormalizationProfile::Alpino => "alpino",
            NormalizationProfile::Ancora => "ancora",
            NormalizationProfile::Ctag => "ctag",
            NormalizationProfile::Ptb => "ptb",
            NormalizationProfile::Tiger => "tiger",
            NormalizationProfile::Tutpenn => "tutpenn",
        }
    }
}

impl Default for NormalizationProfile {
    fn default() -> Self {
        NormalizationProfile::Default
    }
}

impl FromStr for NormalizationProfile {
    type Err = TokError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        NormalizationProfile::ALL
            .iter()
            .copied()
            .find(|p| p.name() == name)
            .ok_or_else(|| TokError::option("normalize", s))
    }
}

/// Quando uma quebra de linha, sozinha, força o fim de uma sentença.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationPolicy {
    /// Quebras de linha nunca forçam fronteira; só a pontuação final.
    #[serde(rename = "no")]
    NoBreak,
    /// Toda quebra de linha fecha a sentença (ex: títulos).
    Single,
    /// Apenas linhas em branco (duas quebras seguidas) fecham a sentença.
    Double,
}

impl SegmentationPolicy {
    /// Número mínimo de quebras de linha consecutivas que força uma fronteira.
    pub fn linebreak_threshold(&self) -> Option<usize> {
        match self {
            SegmentationPolicy::NoBreak => None,
            SegmentationPolicy::Single => Some(1),
            SegmentationPolicy::Double => Some(2),
        }
    }
}

impl Default for SegmentationPolicy {
    fn default() -> Self {
        SegmentationPolicy::NoBreak
    }
}

impl FromStr for SegmentationPolicy {
    type Err = TokError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "no" | "none" => Ok(SegmentationPolicy::NoBreak),
            "single" => Ok(SegmentationPolicy::Single),
            "double" => Ok(SegmentationPolicy::Double),
            _ => Err(TokError::option("segmentOnLinebreak", s)),
        }
    }
}

/// O que fazer com caracteres fora das tabelas de letras/pontuação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UntokenizablePolicy {
    /// Cada caractere vira um token de um caractere.
    Report,
    /// O caractere é absorvido pelo token vizinho (ou descartado).
    Suppress,
}

impl Default for UntokenizablePolicy {
    fn default() -> Self {
        UntokenizablePolicy::Suppress
    }
}

impl FromStr for UntokenizablePolicy {
    type Err = TokError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "report" => Ok(UntokenizablePolicy::Report),
            "no" | "suppress" => Ok(UntokenizablePolicy::Suppress),
            _ => Err(TokError::option("untokenizable", s)),
        }
    }
}

/// Codificação da saída do endpoint de anotação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Texto simples, um token por linha.
    Oneline,
    /// Tabular (estilo CoNLL) com offsets opcionais.
    Conll,
    /// Documento estruturado (JSON) com metadados de proveniência.
    Naf,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Naf
    }
}

impl FromStr for OutputFormat {
    type Err = TokError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oneline" | "plain" => Ok(OutputFormat::Oneline),
            "conll" | "tabular" => Ok(OutputFormat::Conll),
            "naf" | "structured" | "json" => Ok(OutputFormat::Naf),
            _ => Err(TokError::option("outputFormat", s)),
        }
    }
}

/// Como interpretar o texto recebido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Texto bruto, tokenizado pelo motor de regras.
    Raw,
    /// Texto já tokenizado: uma sentença por linha, tokens separados por espaço.
    Pretokenized,
    /// Documento estruturado (JSON) cujo texto bruto é re-tokenizado.
    Structured,
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::Raw
    }
}

/// Configuração completa de uma anotação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokConfig {
    pub language: Language,
    #[serde(default)]
    pub normalization: NormalizationProfile,
    #[serde(default)]
    pub untokenizable: UntokenizablePolicy,
    #[serde(default)]
    pub segment_on_linebreak: SegmentationPolicy,
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Imprime offset e comprimento na saída tabular.
    #[serde(default = "default_offsets")]
    pub offsets: bool,
    #[serde(default)]
    pub input: InputMode,
    /// Versão declarada no cabeçalho da saída estruturada.
    #[serde(default = "default_naf_version")]
    pub naf_version: String,
}

/// Versão padrão do formato estruturado.
pub const DEFAULT_NAF_VERSION: &str = "v1.naf";

fn default_offsets() -> bool {
    true
}

fn default_naf_version() -> String {
    DEFAULT_NAF_VERSION.to_string()
}

impl TokConfig {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            normalization: NormalizationProfile::default(),
            untokenizable: UntokenizablePolicy::default(),
            segment_on_linebreak: SegmentationPolicy::default(),
            output_format: OutputFormat::default(),
            offsets: true,
            input: InputMode::default(),
            naf_version: default_naf_version(),
        }
    }

    pub fn with_normalization(mut self, normalization: NormalizationProfile) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_untokenizable(mut self, untokenizable: UntokenizablePolicy) -> Self {
        self.untokenizable = untokenizable;
        self
    }

    pub fn with_segmentation(mut self, policy: SegmentationPolicy) -> Self {
        self.segment_on_linebreak = policy;
        self
    }

    pub fn with_output(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_offsets(mut self, offsets: bool) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn with_input(mut self, input: InputMode) -> Self {
        self.input = input;
        self
    }

    pub fn with_naf_version(mut self, version: impl Into<String>) -> Self {
        self.naf_version = version.into();
        self
    }
}

impl Default for TokConfig {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" FR ".parse::<Language>().unwrap(), Language::Fr);
        let err = "xx".parse::<Language>().unwrap_err();
        assert!(matches!(err, TokError::UnsupportedLanguage(tag) if tag == "xx"));
    }

    #[test]
    fn test_cli_spellings() {
        assert_eq!("yes".parse::<UntokenizablePolicy>().unwrap(), UntokenizablePolicy::Report);
        assert_eq!("no".parse::<UntokenizablePolicy>().unwrap(), UntokenizablePolicy::Suppress);
        assert_eq!("no".parse::<SegmentationPolicy>().unwrap(), SegmentationPolicy::NoBreak);
        assert_eq!("double".parse::<SegmentationPolicy>().unwrap(), SegmentationPolicy::Double);
        assert_eq!("conll".parse::<OutputFormat>().unwrap(), OutputFormat::Conll);
        assert_eq!("tutpenn".parse::<NormalizationProfile>().unwrap(), NormalizationProfile::Tutpenn);
        assert!("penn".parse::<NormalizationProfile>().is_err());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: TokConfig = serde_json::from_str(r#"{"language": "es"}"#).unwrap();
        assert_eq!(config.language, Language::Es);
        assert_eq!(config.normalization, NormalizationProfile::Default);
        assert_eq!(config.segment_on_linebreak, SegmentationPolicy::NoBreak);
        assert!(config.offsets);
        assert_eq!(config.naf_version, DEFAULT_NAF_VERSION);

        let json = serde_json::to_string(&config.with_segmentation(SegmentationPolicy::NoBreak)).unwrap();
        assert!(json.contains(r#""segment_on_linebreak":"no""#));
    }
}
