//! # Motor de tokenização baseado em regras
//!
//! Divide o texto bruto em tokens, preservando a posição original de cada um
//! (offset em caracteres) para permitir reconstruir o documento e gerar
//! saídas com offsets.
//!
//! ## Estágios (ordem fixa)
//!
//! O texto é primeiro cortado em *chunks* separados por espaço em branco.
//! Cada chunk passa, nesta ordem, por:
//!
//! 1. **Proteção**: URLs, e-mails, números, siglas, abreviações e contrações
//!    viram spans atômicos. Regras de maior precedência reivindicam primeiro.
//! 2. **Divisão por pontuação**: o que não foi protegido é quebrado em
//!    palavras e sinais de pontuação.
//! 3. **Normalização**: o perfil do corpus reescreve a superfície de cada candidato.
//! 4. **Não-tokenizáveis**: caracteres fora das tabelas viram tokens próprios
//!    ou são absorvidos pelo vizinho, conforme a política.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tok_core::config::{Language, NormalizationProfile, UntokenizablePolicy};
//! use tok_core::tokenizer::Tokenizer;
//!
//! let tokenizer = Tokenizer::new(Language::En, NormalizationProfile::Default, UntokenizablePolicy::Suppress);
//! let tokens = tokenizer.tokenize("Mr. Smith didn't go to N.Y.C.");
//! let forms: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(forms, ["Mr.", "Smith", "did", "n't", "go", "to", "N.Y.C."]);
//! ```

use std::ops::Range;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::{Language, NormalizationProfile, TokConfig, UntokenizablePolicy};
use crate::error::Result;
use crate::normalizer::normalize;
use crate::rule_based::LanguageRules;
use crate::span::{gaps, Candidate, ClaimSet, SpanKind};

/// Um token extraído do texto original.
///
/// Offsets são contados em **caracteres** (não bytes) a partir do início do
/// texto bruto. `paragraph` e `sentence` valem 0 na saída do tokenizador e
/// são preenchidos pela segmentação ([`crate::segmenter::segment`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Forma de superfície já normalizada (ex: "-LRB-" no perfil ptb).
    pub text: String,
    /// Offset em caracteres do início do token no texto original.
    pub start: usize,
    /// Comprimento em caracteres do span original (não da forma normalizada).
    pub length: usize,
    pub paragraph: usize,
    pub sentence: usize,
    /// Quantas quebras de linha existem entre este token e o próximo.
    pub newlines_after: usize,
}

impl Token {
    /// Offset final (exclusivo) em caracteres.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Cópia do token com parágrafo e sentença atribuídos.
    pub fn stamped(&self, paragraph: usize, sentence: usize) -> Token {
        Token {
            paragraph,
            sentence,
            ..self.clone()
        }
    }
}

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:(?:https?|ftp)://|www\.)[^\s<>"]+"#).unwrap()
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}._%+-]+@[\p{L}\p{N}-]+(?:\.[\p{L}\p{N}-]+)+").unwrap()
});

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+-]?\p{N}+(?:[.,:/]\p{N}+)*").unwrap());

static ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}(?:\.\p{L})+\.?").unwrap());

static DOTTED_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}+\.").unwrap());

/// Pontuação que sai de URLs quando aparece no fim (ex: "(ver www.x.org).")
const URL_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '\'', '"', '»', '”', '’'];

/// Sinais que formam um único token quando repetidos ("...", "!!", "--")
const REPEATABLE: &[char] = &['.', '!', '?', '-', '=', '*', '_', '~', '#'];

/// Pontuação e símbolos fora do ASCII reconhecidos pelo tokenizador
const UNICODE_PUNCT: &[char] = &[
    '¡', '¿', '«', '»', '“', '”', '„', '‘', '’', '‚', '‹', '›', '–', '—', '―', '…', '·',
    '•', '§', '¶', '°', '±', '×', '÷', '€', '£', '¥', '¢', '©', '®', '™', '†', '‡', '′',
    '″', '‰', '¬', '¦', '¨', '¯', '´', '¸', 'º', 'ª', '¹', '²', '³', '¼', '½', '¾',
];

/// Classe de um grafema para a divisão por pontuação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Punct,
    Unknown,
}

fn classify(grapheme: &str) -> CharClass {
    match grapheme.chars().next() {
        Some(c) if c.is_alphanumeric() => CharClass::Word,
        Some(c) if c.is_ascii_punctuation() || UNICODE_PUNCT.contains(&c) => CharClass::Punct,
        _ => CharClass::Unknown,
    }
}

fn first_char(grapheme: &str) -> char {
    grapheme.chars().next().unwrap_or(' ')
}

/// Tokenizador configurado para um idioma e um perfil de normalização.
///
/// Não guarda estado entre chamadas: pode ser compartilhado entre threads e
/// chamado quantas vezes for necessário.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    rules: LanguageRules,
    normalization: NormalizationProfile,
    untokenizable: UntokenizablePolicy,
}

impl Tokenizer {
    pub fn new(
        language: Language,
        normalization: NormalizationProfile,
        untokenizable: UntokenizablePolicy,
    ) -> Self {
        Self::with_rules(LanguageRules::for_language(language), normalization, untokenizable)
    }

    /// Usa um conjunto de regras customizado (ex: abreviações extras).
    pub fn with_rules(
        rules: LanguageRules,
        normalization: NormalizationProfile,
        untokenizable: UntokenizablePolicy,
    ) -> Self {
        Self {
            rules,
            normalization,
            untokenizable,
        }
    }

    pub fn from_config(config: &TokConfig) -> Self {
        Self::new(config.language, config.normalization, config.untokenizable)
    }

    pub fn language(&self) -> Language {
        self.rules.language
    }

    /// Tokeniza o texto. Texto vazio (ou só espaços) produz lista vazia.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let chunks = chunk_ranges(text);

        // Chunks são independentes; `collect` preserva a ordem
        let candidates: Vec<Vec<Candidate>> = chunks
            .par_iter()
            .enumerate()
            .map(|(i, range)| {
                let next = chunks.get(i + 1).map(|r| first_char(&text[r.clone()]));
                self.tokenize_chunk(text, range.clone(), next)
            })
            .collect();

        emit_tokens(text, candidates.into_iter().flatten())
    }

    fn tokenize_chunk(&self, text: &str, range: Range<usize>, next: Option<char>) -> Vec<Candidate> {
        let protected = self.protect(text, range.clone(), next);
        let mut candidates = split_unprotected(text, range, protected);
        for candidate in &mut candidates {
            candidate.surface = normalize(candidate.raw(text), self.normalization);
        }
        resolve_untokenizable(text, candidates, self.untokenizable)
    }

    /// Estágio 1: spans que nunca podem ser divididos internamente.
    ///
    /// Precedência: URL > e-mail > número > sigla > abreviação > contração.
    fn protect(&self, text: &str, range: Range<usize>, next: Option<char>) -> Vec<Candidate> {
        let chunk = &text[range.clone()];
        let base = range.start;
        let mut claims = ClaimSet::new();

        for m in URL.find_iter(chunk) {
            let trimmed = m.as_str().trim_end_matches(URL_TRAILING);
            claims.claim(base + m.start()..base + m.start() + trimmed.len(), SpanKind::Url);
        }

        for m in EMAIL.find_iter(chunk) {
            claims.claim(base + m.start()..base + m.end(), SpanKind::Email);
        }

        for m in NUMBER.find_iter(chunk) {
            if at_word_start(chunk, m.start()) && at_word_end(chunk, m.end()) {
                claims.claim(base + m.start()..base + m.end(), SpanKind::Number);
            }
        }

        for m in ACRONYM.find_iter(chunk) {
            if at_word_start(chunk, m.start()) && at_word_end(chunk, m.end()) {
                claims.claim(base + m.start()..base + m.end(), SpanKind::Acronym);
            }
        }

        for m in DOTTED_WORD.find_iter(chunk) {
            if !at_word_start(chunk, m.start()) {
                continue;
            }
            let word = m.as_str().trim_end_matches('.');
            // Caractere logo após o ponto; no fim do chunk, o início do próximo
            let after = chunk[m.end()..].chars().next().or(next);
            if self.keeps_period(word, after) {
                claims.claim(base + m.start()..base + m.end(), SpanKind::Abbreviation);
            }
        }

        for (span, kind) in self.rules.contractions(chunk) {
            claims.claim(base + span.start..base + span.end, kind);
        }

        claims.into_sorted()
    }

    /// Decide se o ponto depois de `word` pertence à palavra.
    fn keeps_period(&self, word: &str, next: Option<char>) -> bool {
        if self.rules.is_abbreviation(word) {
            return true;
        }
        if self.rules.is_numeric_abbreviation(word) {
            return next.is_some_and(|c| c.is_numeric());
        }
        // Iniciais: "J. K. Rowling"
        self.rules.can_be_initial(word) && next.is_some_and(char::is_uppercase)
    }

    /// Tokens a partir de texto já tokenizado (uma sentença por linha,
    /// tokens separados por espaço). Os offsets apontam para `text`.
    pub fn tokens_from_pretokenized(text: &str) -> Vec<Token> {
        let mut candidates = Vec::new();
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            let mut cursor = offset;
            for piece in line.trim_end_matches(&['\n', '\r'][..]).split(' ') {
                if !piece.is_empty() {
                    let mut candidate = Candidate::new(cursor..cursor + piece.len(), SpanKind::Word);
                    candidate.surface = piece.to_string();
                    candidates.push(candidate);
                }
                cursor += piece.len() + 1;
            }
            offset += line.len();
        }
        emit_tokens(text, candidates)
    }
}

/// Tokeniza com a tag de idioma em texto (ex: "en").
///
/// Única condição fatal: idioma desconhecido.
pub fn tokenize(
    text: &str,
    language: &str,
    normalization: NormalizationProfile,
    untokenizable: UntokenizablePolicy,
) -> Result<Vec<Token>> {
    let language: Language = language.parse()?;
    Ok(Tokenizer::new(language, normalization, untokenizable).tokenize(text))
}

/// Intervalos de bytes das sequências sem espaço em branco.
fn chunk_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut current: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        match (ch.is_whitespace(), current) {
            (true, Some(start)) => {
                ranges.push(start..i);
                current = None;
            }
            (false, None) => current = Some(i),
            _ => {}
        }
    }
    if let Some(start) = current {
        ranges.push(start..text.len());
    }
    ranges
}

fn at_word_start(chunk: &str, pos: usize) -> bool {
    chunk[..pos]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric() && c != '.')
}

fn at_word_end(chunk: &str, pos: usize) -> bool {
    chunk[pos..].chars().next().map_or(true, |c| !c.is_alphanumeric())
}

/// Estágio 2: divide os trechos não protegidos em palavras e pontuação.
fn split_unprotected(text: &str, range: Range<usize>, protected: Vec<Candidate>) -> Vec<Candidate> {
    let mut result = Vec::with_capacity(protected.len() + 4);
    for gap in gaps(range, &protected) {
        split_gap(text, gap, &mut result);
    }
    result.extend(protected);
    result.sort_by_key(|c| c.start);
    result
}

fn split_gap(text: &str, gap: Range<usize>, out: &mut Vec<Candidate>) {
    let base = gap.start;
    let units: Vec<(usize, &str)> = text[gap].grapheme_indices(true).collect();
    let unit_end = |k: usize| base + units[k].0 + units[k].1.len();

    let mut i = 0;
    while i < units.len() {
        let (pos, grapheme) = units[i];
        let start = base + pos;
        match classify(grapheme) {
            CharClass::Word => {
                let mut j = i + 1;
                loop {
                    if j < units.len() && classify(units[j].1) == CharClass::Word {
                        j += 1;
                    } else if j + 1 < units.len()
                        && is_joiner(units[j - 1].1, units[j].1, units[j + 1].1)
                    {
                        j += 2;
                    } else {
                        break;
                    }
                }
                out.push(Candidate::new(start..unit_end(j - 1), SpanKind::Word));
                i = j;
            }
            CharClass::Punct => {
                let mark = first_char(grapheme);
                let mut j = i + 1;
                if REPEATABLE.contains(&mark) {
                    while j < units.len() && units[j].1 == grapheme {
                        j += 1;
                    }
                }
                out.push(Candidate::new(start..unit_end(j - 1), SpanKind::Punctuation));
                i = j;
            }
            CharClass::Unknown => {
                out.push(Candidate::new(start..unit_end(i), SpanKind::Untokenizable));
                i += 1;
            }
        }
    }
}

/// Hífens, barras e apóstrofos entre letras, ou ponto/vírgula entre
/// dígitos, ficam dentro da palavra ("and/or", "12.5km").
fn is_joiner(prev: &str, mid: &str, next: &str) -> bool {
    let (p, m, n) = (first_char(prev), first_char(mid), first_char(next));
    if mid.chars().count() != 1 {
        return false;
    }
    match m {
        '-' | '‐' | '/' => p.is_alphanumeric() && n.is_alphanumeric(),
        '\'' | '’' => p.is_alphabetic() && n.is_alphabetic(),
        '.' | ',' => p.is_numeric() && n.is_numeric(),
        _ => false,
    }
}

/// Estágio 4: aplica a política de caracteres não-tokenizáveis.
///
/// Dentro de um chunk os candidatos são contíguos, então "vizinho" é sempre
/// o candidato imediatamente anterior ou seguinte.
fn resolve_untokenizable(
    text: &str,
    candidates: Vec<Candidate>,
    policy: UntokenizablePolicy,
) -> Vec<Candidate> {
    if policy == UntokenizablePolicy::Report {
        return candidates;
    }

    let mut out: Vec<Candidate> = Vec::with_capacity(candidates.len());
    // Não-tokenizáveis no início do chunk, à espera do próximo token
    let mut pending: Option<Candidate> = None;

    for mut candidate in candidates {
        if candidate.kind == SpanKind::Untokenizable {
            if let Some(last) = out.last_mut() {
                last.end = candidate.end;
                last.surface.push_str(candidate.raw(text));
            } else if let Some(p) = pending.as_mut() {
                p.end = candidate.end;
                p.surface.push_str(candidate.raw(text));
            } else {
                candidate.surface = candidate.raw(text).to_string();
                pending = Some(candidate);
            }
            continue;
        }

        if let Some(p) = pending.take() {
            candidate.start = p.start;
            candidate.surface = p.surface + &candidate.surface;
        }
        out.push(candidate);
    }
    out
}

/// Converte candidatos (offsets em bytes) em tokens (offsets em caracteres).
fn emit_tokens(text: &str, candidates: impl IntoIterator<Item = Candidate>) -> Vec<Token> {
    let candidates: Vec<Candidate> = candidates.into_iter().collect();
    let mut tokens = Vec::with_capacity(candidates.len());
    let mut byte_cursor = 0;
    let mut char_cursor = 0;

    for (i, candidate) in candidates.iter().enumerate() {
        char_cursor += text[byte_cursor..candidate.start].chars().count();
        let length = candidate.raw(text).chars().count();
        let gap_end = candidates.get(i + 1).map_or(text.len(), |next| next.start);
        let newlines_after = text[candidate.end..gap_end].matches('\n').count();

        tokens.push(Token {
            text: candidate.surface.clone(),
            start: char_cursor,
            length,
            paragraph: 0,
            sentence: 0,
            newlines_after,
        });

        char_cursor += length;
        byte_cursor = candidate.end;
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Tokenizer {
        Tokenizer::new(Language::En, NormalizationProfile::Default, UntokenizablePolicy::Suppress)
    }

    fn forms(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_abbreviation_and_contraction() {
        let tokens = en().tokenize("Mr. Smith didn't go to N.Y.C.");
        assert_eq!(forms(&tokens), vec!["Mr.", "Smith", "did", "n't", "go", "to", "N.Y.C."]);
        assert_eq!((tokens[2].start, tokens[2].length), (10, 3));
        assert_eq!((tokens[3].start, tokens[3].length), (13, 3));
    }

    #[test]
    fn test_punctuation_split() {
        let tokens = en().tokenize("(Hello), world... well-known!");
        assert_eq!(forms(&tokens), vec!["(", "Hello", ")", ",", "world", "...", "well-known", "!"]);
    }

    #[test]
    fn test_numbers_urls_emails() {
        let tokens = en().tokenize("Pay 1,250.50 at www.shop.com/buy, or mail info@shop.com.");
        assert_eq!(
            forms(&tokens),
            vec!["Pay", "1,250.50", "at", "www.shop.com/buy", ",", "or", "mail", "info@shop.com", "."]
        );
    }

    #[test]
    fn test_sentence_final_period_is_split() {
        let tokens = en().tokenize("It costs 3.5 dollars.");
        assert_eq!(forms(&tokens), vec!["It", "costs", "3.5", "dollars", "."]);
    }

    #[test]
    fn test_numeric_abbreviation_needs_number() {
        let tokens = en().tokenize("See No. 5 now. No. We left.");
        assert_eq!(
            forms(&tokens),
            vec!["See", "No.", "5", "now", ".", "No", ".", "We", "left", "."]
        );
    }

    #[test]
    fn test_numeric_abbreviation_before_attached_number() {
        let tokens = en().tokenize("See No.5 now.");
        assert_eq!(forms(&tokens), vec!["See", "No.", "5", "now", "."]);
        assert_eq!((tokens[2].start, tokens[2].length), (7, 1));
    }

    #[test]
    fn test_initials_keep_period_but_pronoun_does_not() {
        let tokens = en().tokenize("J. K. Rowling wrote it. So did I. Then we left.");
        assert_eq!(
            forms(&tokens),
            vec!["J.", "K.", "Rowling", "wrote", "it", ".", "So", "did", "I", ".", "Then", "we", "left", "."]
        );
    }

    #[test]
    fn test_french_elision() {
        let tokenizer = Tokenizer::new(Language::Fr, NormalizationProfile::Default, UntokenizablePolicy::Suppress);
        let tokens = tokenizer.tokenize("Je sais qu'il l'aime aujourd'hui.");
        assert_eq!(
            forms(&tokens),
            vec!["Je", "sais", "qu'", "il", "l'", "aime", "aujourd'hui", "."]
        );
    }

    #[test]
    fn test_english_keeps_name_apostrophe() {
        let tokens = en().tokenize("O'Brien's car");
        assert_eq!(forms(&tokens), vec!["O'Brien", "'s", "car"]);
    }

    #[test]
    fn test_offsets_are_characters() {
        let text = "Ação é boa.";
        let tokens = Tokenizer::new(Language::Es, NormalizationProfile::Default, UntokenizablePolicy::Suppress)
            .tokenize(text);
        assert_eq!(forms(&tokens), vec!["Ação", "é", "boa", "."]);
        let chars: Vec<char> = text.chars().collect();
        for token in &tokens {
            let original: String = chars[token.start..token.end()].iter().collect();
            assert_eq!(original, token.text);
        }
    }

    #[test]
    fn test_normalization_keeps_offsets() {
        let tokenizer = Tokenizer::new(Language::En, NormalizationProfile::Ptb, UntokenizablePolicy::Suppress);
        let tokens = tokenizer.tokenize("(a/b)");
        assert_eq!(forms(&tokens), vec!["-LRB-", "a\\/b", "-RRB-"]);
        assert_eq!((tokens[0].start, tokens[0].length), (0, 1));
        assert_eq!((tokens[1].start, tokens[1].length), (1, 3));
    }

    #[test]
    fn test_untokenizable_report() {
        let tokenizer = Tokenizer::new(Language::En, NormalizationProfile::Default, UntokenizablePolicy::Report);
        let tokens = tokenizer.tokenize("great\u{1F600} \u{FFFD}");
        assert_eq!(forms(&tokens), vec!["great", "\u{1F600}", "\u{FFFD}"]);
    }

    #[test]
    fn test_untokenizable_suppress() {
        let tokens = en().tokenize("great\u{1F600} \u{FFFD} \u{FFFD}ok");
        assert_eq!(forms(&tokens), vec!["great\u{1F600}", "\u{FFFD}ok"]);
        assert_eq!((tokens[0].start, tokens[0].length), (0, 6));
        assert_eq!((tokens[1].start, tokens[1].length), (9, 3));
    }

    #[test]
    fn test_newlines_after() {
        let tokens = en().tokenize("Title\nBody text.\n\nNext");
        let counts: Vec<usize> = tokens.iter().map(|t| t.newlines_after).collect();
        assert_eq!(counts, vec![1, 0, 0, 2, 0]);
    }

    #[test]
    fn test_empty_and_unsupported() {
        assert!(en().tokenize("").is_empty());
        assert!(en().tokenize("  \n\t ").is_empty());
        assert!(tokenize("x", "xx", NormalizationProfile::Default, UntokenizablePolicy::Report).is_err());
        assert_eq!(
            tokenize("Hi!", "en", NormalizationProfile::Default, UntokenizablePolicy::Report).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_pretokenized() {
        let tokens = Tokenizer::tokens_from_pretokenized("The cat  sat .\nIt ran");
        assert_eq!(forms(&tokens), vec!["The", "cat", "sat", ".", "It", "ran"]);
        assert_eq!(tokens[2].start, 9);
        assert_eq!(tokens[3].newlines_after, 1);
        assert_eq!(tokens[4].start, 15);
    }
}
