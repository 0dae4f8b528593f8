//! # Segmentação de sentenças
//!
//! Agrupa o fluxo de tokens em sentenças com uma máquina de dois estados:
//!
//! ```text
//!              pontuação final / quebra de linha (política)
//!  IN_SENTENCE ────────────────────────────────────────────▶ AT_BOUNDARY
//!       ▲                                                        │
//!       └──────────── próximo token (emite a sentença) ──────────┘
//! ```
//!
//! Em `AT_BOUNDARY`, aspas e parênteses de fechamento colados à pontuação
//! final (ex: `."` ou `.)`) ainda pertencem à sentença que está fechando; uma
//! aspa separada por espaço já abre a próxima.
//! Sentenças vazias nunca são emitidas e o conteúdo final sem pontuação é
//! emitido como última sentença.
//!
//! Parágrafos: uma linha em branco (duas ou mais quebras) sempre fecha a
//! sentença, em qualquer política, e o parágrafo seguinte começa no próximo
//! token. Assim nenhuma sentença atravessa parágrafos e a política `double`
//! coincide com `no` quanto às fronteiras.

use crate::config::SegmentationPolicy;
use crate::document::Sentence;
use crate::tokenizer::Token;

/// Sinais que podem fechar uma sentença.
const TERMINALS: &[char] = &['.', '!', '?', '…'];

/// Sinais que acompanham a pontuação final para dentro da sentença
const CLOSERS: &[&str] = &[")", "]", "}", "\"", "'", "”", "’", "»", "›", "''", "-RRB-", "-RSB-", "-RCB-"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InSentence,
    AtBoundary,
}

/// Verdadeiro para tokens formados só por pontuação final ("." "?!" "...").
pub fn is_sentence_final(token: &Token) -> bool {
    !token.text.is_empty() && token.text.chars().all(|c| TERMINALS.contains(&c))
}

fn is_closer(token: &Token) -> bool {
    CLOSERS.contains(&token.text.as_str())
}

struct SentenceBuilder {
    sentences: Vec<Sentence>,
    current: Vec<Token>,
    paragraph: usize,
}

impl SentenceBuilder {
    fn new() -> Self {
        Self {
            sentences: Vec::new(),
            current: Vec::new(),
            paragraph: 1,
        }
    }

    /// Fecha a sentença acumulada e adiciona à lista (se não vazia)
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let id = self.sentences.len() + 1;
        let paragraph = self.paragraph;
        let blank_line_after = self
            .current
            .last()
            .is_some_and(|t| t.newlines_after >= 2);

        let tokens = self
            .current
            .drain(..)
            .map(|t| t.stamped(paragraph, id))
            .collect();
        self.sentences.push(Sentence {
            id,
            paragraph,
            tokens,
        });

        if blank_line_after {
            self.paragraph += 1;
        }
    }
}

/// Segmenta o fluxo de tokens em sentenças segundo `policy`.
///
/// Cada token de entrada aparece exatamente uma vez na saída, com
/// `paragraph` e `sentence` preenchidos.
pub fn segment(tokens: &[Token], policy: SegmentationPolicy) -> Vec<Sentence> {
    let threshold = policy.linebreak_threshold();
    let breaks = |t: &Token| t.newlines_after >= 2 || threshold.is_some_and(|n| t.newlines_after >= n);
    let mut builder = SentenceBuilder::new();
    let mut state = State::InSentence;
    // A fronteira atual veio de pontuação (e não de quebra de linha)?
    let mut punct_boundary = false;

    for token in tokens {
        if state == State::AtBoundary {
            let attached = builder
                .current
                .last()
                .is_some_and(|prev| prev.end() == token.start);
            if punct_boundary && attached && is_closer(token) {
                builder.current.push(token.clone());
                if breaks(token) {
                    punct_boundary = false;
                }
                continue;
            }
            builder.flush();
            state = State::InSentence;
        }

        builder.current.push(token.clone());

        let forced = breaks(token);
        if is_sentence_final(token) || forced {
            state = State::AtBoundary;
            punct_boundary = !forced;
        }
    }

    builder.flush();
    builder.sentences
}

/// Uma sentença por linha, para texto já tokenizado.
pub fn segment_lines(tokens: &[Token]) -> Vec<Sentence> {
    let mut builder = SentenceBuilder::new();
    for token in tokens {
        builder.current.push(token.clone());
        if token.newlines_after > 0 {
            builder.flush();
        }
    }
    builder.flush();
    builder.sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Language, NormalizationProfile, UntokenizablePolicy};
    use crate::tokenizer::Tokenizer;

    fn sentences(text: &str, policy: SegmentationPolicy) -> Vec<Vec<String>> {
        let tokens = Tokenizer::new(Language::En, NormalizationProfile::Default, UntokenizablePolicy::Suppress)
            .tokenize(text);
        segment(&tokens, policy)
            .iter()
            .map(|s| s.tokens.iter().map(|t| t.text.clone()).collect())
            .collect()
    }

    #[test]
    fn test_single_linebreak_policy() {
        let result = sentences("Title\nBody text.", SegmentationPolicy::Single);
        assert_eq!(result, vec![vec!["Title"], vec!["Body", "text", "."]]);
    }

    #[test]
    fn test_no_break_policy_ignores_linebreaks() {
        let result = sentences("Title\nBody text.", SegmentationPolicy::NoBreak);
        assert_eq!(result, vec![vec!["Title", "Body", "text", "."]]);
    }

    #[test]
    fn test_double_linebreak_policy() {
        let text = "Line one\nline two\n\nSecond block";
        assert_eq!(sentences(text, SegmentationPolicy::Double).len(), 2);
        assert_eq!(sentences(text, SegmentationPolicy::Single).len(), 3);
        assert_eq!(sentences(text, SegmentationPolicy::NoBreak).len(), 2);
    }

    #[test]
    fn test_blank_line_ends_sentence_without_linebreak_policy() {
        let tokens = Tokenizer::new(Language::En, NormalizationProfile::Default, UntokenizablePolicy::Suppress)
            .tokenize("Title\n\nBody text.");
        let result = segment(&tokens, SegmentationPolicy::NoBreak);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].forms(), vec!["Title"]);
        assert_eq!(result[1].forms(), vec!["Body", "text", "."]);
        assert!(result[0].tokens.iter().all(|t| t.paragraph == 1));
        assert!(result[1].tokens.iter().all(|t| t.paragraph == 2 && t.sentence == 2));
    }

    #[test]
    fn test_opening_quote_starts_next_sentence() {
        let result = sentences("He left. \"Go,\" she said.", SegmentationPolicy::NoBreak);
        assert_eq!(
            result,
            vec![
                vec!["He", "left", "."],
                vec!["\"", "Go", ",", "\"", "she", "said", "."],
            ]
        );
    }

    #[test]
    fn test_terminal_punctuation() {
        let result = sentences("Hi! How are you? Fine... thanks", SegmentationPolicy::NoBreak);
        assert_eq!(result.len(), 4);
        assert_eq!(result[3], vec!["thanks"]);
    }

    #[test]
    fn test_closers_stay_with_sentence() {
        let result = sentences("He said \"stop.\" Then (left.) Done", SegmentationPolicy::NoBreak);
        assert_eq!(
            result,
            vec![
                vec!["He", "said", "\"", "stop", ".", "\""],
                vec!["Then", "(", "left", ".", ")"],
                vec!["Done"],
            ]
        );
    }

    #[test]
    fn test_ids_and_paragraphs() {
        let tokens = Tokenizer::new(Language::En, NormalizationProfile::Default, UntokenizablePolicy::Suppress)
            .tokenize("One. Two.\n\nThree.");
        let result = segment(&tokens, SegmentationPolicy::NoBreak);
        let ids: Vec<(usize, usize)> = result.iter().map(|s| (s.id, s.paragraph)).collect();
        assert_eq!(ids, vec![(1, 1), (2, 1), (3, 2)]);
        assert!(result[2].tokens.iter().all(|t| t.sentence == 3 && t.paragraph == 2));
    }

    #[test]
    fn test_segment_lines() {
        let tokens = Tokenizer::tokens_from_pretokenized("Hi . Ok\nSecond line\n");
        let result = segment_lines(&tokens);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].forms(), vec!["Hi", ".", "Ok"]);
        assert_eq!(result[1].id, 2);
    }

    #[test]
    fn test_empty_stream() {
        assert!(segment(&[], SegmentationPolicy::Single).is_empty());
    }
}
