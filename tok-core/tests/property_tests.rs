//! Testes de propriedade do tok-core.
//!
//! Invariantes verificadas:
//! - Os spans dos tokens e o espaço entre eles reconstroem a entrada
//! - Offsets estritamente crescentes, sem sobreposição
//! - Normalização idempotente em todos os perfis
//! - Cada token em exatamente uma sentença não vazia, dentro de um só parágrafo
//! - Avaliador: identidade, sequências disjuntas e entrada vazia

use proptest::prelude::*;
use tok_core::{
    evaluate, normalize, segment, Language, NormalizationProfile, SegmentationPolicy, Tokenizer,
    UntokenizablePolicy,
};

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z0-9 .,;:!?'()\"/@\n-]{0,80}").unwrap(),
        prop::string::string_regex("[a-zçãéèàüöñß’«»… .\n]{0,60}").unwrap(),
        any::<String>(),
    ]
}

fn language() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::ALL.to_vec())
}

fn profile() -> impl Strategy<Value = NormalizationProfile> {
    prop::sample::select(NormalizationProfile::ALL.to_vec())
}

fn policy() -> impl Strategy<Value = SegmentationPolicy> {
    prop::sample::select(vec![
        SegmentationPolicy::NoBreak,
        SegmentationPolicy::Single,
        SegmentationPolicy::Double,
    ])
}

fn surfaces() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-z.,]{1,6}").unwrap(), 0..30)
}

proptest! {
    /// Com o perfil default e relatório de não-tokenizáveis, os spans dos
    /// tokens e o espaço em branco entre eles reconstroem o texto.
    #[test]
    fn spans_reconstruct_input(input in text(), lang in language()) {
        let tokenizer = Tokenizer::new(lang, NormalizationProfile::Default, UntokenizablePolicy::Report);
        let tokens = tokenizer.tokenize(&input);
        let chars: Vec<char> = input.chars().collect();

        let mut rebuilt = String::new();
        let mut cursor = 0;
        for token in &tokens {
            let between: String = chars[cursor..token.start].iter().collect();
            prop_assert!(between.chars().all(char::is_whitespace), "lacuna não vazia: {:?}", between);
            rebuilt.push_str(&between);

            let original: String = chars[token.start..token.end()].iter().collect();
            prop_assert_eq!(&original, &token.text);
            rebuilt.push_str(&original);
            cursor = token.end();
        }
        let tail: String = chars[cursor..].iter().collect();
        prop_assert!(tail.chars().all(char::is_whitespace));
        rebuilt.push_str(&tail);
        prop_assert_eq!(rebuilt, input);
    }

    /// Offsets crescentes e sem sobreposição, em qualquer configuração.
    #[test]
    fn offsets_are_monotonic(
        input in text(),
        lang in language(),
        normalization in profile(),
        report in any::<bool>(),
    ) {
        let untokenizable = if report { UntokenizablePolicy::Report } else { UntokenizablePolicy::Suppress };
        let tokens = Tokenizer::new(lang, normalization, untokenizable).tokenize(&input);
        let total = input.chars().count();

        for token in &tokens {
            prop_assert!(token.length > 0);
            prop_assert!(token.end() <= total);
        }
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
            prop_assert!(pair[0].end() <= pair[1].start);
        }
    }

    #[test]
    fn normalization_is_idempotent(surface in text(), normalization in profile()) {
        let once = normalize(&surface, normalization);
        prop_assert_eq!(normalize(&once, normalization), once);
    }

    /// Cada token em exatamente uma sentença; sentenças nunca vazias e nunca
    /// atravessam uma linha em branco.
    #[test]
    fn segmentation_is_total(input in text(), lang in language(), segmentation in policy()) {
        let tokens = Tokenizer::new(lang, NormalizationProfile::Default, UntokenizablePolicy::Suppress)
            .tokenize(&input);
        let sentences = segment(&tokens, segmentation);

        prop_assert!(sentences.iter().all(|s| !s.tokens.is_empty()));
        let flattened: Vec<usize> = sentences
            .iter()
            .flat_map(|s| s.tokens.iter().map(|t| t.start))
            .collect();
        let expected: Vec<usize> = tokens.iter().map(|t| t.start).collect();
        prop_assert_eq!(flattened, expected);

        for (i, sentence) in sentences.iter().enumerate() {
            prop_assert_eq!(sentence.id, i + 1);
            prop_assert!(sentence.tokens.iter().all(|t| t.sentence == sentence.id));
            prop_assert!(sentence.tokens.iter().all(|t| t.paragraph == sentence.paragraph));
            let (_, inner) = sentence.tokens.split_last().unwrap();
            prop_assert!(inner.iter().all(|t| t.newlines_after < 2));
        }
        for pair in sentences.windows(2) {
            prop_assert!(pair[0].paragraph <= pair[1].paragraph);
            let blank_line = pair[0].tokens.last().unwrap().newlines_after >= 2;
            prop_assert_eq!(pair[1].paragraph, pair[0].paragraph + usize::from(blank_line));
        }
    }

    #[test]
    fn evaluator_identity(tokens in prop::collection::vec("[a-z]{1,5}", 1..40)) {
        let result = evaluate(&tokens, &tokens);
        prop_assert_eq!(result.precision, 1.0);
        prop_assert_eq!(result.recall, 1.0);
        prop_assert_eq!(result.f_score, 1.0);
    }

    #[test]
    fn evaluator_disjoint(
        reference in prop::collection::vec("[a-m]{1,4}", 0..20),
        hypothesis in prop::collection::vec("[n-z]{1,4}", 0..20),
    ) {
        let result = evaluate(&reference, &hypothesis);
        prop_assert_eq!(result.true_positive, 0);
        prop_assert_eq!(result.f_score, 0.0);
    }

    /// As contagens sempre cobrem as duas sequências inteiras.
    #[test]
    fn evaluator_counts_cover_inputs(reference in surfaces(), hypothesis in surfaces()) {
        let result = evaluate(&reference, &hypothesis);
        prop_assert_eq!(result.true_positive + result.false_negative, reference.len());
        prop_assert_eq!(result.true_positive + result.false_positive, hypothesis.len());
        prop_assert!((0.0..=1.0).contains(&result.f_score));
    }
}

#[test]
fn evaluator_empty() {
    let empty: Vec<String> = Vec::new();
    let result = evaluate(&empty, &empty);
    assert_eq!(result.precision, 0.0);
    assert_eq!(result.recall, 0.0);
    assert_eq!(result.f_score, 0.0);
}
