use spantok::offsets::offsets_are_well_formed;
use spantok::{
    Encoded, Offset, OutputKind, RuleTokenizerOptions, SpecialRole, SubwordTokenizer, Tokenizer,
    TokenizerKind, Vocabulary, WhitespaceTokenizer,
};
use std::sync::Arc;

type T = u32;

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "hello world",
    "  Grüße,\tWelt!  ",
    "#COVID19 cases are rising... (again)",
    "Don't \"quote\" me & <tag> [x] | y",
    "Ça coûte 3,50 € à Zoë.",
    "東京は 晴れ。",
    "tab\tnew\nline\r\nend\u{0}\u{FFFD}",
    "https://example.com/a?b=1 ok",
    "##19 cases ##",
];

fn pieces() -> Arc<Vocabulary<T>> {
    Vocabulary::build(
        [
            "#", "CO", "##VI", "##D", "##19", "cases", "are", "rising", "...", "(", ")", "a",
            "##gain", "hello", "world", "!", ",", ".", "'",
        ],
        spantok::vocab::bert_special_tokens(),
    )
    .unwrap()
    .into()
}

fn all_tokenizers() -> Vec<TokenizerKind<T>> {
    let rule = RuleTokenizerOptions::default().init::<T>().unwrap();
    let rule_full = RuleTokenizerOptions::default()
        .with_lowercase(true)
        .with_strip_accents(true)
        .with_escape(true)
        .with_protected_pattern(r"https?://\S+")
        .init::<T>()
        .unwrap();

    vec![
        WhitespaceTokenizer::<T>::new().into(),
        rule.clone().into(),
        rule_full.clone().into(),
        SubwordTokenizer::new(WhitespaceTokenizer::<T>::new(), pieces()).into(),
        SubwordTokenizer::new(rule, pieces()).into(),
        SubwordTokenizer::new(rule_full, pieces()).into(),
    ]
}

#[test]
fn whitespace_offsets_slice_to_tokens() {
    let tokenizer = WhitespaceTokenizer::<T>::new();
    for text in SAMPLES {
        for (token, offset) in tokenizer.tokenize_with_offsets(text) {
            assert_eq!(offset.slice(text), token, "{text:?}");
        }
    }
}

#[test]
fn offsets_are_ordered_and_in_bounds() {
    for tokenizer in all_tokenizers() {
        for text in SAMPLES {
            let (encoded, offsets) = tokenizer
                .encode_with_offsets(text, OutputKind::Str)
                .unwrap();
            assert_eq!(encoded.len(), offsets.len());
            assert!(
                offsets_are_well_formed(&offsets, text.chars().count()),
                "{} {text:?}: {offsets:?}",
                tokenizer.name()
            );
            assert_eq!(encoded, tokenizer.encode(text, OutputKind::Str).unwrap());
        }
    }
}

#[test]
fn str_and_int_encodings_agree() {
    let vocab = pieces();
    for mut tokenizer in all_tokenizers() {
        tokenizer.set_vocab(vocab.clone());
        for text in SAMPLES {
            let tokens = tokenizer
                .encode(text, OutputKind::Str)
                .unwrap()
                .into_tokens()
                .unwrap();
            let (ids, offsets) = tokenizer
                .encode_with_offsets(text, OutputKind::Int)
                .unwrap();
            assert_eq!(ids, Encoded::Ids(vocab.convert_tokens_to_ids(&tokens)));
            assert_eq!(offsets.len(), tokens.len());
        }
    }
}

#[test]
fn vocabulary_round_trip_and_unknown() {
    let vocab = pieces();
    for (id, token) in vocab.iter() {
        assert_eq!(vocab.id_of(token), id);
        assert_eq!(vocab.token_of(id).unwrap(), token);
    }
    assert_eq!(vocab.id_of("never-seen"), vocab.unknown_id());
    assert_eq!(vocab.unknown_token(), "[UNK]");
    assert!(vocab.token_of(vocab.size() as T).unwrap_err().is_index());
}

#[test]
fn duplicate_vocabulary_entries_are_rejected() {
    let err = Vocabulary::<T>::build(["a", "b", "a"], [(SpecialRole::Unknown, "[UNK]")])
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn subword_is_deterministic() {
    let tokenizers = all_tokenizers();
    for tokenizer in &tokenizers {
        for text in SAMPLES {
            assert_eq!(
                tokenizer.tokenize_with_offsets(text),
                tokenizer.tokenize_with_offsets(text)
            );
        }
    }
}

#[test]
fn decode_accepts_every_encoding() {
    for tokenizer in all_tokenizers() {
        for text in SAMPLES {
            let tokens = tokenizer.tokenize(text);
            assert!(
                tokenizer.decode(&tokens).is_ok(),
                "{} {text:?}: {tokens:?}",
                tokenizer.name()
            );
        }
    }
}

#[test]
fn subword_offsets_slice_to_piece_text() {
    let base = RuleTokenizerOptions::default().init::<T>().unwrap();
    let tokenizers: Vec<TokenizerKind<T>> = vec![
        SubwordTokenizer::new(WhitespaceTokenizer::<T>::new(), pieces()).into(),
        SubwordTokenizer::new(base, pieces()).into(),
    ];

    for tokenizer in &tokenizers {
        for text in SAMPLES {
            for (piece, offset) in tokenizer.tokenize_with_offsets(text) {
                if piece == "[UNK]" {
                    continue;
                }
                // A word-initial piece may itself start with `##`.
                let slice = offset.slice(text);
                assert!(
                    slice == piece || piece.strip_prefix("##") == Some(slice),
                    "{text:?}: {piece:?} at {offset:?} slices {slice:?}"
                );
            }
        }
    }
}

#[test]
fn covid_scenario_exact_vocab() {
    let pieces: Arc<Vocabulary<T>> = Vocabulary::build(
        ["CO", "##VI", "##D", "##19", "cases", "#"],
        [(SpecialRole::Unknown, "[UNK]")],
    )
    .unwrap()
    .into();
    assert_eq!(pieces.size(), 7);

    let base = RuleTokenizerOptions::default().init::<T>().unwrap();
    let tokenizer = SubwordTokenizer::new(base, pieces);

    let text = "#COVID19 cases";
    let (tokens, offsets) = tokenizer
        .encode_with_offsets(text, OutputKind::Str)
        .unwrap();
    let tokens = tokens.into_tokens().unwrap();
    assert_eq!(tokens, vec!["#", "CO", "##VI", "##D", "##19", "cases"]);
    assert_eq!(
        offsets,
        [(0, 1), (1, 3), (3, 5), (5, 6), (6, 8), (9, 14)]
            .into_iter()
            .map(Offset::from)
            .collect::<Vec<_>>()
    );
    for (token, offset) in tokens.iter().zip(&offsets) {
        assert_eq!(
            offset.slice(text),
            token.strip_prefix("##").unwrap_or(token)
        );
    }

    assert_eq!(
        tokenizer.encode(text, OutputKind::Int).unwrap(),
        Encoded::Ids(vec![5, 0, 1, 2, 3, 4])
    );
}

#[test]
fn rebinding_affects_only_later_calls() {
    let first: Arc<Vocabulary<T>> =
        Vocabulary::build(["x", "y"], [(SpecialRole::Unknown, "[UNK]")])
            .unwrap()
            .into();
    let second: Arc<Vocabulary<T>> =
        Vocabulary::build(["y", "x"], [(SpecialRole::Unknown, "[UNK]")])
            .unwrap()
            .into();

    let mut tokenizer = WhitespaceTokenizer::<T>::new().with_vocab(first);
    let before = tokenizer.encode("x y", OutputKind::Int).unwrap();
    tokenizer.set_vocab(second);
    let after = tokenizer.encode("x y", OutputKind::Int).unwrap();

    assert_eq!(before, Encoded::Ids(vec![0, 1]));
    assert_eq!(after, Encoded::Ids(vec![1, 0]));
}
