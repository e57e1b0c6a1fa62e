use palaver::analysis::normalizer::Normalizer;
use palaver::config::PalaverConfig;
use palaver::corpus::IntentCorpus;
use palaver::ml::intent_classifier;

const SAMPLES: &[&str] = &[
    "",
    "Hello",
    "HELLO, WORLD!!!",
    "The quick brown fox jumps over the lazy dogs",
    "I went to the stores and bought three books",
    "Can't stop, won't stop; y'all know it",
    "e-mail me at someone@example.com",
    "Prices rose 3.5% in 2023",
    "naïve café résumé",
    "Straße GROSS",
    "中文分词测试",
    "한국어 문장입니다",
    "emoji 🦀 in 🎉 the middle",
    "tabs\tand\nnewlines",
    "running runs ran",
    "children's books",
];

#[test]
fn test_normalize_is_idempotent() {
    let normalizer = Normalizer::english().unwrap();

    for text in SAMPLES {
        let once = normalizer.normalize(text);
        let twice = normalizer.normalize(&once);
        assert_eq!(once, twice, "not idempotent for {text:?}");
    }
}

#[test]
fn test_normalize_is_deterministic() {
    let first = Normalizer::english().unwrap();
    let second = Normalizer::english().unwrap();

    for text in SAMPLES.iter().rev() {
        assert_eq!(first.normalize(text), second.normalize(text));
        assert_eq!(first.normalize(text), first.normalize(text));
    }
}

#[test]
fn test_normalize_output_shape() {
    let normalizer = Normalizer::english().unwrap();

    for text in SAMPLES {
        let normalized = normalizer.normalize(text);
        assert!(!normalized.starts_with(' ') && !normalized.ends_with(' '));
        assert!(!normalized.contains("  "));
        assert_eq!(normalized, normalized.to_lowercase());
        assert!(
            normalized
                .split(' ')
                .filter(|t| !t.is_empty())
                .all(|t| t.chars().all(char::is_alphanumeric))
        );
    }
}

#[test]
fn test_surviving_tokens_keep_their_order() {
    let normalizer = Normalizer::english().unwrap();

    assert_eq!(
        normalizer.normalize("zebra apple mango"),
        "zebra apple mango"
    );
    assert_eq!(
        normalizer.normalize("The children bought books"),
        "child buy book"
    );
}

#[test]
fn test_contractions_keep_their_content_words() {
    let normalizer = Normalizer::english().unwrap();

    // 1. Possessives keep the noun.
    assert_eq!(normalizer.normalize("children's books"), "child book");
    assert_eq!(normalizer.normalize("What’s today’s forecast?"), "today forecast");

    // 2. Negated and pronoun contractions vanish with their stop-word pieces.
    assert_eq!(normalizer.normalize("I don't know, it's fine"), "know fine");

    // 3. Decimal numbers keep their digits.
    assert_eq!(normalizer.normalize("Prices rose 3.5%"), "price rise 3 5");
}

#[test]
fn test_training_patterns_are_normalized_like_queries() {
    let corpus = IntentCorpus::from_json(
        r#"[{"tag": "a", "patterns": ["Telling JOKES!"], "responses": ["x"]},
            {"tag": "b", "patterns": ["the weather"], "responses": ["y"]}]"#,
    )
    .unwrap();
    let normalizer = Normalizer::english().unwrap();

    let examples = intent_classifier::training_examples(&corpus, &normalizer);
    let classifier = intent_classifier::train(&corpus, &PalaverConfig::default()).unwrap();

    assert_eq!(examples[0].text, "tell joke");
    assert_eq!(examples[1].text, "weather");
    assert_eq!(
        classifier.normalizer().normalize("Telling JOKES!"),
        examples[0].text
    );
}
