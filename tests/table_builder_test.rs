//! Result table builder: method ordering, setup failures, per-sentence failures.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use sentimentsync::scoring::{ScorerRegistry, SentimentScorer, TextBlobScorer, VaderScorer};
use sentimentsync::{
    Diagnostic, Method, MethodOutput, Result, Score, SentimentLabel, SentimentSyncError,
    TableBuilder,
};

// ============================================================================
// Mock scorers
// ============================================================================

/// Labels by keyword, neutral otherwise.
struct KeywordScorer {
    method: Method,
}

#[async_trait]
impl SentimentScorer for KeywordScorer {
    fn method(&self) -> Method {
        self.method
    }

    async fn score(&self, sentence: &str) -> Result<Score> {
        let score = if sentence.contains("love") {
            Score::new(SentimentLabel::Positive, 2.5)
        } else if sentence.contains("terrible") {
            Score::new(SentimentLabel::Negative, 1.5)
        } else {
            Score::new(SentimentLabel::Neutral, 0.0)
        };
        Ok(score)
    }
}

/// Passes setup, then fails on one sentence (1-based).
struct FlakyLlm {
    fail_on: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl SentimentScorer for FlakyLlm {
    fn method(&self) -> Method {
        Method::Gemini
    }

    async fn score(&self, _sentence: &str) -> Result<Score> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(SentimentSyncError::Http("connection reset".into()));
        }
        Ok(Score::new(SentimentLabel::Positive, 0.9))
    }
}

/// Passes setup, then has its key revoked from the given sentence on.
struct RevokedKeyLlm {
    revoked_from: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl SentimentScorer for RevokedKeyLlm {
    fn method(&self) -> Method {
        Method::Gemini
    }

    async fn score(&self, _sentence: &str) -> Result<Score> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call >= self.revoked_from {
            return Err(SentimentSyncError::Api {
                status: 401,
                message: "API key revoked".into(),
            });
        }
        Ok(Score::new(SentimentLabel::Negative, 0.4))
    }
}

/// Rejects its credential during setup.
struct BadCredentialLlm {
    scored: AtomicUsize,
}

#[async_trait]
impl SentimentScorer for BadCredentialLlm {
    fn method(&self) -> Method {
        Method::Gemini
    }

    async fn validate(&self) -> Result<()> {
        Err(SentimentSyncError::AuthenticationFailed)
    }

    async fn score(&self, _sentence: &str) -> Result<Score> {
        self.scored.fetch_add(1, Ordering::SeqCst);
        Ok(Score::new(SentimentLabel::Neutral, 0.0))
    }
}

fn sentences(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn lexicon_and_rule_based_scorers_label_reference_sentences() {
    let registry = ScorerRegistry::new()
        .with(Arc::new(VaderScorer::default()))
        .with(Arc::new(TextBlobScorer::default()));

    let input = sentences(&["I love this!", "This is terrible.", "It is a table."]);
    let outcome = TableBuilder::new(&registry)
        .build(&input, &[Method::TextBlob, Method::Vader])
        .await
        .unwrap();

    let table = &outcome.table;
    assert_eq!(table.methods(), &[Method::Vader, Method::TextBlob]);
    assert_eq!(table.len(), 3);
    for method in [Method::Vader, Method::TextBlob] {
        assert_eq!(
            table.labels(method),
            vec![
                Some(SentimentLabel::Positive),
                Some(SentimentLabel::Negative),
                Some(SentimentLabel::Neutral),
            ],
            "labels for {method}"
        );
        assert!(table.intensities(method).iter().all(|v| *v >= 0.0));
    }

    // one sample per call, in call order: sentence by sentence, method by method
    let order: Vec<_> = outcome
        .timings
        .iter()
        .map(|s| (s.sentence_index, s.method))
        .collect();
    assert_eq!(
        order,
        vec![
            (1, Method::Vader),
            (1, Method::TextBlob),
            (2, Method::Vader),
            (2, Method::TextBlob),
            (3, Method::Vader),
            (3, Method::TextBlob),
        ]
    );
    assert!(outcome.diagnostics.is_empty());
}

#[tokio::test]
async fn rows_follow_input_order() {
    let registry = ScorerRegistry::new().with(Arc::new(KeywordScorer {
        method: Method::Vader,
    }));
    let input = sentences(&["terrible", "plain", "love"]);
    let outcome = TableBuilder::new(&registry)
        .build(&input, &[Method::Vader])
        .await
        .unwrap();

    let texts: Vec<_> = outcome.table.rows().iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["terrible", "plain", "love"]);
}

#[tokio::test]
async fn empty_input_is_rejected_before_scoring() {
    let registry = ScorerRegistry::new().with(Arc::new(VaderScorer::default()));
    let builder = TableBuilder::new(&registry);

    let err = builder.build(&[], &[Method::Vader]).await.unwrap_err();
    assert!(matches!(err, SentimentSyncError::Validation(_)));

    let err = builder
        .build(&sentences(&["fine"]), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SentimentSyncError::Validation(_)));
}

#[tokio::test]
async fn invalid_llm_credential_drops_the_method() {
    let llm = Arc::new(BadCredentialLlm {
        scored: AtomicUsize::new(0),
    });
    let registry = ScorerRegistry::new()
        .with(Arc::new(KeywordScorer {
            method: Method::Vader,
        }))
        .with(llm.clone());

    let input = sentences(&["I love it", "meh"]);
    let outcome = TableBuilder::new(&registry)
        .build(&input, &[Method::Vader, Method::Gemini])
        .await
        .unwrap();

    assert_eq!(outcome.table.methods(), &[Method::Vader]);
    assert!(
        outcome
            .table
            .rows()
            .iter()
            .all(|row| !row.per_method.contains_key(&Method::Gemini))
    );
    assert_eq!(llm.scored.load(Ordering::SeqCst), 0, "dropped method never scores");
    assert_eq!(outcome.dropped_methods(), vec![Method::Gemini]);
    assert!(matches!(
        &outcome.diagnostics[0],
        Diagnostic::MethodDropped {
            method: Method::Gemini,
            ..
        }
    ));
}

#[tokio::test]
async fn unregistered_method_is_dropped_not_fatal() {
    let registry = ScorerRegistry::new().with(Arc::new(VaderScorer::default()));
    let outcome = TableBuilder::new(&registry)
        .build(&sentences(&["ok"]), &[Method::Vader, Method::TextBlob])
        .await
        .unwrap();
    assert_eq!(outcome.table.methods(), &[Method::Vader]);
    assert_eq!(outcome.dropped_methods(), vec![Method::TextBlob]);
}

#[tokio::test]
async fn llm_failure_on_one_sentence_marks_only_that_cell() {
    let registry = ScorerRegistry::new()
        .with(Arc::new(KeywordScorer {
            method: Method::Vader,
        }))
        .with(Arc::new(FlakyLlm {
            fail_on: 2,
            calls: AtomicUsize::new(0),
        }));

    let input = sentences(&["I love it", "This is terrible", "Just a chair"]);
    let outcome = TableBuilder::new(&registry)
        .build(&input, &[Method::Vader, Method::Gemini])
        .await
        .unwrap();

    let gemini: Vec<_> = outcome.table.column(Method::Gemini).collect();
    assert!(!gemini[0].is_error());
    assert_eq!(gemini[1], MethodOutput::Error);
    assert_eq!(gemini[1].label_str(), "ERROR");
    assert_eq!(gemini[1].intensity(), 0.0);
    assert!(!gemini[2].is_error());

    // the other method is untouched
    assert_eq!(
        outcome.table.labels(Method::Vader)[1],
        Some(SentimentLabel::Negative)
    );

    // no sample for the failed call
    assert_eq!(outcome.timings.len(), 5);
    assert!(
        !outcome
            .timings
            .iter()
            .any(|s| s.method == Method::Gemini && s.sentence_index == 2)
    );

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "Error during Gemini analysis on sentence #2: HTTP error: connection reset"
    );
}

#[tokio::test]
async fn credential_rejected_mid_run_keeps_method_with_error_cells() {
    let registry = ScorerRegistry::new()
        .with(Arc::new(KeywordScorer {
            method: Method::Vader,
        }))
        .with(Arc::new(RevokedKeyLlm {
            revoked_from: 2,
            calls: AtomicUsize::new(0),
        }));

    let input = sentences(&["I love it", "This is terrible", "Just a chair"]);
    let outcome = TableBuilder::new(&registry)
        .build(&input, &[Method::Vader, Method::Gemini])
        .await
        .unwrap();

    // a setup-class error while scoring is still a per-sentence failure
    assert_eq!(outcome.table.methods(), &[Method::Vader, Method::Gemini]);
    assert!(outcome.dropped_methods().is_empty());

    let gemini: Vec<_> = outcome.table.column(Method::Gemini).collect();
    assert_eq!(gemini[0].label(), Some(SentimentLabel::Negative));
    assert!(gemini[1].is_error());
    assert!(gemini[2].is_error());

    assert_eq!(outcome.diagnostics.len(), 2);
    for (diagnostic, index) in outcome.diagnostics.iter().zip([2, 3]) {
        match diagnostic {
            Diagnostic::CallFailed {
                method,
                sentence_index,
                ..
            } => {
                assert_eq!(*method, Method::Gemini);
                assert_eq!(*sentence_index, index);
            }
            other => panic!("unexpected diagnostic: {other}"),
        }
    }
}
