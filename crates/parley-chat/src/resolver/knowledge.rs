use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use parley_core::{EncyclopediaLookup, Query, ResolverResult};

use super::Resolver;
use crate::error::ResolveError;

pub const KNOWLEDGE_NOT_FOUND: &str = "Sorry, I was unable to find information about that.";

static CUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)who is|what is|define").expect("Invalid cue regex"));

/// Strip the knowledge cues and surrounding punctuation to get the topic.
pub fn extract_subject(text: &str) -> Option<String> {
    let stripped = CUE_RE.replace_all(text, "");
    let subject = stripped
        .trim()
        .trim_end_matches(['?', '!', '.'])
        .trim();
    (!subject.is_empty()).then(|| subject.to_string())
}

/// Encyclopedia summary for the subject of a "who is / what is / define" question.
pub struct KnowledgeResolver {
    lookup: Arc<dyn EncyclopediaLookup>,
}

impl KnowledgeResolver {
    pub fn new(lookup: Arc<dyn EncyclopediaLookup>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl Resolver for KnowledgeResolver {
    fn name(&self) -> &'static str {
        "knowledge"
    }

    async fn resolve(&self, query: &Query) -> Result<ResolverResult, ResolveError> {
        let Some(subject) = extract_subject(&query.text) else {
            return Ok(ResolverResult::declined(KNOWLEDGE_NOT_FOUND));
        };

        match self.lookup.summary(&subject).await {
            Ok(summary) if !summary.trim().is_empty() => Ok(ResolverResult::answered(summary)),
            Ok(_) => Ok(ResolverResult::declined(KNOWLEDGE_NOT_FOUND)),
            Err(e) => {
                tracing::warn!(subject = %subject, error = %e, "Encyclopedia lookup failed");
                Ok(ResolverResult::declined(KNOWLEDGE_NOT_FOUND))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubEncyclopedia;

    #[test]
    fn test_extract_subject() {
        assert_eq!(
            extract_subject("Who is Ada Lovelace"),
            Some("Ada Lovelace".into())
        );
        assert_eq!(extract_subject("define entropy"), Some("entropy".into()));
    }

    #[test]
    fn test_extract_subject_strips_trailing_punctuation() {
        assert_eq!(
            extract_subject("What is photosynthesis?"),
            Some("photosynthesis".into())
        );
    }

    #[test]
    fn test_extract_subject_removes_every_cue() {
        assert_eq!(
            extract_subject("WHAT IS define Rust"),
            Some("Rust".into())
        );
    }

    #[test]
    fn test_extract_subject_empty() {
        assert_eq!(extract_subject("who is"), None);
        assert_eq!(extract_subject("what is ?"), None);
    }

    #[tokio::test]
    async fn test_found_summary() {
        let stub = Arc::new(StubEncyclopedia::with(&[(
            "Ada Lovelace",
            "Ada Lovelace was an English mathematician.",
        )]));
        let result = KnowledgeResolver::new(stub.clone())
            .resolve(&Query::new("Who is Ada Lovelace", None))
            .await
            .unwrap();

        assert!(result.succeeded);
        assert_eq!(result.text, "Ada Lovelace was an English mathematician.");
        assert_eq!(
            stub.last_topic.lock().unwrap().as_deref(),
            Some("Ada Lovelace")
        );
    }

    #[tokio::test]
    async fn test_not_found_declines() {
        let stub = Arc::new(StubEncyclopedia::with(&[]));
        let result = KnowledgeResolver::new(stub.clone())
            .resolve(&Query::new("Who is Nobody Inparticular", None))
            .await
            .unwrap();

        assert!(!result.succeeded);
        assert_eq!(result.text, KNOWLEDGE_NOT_FOUND);
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_summary_declines() {
        let stub = Arc::new(StubEncyclopedia::with(&[("Void", "   ")]));
        let result = KnowledgeResolver::new(stub)
            .resolve(&Query::new("define Void", None))
            .await
            .unwrap();
        assert!(!result.succeeded);
    }

    #[tokio::test]
    async fn test_empty_subject_skips_lookup() {
        let stub = Arc::new(StubEncyclopedia::with(&[]));
        let result = KnowledgeResolver::new(stub.clone())
            .resolve(&Query::new("what is", None))
            .await
            .unwrap();

        assert!(!result.succeeded);
        assert_eq!(stub.call_count(), 0);
    }
}
