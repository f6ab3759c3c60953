//! Prompt templates for state extraction

use crate::core::string::truncate;
use crate::evidence::EvidenceSet;
use crate::oracle::ExtractionMode;

/// Snippets longer than this are cut before being shown to the oracle.
const MAX_SNIPPET_CHARS: usize = 600;

/// Templates for the extraction prompts sent to the reasoning oracle
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the given extraction mode
    pub fn extraction_system(mode: ExtractionMode) -> &'static str {
        match mode {
            ExtractionMode::Direct => Self::direct_system(),
            ExtractionMode::CrossValidate => Self::cross_validate_system(),
        }
    }

    /// System prompt for whitelisted evidence
    pub fn direct_system() -> &'static str {
        r#"You are a financial data extraction engine. The search results you receive come from authoritative, whitelisted domains (central banks, wire services, statistics offices, exchanges).

Respond with exactly one JSON object:
{
  "value": "the current value or a short state description",
  "trend": "rising|falling|stable",
  "narrative_context": "one sentence on why the state is what it is",
  "confidence": "whitelist_direct",
  "sources": [{"title": "...", "url": "...", "domain": "..."}]
}

Rules:
1. value: extract the explicit figure when one is given (e.g. "5.25%", "1850 USD/oz"). Use a short description only when no figure exists. Use "unknown" when the results do not establish the state.
2. trend: one of "rising", "falling", "stable".
3. sources: list up to 3 results that support the value, copying their url exactly as shown.
4. Do not use knowledge outside the results. If they are insufficient, answer:
{"value": "unknown", "trend": "stable", "narrative_context": "Not enough information to determine the current state", "confidence": "whitelist_direct", "sources": []}"#
    }

    /// System prompt for open-web evidence requiring cross-validation
    pub fn cross_validate_system() -> &'static str {
        r#"You are a strict financial auditor. The search results come from the open web and may contain stale figures, marketing copy or fabrications. You must cross-validate before accepting any value.

Respond with exactly one JSON object:
{
  "value": "the agreed value, or \"unknown\"",
  "trend": "rising|falling|stable",
  "narrative_context": "one sentence on why the state is what it is",
  "confidence": "cross_validated",
  "sources": [{"title": "...", "url": "...", "domain": "..."}],
  "candidates": [{"value": "...", "sources": [{"url": "..."}]}]
}

Cross-validation rules:
1. A value is acceptable only if it appears, identically, in results from at least 3 different domains. Several pages on one domain count as one domain.
2. sources must list the supporting results from those distinct domains, copying each url exactly as shown.
3. If fewer than 3 distinct domains agree, value must be "unknown" even if you saw a figure.
4. If results disagree, put the best-supported value in value/sources and list the other values with their own sources in candidates.

If validation fails, answer:
{"value": "unknown", "trend": "stable", "narrative_context": "Could not cross-validate across independent sources", "confidence": "cross_validated", "sources": []}"#
    }

    /// User prompt carrying the label and rendered evidence
    pub fn extraction_prompt(label: &str, evidence: &EvidenceSet, mode: ExtractionMode) -> String {
        let scope = match mode {
            ExtractionMode::Direct => "authoritative whitelisted domains",
            ExtractionMode::CrossValidate => "open web, cross-validation required",
        };
        let closing = match mode {
            ExtractionMode::Direct => "Extract the current state of this entity as JSON.",
            ExtractionMode::CrossValidate => {
                "Apply the cross-validation rules strictly. Answer \"unknown\" unless 3 distinct domains agree."
            }
        };

        format!(
            "Entity: {}\n\nSearch results ({}):\n\n{}\n\n{}",
            label,
            scope,
            Self::render_evidence(evidence, mode),
            closing
        )
    }

    /// Numbered evidence blocks.
    ///
    /// Cross-validation mode adds the domain and URL to every block so the
    /// oracle can count domains and cite sources verbatim.
    pub fn render_evidence(evidence: &EvidenceSet, mode: ExtractionMode) -> String {
        if evidence.is_empty() {
            return "(no search results)".to_string();
        }

        evidence
            .results()
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let title = if r.title.trim().is_empty() {
                    "(untitled)"
                } else {
                    r.title.trim()
                };
                let snippet = truncate(r.snippet.trim(), MAX_SNIPPET_CHARS);
                match mode {
                    ExtractionMode::Direct => {
                        format!("[Result {}] {}\n{}\nURL: {}", i + 1, title, snippet, r.url)
                    }
                    ExtractionMode::CrossValidate => format!(
                        "[Result {}] Domain: {}\nTitle: {}\nSnippet: {}\nURL: {}",
                        i + 1,
                        if r.domain.is_empty() { "unknown" } else { r.domain.as_str() },
                        title,
                        snippet,
                        r.url
                    ),
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
