//! Keyword extraction against a fixed technology vocabulary. Matching is
//! case-insensitive over tokens parsed from the model name and its tag list;
//! heuristic by nature, no guarantee stronger than "matches the vocabulary".

use crate::ModelRecord;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

lazy_static! {
    // Alphabetic runs plus parameter-count shorthands like "7b".
    static ref TOKEN_RE: Regex = Regex::new(r"[a-zA-Z]+|[0-9]+[bB]").expect("valid regex");
}

pub struct KeywordVocab {
    terms: HashSet<&'static str>,
}

impl Default for KeywordVocab {
    fn default() -> Self {
        let terms: &[&'static str] = &[
            "llm", "gpt", "bert", "transformer", "diffusion", "stable", "flux",
            "whisper", "llama", "mistral", "qwen", "gemma", "phi", "deepseek",
            "vision", "audio", "speech", "text", "image", "video", "multimodal",
            "ocr", "tts", "asr", "embedding", "rag", "agent", "chat", "instruct",
            "finetune", "lora", "gguf", "quantized", "7b", "8b", "13b", "70b",
            "flash", "turbo", "ultra", "pro", "base", "large", "small", "mini",
        ];
        Self { terms: terms.iter().copied().collect() }
    }
}

impl KeywordVocab {
    /// Vocabulary keywords found in one record. A keyword appears at most
    /// once per record no matter how often it occurs.
    pub fn extract(&self, record: &ModelRecord) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        self.scan(&record.name().to_lowercase(), &mut found);
        for tag in &record.tags {
            self.scan(&tag.to_lowercase(), &mut found);
        }
        found
    }

    fn scan(&self, text: &str, found: &mut BTreeSet<String>) {
        for token in TOKEN_RE.find_iter(text) {
            let token = token.as_str();
            if self.terms.contains(token) {
                found.insert(token.to_string());
            }
        }
    }
}
