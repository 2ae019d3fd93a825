//! Skill Extractor Module
//! Detects which vocabulary skills a description mentions as whole words.

use regex::Regex;

use super::vocabulary::{SkillVocabulary, VocabularyError};

/// Whole-word, case-insensitive keyword matcher over a fixed vocabulary.
pub struct SkillExtractor {
    skills: Vec<String>,
    patterns: Vec<Regex>,
}

impl SkillExtractor {
    /// Compile one word-bounded pattern per vocabulary entry.
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self, VocabularyError> {
        let patterns = vocabulary
            .skills()
            .iter()
            .map(|skill| Regex::new(&format!(r"\b{}\b", regex::escape(skill))))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skills: vocabulary.skills().to_vec(),
            patterns,
        })
    }

    /// Skills present in `text`, in vocabulary order.
    pub fn extract(&self, text: &str) -> Vec<&str> {
        self.extract_indices(text)
            .into_iter()
            .map(|idx| self.skills[idx].as_str())
            .collect()
    }

    /// Vocabulary positions of the skills present in `text`.
    pub fn extract_indices(&self, text: &str) -> Vec<usize> {
        let text = text.to_lowercase();
        self.patterns
            .iter()
            .enumerate()
            .filter(|(_, pattern)| pattern.is_match(&text))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }
}
