//! Skill Vocabulary Module
//! The fixed, ordered list of skill keywords searched for in descriptions.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Skills searched for when no vocabulary file is supplied.
pub const DEFAULT_SKILLS: [&str; 10] = [
    "python",
    "sql",
    "excel",
    "power bi",
    "tableau",
    "machine learning",
    "aws",
    "deep learning",
    "pandas",
    "numpy",
];

#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Skill vocabulary is empty")]
    Empty,
    #[error("Skill vocabulary contains a blank entry at position {0}")]
    BlankEntry(usize),
    #[error("Failed to read skills file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Skills file {} is not a JSON array of strings: {source}", path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid skill pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Ordered, lowercase, de-duplicated skill keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    skills: Vec<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SkillVocabulary {
    /// Build a vocabulary, lowercasing entries and keeping the first of any repeats.
    pub fn new<I, S>(skills: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for (idx, skill) in skills.into_iter().enumerate() {
            let skill = skill.as_ref().trim().to_lowercase();
            if skill.is_empty() {
                return Err(VocabularyError::BlankEntry(idx));
            }
            if seen.insert(skill.clone()) {
                ordered.push(skill);
            }
        }

        if ordered.is_empty() {
            return Err(VocabularyError::Empty);
        }
        Ok(Self { skills: ordered })
    }

    /// Load a vocabulary from a JSON array of strings.
    pub fn from_json_file(path: &Path) -> Result<Self, VocabularyError> {
        let raw = fs::read_to_string(path).map_err(|source| VocabularyError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let skills: Vec<String> =
            serde_json::from_str(&raw).map_err(|source| VocabularyError::InvalidFile {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(skills)
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_vocabulary_order() {
        let vocab = SkillVocabulary::default();
        assert_eq!(vocab.len(), 10);
        assert_eq!(vocab.skills()[0], "python");
        assert_eq!(vocab.skills()[3], "power bi");
        assert_eq!(vocab.skills()[9], "numpy");
    }

    #[test]
    fn test_new_lowercases_and_dedupes() {
        let vocab = SkillVocabulary::new(["Rust", " SQL ", "rust", "Power BI"]).unwrap();
        assert_eq!(vocab.skills(), &["rust", "sql", "power bi"]);
        assert!(vocab.contains("power bi"));
        assert!(!vocab.contains("Power BI"));
    }

    #[test]
    fn test_new_rejects_blank_and_empty() {
        assert!(matches!(
            SkillVocabulary::new(["rust", "  "]),
            Err(VocabularyError::BlankEntry(1))
        ));
        assert!(matches!(
            SkillVocabulary::new(Vec::<String>::new()),
            Err(VocabularyError::Empty)
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Go", "Kubernetes", "go"]"#).unwrap();

        let vocab = SkillVocabulary::from_json_file(file.path()).unwrap();
        assert_eq!(vocab.skills(), &["go", "kubernetes"]);
    }

    #[test]
    fn test_from_json_file_rejects_objects() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"skills": ["go"]}}"#).unwrap();

        let err = SkillVocabulary::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, VocabularyError::InvalidFile { .. }));
    }
}
