//! Skills module - vocabulary and keyword extraction

mod extractor;
mod vocabulary;

pub use extractor::SkillExtractor;
pub use vocabulary::{SkillVocabulary, VocabularyError, DEFAULT_SKILLS};
