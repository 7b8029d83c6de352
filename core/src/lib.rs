pub mod cache;
pub mod model;
pub mod persist;
pub mod ranker;
pub mod stats;
pub mod tokenizer;

pub use cache::CachedExtractor;
pub use model::{FeatureId, VocabularyModel};
pub use ranker::{KeywordExtractor, KeywordRanking, Keyword, SparseScoreVector, DEFAULT_TOP_N};
pub use stats::{TextStatistics, WordFrequency};
