pub mod display;
pub mod popularity;
pub mod recommendations;
pub mod similarity;

pub use recommendations::RecommendationService;
pub use similarity::SimilarityRanker;
