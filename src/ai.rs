pub mod config;
pub mod fallback;
pub mod prompts;
pub mod upstream;

pub use fallback::{FallbackPool, FallbackSelector, RandomSource, SeededRandom, ThreadRandom};
pub use upstream::UpstreamError;
