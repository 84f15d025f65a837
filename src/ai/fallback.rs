//! Canned replies used when the upstream model cannot answer.

use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::trace;

use crate::category::Category;

const CHAT_REPLIES: &[&str] = &[
    "今天天气不错，适合出去散散步呢。",
    "我理解您的感受，很多人都有类似的经历。",
    "保持积极心态对健康很重要。",
];

const RECIPE_REPLY: &str =
    "推荐燕麦蔬菜粥：燕麦片50g，胡萝卜、青菜适量，煮粥食用，富含膳食纤维。";

const NURSING_HOME_REPLY: &str = "推荐'康乐老年公寓'，环境优美，提供专业护理服务。";

/// The replies available for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPool {
    Single(&'static str),
    Many(&'static [&'static str]),
}

impl FallbackPool {
    pub fn contains(&self, reply: &str) -> bool {
        match self {
            FallbackPool::Single(text) => *text == reply,
            FallbackPool::Many(texts) => texts.iter().any(|text| *text == reply),
        }
    }

    #[cfg(test)]
    fn replies(&self) -> Vec<&'static str> {
        match self {
            FallbackPool::Single(text) => vec![*text],
            FallbackPool::Many(texts) => texts.to_vec(),
        }
    }
}

pub fn fallback_pool(category: Category) -> FallbackPool {
    match category {
        Category::Chat => FallbackPool::Many(CHAT_REPLIES),
        Category::Recipe => FallbackPool::Single(RECIPE_REPLY),
        Category::NursingHome => FallbackPool::Single(NURSING_HOME_REPLY),
    }
}

/// Source of indices for picking among several replies.
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`. `len` is always at least 2.
    fn index(&self, len: usize) -> usize;
}

/// Draws from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible source backed by a seeded [`StdRng`].
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Picks a canned reply for a category.
#[derive(Clone)]
pub struct FallbackSelector {
    source: Arc<dyn RandomSource>,
}

impl FallbackSelector {
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Arc::new(SeededRandom::new(seed)))
    }

    /// Never fails: every pool is non-empty. Single-reply pools skip the
    /// random source entirely.
    pub fn pick(&self, category: Category) -> &'static str {
        match fallback_pool(category) {
            FallbackPool::Single(text) => text,
            FallbackPool::Many([only]) => *only,
            FallbackPool::Many(texts) => {
                let index = self.source.index(texts.len()) % texts.len();
                trace!(%category, index, "Picked fallback reply");
                texts[index]
            }
        }
    }
}

impl Default for FallbackSelector {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl std::fmt::Debug for FallbackSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackSelector").finish_non_exhaustive()
    }
}
