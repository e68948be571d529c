use rand::Rng;
use rand::rngs::ThreadRng;

use crate::model::idea::MAX_RATING;

/// Canned feedback, one per bracket of ten. Index 9 covers 90..=100.
const FEEDBACK: [&str; 10] = [
    "💀 \"Even AI couldn't find anything positive here. Time for Plan B!\"",
    "😱 \"This is... creative? Maybe try a different approach entirely.\"",
    "😬 \"Oof, this needs major improvements. What's your backup plan?\"",
    "🤨 \"This idea has some holes. Maybe pivot to something else?\"",
    "😅 \"Hmm... This might need a complete rethink. Keep brainstorming!\"",
    "😐 \"Not bad, but it's been done before. Think of a twist!\"",
    "🤔 \"Interesting idea. It needs some work, but there's potential.\"",
    "👍 \"Solid concept! With some polish, this could be a winner.\"",
    "💡 \"Wow! This has serious potential. Investors would love this!\"",
    "🚀 \"This idea is absolutely brilliant! You're onto something huge!\"",
];

/// Where new ratings come from.
pub trait RatingSource {
    /// A rating in `0..=MAX_RATING`.
    fn draw_rating(&mut self) -> u8;
}

/// Uniform draw over `0..=100` from any `rand` generator.
#[derive(Debug)]
pub struct RandomRating<R = ThreadRng> {
    rng: R,
}

impl RandomRating<ThreadRng> {
    /// Backed by the thread-local generator.
    pub fn thread_local() -> Self {
        RandomRating { rng: rand::rng() }
    }
}

impl<R: Rng> RandomRating<R> {
    pub fn new(rng: R) -> Self {
        RandomRating { rng }
    }
}

impl<R: Rng> RatingSource for RandomRating<R> {
    fn draw_rating(&mut self) -> u8 {
        self.rng.random_range(0..=MAX_RATING)
    }
}

/// Always yields the same rating (clamped to the valid range).
#[derive(Debug, Clone, Copy)]
pub struct FixedRating(pub u8);

impl RatingSource for FixedRating {
    fn draw_rating(&mut self) -> u8 {
        self.0.min(MAX_RATING)
    }
}

/// Feedback string for a rating. Anything above 100 is treated as 100.
pub fn feedback_for(rating: u8) -> &'static str {
    let bracket = usize::from(rating.min(MAX_RATING) / 10).min(FEEDBACK.len() - 1);
    FEEDBACK[bracket]
}
