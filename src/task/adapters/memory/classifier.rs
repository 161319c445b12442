//! Deterministic lane classifier adapters.

use crate::task::{
    domain::Lane,
    ports::{ClassifierError, ClassifierResult, LaneClassifier},
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const MORNING_CUES: [&str; 8] = [
    "morning",
    "breakfast",
    "workout",
    "gym",
    "run",
    "jog",
    "commute",
    "inbox",
];
const MIDDAY_CUES: [&str; 7] = [
    "lunch", "meeting", "call", "errand", "noon", "standup", "review",
];
const EVENING_CUES: [&str; 8] = [
    "evening", "dinner", "night", "read", "relax", "journal", "cook", "movie",
];

/// Classifier that places tasks by cue words in their text.
///
/// Each lane has a fixed word list; the lane with the most matching words
/// wins, earlier lanes winning ties. Text without any cue is undecided.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordLaneClassifier;

impl KeywordLaneClassifier {
    /// Creates the classifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn score(words: &[String], cues: &[&str]) -> usize {
        words
            .iter()
            .filter(|word| cues.contains(&word.as_str()))
            .count()
    }
}

#[async_trait]
impl LaneClassifier for KeywordLaneClassifier {
    async fn classify(&self, text: &str) -> ClassifierResult<Lane> {
        let words: Vec<String> = text
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect();
        if words.is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let scores = [
            (Lane::Morning, Self::score(&words, &MORNING_CUES)),
            (Lane::Midday, Self::score(&words, &MIDDAY_CUES)),
            (Lane::Evening, Self::score(&words, &EVENING_CUES)),
        ];
        let best = scores
            .iter()
            .fold(None::<(Lane, usize)>, |best, &(lane, hits)| match best {
                Some((_, best_hits)) if best_hits >= hits => best,
                _ if hits > 0 => Some((lane, hits)),
                _ => best,
            });

        best.map(|(lane, _)| lane)
            .ok_or_else(|| ClassifierError::Undecided(text.to_owned()))
    }
}

/// Classifier replaying a queue of prepared answers.
///
/// Every call records the text it was given. When the queue is empty the
/// classifier reports itself undecided.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLaneClassifier {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    answers: VecDeque<ClassifierResult<Lane>>,
    inputs: Vec<String>,
}

impl ScriptedLaneClassifier {
    /// Creates a classifier with no prepared answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an answer for a later call.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Backend`] when the internal lock is
    /// poisoned.
    pub fn push_answer(&self, answer: ClassifierResult<Lane>) -> ClassifierResult<()> {
        let mut state = self.lock()?;
        state.answers.push_back(answer);
        Ok(())
    }

    /// Returns the texts received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Backend`] when the internal lock is
    /// poisoned.
    pub fn inputs(&self) -> ClassifierResult<Vec<String>> {
        Ok(self.lock()?.inputs.clone())
    }

    fn lock(&self) -> ClassifierResult<std::sync::MutexGuard<'_, ScriptState>> {
        self.state
            .lock()
            .map_err(|err| ClassifierError::backend(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl LaneClassifier for ScriptedLaneClassifier {
    async fn classify(&self, text: &str) -> ClassifierResult<Lane> {
        let mut state = self.lock()?;
        state.inputs.push(text.to_owned());
        state
            .answers
            .pop_front()
            .unwrap_or_else(|| Err(ClassifierError::Undecided(text.to_owned())))
    }
}
