use crate::bank::ExerciseSet;
use crate::evaluator::answers_match;
use crate::logger;
use crate::models::{BlankKey, BlankKind, BlankSpec, BlankStatus, Completion, Question, Section};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Answer state for one mounted exercise. Every exercise shape goes
/// through this one controller; shapes only differ in how their blanks
/// are extracted and how they are drawn.
#[derive(Debug)]
pub struct ExerciseController {
    section: Section,
    options: Vec<String>,
    questions: Vec<Question>,
    blanks: Vec<BlankSpec>,
    answers: HashMap<BlankKey, String>,
    touched: HashSet<BlankKey>,
    completed: bool,
}

impl ExerciseController {
    /// Mounts an exercise. Question order is shuffled here (and on reset)
    /// and nowhere else.
    pub fn mount<R: Rng + ?Sized>(set: ExerciseSet, shuffle: bool, rng: &mut R) -> Self {
        let mut controller = Self {
            section: set.section,
            options: set.options,
            questions: set.questions,
            blanks: Vec::new(),
            answers: HashMap::new(),
            touched: HashSet::new(),
            completed: false,
        };
        if shuffle && controller.section.shuffles() {
            controller.questions.shuffle(rng);
        }
        controller.rebuild_blanks();
        logger::log(&format!(
            "Mounted {:?} with {} questions, {} blanks",
            controller.section,
            controller.questions.len(),
            controller.blanks.len()
        ));
        controller
    }

    fn rebuild_blanks(&mut self) {
        self.blanks = self.questions.iter().flat_map(Question::blanks).collect();
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Questions in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Blanks in presentation order.
    pub fn blanks(&self) -> &[BlankSpec] {
        &self.blanks
    }

    pub fn blank(&self, key: BlankKey) -> Option<&BlankSpec> {
        self.blanks.iter().find(|b| b.key == key)
    }

    pub fn kind(&self, key: BlankKey) -> Option<BlankKind> {
        self.blank(key).map(|b| b.kind)
    }

    pub fn answer(&self, key: BlankKey) -> &str {
        self.answers.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Stores the learner's raw input for a blank and re-evaluates the
    /// exercise. Returns the completion event on the transition into the
    /// perfect state, at most once until the next reset.
    pub fn set_answer(&mut self, key: BlankKey, value: impl Into<String>) -> Option<Completion> {
        if self.blank(key).is_none() {
            return None;
        }
        self.answers.insert(key, value.into());
        self.evaluate()
    }

    fn evaluate(&mut self) -> Option<Completion> {
        if self.completed || !self.is_perfect() {
            return None;
        }
        self.completed = true;
        let completion = Completion {
            section: self.section,
            score: self.score(),
            total: self.total(),
        };
        logger::log(&format!(
            "{:?} perfect: {}/{}",
            completion.section, completion.score, completion.total
        ));
        Some(completion)
    }

    /// Records that the learner left a blank. Only affects status display.
    pub fn mark_touched(&mut self, key: BlankKey) {
        if self.blank(key).is_some() {
            self.touched.insert(key);
        }
    }

    pub fn is_touched(&self, key: BlankKey) -> bool {
        self.touched.contains(&key)
    }

    /// Clears answers, touched marks and the completion latch. Earned
    /// section progress lives elsewhere and is not affected.
    pub fn reset<R: Rng + ?Sized>(&mut self, shuffle: bool, rng: &mut R) {
        self.answers.clear();
        self.touched.clear();
        self.completed = false;
        if shuffle && self.section.shuffles() {
            self.questions.shuffle(rng);
            self.rebuild_blanks();
        }
        logger::log(&format!("Reset {:?}", self.section));
    }

    pub fn is_correct(&self, key: BlankKey) -> bool {
        self.blank(key)
            .is_some_and(|b| answers_match(self.answer(key), &b.expected))
    }

    pub fn score(&self) -> usize {
        self.blanks
            .iter()
            .filter(|b| answers_match(self.answer(b.key), &b.expected))
            .count()
    }

    pub fn total(&self) -> usize {
        self.blanks.len()
    }

    /// Every blank currently holds a correct answer. An exercise without
    /// blanks is never perfect.
    pub fn is_perfect(&self) -> bool {
        let total = self.total();
        total > 0 && self.score() == total
    }

    /// True once the completion event has fired in this reset cycle.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn status(&self, key: BlankKey) -> BlankStatus {
        if self.blank(key).is_none() {
            return BlankStatus::Neutral;
        }
        if !self.completed && (!self.is_touched(key) || self.answer(key).trim().is_empty()) {
            return BlankStatus::Neutral;
        }
        if self.is_correct(key) {
            BlankStatus::Correct
        } else {
            BlankStatus::Incorrect
        }
    }
}
