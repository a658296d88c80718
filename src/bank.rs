use crate::error::{BankError, Result};
use crate::evaluator::normalize;
use crate::models::{
    ChoiceQuestion, DialogueLine, Question, Section, TextFillQuestion, VerbRow,
    VocabularyQuestion, BLANK_MARKER,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_BANK: &str = include_str!("../data/question_bank.json");

/// Questions that share one list of options to pick from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSet<Q> {
    pub options: Vec<String>,
    pub questions: Vec<Q>,
}

/// Every dataset the quiz draws from. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBank {
    pub verbs: Vec<VerbRow>,
    pub vocabulary: OptionSet<VocabularyQuestion>,
    pub pronouns: OptionSet<ChoiceQuestion>,
    pub existence: OptionSet<ChoiceQuestion>,
    pub story: Vec<DialogueLine>,
    pub simple_past: Vec<TextFillQuestion>,
    pub bonus: OptionSet<ChoiceQuestion>,
}

/// The dataset for one section, ready to mount.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub section: Section,
    pub options: Vec<String>,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// The bank compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_BANK)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| BankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let bank: QuestionBank = serde_json::from_str(content)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn validate(&self) -> Result<()> {
        unique_ids(Section::Verbs, self.verbs.iter().map(|row| row.id))?;
        for row in &self.verbs {
            if row.hidden_fields.is_empty() {
                return Err(BankError::NoHiddenFields { id: row.id });
            }
            for form in &row.hidden_fields {
                require_answer(Section::Verbs, row.id, row.form(*form))?;
            }
        }

        let vocab = &self.vocabulary;
        unique_ids(Section::Vocabulary, vocab.questions.iter().map(|q| q.id))?;
        for q in &vocab.questions {
            require_answer(Section::Vocabulary, q.id, &q.answer)?;
            require_option(Section::Vocabulary, q.id, &q.answer, &vocab.options)?;
        }

        for (section, set) in [
            (Section::Pronouns, &self.pronouns),
            (Section::Existence, &self.existence),
            (Section::Bonus, &self.bonus),
        ] {
            validate_choices(section, set)?;
        }

        unique_ids(Section::Story, self.story.iter().map(|line| line.id))?;
        for line in &self.story {
            validate_segments(Section::Story, line.id, &line.text_parts, &line.answers)?;
            if line.hints.len() > line.answers.len() {
                return Err(BankError::TooManyHints {
                    id: line.id,
                    hints: line.hints.len(),
                    blanks: line.answers.len(),
                });
            }
        }

        unique_ids(Section::SimplePast, self.simple_past.iter().map(|q| q.id))?;
        for q in &self.simple_past {
            validate_segments(Section::SimplePast, q.id, &q.parts, &q.answers)?;
        }

        Ok(())
    }

    pub fn exercise(&self, section: Section) -> ExerciseSet {
        let (options, questions) = match section {
            Section::Verbs => (
                Vec::new(),
                self.verbs.iter().cloned().map(Question::Verb).collect(),
            ),
            Section::Vocabulary => (
                self.vocabulary.options.clone(),
                self.vocabulary
                    .questions
                    .iter()
                    .cloned()
                    .map(Question::Vocabulary)
                    .collect(),
            ),
            Section::Pronouns => choice_set(&self.pronouns),
            Section::Existence => choice_set(&self.existence),
            Section::Bonus => choice_set(&self.bonus),
            Section::Story => (
                Vec::new(),
                self.story.iter().cloned().map(Question::Dialogue).collect(),
            ),
            Section::SimplePast => (
                Vec::new(),
                self.simple_past
                    .iter()
                    .cloned()
                    .map(Question::TextFill)
                    .collect(),
            ),
        };

        ExerciseSet {
            section,
            options,
            questions,
        }
    }
}

fn choice_set(set: &OptionSet<ChoiceQuestion>) -> (Vec<String>, Vec<Question>) {
    (
        set.options.clone(),
        set.questions.iter().cloned().map(Question::Choice).collect(),
    )
}

fn validate_choices(section: Section, set: &OptionSet<ChoiceQuestion>) -> Result<()> {
    unique_ids(section, set.questions.iter().map(|q| q.id))?;
    for q in &set.questions {
        let found = BLANK_MARKER.find_iter(&q.question).count();
        if found != 1 {
            return Err(BankError::BlankMarker {
                section,
                id: q.id,
                found,
            });
        }
        require_answer(section, q.id, &q.answer)?;
        require_option(section, q.id, &q.answer, &set.options)?;
    }
    Ok(())
}

fn validate_segments(section: Section, id: u32, parts: &[String], answers: &[String]) -> Result<()> {
    if parts.len() != answers.len() + 1 {
        return Err(BankError::SegmentMismatch {
            section,
            id,
            parts: parts.len(),
            answers: answers.len(),
        });
    }
    for answer in answers {
        require_answer(section, id, answer)?;
    }
    Ok(())
}

fn unique_ids(section: Section, ids: impl Iterator<Item = u32>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(BankError::DuplicateId { section, id });
        }
    }
    Ok(())
}

fn require_answer(section: Section, id: u32, answer: &str) -> Result<()> {
    if normalize(answer).is_empty() {
        return Err(BankError::EmptyAnswer { section, id });
    }
    Ok(())
}

/// Option pickers can only produce listed values, so an answer outside the
/// list would make the section impossible to finish.
fn require_option(section: Section, id: u32, answer: &str, options: &[String]) -> Result<()> {
    let wanted = normalize(answer);
    if options.iter().any(|option| normalize(option) == wanted) {
        Ok(())
    } else {
        Err(BankError::UnknownOption {
            section,
            id,
            answer: answer.to_string(),
        })
    }
}
