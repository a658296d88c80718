use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    /// Three or more underscores mark the gap in a choice prompt.
    pub static ref BLANK_MARKER: Regex = Regex::new(r"_{3,}").expect("blank marker pattern");
}

/// The seven top-level exercise categories, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Verbs,
    Vocabulary,
    Pronouns,
    Existence,
    Story,
    SimplePast,
    Bonus,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Verbs,
        Section::Vocabulary,
        Section::Pronouns,
        Section::Existence,
        Section::Story,
        Section::SimplePast,
        Section::Bonus,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Verbs => "Verbs",
            Section::Vocabulary => "Vocab",
            Section::Pronouns => "Pronouns",
            Section::Existence => "Was/Were",
            Section::Story => "Story",
            Section::SimplePast => "Past Tense",
            Section::Bonus => "Be Verbs",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Verbs => "A. Verb Table",
            Section::Vocabulary => "B. Vocabulary",
            Section::Pronouns => "E. Pronouns Party!",
            Section::Existence => "F. Was & Were!",
            Section::Story => "Story Time",
            Section::SimplePast => "H. Past Tense",
            Section::Bonus => "Be Verbs",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Section::Verbs => "Fill in the missing verb forms.",
            Section::Vocabulary => "Pick the word that completes each sentence.",
            Section::Pronouns => "Fill in with: anybody, nobody, everybody.",
            Section::Existence => "Check the sign (✓/✗) and choose!",
            Section::Story => "Help Alice and Grandpa finish their chat.",
            Section::SimplePast => "Write the verb in the simple past.",
            Section::Bonus => "Choose the correct 'to be' verb.",
        }
    }

    /// Tables and dialogues are read top to bottom; everything else is
    /// presented in a fresh random order on every mount.
    pub fn shuffles(self) -> bool {
        !matches!(self, Section::Verbs | Section::Story)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerbForm {
    Base,
    Past,
    PastParticiple,
    PresentParticiple,
}

impl VerbForm {
    pub const ALL: [VerbForm; 4] = [
        VerbForm::Base,
        VerbForm::Past,
        VerbForm::PastParticiple,
        VerbForm::PresentParticiple,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            VerbForm::Base => "Base Form",
            VerbForm::Past => "Past",
            VerbForm::PastParticiple => "Past Part.",
            VerbForm::PresentParticiple => "-ing Form",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbRow {
    pub id: u32,
    #[serde(rename = "chinese")]
    pub display_hint: String,
    pub base: String,
    pub past: String,
    pub past_participle: String,
    pub present_participle: String,
    pub hidden_fields: Vec<VerbForm>,
}

impl VerbRow {
    pub fn form(&self, form: VerbForm) -> &str {
        match form {
            VerbForm::Base => &self.base,
            VerbForm::Past => &self.past,
            VerbForm::PastParticiple => &self.past_participle,
            VerbForm::PresentParticiple => &self.present_participle,
        }
    }

    pub fn is_hidden(&self, form: VerbForm) -> bool {
        self.hidden_fields.contains(&form)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceHint {
    Check,
    Cross,
}

impl ChoiceHint {
    pub fn symbol(self) -> &'static str {
        match self {
            ChoiceHint::Check => "✓",
            ChoiceHint::Cross => "✗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub id: u32,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub hint: Option<ChoiceHint>,
}

impl ChoiceQuestion {
    /// Splits the prompt around its blank marker. A prompt without a marker
    /// yields the whole text followed by an empty tail.
    pub fn prompt_parts(&self) -> (&str, &str) {
        match BLANK_MARKER.find(&self.question) {
            Some(m) => (&self.question[..m.start()], &self.question[m.end()..]),
            None => (self.question.as_str(), ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyQuestion {
    pub id: u32,
    pub sentence_part1: String,
    pub sentence_part2: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFillQuestion {
    pub id: u32,
    pub parts: Vec<String>,
    pub answers: Vec<String>,
    #[serde(default)]
    pub verb_prompt: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Alice,
    Grandpa,
}

impl Speaker {
    pub fn name(self) -> &'static str {
        match self {
            Speaker::Alice => "Alice",
            Speaker::Grandpa => "Grandpa",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub id: u32,
    pub speaker: Speaker,
    pub text_parts: Vec<String>,
    pub answers: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// Identifies one fill-in position: the question it belongs to and the gap
/// within that question. Verb blanks use the form's column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankKey {
    pub question_id: u32,
    pub blank: usize,
}

impl BlankKey {
    pub fn new(question_id: u32, blank: usize) -> Self {
        Self { question_id, blank }
    }
}

/// How the learner fills a blank: free typing, or picking from the
/// section's option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankKind {
    Text,
    Choice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlankSpec {
    pub key: BlankKey,
    pub expected: String,
    pub kind: BlankKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankStatus {
    Neutral,
    Correct,
    Incorrect,
}

/// Emitted once when an exercise turns perfect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub section: Section,
    pub score: usize,
    pub total: usize,
}

/// One question of any exercise shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Question {
    Verb(VerbRow),
    Vocabulary(VocabularyQuestion),
    Choice(ChoiceQuestion),
    TextFill(TextFillQuestion),
    Dialogue(DialogueLine),
}

impl Question {
    pub fn id(&self) -> u32 {
        match self {
            Question::Verb(row) => row.id,
            Question::Vocabulary(q) => q.id,
            Question::Choice(q) => q.id,
            Question::TextFill(q) => q.id,
            Question::Dialogue(line) => line.id,
        }
    }

    /// The blanks this question contributes, in reading order.
    pub fn blanks(&self) -> Vec<BlankSpec> {
        let id = self.id();
        match self {
            Question::Verb(row) => VerbForm::ALL
                .iter()
                .filter(|form| row.is_hidden(**form))
                .map(|form| BlankSpec {
                    key: BlankKey::new(id, form.index()),
                    expected: row.form(*form).to_string(),
                    kind: BlankKind::Text,
                })
                .collect(),
            Question::Vocabulary(q) => vec![BlankSpec {
                key: BlankKey::new(id, 0),
                expected: q.answer.clone(),
                kind: BlankKind::Choice,
            }],
            Question::Choice(q) => vec![BlankSpec {
                key: BlankKey::new(id, 0),
                expected: q.answer.clone(),
                kind: BlankKind::Choice,
            }],
            Question::TextFill(q) => text_blanks(id, &q.answers),
            Question::Dialogue(line) => text_blanks(id, &line.answers),
        }
    }
}

fn text_blanks(id: u32, answers: &[String]) -> Vec<BlankSpec> {
    answers
        .iter()
        .enumerate()
        .map(|(idx, answer)| BlankSpec {
            key: BlankKey::new(id, idx),
            expected: answer.clone(),
            kind: BlankKind::Text,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Exercise,
    QuitConfirm,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_row() -> VerbRow {
        VerbRow {
            id: 1,
            display_hint: "打".to_string(),
            base: "hit".to_string(),
            past: "hit".to_string(),
            past_participle: "hit".to_string(),
            present_participle: "hitting".to_string(),
            hidden_fields: vec![
                VerbForm::Past,
                VerbForm::PastParticiple,
                VerbForm::PresentParticiple,
            ],
        }
    }

    #[test]
    fn test_section_order_and_count() {
        assert_eq!(Section::COUNT, 7);
        for (i, section) in Section::ALL.iter().enumerate() {
            assert_eq!(section.index(), i);
        }
    }

    #[test]
    fn test_only_tables_and_dialogue_keep_order() {
        assert!(!Section::Verbs.shuffles());
        assert!(!Section::Story.shuffles());
        assert!(Section::Pronouns.shuffles());
        assert!(Section::SimplePast.shuffles());
    }

    #[test]
    fn test_verb_blanks_follow_hidden_fields() {
        let blanks = Question::Verb(hit_row()).blanks();
        assert_eq!(blanks.len(), 3);
        assert_eq!(blanks[0].key, BlankKey::new(1, VerbForm::Past.index()));
        assert_eq!(blanks[2].expected, "hitting");
        assert!(blanks.iter().all(|b| b.kind == BlankKind::Text));
    }

    #[test]
    fn test_text_fill_blanks_per_answer() {
        let q = Question::TextFill(TextFillQuestion {
            id: 4,
            parts: vec!["".into(), " we ".into(), " (do) the dishes?".into()],
            answers: vec!["Did".into(), "do".into()],
            verb_prompt: Some("do".into()),
        });
        let blanks = q.blanks();
        assert_eq!(blanks.len(), 2);
        assert_eq!(blanks[1].key, BlankKey::new(4, 1));
        assert_eq!(blanks[0].expected, "Did");
    }

    #[test]
    fn test_choice_blank_is_picker() {
        let q = Question::Choice(ChoiceQuestion {
            id: 2,
            question: "There ___ a shop.".into(),
            answer: "wasn't".into(),
            hint: Some(ChoiceHint::Cross),
        });
        let blanks = q.blanks();
        assert_eq!(blanks.len(), 1);
        assert_eq!(blanks[0].kind, BlankKind::Choice);
    }

    #[test]
    fn test_prompt_parts_split_at_marker() {
        let q = ChoiceQuestion {
            id: 1,
            question: "Can ___ hear me?".into(),
            answer: "anybody".into(),
            hint: None,
        };
        assert_eq!(q.prompt_parts(), ("Can ", " hear me?"));

        let leading = ChoiceQuestion {
            question: "___ likes getting sick.".into(),
            ..q.clone()
        };
        assert_eq!(leading.prompt_parts(), ("", " likes getting sick."));

        let missing = ChoiceQuestion {
            question: "No gap here".into(),
            ..q
        };
        assert_eq!(missing.prompt_parts(), ("No gap here", ""));
    }

    #[test]
    fn test_verb_row_deserializes_from_bank_schema() {
        let json = r#"{"id":3,"chinese":"知道","base":"know","past":"knew",
            "pastParticiple":"known","presentParticiple":"knowing",
            "hiddenFields":["past","pastParticiple"]}"#;
        let row: VerbRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.display_hint, "知道");
        assert_eq!(row.form(VerbForm::PastParticiple), "known");
        assert!(row.is_hidden(VerbForm::Past));
        assert!(!row.is_hidden(VerbForm::PresentParticiple));
    }
}
