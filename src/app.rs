use crate::bank::QuestionBank;
use crate::celebration::Celebration;
use crate::exercise::ExerciseController;
use crate::logger;
use crate::models::{AppState, Completion, Section};
use crate::progress::ProgressTracker;
use crate::session::{handle_exercise_input, ExerciseSession};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// Everything the terminal shell owns for one run of the quiz.
#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub bank: QuestionBank,
    pub progress: ProgressTracker,
    pub celebration: Celebration,
    pub selected_section: usize,
    pub session: Option<ExerciseSession>,
    pub shuffle: bool,
    pub should_quit: bool,
    rng: StdRng,
}

impl App {
    pub fn new(bank: QuestionBank, shuffle: bool) -> Self {
        Self::with_rng(bank, shuffle, StdRng::from_entropy())
    }

    pub fn with_rng(bank: QuestionBank, shuffle: bool, rng: StdRng) -> Self {
        Self {
            state: AppState::Menu,
            bank,
            progress: ProgressTracker::new(),
            celebration: Celebration::new(),
            selected_section: 0,
            session: None,
            shuffle,
            should_quit: false,
            rng,
        }
    }

    pub fn selected(&self) -> Section {
        Section::ALL[self.selected_section.min(Section::COUNT - 1)]
    }

    /// Mounts a fresh exercise for `section`. Any previous answers are
    /// discarded; section progress is kept.
    pub fn open_section(&mut self, section: Section) {
        let set = self.bank.exercise(section);
        let controller = ExerciseController::mount(set, self.shuffle, &mut self.rng);
        self.selected_section = section.index();
        self.session = Some(ExerciseSession::new(controller));
        self.state = AppState::Exercise;
        logger::log(&format!("Opened section {:?}", section));
    }

    fn record_completion(&mut self, completion: Completion, now: Instant) {
        if completion.score != completion.total {
            return;
        }
        if self.progress.report_section_complete(completion.section) {
            self.celebration.activate(now, &mut self.rng);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => self.handle_menu_key(key),
            AppState::Exercise => {
                let Some(session) = self.session.as_mut() else {
                    self.state = AppState::Menu;
                    return;
                };
                let completion = handle_exercise_input(
                    session,
                    key,
                    &mut self.state,
                    self.shuffle,
                    &mut self.rng,
                );
                if let Some(completion) = completion {
                    self.record_completion(completion, now);
                }
                if self.state != AppState::Exercise {
                    self.session = None;
                }
            }
            AppState::QuitConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let (done, total) = self.progress.completion_fraction();
                    logger::log(&format!("Quit with {}/{} sections complete", done, total));
                    self.should_quit = true;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state = AppState::Menu;
                }
                _ => {}
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_section = self.selected_section.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_section < Section::COUNT - 1 {
                    self.selected_section += 1;
                }
            }
            KeyCode::Enter => self.open_section(self.selected()),
            KeyCode::Char(c @ '1'..='7') => {
                self.open_section(Section::ALL[c as usize - '1' as usize]);
            }
            KeyCode::Esc | KeyCode::Char('q') => self.state = AppState::QuitConfirm,
            _ => {}
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.celebration.tick(now, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlankKind;
    use std::time::Duration;

    fn app() -> App {
        App::with_rng(
            QuestionBank::builtin().unwrap(),
            true,
            StdRng::seed_from_u64(5),
        )
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    /// Answers every blank of the open exercise through the keyboard.
    fn solve_open_exercise(app: &mut App, now: Instant) {
        let plan: Vec<(BlankKind, String, usize)> = {
            let controller = &app.session.as_ref().unwrap().controller;
            controller
                .blanks()
                .iter()
                .map(|b| {
                    let option = controller
                        .options()
                        .iter()
                        .position(|o| crate::evaluator::answers_match(o, &b.expected))
                        .unwrap_or(0);
                    (b.kind, b.expected.clone(), option)
                })
                .collect()
        };
        for (kind, expected, option) in plan {
            match kind {
                BlankKind::Text => {
                    for c in expected.chars() {
                        press(app, KeyCode::Char(c), now);
                    }
                }
                BlankKind::Choice => {
                    let digit = char::from_digit(option as u32 + 1, 10).unwrap();
                    press(app, KeyCode::Char(digit), now);
                }
            }
            press(app, KeyCode::Tab, now);
        }
    }

    #[test]
    fn test_menu_navigation_bounds() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, KeyCode::Up, now);
        assert_eq!(app.selected_section, 0);
        for _ in 0..20 {
            press(&mut app, KeyCode::Down, now);
        }
        assert_eq!(app.selected_section, Section::COUNT - 1);
        assert_eq!(app.selected(), Section::Bonus);
    }

    #[test]
    fn test_enter_mounts_selected_section() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, KeyCode::Down, now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.state, AppState::Exercise);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.controller.section(), Section::Vocabulary);
    }

    #[test]
    fn test_completing_section_celebrates_once() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('1'), now);
        solve_open_exercise(&mut app, now);

        assert!(app.progress.is_complete(Section::Verbs));
        assert_eq!(app.progress.completion_fraction(), (1, 7));
        assert!(app.celebration.is_active());

        // Leave, come back, solve again: no new progress, no new celebration.
        app.celebration.deactivate();
        press(&mut app, KeyCode::Esc, now);
        assert!(app.session.is_none());
        press(&mut app, KeyCode::Char('1'), now);
        assert_eq!(app.session.as_ref().unwrap().controller.score(), 0);
        solve_open_exercise(&mut app, now);
        assert_eq!(app.progress.completion_fraction(), (1, 7));
        assert!(!app.celebration.is_active());
    }

    #[test]
    fn test_every_section_can_be_completed() {
        let mut app = app();
        let now = Instant::now();
        for (i, section) in Section::ALL.iter().enumerate() {
            let digit = char::from_digit(i as u32 + 1, 10).unwrap();
            press(&mut app, KeyCode::Char(digit), now);
            solve_open_exercise(&mut app, now);
            assert!(app.progress.is_complete(*section), "{section:?}");
            press(&mut app, KeyCode::Esc, now);
        }
        assert_eq!(app.progress.completion_fraction(), (7, 7));
    }

    #[test]
    fn test_reset_keeps_progress() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('3'), now);
        solve_open_exercise(&mut app, now);
        app.handle_key(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            now,
        );
        assert_eq!(app.session.as_ref().unwrap().controller.score(), 0);
        assert!(app.progress.is_complete(Section::Pronouns));
    }

    #[test]
    fn test_celebration_expires_on_tick() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('6'), now);
        solve_open_exercise(&mut app, now);
        assert!(app.celebration.is_active());

        app.tick(now + Duration::from_secs(1));
        assert!(app.celebration.is_active());
        app.tick(now + Duration::from_secs(6));
        assert!(!app.celebration.is_active());
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('q'), now);
        assert_eq!(app.state, AppState::QuitConfirm);
        press(&mut app, KeyCode::Char('n'), now);
        assert_eq!(app.state, AppState::Menu);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc, now);
        press(&mut app, KeyCode::Char('y'), now);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_exercise() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('5'), now);
        app.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            now,
        );
        assert!(app.should_quit);
    }
}
