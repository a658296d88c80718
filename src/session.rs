use crate::exercise::ExerciseController;
use crate::models::{AppState, BlankKey, BlankKind, Completion};
use crate::utils::{byte_index, char_len};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

/// A mounted exercise plus the cursor state needed to edit it from the
/// keyboard.
#[derive(Debug)]
pub struct ExerciseSession {
    pub controller: ExerciseController,
    /// Index of the focused blank in presentation order.
    pub focus: usize,
    /// Cursor position in characters within the focused text blank.
    pub cursor: usize,
    pub scroll_y: u16,
}

impl ExerciseSession {
    pub fn new(controller: ExerciseController) -> Self {
        Self {
            controller,
            focus: 0,
            cursor: 0,
            scroll_y: 0,
        }
    }

    pub fn focused_key(&self) -> Option<BlankKey> {
        self.controller.blanks().get(self.focus).map(|b| b.key)
    }

    fn focused_kind(&self) -> Option<BlankKind> {
        self.controller.blanks().get(self.focus).map(|b| b.kind)
    }

    /// Leaves the focused blank (marking it touched) and moves by `delta`,
    /// wrapping at both ends.
    fn move_focus(&mut self, delta: isize) {
        let total = self.controller.total();
        if total == 0 {
            return;
        }
        self.blur();
        self.focus = (self.focus as isize + delta).rem_euclid(total as isize) as usize;
        self.cursor = self
            .focused_key()
            .map(|key| char_len(self.controller.answer(key)))
            .unwrap_or(0);
    }

    pub fn blur(&mut self) {
        if let Some(key) = self.focused_key() {
            self.controller.mark_touched(key);
        }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String, &mut usize)) -> Option<Completion> {
        let key = self.focused_key()?;
        let mut text = self.controller.answer(key).to_string();
        let mut cursor = self.cursor.min(char_len(&text));
        edit(&mut text, &mut cursor);
        self.cursor = cursor;
        self.controller.set_answer(key, text)
    }

    /// Picks an option for the focused choice blank. Picking counts as
    /// leaving the blank, so its status shows immediately.
    fn choose(&mut self, option_idx: usize) -> Option<Completion> {
        let key = self.focused_key()?;
        let option = self.controller.options().get(option_idx)?.clone();
        let completion = self.controller.set_answer(key, option);
        self.controller.mark_touched(key);
        completion
    }

    fn cycle_option(&mut self, forward: bool) -> Option<Completion> {
        let key = self.focused_key()?;
        let options = self.controller.options();
        if options.is_empty() {
            return None;
        }
        let current = options
            .iter()
            .position(|o| o == self.controller.answer(key));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
            (None, true) => 0,
            (None, false) => options.len() - 1,
        };
        self.choose(next)
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, shuffle: bool, rng: &mut R) {
        self.controller.reset(shuffle, rng);
        self.focus = 0;
        self.cursor = 0;
        self.scroll_y = 0;
    }
}

pub fn handle_exercise_input<R: Rng + ?Sized>(
    session: &mut ExerciseSession,
    key: KeyEvent,
    app_state: &mut AppState,
    shuffle: bool,
    rng: &mut R,
) -> Option<Completion> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('r') {
            session.reset(shuffle, rng);
        }
        return None;
    }

    match key.code {
        KeyCode::Esc => {
            session.blur();
            *app_state = AppState::Menu;
            None
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
            session.move_focus(1);
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            session.move_focus(-1);
            None
        }
        code => match session.focused_kind()? {
            BlankKind::Choice => match code {
                KeyCode::Right => session.cycle_option(true),
                KeyCode::Left => session.cycle_option(false),
                KeyCode::Char(c @ '1'..='9') => session.choose(c as usize - '1' as usize),
                _ => None,
            },
            BlankKind::Text => handle_text_key(session, code),
        },
    }
}

fn handle_text_key(session: &mut ExerciseSession, code: KeyCode) -> Option<Completion> {
    match code {
        KeyCode::Char(c) => session.edit_text(|text, cursor| {
            text.insert(byte_index(text, *cursor), c);
            *cursor += 1;
        }),
        KeyCode::Backspace => session.edit_text(|text, cursor| {
            if *cursor > 0 {
                text.remove(byte_index(text, *cursor - 1));
                *cursor -= 1;
            }
        }),
        KeyCode::Delete => session.edit_text(|text, cursor| {
            if *cursor < char_len(text) {
                text.remove(byte_index(text, *cursor));
            }
        }),
        KeyCode::Left => {
            session.cursor = session.cursor.saturating_sub(1);
            None
        }
        KeyCode::Right => {
            let len = session
                .focused_key()
                .map(|key| char_len(session.controller.answer(key)))
                .unwrap_or(0);
            session.cursor = (session.cursor + 1).min(len);
            None
        }
        KeyCode::Home => {
            session.cursor = 0;
            None
        }
        KeyCode::End => {
            session.cursor = session
                .focused_key()
                .map(|key| char_len(session.controller.answer(key)))
                .unwrap_or(0);
            None
        }
        _ => None,
    }
}
