pub mod app;
pub mod bank;
pub mod celebration;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod exercise;
pub mod logger;
pub mod models;
pub mod progress;
pub mod session;
pub mod terminal;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use app::App;
pub use bank::{ExerciseSet, QuestionBank};
pub use celebration::{Celebration, CELEBRATION_DURATION};
pub use config::AppConfig;
pub use error::{BankError, Result};
pub use evaluator::{answers_match, normalize};
pub use exercise::ExerciseController;
pub use models::{
    AppState, BlankKey, BlankKind, BlankSpec, BlankStatus, Completion, Question, Section,
};
pub use progress::ProgressTracker;
pub use session::{handle_exercise_input, ExerciseSession};
pub use terminal::TerminalGuard;
pub use ui::{draw_celebration, draw_exercise, draw_menu, draw_quit_confirmation};
