#[cfg(test)]
mod ui_integration_tests {
    use crate::models::{BlankKind, Section};
    use crate::ui::{draw_celebration, draw_exercise, draw_menu, draw_quit_confirmation};
    use crate::{App, AppState, QuestionBank};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn test_app(shuffle: bool) -> App {
        App::with_rng(
            QuestionBank::builtin().unwrap(),
            shuffle,
            StdRng::seed_from_u64(11),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    /// Draws the current screen the way the main loop does and returns the
    /// buffer as one string per row.
    fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                match app.state {
                    AppState::Menu => draw_menu(f, &app.progress, app.selected_section),
                    AppState::Exercise => {
                        if let Some(session) = app.session.as_mut() {
                            draw_exercise(f, session, &app.progress);
                        }
                    }
                    AppState::QuitConfirm => draw_quit_confirmation(f, &app.progress),
                }
                draw_celebration(f, &app.celebration);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn screen_contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    fn type_text_answers(app: &mut App) {
        let expected: Vec<String> = app
            .session
            .as_ref()
            .unwrap()
            .controller
            .blanks()
            .iter()
            .map(|b| {
                assert_eq!(b.kind, BlankKind::Text);
                b.expected.clone()
            })
            .collect();
        for answer in expected {
            for c in answer.chars() {
                press(app, KeyCode::Char(c));
            }
            press(app, KeyCode::Tab);
        }
    }

    #[test]
    fn test_menu_shows_sections_and_progress() {
        let mut app = test_app(true);
        let rows = render(&mut app, 80, 24);

        assert!(screen_contains(&rows, "Grammar Garden"));
        assert!(screen_contains(&rows, "★ 0/7"));
        for section in Section::ALL {
            assert!(
                screen_contains(&rows, section.label()),
                "missing {}",
                section.label()
            );
        }
    }

    #[test]
    fn test_exercise_header_shows_score() {
        let mut app = test_app(true);
        press(&mut app, KeyCode::Char('1'));
        let rows = render(&mut app, 100, 40);

        assert!(screen_contains(&rows, Section::Verbs.title()));
        assert!(screen_contains(&rows, "Score 0/15"));
        assert!(!screen_contains(&rows, "Perfect!"));
    }

    #[test]
    fn test_choice_section_lists_options() {
        let mut app = test_app(true);
        press(&mut app, KeyCode::Char('3'));
        let options = app.session.as_ref().unwrap().controller.options().to_vec();
        let rows = render(&mut app, 100, 40);

        for (i, option) in options.iter().enumerate() {
            assert!(screen_contains(&rows, &format!("{} {}", i + 1, option)));
        }
    }

    #[test]
    fn test_wrong_pick_reveals_answer() {
        // Vocabulary, then was/were.
        for menu_key in ['2', '4'] {
            let mut app = test_app(false);
            press(&mut app, KeyCode::Char(menu_key));
            let (expected, wrong, right) = {
                let controller = &app.session.as_ref().unwrap().controller;
                let expected = controller.blanks()[0].expected.clone();
                let options = controller.options();
                let right = options.iter().position(|o| *o == expected).unwrap();
                let wrong = (right + 1) % options.len();
                (expected, wrong, right)
            };
            let reveal = format!("✗→ {}", expected);

            press(&mut app, KeyCode::Char(char::from_digit(wrong as u32 + 1, 10).unwrap()));
            let rows = render(&mut app, 120, 40);
            assert!(screen_contains(&rows, &reveal), "no reveal after key {menu_key}");

            press(&mut app, KeyCode::Char(char::from_digit(right as u32 + 1, 10).unwrap()));
            let rows = render(&mut app, 120, 40);
            assert!(!screen_contains(&rows, &reveal));
        }
    }

    #[test]
    fn test_incorrect_text_blank_reveals_answer() {
        let mut app = test_app(false);
        press(&mut app, KeyCode::Char('6'));
        for c in "xyz".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // Still focused: no verdict yet.
        let rows = render(&mut app, 120, 40);
        assert!(!screen_contains(&rows, "→ didn't hit"));

        press(&mut app, KeyCode::Tab);
        let rows = render(&mut app, 120, 40);
        assert!(screen_contains(&rows, "[xyz_______] ✗"));
        assert!(screen_contains(&rows, "→ didn't hit"));
    }

    #[test]
    fn test_completion_updates_header_and_celebrates() {
        let mut app = test_app(true);
        press(&mut app, KeyCode::Char('1'));
        type_text_answers(&mut app);

        let rows = render(&mut app, 100, 40);
        assert!(screen_contains(&rows, "Score 15/15"));
        assert!(screen_contains(&rows, "★ Perfect!"));
        assert!(screen_contains(&rows, "★ 1/7"));
        assert!(screen_contains(&rows, "Section complete!"));

        app.celebration.deactivate();
        press(&mut app, KeyCode::Esc);
        let rows = render(&mut app, 80, 24);
        assert!(screen_contains(&rows, "★ 1/7"));
        assert!(screen_contains(&rows, "✓"));
        assert!(!screen_contains(&rows, "Section complete!"));
    }

    #[test]
    fn test_quit_confirmation_renders() {
        let mut app = test_app(true);
        press(&mut app, KeyCode::Char('q'));
        let rows = render(&mut app, 80, 24);

        assert!(screen_contains(&rows, "Leave Grammar Garden"));
        assert!(screen_contains(&rows, "You finished 0 of 7 sections."));
        assert!(screen_contains(&rows, "Yes (Quit)"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let mut app = test_app(true);
        press(&mut app, KeyCode::Char('5'));
        render(&mut app, 20, 8);
        app.state = AppState::Menu;
        render(&mut app, 10, 4);
    }
}
