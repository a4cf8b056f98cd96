//! Application state and key handling.

use super::input::{Action, action_for, move_cursor};
use crossterm::event::KeyCode;
use strictly_solo::{GameState, GameStatus, Position, SessionClosed, SessionHandle};
use tokio::sync::watch;
use tracing::debug;

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the application.
    Quit,
}

/// Main application state.
///
/// The game itself lives in the session; the app only keeps the cursor.
pub struct App {
    session: SessionHandle,
    cursor: Position,
}

impl App {
    /// Creates a new application.
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            cursor: Position::Center,
        }
    }

    /// Cell under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Receiver for the states the renderer draws.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.session.subscribe()
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyCode) -> Result<Control, SessionClosed> {
        let Some(action) = action_for(key) else {
            return Ok(Control::Continue);
        };
        debug!(?action, "Key action");

        match action {
            Action::Quit => return Ok(Control::Quit),
            Action::Start => self.session.start()?,
            Action::Reset => self.session.reset()?,
            Action::SelectIndex(index) => self.session.select_index(index)?,
            Action::MoveCursor(arrow) => self.cursor = move_cursor(self.cursor, arrow),
            Action::SelectCursor => {
                if *self.session.state().status() == GameStatus::NotStarted {
                    self.session.start()?;
                } else {
                    self.session.select_cell(self.cursor)?;
                }
            }
        }
        Ok(Control::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_solo::{Delays, GameSession, Muted, Player, ScriptedSelector};

    #[tokio::test(start_paused = true)]
    async fn test_enter_starts_then_selects_cursor() {
        let (session, handle) = GameSession::new(ScriptedSelector::new([0]), Muted, Delays::IMMEDIATE);
        tokio::spawn(session.run());
        let mut app = App::new(handle);
        let mut states = app.subscribe();

        assert_eq!(app.handle_key(KeyCode::Enter).unwrap(), Control::Continue);
        states
            .wait_for(|s| *s.status() == GameStatus::InProgress)
            .await
            .unwrap();

        app.handle_key(KeyCode::Up).unwrap();
        assert_eq!(app.cursor(), Position::TopCenter);
        app.handle_key(KeyCode::Enter).unwrap();
        let state = states
            .wait_for(|s| s.history().len() == 2)
            .await
            .unwrap()
            .clone();
        assert_eq!(state.board().get(Position::TopCenter).player(), Some(Player::X));
        assert_eq!(state.board().get(Position::TopLeft).player(), Some(Player::O));
    }

    #[tokio::test]
    async fn test_quit_key() {
        let (_session, handle) = GameSession::new(ScriptedSelector::default(), Muted, Delays::IMMEDIATE);
        let mut app = App::new(handle);
        assert_eq!(app.handle_key(KeyCode::Char('q')).unwrap(), Control::Quit);
        assert_eq!(app.handle_key(KeyCode::Char('z')).unwrap(), Control::Continue);
    }
}
