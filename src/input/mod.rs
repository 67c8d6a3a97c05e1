//! Input mapping - keyboard events to queued actions and immediate
//! commands.
//!
//! Two tiers on purpose: actions go through the engine's queue (one per
//! tick), while lifecycle commands are applied immediately so they work
//! even when the queue is backed up.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::GameAction;

/// Immediate state-machine commands, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Pause while playing; start or continue otherwise.
    StartPauseToggle,
    Cancel,
    Quit,
}

/// Map a key event to a queueable action.
///
/// Rotation is clockwise by default and counter-clockwise with Ctrl held.
/// The hard-drop key ignores terminal auto-repeat: one press, one drop.
pub fn map_action(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Repeat && key.code == KeyCode::Char(' ') {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                Some(GameAction::RotateCcw)
            } else {
                Some(GameAction::RotateCw)
            }
        }
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        _ => None,
    }
}

/// Map a key event to an immediate command.
pub fn map_command(key: KeyEvent) -> Option<GameCommand> {
    match key.code {
        KeyCode::Enter => Some(GameCommand::StartPauseToggle),
        KeyCode::Esc => Some(GameCommand::Cancel),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameCommand::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameCommand::Quit)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_action(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            map_action(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            map_action(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::SoftDrop)
        );
    }

    #[test]
    fn test_rotation_modifier_picks_the_direction() {
        assert_eq!(
            map_action(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            map_action(KeyEvent::new(KeyCode::Up, KeyModifiers::CONTROL)),
            Some(GameAction::RotateCcw)
        );
    }

    #[test]
    fn test_hard_drop_ignores_auto_repeat() {
        assert_eq!(
            map_action(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
        let mut repeat = KeyEvent::from(KeyCode::Char(' '));
        repeat.kind = KeyEventKind::Repeat;
        assert_eq!(map_action(repeat), None);

        // Movement keys do auto-repeat.
        let mut left_repeat = KeyEvent::from(KeyCode::Left);
        left_repeat.kind = KeyEventKind::Repeat;
        assert_eq!(map_action(left_repeat), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_commands() {
        assert_eq!(
            map_command(KeyEvent::from(KeyCode::Enter)),
            Some(GameCommand::StartPauseToggle)
        );
        assert_eq!(
            map_command(KeyEvent::from(KeyCode::Esc)),
            Some(GameCommand::Cancel)
        );
        assert_eq!(
            map_command(KeyEvent::from(KeyCode::Char('q'))),
            Some(GameCommand::Quit)
        );
        assert_eq!(
            map_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameCommand::Quit)
        );
        assert_eq!(map_command(KeyEvent::from(KeyCode::Char('x'))), None);
    }
}
