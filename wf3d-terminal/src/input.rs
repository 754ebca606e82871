/// Held-key tracking on top of terminal key events
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use wf3d_core::{Action, InputState};

/// How long a key counts as held after its last press or repeat when the
/// terminal does not report releases. Must outlast the delay before the
/// first auto-repeat, typically 250 to 600 ms.
pub const HOLD_WINDOW: Duration = Duration::from_millis(650);

/// Map a key to the controller action it drives.
pub fn action_for(code: KeyCode) -> Option<Action> {
    use Action::*;

    let action = match code {
        KeyCode::Right => TranslateXPos,
        KeyCode::Left => TranslateXNeg,
        KeyCode::PageUp => TranslateYPos,
        KeyCode::PageDown => TranslateYNeg,
        KeyCode::Up => TranslateZPos,
        KeyCode::Down => TranslateZNeg,
        KeyCode::Home => ScaleYPos,
        KeyCode::End => ScaleYNeg,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => RotateXyPos,
            'z' => RotateXyNeg,
            'd' => RotateXzPos,
            'a' => RotateXzNeg,
            'w' => RotateYzPos,
            's' => RotateYzNeg,
            'l' => ScaleXPos,
            'j' => ScaleXNeg,
            'i' => ScaleZPos,
            'k' => ScaleZNeg,
            'r' => Reset,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// Whether a key event asks the viewer to exit.
pub fn is_quit(event: &KeyEvent) -> bool {
    event.kind != KeyEventKind::Release
        && (event.code == KeyCode::Esc
            || (event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)))
}

/// Tracks which actions are currently held
pub struct KeyTracker {
    last_seen: HashMap<Action, Instant>,
    reports_release: bool,
    hold_window: Duration,
}

impl KeyTracker {
    /// `reports_release` is true when the terminal sends key release events.
    pub fn new(reports_release: bool) -> Self {
        Self {
            last_seen: HashMap::new(),
            reports_release,
            hold_window: HOLD_WINDOW,
        }
    }

    pub fn with_hold_window(mut self, hold_window: Duration) -> Self {
        self.hold_window = hold_window;
        self
    }

    pub fn handle(&mut self, event: &KeyEvent, now: Instant) {
        let Some(action) = action_for(event.code) else {
            return;
        };

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(action, now);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&action);
            }
        }
    }

    /// Actions held at `now`.
    pub fn snapshot(&mut self, now: Instant) -> InputState {
        if !self.reports_release {
            let window = self.hold_window;
            self.last_seen
                .retain(|_, seen| now.saturating_duration_since(*seen) <= window);
        }
        self.last_seen.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_every_action_has_a_key() {
        let codes = [
            KeyCode::Right,
            KeyCode::Left,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Home,
            KeyCode::End,
        ]
        .into_iter()
        .chain("qzdawsljikr".chars().map(KeyCode::Char));

        let mapped: std::collections::HashSet<_> = codes.filter_map(action_for).collect();
        assert_eq!(mapped.len(), Action::COUNT);
    }

    #[test]
    fn test_press_and_release() {
        let mut tracker = KeyTracker::new(true);
        let t0 = Instant::now();
        tracker.handle(&key(KeyCode::Char('r'), KeyEventKind::Press), t0);

        let later = t0 + Duration::from_secs(5);
        assert!(tracker.snapshot(later).is_held(Action::Reset));

        tracker.handle(&key(KeyCode::Char('r'), KeyEventKind::Release), later);
        assert!(!tracker.snapshot(later).is_held(Action::Reset));
    }

    #[test]
    fn test_hold_window_without_release_events() {
        let mut tracker = KeyTracker::new(false);
        let t0 = Instant::now();
        tracker.handle(&key(KeyCode::Up, KeyEventKind::Press), t0);

        assert!(tracker.snapshot(t0 + HOLD_WINDOW / 2).is_held(Action::TranslateZPos));
        assert!(!tracker.snapshot(t0 + HOLD_WINDOW * 2).is_held(Action::TranslateZPos));
    }

    #[test]
    fn test_held_key_survives_repeat_delay() {
        let mut tracker = KeyTracker::new(false);
        let t0 = Instant::now();
        tracker.handle(&key(KeyCode::Char('w'), KeyEventKind::Press), t0);

        // no repeat yet: the terminal is still waiting out its repeat delay
        let before_repeat = t0 + Duration::from_millis(500);
        assert!(tracker.snapshot(before_repeat).is_held(Action::RotateYzPos));

        tracker.handle(&key(KeyCode::Char('w'), KeyEventKind::Repeat), before_repeat);
        let between_repeats = before_repeat + Duration::from_millis(40);
        assert!(tracker.snapshot(between_repeats).is_held(Action::RotateYzPos));
    }

    #[test]
    fn test_custom_hold_window() {
        let mut tracker = KeyTracker::new(false).with_hold_window(Duration::from_millis(50));
        let t0 = Instant::now();
        tracker.handle(&key(KeyCode::Left, KeyEventKind::Press), t0);

        assert!(tracker.snapshot(t0 + Duration::from_millis(40)).is_held(Action::TranslateXNeg));
        assert!(!tracker.snapshot(t0 + Duration::from_millis(60)).is_held(Action::TranslateXNeg));
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&key(KeyCode::Esc, KeyEventKind::Press)));
        let mut ctrl_c = key(KeyCode::Char('c'), KeyEventKind::Press);
        assert!(!is_quit(&ctrl_c));
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        assert!(is_quit(&ctrl_c));
        assert!(!is_quit(&key(KeyCode::Char('q'), KeyEventKind::Press)));
    }
}
