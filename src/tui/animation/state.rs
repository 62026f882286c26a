// src/tui/animation/state.rs
use crossterm::event::KeyCode;

/// Playback state. Frames advance on every tick unless paused; after the
/// last frame the final state is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationApp {
    pub frame: usize,
    pub frame_count: usize,
    pub paused: bool,
    pub should_quit: bool,
}

impl AnimationApp {
    #[must_use]
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame: 0,
            frame_count,
            paused: false,
            should_quit: false,
        }
    }

    pub fn on_tick(&mut self) {
        if !self.paused && !self.finished() {
            self.frame += 1;
        }
    }

    #[must_use]
    pub fn finished(&self) -> bool {
        self.frame + 1 >= self.frame_count
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            _ => {}
        }
    }

    #[must_use]
    pub fn status(&self) -> String {
        let state = if self.finished() {
            "done"
        } else if self.paused {
            "paused"
        } else {
            "playing"
        };
        format!(
            " frame {}/{} [{state}]  space: pause  q: quit ",
            (self.frame + 1).min(self.frame_count),
            self.frame_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_last_frame() {
        let mut app = AnimationApp::new(3);
        for _ in 0..10 {
            app.on_tick();
        }
        assert_eq!(app.frame, 2);
        assert!(app.finished());
        assert!(!app.should_quit);
    }

    #[test]
    fn pause_and_quit_keys() {
        let mut app = AnimationApp::new(5);
        app.handle_key(KeyCode::Char(' '));
        app.on_tick();
        assert_eq!(app.frame, 0);
        app.handle_key(KeyCode::Char(' '));
        app.on_tick();
        assert_eq!(app.frame, 1);
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }
}
