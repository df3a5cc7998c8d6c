use glam::Vec2;

/// Press → drag → release protocol shared by every mouse tool.
///
/// `press` arms the start point; while armed, `update` tracks the cursor
/// (enabling a live preview) and `release` arms the end point (enabling the
/// action). `reset` returns to idle from any state, for completion and for
/// cancellation alike.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TwoPointGesture {
    from: Vec2,
    to: Vec2,
    from_armed: bool,
    to_tracking: bool,
    to_armed: bool,
}

impl TwoPointGesture {
    /// Start a gesture at `at`, discarding any previous one.
    pub fn press(&mut self, at: Vec2) {
        *self = Self {
            from: at,
            to: at,
            from_armed: true,
            to_tracking: false,
            to_armed: false,
        };
    }

    /// Track the cursor. Ignored unless a press is armed.
    pub fn update(&mut self, at: Vec2) {
        if self.from_armed {
            self.to = at;
            self.to_tracking = true;
        }
    }

    /// Finish the gesture at `at`. Ignored unless a press is armed.
    pub fn release(&mut self, at: Vec2) {
        if self.from_armed {
            self.to = at;
            self.to_armed = true;
        }
    }

    /// Back to idle.
    pub fn reset(&mut self) {
        self.from_armed = false;
        self.to_tracking = false;
        self.to_armed = false;
    }

    /// A press has been recorded and not yet reset.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.from_armed
    }

    /// Both ends armed: the action may run.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.from_armed && self.to_armed
    }

    /// `(from, to)` while a preview may be drawn.
    #[must_use]
    pub fn preview(&self) -> Option<(Vec2, Vec2)> {
        (self.from_armed && self.to_tracking).then_some((self.from, self.to))
    }

    /// `(from, to)` of an actionable gesture, resetting it; `None` otherwise.
    pub fn take(&mut self) -> Option<(Vec2, Vec2)> {
        if !self.is_actionable() {
            return None;
        }
        self.reset();
        Some((self.from, self.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_requires_press_and_release() {
        let mut g = TwoPointGesture::default();
        g.release(Vec2::ONE);
        assert!(!g.is_actionable());
        g.update(Vec2::ONE);
        assert_eq!(g.preview(), None);

        g.press(Vec2::ZERO);
        assert!(g.is_armed());
        assert_eq!(g.preview(), None);
        g.update(Vec2::new(3.0, 4.0));
        assert_eq!(g.preview(), Some((Vec2::ZERO, Vec2::new(3.0, 4.0))));
        assert!(!g.is_actionable());

        g.release(Vec2::new(5.0, 6.0));
        assert_eq!(g.take(), Some((Vec2::ZERO, Vec2::new(5.0, 6.0))));
        assert!(!g.is_armed());
        assert_eq!(g.take(), None);
    }

    #[test]
    fn reset_cancels_pending_gesture() {
        let mut g = TwoPointGesture::default();
        g.press(Vec2::ZERO);
        g.update(Vec2::ONE);
        g.reset();
        assert_eq!(g.preview(), None);
        g.release(Vec2::ONE);
        assert_eq!(g.take(), None);
    }

    #[test]
    fn click_without_motion_is_actionable() {
        let mut g = TwoPointGesture::default();
        g.press(Vec2::new(7.0, 7.0));
        g.release(Vec2::new(7.0, 7.0));
        assert_eq!(g.take(), Some((Vec2::splat(7.0), Vec2::splat(7.0))));
    }
}
