//! Horizontal swipe recognition for touch input

use crate::config::DEFAULT_SWIPE_THRESHOLD;

/// Discrete command produced by a recognized swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved left: show the next slide.
    Advance,
    /// Finger moved right: show the previous slide.
    Retreat,
}

#[derive(Debug, Clone, Copy)]
pub struct SwipeRecognizer {
    threshold: f32,
    start_x: Option<f32>,
    last_x: Option<f32>,
}

impl Default for SwipeRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeRecognizer {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_x: None,
            last_x: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn touch_start(&mut self, x: f32) {
        self.start_x = Some(x);
        self.last_x = Some(x);
    }

    pub fn touch_move(&mut self, x: f32) {
        if self.start_x.is_some() {
            self.last_x = Some(x);
        }
    }

    /// Finish the gesture. Positions are cleared whatever the outcome so a
    /// stale start never leaks into the next touch.
    pub fn touch_end(&mut self) -> Option<Swipe> {
        let start = self.start_x.take();
        let last = self.last_x.take();
        let (start, last) = (start?, last?);

        let distance = start - last;
        if distance > self.threshold {
            Some(Swipe::Advance)
        } else if distance < -self.threshold {
            Some(Swipe::Retreat)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
        self.last_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(
        recognizer: &mut SwipeRecognizer,
        from: f32,
        to: f32,
    ) -> Option<Swipe> {
        recognizer.touch_start(from);
        recognizer.touch_move((from + to) / 2.0);
        recognizer.touch_move(to);
        recognizer.touch_end()
    }

    #[test]
    fn long_left_drag_advances() {
        let mut r = SwipeRecognizer::new(50.0);
        assert_eq!(drag(&mut r, 200.0, 140.0), Some(Swipe::Advance));
    }

    #[test]
    fn long_right_drag_retreats() {
        let mut r = SwipeRecognizer::new(50.0);
        assert_eq!(drag(&mut r, 140.0, 200.0), Some(Swipe::Retreat));
    }

    #[test]
    fn short_drag_and_tap_are_ignored() {
        let mut r = SwipeRecognizer::new(50.0);
        assert_eq!(drag(&mut r, 200.0, 170.0), None);
        assert_eq!(drag(&mut r, 200.0, 150.0), None);

        r.touch_start(10.0);
        assert_eq!(r.touch_end(), None);
    }

    #[test]
    fn state_is_cleared_after_each_gesture() {
        let mut r = SwipeRecognizer::new(50.0);
        assert_eq!(drag(&mut r, 300.0, 100.0), Some(Swipe::Advance));
        assert!(!r.is_tracking());

        // Move and end without a new start must not reuse the old origin.
        r.touch_move(0.0);
        assert_eq!(r.touch_end(), None);
    }

    #[test]
    fn cancel_discards_the_gesture() {
        let mut r = SwipeRecognizer::new(50.0);
        r.touch_start(300.0);
        r.touch_move(0.0);
        r.cancel();
        assert_eq!(r.touch_end(), None);
    }
}
