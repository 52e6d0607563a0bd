use ratatui::layout::Rect;

// keeps a seek off the exact start and end
pub const PROGRESS_EDGE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Progress,
    Volume,
}

impl DragTarget {
    pub fn clamp(self, fraction: f64) -> f64 {
        let fraction = if fraction.is_finite() { fraction } else { 0.0 };
        match self {
            Self::Progress => fraction.clamp(PROGRESS_EDGE, 1.0 - PROGRESS_EDGE),
            Self::Volume => fraction.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    target: DragTarget,
    fraction: f64,
    was_playing: bool,
}

impl DragGesture {
    pub fn begin(target: DragTarget, fraction: f64, was_playing: bool) -> Self {
        Self {
            target,
            fraction: target.clamp(fraction),
            was_playing,
        }
    }

    pub fn target(&self) -> DragTarget {
        self.target
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn was_playing(&self) -> bool {
        self.was_playing
    }

    pub fn update(&mut self, fraction: f64) -> f64 {
        self.fraction = self.target.clamp(fraction);
        self.fraction
    }
}

pub fn fraction_along(column: u16, track: Rect) -> f64 {
    if track.width <= 1 {
        return 0.0;
    }
    let offset = f64::from(column) - f64::from(track.x);
    offset / f64::from(track.width - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_spans_track_edges() {
        let track = Rect::new(10, 0, 11, 1);
        assert_eq!(fraction_along(10, track), 0.0);
        assert_eq!(fraction_along(20, track), 1.0);
        assert_eq!(fraction_along(15, track), 0.5);
    }

    #[test]
    fn fraction_outside_track_is_unclamped() {
        let track = Rect::new(10, 0, 11, 1);
        assert!(fraction_along(0, track) < 0.0);
        assert!(fraction_along(40, track) > 1.0);
    }

    #[test]
    fn degenerate_track_maps_to_start() {
        assert_eq!(fraction_along(5, Rect::new(5, 0, 1, 1)), 0.0);
        assert_eq!(fraction_along(5, Rect::default()), 0.0);
    }

    #[test]
    fn progress_gesture_keeps_off_the_ends() {
        let mut gesture = DragGesture::begin(DragTarget::Progress, -3.0, true);
        assert_eq!(gesture.fraction(), PROGRESS_EDGE);
        assert_eq!(gesture.update(7.0), 1.0 - PROGRESS_EDGE);
        assert!(gesture.was_playing());
    }

    #[test]
    fn volume_gesture_reaches_the_ends() {
        let mut gesture = DragGesture::begin(DragTarget::Volume, -1.0, false);
        assert_eq!(gesture.fraction(), 0.0);
        assert_eq!(gesture.update(2.0), 1.0);
        assert_eq!(gesture.update(f64::NAN), 0.0);
    }
}
