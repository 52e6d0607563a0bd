use crate::model::VolumeTier;

pub const DEFAULT_UNMUTE_LEVEL: f32 = 0.7;

const LOW_TIER_CEILING: f32 = 0.25;
const MID_TIER_CEILING: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeControl {
    level: f32,
    last_nonzero: Option<f32>,
}

impl VolumeControl {
    pub fn new(level: f32, last_nonzero: Option<f32>) -> Self {
        let mut control = Self {
            level: 0.0,
            last_nonzero: last_nonzero
                .filter(|value| value.is_finite())
                .map(|value| value.clamp(0.0, 1.0))
                .filter(|value| *value > 0.0),
        };
        control.set(level);
        control
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn last_nonzero(&self) -> Option<f32> {
        self.last_nonzero
    }

    pub fn set(&mut self, fraction: f32) {
        let level = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.level = level;
        if level > 0.0 {
            self.last_nonzero = Some(level);
        }
    }

    pub fn toggle_mute(&mut self) {
        if self.level > 0.0 {
            self.last_nonzero = Some(self.level);
            self.level = 0.0;
        } else {
            self.level = self.last_nonzero.unwrap_or(DEFAULT_UNMUTE_LEVEL);
        }
    }

    pub fn tier(&self) -> VolumeTier {
        tier_for(self.level)
    }
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::new(1.0, None)
    }
}

pub fn tier_for(level: f32) -> VolumeTier {
    if level <= 0.0 {
        VolumeTier::Muted
    } else if level < LOW_TIER_CEILING {
        VolumeTier::Low
    } else if level < MID_TIER_CEILING {
        VolumeTier::Mid
    } else {
        VolumeTier::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prop_assert;
    use proptest::prop_assert_eq;

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_for(0.0), VolumeTier::Muted);
        assert_eq!(tier_for(0.01), VolumeTier::Low);
        assert_eq!(tier_for(0.2499), VolumeTier::Low);
        assert_eq!(tier_for(0.25), VolumeTier::Mid);
        assert_eq!(tier_for(0.5999), VolumeTier::Mid);
        assert_eq!(tier_for(0.6), VolumeTier::High);
        assert_eq!(tier_for(1.0), VolumeTier::High);
    }

    #[test]
    fn set_clamps_out_of_range() {
        let mut volume = VolumeControl::default();
        volume.set(1.8);
        assert_eq!(volume.level(), 1.0);
        volume.set(-0.3);
        assert_eq!(volume.level(), 0.0);
        volume.set(f32::NAN);
        assert_eq!(volume.level(), 0.0);
    }

    #[test]
    fn unmute_without_history_uses_default() {
        let mut volume = VolumeControl::new(0.0, None);
        volume.toggle_mute();
        assert_eq!(volume.level(), DEFAULT_UNMUTE_LEVEL);
    }

    #[test]
    fn mute_then_unmute_restores_level() {
        let mut volume = VolumeControl::new(0.42, None);
        volume.toggle_mute();
        assert_eq!(volume.level(), 0.0);
        assert_eq!(volume.tier(), VolumeTier::Muted);
        volume.toggle_mute();
        assert_eq!(volume.level(), 0.42);
    }

    #[test]
    fn restored_previous_level_survives_reload() {
        let mut volume = VolumeControl::new(0.0, Some(0.33));
        volume.toggle_mute();
        assert_eq!(volume.level(), 0.33);
    }

    proptest::proptest! {
        #[test]
        fn set_zero_then_unmute_restores_exact_level(level in 0.0001f32..=1.0) {
            let mut volume = VolumeControl::default();
            volume.set(level);
            volume.set(0.0);
            volume.toggle_mute();
            prop_assert_eq!(volume.level(), level);
        }

        #[test]
        fn level_is_always_a_fraction(input in proptest::num::f32::ANY) {
            let mut volume = VolumeControl::default();
            volume.set(input);
            prop_assert!((0.0..=1.0).contains(&volume.level()));
        }
    }
}
