//! Companion mood meter, bounded to `[0, max]`.
//!
//! Only two things move it: a mood-boost purchase raises it, finishing a
//! digging level lowers it.
use crate::catalog::UpgradeId;
use crate::config::MoodConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mood {
    value: u32,
    max: u32,
    boost_step: u32,
    decay_step: u32,
}

impl Mood {
    /// A full meter.
    pub fn new(config: &MoodConfig) -> Self {
        Self {
            value: config.max,
            max: config.max,
            boost_step: UpgradeId::ImproveMood.magnitude() as u32,
            decay_step: config.decay_per_level,
        }
    }

    /// A meter restored from saved progress; out-of-range values are clamped.
    pub fn with_value(config: &MoodConfig, value: u32) -> Self {
        let mut mood = Self::new(config);
        mood.value = value.min(mood.max);
        mood
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }

    /// Returns the new value.
    pub fn boost(&mut self) -> u32 {
        self.value = self.value.saturating_add(self.boost_step).min(self.max);
        self.value
    }

    /// Returns the new value.
    pub fn decay(&mut self) -> u32 {
        self.value = self.value.saturating_sub(self.decay_step);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full() {
        let mood = Mood::new(&MoodConfig::default());
        assert_eq!(mood.value(), 100);
        assert!(mood.is_full());
    }

    #[test]
    fn boost_clamps_at_max() {
        let mut mood = Mood::with_value(&MoodConfig::default(), 90);
        assert_eq!(mood.boost(), 100);
        assert_eq!(mood.boost(), 100);
    }

    #[test]
    fn decay_clamps_at_zero() {
        let mut mood = Mood::with_value(&MoodConfig::default(), 7);
        assert_eq!(mood.decay(), 2);
        assert_eq!(mood.decay(), 0);
        assert_eq!(mood.decay(), 0);
    }

    #[test]
    fn restored_value_is_clamped() {
        let mood = Mood::with_value(&MoodConfig::default(), 9_999);
        assert_eq!(mood.value(), 100);
    }
}
