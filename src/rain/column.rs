//! Column state: one falling trail and the policy that respawns it.

use crate::error::{RainError, Result};
use rand::Rng;
use std::ops::RangeInclusive;

/// Animation state of a single grid column.
///
/// The trail covers rows `position..position + length`; `position` is the
/// top of the trail and may lie above or below the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Row of the top of the trail.
    pub position: i32,
    /// Rows advanced per tick, at least 1.
    pub speed: u16,
    /// Rows covered by the trail, at least 1.
    pub length: u16,
}

impl Column {
    /// Create a column.
    ///
    /// # Panics
    /// Panics if `speed` or `length` is 0.
    pub fn new(position: i32, speed: u16, length: u16) -> Self {
        assert!(speed >= 1, "Column speed must be at least 1");
        assert!(length >= 1, "Column length must be at least 1");
        Self {
            position,
            speed,
            length,
        }
    }

    /// Whether the trail covers `row`.
    #[inline]
    pub fn is_active(&self, row: i32) -> bool {
        self.position <= row && row < self.position + i32::from(self.length)
    }

    /// The leading (lowest) row of the trail.
    #[inline]
    pub fn head(&self) -> i32 {
        self.position + i32::from(self.length) - 1
    }

    /// Move the trail down by `speed` rows.
    #[inline]
    pub fn advance(&mut self) {
        self.position = self.position.saturating_add(i32::from(self.speed));
    }

    /// Whether the trail has scrolled past a grid of `height` rows.
    #[inline]
    pub fn is_past(&self, height: u16) -> bool {
        self.position > i32::from(height)
    }
}

/// Ranges a column is respawned from.
///
/// All ranges are inclusive. Validation guarantees a fresh column always
/// starts above row 0 and always makes progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPolicy {
    position: RangeInclusive<i32>,
    speed: RangeInclusive<u16>,
    length: RangeInclusive<u16>,
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            position: -50..=-10,
            speed: 1..=3,
            length: 5..=15,
        }
    }
}

impl ResetPolicy {
    /// Build a validated policy.
    pub fn new(
        position: RangeInclusive<i32>,
        speed: RangeInclusive<u16>,
        length: RangeInclusive<u16>,
    ) -> Result<Self> {
        if position.is_empty() || speed.is_empty() || length.is_empty() {
            return Err(RainError::Policy("ranges must not be empty".to_string()));
        }
        if *position.end() >= 0 {
            return Err(RainError::Policy(format!(
                "spawn position must be above row 0, got {position:?}"
            )));
        }
        if *speed.start() == 0 {
            return Err(RainError::Policy("speed must be at least 1".to_string()));
        }
        if *length.start() == 0 {
            return Err(RainError::Policy("length must be at least 1".to_string()));
        }
        Ok(Self {
            position,
            speed,
            length,
        })
    }

    /// Spawn position range.
    pub const fn position(&self) -> &RangeInclusive<i32> {
        &self.position
    }

    /// Speed range.
    pub const fn speed(&self) -> &RangeInclusive<u16> {
        &self.speed
    }

    /// Trail length range.
    pub const fn length(&self) -> &RangeInclusive<u16> {
        &self.length
    }

    /// Draw a fresh column.
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Column {
        Column {
            position: rng.gen_range(self.position.clone()),
            speed: rng.gen_range(self.speed.clone()),
            length: rng.gen_range(self.length.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_active_rows() {
        let column = Column::new(2, 1, 3);
        assert!(!column.is_active(1));
        assert!(column.is_active(2));
        assert!(column.is_active(4));
        assert!(!column.is_active(5));
        assert_eq!(column.head(), 4);
    }

    #[test]
    fn test_active_above_screen() {
        let column = Column::new(-3, 1, 4);
        assert!(column.is_active(0));
        assert!(!column.is_active(1));
    }

    #[test]
    #[should_panic]
    fn test_zero_speed_rejected() {
        Column::new(0, 0, 3);
    }

    #[test]
    fn test_advance_and_past() {
        let mut column = Column::new(3, 2, 4);
        column.advance();
        assert_eq!(column.position, 5);
        assert!(!column.is_past(5));
        column.advance();
        assert!(column.is_past(5));
    }

    #[test]
    fn test_spawn_within_default_ranges() {
        let policy = ResetPolicy::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen_min_speed = false;
        let mut seen_max_speed = false;
        for _ in 0..10_000 {
            let column = policy.spawn(&mut rng);
            assert!((-50..=-10).contains(&column.position));
            assert!((1..=3).contains(&column.speed));
            assert!((5..=15).contains(&column.length));
            seen_min_speed |= column.speed == 1;
            seen_max_speed |= column.speed == 3;
        }
        // Inclusive bounds are actually reachable
        assert!(seen_min_speed && seen_max_speed);
    }

    #[test]
    fn test_spawn_bounds_are_inclusive() {
        let policy = ResetPolicy::default();
        let mut rng = StdRng::seed_from_u64(5);
        let spawned: Vec<Column> = (0..20_000).map(|_| policy.spawn(&mut rng)).collect();
        assert!(spawned.iter().any(|c| c.position == -50));
        assert!(spawned.iter().any(|c| c.position == -10));
        assert!(spawned.iter().any(|c| c.length == 5));
        assert!(spawned.iter().any(|c| c.length == 15));
    }

    #[test]
    fn test_policy_validation() {
        assert!(ResetPolicy::new(-5..=-1, 1..=1, 1..=1).is_ok());
        assert!(matches!(
            ResetPolicy::new(-5..=0, 1..=2, 1..=2),
            Err(RainError::Policy(_))
        ));
        assert!(ResetPolicy::new(-5..=-1, 0..=2, 1..=2).is_err());
        assert!(ResetPolicy::new(-5..=-1, 1..=2, 0..=2).is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let empty = ResetPolicy::new(-1..=-5, 1..=2, 1..=2);
        assert!(empty.is_err());
    }

    #[test]
    fn test_degenerate_policy_is_fixed() {
        let policy = ResetPolicy::new(-2..=-2, 1..=1, 2..=2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..10 {
            assert_eq!(policy.spawn(&mut rng), Column::new(-2, 1, 2));
        }
    }
}
