//! Column field: every column of the grid, advanced in lockstep ticks.

use super::column::{Column, ResetPolicy};
use crate::error::{RainError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The animation state of the whole grid, one [`Column`] per terminal column.
///
/// Columns are advanced together but reset independently, so they drift
/// apart over time into staggered rainfall.
#[derive(Debug, Clone)]
pub struct ColumnField<R = StdRng> {
    columns: Vec<Column>,
    width: u16,
    height: u16,
    policy: ResetPolicy,
    rng: R,
    /// Total resets since construction.
    resets: u64,
}

impl ColumnField<StdRng> {
    /// Field with the default policy, seeded from OS entropy.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::with_rng(width, height, ResetPolicy::default(), StdRng::from_entropy())
    }

    /// Field with the default policy and a fixed seed.
    pub fn seeded(width: u16, height: u16, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, ResetPolicy::default(), StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ColumnField<R> {
    /// Field whose columns are all freshly spawned from `policy`.
    pub fn with_rng(width: u16, height: u16, policy: ResetPolicy, mut rng: R) -> Result<Self> {
        check_dimensions(width, height)?;
        let columns = (0..width).map(|_| policy.spawn(&mut rng)).collect();
        Ok(Self {
            columns,
            width,
            height,
            policy,
            rng,
            resets: 0,
        })
    }

    /// Field starting from explicit column states.
    ///
    /// `policy` and `rng` are used for every later reset.
    pub fn from_columns(
        columns: Vec<Column>,
        height: u16,
        policy: ResetPolicy,
        rng: R,
    ) -> Result<Self> {
        let width = u16::try_from(columns.len()).map_err(|_| RainError::Dimensions {
            width: u16::MAX,
            height,
        })?;
        check_dimensions(width, height)?;
        Ok(Self {
            columns,
            width,
            height,
            policy,
            rng,
            resets: 0,
        })
    }

    /// Number of columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Number of visible rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// All column states, left to right.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// State of column `col`.
    #[inline]
    pub fn column(&self, col: u16) -> Option<&Column> {
        self.columns.get(usize::from(col))
    }

    /// The policy used for resets.
    pub const fn policy(&self) -> &ResetPolicy {
        &self.policy
    }

    /// Total number of column resets since construction.
    pub const fn reset_count(&self) -> u64 {
        self.resets
    }

    /// Whether the trail of column `col` covers `row`.
    #[inline]
    pub fn is_active(&self, col: u16, row: u16) -> bool {
        self.column(col)
            .is_some_and(|column| column.is_active(i32::from(row)))
    }

    /// Respawn column `col` above the screen, returning its new state.
    pub fn reset(&mut self, col: u16) -> Option<Column> {
        let column = self.columns.get_mut(usize::from(col))?;
        *column = self.policy.spawn(&mut self.rng);
        self.resets += 1;
        Some(*column)
    }

    /// Advance every column by its speed, resetting those that fell past
    /// the bottom. Returns the number of columns reset.
    pub fn advance_all(&mut self) -> usize {
        let height = self.height;
        let mut reset = 0;
        for column in &mut self.columns {
            column.advance();
            if column.is_past(height) {
                *column = self.policy.spawn(&mut self.rng);
                reset += 1;
            }
        }
        self.resets += reset as u64;
        reset
    }

    /// Adapt to new grid dimensions.
    ///
    /// Surviving columns keep their state; added columns are spawned fresh.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        check_dimensions(width, height)?;
        let width_usize = usize::from(width);
        if width_usize > self.columns.len() {
            let extra = width_usize - self.columns.len();
            for _ in 0..extra {
                let column = self.policy.spawn(&mut self.rng);
                self.columns.push(column);
            }
        } else {
            self.columns.truncate(width_usize);
        }
        self.width = width;
        self.height = height;
        Ok(())
    }
}

fn check_dimensions(width: u16, height: u16) -> Result<()> {
    if width == 0 || height == 0 {
        Err(RainError::Dimensions { width, height })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_policy() -> ResetPolicy {
        ResetPolicy::new(-2..=-2, 1..=1, 2..=2).unwrap()
    }

    #[test]
    fn test_new_field_starts_above_screen() {
        let field = ColumnField::seeded(80, 24, 3).unwrap();
        assert_eq!(field.width(), 80);
        assert_eq!(field.columns().len(), 80);
        for column in field.columns() {
            assert!((-50..=-10).contains(&column.position));
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            ColumnField::seeded(0, 24, 1),
            Err(RainError::Dimensions { width: 0, height: 24 })
        ));
        assert!(ColumnField::seeded(80, 0, 1).is_err());
        let empty = ColumnField::from_columns(Vec::new(), 5, fixed_policy(), StdRng::seed_from_u64(0));
        assert!(empty.is_err());
    }

    #[test]
    fn test_is_active_matches_column_state() {
        let mut field = ColumnField::seeded(40, 20, 11).unwrap();
        for _ in 0..200 {
            for (col, column) in (0u16..).zip(field.columns()) {
                for row in 0..field.height() {
                    let expected = column.position <= i32::from(row)
                        && i32::from(row) < column.position + i32::from(column.length);
                    assert_eq!(field.is_active(col, row), expected);
                }
            }
            field.advance_all();
        }
        assert!(!field.is_active(40, 0));
    }

    #[test]
    fn test_advance_moves_by_speed() {
        let columns = vec![Column::new(0, 1, 2), Column::new(-4, 3, 2)];
        let mut field =
            ColumnField::from_columns(columns, 10, fixed_policy(), StdRng::seed_from_u64(0))
                .unwrap();
        assert_eq!(field.advance_all(), 0);
        assert_eq!(field.columns()[0].position, 1);
        assert_eq!(field.columns()[1].position, -1);
    }

    #[test]
    fn test_reset_only_past_bottom() {
        let columns = vec![Column::new(4, 1, 3), Column::new(5, 1, 3), Column::new(0, 1, 3)];
        let mut field =
            ColumnField::from_columns(columns, 5, fixed_policy(), StdRng::seed_from_u64(0))
                .unwrap();
        // 4 -> 5 stays (5 is not past a 5-row grid), 5 -> 6 resets
        assert_eq!(field.advance_all(), 1);
        assert_eq!(field.columns()[0].position, 5);
        assert_eq!(field.columns()[1], Column::new(-2, 1, 2));
        assert_eq!(field.columns()[2].position, 1);
        assert_eq!(field.reset_count(), 1);
    }

    #[test]
    fn test_eventual_reset() {
        let height = 24u16;
        for (position, speed) in [(-50, 1u16), (-10, 3), (0, 2), (23, 1), (-17, 3), (6, 3)] {
            let columns = vec![Column::new(position, speed, 5)];
            let mut field = ColumnField::from_columns(
                columns,
                height,
                ResetPolicy::default(),
                StdRng::seed_from_u64(8),
            )
            .unwrap();
            let bound = (i32::from(height) - position) / i32::from(speed) + 1;
            let mut ticks = 0;
            while field.advance_all() == 0 {
                ticks += 1;
                assert!(ticks < bound, "no reset after {ticks} ticks");
            }
            assert!(field.columns()[0].position < 0);
        }
    }

    #[test]
    fn test_columns_reset_independently() {
        let mut field = ColumnField::seeded(120, 30, 21).unwrap();
        for _ in 0..500 {
            field.advance_all();
        }
        let positions: std::collections::HashSet<i32> =
            field.columns().iter().map(|c| c.position).collect();
        assert!(positions.len() > 10, "columns stayed in sync: {positions:?}");
        for column in field.columns() {
            assert!((1..=3).contains(&column.speed));
            assert!((5..=15).contains(&column.length));
        }
    }

    #[test]
    fn test_reset_range_compliance_over_many_resets() {
        let mut field = ColumnField::seeded(64, 8, 77).unwrap();
        while field.reset_count() < 5_000 {
            let before: Vec<Column> = field.columns().to_vec();
            field.advance_all();
            for (old, new) in before.iter().zip(field.columns()) {
                let advanced = old.position + i32::from(old.speed);
                if advanced > 8 {
                    assert!((-50..=-10).contains(&new.position));
                    assert!((1..=3).contains(&new.speed));
                    assert!((5..=15).contains(&new.length));
                } else {
                    assert_eq!(new.position, advanced);
                }
            }
        }
    }

    #[test]
    fn test_explicit_reset() {
        let columns = vec![Column::new(3, 2, 4)];
        let mut field =
            ColumnField::from_columns(columns, 5, fixed_policy(), StdRng::seed_from_u64(0))
                .unwrap();
        assert_eq!(field.reset(0), Some(Column::new(-2, 1, 2)));
        assert_eq!(field.reset(1), None);
        assert_eq!(field.reset_count(), 1);
    }

    #[test]
    fn test_seeded_fields_agree() {
        let mut a = ColumnField::seeded(30, 10, 9).unwrap();
        let mut b = ColumnField::seeded(30, 10, 9).unwrap();
        for _ in 0..100 {
            a.advance_all();
            b.advance_all();
        }
        assert_eq!(a.columns(), b.columns());
    }

    #[test]
    fn test_resize() {
        let mut field = ColumnField::seeded(10, 5, 4).unwrap();
        let kept: Vec<Column> = field.columns()[..6].to_vec();
        field.resize(6, 8).unwrap();
        assert_eq!(field.columns(), kept.as_slice());
        assert_eq!(field.height(), 8);

        field.resize(12, 8).unwrap();
        assert_eq!(field.width(), 12);
        assert_eq!(field.columns().len(), 12);
        assert!(field.columns()[6..].iter().all(|c| c.position < 0));

        assert!(field.resize(0, 8).is_err());
        assert_eq!(field.width(), 12);
    }
}
