//! Pure arithmetic of a production run: material need, potency normalization, allocation.

use crate::model::BottleVolume;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Millilitres of product extracted from one harvested plant.
pub const YIELD_PER_UNIT: u32 = 50;

/// Potency above which a harvested plant is normalized.
pub const POTENCY_CEILING: Decimal = Decimal::from_parts(400, 0, 0, false, 2);

/// `ceil(bottle_count × volume / YIELD_PER_UNIT)`, or `None` on overflow.
pub fn units_needed(bottle_count: u32, volume: BottleVolume) -> Option<u32> {
    bottle_count
        .checked_mul(volume.millilitres())
        .map(|total| total.div_ceil(YIELD_PER_UNIT))
}

/// Plants that must be planted before `needed` can be reserved.
pub fn shortfall(needed: u32, available: u32) -> u32 {
    needed.saturating_sub(available)
}

/// Percent to scale a plant by, if its potency exceeds [`POTENCY_CEILING`].
///
/// `round((potency − 4.0) × 100)`; a potency of 4.65 yields 65.
pub fn normalization_percent(potency: Decimal) -> Option<u32> {
    if potency <= POTENCY_CEILING {
        return None;
    }
    ((potency - POTENCY_CEILING) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

/// Index of the harvested unit each bottle draws from: bottle `i` takes unit `i mod units`.
pub fn round_robin(bottle_count: u32, units: usize) -> Vec<usize> {
    if units == 0 {
        return Vec::new();
    }
    (0..bottle_count as usize).map(|i| i % units).collect()
}
