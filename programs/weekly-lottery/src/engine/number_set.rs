use anchor_lang::prelude::*;

use crate::constants::{DRAW_DAYS, MAX_NUMBER, MIN_NUMBER, NUMBERS_PER_TICKET};
use crate::error::LotteryError;

/// Set of distinct lottery numbers in `[MIN_NUMBER, MAX_NUMBER]`.
///
/// Bit `n` of the mask is set when `n` is in the set, so membership is a
/// single shift and intersections are a popcount. Construction is the only
/// place numbers are validated; a `NumberSet` that exists is always valid.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct NumberSet {
    mask: u128,
}

impl NumberSet {
    /// Builds a ticket's numbers: exactly six distinct values in range.
    pub fn new(numbers: &[u8]) -> Result<Self> {
        require!(
            numbers.len() == NUMBERS_PER_TICKET,
            LotteryError::InvalidFormat
        );
        Self::collect(numbers)
    }

    /// Builds a drawn-number set, which holds anywhere from zero to six values.
    pub fn drawn(numbers: &[u8]) -> Result<Self> {
        require!(
            numbers.len() <= DRAW_DAYS as usize,
            LotteryError::InvalidFormat
        );
        Self::collect(numbers)
    }

    fn collect(numbers: &[u8]) -> Result<Self> {
        require!(
            numbers.iter().all(|n| in_range(*n)),
            LotteryError::OutOfRange
        );

        let mut mask = 0u128;
        for &n in numbers {
            let bit = 1u128 << n;
            require!(mask & bit == 0, LotteryError::DuplicateValue);
            mask |= bit;
        }
        Ok(Self { mask })
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn contains(&self, number: u8) -> bool {
        in_range(number) && self.mask & (1u128 << number) != 0
    }

    /// Count of numbers present in both sets.
    pub fn intersection_len(&self, other: &NumberSet) -> u8 {
        (self.mask & other.mask).count_ones() as u8
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (MIN_NUMBER..=MAX_NUMBER).filter(move |n| self.contains(*n))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }
}

fn in_range(number: u8) -> bool {
    (MIN_NUMBER..=MAX_NUMBER).contains(&number)
}
