use anchor_lang::prelude::*;
use solana_program::hash::hashv;

use crate::constants::{DRAW_DAYS, MAX_DRAW_ATTEMPTS, MAX_NUMBER, MIN_NUMBER};
use crate::engine::number_set::NumberSet;
use crate::error::LotteryError;
use crate::state::{Lottery, LotteryPhase};

/// Source of draw candidates, each uniform over `[MIN_NUMBER, MAX_NUMBER]`.
pub trait RandomSource {
    fn next_number(&mut self) -> Result<u8>;
}

/// Expands one revealed 32-byte random value into a stream of numbers.
///
/// Candidate `i` comes from `sha256(seed || i)`. Words in the biased tail
/// of the u64 range are skipped so every number is equally likely.
pub struct SeededNumbers {
    seed: [u8; 32],
    counter: u64,
}

impl SeededNumbers {
    pub fn new(seed: [u8; 32]) -> Self {
        Self { seed, counter: 0 }
    }

    fn next_word(&mut self) -> u64 {
        let digest = hashv(&[&self.seed, &self.counter.to_le_bytes()]).to_bytes();
        self.counter = self.counter.wrapping_add(1);

        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(word)
    }
}

impl RandomSource for SeededNumbers {
    fn next_number(&mut self) -> Result<u8> {
        let span = u64::from(MAX_NUMBER - MIN_NUMBER) + 1;
        let zone = u64::MAX - u64::MAX % span;

        for _ in 0..MAX_DRAW_ATTEMPTS {
            let word = self.next_word();
            if word < zone {
                return Ok(MIN_NUMBER + (word % span) as u8);
            }
        }
        err!(LotteryError::RandomnessExhausted)
    }
}

/// Result of one daily draw, ready to be written as a `DrawEvent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawRecord {
    pub draw_day: u8,
    pub drawn_number: u8,
    pub scheduled_time: i64,
    pub drawn_at: i64,
}

/// Draws the next day's number and advances the lottery.
///
/// Fails with `NotDue` outside the drawing phase or before the scheduled
/// time, and with `LotteryExhausted` once six numbers exist. On any error the
/// lottery is left untouched.
pub fn trigger_next_draw<R>(lottery: &mut Lottery, now: i64, source: &mut R) -> Result<DrawRecord>
where
    R: RandomSource + ?Sized,
{
    let scheduled_time = match (lottery.phase, lottery.next_draw_time) {
        (LotteryPhase::DrawingPhase, Some(at)) if now >= at => at,
        _ => return err!(LotteryError::NotDue),
    };
    require!(
        lottery.current_draw_day < DRAW_DAYS,
        LotteryError::LotteryExhausted
    );

    let drawn_number = draw_excluding(&lottery.drawn_set()?, source)?;
    let draw_day = lottery.record_draw(drawn_number, now)?;

    Ok(DrawRecord {
        draw_day,
        drawn_number,
        scheduled_time,
        drawn_at: now,
    })
}

/// Pulls candidates until one is not in `drawn`.
pub fn draw_excluding<R>(drawn: &NumberSet, source: &mut R) -> Result<u8>
where
    R: RandomSource + ?Sized,
{
    for _ in 0..MAX_DRAW_ATTEMPTS {
        let candidate = source.next_number()?;
        require!(
            (MIN_NUMBER..=MAX_NUMBER).contains(&candidate),
            LotteryError::OutOfRange
        );
        if !drawn.contains(candidate) {
            return Ok(candidate);
        }
    }
    err!(LotteryError::RandomnessExhausted)
}

impl Lottery {
    /// Records `account` as the randomness for the next draw. Returns the
    /// account it replaces when an earlier commit was never used.
    pub fn commit_randomness(&mut self, account: Pubkey) -> Result<Option<Pubkey>> {
        require!(self.phase == LotteryPhase::DrawingPhase, LotteryError::NotDue);
        require!(
            account != Pubkey::default(),
            LotteryError::IncorrectRandomnessAccount
        );
        let replaced = std::mem::replace(&mut self.pending_randomness, account);
        Ok((replaced != Pubkey::default()).then_some(replaced))
    }

    /// Consumes the committed randomness account. Every draw needs its own
    /// commit, so the slot is cleared on success.
    pub fn take_pending_randomness(&mut self, passed: Pubkey) -> Result<Pubkey> {
        require!(
            self.pending_randomness != Pubkey::default(),
            LotteryError::RandomnessNotCommitted
        );
        require_keys_eq!(
            passed,
            self.pending_randomness,
            LotteryError::IncorrectRandomnessAccount
        );
        Ok(std::mem::take(&mut self.pending_randomness))
    }
}
