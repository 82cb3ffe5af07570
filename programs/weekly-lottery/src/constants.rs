use anchor_lang::prelude::*;

#[constant]
pub const CONFIG_SEED: &[u8] = b"lottery_config";

#[constant]
pub const LOTTERY_SEED: &[u8] = b"weekly_lottery";

#[constant]
pub const TICKET_SEED: &[u8] = b"ticket";

#[constant]
pub const DRAW_SEED: &[u8] = b"draw_event";

/// Smallest number a ticket may pick or a draw may produce.
pub const MIN_NUMBER: u8 = 1;

/// Largest number a ticket may pick or a draw may produce.
pub const MAX_NUMBER: u8 = 100;

/// Numbers chosen on every ticket.
pub const NUMBERS_PER_TICKET: usize = 6;

/// Draw days in one lottery. One number is drawn per day.
pub const DRAW_DAYS: u8 = 6;

/// Possible match counts, 0 through `DRAW_DAYS` inclusive.
pub const MATCH_TIERS: usize = DRAW_DAYS as usize + 1;

/// Default spacing between two draws (one day).
pub const DEFAULT_DRAW_INTERVAL: i64 = 24 * 60 * 60;

/// Denominator for prize shares expressed in basis points.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Upper bound on rejected candidates while looking for an undrawn number.
/// At most 5 of 100 values are ever excluded, so this is never reached with
/// a healthy randomness source.
pub const MAX_DRAW_ATTEMPTS: u32 = 64;
