use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::LOTTERY_SEED;
use crate::error::LotteryError;
use crate::events::RandomnessCommitted;
use crate::state::{Lottery, LotteryPhase};

/// Accounts required to commit a randomness account for the next draw.
///
/// Ensures:
/// 1. Only the authority of the lottery can commit the randomness.
/// 2. The randomness account is valid and has not been revealed previously.
#[derive(Accounts)]
pub struct CommitDraw<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.lottery_id.to_le_bytes().as_ref()],
        bump = lottery.bump,
        has_one = authority @ LotteryError::Unauthorized,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let lottery = &mut ctx.accounts.lottery;
    require!(
        lottery.phase == LotteryPhase::DrawingPhase,
        LotteryError::NotDue
    );

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| LotteryError::IncorrectRandomnessAccount)?;

    if randomness_data.seed_slot != clock.slot.saturating_sub(1) {
        return err!(LotteryError::RandomnessAlreadyRevealed);
    }

    let randomness_account = ctx.accounts.randomness_account_data.key();
    let replaced = lottery.commit_randomness(randomness_account)?;
    if let Some(previous) = replaced {
        msg!(
            "Randomness {} replaced unused commit {} on lottery {}",
            randomness_account,
            previous,
            lottery.lottery_id
        );
    }

    msg!(
        "Randomness {} committed for draw day {} of lottery {}",
        randomness_account,
        lottery.next_draw_day(),
        lottery.lottery_id
    );
    emit!(RandomnessCommitted {
        lottery: lottery.key(),
        draw_day: lottery.next_draw_day(),
        randomness_account,
        replaced,
        slot: clock.slot,
    });
    Ok(())
}
