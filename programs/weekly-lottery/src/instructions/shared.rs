use anchor_lang::prelude::*;

use crate::error::LotteryError;
use crate::state::Ticket;

/// Loads the ticket accounts passed as remaining accounts, checking that each
/// belongs to `lottery` and appears only once.
pub fn load_tickets<'info>(
    lottery: Pubkey,
    remaining: &'info [AccountInfo<'info>],
) -> Result<Vec<Account<'info, Ticket>>> {
    let mut tickets: Vec<Account<'info, Ticket>> = Vec::with_capacity(remaining.len());
    for info in remaining {
        require!(
            tickets.iter().all(|ticket| ticket.key() != *info.key),
            LotteryError::DuplicateTicketAccount
        );
        let ticket: Account<'info, Ticket> = Account::try_from(info)?;
        require_keys_eq!(ticket.lottery, lottery, LotteryError::TicketLotteryMismatch);
        tickets.push(ticket);
    }
    Ok(tickets)
}

/// Writes the tickets back to their accounts.
pub fn store_tickets(tickets: &[Account<'_, Ticket>], program_id: &Pubkey) -> Result<()> {
    for ticket in tickets {
        ticket.exit(program_id)?;
    }
    Ok(())
}

/// Moves lamports out of a program-owned account.
pub fn pay_out<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let remaining = from
        .lamports()
        .checked_sub(amount)
        .ok_or(LotteryError::MathOverflow)?;
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(LotteryError::MathOverflow)?;

    **from.try_borrow_mut_lamports()? = remaining;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backing storage for a ticket account owned by `owner`.
    struct TicketAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl TicketAccount {
        fn new(lottery: Pubkey) -> Self {
            Self::owned_by(lottery, crate::ID)
        }

        fn owned_by(lottery: Pubkey, owner: Pubkey) -> Self {
            let ticket = Ticket {
                lottery,
                ..Ticket::default()
            };
            let mut data = Vec::new();
            ticket.try_serialize(&mut data).unwrap();
            Self {
                key: Pubkey::new_unique(),
                owner,
                lamports: 1_000_000,
                data,
            }
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                true,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    #[test]
    fn loads_tickets_of_the_lottery() {
        let lottery = Pubkey::new_unique();
        let mut first = TicketAccount::new(lottery);
        let mut second = TicketAccount::new(lottery);
        let infos = vec![first.info(), second.info()];

        let tickets = load_tickets(lottery, &infos).unwrap();
        assert_eq!(tickets.len(), 2);
        assert!(tickets.iter().all(|ticket| ticket.lottery == lottery));
    }

    #[test]
    fn ticket_of_another_lottery_is_rejected() {
        let lottery = Pubkey::new_unique();
        let mut ours = TicketAccount::new(lottery);
        let mut foreign = TicketAccount::new(Pubkey::new_unique());
        let infos = vec![ours.info(), foreign.info()];

        let err = load_tickets(lottery, &infos).unwrap_err();
        assert_eq!(err, LotteryError::TicketLotteryMismatch.into());
    }

    #[test]
    fn repeated_ticket_account_is_rejected() {
        let lottery = Pubkey::new_unique();
        let mut ticket = TicketAccount::new(lottery);
        let info = ticket.info();
        let infos = vec![info.clone(), info];

        let err = load_tickets(lottery, &infos).unwrap_err();
        assert_eq!(err, LotteryError::DuplicateTicketAccount.into());
    }

    #[test]
    fn account_owned_by_another_program_is_rejected() {
        let lottery = Pubkey::new_unique();
        let mut ticket = TicketAccount::owned_by(lottery, Pubkey::new_unique());
        let infos = vec![ticket.info()];

        assert!(load_tickets(lottery, &infos).is_err());
    }

    #[test]
    fn stored_tickets_are_visible_on_reload() {
        let lottery = Pubkey::new_unique();
        let mut ticket = TicketAccount::new(lottery);
        let infos = vec![ticket.info()];

        let mut tickets = load_tickets(lottery, &infos).unwrap();
        tickets[0].matched_count = 3;
        store_tickets(&tickets, &crate::ID).unwrap();

        let reloaded = load_tickets(lottery, &infos).unwrap();
        assert_eq!(reloaded[0].matched_count, 3);
    }
}
