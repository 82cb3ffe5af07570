use anchor_lang::prelude::*;

use crate::constants::{DRAW_DAYS, MATCH_TIERS};
use crate::engine::number_set::NumberSet;
use crate::error::LotteryError;
use crate::state::{Lottery, Ticket};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchSummary {
    /// Draw day the counts were computed against.
    pub draw_day: u8,
    pub updated: u64,
    /// Tickets matched against the final drawn set for the first time,
    /// by match count.
    pub newly_tallied: [u64; MATCH_TIERS],
}

impl MatchSummary {
    pub fn tallied_count(&self) -> u64 {
        self.newly_tallied.iter().sum()
    }
}

pub fn matched_count(chosen: &NumberSet, drawn: &NumberSet) -> u8 {
    chosen.intersection_len(drawn)
}

/// Recomputes every ticket's match count from the full drawn set.
///
/// Counts are always rebuilt from scratch, so replaying a batch is harmless.
/// A ticket already matched against a later draw day is skipped, which keeps
/// match counts from ever going down.
pub fn recompute_matches<'a, I>(tickets: I, drawn: &NumberSet) -> MatchSummary
where
    I: IntoIterator<Item = &'a mut Ticket>,
{
    let draw_day = drawn.len() as u8;
    let mut summary = MatchSummary {
        draw_day,
        ..MatchSummary::default()
    };

    for ticket in tickets {
        if ticket.matched_through_day > draw_day {
            continue;
        }
        let first_final = draw_day == DRAW_DAYS && ticket.matched_through_day < DRAW_DAYS;

        ticket.matched_count = matched_count(&ticket.numbers, drawn);
        ticket.matched_through_day = draw_day;
        summary.updated += 1;

        if first_final {
            summary.newly_tallied[ticket.matched_count as usize] += 1;
        }
    }
    summary
}

impl Lottery {
    /// Folds final match counts into the lottery's tally.
    pub fn record_tally(&mut self, summary: &MatchSummary) -> Result<()> {
        let tallied = self
            .tickets_tallied
            .checked_add(summary.tallied_count())
            .ok_or(LotteryError::MathOverflow)?;
        require!(
            tallied <= self.ticket_count,
            LotteryError::TallyExceedsTickets
        );

        for (slot, added) in self.match_tally.iter_mut().zip(summary.newly_tallied) {
            *slot = slot.checked_add(added).ok_or(LotteryError::MathOverflow)?;
        }
        self.tickets_tallied = tallied;
        Ok(())
    }

    pub fn all_tickets_tallied(&self) -> bool {
        self.draws_complete() && self.tickets_tallied == self.ticket_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lifecycle::tests::{drawing_lottery, DAY, SALES_END};
    use proptest::prelude::*;
    use proptest::sample::subsequence;

    fn ticket(numbers: [u8; 6]) -> Ticket {
        Ticket {
            numbers: NumberSet::new(&numbers).unwrap(),
            ..Ticket::default()
        }
    }

    #[test]
    fn no_draws_means_no_matches() {
        let mut tickets = vec![ticket([1, 15, 33, 45, 67, 89])];
        let summary = recompute_matches(tickets.iter_mut(), &NumberSet::default());
        assert_eq!(tickets[0].matched_count, 0);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.tallied_count(), 0);
    }

    #[test]
    fn count_grows_as_numbers_are_drawn() {
        let mut tickets = vec![ticket([1, 15, 33, 45, 67, 89])];

        recompute_matches(tickets.iter_mut(), &NumberSet::drawn(&[15, 89]).unwrap());
        assert_eq!(tickets[0].matched_count, 2);

        recompute_matches(tickets.iter_mut(), &NumberSet::drawn(&[15, 89, 1]).unwrap());
        assert_eq!(tickets[0].matched_count, 3);
        assert_eq!(tickets[0].matched_through_day, 3);
    }

    #[test]
    fn replaying_a_batch_gives_the_same_counts() {
        let mut tickets = vec![ticket([1, 15, 33, 45, 67, 89]), ticket([2, 3, 4, 5, 6, 7])];
        let drawn = NumberSet::drawn(&[15, 89, 2]).unwrap();
        recompute_matches(tickets.iter_mut(), &drawn);
        let first: Vec<u8> = tickets.iter().map(|t| t.matched_count).collect();
        recompute_matches(tickets.iter_mut(), &drawn);
        let second: Vec<u8> = tickets.iter().map(|t| t.matched_count).collect();
        assert_eq!(first, vec![2, 1]);
        assert_eq!(first, second);
    }

    #[test]
    fn stale_drawn_set_does_not_lower_counts() {
        let mut tickets = vec![ticket([1, 15, 33, 45, 67, 89])];
        recompute_matches(tickets.iter_mut(), &NumberSet::drawn(&[15, 89, 1]).unwrap());
        let summary = recompute_matches(tickets.iter_mut(), &NumberSet::drawn(&[15]).unwrap());
        assert_eq!(tickets[0].matched_count, 3);
        assert_eq!(summary.updated, 0);
    }

    #[test]
    fn final_match_is_tallied_once() {
        let (mut lottery, mut tickets) =
            drawing_lottery(&[[1, 15, 33, 45, 67, 89], [2, 3, 4, 5, 6, 7]]);
        let mut now = SALES_END;
        for number in [1, 15, 33, 45, 67, 2] {
            now += DAY;
            lottery.record_draw(number, now).unwrap();
        }
        let drawn = lottery.drawn_set().unwrap();

        let summary = recompute_matches(tickets.iter_mut(), &drawn);
        lottery.record_tally(&summary).unwrap();
        assert_eq!(lottery.match_tally[5], 1);
        assert_eq!(lottery.match_tally[1], 1);
        assert!(lottery.all_tickets_tallied());

        let replay = recompute_matches(tickets.iter_mut(), &drawn);
        assert_eq!(replay.tallied_count(), 0);
        lottery.record_tally(&replay).unwrap();
        assert_eq!(lottery.tickets_tallied, 2);
    }

    #[test]
    fn tally_cannot_exceed_ticket_count() {
        let (mut lottery, _) = drawing_lottery(&[[1, 2, 3, 4, 5, 6]]);
        let summary = MatchSummary {
            draw_day: DRAW_DAYS,
            updated: 2,
            newly_tallied: [2, 0, 0, 0, 0, 0, 0],
        };
        let err = lottery.record_tally(&summary).unwrap_err();
        assert_eq!(err, LotteryError::TallyExceedsTickets.into());
        assert_eq!(lottery.tickets_tallied, 0);
    }

    proptest! {
        #[test]
        fn count_is_exact_and_monotonic(
            chosen in subsequence((1u8..=100).collect::<Vec<_>>(), 6),
            draws in subsequence((1u8..=100).collect::<Vec<_>>(), 6).prop_shuffle(),
        ) {
            let mut tickets = vec![ticket([chosen[0], chosen[1], chosen[2], chosen[3], chosen[4], chosen[5]])];
            let mut previous = 0;
            for day in 0..=draws.len() {
                let drawn = NumberSet::drawn(&draws[..day]).unwrap();
                recompute_matches(tickets.iter_mut(), &drawn);
                let count = tickets[0].matched_count;
                let expected = chosen.iter().filter(|n| draws[..day].contains(n)).count() as u8;
                prop_assert_eq!(count, expected);
                prop_assert!(count >= previous);
                prop_assert!(count as usize <= day);
                previous = count;
            }
        }
    }
}
