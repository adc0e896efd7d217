use crate::evaluator::HandCategory;
use crate::game::GameState;
use crate::hand::Board;
use crate::history::HistoryVerb;
use crate::player::{Player, PlayerStatus};
use log::{debug, warn};
use serde::Serialize;

/// A main or side pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    pub amount: u64,
    /// Seats that can win this pot, lowest contribution first.
    pub eligible: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub seat: usize,
    /// Chips won from the pot. For an uncontested win this is the profit.
    pub amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<HandCategory>,
    pub description: String,
    pub eligible: Vec<usize>,
    /// 1-based display number of the pot; 0 for an uncontested win.
    pub pot_number: usize,
}

impl Winner {
    fn uncontested(seat: usize, amount: u64) -> Self {
        Self {
            seat,
            amount,
            category: None,
            description: "uncontested".to_string(),
            eligible: vec![seat],
            pot_number: 0,
        }
    }
}

fn is_dead(p: &Player) -> bool {
    matches!(p.status, PlayerStatus::Folded | PlayerStatus::Eliminated)
}

impl GameState {
    /// Move the round's bets into the hand totals. The chips already live in
    /// `total_bet`; only the per-round counters are cleared.
    pub(crate) fn collect_bets(&mut self) {
        for p in &mut self.players {
            p.bet = 0;
        }
    }

    /// Partition everything committed this hand into a main pot and side pots.
    ///
    /// Folded or eliminated contributions are dead money that joins the first pot.
    /// Side pots are only built when an all-in seat put in less than a seat above it.
    pub fn calculate_pots(&mut self) -> &[Pot] {
        let mut dead = 0u64;
        let mut contesting: Vec<(usize, u64)> = Vec::new();
        for p in &self.players {
            if p.total_bet == 0 {
                continue;
            }
            if is_dead(p) {
                dead += p.total_bet;
            } else {
                contesting.push((p.seat, p.total_bet));
            }
        }

        self.pots.clear();
        if contesting.is_empty() {
            if dead > 0 {
                let eligible =
                    self.players.iter().filter(|p| !is_dead(p)).map(|p| p.seat).collect();
                self.pots.push(Pot { amount: dead, eligible });
            }
            debug!("pots: {:?}", self.pots);
            return &self.pots;
        }

        contesting.sort_by_key(|&(seat, amount)| (amount, seat));
        let needs_side = contesting.windows(2).any(|w| {
            let (seat, amount) = w[0];
            self.players[seat].status == PlayerStatus::AllIn && amount < w[1].1
        });

        if !needs_side {
            let amount = contesting.iter().map(|&(_, a)| a).sum::<u64>() + dead;
            let eligible = contesting.iter().map(|&(seat, _)| seat).collect();
            self.pots.push(Pot { amount, eligible });
            debug!("pots: {:?}", self.pots);
            return &self.pots;
        }

        let mut prev = 0u64;
        for i in 0..contesting.len() {
            let level = contesting[i].1;
            if level == prev {
                continue;
            }
            let above = (contesting.len() - i) as u64;
            let mut amount = (level - prev) * above;
            if prev == 0 {
                amount += dead;
            }
            let eligible = contesting[i..].iter().map(|&(seat, _)| seat).collect();
            self.pots.push(Pot { amount, eligible });
            prev = level;
        }
        debug!("pots: {:?}", self.pots);
        &self.pots
    }

    /// Chips in play this hand: the computed pots, or the raw commitments
    /// before pots exist.
    pub fn total_pot(&self) -> u64 {
        if self.pots.is_empty() {
            self.players.iter().map(|p| p.total_bet).sum()
        } else {
            self.pots.iter().map(|p| p.amount).sum()
        }
    }

    /// Pay out every pot using `finder` to pick the winning seats among each
    /// pot's eligible list, then settle everyone's net winnings.
    ///
    /// A pot with a single eligible seat is an uncalled bet: it goes back to that
    /// seat without a pot number or a [`Winner`] entry. Odd chips from a split go to
    /// the first winner in eligibility order.
    pub fn award_pots<F>(&mut self, finder: F) -> Vec<Winner>
    where
        F: Fn(&[Player], &Board, &[usize]) -> Vec<usize>,
    {
        if self.pots.is_empty() {
            self.calculate_pots();
        }
        let pots = std::mem::take(&mut self.pots);
        let mut received = vec![0u64; self.players.len()];
        let mut winners = Vec::new();
        let mut pot_number = 0usize;

        for pot in &pots {
            if pot.eligible.len() == 1 {
                let seat = pot.eligible[0];
                self.players[seat].stack += pot.amount;
                received[seat] += pot.amount;
                self.record(seat, HistoryVerb::Return, Some(pot.amount));
                continue;
            }
            pot_number += 1;
            let mut pot_winners = finder(&self.players, &self.board, &pot.eligible);
            if pot_winners.is_empty() {
                warn!("no evaluable hand for pot {pot_number}, awarding to seat {:?}", pot.eligible.first());
                pot_winners.extend(pot.eligible.first().copied());
            }
            let Some(&first) = pot_winners.first() else { continue };
            let share = pot.amount / pot_winners.len() as u64;
            let remainder = pot.amount % pot_winners.len() as u64;
            for &seat in &pot_winners {
                let amount = if seat == first { share + remainder } else { share };
                self.players[seat].stack += amount;
                received[seat] += amount;
                self.record(seat, HistoryVerb::Win, Some(amount));
                winners.push(Winner {
                    seat,
                    amount,
                    category: None,
                    description: String::new(),
                    eligible: pot.eligible.clone(),
                    pot_number,
                });
            }
        }
        self.pots = pots;

        for p in &mut self.players {
            let got = received[p.seat];
            if p.total_bet > 0 || got > 0 {
                p.winnings += got as i64 - p.total_bet as i64;
            }
        }
        winners
    }

    /// Give everything committed this hand to the only seat still holding cards.
    /// Returns `None` unless exactly one seat is Active or AllIn.
    pub fn award_pot_to_last_player(&mut self) -> Option<Winner> {
        let mut in_hand = self.players.iter().filter(|p| p.status.in_hand());
        let seat = in_hand.next()?.seat;
        if in_hand.next().is_some() {
            return None;
        }

        let pot: u64 = self.players.iter().map(|p| p.total_bet).sum();
        let own = self.players[seat].total_bet;
        for p in &mut self.players {
            if p.seat != seat {
                p.winnings -= p.total_bet as i64;
            }
        }
        let winner = &mut self.players[seat];
        winner.stack += pot;
        winner.winnings += pot as i64 - own as i64;
        self.record(seat, HistoryVerb::Win, Some(pot));
        Some(Winner::uncontested(seat, pot - own))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::config::GameConfig;
    use crate::evaluator::find_winners;
    use crate::hand::HoleCards;

    fn mk_game(n: usize) -> GameState {
        let names: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
        GameState::with_seed(GameConfig::new(names).with_stack(1000), 7).unwrap()
    }

    fn commit(g: &mut GameState, seat: usize, amount: u64, status: PlayerStatus) {
        let p = &mut g.players[seat];
        p.stack -= amount;
        p.total_bet = amount;
        p.status = status;
    }

    fn hole(s: &str) -> Option<HoleCards> {
        Some(HoleCards::from_slice(&parse_cards(s).unwrap()).unwrap())
    }

    #[test]
    fn short_all_in_builds_main_and_side_pot() {
        let mut g = mk_game(4);
        commit(&mut g, 0, 30, PlayerStatus::AllIn);
        for seat in 1..4 {
            commit(&mut g, seat, 100, PlayerStatus::Active);
        }
        let pots = g.calculate_pots().to_vec();
        assert_eq!(
            pots,
            vec![
                Pot { amount: 120, eligible: vec![0, 1, 2, 3] },
                Pot { amount: 210, eligible: vec![1, 2, 3] },
            ]
        );
        assert_eq!(g.total_pot(), 330);
    }

    #[test]
    fn equal_contributions_make_one_pot_with_dead_money() {
        let mut g = mk_game(3);
        commit(&mut g, 0, 10, PlayerStatus::Folded);
        commit(&mut g, 1, 40, PlayerStatus::Active);
        commit(&mut g, 2, 40, PlayerStatus::AllIn);
        let pots = g.calculate_pots().to_vec();
        assert_eq!(pots, vec![Pot { amount: 90, eligible: vec![1, 2] }]);
    }

    #[test]
    fn dead_money_lands_in_first_pot_only() {
        let mut g = mk_game(4);
        commit(&mut g, 0, 80, PlayerStatus::Folded);
        commit(&mut g, 1, 50, PlayerStatus::AllIn);
        commit(&mut g, 2, 100, PlayerStatus::Active);
        commit(&mut g, 3, 100, PlayerStatus::Active);
        let pots = g.calculate_pots().to_vec();
        assert_eq!(pots[0], Pot { amount: 150 + 80, eligible: vec![1, 2, 3] });
        assert_eq!(pots[1], Pot { amount: 100, eligible: vec![2, 3] });
    }

    #[test]
    fn total_pot_before_pots_uses_commitments() {
        let mut g = mk_game(2);
        commit(&mut g, 0, 5, PlayerStatus::Active);
        commit(&mut g, 1, 10, PlayerStatus::Active);
        assert!(g.pots.is_empty());
        assert_eq!(g.total_pot(), 15);
    }

    #[test]
    fn uncalled_excess_returns_without_pot_number() {
        let mut g = mk_game(2);
        g.board.extend(parse_cards("2c 7d 9h Js Kc").unwrap());
        commit(&mut g, 0, 50, PlayerStatus::AllIn);
        commit(&mut g, 1, 200, PlayerStatus::Active);
        g.players[0].hole = hole("As Ah");
        g.players[1].hole = hole("3s 4h");

        let winners = g.award_pots(find_winners);
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].seat, 0);
        assert_eq!(winners[0].amount, 100);
        assert_eq!(winners[0].pot_number, 1);
        assert_eq!(g.players[0].stack, 950 + 100);
        assert_eq!(g.players[1].stack, 800 + 150, "uncalled 150 comes back");
        assert_eq!(g.players[0].winnings, 50);
        assert_eq!(g.players[1].winnings, -50);
    }

    #[test]
    fn odd_chip_goes_to_first_eligible_winner() {
        let mut g = mk_game(3);
        g.board.extend(parse_cards("Ac Kd Qh Js 2c").unwrap());
        commit(&mut g, 0, 1, PlayerStatus::Folded);
        commit(&mut g, 1, 10, PlayerStatus::Active);
        commit(&mut g, 2, 10, PlayerStatus::Active);
        g.players[1].hole = hole("Tc 3d");
        g.players[2].hole = hole("Th 4s");

        let winners = g.award_pots(find_winners);
        assert_eq!(winners.iter().map(|w| (w.seat, w.amount)).collect::<Vec<_>>(), vec![(1, 11), (2, 10)]);
        assert_eq!(g.players[1].winnings, 1);
        assert_eq!(g.players[2].winnings, 0);
        assert_eq!(g.players[0].winnings, -1);
    }

    #[test]
    fn identical_two_pair_and_kicker_split_with_odd_chip_first() {
        let mut g = mk_game(4);
        g.board.extend(parse_cards("Kc Kd 7s 4h 2c").unwrap());
        commit(&mut g, 0, 1, PlayerStatus::Folded);
        for seat in 1..4 {
            commit(&mut g, seat, 10, PlayerStatus::Active);
        }
        g.players[1].hole = hole("7c Ah");
        g.players[2].hole = hole("7d As");
        g.players[3].hole = hole("7h 3d");

        let a = crate::evaluator::evaluate_holdem(&g.players[1].hole.unwrap(), &g.board).unwrap();
        let b = crate::evaluator::evaluate_holdem(&g.players[2].hole.unwrap(), &g.board).unwrap();
        assert_eq!(a.category, HandCategory::TwoPair);
        assert_eq!((a.rank, &a.kickers), (b.rank, &b.kickers));

        assert_eq!(find_winners(&g.players, &g.board, &[1, 2, 3]), vec![1, 2]);
        let winners = g.award_pots(find_winners);
        let paid: Vec<_> = winners.iter().map(|w| (w.seat, w.amount, w.pot_number)).collect();
        assert_eq!(paid, vec![(1, 16, 1), (2, 15, 1)]);
        assert_eq!(g.players[1].stack, 990 + 16);
        assert_eq!(g.players[2].stack, 990 + 15);
        assert_eq!(g.players[3].winnings, -10);
        assert_eq!(g.players.iter().map(|p| p.winnings).sum::<i64>(), 0);
    }

    #[test]
    fn side_pot_winner_differs_from_main_pot_winner() {
        let mut g = mk_game(3);
        g.board.extend(parse_cards("2c 3d 4h 8s Kc").unwrap());
        commit(&mut g, 0, 50, PlayerStatus::AllIn);
        commit(&mut g, 1, 100, PlayerStatus::AllIn);
        commit(&mut g, 2, 100, PlayerStatus::Active);
        g.players[0].hole = hole("As Ah");
        g.players[1].hole = hole("Qs Qh");
        g.players[2].hole = hole("7c 6c");

        let winners = g.award_pots(find_winners);
        assert_eq!(winners[0], Winner {
            seat: 0,
            amount: 150,
            category: None,
            description: String::new(),
            eligible: vec![0, 1, 2],
            pot_number: 1,
        });
        assert_eq!((winners[1].seat, winners[1].amount, winners[1].pot_number), (1, 100, 2));
        let stacks: u64 = g.players.iter().map(|p| p.stack).sum();
        assert_eq!(stacks, 3000, "chips are conserved");
    }

    #[test]
    fn last_player_takes_everything() {
        let mut g = mk_game(3);
        commit(&mut g, 0, 10, PlayerStatus::Folded);
        commit(&mut g, 1, 30, PlayerStatus::Folded);
        commit(&mut g, 2, 30, PlayerStatus::Active);
        let w = g.award_pot_to_last_player().unwrap();
        assert_eq!(w.seat, 2);
        assert_eq!(w.amount, 40);
        assert_eq!(w.description, "uncontested");
        assert_eq!(w.pot_number, 0);
        assert_eq!(g.players[2].stack, 1040);
        assert_eq!(g.players.iter().map(|p| p.winnings).sum::<i64>(), 0);
    }

    #[test]
    fn last_player_needs_exactly_one_seat() {
        let mut g = mk_game(3);
        commit(&mut g, 0, 10, PlayerStatus::Active);
        commit(&mut g, 1, 10, PlayerStatus::AllIn);
        assert!(g.award_pot_to_last_player().is_none());
    }
}
