use crate::action::{Action, ActionKind, ValidAction};
use crate::game::GameState;
use crate::history::HistoryVerb;
use crate::player::{Player, PlayerStatus};
use log::{debug, warn};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("seat {seat} acted out of turn (current: {current:?})")]
    NotYourTurn { seat: usize, current: Option<usize> },
    #[error("no seat is waiting to act")]
    NoActionPending,
    #[error("seat {seat} cannot act while {status}")]
    CannotAct { seat: usize, status: PlayerStatus },
    #[error("cannot check facing {to_call} to call")]
    CannotCheck { to_call: u64 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("raise too small: min total {min}, got {got}")]
    RaiseTooSmall { min: u64, got: u64 },
    #[error("insufficient chips: need {need}, have {stack}")]
    InsufficientChips { need: u64, stack: u64 },
    #[error("no seat {0} at this table")]
    UnknownSeat(usize),
}

/// Seats that take part in blind posting and button rotation.
pub(crate) fn is_funded(p: &Player) -> bool {
    p.status == PlayerStatus::AllIn
        || (p.stack > 0 && !matches!(p.status, PlayerStatus::Eliminated | PlayerStatus::SittingOut))
}

impl GameState {
    /// Chips `seat` must add to match the table bet.
    pub fn to_call(&self, seat: usize) -> u64 {
        self.players.get(seat).map_or(0, |p| self.current_bet.saturating_sub(p.bet))
    }

    /// Legal options for `seat`. Empty unless it is that seat's turn.
    pub fn valid_actions(&self, seat: usize) -> Vec<ValidAction> {
        let Some(p) = self.players.get(seat) else { return Vec::new() };
        if self.current != Some(seat) || p.status != PlayerStatus::Active || p.stack == 0 {
            return Vec::new();
        }

        let to_call = self.to_call(seat);
        let mut actions = vec![ValidAction::bare(ActionKind::Fold)];
        if to_call == 0 {
            actions.push(ValidAction::bare(ActionKind::Check));
        }
        if to_call > 0 && to_call < p.stack {
            actions.push(ValidAction::ranged(ActionKind::Call, to_call, to_call));
        }
        let min_total = self.current_bet + self.min_raise;
        let shove = p.stack + p.bet;
        if p.stack > to_call && shove >= min_total {
            actions.push(ValidAction::ranged(ActionKind::Raise, min_total, shove));
        }
        actions.push(ValidAction::ranged(ActionKind::AllIn, shove, shove));
        actions
    }

    /// Apply `action` for the current actor and move the turn on.
    ///
    /// ```
    /// use holdem_table::action::Action;
    /// use holdem_table::config::GameConfig;
    /// use holdem_table::game::GameState;
    ///
    /// let mut g = GameState::with_seed(GameConfig::new(["a", "b", "c"]), 1).unwrap();
    /// g.start_hand().unwrap();
    /// let seat = g.current_seat().unwrap();
    /// assert!(g.process_action(Action::check(seat)).is_err(), "facing the big blind");
    /// g.process_action(Action::call(seat)).unwrap();
    /// assert_ne!(g.current_seat(), Some(seat));
    /// ```
    pub fn process_action(&mut self, action: Action) -> Result<(), ActionError> {
        let result = self.apply_action(action);
        match &result {
            Ok(()) => {
                let p = &self.players[action.seat];
                if let Some(done) = p.last_action {
                    debug!("seat {} ({}) {}", p.seat, p.name, done);
                    let amount = match done.kind {
                        ActionKind::Fold | ActionKind::Check => None,
                        _ => Some(done.amount),
                    };
                    self.record(action.seat, verb_for(done.kind), amount);
                }
                // commitments moved; earlier pot splits no longer hold
                self.pots.clear();
                self.advance_to_next_player();
            }
            Err(e) => warn!("rejected {action} from seat {}: {e}", action.seat),
        }
        result
    }

    fn apply_action(&mut self, action: Action) -> Result<(), ActionError> {
        let seat = action.seat;
        let Some(p) = self.players.get(seat) else {
            return Err(ActionError::UnknownSeat(seat));
        };
        match self.current {
            None => return Err(ActionError::NoActionPending),
            Some(current) if current != seat => {
                return Err(ActionError::NotYourTurn { seat, current: Some(current) })
            }
            Some(_) => {}
        }
        if !p.status.in_hand() {
            return Err(ActionError::CannotAct { seat, status: p.status });
        }

        match action.kind {
            ActionKind::Fold => {
                self.fold(seat);
                Ok(())
            }
            ActionKind::Check => self.check(seat),
            ActionKind::Call => self.call(seat),
            ActionKind::Raise => self.raise_to(seat, action.amount),
            ActionKind::AllIn => {
                self.all_in(seat);
                Ok(())
            }
        }
    }

    fn fold(&mut self, seat: usize) {
        let p = &mut self.players[seat];
        p.status = PlayerStatus::Folded;
        p.has_acted = true;
        p.last_action = Some(Action::fold(seat));
    }

    fn check(&mut self, seat: usize) -> Result<(), ActionError> {
        let to_call = self.to_call(seat);
        if to_call > 0 {
            return Err(ActionError::CannotCheck { to_call });
        }
        let p = &mut self.players[seat];
        p.has_acted = true;
        p.last_action = Some(Action::check(seat));
        Ok(())
    }

    fn call(&mut self, seat: usize) -> Result<(), ActionError> {
        let to_call = self.to_call(seat);
        if to_call == 0 {
            return Err(ActionError::NothingToCall);
        }
        if to_call >= self.players[seat].stack {
            self.all_in(seat);
            return Ok(());
        }
        let p = &mut self.players[seat];
        p.commit(to_call);
        p.has_acted = true;
        p.last_action = Some(Action::new(ActionKind::Call, to_call, seat));
        Ok(())
    }

    fn raise_to(&mut self, seat: usize, total: u64) -> Result<(), ActionError> {
        let (bet, stack) = (self.players[seat].bet, self.players[seat].stack);
        let increment = total.saturating_sub(self.current_bet);
        let need = total.saturating_sub(bet);
        if increment < self.min_raise && need < stack {
            return Err(ActionError::RaiseTooSmall {
                min: self.current_bet + self.min_raise,
                got: total,
            });
        }
        if need > stack {
            return Err(ActionError::InsufficientChips { need, stack });
        }
        if need == stack {
            self.all_in(seat);
            return Ok(());
        }

        let p = &mut self.players[seat];
        p.commit(need);
        p.has_acted = true;
        p.last_action = Some(Action::raise_to(seat, total));
        self.min_raise = increment;
        self.last_raise = increment;
        self.current_bet = total;
        self.reopen_action_except(seat);
        Ok(())
    }

    fn all_in(&mut self, seat: usize) {
        let p = &mut self.players[seat];
        let stack = p.stack;
        p.commit(stack);
        p.status = PlayerStatus::AllIn;
        p.has_acted = true;
        let total = p.bet;
        p.last_action = Some(Action::new(ActionKind::AllIn, total, seat));

        if total > self.current_bet {
            let increment = total - self.current_bet;
            if increment >= self.min_raise {
                self.min_raise = increment;
                self.last_raise = increment;
            }
            self.current_bet = total;
            self.reopen_action_except(seat);
        }
    }

    /// Every other Active seat must act again.
    fn reopen_action_except(&mut self, seat: usize) {
        for p in &mut self.players {
            if p.seat != seat && p.status == PlayerStatus::Active {
                p.has_acted = false;
            }
        }
    }

    fn needs_to_act(&self, p: &Player) -> bool {
        p.status == PlayerStatus::Active && (!p.has_acted || p.bet < self.current_bet)
    }

    pub(crate) fn advance_to_next_player(&mut self) {
        if self.is_betting_round_complete() {
            self.current = None;
            return;
        }
        let Some(start) = self.current else { return };
        let n = self.players.len();
        self.current = (1..n)
            .map(|i| (start + i) % n)
            .find(|&idx| self.needs_to_act(&self.players[idx]));
    }

    /// True once every seat still able to act has acted and matched the bet,
    /// or when at most one seat still holds cards.
    pub fn is_betting_round_complete(&self) -> bool {
        if self.count_in_hand() <= 1 {
            return true;
        }
        !self.players.iter().any(|p| self.needs_to_act(p))
    }

    /// Seats still holding cards (Active or AllIn).
    pub fn count_in_hand(&self) -> usize {
        self.players.iter().filter(|p| p.status.in_hand()).count()
    }

    /// Seats that can still make decisions.
    pub fn count_active(&self) -> usize {
        self.players.iter().filter(|p| p.status == PlayerStatus::Active).count()
    }

    /// Next funded seat clockwise after `from`.
    pub(crate) fn next_funded_seat(&self, from: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n).map(|i| (from + i) % n).find(|&idx| is_funded(&self.players[idx]))
    }

    pub(crate) fn blind_seats(&self) -> Option<(usize, usize)> {
        let sb = self.next_funded_seat(self.button)?;
        let bb = self.next_funded_seat(sb)?;
        Some((sb, bb))
    }

    pub(crate) fn first_to_act(&self) -> Option<usize> {
        let n = self.players.len();
        if self.street == crate::game::Street::Preflop {
            let (_, bb) = self.blind_seats()?;
            let utg = self.next_funded_seat(bb)?;
            for i in 0..n {
                let idx = (utg + i) % n;
                if self.players[idx].status == PlayerStatus::Active {
                    return Some(idx);
                }
                if idx == bb {
                    break;
                }
            }
            return None;
        }
        (1..=n)
            .map(|i| (self.button + i) % n)
            .find(|&idx| self.players[idx].status == PlayerStatus::Active)
    }

    pub(crate) fn reset_betting_round(&mut self) {
        for p in &mut self.players {
            p.bet = 0;
            p.has_acted = false;
        }
        self.current_bet = 0;
        self.min_raise = self.stakes.big_blind;
        self.last_raise = self.stakes.big_blind;
    }
}

fn verb_for(kind: ActionKind) -> HistoryVerb {
    match kind {
        ActionKind::Fold => HistoryVerb::Fold,
        ActionKind::Check => HistoryVerb::Check,
        ActionKind::Call => HistoryVerb::Call,
        ActionKind::Raise => HistoryVerb::Raise,
        ActionKind::AllIn => HistoryVerb::AllIn,
    }
}
