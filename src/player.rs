use crate::action::Action;
use crate::hand::HoleCards;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    /// Out of chips, out of the game.
    Eliminated,
    SittingOut,
}

impl PlayerStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PlayerStatus::Active => "active",
            PlayerStatus::Folded => "folded",
            PlayerStatus::AllIn => "all-in",
            PlayerStatus::Eliminated => "eliminated",
            PlayerStatus::SittingOut => "sitting-out",
        }
    }

    /// Still holding cards in the current hand.
    pub const fn in_hand(self) -> bool {
        matches!(self, PlayerStatus::Active | PlayerStatus::AllIn)
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One seat at the table. The seat index never changes for the life of the game.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub(crate) seat: usize,
    pub(crate) name: String,
    pub(crate) stack: u64,
    pub(crate) status: PlayerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hole: Option<HoleCards>,
    /// Chips put in during the current betting round.
    pub(crate) bet: u64,
    /// Chips put in during the whole hand, blinds included.
    pub(crate) total_bet: u64,
    #[serde(skip)]
    pub(crate) has_acted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) last_action: Option<Action>,
    /// Net result across all hands played.
    pub(crate) winnings: i64,
}

impl Player {
    pub(crate) fn new(seat: usize, name: impl Into<String>, stack: u64) -> Self {
        Self {
            seat,
            name: name.into(),
            stack,
            status: PlayerStatus::Active,
            hole: None,
            bet: 0,
            total_bet: 0,
            has_acted: false,
            last_action: None,
            winnings: 0,
        }
    }

    pub fn seat(&self) -> usize {
        self.seat
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack(&self) -> u64 {
        self.stack
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Returns the player's bet in the current betting round
    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Returns the player's total committed this hand
    pub fn total_bet(&self) -> u64 {
        self.total_bet
    }

    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    pub fn winnings(&self) -> i64 {
        self.winnings
    }

    /// Move up to `amount` chips from the stack into the current bet.
    /// Goes all-in when the stack runs dry. Returns the chips actually moved.
    pub(crate) fn commit(&mut self, amount: u64) -> u64 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.bet += paid;
        self.total_bet += paid;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hole = None;
        self.bet = 0;
        self.total_bet = 0;
        self.has_acted = false;
        self.last_action = None;
        if self.stack > 0
            && !matches!(self.status, PlayerStatus::Eliminated | PlayerStatus::SittingOut)
        {
            self.status = PlayerStatus::Active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_caps_at_stack_and_goes_all_in() {
        let mut p = Player::new(0, "Alice", 30);
        assert_eq!(p.commit(10), 10);
        assert_eq!((p.stack, p.bet, p.total_bet), (20, 10, 10));
        assert_eq!(p.status, PlayerStatus::Active);
        assert_eq!(p.commit(50), 20);
        assert_eq!((p.stack, p.bet, p.total_bet), (0, 30, 30));
        assert_eq!(p.status, PlayerStatus::AllIn);
    }

    #[test]
    fn reset_keeps_eliminated_and_sitting_out() {
        let mut out = Player::new(1, "Bob", 0);
        out.status = PlayerStatus::Eliminated;
        out.reset_for_hand();
        assert_eq!(out.status, PlayerStatus::Eliminated);

        let mut away = Player::new(2, "Cat", 100);
        away.status = PlayerStatus::SittingOut;
        away.reset_for_hand();
        assert_eq!(away.status, PlayerStatus::SittingOut);

        let mut folded = Player::new(3, "Dee", 100);
        folded.status = PlayerStatus::Folded;
        folded.total_bet = 40;
        folded.reset_for_hand();
        assert_eq!(folded.status, PlayerStatus::Active);
        assert_eq!(folded.total_bet, 0);
    }

    #[test]
    fn status_labels() {
        assert_eq!(PlayerStatus::AllIn.to_string(), "all-in");
        assert_eq!(serde_json::to_string(&PlayerStatus::SittingOut).unwrap(), "\"sitting-out\"");
        assert!(PlayerStatus::AllIn.in_hand());
        assert!(!PlayerStatus::Folded.in_hand());
    }
}
