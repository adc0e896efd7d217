// The narrow surface a table driver needs: start hands, feed actions, advance
// streets and read back the state. Drivers (bots, services, replays) can be
// written against this trait instead of the concrete `GameState`.

use crate::action::{Action, ValidAction};
use crate::betting::ActionError;
use crate::game::{GameError, GameState, Street};
use crate::hand::Board;
use crate::player::Player;
use crate::pot::Winner;

pub trait TableEngine {
    // Hand lifecycle
    fn start_hand(&mut self) -> Result<(), GameError>;
    fn advance_street(&mut self) -> Result<(), GameError>;
    fn eliminate_broke_players(&mut self);

    // Betting
    fn valid_actions(&self, seat: usize) -> Vec<ValidAction>;
    fn process_action(&mut self, action: Action) -> Result<(), ActionError>;

    // Queries
    fn need_to_advance_street(&self) -> bool;
    fn is_hand_complete(&self) -> bool;
    fn is_waiting_for_action(&self) -> bool;
    fn current_player(&self) -> Option<&Player>;
    fn total_pot(&self) -> u64;
    fn players(&self) -> &[Player];
    fn board(&self) -> &Board;
    fn street(&self) -> Street;
    fn winners(&self) -> &[Winner];

    /// Drive the hand forward through every street that needs no decision.
    /// Returns `true` when a seat is waiting to act, `false` once the hand is over.
    fn advance_until_action(&mut self) -> bool {
        while self.need_to_advance_street() {
            if self.advance_street().is_err() {
                break;
            }
            if self.is_waiting_for_action() {
                return true;
            }
        }
        self.is_waiting_for_action()
    }
}

impl TableEngine for GameState {
    fn start_hand(&mut self) -> Result<(), GameError> {
        self.start_hand()
    }
    fn advance_street(&mut self) -> Result<(), GameError> {
        self.advance_street()
    }
    fn eliminate_broke_players(&mut self) {
        self.eliminate_broke_players()
    }

    fn valid_actions(&self, seat: usize) -> Vec<ValidAction> {
        self.valid_actions(seat)
    }
    fn process_action(&mut self, action: Action) -> Result<(), ActionError> {
        self.process_action(action)
    }

    fn need_to_advance_street(&self) -> bool {
        self.need_to_advance_street()
    }
    fn is_hand_complete(&self) -> bool {
        self.is_hand_complete()
    }
    fn is_waiting_for_action(&self) -> bool {
        self.is_waiting_for_action()
    }
    fn current_player(&self) -> Option<&Player> {
        self.current_player()
    }
    fn total_pot(&self) -> u64 {
        self.total_pot()
    }
    fn players(&self) -> &[Player] {
        self.players()
    }
    fn board(&self) -> &Board {
        self.board()
    }
    fn street(&self) -> Street {
        self.street()
    }
    fn winners(&self) -> &[Winner] {
        self.winners()
    }
}
