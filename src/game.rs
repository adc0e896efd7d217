use crate::betting::is_funded;
use crate::cards::Card;
use crate::config::{ConfigError, GameConfig, GameMode, Stakes};
use crate::deck::Deck;
use crate::evaluator::{describe, evaluate_holdem, find_winners};
use crate::hand::{Board, HoleCards};
use crate::history::{HandHistory, HistoryEntry, HistoryVerb};
use crate::player::{Player, PlayerStatus};
use crate::pot::{Pot, Winner};
use log::{error, info, warn};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    /// No hand in progress: the last one finished or none has started.
    Complete,
}

impl Street {
    pub const fn label(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
            Street::Complete => "complete",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("not enough players to start hand (need at least 2, have {have})")]
    NotEnoughPlayers { have: usize },
    #[error("hand is already complete")]
    HandComplete,
    #[error("betting round is still open")]
    BettingRoundOpen,
    #[error("a hand is in progress")]
    HandInProgress,
    #[error("no seat {0} at this table")]
    UnknownSeat(usize),
}

/// The card a seat drew when the button was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonCard {
    pub seat: usize,
    pub name: String,
    pub card: Card,
}

/// One table: seats, cards, chips and the hand in progress.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) players: Vec<Player>,
    pub(crate) button: usize,
    pub(crate) current: Option<usize>,
    pub(crate) street: Street,
    pub(crate) current_bet: u64,
    /// Smallest legal raise increment over `current_bet`.
    pub(crate) min_raise: u64,
    pub(crate) last_raise: u64,
    pub(crate) stakes: Stakes,
    pub(crate) mode: GameMode,
    pub(crate) user_seat: usize,
    pub(crate) hand_number: u32,
    pub(crate) winners: Vec<Winner>,
    pub(crate) board: Board,
    pub(crate) pots: Vec<Pot>,
    pub(crate) deck: Deck,
    pub(crate) history: HandHistory,
    started_at: SystemTime,
}

impl GameState {
    /// A table whose deck is seeded from entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::build(config, Deck::from_entropy())
    }

    pub fn with_rng(config: GameConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        Self::build(config, Deck::with_rng(rng))
    }

    /// Reproducible table: the same seed and the same actions replay the same game.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, Deck::with_seed(seed))
    }

    fn build(config: GameConfig, deck: Deck) -> Result<Self, ConfigError> {
        let config = config.normalized();
        config.validate()?;
        let players = config
            .player_names
            .iter()
            .enumerate()
            .map(|(seat, name)| Player::new(seat, name.as_str(), config.starting_stack))
            .collect();
        Ok(Self {
            players,
            button: 0,
            current: None,
            street: Street::Complete,
            current_bet: 0,
            min_raise: config.stakes.big_blind,
            last_raise: config.stakes.big_blind,
            stakes: config.stakes,
            mode: config.mode,
            user_seat: config.user_seat,
            hand_number: 0,
            winners: Vec::new(),
            board: Board::default(),
            pots: Vec::new(),
            deck,
            history: HandHistory::default(),
            started_at: SystemTime::now(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn button(&self) -> usize {
        self.button
    }

    /// Seat whose decision is pending, if any.
    pub fn current_seat(&self) -> Option<usize> {
        self.current
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current.and_then(|seat| self.players.get(seat))
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn min_raise(&self) -> u64 {
        self.min_raise
    }

    pub fn last_raise(&self) -> u64 {
        self.last_raise
    }

    pub fn stakes(&self) -> Stakes {
        self.stakes
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn user_seat(&self) -> usize {
        self.user_seat
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    /// Winners of the last completed hand.
    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    pub fn started_at(&self) -> SystemTime {
        self.started_at
    }

    pub fn is_hand_complete(&self) -> bool {
        self.street == Street::Complete
    }

    pub fn is_waiting_for_action(&self) -> bool {
        self.current.is_some()
    }

    pub fn need_to_advance_street(&self) -> bool {
        !self.is_hand_complete() && self.is_betting_round_complete()
    }

    /// Mark every seat without chips as out of the game.
    pub fn eliminate_broke_players(&mut self) {
        for p in &mut self.players {
            if p.stack == 0 && p.status != PlayerStatus::Eliminated {
                info!("seat {} ({}) is eliminated", p.seat, p.name);
                p.status = PlayerStatus::Eliminated;
            }
        }
    }

    /// Take a seat out of (or back into) the deal. Only between hands.
    pub fn set_sitting_out(&mut self, seat: usize, away: bool) -> Result<(), GameError> {
        if !self.is_hand_complete() {
            return Err(GameError::HandInProgress);
        }
        let p = self.players.get_mut(seat).ok_or(GameError::UnknownSeat(seat))?;
        match (away, p.status) {
            (_, PlayerStatus::Eliminated) => {}
            (true, _) => p.status = PlayerStatus::SittingOut,
            (false, PlayerStatus::SittingOut) => p.status = PlayerStatus::Active,
            (false, _) => {}
        }
        Ok(())
    }

    /// Set a seat's chips between hands, e.g. for a rebuy. A funded seat
    /// that had been eliminated comes back into play.
    pub fn set_stack(&mut self, seat: usize, stack: u64) -> Result<(), GameError> {
        if !self.is_hand_complete() {
            return Err(GameError::HandInProgress);
        }
        let p = self.players.get_mut(seat).ok_or(GameError::UnknownSeat(seat))?;
        p.stack = stack;
        if stack > 0 && p.status == PlayerStatus::Eliminated {
            p.status = PlayerStatus::Active;
        }
        Ok(())
    }

    /// Deal one card to every seat; the highest card by
    /// [`Card::cmp_for_button`] takes the button. The deck is reshuffled afterwards.
    /// Only between hands.
    pub fn determine_button(&mut self) -> Result<Vec<ButtonCard>, GameError> {
        if !self.is_hand_complete() {
            return Err(GameError::HandInProgress);
        }
        self.deck.reset();
        let mut drawn = Vec::with_capacity(self.players.len());
        for seat in 0..self.players.len() {
            let card = self.draw_one();
            drawn.push(ButtonCard { seat, name: self.players[seat].name.clone(), card });
        }
        let best = drawn
            .iter()
            .reduce(|best, c| if c.card.cmp_for_button(best.card).is_gt() { c } else { best });
        if let Some(b) = best {
            info!("seat {} ({}) wins the button with {}", b.seat, b.name, b.card);
            self.button = b.seat;
        }
        self.deck.reset();
        Ok(drawn)
    }

    /// Seat label relative to the button, for display.
    pub fn position_name(&self, seat: usize) -> &'static str {
        let n = self.players.len();
        if n == 0 {
            return "";
        }
        match (seat + n - self.button % n) % n {
            0 => "BTN",
            1 => "SB",
            2 => "BB",
            3 => "UTG",
            4 if n <= 6 => "MP",
            4 => "UTG+1",
            5 if n <= 6 => "CO",
            5 => "MP",
            6 => "MP+1",
            7 => "HJ",
            8 => "CO",
            _ => "MP",
        }
    }

    /// Begin the next hand: rotate the button, post blinds, deal hole cards.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if !self.is_hand_complete() {
            return Err(GameError::HandInProgress);
        }
        self.eliminate_broke_players();
        let have = self.players.iter().filter(|p| is_funded(p)).count();
        if have < 2 {
            warn!("cannot start hand with {have} funded seat(s)");
            return Err(GameError::NotEnoughPlayers { have });
        }

        self.hand_number += 1;
        self.deck.reset();
        self.board.clear();
        self.winners.clear();
        self.pots.clear();
        self.history.clear();
        for p in &mut self.players {
            p.reset_for_hand();
        }
        if self.hand_number > 1 {
            self.rotate_button();
        }

        self.street = Street::Preflop;
        self.post_blinds();
        self.deal_hole_cards();
        self.current = self.first_to_act();
        info!(
            "hand #{} starts: button seat {}, {have} seats dealt in",
            self.hand_number, self.button
        );
        Ok(())
    }

    fn rotate_button(&mut self) {
        if let Some(next) = self.next_funded_seat(self.button) {
            self.button = next;
        }
    }

    fn post_blinds(&mut self) {
        let Some((sb, bb)) = self.blind_seats() else { return };
        for (seat, blind) in [(sb, self.stakes.small_blind), (bb, self.stakes.big_blind)] {
            let paid = self.players[seat].commit(blind);
            self.record(seat, HistoryVerb::Post, Some(paid));
        }
        self.current_bet = self.stakes.big_blind;
        self.min_raise = self.stakes.big_blind;
        self.last_raise = self.stakes.big_blind;
    }

    /// One card at a time, starting left of the button, to every seat dealt in.
    fn deal_hole_cards(&mut self) {
        let n = self.players.len();
        let order: Vec<usize> = (1..=n)
            .map(|i| (self.button + i) % n)
            .filter(|&seat| self.players[seat].status.in_hand())
            .collect();
        let first: Vec<Card> = order.iter().map(|_| self.draw_one()).collect();
        for (&seat, a) in order.iter().zip(first) {
            let b = self.draw_one();
            match HoleCards::try_new(a, b) {
                Ok(hole) => self.players[seat].hole = Some(hole),
                Err(e) => error!("seat {seat} dealt an invalid hand: {e}"),
            }
        }
    }

    fn draw(&mut self, n: usize) -> Vec<Card> {
        match self.deck.deal(n) {
            Some(cards) => cards,
            None => {
                error!("deck exhausted: wanted {n}, {} left", self.deck.remaining());
                panic!("deck exhausted while dealing hand #{}", self.hand_number);
            }
        }
    }

    fn draw_one(&mut self) -> Card {
        self.draw(1)[0]
    }

    fn deal_board(&mut self, n: usize) {
        self.deck.burn();
        let cards = self.draw(n);
        self.board.extend(cards);
    }

    /// Close the betting round and move the hand forward one step.
    ///
    /// With one seat left the pot is awarded uncontested. When nobody else can
    /// bet, the board is run out and the hand goes to showdown.
    pub fn advance_street(&mut self) -> Result<(), GameError> {
        if self.is_hand_complete() {
            return Err(GameError::HandComplete);
        }
        if !self.is_betting_round_complete() {
            return Err(GameError::BettingRoundOpen);
        }
        self.collect_bets();

        if self.count_in_hand() == 1 {
            self.finish_uncontested();
            return Ok(());
        }
        if self.count_active() <= 1 {
            self.run_out_board();
            return Ok(());
        }

        match self.street {
            Street::Preflop => {
                self.street = Street::Flop;
                self.deal_board(3);
            }
            Street::Flop => {
                self.street = Street::Turn;
                self.deal_board(1);
            }
            Street::Turn => {
                self.street = Street::River;
                self.deal_board(1);
            }
            Street::River => {
                self.resolve_showdown();
                return Ok(());
            }
            Street::Showdown | Street::Complete => {
                self.finish();
                return Ok(());
            }
        }
        info!("{}: {}", self.street, self.board);
        self.reset_betting_round();
        self.current = self.first_to_act();
        Ok(())
    }

    fn run_out_board(&mut self) {
        while self.board.len() < 5 {
            self.deal_board(1);
        }
        info!("board run out: {}", self.board);
        self.resolve_showdown();
    }

    fn finish_uncontested(&mut self) {
        self.winners = self.award_pot_to_last_player().into_iter().collect();
        self.finish();
    }

    fn resolve_showdown(&mut self) {
        self.street = Street::Showdown;
        self.calculate_pots();
        let mut winners = self.award_pots(find_winners);
        for w in &mut winners {
            let Some(hole) = self.players[w.seat].hole else { continue };
            match evaluate_holdem(&hole, &self.board) {
                Ok(result) => {
                    w.category = Some(result.category);
                    w.description = describe(&result);
                }
                Err(e) => warn!("seat {} could not be described: {e}", w.seat),
            }
        }
        self.winners = winners;
        self.finish();
    }

    fn finish(&mut self) {
        self.street = Street::Complete;
        self.current = None;
        for w in &self.winners {
            info!(
                "hand #{}: seat {} ({}) wins {} with {}",
                self.hand_number, w.seat, self.players[w.seat].name, w.amount, w.description
            );
        }
    }

    pub(crate) fn record(&mut self, seat: usize, verb: HistoryVerb, amount: Option<u64>) {
        let player = self.players[seat].name.clone();
        self.history.push(HistoryEntry { seat, player, verb, amount, street: self.street });
    }
}
