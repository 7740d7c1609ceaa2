//! One match of checkers: board, seats, turn, outcome and the AI seat.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, Coord, Move};
use crate::error::{CheckersError, Result};
use crate::notation::parse_move;
use crate::piece::Side;
use crate::rules;
use crate::selector::{MoveSelector, RandomSelector};

/// Player identity as handed in by the caller (e.g. a Telegram user id).
pub type PlayerId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Lobby: the second seat is reserved for a human who has not joined yet.
    WaitingForPlayer,
    WaitingForMove,
    GameOver,
}

/// What a successful [`Game::play_move`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub played: Move,
    pub captured: Option<Coord>,
    pub promoted: bool,
    /// The same side has another jump and keeps the turn.
    pub continues: bool,
    /// Moves the AI seat made in reply, in order.
    pub ai_moves: Vec<Move>,
}

/// Serialisable view of a game for display.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub state: GameState,
    pub current_turn: Side,
    pub winner: Option<Side>,
    pub last_move: Option<Move>,
    pub move_history: Vec<Move>,
    pub white_pieces: usize,
    pub black_pieces: usize,
    pub status: String,
    pub board: String,
}

struct Applied {
    captured: Option<Coord>,
    promoted: bool,
    continues: bool,
}

/// A single game. Player 1 is White; player 2 is Black, or the AI when absent.
///
/// Callers serialise access: one game is mutated by one request at a time.
pub struct Game {
    board: Board,
    player1: PlayerId,
    player2: Option<PlayerId>,
    ai_seat: bool,
    current_turn: Side,
    state: GameState,
    winner: Option<Side>,
    last_move: Option<Move>,
    move_history: Vec<Move>,
    selector: Box<dyn MoveSelector>,
}

impl Game {
    /// Starts a game. `player2 == None` puts the AI in Black's seat.
    pub fn new(player1: PlayerId, player2: Option<PlayerId>) -> Self {
        Self::with_selector(player1, player2, Box::new(RandomSelector::new()))
    }

    /// Like [`Game::new`] with a custom AI move choice.
    pub fn with_selector(
        player1: PlayerId,
        player2: Option<PlayerId>,
        selector: Box<dyn MoveSelector>,
    ) -> Self {
        Self {
            board: Board::initial(),
            player1,
            player2,
            ai_seat: player2.is_none(),
            current_turn: Side::White,
            state: GameState::WaitingForMove,
            winner: None,
            last_move: None,
            move_history: Vec::new(),
            selector,
        }
    }

    /// Opens a lobby: Black's seat waits for a human to [`join`](Game::join).
    pub fn open(player1: PlayerId) -> Self {
        let mut game = Self::new(player1, None);
        game.ai_seat = false;
        game.state = GameState::WaitingForPlayer;
        game
    }

    /// Game starting from an arbitrary position, for puzzles and tests.
    pub fn from_position(
        board: Board,
        current_turn: Side,
        player1: PlayerId,
        player2: Option<PlayerId>,
        selector: Box<dyn MoveSelector>,
    ) -> Self {
        let mut game = Self::with_selector(player1, player2, selector);
        game.board = board;
        game.current_turn = current_turn;
        game
    }

    /// Takes Black's seat in an open lobby.
    pub fn join(&mut self, player2: PlayerId) -> Result<()> {
        if self.state != GameState::WaitingForPlayer {
            return Err(CheckersError::NotOpenForJoin);
        }
        if player2 == self.player1 {
            return Err(CheckersError::CannotJoinOwnGame);
        }
        self.player2 = Some(player2);
        self.state = GameState::WaitingForMove;
        info!(player1 = self.player1, player2, "step: checkers lobby joined");
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions. Outcome is re-evaluated on the next move.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn player1(&self) -> PlayerId {
        self.player1
    }

    pub fn player2(&self) -> Option<PlayerId> {
        self.player2
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Winning side once the game is over; `None` at game over means a draw.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn has_ai_opponent(&self) -> bool {
        self.ai_seat
    }

    pub fn pieces(&self, side: Side) -> usize {
        self.board.count(side)
    }

    pub fn is_player(&self, player: PlayerId) -> bool {
        self.player1 == player || self.player2 == Some(player)
    }

    /// Colour `player` plays. Player 1 is White, the second seat Black.
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if self.player1 == player {
            Some(Side::White)
        } else if self.player2 == Some(player) {
            Some(Side::Black)
        } else {
            None
        }
    }

    /// Whether `player` holds the seat of the side to move.
    pub fn is_players_turn(&self, player: PlayerId) -> bool {
        match self.current_turn {
            Side::White => self.player1 == player,
            Side::Black => self.player2 == Some(player),
        }
    }

    fn is_ai_turn(&self) -> bool {
        self.ai_seat && self.current_turn == Side::Black && self.state == GameState::WaitingForMove
    }

    pub fn is_valid_move(&self, from: Coord, to: Coord) -> bool {
        rules::is_valid_move(&self.board, self.current_turn, from, to)
    }

    /// Legal moves for the side to move.
    pub fn possible_moves(&self, jumps_only: bool) -> Vec<Move> {
        rules::possible_moves(&self.board, self.current_turn, jumps_only)
    }

    /// Plays `from -> to` for the side to move. Returns `false` and leaves the
    /// game untouched if the move is illegal or the game is not in play.
    pub fn make_move(&mut self, from: Coord, to: Coord) -> bool {
        self.play_move(Move { from, to }).is_ok()
    }

    /// Parses `A3-B4` style text and plays it.
    pub fn play(&mut self, text: &str) -> Result<MoveReport> {
        let mv = parse_move(text)
            .ok_or_else(|| CheckersError::MalformedMoveText(text.trim().to_string()))?;
        self.play_move(mv)
    }

    /// Plays a move for the side to move, then lets the AI seat answer.
    pub fn play_move(&mut self, mv: Move) -> Result<MoveReport> {
        if self.state != GameState::WaitingForMove {
            return Err(CheckersError::NotAcceptingMoves(self.state));
        }
        if !self.is_valid_move(mv.from, mv.to) {
            debug!(side = ?self.current_turn, mv = %mv, "Rejected move");
            return Err(CheckersError::InvalidMove(mv));
        }

        let applied = self.apply(mv);
        let ai_moves = self.make_ai_move();

        Ok(MoveReport {
            played: mv,
            captured: applied.captured,
            promoted: applied.promoted,
            continues: applied.continues,
            ai_moves,
        })
    }

    /// Lets the AI seat move for as long as it is its turn (several jumps in a
    /// row included). Jumps are preferred over simple moves. Returns the moves made.
    pub fn make_ai_move(&mut self) -> Vec<Move> {
        let mut played = Vec::new();
        while self.is_ai_turn() {
            let side = self.current_turn;
            let mut candidates = rules::possible_moves(&self.board, side, true);
            if candidates.is_empty() {
                candidates = rules::possible_moves(&self.board, side, false);
            }

            let chosen = self.selector.choose(&candidates);
            let mv = match chosen.filter(|mv| candidates.contains(mv)) {
                Some(mv) => mv,
                None => match candidates.first() {
                    Some(&mv) => {
                        warn!(chosen = ?chosen, "AI selector returned a move outside the candidates");
                        mv
                    }
                    None => {
                        self.finish(Some(side.opponent()));
                        break;
                    }
                },
            };

            debug!(mv = %mv, candidates = candidates.len(), "step: AI move");
            self.apply(mv);
            played.push(mv);
        }
        played
    }

    /// Executes an already validated move and updates turn and outcome.
    fn apply(&mut self, mv: Move) -> Applied {
        let side = self.current_turn;
        let piece = self.board.take(mv.from);

        let captured = mv.captured();
        if let Some(square) = captured {
            self.board.take(square);
        }

        let promoted = !piece.is_king() && mv.to.row == side.promotion_row();
        self.board
            .set(mv.to, if promoted { piece.promote() } else { piece });

        self.last_move = Some(mv);
        self.move_history.push(mv);

        // Crowning ends the turn; the new king does not jump on.
        let continues = captured.is_some()
            && !promoted
            && !rules::jumps_from(&self.board, side, mv.to).is_empty();
        if !continues {
            self.current_turn = side.opponent();
        }

        debug!(
            side = ?side,
            mv = %mv,
            captured = ?captured,
            promoted,
            continues,
            "step: move applied"
        );

        self.check_game_over();

        Applied {
            captured,
            promoted,
            continues,
        }
    }

    /// Ends the game when a side has no pieces left, or the side to move has no legal move.
    fn check_game_over(&mut self) {
        if self.board.count(Side::White) == 0 {
            self.finish(Some(Side::Black));
        } else if self.board.count(Side::Black) == 0 {
            self.finish(Some(Side::White));
        } else if self.possible_moves(false).is_empty() {
            self.finish(Some(self.current_turn.opponent()));
        }
    }

    fn finish(&mut self, winner: Option<Side>) {
        self.state = GameState::GameOver;
        self.winner = winner;
        info!(
            winner = ?winner,
            moves = self.move_history.len(),
            "step: checkers game over"
        );
    }

    pub fn board_text(&self) -> String {
        self.board.render()
    }

    /// One-line status: whose turn, the lobby, or the result.
    pub fn status(&self) -> String {
        match self.state {
            GameState::WaitingForPlayer => "Waiting for an opponent to join ⏳".to_string(),
            GameState::GameOver => match self.winner {
                Some(Side::White) => "Game over! White (Player 1) wins! 🎉".to_string(),
                Some(Side::Black) if self.ai_seat => "Game over! The AI wins! Try again? 🤖".to_string(),
                Some(Side::Black) => "Game over! Black (Player 2) wins! 🎉".to_string(),
                None => "Game over! It's a draw! 🤝".to_string(),
            },
            GameState::WaitingForMove => match self.current_turn {
                Side::White => "White's turn (Player 1) ⚪".to_string(),
                Side::Black if self.ai_seat => "AI is thinking... 🤖".to_string(),
                Side::Black => "Black's turn (Player 2) ⚫".to_string(),
            },
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            current_turn: self.current_turn,
            winner: self.winner,
            last_move: self.last_move,
            move_history: self.move_history.clone(),
            white_pieces: self.board.count(Side::White),
            black_pieces: self.board.count(Side::Black),
            status: self.status(),
            board: self.board_text(),
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("player1", &self.player1)
            .field("player2", &self.player2)
            .field("ai_seat", &self.ai_seat)
            .field("current_turn", &self.current_turn)
            .field("state", &self.state)
            .field("winner", &self.winner)
            .field("moves", &self.move_history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use crate::selector::ScriptedSelector;

    fn two_player() -> Game {
        Game::with_selector(1, Some(2), Box::new(ScriptedSelector::first()))
    }

    #[test]
    fn test_new_game_defaults() {
        let game = Game::new(1, None);
        assert_eq!(game.state(), GameState::WaitingForMove);
        assert_eq!(game.current_turn(), Side::White);
        assert!(game.has_ai_opponent());
        assert_eq!(game.winner(), None);
        assert!(game.move_history().is_empty());
    }

    #[test]
    fn test_simple_move_switches_turn() {
        let mut game = two_player();
        assert!(game.make_move(Coord::new(5, 0), Coord::new(4, 1)));
        assert_eq!(game.current_turn(), Side::Black);
        assert_eq!(game.board().get(Coord::new(4, 1)), Piece::WhiteMan);
        assert!(game.board().get(Coord::new(5, 0)).is_empty());
        assert_eq!(game.last_move(), Some(Move::new((5, 0), (4, 1))));
    }

    #[test]
    fn test_invalid_move_leaves_game_untouched() {
        let mut game = two_player();
        let before = game.board().clone();
        assert!(!game.make_move(Coord::new(5, 0), Coord::new(3, 2)));
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_turn(), Side::White);
        assert!(game.move_history().is_empty());
    }

    #[test]
    fn test_lobby_rejects_moves_until_joined() {
        let mut game = Game::open(1);
        assert_eq!(game.state(), GameState::WaitingForPlayer);
        assert!(!game.has_ai_opponent());
        assert_eq!(
            game.play("A6-B5"),
            Err(CheckersError::NotAcceptingMoves(GameState::WaitingForPlayer))
        );
        assert_eq!(game.join(1), Err(CheckersError::CannotJoinOwnGame));
        game.join(2).unwrap();
        assert_eq!(game.state(), GameState::WaitingForMove);
        assert_eq!(game.join(3), Err(CheckersError::NotOpenForJoin));
        assert!(game.play("A6-B5").is_ok());
        assert_eq!(game.current_turn(), Side::Black);
    }

    #[test]
    fn test_play_maps_errors() {
        let mut game = two_player();
        assert_eq!(
            game.play("A1B2"),
            Err(CheckersError::MalformedMoveText("A1B2".to_string()))
        );
        assert_eq!(
            game.play("A6-A5"),
            Err(CheckersError::InvalidMove(Move::new((5, 0), (4, 0))))
        );
    }

    #[test]
    fn test_side_of_players() {
        let game = two_player();
        assert_eq!(game.side_of(1), Some(Side::White));
        assert_eq!(game.side_of(2), Some(Side::Black));
        assert_eq!(game.side_of(3), None);
        assert_eq!(Game::new(1, None).side_of(2), None);
    }

    #[test]
    fn test_turn_ownership() {
        let game = two_player();
        assert!(game.is_players_turn(1));
        assert!(!game.is_players_turn(2));
        assert!(game.is_player(2));
        assert!(!game.is_player(3));
    }

    #[test]
    fn test_status_texts() {
        let mut game = Game::with_selector(1, None, Box::new(ScriptedSelector::first()));
        assert_eq!(game.status(), "White's turn (Player 1) ⚪");
        game.finish(Some(Side::Black));
        assert_eq!(game.status(), "Game over! The AI wins! Try again? 🤖");
        let mut human = two_player();
        human.finish(None);
        assert_eq!(human.status(), "Game over! It's a draw! 🤝");
        assert_eq!(Game::open(1).status(), "Waiting for an opponent to join ⏳");
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = two_player();
        game.play("C6-D5").unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.current_turn, Side::Black);
        assert_eq!(snapshot.move_history, vec![Move::new((5, 2), (4, 3))]);
        assert_eq!(snapshot.white_pieces, 12);
        assert_eq!(snapshot.status, "Black's turn (Player 2) ⚫");
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let json = serde_json::to_value(Game::new(1, None).snapshot()).unwrap();
        assert_eq!(json["state"], "WaitingForMove");
        assert_eq!(json["current_turn"], "White");
        assert_eq!(json["white_pieces"], 12);
        assert!(json["winner"].is_null());
    }
}
