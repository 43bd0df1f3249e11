use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};
use trios::{
    deal, AiPlayer, Board, Card, Color, Coordinate, Game, GameError, GridLayout, IllegalMove, MaxFlips, Phase,
    Player, PlayerKind, RandomMove,
};

/// Who chooses the moves of one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerChoice {
    Human,
    MaxFlips,
    Random,
}

impl PlayerChoice {
    pub fn kind(self) -> PlayerKind {
        match self {
            PlayerChoice::Human => PlayerKind::Human,
            PlayerChoice::MaxFlips | PlayerChoice::Random => PlayerKind::Ai,
        }
    }

    /// The AI player for `color`, or `None` for humans.
    ///
    /// Random players get their own RNG seeded from `rng`.
    pub fn ai_player(self, color: Color, rng: &mut StdRng) -> Option<AiPlayer> {
        match self {
            PlayerChoice::Human => None,
            PlayerChoice::MaxFlips => Some(AiPlayer::new(color, MaxFlips)),
            PlayerChoice::Random => Some(AiPlayer::new(
                color,
                RandomMove::new(StdRng::seed_from_u64(rng.gen())),
            )),
        }
    }
}

/// A game together with the AI players bound to it.
#[derive(Debug)]
pub struct Session {
    game: Game,
    /// Indexed like [`Color::ALL`].
    ai_players: [Option<AiPlayer>; 2],
}

impl Session {
    /// Deals the cards, binds the AI players and starts the game.
    pub fn new(
        layout: &GridLayout,
        cards: Vec<Card>,
        choices: [PlayerChoice; 2],
        rng: &mut StdRng,
        shuffle: bool,
    ) -> Result<Self, GameError> {
        let board = Board::new(layout)?;
        let shuffle_rng = if shuffle { Some(&mut *rng) } else { None };
        let [red_hand, blue_hand] = deal(cards, board.num_playable_cells(), shuffle_rng)?;
        let red = Player::new(Color::Red, choices[0].kind(), red_hand)?;
        let blue = Player::new(Color::Blue, choices[1].kind(), blue_hand)?;
        let mut game = Game::new(board, red, blue)?;
        game.start()?;
        let ai_players = [
            choices[0].ai_player(Color::Red, rng),
            choices[1].ai_player(Color::Blue, rng),
        ];
        Ok(Self::with_players(game, ai_players))
    }

    /// Binds AI players to an existing game, e.g. a restored one.
    ///
    /// Nothing checks that every AI player in the game has a bound AI player.
    /// That is only detected when it's that player's turn.
    pub fn with_players(game: Game, ai_players: [Option<AiPlayer>; 2]) -> Self {
        Self { game, ai_players }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_game(self) -> Game {
        self.game
    }

    /// Plays a card for a human player, then lets the AI players move.
    ///
    /// Returns the number of cards flipped by the human move. Colors played
    /// by an AI player can't be moved this way.
    pub fn play_card(&mut self, color: Color, card_id: &str, position: Coordinate) -> Result<usize, GameError> {
        if self.game.player(color).is_ai() {
            return Err(IllegalMove::AiControlled { color }.into());
        }
        let card_id = self.game.find_card(color, card_id)?.id().clone();
        let flips = self.game.play_card(color, &card_id, position)?;
        self.run_ai_turns()?;
        Ok(flips)
    }

    /// Makes one move if it's the turn of an AI player.
    ///
    /// Returns whether a move was made. A failed attempt leaves the game
    /// unchanged.
    pub fn ai_turn(&mut self) -> Result<bool, GameError> {
        if self.game.phase() != Phase::WaitingForMove {
            return Ok(false);
        }
        let color = self.game.current_color();
        if !self.game.player(color).is_ai() {
            return Ok(false);
        }
        let Some(ai_player) = self.ai_players[color.idx()].as_mut() else {
            return Err(GameError::Internal(format!(
                "{} is marked as AI, but has no strategy",
                color
            )));
        };
        let moved = ai_player.make_move(&mut self.game)?;
        if !moved {
            warn!(%color, "AI player did not move");
        }
        Ok(moved)
    }

    /// Makes moves for AI players as long as it's their turn.
    ///
    /// Stops early if an AI player fails to move. Returns the number of
    /// moves made.
    pub fn run_ai_turns(&mut self) -> Result<usize, GameError> {
        let mut num_moves = 0;
        while self.ai_turn()? {
            num_moves += 1;
        }
        debug!(num_moves, "AI turns done");
        Ok(num_moves)
    }
}
