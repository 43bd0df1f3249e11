use std::collections::BTreeMap;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trios::{Card, Command, GameError, GameSnapshot, GridLayout, NotFound, PlayerKind};

use crate::session::{PlayerChoice, Session};

/// The answer to a [`Command`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Created { game_id: u64, snapshot: GameSnapshot },
    Updated(GameSnapshot),
    Cancelled,
}

/// Everything the store needs to set up new games.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub layout: GridLayout,
    pub cards: Vec<Card>,
    /// Whether to shuffle the cards before dealing.
    pub shuffle: bool,
    /// How AI players choose their moves.
    pub ai_choice: PlayerChoice,
}

/// All running games, by id.
///
/// The store is a plain value owned by its caller. Commands are executed one
/// at a time through `&mut self`, so they never interleave.
#[derive(Debug)]
pub struct GameStore {
    config: StoreConfig,
    rng: StdRng,
    sessions: BTreeMap<u64, Session>,
    next_id: u64,
}

impl GameStore {
    pub fn new(config: StoreConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            sessions: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Response, GameError> {
        match command {
            Command::CreateGame { red, blue } => {
                let game_id = self.create_game(red, blue)?;
                let snapshot = self.snapshot(game_id)?;
                Ok(Response::Created { game_id, snapshot })
            }
            Command::PlayCard {
                game_id,
                color,
                card_id,
                position,
            } => {
                let session = self.session_mut(game_id)?;
                let flips = session.play_card(color, &card_id, position)?;
                debug!(game_id, %color, card = %card_id, flips, "Command executed");
                Ok(Response::Updated(session.game().snapshot()))
            }
            Command::CancelMove { game_id, color } => {
                self.session_mut(game_id)?;
                debug!(game_id, %color, "Move cancelled");
                Ok(Response::Cancelled)
            }
        }
    }

    /// Creates and starts a new game and returns its id.
    ///
    /// If red is an AI player, its moves are made right away.
    pub fn create_game(&mut self, red: PlayerKind, blue: PlayerKind) -> Result<u64, GameError> {
        let choice = |kind| match kind {
            PlayerKind::Human => PlayerChoice::Human,
            PlayerKind::Ai => self.config.ai_choice,
        };
        let choices = [choice(red), choice(blue)];
        let mut session = Session::new(
            &self.config.layout,
            self.config.cards.clone(),
            choices,
            &mut self.rng,
            self.config.shuffle,
        )?;
        session.run_ai_turns()?;
        let game_id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(game_id, session);
        info!(game_id, ?red, ?blue, "Game created");
        Ok(game_id)
    }

    pub fn snapshot(&self, game_id: u64) -> Result<GameSnapshot, GameError> {
        let session = self
            .sessions
            .get(&game_id)
            .ok_or(NotFound::Game { id: game_id })?;
        Ok(session.game().snapshot())
    }

    /// The ids of all games that are not over yet.
    pub fn active_games(&self) -> Vec<u64> {
        self.sessions
            .iter()
            .filter(|(_, session)| session.game().winner().is_err())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Removes a game from the store.
    pub fn remove_game(&mut self, game_id: u64) -> Result<Session, GameError> {
        Ok(self
            .sessions
            .remove(&game_id)
            .ok_or(NotFound::Game { id: game_id })?)
    }

    fn session_mut(&mut self, game_id: u64) -> Result<&mut Session, NotFound> {
        self.sessions.get_mut(&game_id).ok_or(NotFound::Game { id: game_id })
    }
}
