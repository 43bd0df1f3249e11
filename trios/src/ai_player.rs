use std::panic::{self, AssertUnwindSafe};

use tracing::{error, info, warn};

use crate::{Color, Game, IllegalMove, Phase, Strategy};

/// Plays for one color by asking a [`Strategy`] and committing its choice.
pub struct AiPlayer {
    color: Color,
    strategy: Box<dyn Strategy>,
}

impl AiPlayer {
    pub fn new(color: Color, strategy: impl Strategy + 'static) -> Self {
        Self {
            color,
            strategy: Box::new(strategy),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Makes one move for this player.
    ///
    /// Errors are only returned if this player is not allowed to move at all.
    /// Anything that goes wrong after that, including a panicking strategy, is
    /// logged and reported as `Ok(false)`. The game is unchanged in that case.
    pub fn make_move(&mut self, game: &mut Game) -> Result<bool, IllegalMove> {
        if game.phase() != Phase::WaitingForMove {
            return Err(IllegalMove::WrongPhase {
                phase: game.phase(),
            });
        }
        let color = self.color;
        if game.current_color() != color {
            return Err(IllegalMove::NotYourTurn {
                color,
                current: game.current_color(),
            });
        }

        let view: &Game = game;
        let strategy = self.strategy.as_mut();
        let chosen = match panic::catch_unwind(AssertUnwindSafe(|| strategy.choose_move(view, color))) {
            Ok(chosen) => chosen,
            Err(_) => {
                error!(%color, "Strategy panicked");
                return Ok(false);
            }
        };
        let Some(mv) = chosen else {
            warn!(%color, "Strategy found no move");
            return Ok(false);
        };

        // The strategy only proposes, so check again before committing
        if !game.player(color).has_card(mv.card.id()) {
            error!(%color, card = %mv.card.id(), "Strategy chose a card that is not in the hand");
            return Ok(false);
        }
        if !game.board().can_place_card(mv.position) {
            error!(%color, position = %mv.position, "Strategy chose a cell that can't take a card");
            return Ok(false);
        }
        match game.play_card(color, mv.card.id(), mv.position) {
            Ok(flips) => {
                info!(%color, card = %mv.card.id(), position = %mv.position, flips, "AI move");
                Ok(true)
            }
            Err(err) => {
                error!(%color, %err, "AI move failed");
                Ok(false)
            }
        }
    }
}

impl std::fmt::Debug for AiPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiPlayer").field("color", &self.color).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::GameSetup;
    use crate::{card, Board, Card, Coordinate, GameView, GridLayout, MaxFlips, Move, Player, PlayerKind, RandomMove};

    fn pos(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn three_by_three() -> Game {
        let board = Board::new(&GridLayout::new(3, 3)).unwrap();
        let red = Player::new(
            Color::Red,
            PlayerKind::Ai,
            vec![card!("R1 9 9 9 9"), card!("R2 5 5 5 5"), card!("R3 2 2 2 2")],
        )
        .unwrap();
        let blue = Player::new(
            Color::Blue,
            PlayerKind::Ai,
            vec![card!("B1 1 1 1 1"), card!("B2 1 1 1 1"), card!("B3 8 8 8 8")],
        )
        .unwrap();
        let mut game = Game::new(board, red, blue).unwrap();
        game.start().unwrap();
        game
    }

    fn fixed_move(card: Card, position: Coordinate) -> impl Strategy {
        move |_: &dyn GameView, _: Color| -> Option<Move> { Some(Move::new(card.clone(), position, 0)) }
    }

    quickcheck! {
        fn ai_players_finish_the_game(setup: GameSetup, seed: u64) -> bool {
            let mut game = setup.game;
            let mut players = [
                AiPlayer::new(Color::Red, MaxFlips),
                AiPlayer::new(Color::Blue, RandomMove::from_seed(seed)),
            ];
            while game.phase() == Phase::WaitingForMove {
                let player = &mut players[game.current_color().idx()];
                if player.make_move(&mut game) != Ok(true) {
                    return false;
                }
            }
            game.winner().is_ok()
        }
    }

    #[test]
    fn plays_the_chosen_move() {
        let mut game = three_by_three();
        let mut red = AiPlayer::new(Color::Red, MaxFlips);
        assert_eq!(red.make_move(&mut game), Ok(true));
        // Nothing to flip yet, so the strongest card goes to the first cell
        assert_eq!(game.board().card_at(pos(0, 0)).unwrap().id().as_str(), "R1");
        assert_eq!(game.current_color(), Color::Blue);
    }

    #[test]
    fn only_on_own_turn() {
        let mut game = three_by_three();
        let mut blue = AiPlayer::new(Color::Blue, MaxFlips);
        assert_eq!(
            blue.make_move(&mut game),
            Err(IllegalMove::NotYourTurn {
                color: Color::Blue,
                current: Color::Red
            })
        );
    }

    #[test]
    fn not_after_game_over() {
        let mut game = three_by_three();
        let mut players = [AiPlayer::new(Color::Red, MaxFlips), AiPlayer::new(Color::Blue, MaxFlips)];
        for i in 0..6 {
            assert_eq!(players[i % 2].make_move(&mut game), Ok(true));
        }
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(
            players[0].make_move(&mut game),
            Err(IllegalMove::WrongPhase {
                phase: Phase::GameOver
            })
        );
    }

    #[test]
    fn failed_attempts_change_nothing() {
        let mut game = three_by_three();
        let before = game.clone();

        let mut passive = AiPlayer::new(Color::Red, |_: &dyn GameView, _: Color| -> Option<Move> { None });
        assert_eq!(passive.make_move(&mut game), Ok(false));

        let mut cheater = AiPlayer::new(Color::Red, fixed_move(card!("B1 1 1 1 1"), pos(0, 0)));
        assert_eq!(cheater.make_move(&mut game), Ok(false));

        let r1 = game.hand(Color::Red)[0].clone();
        let mut off_board = AiPlayer::new(Color::Red, fixed_move(r1, pos(5, 5)));
        assert_eq!(off_board.make_move(&mut game), Ok(false));

        let mut panicking = AiPlayer::new(Color::Red, |_: &dyn GameView, _: Color| -> Option<Move> {
            panic!("Strategy bug")
        });
        assert_eq!(panicking.make_move(&mut game), Ok(false));

        assert_eq!(game, before);
    }
}
