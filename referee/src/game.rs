use rand::rngs::StdRng;
use trios::{Card, Game, GridLayout, Phase};

use crate::recording::Recorder;
use crate::session::{PlayerChoice, Session};

/// Plays one game between two AI players and returns the finished game.
///
/// Returns an error if a player is human, or if an AI player fails to move.
pub fn play_game(
    rng: &mut StdRng,
    layout: &GridLayout,
    cards: Vec<Card>,
    choices: [PlayerChoice; 2],
    shuffle: bool,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<Game> {
    if choices.contains(&PlayerChoice::Human) {
        anyhow::bail!("Only AI players can take part in a batch game");
    }
    let mut session = Session::new(layout, cards, choices, rng, shuffle)?;

    loop {
        if let Some(rec) = recorder {
            rec.store_snapshot(session.game().snapshot());
        }
        if session.game().phase() == Phase::GameOver {
            break;
        }
        if !session.ai_turn()? {
            anyhow::bail!("{} did not make a move", session.game().current_color());
        }
    }

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }
    Ok(session.into_game())
}
