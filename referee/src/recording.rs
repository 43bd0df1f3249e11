use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use trios::GameSnapshot;

/// Writes the course of each game to a numbered JSON file.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    snapshots: Vec<GameSnapshot>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            snapshots: Vec::new(),
        })
    }

    pub fn store_snapshot(&mut self, snapshot: GameSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Writes all snapshots stored since the last call into `game_NNNNNN.json`.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &std::mem::take(&mut self.snapshots))?;
        self.num += 1;
        Ok(filepath)
    }
}
