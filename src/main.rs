use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use arcade_snake::app::App;
use arcade_snake::game::GameConfig;
use arcade_snake::storage::HighScoreStore;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Terminal snake with combos and special food")]
struct Cli {
    /// Where the high score is persisted
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = HighScoreStore::new(cli.high_score_file);
    let mut app = App::new(GameConfig::default(), store);
    app.run().await
}
