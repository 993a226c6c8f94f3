use anyhow::{bail, Result};
use clap::Args;
use gbomb_api::Invoker;

use crate::output::{print_game_detail, print_json, OutputFormat};

#[derive(Args)]
pub struct GameArgs {
    /// Game id, either `3030-56733` or `56733`
    pub id: String,
}

pub async fn run(args: &GameArgs, invoker: &Invoker, format: &OutputFormat) -> Result<()> {
    let Some(game) = invoker.get_game(args.id.trim()).await? else {
        bail!("no game with id {}", args.id);
    };

    match format {
        OutputFormat::Table => print_game_detail(&game),
        OutputFormat::Json => print_json(&game),
    }

    Ok(())
}
