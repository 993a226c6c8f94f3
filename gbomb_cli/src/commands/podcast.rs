use anyhow::Result;
use clap::Args;
use gbomb_api::Invoker;

use crate::output::{print_channel_table, print_json, OutputFormat};

#[derive(Args)]
pub struct PodcastArgs {
    /// Feed name, e.g. bombcast, beastcast, duders
    #[arg(default_value = "bombcast")]
    pub feed: String,

    /// Only list the newest N episodes
    #[arg(long)]
    pub limit: Option<usize>,
}

pub async fn run(args: &PodcastArgs, invoker: &Invoker, format: &OutputFormat) -> Result<()> {
    let mut channel = invoker.fetch_feed(&args.feed).await?;
    if let Some(limit) = args.limit {
        channel.entries.truncate(limit);
    }

    match format {
        OutputFormat::Table => print_channel_table(&channel),
        OutputFormat::Json => print_json(&channel),
    }

    Ok(())
}
