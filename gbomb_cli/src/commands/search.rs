use anyhow::{bail, Result};
use clap::Args;
use gbomb_api::{Invoker, Pageable};

use crate::output::{print_games_table, print_json, OutputFormat};

#[derive(Args)]
pub struct SearchArgs {
    /// Game name to search for
    pub query: String,

    /// Follow pagination until every result has been fetched
    #[arg(long)]
    pub all: bool,

    /// Number of pages to fetch when --all is not given
    #[arg(long, default_value = "1")]
    pub pages: usize,
}

pub async fn run(args: &SearchArgs, invoker: &Invoker, format: &OutputFormat) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        bail!("search query must not be empty");
    }

    let mut page = invoker.search_games(query).await?;
    let mut games = std::mem::take(&mut page.games);

    let mut fetched = 1;
    while !page.is_complete() && (args.all || fetched < args.pages) {
        eprintln!("Fetching results from offset {}...", page.current_offset());
        match invoker.next(&mut page).await {
            Ok(()) => {}
            Err(e) if e.is_exhausted() => break,
            Err(e) => return Err(e.into()),
        }
        games.append(&mut page.games);
        fetched += 1;
    }

    eprintln!("{} of {} matching games", games.len(), page.page.max_results);

    match format {
        OutputFormat::Table => print_games_table(&games),
        OutputFormat::Json => print_json(&games),
    }

    Ok(())
}
