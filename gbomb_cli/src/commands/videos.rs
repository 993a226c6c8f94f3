use anyhow::Result;
use clap::Args;
use gbomb_api::{Invoker, Pageable};

use crate::output::{print_json, print_videos_table, OutputFormat};

#[derive(Args)]
pub struct VideosArgs {
    /// Offset of the first video to list
    #[arg(long, default_value = "0")]
    pub offset: i64,

    /// Number of pages to fetch (each request waits for the rate limiter)
    #[arg(long, default_value = "1")]
    pub pages: usize,
}

pub async fn run(args: &VideosArgs, invoker: &Invoker, format: &OutputFormat) -> Result<()> {
    let mut page = invoker.get_videos(args.offset).await?;
    let mut videos = std::mem::take(&mut page.videos);

    for _ in 1..args.pages {
        if page.is_complete() {
            break;
        }
        eprintln!("Fetching videos from offset {}...", page.current_offset());
        invoker.next(&mut page).await?;
        videos.append(&mut page.videos);
    }

    eprintln!(
        "Videos {}-{} of {}",
        args.offset,
        args.offset + videos.len() as i64,
        page.page.max_results
    );

    match format {
        OutputFormat::Table => print_videos_table(&videos),
        OutputFormat::Json => print_json(&videos),
    }

    Ok(())
}
