//! The `download` subcommand: stream a video, image or podcast episode to disk.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use futures_util::StreamExt;
use gbomb_api::{ByteStream, Invoker};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncWriteExt;
use url::Url;

#[derive(Args)]
pub struct DownloadArgs {
    /// Asset URL, e.g. a video's hd_url
    #[arg(long, conflicts_with = "episode", required_unless_present = "episode")]
    pub url: Option<String>,

    /// Episode number within the feed, 1 being the newest
    #[arg(long)]
    pub episode: Option<usize>,

    /// Feed to take the episode from
    #[arg(long, default_value = "bombcast")]
    pub feed: String,

    /// Destination file. Defaults to the last path segment of the URL.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

pub async fn run(args: &DownloadArgs, invoker: &Invoker) -> Result<()> {
    let (out, stream) = match (&args.url, args.episode) {
        (Some(url), _) => {
            let out = output_path(args, || default_file_name(url))?;
            (out, invoker.download_asset(url).await?)
        }
        (None, Some(n)) => {
            let channel = invoker.fetch_feed(&args.feed).await?;
            let entry = n
                .checked_sub(1)
                .and_then(|i| channel.entries.get(i))
                .ok_or_else(|| {
                    anyhow!(
                        "{} has {} episodes, cannot pick episode {}",
                        args.feed,
                        channel.entries.len(),
                        n
                    )
                })?;
            // Every episode link ends in audio.mp3, so name the file after the GUID.
            let out = output_path(args, || Ok(PathBuf::from(format!("{}.mp3", entry.guid))))?;
            eprintln!("Downloading {}", entry.title);
            (out, invoker.download_feed_entry(entry).await?)
        }
        (None, None) => bail!("either --url or --episode is required"),
    };

    let written = write_stream(stream, &out).await?;
    eprintln!("Wrote {} bytes to {}", written, out.display());
    Ok(())
}

fn output_path(
    args: &DownloadArgs,
    default: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    match &args.out {
        Some(path) => Ok(path.clone()),
        None => default(),
    }
}

async fn write_stream(mut stream: ByteStream, out: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(out)
        .await
        .with_context(|| format!("Failed to create {}", out.display()))?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}] {bytes} ({bytes_per_sec}) {msg}",
    )?);
    pb.set_message(out.display().to_string());

    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        pb.set_position(written);
    }
    file.flush().await?;
    pb.finish_and_clear();

    Ok(written)
}

/// Last non-empty path segment of `url`.
fn default_file_name(url: &str) -> Result<PathBuf> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid URL {}", url))?;
    let name = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(|| anyhow!("cannot derive a file name from {}, pass --out", url))?;
    Ok(PathBuf::from(name))
}
