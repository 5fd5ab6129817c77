mod cli;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use dirbatch::core::write_batch;
use dirbatch::fs::RealFileSystem;
use dirbatch::seq::Sequence;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let fs = Arc::new(RealFileSystem);
    let mut batches = dirbatch::files_by_directory(fs, cli.paths.clone(), cli.options());

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let mut first = true;
    while let Some(batch) = batches.next().await {
        let batch = batch.context("traversal failed")?;
        write_batch(&mut stdout, &batch, first)?;
        first = false;
    }
    stdout.flush()?;

    Ok(())
}
