use clap::Parser;
use std::path::PathBuf;

use dirbatch::WalkOptions;

#[derive(Parser, Debug)]
#[command(name = "dirbatch")]
#[command(about = "Group files by their containing directory", long_about = None)]
pub struct Cli {
    /// Paths to traverse (files or directories)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Drop symbolic links from the results
    #[arg(long)]
    pub exclude_symlinks: bool,

    /// Recurse into sub-directories before printing a directory's own files
    #[arg(long)]
    pub directories_first: bool,

    /// Prefix each batch with the directory that owns it
    #[arg(long)]
    pub show_directories: bool,

    /// Classify symbolic links by their target instead of the link itself
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Print a batch even for directories with no qualifying files
    #[arg(long)]
    pub include_empty: bool,
}

impl Cli {
    pub fn options(&self) -> WalkOptions {
        WalkOptions {
            exclude_symlinks: self.exclude_symlinks,
            directories_first: self.directories_first,
            show_directories: self.show_directories,
            follow_symlinks: self.follow_symlinks,
            skip_empty_directories: !self.include_empty,
        }
    }
}
