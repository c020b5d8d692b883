use crate::cli::{Args, Process};
use crate::helpers::fmt_error;
use clap::{Command, CommandFactory, Parser};
use clap_complete::{Generator, generate};
use std::io;

pub mod cli;
pub mod commands;
pub mod config;
pub mod eraser;
pub mod errors;
pub mod helpers;
pub mod logging;
pub mod s3_store;
pub mod store;

pub use eraser::{BucketEraser, EraseStats};
pub use errors::EraseError;
pub use s3_store::S3Store;
pub use store::{
    DeleteMarker, DeletionResult, MAX_DELETE_BATCH, ObjectIdentifier, ObjectStore,
    ObjectVersion, VersionListing,
};

pub fn print_completions<G: Generator>(
    generator: G,
    cmd: &mut Command,
) {
    // get_name returns a str, to_owned = to_string (but restriction::str_to_string)
    generate(generator, cmd, cmd.get_name().to_owned(), &mut io::stdout());
}

/// Parse the command line, run the subcommand and return the exit code.
pub async fn main_rs() -> i32 {
    let args = Args::parse();

    logging::init(args.globals.verbose);

    if let Some(generator) = args.generator {
        let mut cmd = Args::command();

        print_completions(generator, &mut cmd);
        return 0;
    }

    let Some(cmd) = args.cmd else {
        let _ = Args::command().print_help();
        return 1;
    };

    cmd.process(&args.globals).await.unwrap_or_else(|msg| {
        eprintln!("{}", fmt_error(&msg));
        1
    })
}
