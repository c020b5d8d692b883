use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub const fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))),
        )
}

pub trait Process {
    async fn process(
        self,
        globals: &GlobalOptions,
    ) -> anyhow::Result<i32>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Parser)]
#[clap(version, about, styles=get_styles())]
pub struct Args {
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    #[clap(flatten)]
    pub globals: GlobalOptions,

    #[clap(subcommand)]
    pub cmd: Option<Commands>,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Parser)]
pub struct GlobalOptions {
    /// The region the bucket resides in [default: us-east-1]
    #[arg(short, long, global = true)]
    pub region: Option<String>,

    /// AWS credential profile
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Custom endpoint for S3-compatible storage (R2, MinIO, ...)
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Parser)]
pub struct EmptyBucketOptions {
    /// The bucket to empty (falls back to `S3_BUCKET`)
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Don't ask, just delete everything
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Parser)]
pub struct ListOptions {
    /// The bucket to list (falls back to `S3_BUCKET`)
    #[arg(short, long)]
    pub bucket: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Subcommand)]
pub enum Commands {
    /// Erase all objects and delete markers in a bucket
    EmptyBucket(EmptyBucketOptions),
    /// Show the first page of object versions and delete markers in a bucket
    List(ListOptions),
}

impl Process for Commands {
    async fn process(
        self,
        globals: &GlobalOptions,
    ) -> anyhow::Result<i32> {
        match self {
            Self::EmptyBucket(opts) => opts.process(globals).await,
            Self::List(opts) => opts.process(globals).await,
        }
    }
}
