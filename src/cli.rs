use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "codelib")]
#[command(version)]
#[command(about = "Pack and unpack ZIP archives, deflate and inflate raw streams", long_about = None)]
#[command(after_help = "Examples:\n  \
  codelib zip out.zip notes.txt photos/     pack a file and a directory tree\n  \
  codelib unzip out.zip -d extracted/       extract into extracted/\n  \
  codelib unzip -p out.zip | more           send member contents into more\n  \
  codelib list -v out.zip                   show sizes and compression ratios")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new archive; directories must end in a separator
    Zip {
        /// Archive to create (must not exist)
        #[arg(value_name = "OUTPUT")]
        output: String,

        /// Files and directories to pack
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<String>,
    },

    /// Extract an archive
    Unzip {
        /// ZIP file path
        #[arg(value_name = "ARCHIVE")]
        archive: String,

        /// Extract files into exdir
        #[arg(short = 'd', value_name = "DIR", default_value = "./")]
        extract_dir: String,

        /// Write member data as stored, without decompressing
        #[arg(long)]
        raw: bool,

        /// Extract files to pipe, no messages
        #[arg(short = 'p')]
        pipe: bool,
    },

    /// List archive members
    List {
        /// ZIP file path
        #[arg(value_name = "ARCHIVE")]
        archive: String,

        /// List verbosely
        #[arg(short = 'v')]
        verbose: bool,
    },

    /// Compress a file into a raw deflate stream
    Deflate {
        #[arg(value_name = "INPUT")]
        input: String,

        #[arg(value_name = "OUTPUT")]
        output: String,

        /// Compression level, 0-9
        #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
        level: u32,
    },

    /// Decompress a raw deflate stream
    Inflate {
        #[arg(value_name = "INPUT")]
        input: String,

        #[arg(value_name = "OUTPUT")]
        output: String,
    },
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || matches!(self.command, Command::Unzip { pipe: true, .. })
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Default log filter for the requested quietness.
    pub fn log_level(&self) -> &'static str {
        if self.is_very_quiet() {
            "error"
        } else if self.is_quiet() {
            "warn"
        } else {
            "info"
        }
    }
}
