//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Inspect element trees built from JSON element documents
#[derive(Parser, Debug)]
#[command(name = "uitree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (repeat for more: -d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Effective `-d` level; the `verbose` setting counts as one `-d`.
    pub fn log_verbosity(&self, verbose: bool) -> u8 {
        if self.debug == 0 && verbose {
            1
        } else {
            self.debug
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show element tree in display order
    Tree {
        /// Element document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Find an element anywhere in the tree
    Find {
        /// Element document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Element id
        id: String,
    },

    /// List direct children of an element
    Children {
        /// Element document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Parent element (default: root)
        #[arg(long)]
        id: Option<String>,
        /// Display order instead of storage order
        #[arg(short, long)]
        ordered: bool,
    },

    /// List direct children of a content type
    ByType {
        /// Element document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Content type, e.g. link or text_input
        content_type: String,
        /// Parent element (default: root)
        #[arg(long)]
        id: Option<String>,
    },

    /// Show the attribute fragment of an element
    Attrs {
        /// Element document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Element (default: root)
        #[arg(long)]
        id: Option<String>,
    },

    /// Print the normalised document
    Export {
        /// Element document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Template,

    /// Show config paths
    Path,

    /// List templates found in the search paths
    Templates,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["uitree", "tree", "a.json"], false, 0)]
    #[case(&["uitree", "tree", "a.json"], true, 1)]
    #[case(&["uitree", "-dd", "tree", "a.json"], true, 2)]
    #[case(&["uitree", "-ddd", "tree", "a.json"], false, 3)]
    fn given_flags_and_verbose_setting_when_resolving_then_verbosity(
        #[case] argv: &[&str],
        #[case] verbose: bool,
        #[case] expected: u8,
    ) {
        let cli = Cli::parse_from(argv);
        assert_eq!(cli.log_verbosity(verbose), expected);
    }
}
