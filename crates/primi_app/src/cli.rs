use std::fmt::Display;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use primi_core::MenuAction;

#[derive(Parser)]
#[command(
    name = "primi",
    about = "Desktop client for a remote primitive drawing server",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the client configuration
    #[arg(long, env = "PRIMI_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Watch the server's push stream and raise a notification for every
    /// finished render (default when no subcommand is given).
    Watch,
    /// Submit one image for drawing.
    Draw {
        /// Source image URL the server should fetch.
        src_url: String,
        /// Drawing style to request.
        #[arg(long = "with", value_enum, default_value_t = DrawStyle::Primitive)]
        style: DrawStyle,
    },
    /// Print the configured server address, or replace it.
    Addr {
        /// New address; omit to print the current one.
        value: Option<String>,
    },
    /// List the available draw actions.
    Actions,
    /// Open the configuration file with the system handler.
    Options,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DrawStyle {
    Primitive,
    Triangle,
}

impl Display for DrawStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawStyle::Primitive => write!(f, "primitive"),
            DrawStyle::Triangle => write!(f, "triangle"),
        }
    }
}

impl From<DrawStyle> for MenuAction {
    fn from(style: DrawStyle) -> Self {
        match style {
            DrawStyle::Primitive => MenuAction::Primitive,
            DrawStyle::Triangle => MenuAction::Triangle,
        }
    }
}
