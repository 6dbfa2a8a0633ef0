use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use advanceable_cursor::Allocation;

use crate::exit::CliResult;
use crate::layout::{EncodeItem, Field};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a sequence of fields from input bytes.
    Decode(DecodeArgs),
    /// Write a sequence of fields into a fixed-size buffer.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Fields to read, in order (e.g. u16be i24le bytes:4 skip:2 str:5:latin1).
    #[arg(required = true, value_name = "FIELD")]
    pub fields: Vec<Field>,
    /// Input bytes as hex digits; whitespace is ignored.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub hex: Option<String>,
    /// Read input bytes from a file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Values to write, in order (e.g. u16be=258 i8=-1 bytes=beef skip:2 str:utf8=hi).
    #[arg(required = true, value_name = "FIELD=VALUE")]
    pub items: Vec<EncodeItem>,
    /// Buffer size in bytes.
    #[arg(long, short = 's')]
    pub size: usize,
    /// How the buffer is allocated.
    #[arg(long, value_enum, default_value = "zeroed")]
    pub allocation: AllocationArg,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum AllocationArg {
    Zeroed,
    Uninit,
}

impl AllocationArg {
    pub fn as_allocation(self) -> Allocation {
        match self {
            AllocationArg::Zeroed => Allocation::Zeroed,
            AllocationArg::Uninit => Allocation::Uninitialized,
        }
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
