//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for batc.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for batc.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the Bat source file.
    #[arg(index = 1)]
    pub file: std::path::PathBuf,

    /// The path to the output assembly file. Defaults to the input path with
    /// an `.asm` extension.
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,

    /// Whether to dump the parsed AST (for debugging).
    #[arg(long)]
    pub dump_parsed: bool,

    /// Specify the log level of the compiler.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of batc.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// A log level, where also warnings (like truncated literals) are logged.
    #[value(alias("1"))]
    Warn,

    /// Also log information about the general state of the compiler.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally in the compiler.
    #[value(alias("3"))]
    Debug,

    /// Log extra information. This can include more precise debug output or
    /// even non-important errors.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
