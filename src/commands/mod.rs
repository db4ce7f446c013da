//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod extract_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use extract_command::ExtractCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::catalog::errors::CatalogResult;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct AssetkitCommandFactory;

impl AssetkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        AssetkitCommandFactory
    }
}

impl<'a> CommandFactory<'a> for AssetkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> CatalogResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("extract") {
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        } else {
            // Default to analyze command
            Ok(Box::new(AnalyzeCommand::new(args, logger)?))
        }
    }
}
