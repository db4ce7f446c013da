//! Container analysis command
//!
//! This module implements the command for inspecting a container's
//! enumeration model and listing its addressable entries without
//! materializing any of them.

use clap::ArgMatches;
use log::{error, info};

use crate::api::AssetKit;
use crate::catalog::errors::{CatalogError, CatalogResult};
use crate::commands::command_traits::Command;
use crate::utils::logger::Logger;

/// Command for analyzing container contents
pub struct AnalyzeCommand<'a> {
    /// Path to the input container
    input_file: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> CatalogResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| CatalogError::GenericError("Missing input container".to_string()))?
            .clone();
        info!("Input container: {}", input_file);

        Ok(AnalyzeCommand { input_file, logger })
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> CatalogResult<()> {
        info!("Executing analyze command for {}", self.input_file);

        let api = AssetKit::new(Some("assetkit.log"))?;

        let summary = match api.analyze(&self.input_file) {
            Ok(summary) => summary,
            Err(e) => {
                error!("Analysis failed: {}", e);
                return Err(e);
            }
        };

        println!("{}", summary);
        self.logger.log(&summary)?;

        Ok(())
    }
}
