//! Command handlers for the fnb CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod init;
mod transactions;

use anyhow::Context;
use serde::Serialize;
use std::fmt::Debug;
use tracing::info;

pub use init::init_config;
pub use transactions::{accounts, transactions};

/// What a command hands back to `main`: a one-line summary for the log and, for commands that
/// read data, the records to print.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    message: String,
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out {
            message: value.into(),
            structure: None,
        }
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    pub fn new(message: impl Into<String>, structure: T) -> Self {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Logs the summary and writes the records, if any, to stdout as pretty JSON. Logs go to
    /// stderr, so stdout can be piped straight into another tool.
    pub fn print(&self) -> anyhow::Result<()> {
        info!("{}", self.message);
        let Some(structure) = &self.structure else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(structure)
            .context("Unable to serialize the command output")?;
        println!("{json}");
        Ok(())
    }
}
