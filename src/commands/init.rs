use crate::commands::Out;
use crate::Config;
use anyhow::{bail, Context};
use std::path::Path;

/// Writes the default configuration to `path`, or to the default location if `path` is `None`.
///
/// # Errors
/// - Returns an error if the file exists and `force` is false, if no home directory can be found,
///   or if the file cannot be written.
pub async fn init_config(path: Option<&Path>, force: bool) -> anyhow::Result<Out<()>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::default_path()
            .context("Unable to find your home directory, pass --config instead")?,
    };
    if path.exists() && !force {
        bail!(
            "A config file already exists at '{}', pass --force to overwrite it",
            path.display()
        );
    }
    Config::default().save(&path).await?;
    Ok(format!("Wrote the default config to {}", path.display()).into())
}
