use anyhow::*;
use directories_next::BaseDirs;
use std::path::PathBuf;
use tracing::info;

pub const DATA_DIR_ENV: &str = "MCQ_BANK_DATA_DIR";

#[derive(Debug)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Uses the directory given on the command line (or through
    /// `MCQ_BANK_DATA_DIR`), falling back to the platform data directory.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Config> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => {
                let dir = default_data_dir()?;
                info!(?dir, "{} not set, using default dataset directory", DATA_DIR_ENV);
                dir
            }
        };
        Ok(Config { data_dir })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let mut dir = BaseDirs::new()
        .context("could not locate system directories")?
        .data_dir()
        .to_path_buf();
    dir.push("mcq-bank");
    dir.push("sanfoundry");
    Ok(dir)
}
