use std::{env, fs};

use anyhow::{Context, Result};

use super::super::{
    args::InitCommand,
    exit_status::ExitStatus,
    report::{print_failure, print_status},
};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let dir = match cmd.common.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to read current directory")?,
    };
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        print_failure(&format!("{} already exists", CONFIG_FILE_NAME));
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write file: {}", config_path.display()))?;
    print_status(&format!("Created {}", CONFIG_FILE_NAME));

    Ok(ExitStatus::Success)
}
