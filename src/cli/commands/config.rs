use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;

/// Handle the `config` command (print / check).
pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            println!("{}", content);
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "Config file not found: {} (defaults in use)",
                    path.display()
                ));
                return Ok(());
            }

            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            match serde_yaml::from_str::<Config>(&content) {
                Ok(_) => success("Configuration file is valid."),
                Err(e) => {
                    return Err(AppError::Config(format!(
                        "invalid configuration file: {e}"
                    )));
                }
            }
        }
    }

    Ok(())
}
