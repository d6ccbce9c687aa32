use std::env;
use std::path::PathBuf;

use spacetraveling::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();

    [exe_dir, cur_dir, dirs::config_dir()]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err("Could not find spaceTraveling configuration".to_string()),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir()
                .map(|dir| dir.join("SpaceTraveling").join("log").join("server.log"));
        }
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled without a cache dir. Using stdout"),
        }
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}
