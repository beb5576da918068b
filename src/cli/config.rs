//! Config command implementation

use anyhow::Result;
use std::path::Path;

use ts_launcher::config::Config;

/// Print the saved settings, or update them when values are given
pub fn config_command(config_path: &Path, path: Option<String>, key: Option<String>) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    if path.is_none() && key.is_none() {
        let launch = config.launch_config();
        println!("Config file: {}", config_path.display());
        println!(
            "  executable_path = {}",
            if launch.executable_path.is_empty() { "<not set>" } else { &launch.executable_path }
        );
        println!("  api_key         = {}", launch.masked_key());
        println!("  running_on      = {:?}", config.session.running_on);
        return Ok(());
    }

    if let Some(path) = path {
        config.launcher.executable_path = path;
    }
    if let Some(key) = key {
        config.launcher.api_key = key;
    }
    config.save_to_file(config_path)?;
    println!("Settings saved to {}", config_path.display());

    Ok(())
}
