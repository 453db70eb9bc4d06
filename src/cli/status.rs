//! Status command implementation

use colored::Colorize;
use serde_json::json;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{IntruceptClient, ScanType};
use crate::config::{CLIENT_SECRET, CONFIG_FILE_NAME, REQUIRED_KEYS, ScanConfig};
use crate::error::Result;
use crate::scan::Project;

/// Run the status command to display the project's scan configuration
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let project = Project::open(opts.project_root())?;
    let client = IntruceptClient::with_host(opts.api_host_ref().map(str::to_string))?;
    let config_path = ScanConfig::path_in(&project.root);
    let config = ScanConfig::read(&project.root);

    if opts.format == OutputFormat::Json {
        let keys: serde_json::Map<String, serde_json::Value> = REQUIRED_KEYS
            .iter()
            .map(|key| {
                let present = config.as_ref().is_some_and(|c| c.get(key).is_some());
                (key.to_string(), json!(present))
            })
            .collect();
        let status = json!({
            "project": project.name,
            "root": project.root.display().to_string(),
            "configFile": config_path.display().to_string(),
            "configFound": config.is_some(),
            "keys": keys,
            "endpoints": {
                "SAST": client.endpoint(ScanType::Sast),
                "SCA": client.endpoint(ScanType::Sca),
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}\n", "Intrucept Scan Status".bold());
    println!(
        "Project: {} ({})",
        project.name.bold(),
        project.root.display().to_string().cyan()
    );
    println!("Config file: {}", config_path.display().to_string().cyan());
    println!();

    match config {
        Some(config) => {
            for key in REQUIRED_KEYS {
                match config.get(key) {
                    Some(value) => {
                        let shown = if key == CLIENT_SECRET {
                            mask(value)
                        } else {
                            value.to_string()
                        };
                        println!("{} {}: {}", "✓".green(), key, shown);
                    }
                    None => {
                        println!("{} {} not configured", "✗".red(), key);
                        println!("  → Add {}=<value> to {}", key, CONFIG_FILE_NAME);
                    }
                }
            }
        }
        None => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Create {} in the project root with APPLICATION_ID, CLIENT_ID and CLIENT_SECRET.",
                CONFIG_FILE_NAME.cyan()
            );
        }
    }

    println!();
    println!("SAST endpoint: {}", client.endpoint(ScanType::Sast).dimmed());
    println!("SCA endpoint:  {}", client.endpoint(ScanType::Sca).dimmed());
    println!();

    Ok(())
}

/// Hide all but the last four characters of a secret
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(8);
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(8), tail)
}
