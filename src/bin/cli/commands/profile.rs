use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let profiles = app.storage.list_profiles()?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = profiles
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "id": p.id.to_string(),
                        "name": p.name,
                        "createdAt": p.created_at.to_rfc3339(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if profiles.is_empty() {
                println!("No profiles found.");
                return Ok(());
            }
            for profile in &profiles {
                let current = if profile.id == app.profile.id { " (current)" } else { "" };
                println!("{}{}", profile.name, current);
            }
        }
    }

    Ok(())
}

pub fn run_create(app: &App, name: &str) -> Result<()> {
    let profile = app.storage.create_profile(name.to_string())?;
    println!("Created profile '{}' ({})", profile.name, profile.id);
    Ok(())
}
