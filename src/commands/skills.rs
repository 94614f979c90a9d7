use anyhow::Result;

use skillmatch::AppConfig;

pub fn execute(config: &AppConfig, json: bool) -> Result<()> {
    let store = super::open_store(config)?;
    let skills = store.list_skills()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&skills)?);
        return Ok(());
    }

    if skills.is_empty() {
        println!("No skills registered");
        return Ok(());
    }

    for skill in &skills {
        println!("{:>5}  {}", skill.id, skill.name);
    }
    println!("\n{} skills", skills.len());
    Ok(())
}
