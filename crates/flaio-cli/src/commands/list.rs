use anyhow::Result;

use flaio_core::ProjectSet;

pub fn run(projects: &ProjectSet, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(projects.as_slice())?);
        return Ok(());
    }

    println!("Projects ({}):\n", projects.len());

    for (i, project) in projects.iter().enumerate() {
        println!(
            "  {}. {} {} - {}",
            i + 1,
            project.icon,
            project.word,
            project.name
        );
        println!("    {}", project.description);
        println!("    {}: {}", project.link_label, project.href);
        if !project.apps.is_empty() {
            let apps: Vec<String> = project
                .apps
                .iter()
                .map(|a| format!("{} {}", a.icon, a.name))
                .collect();
            println!("    Apps: {}", apps.join(", "));
        }
        if !project.tags.is_empty() {
            println!("    Tags: {}", project.tags.join(", "));
        }
        println!();
    }

    Ok(())
}
