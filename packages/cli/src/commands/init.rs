use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::JsonFileStore;
use pagecraft_model::{slugify, Page, SiteSnapshot};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Site name
    #[arg(short, long, default_value = "My Site")]
    pub name: String,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "!".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "Initializing Pagecraft site...".bright_blue().bold());

    let config = Config::default();
    let slug = match slugify(&args.name) {
        slug if slug.is_empty() => "site".to_string(),
        slug => slug,
    };

    let mut home = Page::new("home", "Home");
    home.is_homepage = true;
    let site = SiteSnapshot {
        site_id: slug.clone(),
        name: args.name.clone(),
        slug,
        pages: vec![home],
        products: Vec::new(),
    };

    let site_path = config.site_path(cwd);
    if site_path.exists() && !args.force {
        println!("  {} Kept existing {}", "-".dimmed(), config.site_file);
    } else {
        JsonFileStore::new(&site_path)
            .create(&site)
            .with_context(|| format!("Cannot write {}", site_path.display()))?;
        println!("  {} Created {}", "✓".green(), config.site_file);
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)
        .with_context(|| format!("Cannot write {}", config_path.display()))?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft apply mutations.json");
    println!("  2. Run: pagecraft render");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config_and_site() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                name: "Acme Goods".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        assert!(dir.path().join(DEFAULT_CONFIG_NAME).exists());
        let site = JsonFileStore::new(dir.path().join("site.json")).load().unwrap();
        assert_eq!(site.site_id, "acme-goods");
        assert_eq!(site.name, "Acme Goods");
        assert_eq!(site.pages.len(), 1);
        assert!(site.pages[0].is_homepage);
    }

    #[test]
    fn test_init_keeps_existing_project() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                name: "First".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        init(
            InitArgs {
                name: "Second".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();
        let site = JsonFileStore::new(dir.path().join("site.json")).load().unwrap();
        assert_eq!(site.name, "First");

        init(
            InitArgs {
                name: "Second".to_string(),
                force: true,
            },
            dir.path(),
        )
        .unwrap();
        let site = JsonFileStore::new(dir.path().join("site.json")).load().unwrap();
        assert_eq!(site.name, "Second");
    }
}
