use super::open_editor;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::Mutation;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// JSON file holding an array of mutations
    pub file: PathBuf,

    /// Page slug (defaults to the homepage)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Apply and report without saving
    #[arg(long)]
    pub dry_run: bool,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;

    let path = cwd.join(&args.file);
    let content =
        fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid mutations in {}", path.display()))?;

    let mut editor = open_editor(cwd, &config, args.page.as_deref())?;
    let page = editor.active_page().name;
    println!(
        "{} {} mutations to {}",
        "Applying".bright_blue().bold(),
        mutations.len(),
        page.bold()
    );

    let total = mutations.len();
    let mut changed = 0;
    for mutation in mutations {
        let label = describe(&mutation);
        let edits_layout = mutation.edits_layout();
        if editor.builder_mut().apply(mutation).changed {
            if edits_layout {
                changed += 1;
            }
            println!("  {} {}", "✓".green(), label);
        } else {
            println!("  {} {} {}", "-".dimmed(), label, "(no change)".dimmed());
        }
    }

    println!();
    if args.dry_run {
        println!("{} {} of {} mutations changed the page (not saved)", "!".yellow(), changed, total);
        return Ok(());
    }
    if changed == 0 {
        println!("{} Nothing to save", "!".yellow());
        return Ok(());
    }

    let id = editor.save().context("Cannot save page")?;
    tracing::debug!(page = %id, changed, "applied mutations");
    println!("{} Applied {} of {} mutations", "✓".green(), changed, total);
    Ok(())
}

fn describe(mutation: &Mutation) -> String {
    match mutation {
        Mutation::AddBlock { block_type } => format!("add {}", block_type),
        Mutation::InsertBlock {
            container_id,
            index,
            block,
        } => format!("insert {} {} into {} at {}", block.type_name(), block.id, container_id, index),
        Mutation::UpdateBlock { block_id, .. } => format!("update {}", block_id),
        Mutation::RemoveBlock { block_id } => format!("remove {}", block_id),
        Mutation::Reorder(drop) => match &drop.destination {
            Some(to) => format!(
                "move {}[{}] to {}[{}]",
                drop.source.container_id, drop.source.index, to.container_id, to.index
            ),
            None => "cancelled drag".to_string(),
        },
        Mutation::Select { block_id: Some(id) } => format!("select {}", id),
        Mutation::Select { block_id: None } => "clear selection".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, InitArgs};
    use pagecraft_editor::JsonFileStore;
    use pagecraft_model::BlockType;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                name: "Shop".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_apply_saves_page() {
        let dir = project();
        fs::write(
            dir.path().join("edits.json"),
            r#"[
                { "type": "addBlock", "blockType": "hero" },
                { "type": "addBlock", "blockType": "columns" },
                { "type": "removeBlock", "blockId": "missing" }
            ]"#,
        )
        .unwrap();

        apply(
            ApplyArgs {
                file: PathBuf::from("edits.json"),
                page: None,
                dry_run: false,
            },
            dir.path(),
        )
        .unwrap();

        let site = JsonFileStore::new(dir.path().join("site.json")).load().unwrap();
        let layout = &site.homepage().unwrap().layout;
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].block_type(), Some(BlockType::Hero));
        assert_eq!(layout[1].children.len(), 2);
    }

    #[test]
    fn test_dry_run_does_not_save() {
        let dir = project();
        fs::write(
            dir.path().join("edits.json"),
            r#"[{ "type": "addBlock", "blockType": "spacer" }]"#,
        )
        .unwrap();

        apply(
            ApplyArgs {
                file: PathBuf::from("edits.json"),
                page: None,
                dry_run: true,
            },
            dir.path(),
        )
        .unwrap();

        let site = JsonFileStore::new(dir.path().join("site.json")).load().unwrap();
        assert!(site.homepage().unwrap().layout.is_empty());
    }

    #[test]
    fn test_unknown_page_is_an_error() {
        let dir = project();
        fs::write(dir.path().join("edits.json"), "[]").unwrap();

        let err = apply(
            ApplyArgs {
                file: PathBuf::from("edits.json"),
                page: Some("nope".to_string()),
                dry_run: false,
            },
            dir.path(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Page not found: nope");
    }

    #[test]
    fn test_selection_only_is_not_saved() {
        let dir = project();
        let site_path = dir.path().join("site.json");
        let mut editor = open_editor(dir.path(), &Config::default(), None).unwrap();
        let id = editor.builder_mut().add_block(BlockType::Hero);
        editor.builder_mut().clear_selection();
        editor.save().unwrap();
        let before = fs::read_to_string(&site_path).unwrap();

        fs::write(
            dir.path().join("edits.json"),
            format!(r#"[{{ "type": "select", "blockId": "{}" }}]"#, id),
        )
        .unwrap();
        apply(
            ApplyArgs {
                file: PathBuf::from("edits.json"),
                page: None,
                dry_run: false,
            },
            dir.path(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&site_path).unwrap(), before);
    }

    #[test]
    fn test_describe_reorder() {
        let mutation: Mutation = serde_json::from_str(
            r#"{ "type": "reorder",
                 "source": { "containerId": "canvas", "index": 0 },
                 "destination": { "containerId": "s1", "index": 2 } }"#,
        )
        .unwrap();
        assert_eq!(describe(&mutation), "move canvas[0] to s1[2]");
    }
}
