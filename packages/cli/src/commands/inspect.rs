use super::open_editor;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::Forest;
use pagecraft_model::BlockSettings;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Page slug (defaults to the homepage)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Print the page layout as JSON instead of a tree
    #[arg(long)]
    pub json: bool,
}

pub fn inspect(args: InspectArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let editor = open_editor(cwd, &config, args.page.as_deref())?;

    if args.json {
        println!("{}", editor.builder().serialize_pretty()?);
        return Ok(());
    }

    println!("{} ({})", editor.name().bold(), editor.slug());
    for page in editor.pages() {
        let marker = if page.id == editor.active_id() { ">" } else { " " };
        let home = if page.is_homepage {
            format!(" {}", "[home]".cyan())
        } else {
            String::new()
        };
        println!("{} {} /{}{}", marker, page.name, page.slug, home);
    }
    println!();

    let lines = describe_tree(editor.builder().forest());
    if lines.is_empty() {
        println!("{}", "(empty page)".dimmed());
    }
    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

/// One line per block in pre-order, indented by depth
pub(crate) fn describe_tree(forest: &Forest) -> Vec<String> {
    forest
        .walk()
        .into_iter()
        .map(|(depth, node)| {
            let mut line = format!("{}{} {}", "  ".repeat(depth), node.type_name(), node.id());
            if node.block_type().is_none() {
                line.push_str(" (unknown type)");
            }
            if let Some(summary) = summary(node.settings()) {
                line.push_str(&format!("  \"{}\"", summary));
            }
            line
        })
        .collect()
}

fn summary(settings: &BlockSettings) -> Option<String> {
    let text = match settings {
        BlockSettings::Heading(s) => s.text.as_deref(),
        BlockSettings::Hero(s) => s.title.as_deref(),
        BlockSettings::Button(s) => s.text.as_deref(),
        BlockSettings::Image(s) => s.src.as_deref(),
        BlockSettings::Video(s) => s.source_url.as_deref(),
        BlockSettings::Map(s) => s.address.as_deref(),
        _ => None,
    }?;

    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(match text.char_indices().nth(40) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{parse_layout, SequentialIdGenerator};
    use serde_json::json;

    #[test]
    fn test_describe_tree() {
        let blocks = parse_layout(
            &json!([
                { "id": "s", "type": "section", "settings": {}, "children": [
                    { "id": "h", "type": "heading", "settings": { "text": "Hello" } }
                ] },
                { "id": "w", "type": "widget", "settings": {} }
            ])
            .to_string(),
        )
        .unwrap();
        let forest = Forest::from_blocks(blocks, &mut SequentialIdGenerator::from_seed("t"));

        assert_eq!(
            describe_tree(&forest),
            vec![
                "section s".to_string(),
                "  heading h  \"Hello\"".to_string(),
                "widget w (unknown type)".to_string(),
            ]
        );
    }

    #[test]
    fn test_long_summary_is_cut() {
        let settings = BlockSettings::from_parts("heading", json!({ "text": "x".repeat(60) }));
        let text = summary(&settings).unwrap();
        assert_eq!(text.len(), 43);
        assert!(text.ends_with("..."));
    }
}
