use crate::page_file::{open_page, save_page};
use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use pagecraft_common::visitor::walk_props;
use pagecraft_common::{registry, BlockType, FileSystem, PropPath, PropVisitor, Props, RealFileSystem, RESERVED_KEYS};
use pagecraft_compiler_react::is_inline_image;
use pagecraft_editor::{Mutation, MutationEffect, PageStore};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct BlockArgs {
    /// Page document to edit
    pub page: PathBuf,

    #[command(subcommand)]
    pub action: BlockAction,
}

#[derive(Debug, Subcommand)]
pub enum BlockAction {
    /// Add a block with its default properties
    Add {
        /// Block type, e.g. heroSection (see `pagecraft registry`)
        block_type: String,

        /// Insert position (appends when omitted or past the end)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Remove a block
    Remove { id: String },

    /// Move the block at FROM so it ends up at TO
    Move { from: usize, to: usize },

    /// Insert a copy of a block right after it
    Duplicate { id: String },

    /// Set block properties; values are JSON, or plain strings otherwise
    Set {
        id: String,

        /// key=value pairs
        #[arg(required = true)]
        assignments: Vec<String>,
    },

    /// List the page's blocks in order
    List,
}

pub fn block(args: BlockArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.page);
    run(&mut RealFileSystem, &path, args.action)
}

fn run(fs: &mut impl FileSystem, path: &Path, action: BlockAction) -> Result<()> {
    let mut store = open_page(&*fs, path)?;

    let mutation = match action {
        BlockAction::List => {
            list_blocks(&store);
            return Ok(());
        }
        BlockAction::Add { block_type, index } => {
            require_block_type(&block_type)?;
            Mutation::AddBlock { block_type, index }
        }
        BlockAction::Remove { id } => {
            require_block(&store, &id)?;
            Mutation::RemoveBlock { block_id: id }
        }
        BlockAction::Move { from, to } => {
            let len = store.document().blocks.len();
            if from >= len {
                bail!("No block at index {} (page has {} blocks)", from, len);
            }
            Mutation::MoveBlock {
                from_index: from,
                to_index: to,
            }
        }
        BlockAction::Duplicate { id } => {
            require_block(&store, &id)?;
            Mutation::DuplicateBlock { block_id: id }
        }
        BlockAction::Set { id, assignments } => {
            require_block(&store, &id)?;
            Mutation::UpdateBlockProps {
                block_id: id,
                props: parse_assignments(&assignments)?,
            }
        }
    };

    let result = store.apply(mutation)?;

    let message = match &result.effect {
        MutationEffect::Added { block_id, index } => format!("Added {} at {}", block_id, index),
        MutationEffect::Removed { block_id } => format!("Removed {}", block_id),
        MutationEffect::Moved { from_index, to_index } => {
            format!("Moved block {} → {}", from_index, to_index)
        }
        MutationEffect::Duplicated { source_id, block_id } => {
            format!("Duplicated {} as {}", source_id, block_id)
        }
        MutationEffect::Updated { block_id } => format!("Updated {}", block_id),
        MutationEffect::MetaUpdated => "Updated page meta".to_string(),
        MutationEffect::Unchanged => {
            println!("  {} Nothing changed", "⚠️".yellow());
            return Ok(());
        }
    };

    save_page(fs, path, &store)?;
    println!("  {} {}", "✓".green(), message);

    Ok(())
}

fn require_block(store: &PageStore, id: &str) -> Result<()> {
    if store.document().contains_block(id) {
        Ok(())
    } else {
        Err(anyhow!("No block with id {}", id))
    }
}

fn require_block_type(tag: &str) -> Result<()> {
    if tag.parse::<BlockType>().is_ok() {
        return Ok(());
    }

    let available: Vec<&str> = registry::available_block_types()
        .iter()
        .map(BlockType::as_str)
        .collect();
    bail!("Unknown block type `{}`. Use one of: {}", tag, available.join(", "))
}

/// `key=value` pairs into a property bag
fn parse_assignments(assignments: &[String]) -> Result<Props> {
    let mut props = Props::new();

    for assignment in assignments {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected key=value, got `{}`", assignment))?;

        if key.is_empty() {
            bail!("Empty property name in `{}`", assignment);
        }
        if RESERVED_KEYS.contains(&key) {
            bail!("`{}` cannot be changed", key);
        }

        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        props.insert(key.to_string(), value);
    }

    Ok(props)
}

/// Counts inline image values in a property tree
#[derive(Default)]
struct InlineImageCounter(usize);

impl PropVisitor for InlineImageCounter {
    fn visit_string(&mut self, _path: &PropPath, value: &str) {
        if is_inline_image(value) {
            self.0 += 1;
        }
    }
}

fn list_blocks(store: &PageStore) {
    let document = store.document();

    println!(
        "{} {} ({} blocks)",
        "📄".bright_blue(),
        document.meta.title.bold(),
        document.blocks.len()
    );

    for (index, block) in document.blocks.iter().enumerate() {
        let name = match block.block_type() {
            Some(block_type) => registry::entry(block_type).name.to_string(),
            None => "unknown type".red().to_string(),
        };

        let mut counter = InlineImageCounter::default();
        walk_props(&mut counter, &block.props);
        let images = match counter.0 {
            0 => String::new(),
            n => format!(" [{} inline images]", n).dimmed().to_string(),
        };

        println!(
            "  {:>2}. {} {} ({}){}",
            index,
            block.id.bright_white(),
            block.kind,
            name,
            images
        );
    }
}
