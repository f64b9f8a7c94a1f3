use crate::page_file::{open_page, save_page};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_common::{FileSystem, RealFileSystem};
use pagecraft_editor::{Mutation, MutationEffect};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct MetaArgs {
    /// Page document to edit
    pub page: PathBuf,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Slug used to name the exported page
    #[arg(long)]
    pub slug: Option<String>,
}

pub fn meta(args: MetaArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.page);
    run(&mut RealFileSystem, &path, args)
}

fn run(fs: &mut impl FileSystem, path: &Path, args: MetaArgs) -> Result<()> {
    let mut store = open_page(&*fs, path)?;

    if args.title.is_none() && args.description.is_none() && args.slug.is_none() {
        let document = store.document();
        println!("{} {}", "Title:".bold(), document.meta.title);
        println!(
            "{} {}",
            "Description:".bold(),
            document.meta.description.as_deref().unwrap_or("")
        );
        println!("{} {}", "Slug:".bold(), document.slug);
        return Ok(());
    }

    let result = store.apply(Mutation::UpdateMeta {
        title: args.title,
        description: args.description,
        slug: args.slug,
    })?;

    if result.effect == MutationEffect::Unchanged {
        println!("  {} Nothing changed", "⚠️".yellow());
        return Ok(());
    }

    save_page(fs, path, &store)?;
    println!("  {} Updated page meta", "✓".green());

    Ok(())
}
