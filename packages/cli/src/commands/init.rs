use crate::config::{Config, DEFAULT_CONFIG_NAME};
use crate::page_file::save_page;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_common::document::DEFAULT_SLUG;
use pagecraft_common::{samples, IdGenerator, RealFileSystem};
use pagecraft_editor::{Mutation, PageStore};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Slug of the first page (defaults to the sample's slug or "new-page")
    #[arg(long)]
    pub slug: Option<String>,

    /// Title of the first page
    #[arg(long)]
    pub title: Option<String>,

    /// Start from a bundled sample page (auto-gallery, dental-clinic)
    #[arg(long)]
    pub sample: Option<String>,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    println!(
        "{}",
        "📝 Initializing Pagecraft project...".bright_blue().bold()
    );

    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);
    let config = if config_path.exists() && !args.force {
        println!(
            "  {} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        Config::load(cwd)?
    } else {
        let config = Config::default();
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
        config
    };

    let mut store = match &args.sample {
        Some(name) => PageStore::from_document(samples::load(name)?, IdGenerator::random())?,
        None => PageStore::new(),
    };

    let slug = args
        .slug
        .clone()
        .or_else(|| args.sample.as_ref().map(|_| store.document().slug.clone()))
        .unwrap_or_else(|| DEFAULT_SLUG.to_string());

    store.apply(Mutation::UpdateMeta {
        title: args.title.clone(),
        description: None,
        slug: Some(slug.clone()),
    })?;

    let pages_dir = config.get_pages_dir(cwd);
    let page_path = pages_dir.join(format!("{}.json", slug));
    let relative = PathBuf::from(&config.pages_dir).join(format!("{}.json", slug));

    if page_path.exists() && !args.force {
        println!(
            "  {} {} already exists",
            "⚠️".yellow(),
            relative.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    save_page(&mut RealFileSystem, &page_path, &store)?;
    println!(
        "  {} Created {} ({} blocks)",
        "✓".green(),
        relative.display(),
        store.document().blocks.len()
    );

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft block {} add heroSection", relative.display());
    println!("  2. Run: pagecraft compile");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}
