use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_common::registry::{self, Category};

#[derive(Debug, Args)]
pub struct RegistryArgs {
    /// Only list one category (layout, content, conversion, social-proof, sector)
    #[arg(short, long)]
    pub category: Option<Category>,
}

pub fn registry(args: RegistryArgs) -> Result<()> {
    let categories = match args.category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        println!("{}", category.as_str().bright_blue().bold());

        for entry in registry::by_category(category) {
            println!(
                "  {} {} - {}",
                format!("{:<18}", entry.block_type.as_str()).bright_white(),
                entry.name,
                entry.description.dimmed()
            );
        }
        println!();
    }

    Ok(())
}
