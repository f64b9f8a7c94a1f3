use crate::config::Config;
use crate::page_file::open_page;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_common::{FileSystem, RealFileSystem};
use pagecraft_compiler_react::{compile_page, CompileOptions, ExportWarning, GeneratedPage};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File name of the generated page module inside each page's output directory
pub const PAGE_FILE_NAME: &str = "page.tsx";

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Page file or directory of pages (defaults to the configured pages directory)
    pub path: Option<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Print generated code to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Omit the generated-by header
    #[arg(long)]
    pub no_header: bool,
}

/// Result of compiling one page file
struct CompiledFile {
    output: String,
    assets: usize,
    warnings: Vec<ExportWarning>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let input = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_pages_dir(cwd),
    };
    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let mut options = config.compile_options();
    if args.no_header {
        options.include_header = false;
    }

    let page_files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        find_page_files(&input)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    if page_files.is_empty() {
        println!("{}", "⚠️  No page files found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "🔨 Compiling pages...".bright_blue().bold());
        println!("Found {} files", page_files.len());
    }

    let base = if input.is_dir() { input.as_path() } else { Path::new(cwd) };
    let mut fs = RealFileSystem;
    let mut success_count = 0;
    let mut error_count = 0;
    let mut warning_count = 0;

    for page_file in &page_files {
        let relative_path = page_file.strip_prefix(base).unwrap_or(page_file);

        match compile_file(&mut fs, page_file, &options, &out_dir, args.stdout) {
            Ok(compiled) => {
                success_count += 1;
                warning_count += compiled.warnings.len();

                if !args.stdout {
                    println!(
                        "  {} {} → {} ({} images)",
                        "✓".green(),
                        relative_path.display(),
                        compiled.output,
                        compiled.assets
                    );
                }
                for warning in &compiled.warnings {
                    eprintln!("    {} {}", "⚠️".yellow(), warning);
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    if args.stdout {
        return Ok(());
    }

    println!();
    if error_count == 0 && warning_count == 0 {
        println!("{} Compiled {} pages successfully", "✅".green(), success_count);
    } else {
        println!(
            "{} Compiled {} pages, {} errors, {} warnings",
            "⚠️".yellow(),
            success_count,
            error_count,
            warning_count
        );
    }

    Ok(())
}

fn find_page_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();

    files.sort();
    files
}

fn compile_file(
    fs: &mut impl FileSystem,
    file_path: &Path,
    options: &CompileOptions,
    out_dir: &Path,
    stdout: bool,
) -> Result<CompiledFile> {
    let store = open_page(&*fs, file_path)?;
    let document = store.document();
    let generated = compile_page(document, options);

    let output = if stdout {
        println!("{}", generated.code);
        "stdout".to_string()
    } else {
        let page_dir = out_dir.join(output_dir_name(&document.slug));
        write_generated(fs, &page_dir, &generated)?;
        page_dir.join(PAGE_FILE_NAME).display().to_string()
    };

    Ok(CompiledFile {
        output,
        assets: generated.assets.len(),
        warnings: generated.warnings,
    })
}

/// Write the page module and its images under `page_dir`
fn write_generated(fs: &mut impl FileSystem, page_dir: &Path, generated: &GeneratedPage) -> Result<()> {
    let page_path = page_dir.join(PAGE_FILE_NAME);
    fs.write(&page_path, generated.code.as_bytes())
        .with_context(|| format!("Cannot write {}", page_path.display()))?;

    for asset in &generated.assets {
        let asset_path = page_dir.join(&asset.filename);
        debug!(path = %asset_path.display(), bytes = asset.data.len(), "Writing image");
        fs.write(&asset_path, &asset.data)
            .with_context(|| format!("Cannot write {}", asset_path.display()))?;
    }

    Ok(())
}

/// Slugs are user-edited; keep them to one safe path component
fn output_dir_name(slug: &str) -> String {
    let name: String = slug
        .trim_matches('/')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();

    if name.trim_matches('-').is_empty() {
        "page".to_string()
    } else {
        name
    }
}
