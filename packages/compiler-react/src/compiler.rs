use crate::assets::{AssetCollector, ImageAsset};
use crate::components::component_for;
use crate::context::{CompileOptions, CompilerContext};
use crate::props::compile_props;
use crate::warnings::ExportWarning;
use pagecraft_common::{Block, BlockKind, PageDocument};
use serde::Serialize;
use tracing::{info, warn};

/// Output of one export pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPage {
    /// Page module source (`page.tsx`)
    pub code: String,
    /// One record per distinct inline image, in first-seen order
    pub assets: Vec<ImageAsset>,
    pub warnings: Vec<ExportWarning>,
}

/// Compile a page document to a React page module.
///
/// Never fails: blocks that cannot be exported are marked in the output and
/// reported in `warnings`.
pub fn compile_page(document: &PageDocument, options: &CompileOptions) -> GeneratedPage {
    let ctx = CompilerContext::new(options.clone());
    let mut collector = AssetCollector::new(&ctx.options.image_dir);
    let mut imports: Vec<String> = Vec::new();
    let mut warnings = Vec::new();

    // Blocks render first so imports are known before the module header
    let body = ctx.with_new_buffer();
    body.indent();
    body.indent();
    body.indent();

    for block in &document.blocks {
        match &block.kind {
            BlockKind::Known(block_type) => {
                let component = component_for(*block_type);
                let import = component.import_statement();
                if !imports.contains(&import) {
                    imports.push(import);
                }

                compile_block(block, component.name, &mut collector, &body);
                warnings.extend(collector.take_warnings());
            }
            BlockKind::Unknown(tag) => {
                compile_unknown_block(block, tag, &body);
                warnings.push(ExportWarning::UnknownBlockType {
                    block_id: block.id.clone(),
                    block_type: tag.clone(),
                });
            }
        }
    }

    body.dedent();
    body.dedent();
    body.dedent();

    compile_header(document, &ctx);

    if !imports.is_empty() {
        for import in &imports {
            ctx.add_line(import);
        }
        ctx.add("\n");
    }

    ctx.add_line("export default function Page() {");
    ctx.indent();
    ctx.add_line("return (");
    ctx.indent();
    ctx.add_line("<main>");
    ctx.merge_buffer(&body);
    ctx.add_line("</main>");
    ctx.dedent();
    ctx.add_line(");");
    ctx.dedent();
    ctx.add_line("}");

    for warning in &warnings {
        warn!(slug = %document.slug, block_id = %warning.block_id(), "{}", warning);
    }

    let assets = collector.into_assets();

    info!(
        slug = %document.slug,
        blocks = document.blocks.len(),
        assets = assets.len(),
        warnings = warnings.len(),
        "Compiled page"
    );

    GeneratedPage {
        code: ctx.get_output(),
        assets,
        warnings,
    }
}

fn compile_header(document: &PageDocument, ctx: &CompilerContext) {
    if !ctx.options.include_header {
        return;
    }

    ctx.add_line("/**");
    ctx.add_line(" * Generated by Pagecraft");
    ctx.add_line(&format!(
        " * Page: {} (/{})",
        comment_safe(&document.meta.title),
        comment_safe(&document.slug)
    ));
    ctx.add_line(" */");
    ctx.add("\n");
}

fn compile_block(block: &Block, component_name: &str, collector: &mut AssetCollector, ctx: &CompilerContext) {
    // Rewrite a copy; the caller's document keeps its inline data
    let mut props = block.props.clone();
    collector.collect_block(&block.id, &mut props);

    ctx.add_line(&format!("<{}", component_name));
    ctx.indent();
    compile_props(&block.id, &props, ctx);
    ctx.dedent();
    ctx.add_line("/>");
}

fn compile_unknown_block(block: &Block, tag: &str, ctx: &CompilerContext) {
    ctx.add_line(&format!(
        "{{/* Unknown block type: {} ({}) */}}",
        comment_safe(tag),
        comment_safe(&block.id)
    ));
}

fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /").replace(['\n', '\r'], " ")
}
