use pagecraft_common::samples;
use pagecraft_compiler_react::{compile_page, CompileOptions};

fn main() {
    let page = samples::load("dental-clinic").expect("bundled sample parses");

    let result = compile_page(&page, &CompileOptions::default());

    println!("{}", result.code);
    for asset in &result.assets {
        println!("// asset: {} ({} bytes)", asset.filename, asset.data.len());
    }
    for warning in &result.warnings {
        println!("// warning: {}", warning);
    }
}
