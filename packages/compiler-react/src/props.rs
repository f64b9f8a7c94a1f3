//! JSX attribute emission for block properties.
//!
//! | value            | emitted as              |
//! |------------------|-------------------------|
//! | plain string     | `key="value"`           |
//! | string needing escapes | `key={"a \"b\""}` |
//! | `true` / `false` | `key` / `key={false}`   |
//! | number           | `key={42}`              |
//! | object / array   | `key={{ ... }}` (pretty JSON) |
//! | `null`           | omitted                 |

use crate::context::CompilerContext;
use pagecraft_common::Props;
use serde_json::Value;

/// Emit `id` followed by every property, one attribute per line
pub fn compile_props(block_id: &str, props: &Props, ctx: &CompilerContext) {
    compile_attribute("id", &Value::String(block_id.to_string()), ctx);

    for (key, value) in props {
        compile_attribute(key, value, ctx);
    }
}

fn compile_attribute(key: &str, value: &Value, ctx: &CompilerContext) {
    match value {
        Value::Null => {}

        Value::String(s) if needs_expression(s) => {
            ctx.add_line(&format!("{}={{{}}}", key, value));
        }
        Value::String(s) => ctx.add_line(&format!("{}=\"{}\"", key, s)),

        Value::Bool(true) => ctx.add_line(key),
        Value::Bool(false) => ctx.add_line(&format!("{}={{false}}", key)),

        Value::Number(n) => ctx.add_line(&format!("{}={{{}}}", key, n)),

        Value::Array(_) | Value::Object(_) => {
            let pretty = format!("{:#}", value);
            let mut lines = pretty.lines();

            ctx.add_indented(&format!("{}={{", key));
            if let Some(first) = lines.next() {
                ctx.add(first);
            }
            for line in lines {
                ctx.add("\n");
                ctx.add_indented(line);
            }
            ctx.add("}\n");
        }
    }
}

/// JSX string attributes cannot hold quotes and have no escapes
fn needs_expression(s: &str) -> bool {
    s.contains(['"', '\\', '\n', '\r'])
}
