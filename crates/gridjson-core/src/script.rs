//! Rhai scripts as header key functions.
//!
//! A script sees these variables and evaluates to the header label:
//! - `content` - the cell content as a string
//! - `axis` - `"col"` or `"row"`
//! - `format` - the cell's number format, or `""`
//!
//! ```ignore
//! let key = compile_header_key(r#"content.trim(); content.to_lower()"#)?;
//! ```

use gridjson_engine::engine::{Axis, Cell, HeaderKeyFn, Sheet};
use rhai::{Dynamic, Engine, Scope};

use crate::error::{GridjsonError, Result};

const MAX_KEY_SCRIPT_BYTES: usize = 65_536;

/// Compile `script` into a header key function.
///
/// Compile errors are returned here. A script that fails at run time keeps
/// the raw content as the label.
pub fn compile_header_key(script: &str) -> Result<Box<HeaderKeyFn>> {
    if script.len() > MAX_KEY_SCRIPT_BYTES {
        return Err(GridjsonError::RhaiCompile(format!(
            "Header key script too large ({} bytes, max {})",
            script.len(),
            MAX_KEY_SCRIPT_BYTES
        )));
    }

    let engine = Engine::new();
    let ast = engine
        .compile(script)
        .map_err(|e| GridjsonError::RhaiCompile(format!("Error in header key: {}", e)))?;

    Ok(Box::new(
        move |content: &str, cell: &Cell, axis: Axis, _sheet: &Sheet| {
            let mut scope = Scope::new();
            scope.push("content", content.to_string());
            scope.push("axis", axis.as_str().to_string());
            scope.push("format", cell.format.clone().unwrap_or_default());

            match engine.eval_ast_with_scope::<Dynamic>(&mut scope, &ast) {
                Ok(label) if label.is_unit() => content.to_string(),
                Ok(label) => label.to_string(),
                Err(err) => {
                    log::warn!("header key failed for {:?}: {}", content, err);
                    content.to_string()
                }
            }
        },
    ))
}
