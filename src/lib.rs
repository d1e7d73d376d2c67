pub mod comments;
pub mod conditions;
pub mod config;
pub mod declarations;
pub mod depth;
pub mod error;
pub mod filter;
pub mod ir;
pub mod normalize;
pub mod operators;
pub mod pointers;
pub mod power;
pub mod scan;
pub mod signature;
pub mod slice;
pub mod types;

pub use config::Config;
pub use error::Error;
pub use ir::{FunctionSignature, Line, MarkedLine, TypeTable};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct Rewritten {
    pub lines: Vec<Line>,
    pub types: TypeTable,
}

/// Stages 2–9: every text rewrite, before depth encoding.
pub fn rewrite(lines: &[Line], signature: &FunctionSignature, config: &Config) -> Rewritten {
    // Stage 2
    let lines = comments::stage2(lines);

    // Stage 3
    let types = types::stage3(&lines, &config.extra_types);
    debug!(types = types.len(), "type table built");

    // Stage 4
    let lines = declarations::stage4(&lines, &types, signature.preserve_pointer_syntax);
    debug!(stage = "declarations", lines = lines.len());

    // Stage 5
    let lines = filter::stage5(&lines);
    debug!(stage = "filter", lines = lines.len());

    // Stage 6
    let lines = conditions::stage6(&lines);

    // Stage 7
    let lines = operators::stage7(&lines, config.max_passes);

    // Stage 8
    let lines = power::stage8(&lines);

    // Stage 9
    let lines = pointers::stage9(&lines, config.max_passes);

    Rewritten { lines, types }
}

pub fn transform(text: &str, config: &Config) -> Vec<MarkedLine> {
    // Stage 0
    let normalize::Source { lines, descriptor } = normalize::stage0(text);

    // Stage 1
    let signature = signature::extract(&descriptor);
    if signature.is_empty() {
        info!(descriptor = %descriptor, "descriptor names no function");
    }

    let Rewritten { lines, types } = rewrite(&lines, &signature, config);

    // Stage 10
    let marked = depth::stage10(&lines, config.indent_width);
    debug!(stage = "depth", lines = marked.len());

    // Stage 11
    let out = slice::stage11(&marked, &signature, &types);
    info!(
        names = ?signature.names,
        lines = out.len(),
        "function slices extracted"
    );
    out
}

pub fn render(lines: &[MarkedLine]) -> String {
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{}.tmp", name))
}

/// Write through a sibling temp file so a failed run never leaves a partial
/// output behind.
fn write_atomic(path: &Path, contents: &str) -> Result<(), Error> {
    let tmp = temp_path(path);
    let write_err = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, contents).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        write_err(e)
    })
}

/// Read `input`, run the whole pipeline, write the result to `output`.
pub fn run(input: &Path, output: &Path, config: &Config) -> Result<Vec<MarkedLine>, Error> {
    let text = fs::read_to_string(input).map_err(|source| Error::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let lines = transform(&text, config);
    write_atomic(output, &render(&lines))?;
    Ok(lines)
}
