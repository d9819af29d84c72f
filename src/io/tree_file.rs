//! Tree data files.
//!
//! A tree file is a JSON array of root nodes. Paths ending in `.br` are
//! Brotli-compressed.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use anyhow::{Context, Result};
use brotli::enc::BrotliEncoderParams;
use brotli::{CompressorWriter, Decompressor};
use tracing::debug;
use crate::node::TreeNode;

fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "br")
}

/// Reads a tree from `path`, decompressing `.br` files transparently.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// let roots = treecombo::io::read_tree("tree.json")?;
/// let compressed = treecombo::io::read_tree("tree.json.br")?;
/// # Ok(())
/// # }
/// ```
pub fn read_tree(path: impl AsRef<Path>) -> Result<Vec<TreeNode>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let reader: Box<dyn Read> = if is_compressed(path) {
        Box::new(BufReader::new(Decompressor::new(file, 4096)))
    } else {
        Box::new(BufReader::new(file))
    };

    let roots: Vec<TreeNode> = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse tree: {}", path.display()))?;
    debug!(path = %path.display(), roots = roots.len(), "tree loaded");
    Ok(roots)
}

/// Writes `roots` to `path`, compressing when the path ends with `.br`.
///
/// Brotli compression uses quality level 6 (balanced speed/ratio).
pub fn write_tree(path: impl AsRef<Path>, roots: &[TreeNode]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    let mut writer: Box<dyn Write> = if is_compressed(path) {
        let params = BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        };
        Box::new(CompressorWriter::with_params(BufWriter::new(file), 4096, &params))
    } else {
        Box::new(BufWriter::new(file))
    };

    serde_json::to_writer(&mut writer, roots)
        .with_context(|| format!("Failed to serialize tree: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    debug!(path = %path.display(), roots = roots.len(), "tree written");
    Ok(())
}
