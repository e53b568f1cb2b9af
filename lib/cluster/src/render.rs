//! SVG dendrogram rendering
//!
//! The artifact is purely observational. Writing goes through an atomic
//! temp-file-then-rename so a failed render never leaves a truncated file
//! behind and the file handle is released on every path.

use crate::linkage::Dendrogram;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use hemicycle_core::{Error, Result};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use tracing::debug;

const LEAF_SPACING: f64 = 14.0;
const PLOT_HEIGHT: f64 = 480.0;
const LABEL_SPACE: f64 = 220.0;
const MARGIN: f64 = 40.0;
const ABOVE_CUT_COLOR: &str = "#808080";
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#bcbd22", "#17becf", "#7f7f7f",
];

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `tree` as an SVG document.
///
/// `labels` holds one display name per leaf. Links below the cut at
/// `threshold` groups take the color of their flat group.
pub fn render_svg(tree: &Dendrogram, labels: &[String], threshold: usize, title: &str) -> Result<String> {
    let n = tree.n_leaves();
    if labels.len() != n {
        return Err(Error::RenderFailure(format!(
            "{} labels for {} leaves",
            labels.len(),
            n
        )));
    }

    draw(tree, labels, threshold, title).map_err(|e| Error::RenderFailure(e.to_string()))
}

fn draw(tree: &Dendrogram, labels: &[String], threshold: usize, title: &str) -> std::result::Result<String, std::fmt::Error> {
    let n = tree.n_leaves();
    let merges = tree.merges();
    let flat = tree.cut(threshold);
    let below_cut = tree.merges_below_cut(threshold);

    let max_height = merges
        .iter()
        .map(|m| m.distance)
        .fold(0.0f64, f64::max);
    let y_scale = if max_height > 0.0 { PLOT_HEIGHT / max_height } else { 0.0 };
    let baseline = MARGIN + PLOT_HEIGHT;

    // x position and height for every node id
    let mut x = vec![0.0f64; n + merges.len()];
    let mut height = vec![0.0f64; n + merges.len()];
    // flat group of a node, when all its leaves share one
    let mut group: Vec<Option<u32>> = vec![None; n + merges.len()];

    for (slot, &leaf) in tree.leaf_order().iter().enumerate() {
        x[leaf] = MARGIN + LEAF_SPACING * (slot as f64 + 0.5);
        group[leaf] = flat.get(leaf).copied();
    }
    for (step, merge) in merges.iter().enumerate() {
        let node = n + step;
        x[node] = (x[merge.left] + x[merge.right]) / 2.0;
        height[node] = merge.distance;
        if step < below_cut {
            group[node] = group[merge.left];
        }
    }

    let width = 2.0 * MARGIN + LEAF_SPACING * n as f64;
    let total_height = baseline + LABEL_SPACE;

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        width, total_height, width, total_height
    )?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-size="16" text-anchor="middle">{}</text>"#,
        width / 2.0,
        MARGIN / 2.0,
        escape(title)
    )?;

    for (step, merge) in merges.iter().enumerate() {
        let color = match group[n + step] {
            Some(label) => PALETTE[(label as usize - 1) % PALETTE.len()],
            None => ABOVE_CUT_COLOR,
        };
        let top = baseline - height[n + step] * y_scale;
        let left_y = baseline - height[merge.left] * y_scale;
        let right_y = baseline - height[merge.right] * y_scale;
        writeln!(
            svg,
            r#"<path d="M{:.1},{:.1} V{:.1} H{:.1} V{:.1}" fill="none" stroke="{}"/>"#,
            x[merge.left], left_y, top, x[merge.right], right_y, color
        )?;
    }

    for (leaf, label) in labels.iter().enumerate() {
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="10" transform="rotate(90 {:.1} {:.1})">{}</text>"#,
            x[leaf],
            baseline + 6.0,
            x[leaf],
            baseline + 6.0,
            escape(label)
        )?;
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Atomically write a rendered document to `path`, creating parent directories.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::RenderFailure(format!("{}: {}", parent.display(), e)))?;
        }
    }

    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|file| file.write_all(contents.as_bytes()))
        .map_err(|e| Error::RenderFailure(format!("{}: {}", path.display(), e)))?;

    debug!("Dendrogram written to {:?} ({} bytes)", path, contents.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkage::ward_linkage;

    fn tree() -> Dendrogram {
        ward_linkage(&[vec![0.0], vec![0.5], vec![10.0], vec![10.5]]).unwrap()
    }

    fn names() -> Vec<String> {
        vec![
            "Jane Doe".to_string(),
            "Jon Roe".to_string(),
            "Ana <B>".to_string(),
            "Léa & Co".to_string(),
        ]
    }

    #[test]
    fn test_svg_contains_escaped_labels() {
        let svg = render_svg(&tree(), &names(), 2, "Dendrogram").unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Jane Doe"));
        assert!(svg.contains("Ana &lt;B&gt;"));
        assert!(svg.contains("Léa &amp; Co"));
        assert_eq!(svg.matches("<path").count(), 3);
    }

    #[test]
    fn test_links_above_cut_are_neutral() {
        let svg = render_svg(&tree(), &names(), 2, "t").unwrap();
        // Two merges below the cut, one root link above it
        assert_eq!(svg.matches(ABOVE_CUT_COLOR).count(), 1);
        assert!(svg.contains(PALETTE[0]));
        assert!(svg.contains(PALETTE[1]));
    }

    #[test]
    fn test_label_count_mismatch() {
        let result = render_svg(&tree(), &names()[..2], 2, "t");
        assert!(matches!(result, Err(Error::RenderFailure(_))));
    }

    #[test]
    fn test_write_artifact_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.svg");
        write_artifact(&path, "<svg></svg>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg></svg>");

        write_artifact(&path, "<svg>2</svg>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg>2</svg>");
    }

    #[test]
    fn test_write_artifact_failure_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        // A regular file cannot act as a parent directory
        let result = write_artifact(&blocker.join("out.svg"), "<svg/>");
        assert!(matches!(result, Err(Error::RenderFailure(_))));
    }
}
