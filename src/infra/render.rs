// ============================================================
// Layer 6 — Tree Renderer
// ============================================================
// Draws a fitted decision tree so a person can read off which
// words the model learned to look at.
//
// Every node becomes a rounded box:
//
//   ┌────────────────┐
//   │  hate <= 0.5   │   ← split question (internal nodes only)
//   │   gini = 0.5   │
//   │  samples = 10  │
//   │ value = [5, 5] │
//   │ class = negative│
//   └────────────────┘
//
// Boxes are filled with the colour of their majority class:
// orange for `negative`, blue for `positive`. The purer the
// node, the stronger the colour; a 50/50 node is white.
//
// Layout: leaves are spaced evenly from left to right in the
// order a depth-first walk meets them, each parent is centred
// above its two children, and each depth gets its own row.
//
// Output formats, chosen by file extension:
//   .svg        → standalone SVG image
//   .dot / .gv  → Graphviz source (render with `dot -Tpng`)
//
// export_text() gives an indented plain-text view for logs.
//
// Reference: W3C SVG 1.1 specification
//            Graphviz DOT language documentation

use anyhow::{Context, Result};
use std::{fmt::Write as _, fs, path::Path};

use crate::domain::label::Label;
use crate::ml::model::{DecisionTree, TreeNode};

const BOX_WIDTH:  f64 = 160.0;
const BOX_HEIGHT: f64 = 92.0;
const H_GAP:      f64 = 24.0;
const V_GAP:      f64 = 56.0;
const MARGIN:     f64 = 20.0;
const LINE_HEIGHT: f64 = 16.0;
const FONT_SIZE:  f64 = 13.0;

// ─── TreePlot ─────────────────────────────────────────────────────────────────
/// A tree with its layout computed, ready to be written out.
pub struct TreePlot<'a> {
    tree:          &'a DecisionTree,
    feature_names: &'a [String],
    /// Horizontal slot of each node, in leaf-width units
    slots:         Vec<f64>,
}

/// Lay out `tree` for drawing. `feature_names[i]` names column i.
pub fn render<'a>(tree: &'a DecisionTree, feature_names: &'a [String]) -> TreePlot<'a> {
    let mut slots     = vec![0.0; tree.n_nodes()];
    let mut next_leaf = 0usize;
    if tree.n_nodes() > 0 {
        place(tree, 0, &mut next_leaf, &mut slots);
    }
    TreePlot { tree, feature_names, slots }
}

// Depth-first: leaves take the next free slot, parents sit midway.
fn place(tree: &DecisionTree, idx: usize, next_leaf: &mut usize, slots: &mut [f64]) {
    let node = &tree.nodes()[idx];
    match node.split {
        None => {
            slots[idx] = *next_leaf as f64;
            *next_leaf += 1;
        }
        Some(split) => {
            place(tree, split.left, next_leaf, slots);
            place(tree, split.right, next_leaf, slots);
            slots[idx] = (slots[split.left] + slots[split.right]) / 2.0;
        }
    }
}

// ─── Image Formats ────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Dot,
}

/// Format implied by `path`'s extension (case-insensitive).
/// Anything other than .svg, .dot or .gv is an error.
pub fn image_format(path: impl AsRef<Path>) -> Result<ImageFormat> {
    let path = path.as_ref();
    let ext  = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "svg"        => Ok(ImageFormat::Svg),
        "dot" | "gv" => Ok(ImageFormat::Dot),
        other => anyhow::bail!(
            "Unsupported tree image format '{other}' for '{}' (use .svg, .dot or .gv)",
            path.display()
        ),
    }
}

impl TreePlot<'_> {
    /// Write the plot to `path`; the extension picks the format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path     = path.as_ref();
        let contents = match image_format(path)? {
            ImageFormat::Svg => self.to_svg(),
            ImageFormat::Dot => self.to_dot(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Cannot write tree image to '{}'", path.display()))?;

        tracing::info!("Tree image saved to '{}'", path.display());
        Ok(())
    }

    /// Standalone SVG document.
    pub fn to_svg(&self) -> String {
        let n_slots = self.tree.n_leaves().max(1) as f64;
        let rows    = (self.tree.depth() + 1) as f64;
        let width   = 2.0 * MARGIN + n_slots * (BOX_WIDTH + H_GAP) - H_GAP;
        let height  = 2.0 * MARGIN + rows * (BOX_HEIGHT + V_GAP) - V_GAP;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="Helvetica, Arial, sans-serif" font-size="{FONT_SIZE}">"#
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

        // Edges first so boxes are drawn over the line ends
        for (idx, node) in self.tree.nodes().iter().enumerate() {
            let Some(split) = node.split else { continue };
            let (px, py) = self.bottom_centre(idx);
            for (child, edge_label) in [(split.left, "True"), (split.right, "False")] {
                let (cx, cy) = self.top_centre(child);
                let _ = writeln!(
                    svg,
                    r#"<line x1="{px}" y1="{py}" x2="{cx}" y2="{cy}" stroke="black" stroke-width="1"/>"#
                );
                // Only the root's edges are labelled
                if idx == 0 {
                    let lx     = px + (cx - px) * 0.3;
                    let ly     = py + (cy - py) * 0.3;
                    let anchor = if cx < px { "end" } else { "start" };
                    let _ = writeln!(
                        svg,
                        r#"<text x="{lx}" y="{ly}" text-anchor="{anchor}" dx="{}">{edge_label}</text>"#,
                        if cx < px { -6 } else { 6 }
                    );
                }
            }
        }

        for (idx, node) in self.tree.nodes().iter().enumerate() {
            let (x, y) = self.top_left(idx);
            let lines  = self.node_lines(node);
            let _ = writeln!(
                svg,
                r#"<rect x="{x}" y="{y}" width="{BOX_WIDTH}" height="{BOX_HEIGHT}" rx="8" ry="8" fill="{}" stroke="black"/>"#,
                self.fill_colour(node)
            );

            let text_top = y + (BOX_HEIGHT - lines.len() as f64 * LINE_HEIGHT) / 2.0 + FONT_SIZE;
            let cx       = x + BOX_WIDTH / 2.0;
            for (i, line) in lines.iter().enumerate() {
                let _ = writeln!(
                    svg,
                    r#"<text x="{cx}" y="{}" text-anchor="middle">{}</text>"#,
                    text_top + i as f64 * LINE_HEIGHT,
                    xml_escape(line)
                );
            }
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Graphviz DOT source.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph Tree {\n");
        dot.push_str(
            "node [shape=box, style=\"filled, rounded\", color=\"black\", fontname=\"helvetica\"] ;\n",
        );
        dot.push_str("edge [fontname=\"helvetica\"] ;\n");

        for (idx, node) in self.tree.nodes().iter().enumerate() {
            let label = self
                .node_lines(node)
                .iter()
                .map(|l| dot_escape(l))
                .collect::<Vec<_>>()
                .join("\\n");
            let _ = writeln!(
                dot,
                "{idx} [label=\"{label}\", fillcolor=\"{}\"] ;",
                self.fill_colour(node)
            );
        }

        for (idx, node) in self.tree.nodes().iter().enumerate() {
            let Some(split) = node.split else { continue };
            if idx == 0 {
                let _ = writeln!(dot, "0 -> {} [labeldistance=2.5, labelangle=45, headlabel=\"True\"] ;", split.left);
                let _ = writeln!(dot, "0 -> {} [labeldistance=2.5, labelangle=-45, headlabel=\"False\"] ;", split.right);
            } else {
                let _ = writeln!(dot, "{idx} -> {} ;", split.left);
                let _ = writeln!(dot, "{idx} -> {} ;", split.right);
            }
        }

        dot.push_str("}\n");
        dot
    }

    // ── Geometry ──────────────────────────────────────────────────────────────

    fn top_left(&self, idx: usize) -> (f64, f64) {
        let depth = self.tree.nodes()[idx].depth as f64;
        (
            MARGIN + self.slots[idx] * (BOX_WIDTH + H_GAP),
            MARGIN + depth * (BOX_HEIGHT + V_GAP),
        )
    }

    fn top_centre(&self, idx: usize) -> (f64, f64) {
        let (x, y) = self.top_left(idx);
        (x + BOX_WIDTH / 2.0, y)
    }

    fn bottom_centre(&self, idx: usize) -> (f64, f64) {
        let (x, y) = self.top_left(idx);
        (x + BOX_WIDTH / 2.0, y + BOX_HEIGHT)
    }

    // ── Box contents ──────────────────────────────────────────────────────────

    fn node_lines(&self, node: &TreeNode) -> Vec<String> {
        let mut lines = Vec::with_capacity(5);
        if let Some(split) = node.split {
            lines.push(format!(
                "{} <= {}",
                feature_name(self.feature_names, split.feature),
                round3(split.threshold)
            ));
        }
        lines.push(format!("{} = {}", self.tree.criterion().name(), round3(node.impurity)));
        lines.push(format!("samples = {}", node.n_samples));
        lines.push(format!(
            "value = [{}]",
            node.value.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
        ));
        lines.push(format!("class = {}", self.tree.classes()[node.majority_class()]));
        lines
    }

    /// Majority-class colour, faded towards white as the node gets less pure.
    fn fill_colour(&self, node: &TreeNode) -> String {
        let class       = self.tree.classes()[node.majority_class()];
        let (r, g, b)   = class_colour(class);
        let alpha       = purity(&node.value);
        let blend = |c: u8| (alpha * c as f64 + (1.0 - alpha) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", blend(r), blend(g), blend(b))
    }
}

fn class_colour(label: Label) -> (u8, u8, u8) {
    match label {
        Label::Negative => (0xe5, 0x81, 0x39),
        Label::Positive => (0x39, 0x9d, 0xe5),
    }
}

/// 0.0 for a tie between the top two classes, 1.0 for a pure node.
fn purity(value: &[usize]) -> f64 {
    let total: usize = value.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let mut props: Vec<f64> = value.iter().map(|&v| v as f64 / total as f64).collect();
    props.sort_by(|a, b| b.total_cmp(a));

    let first  = props[0];
    let second = props.get(1).copied().unwrap_or(0.0);
    if second >= 1.0 {
        return 1.0;
    }
    (first - second) / (1.0 - second)
}

fn feature_name(names: &[String], index: usize) -> String {
    names
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("x[{index}]"))
}

/// Round to 3 decimals and print without trailing zeros ("0.5", "0.408").
fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

// ─── Text export ──────────────────────────────────────────────────────────────
/// Indented plain-text rendering of the decision rules:
///
/// ```text
/// |--- hate <= 0.50
/// |   |--- class: positive
/// |--- hate >  0.50
/// |   |--- class: negative
/// ```
pub fn export_text(tree: &DecisionTree, feature_names: &[String]) -> String {
    let mut out = String::new();
    if tree.n_nodes() > 0 {
        write_text(tree, feature_names, 0, 1, &mut out);
    }
    out
}

fn write_text(tree: &DecisionTree, names: &[String], idx: usize, level: usize, out: &mut String) {
    let Some(node) = tree.node(idx) else { return };
    let indent = format!("{}|--- ", "|   ".repeat(level - 1));

    match node.split {
        None => {
            let _ = writeln!(out, "{indent}class: {}", tree.classes()[node.majority_class()]);
        }
        Some(split) => {
            let name = feature_name(names, split.feature);
            let _ = writeln!(out, "{indent}{name} <= {:.2}", split.threshold);
            write_text(tree, names, split.left, level + 1, out);
            let _ = writeln!(out, "{indent}{name} >  {:.2}", split.threshold);
            write_text(tree, names, split.right, level + 1, out);
        }
    }
}
