//! Text rendering for dependency trees and the console summary box.
//!
//! The tree layout mirrors the build order: recursive, depth-first,
//! pre-order. Within a sibling group every element but the last is
//! introduced by `╟` and the last by `╙`; ancestors contribute a `║`
//! column at each indentation stop. Optional dependencies carry an
//! ` (optional)` suffix.
//!
//! ```text
//! ╟ org.apache.maven:maven-model:3.3.9
//! ║      ╙ org.codehaus.plexus:plexus-utils:3.0.22
//! ╙ org.slf4j:slf4j-api:1.7.21 (optional)
//! ```

use crate::resolver::DependencyNode;

/// Columns of indentation per depth level.
const INDENT_WIDTH: usize = 8;
/// Connector for every sibling except the last.
const LEFT_MIDDLE: char = '\u{255f}'; // ╟
/// Connector for the last sibling of a group.
const LEFT_LAST: char = '\u{2559}'; // ╙
/// Ancestor continuation column.
const VERTICAL: char = '\u{2551}'; // ║

/// Render the children of a resolved tree's root as indented glyph text.
///
/// The sentinel root itself is not rendered; pass
/// [`crate::resolver::ResolvedTree::root`]'s children.
pub fn render_tree(nodes: &[DependencyNode]) -> String {
    let mut out = String::new();
    render_level(nodes, &mut out);
    out
}

fn render_level(nodes: &[DependencyNode], out: &mut String) {
    for (index, node) in nodes.iter().enumerate() {
        let connector = if index == nodes.len() - 1 {
            LEFT_LAST
        } else {
            LEFT_MIDDLE
        };

        let indent = usize::try_from(node.level).unwrap_or(0) * INDENT_WIDTH;
        for column in 0..indent.saturating_sub(1) {
            if column == 0 || (column + 1) % INDENT_WIDTH == 0 {
                out.push(VERTICAL);
            } else {
                out.push(' ');
            }
        }

        out.push(connector);
        out.push(' ');
        out.push_str(node.dependency.id());
        if node.dependency.is_optional() {
            out.push_str(" (optional)");
        }
        out.push('\n');

        render_level(&node.children, out);
    }
}

/// Interior left margin of the summary box.
const BOX_MARGIN: usize = 10;

/// Draw the boxed console summary printed above a dependency tree.
///
/// Each line is indented by a fixed margin and the box is sized to the
/// longest line.
pub fn log_box(lines: &[String]) -> String {
    let content_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = content_width + 2 * BOX_MARGIN;

    let mut out = String::new();
    out.push('\u{2554}'); // ╔
    out.push_str(&"\u{2550}".repeat(width)); // ═
    out.push_str("\u{2557}\n"); // ╗
    for line in lines {
        out.push('\u{2551}'); // ║
        out.push_str(&" ".repeat(BOX_MARGIN));
        out.push_str(line);
        out.push_str(&" ".repeat(width - BOX_MARGIN - line.chars().count()));
        out.push_str("\u{2551}\n");
    }
    out.push('\u{255a}'); // ╚
    out.push_str(&"\u{2550}".repeat(width));
    out.push_str("\u{255d}\n"); // ╝
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Result;
    use crate::resolver::ClasspathDependency;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct Fake {
        id: String,
        optional: bool,
    }

    impl ClasspathDependency for Fake {
        fn id(&self) -> &str {
            &self.id
        }

        fn is_optional(&self) -> bool {
            self.optional
        }

        fn file(&self) -> Result<PathBuf> {
            Ok(PathBuf::from(&self.id))
        }

        fn direct_dependencies(&self) -> Result<Vec<Arc<dyn ClasspathDependency>>> {
            Ok(Vec::new())
        }
    }

    fn node(id: &str, level: i32, children: Vec<DependencyNode>) -> DependencyNode {
        DependencyNode {
            dependency: Arc::new(Fake {
                id: id.to_string(),
                optional: false,
            }),
            level,
            children,
        }
    }

    fn optional_node(id: &str, level: i32) -> DependencyNode {
        DependencyNode {
            dependency: Arc::new(Fake {
                id: id.to_string(),
                optional: true,
            }),
            level,
            children: Vec::new(),
        }
    }

    #[test]
    fn last_sibling_gets_the_corner_glyph() {
        let nodes = vec![
            node("g:a:1", 0, Vec::new()),
            node("g:b:1", 0, Vec::new()),
            node("g:c:1", 0, Vec::new()),
        ];
        let text = render_tree(&nodes);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('╟'));
        assert!(lines[1].starts_with('╟'));
        assert!(lines[2].starts_with('╙'));
        assert_eq!(text.matches('╙').count(), 1);
        assert_eq!(text.matches('╟').count(), 2);
    }

    #[test]
    fn single_child_group_uses_only_the_corner_glyph() {
        let nodes = vec![node("g:only:1", 0, Vec::new())];
        let text = render_tree(&nodes);
        assert_eq!(text, "╙ g:only:1\n");
    }

    #[test]
    fn nested_levels_draw_ancestor_columns() {
        let nodes = vec![node(
            "g:a:1",
            0,
            vec![node("g:b:1", 1, vec![node("g:c:1", 2, Vec::new())])],
        )];
        let text = render_tree(&nodes);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "╙ g:a:1");
        // Level 1: a ║ column, then spaces up to column 7.
        assert_eq!(lines[1], "║      ╙ g:b:1");
        // Level 2: ║ columns at offsets 0 and 7.
        assert_eq!(lines[2], "║      ║       ╙ g:c:1");
    }

    #[test]
    fn optional_dependencies_are_suffixed() {
        let nodes = vec![optional_node("g:opt:1", 0)];
        let text = render_tree(&nodes);
        assert_eq!(text, "╙ g:opt:1 (optional)\n");
    }

    #[test]
    fn render_order_is_pre_order() {
        let nodes = vec![
            node("g:a:1", 0, vec![node("g:a-child:1", 1, Vec::new())]),
            node("g:b:1", 0, Vec::new()),
        ];
        let text = render_tree(&nodes);
        let ids: Vec<&str> = text
            .lines()
            .map(|l| l.trim_start_matches(['║', ' ', '╟', '╙']).trim())
            .collect();
        assert_eq!(ids, vec!["g:a:1", "g:a-child:1", "g:b:1"]);
    }

    #[test]
    fn log_box_frames_every_line_at_equal_width() {
        let text = log_box(&["short".to_string(), "a much longer line".to_string()]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with('╔') && lines[0].ends_with('╗'));
        assert!(lines[3].starts_with('╚') && lines[3].ends_with('╝'));
        let width = lines[0].chars().count();
        for line in &lines {
            assert_eq!(line.chars().count(), width);
        }
        assert!(lines[1].contains("          short"));
    }
}
