//
//  marketplace-sdk
//  cli/tree.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Box-drawing rendering of nested records.

/// Renders a forest as lines of text, one node per line.
///
/// ```rust
/// use marketplace_sdk::cli::render_tree;
/// use marketplace_sdk::services::divisions::Division;
///
/// let mut fr = Division::new("FR", None);
/// fr.add_child(Division::new("FR-69", Some("FR")));
/// fr.add_child(Division::new("FR-01", Some("FR")));
///
/// let lines = render_tree(&[fr], |d| &d.children, |d| d.code.clone());
/// assert_eq!(lines, ["FR", "├── FR-69", "└── FR-01"]);
/// ```
pub fn render_tree<T, C, L>(roots: &[T], children: C, label: L) -> Vec<String>
where
    C: Fn(&T) -> &[T],
    L: Fn(&T) -> String,
{
    let mut lines = Vec::new();
    for root in roots {
        lines.push(label(root));
        render_children(children(root), "", &children, &label, &mut lines);
    }
    lines
}

fn render_children<T, C, L>(nodes: &[T], prefix: &str, children: &C, label: &L, out: &mut Vec<String>)
where
    C: Fn(&T) -> &[T],
    L: Fn(&T) -> String,
{
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push(format!("{}{}{}", prefix, branch, label(node)));
        render_children(
            children(node),
            &format!("{}{}", prefix, indent),
            children,
            label,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::divisions::Division;
    use crate::tree::denormalize;

    #[test]
    fn test_render_nested() {
        let forest = denormalize(vec![
            Division::new("FR", None),
            Division::new("FR-ARA", Some("FR")),
            Division::new("FR-69", Some("FR-ARA")),
            Division::new("FR-IDF", Some("FR")),
            Division::new("DE", None),
        ]);

        let lines = render_tree(&forest, |d| &d.children, |d| d.code.clone());

        assert_eq!(
            lines,
            [
                "FR",
                "├── FR-ARA",
                "│   └── FR-69",
                "└── FR-IDF",
                "DE",
            ]
        );
    }

    #[test]
    fn test_render_empty() {
        let lines = render_tree(&[] as &[Division], |d| &d.children, |d| d.code.clone());
        assert!(lines.is_empty());
    }
}
