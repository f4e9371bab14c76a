use crate::surface::{NodeId, ScrollTree};

/// Nearest element at or above `target`, and strictly below `root`, whose
/// content overflows vertically and whose overflow policy lets it scroll.
///
/// Returns `None` when no such element exists. If `target` is not inside
/// `root` the walk continues to the top of the tree.
pub fn resolve_scrollable_ancestor<T>(tree: &T, target: NodeId, root: NodeId) -> Option<NodeId>
where
    T: ScrollTree + ?Sized,
{
    let mut current = Some(target);
    while let Some(node) = current {
        if node == root {
            break;
        }
        if tree.scroll_metrics(node).is_scrollable() {
            return Some(node);
        }
        current = tree.parent(node);
    }
    None
}

/// Whether the nested region (if any) is scrolled to its top.
///
/// A missing region counts as "at top", which lets the drag dismiss.
pub fn is_at_top<T>(tree: &T, scrollable: Option<NodeId>) -> bool
where
    T: ScrollTree + ?Sized,
{
    scrollable.map_or(true, |node| tree.scroll_metrics(node).is_at_top())
}
