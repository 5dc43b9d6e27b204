//! Deterministic AST traversal (`ast_visit` from §4.3).

use crate::node::Node;

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Parent before children (pre-order).
    Down,
    /// Children before parent (post-order).
    Up,
}

/// Returned by the visitor callback to continue or short-circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    Continue,
    Stop,
}

/// Visits `root` and its descendants in `direction`, calling `callback` on
/// each node. Traversal order among a node's own children is deterministic:
/// parameters first (left to right), then the declarator target — mirroring
/// `Node::children`. The callback can short-circuit by returning
/// [`VisitControl::Stop`].
pub fn ast_visit<'a, F>(root: &'a Node<'a>, direction: Direction, callback: &mut F) -> VisitControl
where
    F: FnMut(&'a Node<'a>) -> VisitControl,
{
    match direction {
        Direction::Down => {
            if callback(root) == VisitControl::Stop {
                return VisitControl::Stop;
            }
            for child in root.children() {
                if ast_visit(child, direction, callback) == VisitControl::Stop {
                    return VisitControl::Stop;
                }
            }
            VisitControl::Continue
        }
        Direction::Up => {
            for child in root.children() {
                if ast_visit(child, direction, callback) == VisitControl::Stop {
                    return VisitControl::Stop;
                }
            }
            callback(root)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::AstArena;
    use crate::node::NodeKind;
    use cdeclish_base::Span;
    use cdeclish_types::{BaseTid, Type};

    #[test]
    fn down_visits_parent_before_child() {
        let arena = AstArena::new();
        let inner = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 1);
        let ptr = arena.ast_new(NodeKind::Pointer(Default::default()), Span::new(0, 4), 0);
        arena.ast_set_child(ptr, inner).unwrap();

        let mut order = Vec::new();
        ast_visit(ptr, Direction::Down, &mut |n| {
            order.push(n.kind_name());
            VisitControl::Continue
        });
        assert_eq!(order, vec!["pointer", "builtin"]);
    }

    #[test]
    fn up_visits_child_before_parent() {
        let arena = AstArena::new();
        let inner = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 1);
        let ptr = arena.ast_new(NodeKind::Pointer(Default::default()), Span::new(0, 4), 0);
        arena.ast_set_child(ptr, inner).unwrap();

        let mut order = Vec::new();
        ast_visit(ptr, Direction::Up, &mut |n| {
            order.push(n.kind_name());
            VisitControl::Continue
        });
        assert_eq!(order, vec!["builtin", "pointer"]);
    }

    #[test]
    fn stop_short_circuits() {
        let arena = AstArena::new();
        let inner = arena.ast_new(NodeKind::Builtin(Type::base(BaseTid::INT)), Span::new(0, 3), 1);
        let ptr = arena.ast_new(NodeKind::Pointer(Default::default()), Span::new(0, 4), 0);
        arena.ast_set_child(ptr, inner).unwrap();

        let mut order = Vec::new();
        ast_visit(ptr, Direction::Down, &mut |n| {
            order.push(n.kind_name());
            VisitControl::Stop
        });
        assert_eq!(order, vec!["pointer"]);
    }
}
