use crate::node::Node;
use crate::operation::OpKind;

/// Combines two operands of a sum into one, if they are like terms.
fn try_merge(accumulated: &Node, candidate: &Node) -> Option<Node> {
    match (accumulated, candidate) {
        (Node::Number(a), Node::Number(b)) => Some(Node::Number(b.clone() + a.clone())),
        (Node::Term(a), Node::Term(b)) if a.is_similar(b) => Some(b.clone() + a.clone()),
        (Node::Group(a), Node::Group(b)) if a.is_similar(b) => Some(b.clone() + a.clone()),
        (Node::Func(a), Node::Func(b)) if a.is_similar(b) => Some(a.clone() + b.clone()),
        _ => None,
    }
}

/// Brings the operands of a sum into canonical form:
///
/// 1. Operands that are themselves sums are spliced in place of the operand.
/// 2. Each remaining operand is merged into the first accumulated operand it is like (numbers
///    with numbers, and similar terms, groups or functions), or appended if there is none.
/// 3. Zeros are dropped, including operands that cancel to zero while merging.
///
/// Surviving operands keep the order in which they were first seen.
pub(crate) fn flatten_sum(children: Vec<Node>) -> Vec<Node> {
    let mut spliced = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Node::Expr(expr) if expr.kind() == OpKind::Sum => {
                spliced.extend(expr.into_root().into_children());
            },
            child => spliced.push(child),
        }
    }

    let mut accumulated: Vec<Node> = Vec::with_capacity(spliced.len());
    'candidates: for candidate in spliced {
        if candidate.is_zero() {
            continue;
        }

        for slot in accumulated.iter_mut() {
            if let Some(merged) = try_merge(slot, &candidate) {
                *slot = merged;
                continue 'candidates;
            }
        }
        accumulated.push(candidate);
    }

    accumulated.retain(|node| !node.is_zero());
    accumulated
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{Function, Group, Node, Operation, Term};
    use super::*;

    #[test]
    fn like_terms_collapse() {
        let sum = Operation::new(OpKind::Sum, vec![
            Term::new("x", 2, 1),
            Term::new("x", 3, 1),
            Node::from(5),
        ]).unwrap();
        assert_eq!(sum.children(), &[Term::new("x", 5, 1), Node::from(5)]);
    }

    #[test]
    fn nested_sums_are_spliced() {
        let inner = Node::from("y") + 1;
        let sum = Operation::new(OpKind::Sum, vec![Node::from("x"), inner, Node::from(2)]).unwrap();
        assert_eq!(sum.children(), &[Node::from("x"), Node::from("y"), Node::from(3)]);
    }

    #[test]
    fn zeros_are_dropped() {
        let sum = Operation::new(OpKind::Sum, vec![
            Node::from(0),
            Node::from("x"),
            Term::new("x", -1, 1),
            Node::from("y"),
        ]).unwrap();
        assert_eq!(sum.children(), &[Node::from("y")]);
    }

    #[test]
    fn similar_groups_merge() {
        let xy = || [Term::symbol("x"), Term::symbol("y")];
        let sum = Operation::new(OpKind::Sum, vec![
            Group::new(2, xy()),
            Node::from("x"),
            Group::new(3, xy()),
        ]).unwrap();
        assert_eq!(sum.children(), &[Group::new(5, xy()), Node::from("x")]);
    }

    #[test]
    fn similar_functions_merge() {
        let sum = Operation::new(OpKind::Sum, vec![
            Node::Func(Function::sin("x")),
            Node::from("y"),
            Node::Func(Function::sin("x").with_coefficient(2)),
        ]).unwrap();
        assert_eq!(sum.children(), &[
            Node::Func(Function::sin("x").with_coefficient(3)),
            Node::from("y"),
        ]);
    }

    #[test]
    fn products_are_left_alone() {
        let product = Operation::new(OpKind::Product, vec![
            Node::from(2),
            Node::from(3),
            Node::from(2) * Node::from("x"),
        ]).unwrap();
        assert_eq!(product.children().len(), 3);
    }
}
