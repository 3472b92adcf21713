use crate::ast::node::{Condition, FilterNode};

/// Visitor trait for filter tree traversal.
///
/// The default `visit_node` walks left to right, so conditions are seen in
/// source order.
pub trait FilterVisitor<'a> {
    fn visit_node(&mut self, node: &'a FilterNode) {
        match node {
            FilterNode::Comparison(condition) => self.visit_condition(condition),
            FilterNode::And(left, right) | FilterNode::Or(left, right) => {
                self.visit_node(left);
                self.visit_node(right);
            }
            FilterNode::Group(inner) => self.visit_node(inner),
        }
    }

    fn visit_condition(&mut self, _condition: &'a Condition) {}
}
