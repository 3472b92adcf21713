use crate::ast::{
    literal::Literal,
    operator::{ComparisonOperator, LogicalOperator},
    span::Span,
    visitor::FilterVisitor,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `field operator value` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: ComparisonOperator,
    pub value: Literal,
    pub span: Span,
}

impl Condition {
    pub fn new(field: &str, operator: ComparisonOperator, value: Literal, span: Span) -> Self {
        Condition {
            field: field.to_string(),
            operator,
            value,
            span,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator, self.value)
    }
}

/// Parsed filter tree.
///
/// `And`/`Or` chains are left-associative, so `A&B&C` is `And(And(A, B), C)`
/// and conditions keep the order they were written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterNode {
    Comparison(Condition),
    And(Box<FilterNode>, Box<FilterNode>),
    Or(Box<FilterNode>, Box<FilterNode>),
    Group(Box<FilterNode>),
}

impl FilterNode {
    pub fn and(left: FilterNode, right: FilterNode) -> Self {
        FilterNode::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: FilterNode, right: FilterNode) -> Self {
        FilterNode::Or(Box::new(left), Box::new(right))
    }

    pub fn group(inner: FilterNode) -> Self {
        FilterNode::Group(Box::new(inner))
    }

    pub fn logical(op: LogicalOperator, left: FilterNode, right: FilterNode) -> Self {
        match op {
            LogicalOperator::And => FilterNode::and(left, right),
            LogicalOperator::Or => FilterNode::or(left, right),
        }
    }

    /// Every condition in the tree, in source order.
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut collector = ConditionCollector::default();
        collector.visit_node(self);
        collector.conditions
    }

    /// Referenced field names in source order, duplicates removed.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for condition in self.conditions() {
            if !fields.contains(&condition.field.as_str()) {
                fields.push(&condition.field);
            }
        }
        fields
    }

    /// Nesting depth; a lone comparison has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            FilterNode::Comparison(_) => 1,
            FilterNode::Group(inner) => 1 + inner.depth(),
            FilterNode::And(left, right) | FilterNode::Or(left, right) => {
                1 + left.depth().max(right.depth())
            }
        }
    }
}

#[derive(Default)]
struct ConditionCollector<'a> {
    conditions: Vec<&'a Condition>,
}

impl<'a> FilterVisitor<'a> for ConditionCollector<'a> {
    fn visit_condition(&mut self, condition: &'a Condition) {
        self.conditions.push(condition);
    }
}

/// Renders the tree back into filter syntax.
impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterNode::Comparison(condition) => write!(f, "{condition}"),
            FilterNode::And(left, right) => {
                write_operand(f, left)?;
                f.write_str("&")?;
                write_operand(f, right)
            }
            FilterNode::Or(left, right) => write!(f, "{left}|{right}"),
            FilterNode::Group(inner) => write!(f, "({inner})"),
        }
    }
}

// `|` binds weaker than `&`, so an `Or` under an `And` needs its parentheses back.
fn write_operand(f: &mut fmt::Formatter<'_>, node: &FilterNode) -> fmt::Result {
    match node {
        FilterNode::Or(..) => write!(f, "({node})"),
        other => write!(f, "{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(field: &str, value: &str) -> FilterNode {
        FilterNode::Comparison(Condition::new(
            field,
            ComparisonOperator::Equal,
            Literal::Text(value.to_string()),
            Span::default(),
        ))
    }

    #[test]
    fn test_display_round_trips_grouping() {
        let node = FilterNode::or(
            FilterNode::group(FilterNode::and(cond("A", "1"), cond("B", "2"))),
            cond("C", "3"),
        );
        assert_eq!(node.to_string(), "(A==1&B==2)|C==3");
    }

    #[test]
    fn test_display_keeps_or_inside_and() {
        let node = FilterNode::and(FilterNode::or(cond("A", "1"), cond("B", "2")), cond("C", "3"));
        assert_eq!(node.to_string(), "(A==1|B==2)&C==3");

        let node = FilterNode::and(cond("C", "3"), FilterNode::or(cond("A", "1"), cond("B", "2")));
        assert_eq!(node.to_string(), "C==3&(A==1|B==2)");

        let node = FilterNode::or(FilterNode::and(cond("A", "1"), cond("B", "2")), cond("C", "3"));
        assert_eq!(node.to_string(), "A==1&B==2|C==3");
    }

    #[test]
    fn test_conditions_in_source_order() {
        let node = FilterNode::and(FilterNode::and(cond("Id", "1"), cond("Name", "x")), cond("Id", "2"));

        let values: Vec<_> = node
            .conditions()
            .iter()
            .map(|c| c.value.as_text().unwrap_or_default().to_string())
            .collect();
        assert_eq!(values, vec!["1", "x", "2"]);
        assert_eq!(node.fields(), vec!["Id", "Name"]);
        assert_eq!(node.depth(), 3);
    }
}
