use crate::{
    error::{BuildError, Result},
    eval::predicate::{Comparison, CompiledPredicate, Predicate},
    mapper::{FieldMapping, Mapper},
};
use filter_syntax::{ComparisonOperator, Condition, FilterNode, Literal};
use model::core::{data_type::ValueType, value::Value};
use std::sync::Arc;
use tracing::debug;

/// Compiles a parsed filter into a predicate over `T`.
///
/// Every field is resolved and every literal converted up front, so the
/// returned predicate cannot fail while it runs.
pub fn build<T: 'static>(node: &FilterNode, mapper: &Mapper<T>) -> Result<Predicate<T>> {
    let root = compile_node(node, mapper)?;
    debug!("Compiled filter '{}' into {} condition(s)", node, root.conditions());
    Ok(Predicate::new(root))
}

fn compile_node<T: 'static>(node: &FilterNode, mapper: &Mapper<T>) -> Result<CompiledPredicate<T>> {
    match node {
        FilterNode::Comparison(condition) => compile_condition(condition, mapper),
        FilterNode::And(left, right) => Ok(CompiledPredicate::And(
            Arc::new(compile_node(left, mapper)?),
            Arc::new(compile_node(right, mapper)?),
        )),
        FilterNode::Or(left, right) => Ok(CompiledPredicate::Or(
            Arc::new(compile_node(left, mapper)?),
            Arc::new(compile_node(right, mapper)?),
        )),
        FilterNode::Group(inner) => compile_node(inner, mapper),
    }
}

fn compile_condition<T: 'static>(
    condition: &Condition,
    mapper: &Mapper<T>,
) -> Result<CompiledPredicate<T>> {
    let mapping = mapper.resolve(&condition.field)?;
    let config = mapper.config();

    let literal = match &condition.value {
        Literal::Null if config.allow_null_search => return compile_null_test(condition, mapping),
        Literal::Null => "null",
        Literal::Text(text) => text.as_str(),
    };

    check_operator(condition, &mapping.value_type)?;

    let operand = mapping
        .parse_literal(literal)
        .map_err(|reason| BuildError::ValueCoercion {
            field: condition.field.clone(),
            expected: mapping.value_type.to_string(),
            literal: literal.to_string(),
            reason,
        })?;

    let text_field = mapping.value_type.is_text();
    let case_insensitive = text_field
        && (condition.operator == ComparisonOperator::CaseInsensitiveEqual
            || config.case_insensitive_filtering);

    let operand = match operand {
        Value::String(text) if case_insensitive => Value::String(text.to_lowercase()),
        other => other,
    };

    Ok(CompiledPredicate::Compare(Comparison {
        field: mapping.name.clone(),
        accessor: mapping.accessor.clone(),
        operator: condition.operator,
        operand,
        case_insensitive,
    }))
}

fn compile_null_test<T: 'static>(
    condition: &Condition,
    mapping: &FieldMapping<T>,
) -> Result<CompiledPredicate<T>> {
    let field = mapping.name.clone();
    let accessor = mapping.accessor.clone();

    match condition.operator {
        ComparisonOperator::Equal | ComparisonOperator::CaseInsensitiveEqual => {
            Ok(CompiledPredicate::IsNull { field, accessor })
        }
        ComparisonOperator::NotEqual => Ok(CompiledPredicate::IsNotNull { field, accessor }),
        operator => Err(BuildError::UnsupportedOperator {
            field: condition.field.clone(),
            operator,
            value_type: "null".to_string(),
        }),
    }
}

// Checked before coercion so `Id=*abc` reports the operator, not the literal.
fn check_operator(condition: &Condition, value_type: &ValueType) -> Result<()> {
    let operator = condition.operator;
    let supported = if operator.is_ordering() {
        value_type.supports_ordering()
    } else if operator.is_text_match() {
        value_type.is_text()
    } else {
        true
    };

    if supported {
        Ok(())
    } else {
        Err(BuildError::UnsupportedOperator {
            field: condition.field.clone(),
            operator,
            value_type: value_type.to_string(),
        })
    }
}
