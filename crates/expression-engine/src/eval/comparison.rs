use filter_syntax::ComparisonOperator;
use model::core::value::Value;
use std::cmp::Ordering;

/// Applies one comparison operator to a member value and a coerced operand.
///
/// Under case-insensitive comparison the operand is expected to be lowercased
/// already; only the member side is folded here.
pub(crate) struct ComparisonEvaluator<'a> {
    member: &'a Value,
    operand: &'a Value,
    operator: ComparisonOperator,
    case_insensitive: bool,
}

impl<'a> ComparisonEvaluator<'a> {
    pub fn new(
        member: &'a Value,
        operand: &'a Value,
        operator: ComparisonOperator,
        case_insensitive: bool,
    ) -> Self {
        Self {
            member,
            operand,
            operator,
            case_insensitive,
        }
    }

    pub fn evaluate(&self) -> bool {
        // An absent member never equals, orders or contains anything.
        if self.member.is_null() {
            return self.operator.is_negated();
        }

        use ComparisonOperator::*;
        match self.operator {
            Equal | CaseInsensitiveEqual => self.eval_equal(),
            NotEqual => !self.eval_equal(),
            GreaterThan => self.ordering() == Some(Ordering::Greater),
            LessThan => self.ordering() == Some(Ordering::Less),
            GreaterOrEqual => matches!(self.ordering(), Some(Ordering::Greater | Ordering::Equal)),
            LessOrEqual => matches!(self.ordering(), Some(Ordering::Less | Ordering::Equal)),
            Contains => self.eval_text(|m, o| m.contains(o)),
            NotContains => !self.eval_text(|m, o| m.contains(o)),
            StartsWith => self.eval_text(|m, o| m.starts_with(o)),
            NotStartsWith => !self.eval_text(|m, o| m.starts_with(o)),
            EndsWith => self.eval_text(|m, o| m.ends_with(o)),
            NotEndsWith => !self.eval_text(|m, o| m.ends_with(o)),
        }
    }

    fn eval_equal(&self) -> bool {
        if self.case_insensitive {
            if let (Some(m), Some(o)) = (self.member.as_str(), self.operand.as_str()) {
                return m.to_lowercase() == o;
            }
        }
        self.member.equal(self.operand)
    }

    fn ordering(&self) -> Option<Ordering> {
        if self.case_insensitive {
            if let (Some(m), Some(o)) = (self.member.as_str(), self.operand.as_str()) {
                return Some(m.to_lowercase().as_str().cmp(o));
            }
        }
        self.member.compare(self.operand)
    }

    fn eval_text(&self, matcher: impl Fn(&str, &str) -> bool) -> bool {
        match (self.member.as_str(), self.operand.as_str()) {
            (Some(m), Some(o)) if self.case_insensitive => matcher(&m.to_lowercase(), o),
            (Some(m), Some(o)) => matcher(m, o),
            _ => false,
        }
    }
}
