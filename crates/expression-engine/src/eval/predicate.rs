use crate::eval::comparison::ComparisonEvaluator;
use filter_syntax::ComparisonOperator;
use model::{core::value::Value, schema::accessor::FieldAccessor};
use std::{fmt, sync::Arc};

/// A single compiled condition.
pub struct Comparison<T> {
    pub field: String,
    pub accessor: FieldAccessor<T>,
    pub operator: ComparisonOperator,
    pub operand: Value,
    pub case_insensitive: bool,
}

/// Compiled form of a filter tree. Groups are gone; everything else maps one
/// to one onto the parsed nodes.
pub enum CompiledPredicate<T> {
    Compare(Comparison<T>),
    IsNull {
        field: String,
        accessor: FieldAccessor<T>,
    },
    IsNotNull {
        field: String,
        accessor: FieldAccessor<T>,
    },
    And(Arc<CompiledPredicate<T>>, Arc<CompiledPredicate<T>>),
    Or(Arc<CompiledPredicate<T>>, Arc<CompiledPredicate<T>>),
    Not(Arc<CompiledPredicate<T>>),
}

impl<T: 'static> CompiledPredicate<T> {
    pub fn evaluate(&self, model: &T) -> bool {
        match self {
            CompiledPredicate::Compare(cmp) => {
                let member = cmp.accessor.get(model);
                ComparisonEvaluator::new(&member, &cmp.operand, cmp.operator, cmp.case_insensitive)
                    .evaluate()
            }
            CompiledPredicate::IsNull { accessor, .. } => accessor.get(model).is_null(),
            CompiledPredicate::IsNotNull { accessor, .. } => !accessor.get(model).is_null(),
            CompiledPredicate::And(left, right) => left.evaluate(model) && right.evaluate(model),
            CompiledPredicate::Or(left, right) => left.evaluate(model) || right.evaluate(model),
            CompiledPredicate::Not(inner) => !inner.evaluate(model),
        }
    }

    /// Number of leaf conditions.
    pub fn conditions(&self) -> usize {
        match self {
            CompiledPredicate::Compare(_)
            | CompiledPredicate::IsNull { .. }
            | CompiledPredicate::IsNotNull { .. } => 1,
            CompiledPredicate::And(l, r) | CompiledPredicate::Or(l, r) => {
                l.conditions() + r.conditions()
            }
            CompiledPredicate::Not(inner) => inner.conditions(),
        }
    }
}

impl<T> fmt::Debug for CompiledPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompiledPredicate::Compare(cmp) => {
                write!(f, "{}{}{:?}", cmp.field, cmp.operator, cmp.operand)?;
                if cmp.case_insensitive {
                    write!(f, " (ci)")?;
                }
                Ok(())
            }
            CompiledPredicate::IsNull { field, .. } => write!(f, "{field} is null"),
            CompiledPredicate::IsNotNull { field, .. } => write!(f, "{field} is not null"),
            CompiledPredicate::And(l, r) => write!(f, "({l:?} AND {r:?})"),
            CompiledPredicate::Or(l, r) => write!(f, "({l:?} OR {r:?})"),
            CompiledPredicate::Not(inner) => write!(f, "NOT {inner:?}"),
        }
    }
}

/// A boolean test over `T` built from a filter string.
///
/// Cloning is cheap and shares the compiled tree; predicates are immutable
/// and can be evaluated from any number of threads.
pub struct Predicate<T> {
    root: Arc<CompiledPredicate<T>>,
}

impl<T: 'static> Predicate<T> {
    pub fn new(root: CompiledPredicate<T>) -> Self {
        Predicate {
            root: Arc::new(root),
        }
    }

    pub fn matches(&self, model: &T) -> bool {
        self.root.evaluate(model)
    }

    pub fn and(&self, other: &Predicate<T>) -> Predicate<T> {
        Predicate::new(CompiledPredicate::And(
            Arc::clone(&self.root),
            Arc::clone(&other.root),
        ))
    }

    pub fn or(&self, other: &Predicate<T>) -> Predicate<T> {
        Predicate::new(CompiledPredicate::Or(
            Arc::clone(&self.root),
            Arc::clone(&other.root),
        ))
    }

    pub fn not(&self) -> Predicate<T> {
        Predicate::new(CompiledPredicate::Not(Arc::clone(&self.root)))
    }

    /// Borrows the predicate as a closure, e.g. for `Iterator::filter`.
    pub fn as_fn(&self) -> impl Fn(&T) -> bool + '_ {
        move |model: &T| self.matches(model)
    }

    /// Owned closure that can be moved into other threads.
    pub fn into_fn(self) -> impl Fn(&T) -> bool + Clone + Send + Sync + 'static {
        move |model: &T| self.matches(model)
    }

    pub fn root(&self) -> &CompiledPredicate<T> {
        &self.root
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Predicate {
            root: Arc::clone(&self.root),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({:?})", self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        score: i64,
        label: Option<String>,
    }

    fn score() -> FieldAccessor<Item> {
        FieldAccessor::new(|i: &Item| Value::from(i.score))
    }

    fn label() -> FieldAccessor<Item> {
        FieldAccessor::new(|i: &Item| Value::from(i.label.clone()))
    }

    fn score_over(n: i64) -> Predicate<Item> {
        Predicate::new(CompiledPredicate::Compare(Comparison {
            field: "Score".to_string(),
            accessor: score(),
            operator: ComparisonOperator::GreaterThan,
            operand: Value::Int(n),
            case_insensitive: false,
        }))
    }

    #[test]
    fn test_combinators() {
        let item = Item {
            score: 10,
            label: None,
        };
        let over_5 = score_over(5);
        let over_20 = score_over(20);

        assert!(over_5.matches(&item));
        assert!(!over_20.matches(&item));
        assert!(!over_5.and(&over_20).matches(&item));
        assert!(over_5.or(&over_20).matches(&item));
        assert!(over_20.not().matches(&item));
        assert_eq!(over_5.and(&over_20).root().conditions(), 2);
    }

    #[test]
    fn test_null_tests() {
        let is_null = Predicate::new(CompiledPredicate::IsNull {
            field: "Label".to_string(),
            accessor: label(),
        });
        let is_not_null = Predicate::new(CompiledPredicate::IsNotNull {
            field: "Label".to_string(),
            accessor: label(),
        });

        let bare = Item {
            score: 1,
            label: None,
        };
        let labeled = Item {
            score: 1,
            label: Some("x".to_string()),
        };

        assert!(is_null.matches(&bare));
        assert!(!is_null.matches(&labeled));
        assert!(is_not_null.matches(&labeled));
    }

    #[test]
    fn test_predicate_as_closure() {
        let items = vec![
            Item { score: 1, label: None },
            Item { score: 9, label: None },
        ];
        let over_5 = score_over(5);

        assert_eq!(items.iter().filter(|i| over_5.matches(i)).count(), 1);

        let owned = over_5.clone().into_fn();
        let handle = std::thread::spawn(move || owned(&Item { score: 7, label: None }));
        assert!(handle.join().unwrap());

        let borrowed = over_5.as_fn();
        assert!(!borrowed(&items[0]));
    }
}
