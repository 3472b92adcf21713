use crate::error::FilterError;
use expression_engine::{Mapper, Predicate, build};
use filter_syntax::parse_filter;
use std::borrow::Borrow;
use tracing::debug;

/// Lexes, parses and builds `filter` against `mapper`.
pub fn compile<T: 'static>(filter: &str, mapper: &Mapper<T>) -> Result<Predicate<T>, FilterError> {
    let node = parse_filter(filter)?;
    let predicate = build(&node, mapper)?;
    Ok(predicate)
}

/// Compiles `filter` and narrows `source` with it.
pub fn apply<T, S>(source: S, filter: &str, mapper: &Mapper<T>) -> Result<S::Output, FilterError>
where
    T: 'static,
    S: FilterSource<T>,
{
    let predicate = compile(filter, mapper)?;
    Ok(source.filter_by(&predicate))
}

/// Whether `filter` compiles against `mapper`. The reason for a rejection is
/// logged at debug level.
pub fn is_valid<T: 'static>(filter: &str, mapper: &Mapper<T>) -> bool {
    match compile(filter, mapper) {
        Ok(_) => true,
        Err(err) => {
            debug!("Filter '{}' is not valid: {}", filter, err);
            false
        }
    }
}

/// A collection that can be narrowed by a predicate in place of its own
/// filtering mechanism.
pub trait FilterSource<T> {
    type Output;

    fn filter_by(self, predicate: &Predicate<T>) -> Self::Output;
}

impl<T: 'static> FilterSource<T> for Vec<T> {
    type Output = Vec<T>;

    fn filter_by(mut self, predicate: &Predicate<T>) -> Vec<T> {
        self.retain(|item| predicate.matches(item));
        self
    }
}

impl<'a, T: 'static> FilterSource<T> for &'a [T] {
    type Output = Vec<&'a T>;

    fn filter_by(self, predicate: &Predicate<T>) -> Vec<&'a T> {
        self.iter().filter(|item| predicate.matches(item)).collect()
    }
}

/// Lazy filtering for any iterator over `T` or `&T`.
pub trait FilterIteratorExt: Iterator + Sized {
    /// Compiles `filter` and returns an adapter that yields matching items
    /// as the underlying iterator is consumed.
    fn apply_filtering<T>(
        self,
        filter: &str,
        mapper: &Mapper<T>,
    ) -> Result<Filtered<Self, T>, FilterError>
    where
        T: 'static,
        Self::Item: Borrow<T>,
    {
        let predicate = compile(filter, mapper)?;
        Ok(self.filter_with(predicate))
    }

    fn filter_with<T>(self, predicate: Predicate<T>) -> Filtered<Self, T>
    where
        T: 'static,
        Self::Item: Borrow<T>,
    {
        Filtered {
            inner: self,
            predicate,
        }
    }
}

impl<I: Iterator> FilterIteratorExt for I {}

pub struct Filtered<I, T> {
    inner: I,
    predicate: Predicate<T>,
}

impl<I, T> Filtered<I, T> {
    pub fn predicate(&self) -> &Predicate<T> {
        &self.predicate
    }
}

impl<I, T> Iterator for Filtered<I, T>
where
    I: Iterator,
    I::Item: Borrow<T>,
    T: 'static,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = &self.predicate;
        self.inner
            .find(|item| predicate.matches(<I::Item as Borrow<T>>::borrow(item)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
