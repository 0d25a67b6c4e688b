//! Values that carry the non-fatal errors found while producing them.

use alloc::vec::Vec;

/// A result that is always usable, plus everything that went wrong on the
/// way. Importers and the packer keep going after a bad record or row and
/// report the whole list at the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnosed<T, E> {
    pub value: T,
    pub errors: Vec<E>,
}

impl<T, E> Diagnosed<T, E> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            errors: Vec::new(),
        }
    }

    pub fn push(&mut self, error: E) {
        self.errors.push(error);
    }

    pub fn extend<I: IntoIterator<Item = E>>(&mut self, errors: I) {
        self.errors.extend(errors);
    }

    /// True when nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Transform the value, keeping the errors.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Diagnosed<U, E> {
        Diagnosed {
            value: f(self.value),
            errors: self.errors,
        }
    }

    pub fn into_parts(self) -> (T, Vec<E>) {
        (self.value, self.errors)
    }
}
