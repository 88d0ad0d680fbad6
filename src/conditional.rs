//! Conditional application of builder setters.

/// Chainable builders that can apply a mutation only when a predicate holds.
///
/// Every resource builder implements this, so optional filters can stay in
/// one chain instead of breaking it up with `if` statements.
///
/// # Examples
///
/// ```
/// use bookwell::{Conditional, MockTransport, Service};
///
/// let only_assigned = false;
///
/// let service = Service::new(MockTransport::new())
///     .at(1)
///     .when(only_assigned, |service| service.assigned());
///
/// assert!(service.filters().assigned.is_none());
/// ```
pub trait Conditional: Sized {
    /// Returns `mutator(self)` if `predicate` is true, otherwise `self`
    /// untouched.
    fn when<F>(self, predicate: bool, mutator: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if predicate {
            mutator(self)
        } else {
            self
        }
    }
}
