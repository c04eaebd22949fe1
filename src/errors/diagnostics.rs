use tracing::debug;

use super::errors::Error;

/// Ordered collection of the diagnostics one analysis run produces.
///
/// Handlers push into it and keep going; once the optional budget is spent
/// further errors are dropped.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
    limit: Option<usize>,
}

impl Diagnostics {
    pub fn new(limit: Option<usize>) -> Self {
        Diagnostics { errors: vec![], limit }
    }

    pub fn report(&mut self, error: Error) {
        debug!(error = %error, "diagnostic reported");
        if self.limit.is_some_and(|limit| self.errors.len() >= limit) && !error.is_internal() {
            return;
        }
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_internal(&self) -> bool {
        self.errors.iter().any(Error::is_internal)
    }

    pub fn is_exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.errors.len() >= limit)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}
