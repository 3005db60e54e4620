//! # Rule Chains
//!
//! A field's rules are an ordered list of `(predicate, message)` pairs.
//! [`RuleChain::check`] evaluates them in order against the current value
//! and returns the message of the first rule whose predicate fails.
//!
//! Messages are owned strings so limits from [`crate::SchemaConfig`] can be
//! rendered into them when the schema is built.

use std::fmt;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A single validation rule.
pub struct Rule<T: ?Sized> {
    message: String,
    predicate: Predicate<T>,
}

impl<T: ?Sized> Rule<T> {
    /// Create a rule that fails with `message` when `predicate` returns false.
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether `value` satisfies this rule.
    pub fn passes(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Ordered rules for one field.
pub struct RuleChain<T: ?Sized> {
    rules: Vec<Rule<T>>,
}

impl<T: ?Sized> RuleChain<T> {
    /// An empty chain; every value passes.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule to the end of the chain.
    pub fn rule(
        mut self,
        message: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(Rule::new(message, predicate));
        self
    }

    /// Evaluate rules in order, stopping at the first failure.
    pub fn check(&self, value: &T) -> Result<(), &str> {
        match self.rules.iter().find(|rule| !rule.passes(value)) {
            Some(failed) => Err(failed.message()),
            None => Ok(()),
        }
    }
}

impl<T: ?Sized> Default for RuleChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for RuleChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.rules).finish()
    }
}
