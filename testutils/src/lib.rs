//! Utilities used in tests in multiple crates within the workspace.

use std::{
    fmt::{Debug, Display},
    marker::PhantomData,
};

use googletest::{
    description::Description,
    matcher::{Matcher, MatcherBase, MatcherResult},
};

/// Creates a matcher against an `anyhow::Error` that downcasts to the given
/// `Copy` type and matches the inner matcher against the value.
pub fn anyhow_downcasts_to<E, M>(inner: M) -> AnyhowDowncastTo<E, M> {
    AnyhowDowncastTo::<E, M> {
        inner,
        phantom_e: Default::default(),
    }
}

/// Creates a matcher against an `anyhow::Error` that downcasts to the given
/// type and matches the inner matcher against a reference to it.
pub fn anyhow_downcasts_to_ref<E, M>(inner: M) -> AnyhowDowncastToRef<E, M> {
    AnyhowDowncastToRef::<E, M> {
        inner,
        phantom_e: Default::default(),
    }
}

fn type_name<E>() -> &'static str {
    std::any::type_name::<E>()
}

fn describe_downcast<E>(matcher_result: MatcherResult, inner: Description) -> Description {
    match matcher_result {
        MatcherResult::Match => format!(
            "is of concrete error type {} with value which {}",
            type_name::<E>(),
            inner
        )
        .into(),
        MatcherResult::NoMatch => format!(
            "is or is not a concrete error type {} with value which {}",
            type_name::<E>(),
            inner
        )
        .into(),
    }
}

fn explain_downcast<E>(inner: Option<Description>) -> Description {
    match inner {
        Some(inner) => Description::new()
            .text(format!(
                "which is of the expected concrete error type {}",
                type_name::<E>()
            ))
            .text("with value")
            .nested(inner),
        None => Description::new().text(format!(
            "which is not the expected concrete error type {}",
            type_name::<E>()
        )),
    }
}

pub struct AnyhowDowncastTo<E, M> {
    inner: M,
    phantom_e: PhantomData<E>,
}

impl<E, M> MatcherBase for AnyhowDowncastTo<E, M> {}

impl<E, M> Matcher<&anyhow::Error> for AnyhowDowncastTo<E, M>
where
    E: Copy + Display + Debug + Send + Sync + 'static,
    M: Matcher<E>,
{
    fn matches(&self, actual: &anyhow::Error) -> MatcherResult {
        actual
            .downcast_ref::<E>()
            .map(|v| self.inner.matches(*v))
            .unwrap_or(MatcherResult::NoMatch)
    }

    fn explain_match(&self, actual: &anyhow::Error) -> Description {
        explain_downcast::<E>(actual.downcast_ref::<E>().map(|e| self.inner.explain_match(*e)))
    }

    fn describe(&self, matcher_result: MatcherResult) -> Description {
        describe_downcast::<E>(matcher_result, self.inner.describe(matcher_result))
    }
}

pub struct AnyhowDowncastToRef<E, M> {
    inner: M,
    phantom_e: PhantomData<E>,
}

impl<E, M> MatcherBase for AnyhowDowncastToRef<E, M> {}

impl<E, M> Matcher<&anyhow::Error> for AnyhowDowncastToRef<E, M>
where
    E: Display + Debug + Send + Sync + 'static,
    M: for<'e> Matcher<&'e E>,
{
    fn matches(&self, actual: &anyhow::Error) -> MatcherResult {
        actual
            .downcast_ref::<E>()
            .map(|v| self.inner.matches(v))
            .unwrap_or(MatcherResult::NoMatch)
    }

    fn explain_match(&self, actual: &anyhow::Error) -> Description {
        explain_downcast::<E>(actual.downcast_ref::<E>().map(|e| self.inner.explain_match(e)))
    }

    fn describe(&self, matcher_result: MatcherResult) -> Description {
        describe_downcast::<E>(matcher_result, self.inner.describe(matcher_result))
    }
}
