//! Merge strategies that fold hook results.

use std::marker::PhantomData;
use std::ops::ControlFlow;

/// How a token combines the results of its implementations.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MergeStrategy {
    /// Stop at the first non-default result.
    ShortCircuit,
    /// Add numeric contributions in order.
    Sum,
    /// Multiply numeric contributions in order.
    Product,
    /// Stop at the first `true`.
    AnyTrue,
    /// Gather every contribution.
    CollectAll,
}

/// Folding rule attached to a hook token at the type level.
pub trait Merge: 'static {
    /// What one handler returns.
    type Item: 'static;
    /// What the dispatch returns.
    type Output;

    const STRATEGY: MergeStrategy;

    fn start() -> Self::Output;

    /// Folds one result. `Break` ends the dispatch early.
    fn merge(acc: Self::Output, item: Self::Item) -> ControlFlow<Self::Output, Self::Output>;
}

/// First result that differs from `T::default()` wins.
pub struct FirstAccepted<T>(PhantomData<T>);

impl<T: Default + PartialEq + 'static> Merge for FirstAccepted<T> {
    type Item = T;
    type Output = T;

    const STRATEGY: MergeStrategy = MergeStrategy::ShortCircuit;

    fn start() -> T {
        T::default()
    }

    fn merge(acc: T, item: T) -> ControlFlow<T, T> {
        if item == T::default() {
            ControlFlow::Continue(acc)
        } else {
            ControlFlow::Break(item)
        }
    }
}

pub struct AnyTrue;

impl Merge for AnyTrue {
    type Item = bool;
    type Output = bool;

    const STRATEGY: MergeStrategy = MergeStrategy::AnyTrue;

    fn start() -> bool {
        false
    }

    fn merge(acc: bool, item: bool) -> ControlFlow<bool, bool> {
        if item {
            ControlFlow::Break(true)
        } else {
            ControlFlow::Continue(acc)
        }
    }
}

pub struct Sum;

impl Merge for Sum {
    type Item = f32;
    type Output = f32;

    const STRATEGY: MergeStrategy = MergeStrategy::Sum;

    fn start() -> f32 {
        0.0
    }

    fn merge(acc: f32, item: f32) -> ControlFlow<f32, f32> {
        ControlFlow::Continue(acc + item)
    }
}

pub struct Product;

impl Merge for Product {
    type Item = f32;
    type Output = f32;

    const STRATEGY: MergeStrategy = MergeStrategy::Product;

    fn start() -> f32 {
        1.0
    }

    fn merge(acc: f32, item: f32) -> ControlFlow<f32, f32> {
        ControlFlow::Continue(acc * item)
    }
}

/// Every handler returns a batch; batches are concatenated in order.
pub struct CollectAll<T>(PhantomData<T>);

impl<T: 'static> Merge for CollectAll<T> {
    type Item = Vec<T>;
    type Output = Vec<T>;

    const STRATEGY: MergeStrategy = MergeStrategy::CollectAll;

    fn start() -> Vec<T> {
        Vec::new()
    }

    fn merge(mut acc: Vec<T>, item: Vec<T>) -> ControlFlow<Vec<T>, Vec<T>> {
        acc.extend(item);
        ControlFlow::Continue(acc)
    }
}

/// Folds a sequence of results with `M`, stopping on `Break`.
pub fn fold<M: Merge>(items: impl IntoIterator<Item = M::Item>) -> M::Output {
    let mut acc = M::start();
    for item in items {
        match M::merge(acc, item) {
            ControlFlow::Continue(next) => acc = next,
            ControlFlow::Break(done) => return done,
        }
    }
    acc
}
