//! Layered wrapping: the mechanic behind Decorator.
//!
//! A [`Decorator`] owns exactly one inner value and one layer. Chains are built
//! bottom-up by value (`base.wrap(a).wrap(b)`), so a decorator can never end
//! up wrapping itself. Evaluation delegates to the inner value first and then
//! applies the layer's contribution, so results accumulate inner-to-outer.

/// Single-operation contract shared by base units and decorators.
pub trait Evaluate {
    type Output;

    fn evaluate(&self) -> Self::Output;
}

/// A pure contribution layered over an inner result.
pub trait Layer<T> {
    fn apply(&self, inner: T) -> T;
}

impl<T, F> Layer<T> for F
where
    F: Fn(T) -> T,
{
    fn apply(&self, inner: T) -> T {
        self(inner)
    }
}

impl<E: Evaluate + ?Sized> Evaluate for Box<E> {
    type Output = E::Output;

    fn evaluate(&self) -> Self::Output {
        (**self).evaluate()
    }
}

impl<E: Evaluate + ?Sized> Evaluate for &E {
    type Output = E::Output;

    fn evaluate(&self) -> Self::Output {
        (**self).evaluate()
    }
}

/// Default-forwarding adapter: one inner value plus the layer wrapped around it.
///
/// Multi-operation contracts implement themselves for `Decorator<I, L>` once
/// and read the per-layer contribution from `L`.
#[derive(Debug, Clone)]
pub struct Decorator<I, L> {
    inner: I,
    layer: L,
}

impl<I, L> Decorator<I, L> {
    pub fn new(inner: I, layer: L) -> Self {
        Self { inner, layer }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn into_parts(self) -> (I, L) {
        (self.inner, self.layer)
    }
}

impl<I, L> Evaluate for Decorator<I, L>
where
    I: Evaluate,
    L: Layer<I::Output>,
{
    type Output = I::Output;

    fn evaluate(&self) -> Self::Output {
        self.layer.apply(self.inner.evaluate())
    }
}

/// Adds `.wrap(layer)` to every sized value.
pub trait Wrap: Sized {
    fn wrap<L>(self, layer: L) -> Decorator<Self, L> {
        Decorator::new(self, layer)
    }
}

impl<T> Wrap for T {}

/// Boxes a unit so chains of different static shapes can share one type.
pub fn boxed<E>(unit: E) -> Box<dyn Evaluate<Output = E::Output>>
where
    E: Evaluate + 'static,
    E::Output: 'static,
{
    Box::new(unit)
}

/// A base value that evaluates to a clone of itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Base<T>(pub T);

impl<T: Clone> Evaluate for Base<T> {
    type Output = T;

    fn evaluate(&self) -> T {
        self.0.clone()
    }
}
