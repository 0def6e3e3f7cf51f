//! Search domain contract.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::Add;

use num_traits::Zero;

/// Path cost: additive, totally ordered, zero at the root.
///
/// Integer types satisfy this out of the box. Floating point does not, as
/// the frontier needs a total order to stay deterministic.
pub trait Cost: Copy + Ord + Debug + Zero + Add<Output = Self> {}

impl<T> Cost for T where T: Copy + Ord + Debug + Zero + Add<Output = T> {}

/// The capability set a state space must provide to be searched.
///
/// # Contract
///
/// - `neighbors` is pure and returns a finite (possibly empty) list.
/// - `distance` is non-negative for every `(state, neighbor)` pair it is
///   called with.
/// - `heuristic` never overestimates the remaining cost to `goal`; the
///   finalize-on-pop policy additionally needs it to be consistent.
///
/// Methods are infallible. A domain that can fail should validate its
/// inputs before the search starts; a panic raised inside a method unwinds
/// through [`crate::engine::AStar::solve`] to the caller untouched.
pub trait SearchDomain {
    type State: Ord + Clone;
    type Cost: Cost;

    /// States reachable from `state` in one step.
    fn neighbors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Step cost from `from` to its neighbor `to`.
    fn distance(&self, from: &Self::State, to: &Self::State) -> Self::Cost;

    /// Estimated remaining cost from `state` to `goal`.
    fn heuristic(&self, state: &Self::State, goal: &Self::State) -> Self::Cost;
}

impl<D: SearchDomain + ?Sized> SearchDomain for &D {
    type State = D::State;
    type Cost = D::Cost;

    fn neighbors(&self, state: &Self::State) -> Vec<Self::State> {
        (**self).neighbors(state)
    }

    fn distance(&self, from: &Self::State, to: &Self::State) -> Self::Cost {
        (**self).distance(from, to)
    }

    fn heuristic(&self, state: &Self::State, goal: &Self::State) -> Self::Cost {
        (**self).heuristic(state, goal)
    }
}

/// A [`SearchDomain`] assembled from three closures.
pub struct FnDomain<S, C, G, D, H> {
    generator: G,
    distance: D,
    estimator: H,
    _marker: PhantomData<fn(&S) -> C>,
}

impl<S, C, G, D, H> FnDomain<S, C, G, D, H>
where
    G: Fn(&S) -> Vec<S>,
    D: Fn(&S, &S) -> C,
    H: Fn(&S, &S) -> C,
{
    pub fn new(generator: G, distance: D, estimator: H) -> Self {
        Self {
            generator,
            distance,
            estimator,
            _marker: PhantomData,
        }
    }
}

impl<S, C, G, D, H> std::fmt::Debug for FnDomain<S, C, G, D, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnDomain").finish_non_exhaustive()
    }
}

impl<S, C, G, D, H> SearchDomain for FnDomain<S, C, G, D, H>
where
    S: Ord + Clone,
    C: Cost,
    G: Fn(&S) -> Vec<S>,
    D: Fn(&S, &S) -> C,
    H: Fn(&S, &S) -> C,
{
    type State = S;
    type Cost = C;

    fn neighbors(&self, state: &S) -> Vec<S> {
        (self.generator)(state)
    }

    fn distance(&self, from: &S, to: &S) -> C {
        (self.distance)(from, to)
    }

    fn heuristic(&self, state: &S, goal: &S) -> C {
        (self.estimator)(state, goal)
    }
}
