//! Pull-based asynchronous sequences.
//!
//! A [`Sequence`] produces elements one at a time, computing each only when
//! the consumer asks for it. Sequences are single pass: once an element has
//! been pulled it is gone, and a sequence that returned `None` stays
//! exhausted. Dropping a sequence before exhaustion abandons all remaining
//! work, which is the only cancellation mechanism the traversal needs.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

#[async_trait]
pub trait Sequence: Send {
    type Item: Send;

    /// Pull the next element, or `None` once the sequence is exhausted.
    async fn next(&mut self) -> Option<Self::Item>;
}

pub type BoxSequence<T> = Box<dyn Sequence<Item = T>>;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

#[async_trait]
impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;

    async fn next(&mut self) -> Option<Self::Item> {
        (**self).next().await
    }
}

/// Erase a sequence's concrete type.
pub fn boxed<S>(seq: S) -> BoxSequence<S::Item>
where
    S: Sequence + 'static,
{
    Box::new(seq)
}

/// Adapt an in-memory collection into a sequence.
pub fn iter<I>(into: I) -> Iter<I::IntoIter>
where
    I: IntoIterator,
{
    Iter {
        inner: into.into_iter(),
    }
}

pub struct Iter<I> {
    inner: I,
}

#[async_trait]
impl<I> Sequence for Iter<I>
where
    I: Iterator + Send,
    I::Item: Send,
{
    type Item = I::Item;

    async fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A sequence of exactly one element.
pub fn once<T: Send>(item: T) -> Once<T> {
    Once { item: Some(item) }
}

pub struct Once<T> {
    item: Option<T>,
}

#[async_trait]
impl<T: Send> Sequence for Once<T> {
    type Item = T;

    async fn next(&mut self) -> Option<T> {
        self.item.take()
    }
}

/// Lazily apply `f` to each element of `seq`.
pub fn map<S, F, U>(seq: S, f: F) -> Map<S, F>
where
    S: Sequence,
    F: FnMut(S::Item) -> U + Send,
    U: Send,
{
    Map { seq, f }
}

pub struct Map<S, F> {
    seq: S,
    f: F,
}

#[async_trait]
impl<S, F, U> Sequence for Map<S, F>
where
    S: Sequence,
    F: FnMut(S::Item) -> U + Send,
    U: Send,
{
    type Item = U;

    async fn next(&mut self) -> Option<U> {
        self.seq.next().await.map(&mut self.f)
    }
}

/// Lazily keep the elements of `seq` for which `predicate` holds.
pub fn filter<S, P>(seq: S, predicate: P) -> Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool + Send,
{
    Filter { seq, predicate }
}

pub struct Filter<S, P> {
    seq: S,
    predicate: P,
}

#[async_trait]
impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool + Send,
{
    type Item = S::Item;

    async fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.seq.next().await?;
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
    }
}

/// For each element of `seq`, obtain a sub-sequence from `f` and re-yield
/// every element of it in order before advancing. At most one sub-sequence
/// is held in flight.
pub fn flat_map<S, F, Sub>(seq: S, f: F) -> FlatMap<S, F, Sub>
where
    S: Sequence,
    F: FnMut(S::Item) -> Sub + Send,
    Sub: Sequence,
{
    FlatMap {
        seq,
        f,
        current: None,
    }
}

pub struct FlatMap<S, F, Sub> {
    seq: S,
    f: F,
    current: Option<Sub>,
}

#[async_trait]
impl<S, F, Sub> Sequence for FlatMap<S, F, Sub>
where
    S: Sequence,
    F: FnMut(S::Item) -> Sub + Send,
    Sub: Sequence,
{
    type Item = Sub::Item;

    async fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(item) = current.next().await {
                    return Some(item);
                }
                self.current = None;
            }
            let outer = self.seq.next().await?;
            self.current = Some((self.f)(outer));
        }
    }
}

/// Yield all of `first`, then all of `second`.
pub fn chain<A, B>(first: A, second: B) -> Chain<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    Chain {
        first: Some(first),
        second,
    }
}

pub struct Chain<A, B> {
    first: Option<A>,
    second: B,
}

#[async_trait]
impl<A, B> Sequence for Chain<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;

    async fn next(&mut self) -> Option<Self::Item> {
        if let Some(first) = self.first.as_mut() {
            if let Some(item) = first.next().await {
                return Some(item);
            }
            self.first = None;
        }
        self.second.next().await
    }
}

/// Defer the construction of a sequence until the first pull.
///
/// The future runs once, at the first call to `next`; any side effects it
/// performs (a directory listing, say) therefore happen only on demand.
pub fn defer<T: Send + 'static>(future: BoxFuture<BoxSequence<T>>) -> Defer<T> {
    Defer {
        state: DeferState::Pending(future),
    }
}

pub struct Defer<T> {
    state: DeferState<T>,
}

enum DeferState<T> {
    Pending(BoxFuture<BoxSequence<T>>),
    Started(BoxSequence<T>),
}

#[async_trait]
impl<T: Send + 'static> Sequence for Defer<T> {
    type Item = T;

    async fn next(&mut self) -> Option<T> {
        loop {
            match &mut self.state {
                DeferState::Started(seq) => return seq.next().await,
                DeferState::Pending(future) => {
                    let seq = future.as_mut().await;
                    self.state = DeferState::Started(seq);
                }
            }
        }
    }
}

/// End a sequence of results at its first `Err`.
///
/// The error itself is yielded, then the sequence reports exhaustion forever,
/// so a failure propagates at the point of encounter without any further
/// elements being produced afterwards.
pub fn stop_on_error<S, T, E>(seq: S) -> StopOnError<S>
where
    S: Sequence<Item = Result<T, E>>,
    T: Send,
    E: Send,
{
    StopOnError { seq: Some(seq) }
}

pub struct StopOnError<S> {
    seq: Option<S>,
}

#[async_trait]
impl<S, T, E> Sequence for StopOnError<S>
where
    S: Sequence<Item = Result<T, E>>,
    T: Send,
    E: Send,
{
    type Item = Result<T, E>;

    async fn next(&mut self) -> Option<Self::Item> {
        let seq = self.seq.as_mut()?;
        match seq.next().await {
            Some(Ok(item)) => Some(Ok(item)),
            Some(Err(err)) => {
                self.seq = None;
                Some(Err(err))
            }
            None => {
                self.seq = None;
                None
            }
        }
    }
}

/// Eagerly pull a sequence to exhaustion.
pub async fn drain<S: Sequence>(mut seq: S) -> Vec<S::Item> {
    let mut items = Vec::new();
    while let Some(item) = seq.next().await {
        items.push(item);
    }
    items
}
