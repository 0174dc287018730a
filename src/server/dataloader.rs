use std::collections::HashMap;
use std::fmt::Debug;
use std::future::poll_fn;
use std::hash::Hash;
use std::pin::{Pin, pin};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Poll, Waker};

use tracing::trace;

pub trait BatchLoader {
    type K: Hash + Eq + Clone + Send + 'static;
    type V: Clone + Send + 'static;

    /// Resolves a batch of keys at once. Keys missing from the returned map
    /// resolve to `None`.
    fn load_batch(
        &mut self,
        keys: Vec<Self::K>,
    ) -> impl Future<Output = HashMap<Self::K, Self::V>> + Send + 'static;
}

type BatchFuture<B> = Pin<
    Box<
        dyn Future<Output = HashMap<<B as BatchLoader>::K, <B as BatchLoader>::V>> + Send,
    >,
>;

enum Entry<V> {
    Requested(Vec<Waker>),
    Ready(Option<V>),
}

struct LoaderInner<B: BatchLoader> {
    values: HashMap<B::K, Entry<B::V>>,
    pending_keys: HashMap<B::K, Vec<Waker>>,
    load_batch: B,
}

/// Collects the keys requested while a wrapped future is polled and resolves
/// them with a single [`BatchLoader::load_batch`] call. Values are cached for
/// the lifetime of the loader, which is one GraphQL request.
pub struct DataLoader<B: BatchLoader> {
    inner: Arc<Mutex<LoaderInner<B>>>,
}

impl<B: BatchLoader> Clone for DataLoader<B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<B> DataLoader<B>
where
    B: BatchLoader + Send,
    B::K: Debug,
{
    pub fn new(load_batch: B) -> Self {
        let inner = LoaderInner {
            load_batch,
            values: Default::default(),
            pending_keys: Default::default(),
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoaderInner<B>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves once the surrounding [`DataLoader::wrap`] has loaded `key`.
    pub fn load(&self, key: B::K) -> impl Future<Output = Option<B::V>> {
        poll_fn(move |cx| {
            let mut guard = self.lock();
            let inner = &mut *guard;

            let wakers = match inner.values.get_mut(&key) {
                Some(Entry::Ready(v)) => {
                    return Poll::Ready(v.clone());
                }
                Some(Entry::Requested(wakers)) => wakers,
                None => inner.pending_keys.entry(key.clone()).or_insert_with(|| {
                    trace!(?key, "queued for the next batch");
                    vec![]
                }),
            };

            wakers.push(cx.waker().clone());
            Poll::Pending
        })
    }

    /// Drives `fut`, dispatching a batch whenever it stalls on keys that have
    /// been requested but not loaded yet.
    pub async fn wrap<O>(&self, fut: impl Future<Output = O>) -> O {
        let mut in_flight: Option<(Vec<B::K>, BatchFuture<B>)> = None;

        let mut fut = pin!(fut);
        poll_fn(move |cx| {
            if let Some((keys, batch)) = &mut in_flight {
                let Poll::Ready(mut loaded) = batch.as_mut().poll(cx) else {
                    return Poll::Pending;
                };

                let mut inner = self.lock();
                for key in keys.drain(..) {
                    let value = loaded.remove(&key);
                    if let Some(Entry::Requested(wakers)) =
                        inner.values.insert(key, Entry::Ready(value))
                    {
                        wakers.into_iter().for_each(Waker::wake);
                    }
                }
                drop(inner);

                in_flight = None;
            }

            let res = fut.as_mut().poll(cx);
            if res.is_pending() {
                // Polling the inner future may have registered more keys.
                let mut inner = self.lock();

                if !inner.pending_keys.is_empty() {
                    let mut keys = Vec::with_capacity(inner.pending_keys.len());
                    for (k, wakers) in std::mem::take(&mut inner.pending_keys) {
                        keys.push(k.clone());
                        inner.values.insert(k, Entry::Requested(wakers));
                    }

                    let batch: BatchFuture<B> = Box::pin(inner.load_batch.load_batch(keys.clone()));
                    in_flight = Some((keys, batch));

                    // Poll again right away so the batch starts.
                    cx.waker().wake_by_ref();
                }
            }
            res
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Doubler {
        batches: Arc<AtomicUsize>,
    }

    impl BatchLoader for Doubler {
        type K = u32;
        type V = u32;

        fn load_batch(
            &mut self,
            keys: Vec<u32>,
        ) -> impl Future<Output = HashMap<u32, u32>> + Send + 'static {
            self.batches.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::task::yield_now().await;
                // odd keys are unknown
                keys.into_iter()
                    .filter(|k| k % 2 == 0)
                    .map(|k| (k, k * 2))
                    .collect()
            }
        }
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_batch() {
        let batches = Arc::new(AtomicUsize::new(0));
        let loader = DataLoader::new(Doubler {
            batches: batches.clone(),
        });

        let (a, b, c) = loader
            .wrap(async { tokio::join!(loader.load(2), loader.load(4), loader.load(2)) })
            .await;

        assert_eq!((a, b, c), (Some(4), Some(8), Some(4)));
        assert_eq!(batches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_keys_resolve_to_none() {
        let batches = Arc::new(AtomicUsize::new(0));
        let loader = DataLoader::new(Doubler { batches });

        let (found, missing) = loader
            .wrap(async { tokio::join!(loader.load(6), loader.load(7)) })
            .await;

        assert_eq!(found, Some(12));
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn loaded_values_are_cached() {
        let batches = Arc::new(AtomicUsize::new(0));
        let loader = DataLoader::new(Doubler {
            batches: batches.clone(),
        });

        let first = loader.wrap(loader.load(10)).await;
        let second = loader.wrap(loader.load(10)).await;

        assert_eq!(first, second);
        assert_eq!(batches.load(Ordering::SeqCst), 1);
    }
}
