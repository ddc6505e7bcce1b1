//! Parallel map with per-item failure isolation.
//!
//! Both trigger evaluation and scoring-input assembly fan out one I/O-bound
//! fetch per key; one failed key must not abort the rest. Results come back
//! keyed, each carrying its own `Result`.

use crate::error::PulseResult;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

/// Runs `op` concurrently for every key and collects per-key results.
///
/// Every key appears in the output map with its own success or failure,
/// except keys whose task panicked, which are logged and omitted.
pub async fn fan_out<K, T, F, Fut>(keys: Vec<K>, op: F) -> HashMap<K, PulseResult<T>>
where
    K: Eq + Hash + Clone + Send + 'static,
    T: Send + 'static,
    F: Fn(K) -> Fut,
    Fut: Future<Output = PulseResult<T>> + Send + 'static,
{
    let mut handles = Vec::with_capacity(keys.len());
    for key in keys {
        let fut = op(key.clone());
        handles.push(tokio::spawn(async move { (key, fut.await) }));
    }

    let mut results = HashMap::with_capacity(handles.len());
    for joined in futures_util::future::join_all(handles).await {
        match joined {
            Ok((key, result)) => {
                results.insert(key, result);
            }
            Err(e) => {
                tracing::error!("fan-out task panicked: {e}");
            }
        }
    }

    results
}
