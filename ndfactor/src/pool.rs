/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! A handle to a thread pool that is either borrowed from the caller
//! or created (and owned) on demand.

use rayon::ThreadPool;
use rayon::ThreadPoolBuildError;
use rayon::ThreadPoolBuilder;

/// The type of error for thread pool selection.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PoolError {
    #[error("failed to build a thread pool with {num_threads} threads")]
    Build {
        num_threads: usize,
        #[source]
        source: ThreadPoolBuildError,
    },
}

/// Either no thread pool, a borrowed one, or one owned by this
/// handle.
#[derive(Debug, Default)]
pub enum MaybeOwningThreadPool<'a> {
    /// Run sequentially.
    #[default]
    None,
    Borrowed(&'a ThreadPool),
    Owned(ThreadPool),
}

impl<'a> MaybeOwningThreadPool<'a> {
    /// Selects a thread pool for the requested `parallelism`:
    ///
    /// - `0`: use the default. If there is no `default_pool` and
    ///   `default_parallelism > 1`, a pool of `default_parallelism`
    ///   threads is created; otherwise `default_pool` is borrowed (or
    ///   there is no pool at all).
    /// - `1`: no pool; run sequentially.
    /// - `n > 1`: a new pool of `n` threads.
    ///
    /// # Panics
    /// Panics if `default_parallelism` is 0.
    pub fn get_or_create(
        parallelism: usize,
        default_pool: Option<&'a ThreadPool>,
        default_parallelism: usize,
    ) -> Result<Self, PoolError> {
        assert!(
            default_parallelism >= 1,
            "default parallelism must be at least 1"
        );
        match (parallelism, default_pool) {
            (0, None) if default_parallelism > 1 => Self::create(default_parallelism),
            (0, Some(pool)) => Ok(Self::Borrowed(pool)),
            (0, None) | (1, _) => Ok(Self::None),
            (num_threads, _) => Self::create(num_threads),
        }
    }

    fn create(num_threads: usize) -> Result<Self, PoolError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|index| format!("ndfactor-{}", index))
            .build()
            .map_err(|source| PoolError::Build {
                num_threads,
                source,
            })?;
        tracing::debug!(num_threads, "created thread pool");
        Ok(Self::Owned(pool))
    }

    /// The selected pool, if any.
    pub fn get(&self) -> Option<&ThreadPool> {
        match self {
            Self::None => None,
            Self::Borrowed(pool) => Some(pool),
            Self::Owned(pool) => Some(pool),
        }
    }

    pub fn is_some(&self) -> bool {
        self.get().is_some()
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Runs `op` in the selected pool, or on the current thread if
    /// there is none.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match self.get() {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(num_threads: usize) -> ThreadPool {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .unwrap()
    }

    #[test]
    fn test_parallelism_one_is_sequential() {
        let default = pool(2);
        let selected = MaybeOwningThreadPool::get_or_create(1, Some(&default), 4).unwrap();
        assert!(!selected.is_some());
        assert_eq!(selected.install(|| 7), 7);
    }

    #[test]
    fn test_parallelism_zero_borrows_default() {
        let default = pool(3);
        let selected = MaybeOwningThreadPool::get_or_create(0, Some(&default), 8).unwrap();
        assert!(matches!(selected, MaybeOwningThreadPool::Borrowed(_)));
        assert_eq!(selected.get().unwrap().current_num_threads(), 3);
    }

    #[test]
    fn test_parallelism_zero_creates_default() {
        let selected = MaybeOwningThreadPool::get_or_create(0, None, 2).unwrap();
        assert!(selected.is_owned());
        assert_eq!(selected.get().unwrap().current_num_threads(), 2);
        assert_eq!(selected.install(rayon::current_num_threads), 2);
    }

    #[test]
    fn test_parallelism_zero_without_default() {
        let selected = MaybeOwningThreadPool::get_or_create(0, None, 1).unwrap();
        assert!(!selected.is_some());
    }

    #[test]
    fn test_explicit_parallelism_creates_pool() {
        let default = pool(2);
        let selected = MaybeOwningThreadPool::get_or_create(4, Some(&default), 2).unwrap();
        assert!(selected.is_owned());
        assert_eq!(selected.get().unwrap().current_num_threads(), 4);
    }

    #[test]
    #[should_panic(expected = "default parallelism must be at least 1")]
    fn test_zero_default_parallelism_panics() {
        let _ = MaybeOwningThreadPool::get_or_create(0, None, 0);
    }
}
