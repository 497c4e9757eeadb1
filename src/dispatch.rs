//! Rate-limited execution of independent remote calls.
//!
//! A [`Dispatcher`] owns a bounded rayon worker pool and a [`RateLimiter`].
//! Every task passes the limiter before it starts, so the aggregate start
//! rate stays under the ceiling however many tasks are in flight.

mod limiter;

pub use limiter::RateLimiter;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;

use crate::config::{ClientConfig, ConfigError};

/// Error building a dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request rate is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Executes batches of tasks on a worker pool behind a shared pacing gate.
#[derive(Debug)]
pub struct Dispatcher {
    /// Shared pacing gate.
    limiter: RateLimiter,
    /// Workers running tasks.
    pool: ThreadPool,
}

impl Dispatcher {
    /// Create a dispatcher with `workers` threads.
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` is zero or the pool cannot be started.
    pub fn new(limiter: RateLimiter, workers: usize) -> Result<Self, DispatchError> {
        if workers == 0 {
            return Err(ConfigError::Workers.into());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("megaverse-worker-{i}"))
            .build()?;
        Ok(Self { limiter, pool })
    }

    /// Create a dispatcher from the configured rate and worker count.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is invalid or the pool cannot be started.
    pub fn from_config(config: &ClientConfig) -> Result<Self, DispatchError> {
        let limiter = RateLimiter::per_second(config.requests_per_second)?;
        Self::new(limiter, config.workers)
    }

    /// The shared pacing gate.
    #[must_use]
    pub const fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Run a single call on the calling thread once the gate allows it.
    pub fn call<R>(&self, f: impl FnOnce() -> R) -> R {
        self.limiter.acquire();
        f()
    }

    /// Run every task exactly once and collect the success flags.
    ///
    /// Tasks run concurrently and complete in no particular order; the
    /// result vector is in submission order. A task reporting `false` does
    /// not affect its siblings and is not retried.
    pub fn dispatch<T, F>(&self, tasks: &[T], f: F) -> Vec<bool>
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync + Send,
    {
        self.pool.install(|| {
            tasks
                .par_iter()
                .map(|task| {
                    self.limiter.acquire();
                    f(task)
                })
                .collect()
        })
    }
}
