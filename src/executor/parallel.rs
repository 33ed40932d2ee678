//! Parallel category execution
//!
//! Fans category runs out to tokio tasks bounded by a semaphore and collects
//! them in completion order.

use futures::stream::{FuturesUnordered, StreamExt};
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, error, info};

use super::runner::{CategoryResults, CategoryRunner};
use crate::models::{CategoryOutcome, TestCategory};

/// Parallel category executor
pub struct ParallelExecutor {
    max_concurrent: usize,
}

impl ParallelExecutor {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Run every category through the runner, asking the toolchain for its
    /// own concurrency as well
    pub async fn run_all(
        &self,
        runner: &CategoryRunner,
        categories: &[TestCategory],
    ) -> CategoryResults {
        info!(
            "🚀 Running {} categories in parallel (max {} workers)",
            categories.len(),
            self.max_concurrent
        );

        let start = Instant::now();
        let results = self
            .run_with(categories, |category| {
                let runner = runner.clone();
                async move { runner.run_category(category.name(), true).await }
            })
            .await;

        info!(
            "Parallel execution completed in {}ms",
            start.elapsed().as_millis()
        );
        results
    }

    /// Spawn `task` for each category and collect the outcomes.
    ///
    /// A task that panics is recorded as an error placeholder; the remaining
    /// tasks are unaffected.
    pub async fn run_with<F, Fut>(&self, categories: &[TestCategory], task: F) -> CategoryResults
    where
        F: Fn(TestCategory) -> Fut,
        Fut: Future<Output = CategoryOutcome> + Send + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut pending = FuturesUnordered::new();

        for &category in categories {
            let semaphore = semaphore.clone();
            let work = task(category);

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire().await;
                debug!("Starting {} tests", category);
                work.await
            });

            pending.push(async move { (category, handle.await) });
        }

        let mut results = CategoryResults::new();
        while let Some((category, joined)) = pending.next().await {
            let outcome = joined.unwrap_or_else(|e| {
                let message = join_error_message(e);
                error!("{} worker failed: {}", category, message);
                CategoryOutcome::error(message)
            });
            results.insert(category.name().to_string(), outcome);
        }

        results
    }
}

impl Default for ParallelExecutor {
    fn default() -> Self {
        Self::new(3)
    }
}

fn join_error_message(err: JoinError) -> String {
    if err.is_panic() {
        format!("worker panicked: {}", panic_message(err.into_panic()))
    } else {
        err.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
