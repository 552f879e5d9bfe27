// Worker pool and aggregator
//
// One blocking task per partition. Each task builds its own generation
// context from the factory inside the task, so contexts never cross worker
// boundaries and nothing is shared between workers. Results are merged in
// completion order; the first failure ends the run.

use rsfake_core::{
    plan, ColumnarTable, Error, FakeFieldGenerator, FieldGenerator, Partition,
    PartitionGenerator, PartitionPlan, Result,
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Creates the private generation context for one partition.
pub trait ContextFactory: Send + Sync + 'static {
    type Context: FieldGenerator;

    fn create(&self, partition: Partition) -> Self::Context;
}

/// Default contexts: an entropy-seeded [`FakeFieldGenerator`] per worker.
#[derive(Debug, Clone, Copy)]
pub struct FakeContextFactory {
    pub max_unique_attempts: usize,
}

impl Default for FakeContextFactory {
    fn default() -> Self {
        Self {
            max_unique_attempts: rsfake_core::field::DEFAULT_MAX_UNIQUE_ATTEMPTS,
        }
    }
}

impl ContextFactory for FakeContextFactory {
    type Context = FakeFieldGenerator;

    fn create(&self, _partition: Partition) -> Self::Context {
        FakeFieldGenerator::new().with_max_unique_attempts(self.max_unique_attempts)
    }
}

/// Adapts a closure into a [`ContextFactory`].
pub struct ContextFn<F>(pub F);

impl<F, G> ContextFactory for ContextFn<F>
where
    F: Fn(Partition) -> G + Send + Sync + 'static,
    G: FieldGenerator,
{
    type Context = G;

    fn create(&self, partition: Partition) -> G {
        (self.0)(partition)
    }
}

/// Dispatches partitions to isolated workers and merges their tables.
pub struct WorkerPool<C> {
    factory: Arc<C>,
}

impl WorkerPool<FakeContextFactory> {
    pub fn with_fake_fields(max_unique_attempts: usize) -> Self {
        Self::new(FakeContextFactory {
            max_unique_attempts,
        })
    }
}

impl<C: ContextFactory> WorkerPool<C> {
    pub fn new(factory: C) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Plan `total_rows` over `worker_count` workers and run the plan.
    pub async fn generate(&self, total_rows: u64, worker_count: usize) -> Result<ColumnarTable> {
        let plan = plan(total_rows, worker_count)?;

        if plan.dropped_rows() > 0 {
            warn!(
                requested_rows = plan.requested_rows(),
                planned_rows = plan.planned_rows(),
                dropped_rows = plan.dropped_rows(),
                "Row count not divisible by worker count; remainder will not be generated"
            );
        }

        self.run(plan).await
    }

    /// Generate every partition of `plan` concurrently and merge the results.
    ///
    /// Merge order follows completion order. The first failing worker aborts
    /// the run: partitions that have not started are cancelled, running ones
    /// are left to finish detached, and their output is discarded.
    pub async fn run(&self, plan: PartitionPlan) -> Result<ColumnarTable> {
        let worker_count = plan.worker_count();
        let planned_rows = plan.planned_rows();
        let started = Instant::now();

        info!(
            "Dispatching {} rows across {} workers",
            planned_rows, worker_count
        );

        let mut workers = JoinSet::new();
        for partition in plan {
            let factory = Arc::clone(&self.factory);
            debug!(
                partition = partition.index,
                size = partition.size,
                "Spawning worker"
            );
            workers.spawn_blocking(move || generate_partition(partition, factory.as_ref()));
        }

        let mut merged = ColumnarTable::new();
        let mut completed = 0usize;

        while let Some(joined) = workers.join_next().await {
            let outcome = joined.unwrap_or_else(|e| {
                Err(Error::WorkerLost {
                    reason: e.to_string(),
                })
            });

            match outcome {
                Ok((partition, table)) => {
                    completed += 1;
                    debug!(
                        partition = partition.index,
                        rows = table.len(),
                        completed,
                        "Merging partition"
                    );
                    if merged.is_empty() {
                        merged = table;
                    } else {
                        merged.append(table);
                    }
                }
                Err(err) => {
                    warn!(
                        completed,
                        outstanding = workers.len(),
                        "Worker failed, abandoning run: {}",
                        err
                    );
                    workers.abort_all();
                    return Err(err);
                }
            }
        }

        info!(
            "Merged {} rows from {} partitions in {:.3}s",
            merged.len(),
            completed,
            started.elapsed().as_secs_f64()
        );

        Ok(merged)
    }
}

fn generate_partition<C: ContextFactory>(
    partition: Partition,
    factory: &C,
) -> Result<(Partition, ColumnarTable)> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut generator = PartitionGenerator::new(factory.create(partition));
        generator.generate(partition.size)
    }));

    match outcome {
        Ok(result) => result.map(|table| (partition, table)),
        Err(payload) => Err(Error::WorkerFailed {
            partition: partition.index,
            reason: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
