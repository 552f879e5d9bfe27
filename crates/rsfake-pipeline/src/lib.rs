//! Parallel partition-generate-merge pipeline.
//!
//! A request for `total_rows` over `worker_count` workers is split into equal
//! partitions (floor division, remainder dropped), each partition is generated
//! by an isolated worker with its own generation context, and the completed
//! partitions are merged into one [`ColumnarTable`] in completion order.
//!
//! Email uniqueness is only guaranteed within one partition. With more than
//! one worker the merged table may contain duplicate emails.

mod pool;

pub use pool::{ContextFactory, ContextFn, FakeContextFactory, WorkerPool};
pub use rsfake_core::{ColumnarTable, Error, Result};

/// Generate `total_rows` person records across `worker_count` workers.
///
/// Produces `(total_rows / worker_count) * worker_count` rows. Fails with
/// `InvalidConfiguration` when `worker_count` is zero, or with the first
/// worker error when any partition fails.
pub async fn generate_dataset(total_rows: u64, worker_count: usize) -> Result<ColumnarTable> {
    WorkerPool::new(FakeContextFactory::default())
        .generate(total_rows, worker_count)
        .await
}
