// Splitting a row request across workers
//
// Every worker gets `total_rows / worker_count` rows (floor division). The
// remainder is not generated; `PartitionPlan::dropped_rows` reports it so
// callers can surface the shortfall.

use crate::error::{Error, Result};

/// One unit of work: `size` records for the worker at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub index: usize,
    pub size: usize,
}

/// Ordered partition sizes for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    requested_rows: u64,
    partitions: Vec<Partition>,
}

impl PartitionPlan {
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.partitions.iter().map(|p| p.size).collect()
    }

    pub fn worker_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn requested_rows(&self) -> u64 {
        self.requested_rows
    }

    /// Rows that will actually be generated
    pub fn planned_rows(&self) -> u64 {
        self.partitions.iter().map(|p| p.size as u64).sum()
    }

    /// Rows lost to floor division
    pub fn dropped_rows(&self) -> u64 {
        self.requested_rows - self.planned_rows()
    }
}

impl IntoIterator for PartitionPlan {
    type Item = Partition;
    type IntoIter = std::vec::IntoIter<Partition>;

    fn into_iter(self) -> Self::IntoIter {
        self.partitions.into_iter()
    }
}

/// Plan `worker_count` equal partitions for `total_rows`.
pub fn plan(total_rows: u64, worker_count: usize) -> Result<PartitionPlan> {
    if worker_count == 0 {
        return Err(Error::invalid_configuration(
            "worker count must be greater than 0",
        ));
    }

    let per_worker = usize::try_from(total_rows / worker_count as u64).map_err(|_| {
        Error::invalid_configuration(format!(
            "{} rows per worker does not fit in memory on this platform",
            total_rows / worker_count as u64
        ))
    })?;

    let partitions = (0..worker_count)
        .map(|index| Partition {
            index,
            size: per_worker,
        })
        .collect();

    let plan = PartitionPlan {
        requested_rows: total_rows,
        partitions,
    };
    tracing::debug!(
        total_rows,
        worker_count,
        per_worker,
        dropped_rows = plan.dropped_rows(),
        "Planned partitions"
    );
    Ok(plan)
}
