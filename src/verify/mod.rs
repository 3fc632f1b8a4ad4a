//! File verification: the slice verifier and the concurrent scheduler.

mod error;
mod file_verification;
mod types;

pub use error::{SchedulerError, VerifyError};
pub use file_verification::verify_file;
pub use types::VerifyOutcome;

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use rayon::prelude::*;

use crate::domain::FileId;
use crate::recovery_set::RecoverySet;
use crate::source::DataSource;

/// Verify many files across a bounded worker pool.
///
/// Workers pull jobs from the pool's queue and push each finished
/// [`VerifyOutcome`] into the returned channel the moment it is ready, so
/// results stream in completion order while later jobs are still running
/// and nothing ever blocks on an undrained result. The channel disconnects
/// once every submitted job has produced exactly one outcome; result order
/// is unspecified. `workers == 0` uses the available parallelism.
///
/// Each job owns its data source for exactly its own duration. A source
/// that fails to open (see [`crate::source::LazyFileSource`]) becomes that
/// job's `Err` outcome and leaves every other job untouched.
pub fn verify_all<S>(
    set: Arc<RecoverySet>,
    jobs: Vec<(FileId, S)>,
    workers: usize,
) -> Result<Receiver<VerifyOutcome>, SchedulerError>
where
    S: DataSource + 'static,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    let (sender, receiver) = unbounded();

    std::thread::spawn(move || {
        pool.install(move || {
            jobs.into_par_iter()
                .for_each_with(sender, |sender, (file_id, mut source)| {
                    let result = verify_file(&set, file_id, &mut source);
                    // The receiver may already be gone; remaining jobs
                    // still run to completion.
                    let _ = sender.send(VerifyOutcome { file_id, result });
                });
        });
    });

    Ok(receiver)
}
