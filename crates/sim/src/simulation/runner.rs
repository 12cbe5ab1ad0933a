//! Running many simulations at once.
//!
//! Each request runs on its own blocking worker. A semaphore bounds how many
//! run at the same time and every run has a wall-clock limit. When the limit
//! passes the run's abort flag is raised and the run reports
//! `SimulationDiverged` with [`DivergenceReason::Timeout`].

use crate::errors::{DivergenceReason, SimulationError};
use crate::simulation::{RunnerConfig, SimulationBuilder};
use crate::trace::Trace;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

/// One simulation to run.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    /// Caller-chosen label used in logs
    pub id: String,
    pub builder: SimulationBuilder,
}

impl SimulationRequest {
    pub fn new(id: impl Into<String>, builder: SimulationBuilder) -> Self {
        Self {
            id: id.into(),
            builder,
        }
    }
}

/// Bounded, timed executor for simulation requests.
///
/// Cheap to clone; clones share the same concurrency limit.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl SimulationRunner {
    pub fn new(config: &RunnerConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            permits: Arc::new(Semaphore::new(config.max_concurrent)),
            timeout: config.timeout(),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one request to completion, timeout or failure.
    pub async fn run(&self, request: SimulationRequest) -> Result<Trace, SimulationError> {
        let _permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| SimulationError::Worker(e.to_string()))?;

        let SimulationRequest { id, builder } = request;
        log::debug!("Starting simulation '{id}'");

        let abort = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&abort);
        let mut handle = tokio::task::spawn_blocking(move || {
            let sim = builder.build()?;
            sim.run_with_abort(&flag)
        });

        match tokio::time::timeout(self.timeout, &mut handle).await {
            Ok(joined) => joined.map_err(|e| SimulationError::Worker(e.to_string()))?,
            Err(_) => {
                log::warn!(
                    "Simulation '{id}' exceeded {} ms; aborting",
                    self.timeout.as_millis()
                );
                abort.store(true, Ordering::Relaxed);
                let result = handle
                    .await
                    .map_err(|e| SimulationError::Worker(e.to_string()))?;
                match result {
                    Err(SimulationError::SimulationDiverged {
                        ticks,
                        reason: DivergenceReason::Aborted,
                    }) => Err(SimulationError::SimulationDiverged {
                        ticks,
                        reason: DivergenceReason::Timeout,
                    }),
                    other => other,
                }
            }
        }
    }

    /// Run every request concurrently. Results come back in request order.
    pub async fn run_all(
        &self,
        requests: Vec<SimulationRequest>,
    ) -> Vec<Result<Trace, SimulationError>> {
        self.run_each(requests, |_, _| {}).await
    }

    /// Like [`run_all`](Self::run_all), calling `on_finish` with the request
    /// id and result as each run completes.
    pub async fn run_each<F>(
        &self,
        requests: Vec<SimulationRequest>,
        on_finish: F,
    ) -> Vec<Result<Trace, SimulationError>>
    where
        F: Fn(&str, &Result<Trace, SimulationError>) + Send + Sync + 'static,
    {
        let on_finish = Arc::new(on_finish);
        let handles: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let runner = self.clone();
                let on_finish = Arc::clone(&on_finish);
                tokio::spawn(async move {
                    let id = request.id.clone();
                    let result = runner.run(request).await;
                    on_finish(&id, &result);
                    result
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle
                .await
                .unwrap_or_else(|e| Err(SimulationError::Worker(e.to_string())));
            results.push(result);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn runner(max_concurrent: usize, timeout_ms: u64) -> SimulationRunner {
        SimulationRunner::new(&RunnerConfig {
            max_concurrent,
            timeout_ms,
        })
        .unwrap()
    }

    fn request(id: &str, fasta: &str) -> SimulationRequest {
        SimulationRequest::new(id, SimulationBuilder::new().fasta(fasta))
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let config = RunnerConfig {
            max_concurrent: 0,
            timeout_ms: 10,
        };
        assert!(matches!(
            SimulationRunner::new(&config),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_run_single() {
        let trace = runner(2, 5_000)
            .run(request("one", ">s\nATGACCTAA\n"))
            .await
            .unwrap();
        assert_eq!(trace.final_state().unwrap().proteins, vec!["Protein_X"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_run_all_keeps_request_order() {
        let requests = vec![
            request("x", ">a\nATGACCTAA\n"),
            request("bad", "ACGT\n"),
            request("s", ">b\nATGCCGTAA\n"),
        ];
        let finished = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&finished);

        let results = runner(1, 5_000)
            .run_each(requests, move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(finished.load(Ordering::SeqCst), 3);
        assert_eq!(
            results[0].as_ref().unwrap().final_state().unwrap().proteins,
            vec!["Protein_X"]
        );
        assert!(matches!(
            results[1],
            Err(SimulationError::MalformedSequence(_))
        ));
        assert_eq!(
            results[2].as_ref().unwrap().final_state().unwrap().proteins,
            vec!["Synthesis"]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_timeout_aborts_run() {
        let fasta = format!(">long\n{}\n", "ATGACCTAA".repeat(20_000));
        let builder = SimulationBuilder::new().fasta(fasta).max_ticks(u64::MAX);

        let err = runner(1, 1)
            .run(SimulationRequest::new("long", builder))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::SimulationDiverged {
                reason: DivergenceReason::Timeout,
                ..
            }
        ));
    }
}
