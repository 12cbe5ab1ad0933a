//! Tick simulator.
//!
//! A run starts from the environment encoded by the sequence and then
//! advances one tick at a time. Each tick:
//!
//! 1. injects every virus due at that tick, queueing its segments ahead of
//!    the host's remaining segments;
//! 2. translates the next queued segment, optionally with transcription
//!    errors, appending the proteins it yields;
//! 3. lets the environment drift.
//!
//! The run ends at the first tick that changes nothing once no segment or
//! injection is left. That tick is not recorded.

use crate::errors::{DivergenceReason, SimulationError};
use crate::simulation::environment;
use crate::simulation::program::{Program, Segment};
use crate::simulation::{SimulationConfig, SimulationState, VirusLibrary};
use crate::trace::Trace;
use crate::validation::{ValidatedSequence, validate, validate_raw};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of a single [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new state was recorded.
    Advanced,
    /// Nothing is left to change; the trace is complete.
    Terminal,
}

/// Main simulation engine.
#[derive(Debug)]
pub struct Simulation {
    /// Header id of the record being run
    record_id: String,
    program: Program,
    library: Arc<VirusLibrary>,
    config: SimulationConfig,
    state: SimulationState,
    /// Tick of the last recorded state
    tick: u64,
    /// Number of `step` calls that did work, checked against `max_ticks`
    ticks_run: u64,
    queue: VecDeque<Segment>,
    /// Present only when transcription errors are enabled
    rng: Option<Xoshiro256PlusPlus>,
    trace: Trace,
    finished: bool,
}

impl Simulation {
    /// Create a simulation of the first record in `sequence`.
    pub fn new(
        sequence: &ValidatedSequence,
        config: SimulationConfig,
        library: Arc<VirusLibrary>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let record = sequence.primary();
        if sequence.records().len() > 1 {
            log::warn!(
                "Input holds {} records; only '{}' is simulated",
                sequence.records().len(),
                record.id
            );
        }

        let origin = config.tick_origin;
        for virus in library.iter() {
            if virus.injection_tick(origin).is_none_or(|due| due <= origin) {
                log::warn!(
                    "Virus '{}' is not due after the origin {}; it will never be injected",
                    virus.name,
                    origin
                );
            }
        }

        let program = Program::compile(&record.sequence);
        let state = SimulationState::new(program.initial_environment(&config.initial_environment));
        let queue = program.segments().iter().cloned().collect();
        let rng = config
            .seed
            .filter(|_| config.mutation_rate > 0.0)
            .map(Xoshiro256PlusPlus::seed_from_u64);

        let mut trace = Trace::new();
        trace.record(origin, state.clone());

        Ok(Self {
            record_id: record.id.clone(),
            program,
            library,
            config,
            state,
            tick: origin,
            ticks_run: 0,
            queue,
            rng,
            trace,
            finished: false,
        })
    }

    /// Validate FASTA text and create a simulation from it.
    pub fn from_text(
        text: &str,
        config: SimulationConfig,
        library: Arc<VirusLibrary>,
    ) -> Result<Self, SimulationError> {
        let sequence = validate(text).map_err(SimulationError::MalformedSequence)?;
        Self::new(&sequence, config, library)
    }

    /// Validate a bare sequence (no header) and create a simulation from it.
    pub fn from_raw(
        text: &str,
        config: SimulationConfig,
        library: Arc<VirusLibrary>,
    ) -> Result<Self, SimulationError> {
        let sequence = validate_raw(text).map_err(SimulationError::MalformedSequence)?;
        if sequence.primary().sequence.is_empty() {
            return Err(SimulationError::EmptySequence);
        }
        Self::new(&sequence, config, library)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Tick of the most recently recorded state.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by one tick.
    ///
    /// Once `Terminal` has been returned every further call returns it again
    /// without doing anything.
    pub fn step(&mut self) -> Result<StepOutcome, SimulationError> {
        if self.finished {
            return Ok(StepOutcome::Terminal);
        }
        if self.ticks_run >= self.config.max_ticks {
            return Err(SimulationError::SimulationDiverged {
                ticks: self.ticks_run,
                reason: DivergenceReason::TickBudget,
            });
        }

        let origin = self.config.tick_origin;
        let Some(tick) = self.tick.checked_add(1) else {
            return Err(SimulationError::SimulationDiverged {
                ticks: self.ticks_run,
                reason: DivergenceReason::TickBudget,
            });
        };
        self.ticks_run += 1;
        let previous = self.state.clone();

        // 1. Viral injection
        let mut hijack = Vec::new();
        for virus in self.library.injections_at(tick, origin) {
            log::debug!("Tick {tick}: injecting virus '{}'", virus.name);
            self.state.viruses.push(virus.name.clone());
            hijack.extend(virus.segments().iter().cloned());
        }
        for segment in hijack.into_iter().rev() {
            self.queue.push_front(segment);
        }

        // 2. Translation
        let produced = match self.queue.pop_front() {
            Some(segment) => {
                let segment = self.transcribe(segment);
                segment.translate(&self.state.environment)
            }
            None => Vec::new(),
        };
        self.state.proteins.extend(produced.iter().cloned());

        // 3. Environment drift
        environment::drift(&mut self.state.environment, &produced);

        let settled = self.queue.is_empty()
            && !self.library.has_pending_after(tick, origin)
            && self.state == previous;
        if settled {
            log::debug!("Tick {tick}: terminal state reached");
            self.finished = true;
            return Ok(StepOutcome::Terminal);
        }

        log::debug!(
            "Tick {tick}: {} protein(s), {} virus(es), {} segment(s) queued",
            self.state.proteins.len(),
            self.state.viruses.len(),
            self.queue.len()
        );
        self.tick = tick;
        self.trace.record(tick, self.state.clone());
        Ok(StepOutcome::Advanced)
    }

    /// Apply transcription errors to a segment about to be translated.
    fn transcribe(&mut self, segment: Segment) -> Segment {
        let rate = self.config.mutation_rate;
        let Some(rng) = self.rng.as_mut() else {
            return segment;
        };

        let codons = segment
            .codons()
            .iter()
            .map(|&codon| {
                if rng.random::<f64>() >= rate {
                    return codon;
                }
                let position = rng.random_range(0..3);
                let base = codon.bases()[position].substitute(rng.random());
                let mutated = codon.with_base(position, base);
                log::debug!("Transcription error: {codon} -> {mutated}");
                mutated
            })
            .collect();
        Segment::new(codons)
    }

    /// Run to a terminal state and return the full trace.
    pub fn run(self) -> Result<Trace, SimulationError> {
        self.run_with_abort(&AtomicBool::new(false))
    }

    /// Run to a terminal state, checking `abort` before every tick.
    pub fn run_with_abort(mut self, abort: &AtomicBool) -> Result<Trace, SimulationError> {
        log::info!(
            "Simulating '{}': {} segment(s), {} virus(es), budget {} tick(s)",
            self.record_id,
            self.program.segments().len(),
            self.library.len(),
            self.config.max_ticks
        );

        loop {
            if abort.load(Ordering::Relaxed) {
                log::warn!(
                    "Simulation '{}' aborted after {} tick(s)",
                    self.record_id,
                    self.ticks_run
                );
                return Err(SimulationError::SimulationDiverged {
                    ticks: self.ticks_run,
                    reason: DivergenceReason::Aborted,
                });
            }
            if self.step()? == StepOutcome::Terminal {
                break;
            }
        }

        log::info!(
            "Simulation '{}' settled at tick {} with {} protein(s)",
            self.record_id,
            self.tick,
            self.state.proteins.len()
        );
        Ok(self.trace)
    }
}
