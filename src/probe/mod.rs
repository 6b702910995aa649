//! Sequential API probe
//!
//! Runs an ordered list of [`Check`]s against one session, one at a time,
//! and records exactly one [`CheckResult`] per check. Nothing a check does
//! can stop the run: transport errors become failed verdicts, and checks
//! whose prerequisites are missing are recorded as failed without sending
//! a request.

use std::time::Instant;

use crate::checks::{self, CheckContext};
use crate::client::PanelApi;
use crate::config::Config;

pub mod catalog;
pub mod report;
pub mod state;
pub mod verdict;

pub use catalog::{Check, Prerequisite, Suite};
pub use report::{Report, Summary};
pub use state::RunState;
pub use verdict::{CheckResult, Verdict};

/// Receives progress while a run is in flight
pub trait Observer {
    fn on_start(&mut self, _position: usize, _total: usize, _check: Check) {}
    fn on_result(&mut self, _result: &CheckResult) {}
}

/// Observer that ignores progress
pub struct Silent;

impl Observer for Silent {}

/// The probe: one session, one run context
pub struct Probe<'a> {
    api: &'a dyn PanelApi,
    config: &'a Config,
    state: RunState,
}

impl<'a> Probe<'a> {
    pub fn new(api: &'a dyn PanelApi, config: &'a Config) -> Self {
        Self {
            api,
            config,
            state: RunState::new(),
        }
    }

    /// Start from an existing run context instead of a fresh one
    #[cfg(test)]
    pub fn with_state(mut self, state: RunState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Run `checks` in order and collect the report
    pub async fn run(&mut self, checks: &[Check], observer: &mut dyn Observer) -> Report {
        let mut report = Report::new(self.api.base_url());

        for (position, check) in checks.iter().enumerate() {
            observer.on_start(position, checks.len(), *check);
            let result = self.run_one(*check).await;
            observer.on_result(&result);
            report.record(result);
        }

        log::info!("Run finished: {}/{} passed", report.passed(), report.total());
        report
    }

    async fn run_one(&mut self, check: Check) -> CheckResult {
        let started = Instant::now();

        if let Some(missing) = self.state.first_missing(check.requires()) {
            log::info!("Skipping {}: missing {} prerequisite", check.name(), missing);
            let verdict = Verdict::fail(missing.missing_message(check.name()));
            return finish(check, verdict, true, started);
        }

        log::info!("Running {}", check.name());
        let mut ctx = CheckContext {
            api: self.api,
            credentials: &self.config.credentials,
            fixtures: &self.config.fixtures,
            state: &mut self.state,
        };

        let verdict = match checks::execute(check, &mut ctx).await {
            Ok(verdict) => verdict,
            Err(err) => {
                log::debug!("{} raised: {:?}", check.name(), err);
                Verdict::fail(format!("Exception: {}", err))
            }
        };

        finish(check, self.enforce_strict(verdict), false, started)
    }

    fn enforce_strict(&self, verdict: Verdict) -> Verdict {
        if self.config.strict && verdict.tolerated {
            Verdict {
                passed: false,
                message: format!("{} (tolerated outcome rejected in strict mode)", verdict.message),
                ..verdict
            }
        } else {
            verdict
        }
    }
}

fn finish(check: Check, verdict: Verdict, skipped: bool, started: Instant) -> CheckResult {
    CheckResult {
        name: check.name().to_string(),
        endpoint: check.endpoint().to_string(),
        passed: verdict.passed,
        tolerated: verdict.tolerated,
        skipped,
        message: verdict.message,
        payload: verdict.payload,
        elapsed_ms: started.elapsed().as_millis() as u64,
    }
}
