use std::time::Duration;

use log::{debug, info, warn};

use super::render::Renderer;
use super::stats::{HealSessionParams, HealStats};
use crate::admin::HealClient;
use crate::errors::HealError;
use crate::utils;

pub const DEFAULT_POLL_INTERVAL: Duration = utils::seconds(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Polling,
    Rendering,
    Finished,
    Stopped,
}

/// How a heal sequence ended, as reported by the cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Finished,
    Stopped { detail: String },
}

/// Follows one heal sequence until the cluster reports it finished or
/// stopped, folding every reported item into the session statistics.
///
/// Polls are strictly sequential: a cycle's rendering completes before the
/// next status call is made. Failed status calls are never retried since the
/// server side sequence is keyed by the client token.
pub struct HealSession<C> {
    client: C,
    renderer: Box<dyn Renderer>,
    stats: HealStats,
    state: SessionState,
    poll_interval: Duration,
}

impl<C: HealClient> HealSession<C> {
    pub fn new(client: C, params: HealSessionParams, renderer: Box<dyn Renderer>) -> HealSession<C> {
        HealSession {
            client,
            renderer,
            stats: HealStats::new(params),
            state: SessionState::Polling,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> HealSession<C> {
        self.poll_interval = poll_interval;
        self
    }

    pub fn stats(&self) -> &HealStats {
        &self.stats
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn run(&mut self) -> Result<SessionOutcome, HealError> {
        let mut cycle = 0u64;
        loop {
            self.state = SessionState::Polling;
            cycle += 1;
            let params = &self.stats.params;
            let (_, status) = self
                .client
                .heal(
                    &params.bucket,
                    &params.prefix,
                    &params.opts,
                    &params.client_token,
                    params.force_start,
                )
                .await
                .map_err(HealError::remote)?;
            debug!(
                "heal status cycle {}: summary '{}', {} items",
                cycle,
                status.summary,
                status.items.len()
            );

            self.state = SessionState::Rendering;
            if let Some(started) = status.start_time {
                self.stats.sync_start_time(started);
            }
            self.stats.update_duration(utils::now());
            for item in status.items.iter() {
                self.stats.update(item)?;
            }
            self.renderer.render(&self.stats, &status)?;

            let outcome = if status.is_finished() {
                info!(
                    "heal sequence finished: {}/{} objects healed",
                    self.stats.objects_healed, self.stats.objects_scanned
                );
                self.state = SessionState::Finished;
                SessionOutcome::Finished
            } else if status.is_stopped() {
                warn!("heal sequence stopped: {}", status.failure_detail);
                self.state = SessionState::Stopped;
                SessionOutcome::Stopped {
                    detail: status.failure_detail.clone(),
                }
            } else {
                tokio::time::sleep(self.poll_interval).await;
                self.renderer.prepare_next()?;
                continue;
            };

            self.renderer.finish(&self.stats, &outcome)?;
            return Ok(outcome);
        }
    }
}
