//! Reachability checks built on `ping`.

use crate::core::monitor::{AlertDispatch, Check};

use super::probes::{PingProbe, SystemPing};

pub const DEFAULT_PINGS: u32 = 4;
pub const DEFAULT_LOSS_THRESHOLD: f64 = 80.0;

/// What a healthy answer looks like
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PingExpectation {
    /// Alert when loss exceeds the threshold percent
    Reachable { threshold: f64 },
    /// Alert when any reply comes back
    Unreachable,
}

/// Pings a host and alerts when it does not behave as expected.
pub struct PingCheck {
    host: String,
    pings: u32,
    expectation: PingExpectation,
    prober: Box<dyn PingProbe>,
}

impl PingCheck {
    /// Alert when the host stops answering
    pub fn new<S: Into<String>>(host: S) -> Self {
        Self {
            host: host.into(),
            pings: DEFAULT_PINGS,
            expectation: PingExpectation::Reachable {
                threshold: DEFAULT_LOSS_THRESHOLD,
            },
            prober: Box::new(SystemPing::default()),
        }
    }

    /// Alert when a host that should be down answers
    pub fn unreachable<S: Into<String>>(host: S) -> Self {
        Self {
            expectation: PingExpectation::Unreachable,
            ..Self::new(host)
        }
    }

    pub fn with_pings(mut self, pings: u32) -> Self {
        self.pings = pings;
        self
    }

    /// Only meaningful for [`PingExpectation::Reachable`]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        if let PingExpectation::Reachable { .. } = self.expectation {
            self.expectation = PingExpectation::Reachable { threshold };
        }
        self
    }

    pub fn with_prober<P: PingProbe + 'static>(mut self, prober: P) -> Self {
        self.prober = Box::new(prober);
        self
    }

    pub fn expectation(&self) -> PingExpectation {
        self.expectation
    }
}

impl Check for PingCheck {
    fn default_name(&self) -> String {
        format!("Ping {}", self.host)
    }

    fn run(&mut self, dispatch: &mut AlertDispatch) {
        let loss = match self.prober.packet_loss(&self.host, self.pings) {
            Ok(loss) => loss,
            Err(e) => {
                dispatch.probe_failed(&e);
                return;
            }
        };
        log::debug!("{}: {}% packet loss", self.host, loss);

        match self.expectation {
            PingExpectation::Reachable { threshold } if loss > threshold => {
                dispatch.log_alert(&format!("Host {} Is Not Responding", self.host));
            }
            PingExpectation::Unreachable if loss < 100.0 => {
                dispatch.log_alert(&format!("Host {} Is Up and Responding To Pings", self.host));
            }
            _ => {}
        }
    }
}
