//! Scenario registry and sequential runner.
//!
//! A scenario is one exported async flow: bootstrap actors, build the
//! dependency chain, exercise the operation under test, assert. The
//! runner executes a filtered list sequentially - fail-fast inside a
//! scenario, but a failing scenario does not stop the ones after it.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use serde::Serialize;

use mall_client::Connection;
use mall_common::HarnessConfig;

use crate::error::{HarnessError, HarnessResult};
use crate::scenarios;

/// Future returned by a scenario function.
pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = HarnessResult<()>> + 'a>>;

/// A scenario entry point.
pub type ScenarioFn = for<'a> fn(&'a mut ScenarioContext) -> ScenarioFuture<'a>;

/// One registered scenario.
#[derive(Clone, Copy)]
pub struct Scenario {
    /// Unique snake_case name; the CLI filter matches on substrings.
    pub name: &'static str,
    /// One-line description of the flow.
    pub summary: &'static str,
    pub run: ScenarioFn,
}

/// Everything a scenario needs: the configuration and the primary
/// connection. Extra connections for simultaneous actors are minted on
/// demand so the primary session is left undisturbed.
pub struct ScenarioContext {
    config: HarnessConfig,
    conn: Connection,
}

impl ScenarioContext {
    pub fn new(config: HarnessConfig) -> HarnessResult<Self> {
        let conn = Connection::from_config(&config)?;
        Ok(Self { config, conn })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The primary connection. One actor active at a time; join/login
    /// replace the session.
    pub fn connection(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// A fresh unauthenticated connection to the same backend, for
    /// scenarios that need two actors live at once.
    pub fn extra_connection(&self) -> HarnessResult<Connection> {
        Ok(Connection::from_config(&self.config)?)
    }
}

/// The built-in scenario list, in suite order.
pub fn registry() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "comment_round_trip",
            summary: "buyer comment on an inquiry reads back field-for-field",
            run: scenarios::comment_flow::comment_round_trip,
        },
        Scenario {
            name: "comment_fetch_wrong_inquiry_rejected",
            summary: "valid comment id through an unrelated inquiry id is refused",
            run: scenarios::comment_flow::comment_fetch_wrong_inquiry_rejected,
        },
        Scenario {
            name: "comment_fetch_foreign_buyer_rejected",
            summary: "a second buyer cannot read the first buyer's comment",
            run: scenarios::comment_flow::comment_fetch_foreign_buyer_rejected,
        },
        Scenario {
            name: "coupon_use_erase_once_only",
            summary: "coupon-use erase succeeds once and is refused on repeat",
            run: scenarios::coupon_flow::coupon_use_erase_once_only,
        },
        Scenario {
            name: "duplicate_coupon_code_rejected",
            summary: "re-creating a live coupon code is refused",
            run: scenarios::coupon_flow::duplicate_coupon_code_rejected,
        },
        Scenario {
            name: "comment_pagination_window",
            summary: "6 comments at limit 4 page as 4+2 with a clean union",
            run: scenarios::pagination::comment_pagination_window,
        },
        Scenario {
            name: "session_switch_replaces_identity",
            summary: "switching roles on one connection leaves no residue",
            run: scenarios::session::session_switch_replaces_identity,
        },
        Scenario {
            name: "duplicate_join_rejected",
            summary: "re-registering an email in the same role family is refused",
            run: scenarios::session::duplicate_join_rejected,
        },
        Scenario {
            name: "order_round_trip",
            summary: "buyer order totals correctly and is owner-scoped",
            run: scenarios::order_flow::order_round_trip,
        },
    ]
}

/// Result of one scenario execution.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    /// Rendered error for a failed scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

/// Aggregated suite result.
#[derive(Debug, Clone, Serialize, Default)]
pub struct RunReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Human-readable summary, one line per scenario.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for outcome in &self.outcomes {
            let mark = if outcome.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "{mark} {} ({}ms)\n",
                outcome.name, outcome.duration_ms
            ));
            if let Some(error) = &outcome.error {
                out.push_str(&format!("     {error}\n"));
            }
        }
        out.push_str(&format!(
            "{} passed, {} failed\n",
            self.passed(),
            self.failed()
        ));
        out
    }
}

/// Sequential scenario runner.
pub struct Runner {
    config: HarnessConfig,
}

impl Runner {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Run every registered scenario whose name contains `filter` (all
    /// of them when `filter` is `None`). Each scenario gets a fresh
    /// context; one failing scenario does not abort the rest.
    pub async fn run(&self, filter: Option<&str>) -> HarnessResult<RunReport> {
        let selected: Vec<Scenario> = registry()
            .into_iter()
            .filter(|s| filter.is_none_or(|f| s.name.contains(f)))
            .collect();
        if selected.is_empty() {
            return Err(HarnessError::Setup(format!(
                "no scenario matches filter '{}'",
                filter.unwrap_or_default()
            )));
        }

        let mut report = RunReport::default();
        for scenario in selected {
            tracing::info!(scenario = scenario.name, "running");
            let mut ctx = ScenarioContext::new(self.config.clone())?;
            let started = Instant::now();
            let result = (scenario.run)(&mut ctx).await;
            let duration = started.elapsed();

            match result {
                Ok(()) => {
                    tracing::info!(scenario = scenario.name, ?duration, "passed");
                    report.outcomes.push(outcome(scenario.name, duration, None));
                }
                Err(error) => {
                    tracing::warn!(scenario = scenario.name, %error, "failed");
                    report
                        .outcomes
                        .push(outcome(scenario.name, duration, Some(error.to_string())));
                }
            }
        }
        Ok(report)
    }
}

fn outcome(name: &str, duration: Duration, error: Option<String>) -> ScenarioOutcome {
    ScenarioOutcome {
        name: name.to_string(),
        passed: error.is_none(),
        error,
        duration_ms: duration.as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_unique() {
        let names: Vec<&str> = registry().iter().map(|s| s.name).collect();
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }

    #[test]
    fn report_counts_and_rendering() {
        let report = RunReport {
            outcomes: vec![
                outcome("a", Duration::from_millis(12), None),
                outcome("b", Duration::from_millis(5), Some("boom".to_string())),
            ],
        };
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_passed());

        let text = report.render_text();
        assert!(text.contains("PASS a"));
        assert!(text.contains("FAIL b"));
        assert!(text.contains("boom"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["passed"], true);
        assert!(json["outcomes"][0].get("error").is_none());
    }
}
