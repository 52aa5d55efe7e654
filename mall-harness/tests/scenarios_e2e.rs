//! Every registered scenario, end to end against an ephemeral reference
//! backend.
//!
//! Each test boots its own backend on a loopback port, so tests are
//! fully isolated from each other and from anything running on the
//! machine. The same scenario functions are what `mall run` executes
//! against a real deployment.

use mall_common::HarnessConfig;
use mall_harness::logging::init_test_logging;
use mall_harness::scenario::{Runner, ScenarioContext, ScenarioFn, registry};
use mall_harness::scenarios;

#[ctor::ctor]
fn setup() {
    init_test_logging();
}

async fn backend_config() -> HarnessConfig {
    let (addr, _handle) = mall_testd::spawn_ephemeral().await.expect("spawn backend");
    HarnessConfig {
        base_url: format!("http://{addr}"),
        ..HarnessConfig::default()
    }
}

async fn run_scenario(run: ScenarioFn) {
    let config = backend_config().await;
    let mut ctx = ScenarioContext::new(config).expect("scenario context");
    run(&mut ctx).await.expect("scenario failed");
}

#[tokio::test]
async fn comment_round_trip() {
    run_scenario(scenarios::comment_flow::comment_round_trip).await;
}

#[tokio::test]
async fn comment_fetch_wrong_inquiry_rejected() {
    run_scenario(scenarios::comment_flow::comment_fetch_wrong_inquiry_rejected).await;
}

#[tokio::test]
async fn comment_fetch_foreign_buyer_rejected() {
    run_scenario(scenarios::comment_flow::comment_fetch_foreign_buyer_rejected).await;
}

#[tokio::test]
async fn coupon_use_erase_once_only() {
    run_scenario(scenarios::coupon_flow::coupon_use_erase_once_only).await;
}

#[tokio::test]
async fn duplicate_coupon_code_rejected() {
    run_scenario(scenarios::coupon_flow::duplicate_coupon_code_rejected).await;
}

#[tokio::test]
async fn comment_pagination_window() {
    run_scenario(scenarios::pagination::comment_pagination_window).await;
}

#[tokio::test]
async fn session_switch_replaces_identity() {
    run_scenario(scenarios::session::session_switch_replaces_identity).await;
}

#[tokio::test]
async fn duplicate_join_rejected() {
    run_scenario(scenarios::session::duplicate_join_rejected).await;
}

#[tokio::test]
async fn order_round_trip() {
    run_scenario(scenarios::order_flow::order_round_trip).await;
}

#[tokio::test]
async fn full_suite_passes_through_the_runner() {
    let config = backend_config().await;
    let report = Runner::new(config).run(None).await.expect("runner");
    assert!(report.all_passed(), "failures:\n{}", report.render_text());
    assert_eq!(report.outcomes.len(), registry().len());
}

#[tokio::test]
async fn filtered_run_selects_by_substring() {
    let config = backend_config().await;
    let report = Runner::new(config).run(Some("coupon")).await.expect("runner");
    assert_eq!(report.outcomes.len(), 2);
    assert!(report.all_passed(), "failures:\n{}", report.render_text());
}

#[tokio::test]
async fn unknown_filter_is_an_error() {
    let config = backend_config().await;
    assert!(Runner::new(config).run(Some("no_such_scenario")).await.is_err());
}

/// Scenarios mint fresh identities per run: re-running one against the
/// same backend must succeed without any cross-run residue.
#[tokio::test]
async fn scenarios_rerun_cleanly_against_one_backend() {
    let config = backend_config().await;
    for _ in 0..2 {
        let mut ctx = ScenarioContext::new(config.clone()).expect("scenario context");
        scenarios::comment_flow::comment_round_trip(&mut ctx)
            .await
            .expect("re-run failed");
    }
}
