//! Tests for exit code policies (--exit-policy flag)

use blcheck::app::evaluate_exit_code;
use blcheck::{ExitPolicy, LookupOutcome, RunTally};

fn report_with_listings(count: usize) -> RunTally {
    RunTally {
        listed: count,
        not_listed: 20,
        listings: (0..count)
            .map(|i| LookupOutcome {
                provider_url: format!("zone{i}.example"),
                result_address: "127.0.0.2".to_string(),
                txt_detail: String::new(),
            })
            .collect(),
        ..Default::default()
    }
}

#[test]
fn test_clean_run_exits_zero_under_every_policy() {
    let tally = report_with_listings(0);
    assert_eq!(evaluate_exit_code(ExitPolicy::Count, &tally), 0);
    assert_eq!(evaluate_exit_code(ExitPolicy::AnyListed, &tally), 0);
}

#[test]
fn test_count_policy_reports_number_of_listings() {
    assert_eq!(evaluate_exit_code(ExitPolicy::Count, &report_with_listings(2)), 2);
    assert_eq!(evaluate_exit_code(ExitPolicy::Count, &report_with_listings(300)), 254);
}

#[test]
fn test_any_listed_policy_is_binary() {
    assert_eq!(evaluate_exit_code(ExitPolicy::AnyListed, &report_with_listings(5)), 1);
}
