//! End-to-end tests for `run_check_with` against an in-memory resolver.

mod helpers;

use std::sync::Arc;

use blcheck::resolver::QueryKind;
use blcheck::{run_check_with, BlacklistResolver, StaticResolver, TargetError};
use helpers::{test_config, write_provider_file};

const PROVIDERS: &str = "\
# DNS blacklists
zen.example
bl.example=127\\.0\\.0\\.1
wl.example=127\\.0\\.0\\.10#DNSWL

# URI blacklists
dbl.example#URIBL
broken.example#BLA
";

fn as_dyn(resolver: &Arc<StaticResolver>) -> Arc<dyn BlacklistResolver> {
    resolver.clone()
}

#[tokio::test]
async fn test_ip_target_end_to_end() {
    let (_dir, path) = write_provider_file(PROVIDERS);
    let resolver = Arc::new(
        StaticResolver::new()
            .with_ptr("192.0.2.1", "mail.example.org")
            // default filter: 127.x answers are informational
            .with_addresses("1.2.0.192.zen.example", ["127.0.0.2"])
            // custom filter only accepts 127.0.0.1
            .with_addresses("1.2.0.192.bl.example", ["127.0.0.2"])
            .with_texts("1.2.0.192.bl.example", ["Blocked", "see https://bl.example"]),
    );

    let config = test_config("192.0.2.1", path);
    let report = run_check_with(&config, as_dyn(&resolver), None)
        .await
        .expect("check should run");

    assert_eq!(report.target.ip, "192.0.2.1");
    assert!(report.target.host.is_empty());
    assert_eq!(report.ptr.as_deref(), Some("mail.example.org"));
    assert_eq!(report.provider_count, 4);
    assert_eq!(report.ignored_providers, 1);

    let tally = &report.tally;
    assert_eq!(tally.listed, 1);
    assert_eq!(tally.not_listed, 2);
    assert_eq!(tally.skipped, 1);
    assert_eq!(tally.timed_out, 0);
    assert_eq!(tally.disabled, 0);
    assert_eq!(tally.listings.len(), 1);
    assert_eq!(tally.listings[0].provider_url, "bl.example");
    assert_eq!(tally.listings[0].result_address, "127.0.0.2");
    assert_eq!(tally.listings[0].txt_detail, "Blocked see https://bl.example");
}

#[tokio::test]
async fn test_hostname_target_queries_uri_list() {
    let (_dir, path) = write_provider_file(PROVIDERS);
    let resolver = Arc::new(
        StaticResolver::new()
            .with_addresses("mail.example.org", ["192.0.2.1"])
            .with_addresses("mail.example.org.dbl.example", ["10.1.1.1"]),
    );

    let config = test_config("mail.example.org", path);
    let report = run_check_with(&config, as_dyn(&resolver), None)
        .await
        .expect("check should run");

    assert_eq!(report.target.host, "mail.example.org");
    assert_eq!(report.target.ip, "192.0.2.1");
    assert_eq!(report.tally.skipped, 0);
    assert_eq!(report.tally.listed, 1);
    assert_eq!(report.tally.listings[0].provider_url, "dbl.example");

    let mut queried = resolver.queried_names(QueryKind::Address);
    queried.sort();
    assert_eq!(
        queried,
        vec![
            "1.2.0.192.bl.example",
            "1.2.0.192.wl.example",
            "1.2.0.192.zen.example",
            "mail.example.org",
            "mail.example.org.dbl.example",
        ]
    );
}

#[tokio::test]
async fn test_disabled_providers_are_not_queried() {
    let (_dir, path) = write_provider_file("zen.example\nbl.example\n");
    let resolver = Arc::new(StaticResolver::new());

    let mut config = test_config("192.0.2.1", path);
    config.disable = vec!["zen.example".to_string()];
    let report = run_check_with(&config, as_dyn(&resolver), None)
        .await
        .expect("check should run");

    assert_eq!(report.tally.disabled, 1);
    assert_eq!(report.tally.not_listed, 1);
    assert_eq!(
        resolver.queried_names(QueryKind::Address),
        vec!["1.2.0.192.bl.example"]
    );
}

#[tokio::test]
async fn test_missing_provider_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let resolver = Arc::new(StaticResolver::new());

    let config = test_config("192.0.2.1", dir.path().join("missing"));
    let err = run_check_with(&config, as_dyn(&resolver), None)
        .await
        .expect_err("missing file must fail");
    assert!(format!("{err:#}").contains("Failed to open provider list"));
}

#[tokio::test]
async fn test_unresolvable_host_is_an_error() {
    let (_dir, path) = write_provider_file("zen.example\n");
    let resolver = Arc::new(StaticResolver::new());

    let config = test_config("nowhere.example.org", path);
    let err = run_check_with(&config, as_dyn(&resolver), None)
        .await
        .expect_err("unresolvable host must fail");
    assert!(matches!(
        err.downcast_ref::<TargetError>(),
        Some(TargetError::Unresolvable { .. })
    ));
    assert!(
        resolver.queried_names(QueryKind::Address) == vec!["nowhere.example.org"],
        "no provider lookups after a failed target resolution"
    );
}

#[tokio::test]
async fn test_invalid_target_is_an_error() {
    let (_dir, path) = write_provider_file("zen.example\n");
    let resolver = Arc::new(StaticResolver::new());

    let config = test_config("not a target", path);
    let err = run_check_with(&config, as_dyn(&resolver), None)
        .await
        .expect_err("invalid target must fail");
    assert!(matches!(
        err.downcast_ref::<TargetError>(),
        Some(TargetError::InvalidTarget(_))
    ));
}

#[tokio::test]
async fn test_empty_provider_file() {
    let (_dir, path) = write_provider_file("# nothing to check\n\n");
    let resolver = Arc::new(StaticResolver::new());

    let report = run_check_with(&test_config("192.0.2.1", path), as_dyn(&resolver), None)
        .await
        .expect("check should run");
    assert_eq!(report.provider_count, 0);
    assert_eq!(report.tally.total(), 0);
}
