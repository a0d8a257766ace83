//! Provider parsing tests.

use super::*;

#[test]
fn test_parse_plain_zone() {
    let provider = parse_provider_line("rbl.rbldns.ru");
    assert_eq!(provider.url, "rbl.rbldns.ru");
    assert!(provider.active);
    assert_eq!(provider.kind, ProviderKind::DnsBlacklist);
    assert_eq!(provider.result_filter.as_str(), DEFAULT_FILTER_PATTERN);
}

#[test]
fn test_parse_plain_zone_is_trimmed() {
    let provider = parse_provider_line("  \tbl.spamcop.net \t");
    assert_eq!(provider.url, "bl.spamcop.net");
    assert_eq!(provider.kind, ProviderKind::DnsBlacklist);
}

#[test]
fn test_parse_with_filter() {
    let provider = parse_provider_line(r"a.b.c=127\.0\.0\.1");
    assert_eq!(provider.url, "a.b.c");
    assert_eq!(provider.kind, ProviderKind::DnsBlacklist);
    assert_eq!(provider.result_filter.as_str(), r"127\.0\.0\.1");
    assert!(provider.result_filter.is_match("127.0.0.1"));
    assert!(!provider.result_filter.is_match("127.0.0.2"));
}

#[test]
fn test_parse_with_filter_and_type() {
    let provider = parse_provider_line("black.list.com=127.0.[0-9]+.0#URIBL");
    assert_eq!(provider.url, "black.list.com");
    assert!(provider.active);
    assert_eq!(provider.kind, ProviderKind::UriBlacklist);
    assert_eq!(provider.result_filter.as_str(), "127.0.[0-9]+.0");
}

#[test]
fn test_parse_with_type_only() {
    let provider = parse_provider_line("rbl.rbldns.ru#DNSWL");
    assert_eq!(provider.url, "rbl.rbldns.ru");
    assert_eq!(provider.kind, ProviderKind::DnsWhitelist);
    assert_eq!(provider.result_filter.as_str(), DEFAULT_FILTER_PATTERN);

    let provider = parse_provider_line("dbl.spamhaus.org#URIBL");
    assert_eq!(provider.url, "dbl.spamhaus.org");
    assert_eq!(provider.kind, ProviderKind::UriBlacklist);
}

#[test]
fn test_parse_empty_filter_falls_back_to_default() {
    let provider = parse_provider_line("zone.example.com=#DNSWL");
    assert_eq!(provider.url, "zone.example.com");
    assert_eq!(provider.kind, ProviderKind::DnsWhitelist);
    assert_eq!(provider.result_filter.as_str(), DEFAULT_FILTER_PATTERN);

    let provider = parse_provider_line("zone.example.com=");
    assert_eq!(provider.result_filter.as_str(), DEFAULT_FILTER_PATTERN);
}

#[test]
fn test_parse_unknown_type_is_invalid() {
    let provider = parse_provider_line("t3direct.dnsbl.net.au#BLA");
    assert_eq!(provider.url, "");
    assert!(!provider.is_valid());
}

#[test]
fn test_parse_lowercase_type_is_invalid() {
    assert!(!parse_provider_line("zone.example.com#dnsbl").is_valid());
}

#[test]
fn test_parse_type_must_follow_hash_directly() {
    let provider = parse_provider_line("zone.example# DNSWL");
    assert_eq!(provider.url, "");
    assert!(!provider.is_valid());

    let provider = parse_provider_line("zone.example#DNSWL \t");
    assert_eq!(provider.url, "zone.example");
    assert_eq!(provider.kind, ProviderKind::DnsWhitelist);
}

#[test]
fn test_parse_invalid_filter_is_invalid() {
    let provider = parse_provider_line("zone.example.com=127.(0");
    assert!(!provider.is_valid());
}

#[test]
fn test_parse_missing_zone_is_invalid() {
    assert!(!parse_provider_line("=127.0.0.2").is_valid());
    assert!(!parse_provider_line("  #DNSBL").is_valid());
}

#[test]
fn test_default_filter_matches_loopback_block_only() {
    let filter = default_filter();
    assert!(filter.is_match("127.0.0.2"));
    assert!(filter.is_match("127.255.1.10"));
    assert!(!filter.is_match("10.0.0.1"));
    assert!(!filter.is_match("192.0.2.127"));
}

#[test]
fn test_parse_providers_skips_comments_and_blank_lines() {
    let input = "# comment\n\
                 zone.example.com\n\
                 \n\
                 \t  \n\
                 zone.example.com=custom\\.filter\\.regex\n\
                 # another comment\n\
                 zone.example.com#URIBL\n\
                 zone.example.com=127\\.0\\.0\\.2#DNSWL\n";
    let providers = parse_providers(input.lines());
    assert_eq!(providers.len(), 4);
    assert!(providers.iter().all(|p| p.url == "zone.example.com"));
    assert!(providers.iter().all(|p| p.active));
    assert_eq!(providers[0].kind, ProviderKind::DnsBlacklist);
    assert_eq!(providers[1].result_filter.as_str(), r"custom\.filter\.regex");
    assert_eq!(providers[2].kind, ProviderKind::UriBlacklist);
    assert_eq!(providers[3].kind, ProviderKind::DnsWhitelist);
    assert_eq!(providers[3].result_filter.as_str(), r"127\.0\.0\.2");
}

#[test]
fn test_parse_providers_preserves_order_and_keeps_invalid_lines() {
    let providers = parse_providers(["b.example", "bad.example#NOPE", "a.example"]);
    let urls: Vec<&str> = providers.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["b.example", "", "a.example"]);
}

#[test]
fn test_provider_kind_round_trips_tags() {
    assert_eq!("DNSBL".parse::<ProviderKind>().ok(), Some(ProviderKind::DnsBlacklist));
    assert_eq!("DNSWL".parse::<ProviderKind>().ok(), Some(ProviderKind::DnsWhitelist));
    assert_eq!("URIBL".parse::<ProviderKind>().ok(), Some(ProviderKind::UriBlacklist));
    assert_eq!(ProviderKind::UriBlacklist.to_string(), "URIBL");
    assert!("BLA".parse::<ProviderKind>().is_err());
}

#[tokio::test]
async fn test_load_providers_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bl_list");
    std::fs::write(&path, "# providers\nzen.example.org\ndbl.example.org#URIBL\n")
        .expect("write provider list");

    let providers = load_providers(&path).await.expect("load providers");
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[1].kind, ProviderKind::UriBlacklist);
}

#[tokio::test]
async fn test_load_providers_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = load_providers(&dir.path().join("missing")).await;
    assert!(result.is_err());
}
