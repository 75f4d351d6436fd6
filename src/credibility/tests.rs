use super::*;
use std::io::Write;

#[test]
fn test_extract_domain_simple() {
    assert_eq!(extract_domain("https://example.com/page"), "example.com");
}

#[test]
fn test_extract_domain_strips_www_and_case() {
    assert_eq!(extract_domain("https://WWW.Example.com"), "example.com");
}

#[test]
fn test_extract_domain_keeps_subdomain() {
    assert_eq!(
        extract_domain("https://news.bbc.co.uk/article"),
        "news.bbc.co.uk"
    );
}

#[test]
fn test_extract_domain_invalid() {
    assert_eq!(extract_domain("not a url"), "");
}

#[test]
fn test_trusted_sources() {
    let table = CredibilityTable::builtin();
    assert_eq!(table.weight_for_url("https://reuters.com/article"), 1.5);
    assert_eq!(table.weight_for_url("https://bbc.com/news"), 1.4);
    assert_eq!(table.weight_for_url("https://www.snopes.com/fact-check"), 1.5);
}

#[test]
fn test_social_media_sources() {
    let table = CredibilityTable::builtin();
    assert_eq!(table.weight_for_url("https://twitter.com/user/status"), 0.5);
    assert_eq!(table.weight_for_url("https://facebook.com/post"), 0.4);
    assert_eq!(table.weight_for_url("https://reddit.com/r/news"), 0.6);
}

#[test]
fn test_unknown_source_gets_default() {
    let table = CredibilityTable::builtin();
    assert_eq!(table.weight_for_url("https://randomsite.com"), 1.0);
    assert_eq!(table.weight_for(""), 1.0);
    assert_eq!(table.weight_for_url("garbage"), 1.0);
}

#[test]
fn test_parent_domain_walk() {
    let table = CredibilityTable::builtin();
    assert_eq!(table.weight_for("news.bbc.co.uk"), 1.4);
    assert_eq!(table.weight_for("m.facebook.com"), 0.4);
}

#[test]
fn test_suffix_rules() {
    let table = CredibilityTable::builtin();
    assert_eq!(table.weight_for_url("https://stanford.edu/research"), 1.3);
    assert_eq!(table.weight_for_url("https://cdc.gov/info"), 1.4);
    assert_eq!(table.weight_for("pib.gov.in"), 1.4);
}

#[test]
fn test_suffix_requires_label_boundary() {
    let table = CredibilityTable::builtin();
    assert_eq!(table.weight_for("notagov"), 1.0);
    assert_eq!(table.weight_for("myedu.com"), 1.0);
}

#[test]
fn test_tiers() {
    let table = CredibilityTable::builtin();
    assert_eq!(table.tier_of("apnews.com"), SourceTier::High);
    assert_eq!(table.tier_of("example.org"), SourceTier::Default);
    assert_eq!(table.tier_of("tiktok.com"), SourceTier::Low);
}

#[test]
fn test_every_builtin_weight_positive() {
    let table = CredibilityTable::builtin();
    for (domain, _) in BUILTIN_DOMAINS {
        assert!(table.weight_for(domain) > 0.0);
    }
}

#[test]
fn test_merge_overrides() {
    let mut table = CredibilityTable::builtin();
    let overrides = HashMap::from([
        ("WWW.Local-Paper.example".to_string(), 1.2),
        ("x.com".to_string(), 0.7),
    ]);
    table.merge(overrides).expect("valid overrides");

    assert_eq!(table.weight_for("local-paper.example"), 1.2);
    assert_eq!(table.weight_for("x.com"), 0.7);
}

#[test]
fn test_merge_rejects_non_positive_weight() {
    let mut table = CredibilityTable::builtin();
    let result = table.merge(HashMap::from([("spam.example".to_string(), 0.0)]));

    assert!(matches!(
        result,
        Err(CredibilityError::InvalidWeight { .. })
    ));
}

#[test]
fn test_merge_rejects_nan() {
    let mut table = CredibilityTable::builtin();
    let result = table.merge(HashMap::from([("spam.example".to_string(), f64::NAN)]));

    assert!(result.is_err());
}

#[test]
fn test_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{"trusted.example": 1.5, "blog.example": 0.5}}"#).expect("write");

    let table = CredibilityTable::from_json_file(file.path()).expect("should load");

    assert_eq!(table.weight_for("trusted.example"), 1.5);
    assert_eq!(table.weight_for("blog.example"), 0.5);
    assert_eq!(table.weight_for("reuters.com"), 1.5);
}

#[test]
fn test_from_json_file_malformed() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "not json").expect("write");

    assert!(matches!(
        CredibilityTable::from_json_file(file.path()),
        Err(CredibilityError::Parse(_))
    ));
}
