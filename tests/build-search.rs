use std::error::Error;

use browscap_store::{PatternStore, Properties, StoreError};

mod common {
    use std::io::Write;

    pub fn init() {
        let _ = env_logger::builder()
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .is_test(true)
            .try_init();
    }
}

fn record(pattern: &str) -> Properties {
    Properties {
        property_name: pattern.to_string(),
        browser: "Test Browser".to_string(),
        browser_maker: "Test Maker".to_string(),
        ..Default::default()
    }
}

fn build(
    patterns: &[&str],
) -> Result<(tempfile::TempDir, PatternStore), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let store = PatternStore::build(
        &dir.path().join("index"),
        patterns.iter().map(|pattern| record(pattern)),
    )?;
    Ok((dir, store))
}

#[test]
fn sibling_full_patterns_under_a_partial() -> Result<(), Box<dyn Error>> {
    common::init();

    let (_dir, store) =
        build(&["Mozilla/4.0 Test", "Mozilla/5.0 Test"])?;
    assert_eq!(
        Some("Mozilla/5.0 Test".to_string()),
        store.search("Mozilla/5.0 Test")?
    );
    assert_eq!(
        Some("Mozilla/4.0 Test".to_string()),
        store.search("Mozilla/4.0 Test")?
    );

    Ok(())
}

#[test]
fn three_siblings() -> Result<(), Box<dyn Error>> {
    common::init();

    let (_dir, store) = build(&["ab", "ac", "ad"])?;
    assert_eq!(Some("ac".to_string()), store.search("ac")?);

    Ok(())
}

#[test]
fn promoted_partial_is_searchable() -> Result<(), Box<dyn Error>> {
    common::init();

    // "a" arrives last and takes over the partial node the first two
    // created.
    let (_dir, store) = build(&["ab", "ac", "a"])?;
    assert_eq!(Some("a".to_string()), store.search("a")?);
    assert_eq!(Some("ab".to_string()), store.search("ab")?);

    Ok(())
}

#[test]
fn split_partial_chain() -> Result<(), Box<dyn Error>> {
    common::init();

    let (_dir, store) =
        build(&["*Obigo/Q05*", "*Obigo/Q03*", "*Obigo/WAP2.0*"])?;
    assert_eq!(
        Some("*Obigo/Q03*".to_string()),
        store.search("SomePhone Obigo/Q03 Profile")?
    );
    assert_eq!(
        Some("*Obigo/WAP2.0*".to_string()),
        store.search("SomePhone Obigo/WAP2.0 Profile")?
    );

    Ok(())
}

#[test]
fn last_node_is_star() -> Result<(), Box<dyn Error>> {
    common::init();

    // "abc*" scores no more than the path to it; the prune must not cut
    // it off while "abcd" fails to match.
    let (_dir, store) = build(&["abcd", "abc*"])?;
    assert_eq!(Some("abc*".to_string()), store.search("abce")?);

    Ok(())
}

#[test]
fn real_catalog_pattern() -> Result<(), Box<dyn Error>> {
    common::init();

    let pattern =
        "Mozilla/5.0 (*Windows NT 10.0*WOW64*Trident/7.0*rv:11.0*";
    let (_dir, store) = build(&[pattern])?;
    assert_eq!(
        Some(pattern.to_string()),
        store.search(
            "Mozilla/5.0 (Windows NT 10.0; WOW64; Trident/7.0; \
             rv:11.0) like Gecko"
        )?
    );

    Ok(())
}

#[test]
fn longer_match_wins() -> Result<(), Box<dyn Error>> {
    common::init();

    let (_dir, store) =
        build(&["Mozilla/5.0*", "Mozilla/5.0 (*Linux*Firefox/57.0*"])?;
    assert_eq!(
        Some("Mozilla/5.0 (*Linux*Firefox/57.0*".to_string()),
        store.search(
            "Mozilla/5.0 (X11; Linux x86_64; rv:57.0) Gecko/20100101 \
             Firefox/57.0"
        )?
    );
    assert_eq!(
        Some("Mozilla/5.0*".to_string()),
        store.search("Mozilla/5.0 (Macintosh)")?
    );

    Ok(())
}

#[test]
fn case_insensitive_fallback() -> Result<(), Box<dyn Error>> {
    common::init();

    let (_dir, store) = build(&["curl/7.*"])?;
    assert_eq!(Some("curl/7.*".to_string()), store.search("CURL/7.52.1")?);

    Ok(())
}

#[test]
fn no_match_yields_none() -> Result<(), Box<dyn Error>> {
    common::init();

    let (_dir, store) = build(&["Mozilla/4.0 Test", "curl/7.*"])?;
    assert_eq!(None, store.search("Wget/1.19")?);

    Ok(())
}

#[test]
fn search_is_deterministic() -> Result<(), Box<dyn Error>> {
    common::init();

    let (_dir, store) =
        build(&["ab", "ac", "a?", "a*", "abcd", "abc*"])?;
    let first = store.search("abcd")?;
    for _ in 0..10 {
        assert_eq!(first, store.search("abcd")?);
    }

    Ok(())
}

#[test]
fn lookup_promotes_properties() -> Result<(), Box<dyn Error>> {
    common::init();

    let (_dir, store) = build(&["Mozilla/5.0 Test"])?;
    let properties = store.lookup("Mozilla/5.0 Test")?.unwrap();
    assert_eq!("Mozilla/5.0 Test", properties.pattern());
    assert_eq!("Test Browser", properties.browser);
    assert_eq!("Test Maker", properties.browser_maker);

    assert_eq!(None, store.lookup("Wget/1.19")?);

    Ok(())
}

#[test]
fn reopened_store_searches_the_flushed_index() -> Result<(), Box<dyn Error>>
{
    common::init();

    let dir = tempfile::tempdir()?;
    let index = dir.path().join("index");

    let store = PatternStore::build(
        &index,
        ["Mozilla/4.0 Test", "Mozilla/5.0 Test"]
            .iter()
            .map(|pattern| record(pattern)),
    )?;
    drop(store);

    let store = PatternStore::open(&index)?;
    assert_eq!(
        Some("Mozilla/5.0 Test".to_string()),
        store.search("Mozilla/5.0 Test")?
    );
    let properties = store.get_properties("Mozilla/4.0 Test")?.unwrap();
    assert_eq!("Test Browser", properties.browser);

    Ok(())
}

#[test]
fn duplicate_pattern_aborts_the_build() -> Result<(), Box<dyn Error>> {
    common::init();

    let dir = tempfile::tempdir()?;
    let index = dir.path().join("index");

    let result = PatternStore::build(
        &index,
        ["Mozilla/4.0 Test", "Mozilla/4.0 Test"]
            .iter()
            .map(|pattern| record(pattern)),
    );
    assert!(matches!(
        result,
        Err(StoreError::DuplicatePattern(pattern))
            if pattern == "Mozilla/4.0 Test"
    ));
    // Nothing half-built is left behind.
    assert!(!index.exists());

    Ok(())
}

#[test]
fn opening_a_missing_index_fails() -> Result<(), Box<dyn Error>> {
    common::init();

    let dir = tempfile::tempdir()?;
    let result = PatternStore::open(&dir.path().join("index"));
    assert!(matches!(result, Err(StoreError::CorruptIndex(_))));

    Ok(())
}
