use referrer_attribution::{classify, classify_referrer, parse, AttributionCode, ReferrerClassifier};

#[test]
fn test_referral_code_outranks_click_id() {
    assert_eq!(
        classify_referrer("utm_source=TESTSOURCE&gclid=GCLIDTEST&urpc=URPCTEST"),
        Some(AttributionCode::from("URPCTEST"))
    );
}

#[test]
fn test_gclid_only() {
    assert_eq!(
        classify_referrer("utm_source=TESTSOURCE&gclid=GCLIDTEST"),
        Some(AttributionCode::GCLID_CLICK)
    );
}

#[test]
fn test_gbraid_only() {
    assert_eq!(
        classify_referrer("utm_source=TESTSOURCE&gbraid=GBRAIDTEST"),
        Some(AttributionCode::GBRAID_CLICK)
    );
}

#[test]
fn test_gclid_and_gbraid() {
    assert_eq!(
        classify_referrer("utm_source=TESTSOURCE&gclid=GCLIDTEST&gbraid=GBRAIDTEST"),
        Some(AttributionCode::DUAL_CLICK)
    );
}

#[test]
fn test_click_id_embedded_in_campaign() {
    assert_eq!(
        classify_referrer("utm_source=TESTSOURCE&utm_campaign=gclid%3DGCLIDTEST"),
        Some(AttributionCode::EMBEDDED_CAMPAIGN_CLICK)
    );
}

#[test]
fn test_search_choice_screen() {
    assert_eq!(
        classify_referrer("utm_source=eea-search-choice&gclid=GCLIDTEST"),
        Some(AttributionCode::SEARCH_CHOICE_SCREEN)
    );
}

#[test]
fn test_browser_choice_screen() {
    assert_eq!(
        classify_referrer("utm_source=eea-browser-choice"),
        Some(AttributionCode::BROWSER_CHOICE_SCREEN)
    );
}

#[test]
fn test_source_only_is_unattributed() {
    assert_eq!(classify_referrer("utm_source=TESTSOURCE"), None);
}

#[test]
fn test_classifier_matches_free_functions() {
    let classifier = ReferrerClassifier::new();
    let referrers = [
        "utm_source=TESTSOURCE&gclid=GCLIDTEST&urpc=URPCTEST",
        "utm_source=TESTSOURCE&gclid=GCLIDTEST",
        "utm_source=TESTSOURCE&gbraid=GBRAIDTEST",
        "utm_source=TESTSOURCE&gclid=GCLIDTEST&gbraid=GBRAIDTEST",
        "utm_source=TESTSOURCE&utm_campaign=gclid%3DGCLIDTEST",
        "utm_source=eea-search-choice&gclid=GCLIDTEST",
        "utm_source=eea-browser-choice",
        "utm_source=TESTSOURCE",
    ];

    for raw in referrers {
        assert_eq!(
            classifier.classify_raw(raw),
            classify(&parse(raw)),
            "mismatch for {}",
            raw
        );
    }

    let snapshot = classifier.metrics().snapshot();
    assert_eq!(snapshot.referrers_classified, 8);
    assert_eq!(snapshot.referrers_attributed, 7);
    assert_eq!(snapshot.referrers_unattributed, 1);
}

#[test]
fn test_classifier_shared_across_threads() {
    let classifier = ReferrerClassifier::new();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let classifier = classifier.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let raw = format!("utm_source=t{}&gclid=g{}", i, i);
                    assert_eq!(
                        classifier.classify_raw(&raw),
                        Some(AttributionCode::GCLID_CLICK)
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(classifier.metrics().referrers_attributed(), 800);
}
