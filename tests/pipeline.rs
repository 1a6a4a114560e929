//! Integration tests for the text pipeline, using text fixtures only.
//!
//! No PDF parsing, no network, no subprocesses. The stages under test are all
//! pure functions, so these tests exercise them end to end: joined page text
//! in, classified insights and evidence packs out.

use pdf2brief::pipeline::classify::InsightClassifier;
use pdf2brief::pipeline::evidence::sample_evidence;
use pdf2brief::pipeline::filter::keep_sentence;
use pdf2brief::pipeline::join::{join_page, join_pages};
use pdf2brief::pipeline::normalize::normalize;
use pdf2brief::pipeline::segment::{normalize_whitespace, sentences};
use pdf2brief::{BriefingConfig, InsightCategory};

/// Run the sentence pipeline (segment, filter, normalize, classify) over
/// document text, the way the conversion entry point does.
fn classify_document(document: &str, config: &BriefingConfig) -> pdf2brief::InsightSet {
    let document = normalize_whitespace(document);
    let mut classifier = InsightClassifier::new(config.category_cap, config.catchall_min_len);
    for sentence in sentences(&document) {
        if !keep_sentence(sentence, config) {
            continue;
        }
        let cleaned = normalize(sentence);
        let len = cleaned.chars().count();
        if len < config.min_clean_len || len > config.max_clean_len {
            continue;
        }
        classifier.observe(sentence, &cleaned);
    }
    classifier.finish()
}

#[test]
fn hyphenated_page_joins_and_classifies_as_policy() {
    let page = "The RBI has main-\ntained the repo rate at 6.5%\nfor the fourth consecutive meeting.";
    let document = join_page(page);
    assert_eq!(
        document,
        "The RBI has maintained the repo rate at 6.5% for the fourth consecutive meeting."
    );

    let config = BriefingConfig::default();
    let insights = classify_document(&document, &config);
    let policy = insights.bucket(InsightCategory::PolicyDecisions);
    assert_eq!(policy.len(), 1);
    // The sentence was already well-formed; normalization leaves it intact.
    assert_eq!(
        policy[0],
        "The RBI has maintained the repo rate at 6.5% for the fourth consecutive meeting."
    );
}

#[test]
fn multi_page_document_flows_through_every_stage() {
    let pages = [
        "The committee unanimously decided to hold\nthe policy rate steady this quarter.",
        "Analysts forecast 7.2% growth for FY26 on the back of rural demand recovery.\n\
         The outlook for cyclical sectors remains constructive going forward.",
        "Registered office disclosures, compliance officer contacts, copyright notices.\n\
         Net inflows of ₹4,500 crore were recorded in the month under review.",
    ];
    let document = join_pages(pages);
    let config = BriefingConfig::default();
    let insights = classify_document(&document, &config);

    assert_eq!(insights.bucket(InsightCategory::PolicyDecisions).len(), 1);
    assert_eq!(insights.bucket(InsightCategory::Forecasts).len(), 1);
    assert_eq!(insights.bucket(InsightCategory::MarketOutlook).len(), 1);
    assert_eq!(insights.bucket(InsightCategory::DataPoints).len(), 1);
    // The disclaimer line never reaches the classifier.
    assert!(!insights
        .iter()
        .any(|(_, bucket)| bucket.iter().any(|s| s.contains("compliance"))));
}

#[test]
fn duplicated_sentence_lands_in_exactly_one_bucket() {
    // The same sentence appears on two pages (header/footer repetition).
    let repeated = "The repo rate was maintained at 6.5% by a unanimous vote of the committee.";
    let document = format!("{repeated} Some connective prose follows here. {repeated}");

    let config = BriefingConfig::default();
    let insights = classify_document(&document, &config);

    let total_copies: usize = insights
        .iter()
        .map(|(_, bucket)| bucket.iter().filter(|s| s.contains("unanimous")).count())
        .sum();
    assert_eq!(total_copies, 1, "global dedup keeps one copy across all buckets");
}

#[test]
fn category_cap_bounds_every_bucket() {
    let mut document = String::new();
    for i in 0..40 {
        document.push_str(&format!(
            "The committee decided to adjust reserve requirements in meeting number {i}. "
        ));
    }
    let config = BriefingConfig::default();
    let insights = classify_document(&document, &config);
    let policy = insights.bucket(InsightCategory::PolicyDecisions);
    assert_eq!(policy.len(), 15);
    assert!(policy[0].contains("number 0"), "earliest sentences win");
    assert!(policy[14].contains("number 14"));
}

#[test]
fn boilerplate_threshold_is_two_hits() {
    let config = BriefingConfig::default();
    let one_hit = "The ruling cited copyright precedent in the publishing industry dispute.";
    let two_hits = "Copyright 2024, all rights reserved by the distributor and its agents.";
    assert!(keep_sentence(one_hit, &config));
    assert!(!keep_sentence(two_hits, &config));
}

#[test]
fn collapsed_table_boundary_is_exact() {
    let config = BriefingConfig::default();
    let at_limit = format!("{}.", "a".repeat(399));
    let over_limit = format!("{}.", "a".repeat(400));
    assert!(keep_sentence(&at_limit, &config));
    assert!(!keep_sentence(&over_limit, &config));
}

#[test]
fn normalizer_is_a_fixed_point_over_messy_input() {
    let messy = "the rbi has held rates () per the annexure [12, 3] at https://cdn.example/r.pdf \
                 while Dr. Rao argued e.g. for patience";
    let once = normalize(messy);
    let twice = normalize(&once);
    assert_eq!(once, twice);
    assert!(once.starts_with("RBI has held rates"));
    assert!(once.contains("Doctor Rao"));
    assert!(!once.contains("https://"));
}

#[test]
fn evidence_pack_keeps_signal_in_document_order() {
    let mut document = String::new();
    for i in 0..120 {
        if i % 4 == 0 {
            document.push_str(&format!(
                "Earnings growth in segment {i} supports a re-rating of the valuation multiple. "
            ));
        } else {
            document.push_str(&format!(
                "The annual gathering convened on day {i} and adjourned without much ado. "
            ));
        }
    }

    let config = BriefingConfig::default();
    let pack = sample_evidence(&document, &config);
    assert!(!pack.used_fallback);
    assert_eq!(pack.count, 30);

    let lines: Vec<&str> = pack.bullets.lines().collect();
    assert!(lines.iter().all(|l| l.starts_with("- ")));
    assert!(lines[0].contains("segment 0"));
    assert!(lines[1].contains("segment 4"));
    assert!(lines[29].contains("segment 116"));
}

#[test]
fn sparse_document_uses_the_evidence_fallback() {
    let mut document = String::new();
    for i in 0..50 {
        document.push_str(&format!(
            "The gathering convened again on day {i} and adjourned without comment. "
        ));
    }
    let config = BriefingConfig::default();
    let pack = sample_evidence(&document, &config);
    assert!(pack.used_fallback);
    assert_eq!(pack.count, 50);
    assert!(pack.bullets.lines().next().unwrap().contains("day 0"));
}
