//! End-to-end tests: filter strings in, canonical filters or diagnostics out.

mod common;

use common::*;
use run_filter::{CompareOp, FilterValidator, Value, parse_filter};

// ===== Canonicalization =====

#[test]
fn metric_alias_with_bare_attribute() {
    let filter = validate_cleanly(r#"metrics.foobar = 40 AND run_name = "bouncy-boar-498""#);
    assert_eq!(filter.comparisons.len(), 2);

    let metric = &filter.comparisons[0];
    assert_eq!(metric.left.category, "metric");
    assert_eq!(metric.left.key, "foobar");
    assert_eq!(metric.right.node, Value::Number(40.0));

    let attribute = &filter.comparisons[1];
    assert_eq!(attribute.left.category, "attribute");
    assert_eq!(attribute.left.key, "run_name");
    assert_eq!(attribute.right.node, Value::String("bouncy-boar-498".into()));
}

#[test]
fn quoted_tag_key() {
    let cmp = validate_single(r#"tags."mlflow.source.name" = "scratch.py""#);
    assert_eq!(cmp.left.category, "tag");
    assert_eq!(cmp.left.key, "mlflow.source.name");
}

#[test]
fn metric_threshold() {
    let cmp = validate_single("metrics.accuracy > 0.9");
    assert_eq!(cmp.left.category, "metric");
    assert_eq!(cmp.op.node, CompareOp::Gt);
}

#[test]
fn param_key_quoting_styles_agree() {
    let double = validate_single(r#"params."random_state" = "8888""#);
    let backtick = validate_single(r#"params.`random_state` = "8888""#);
    let plain = validate_single(r#"params.random_state = "8888""#);
    for cmp in [&double, &backtick, &plain] {
        assert_eq!(cmp.left.category, "parameter");
        assert_eq!(cmp.left.key, "random_state");
        assert_eq!(cmp.right.node, Value::String("8888".into()));
    }
}

#[test]
fn pattern_operators_on_params() {
    assert_eq!(validate_single(r#"params.solver ILIKE "L%""#).op.node, CompareOp::ILike);
    assert_eq!(validate_single(r#"params.solver LIKE "l%""#).op.node, CompareOp::Like);
}

#[test]
fn dataset_membership() {
    let cmp = validate_single("datasets.digest IN ('77a19fc0')");
    assert_eq!(cmp.left.category, "dataset");
    assert_eq!(cmp.left.key, "digest");
    assert_eq!(cmp.right.node, Value::StringList(vec!["77a19fc0".into()]));
}

#[test]
fn every_alias_canonicalizes() {
    let cases = [
        ("metric.m > 1", "metric"),
        ("metrics.m > 1", "metric"),
        ("parameter.p = 'x'", "parameter"),
        ("parameters.p = 'x'", "parameter"),
        ("param.p = 'x'", "parameter"),
        ("params.p = 'x'", "parameter"),
        ("tag.t = 'x'", "tag"),
        ("tags.t = 'x'", "tag"),
        ("attribute.status = 'FINISHED'", "attribute"),
        ("attributes.status = 'FINISHED'", "attribute"),
        ("attr.status = 'FINISHED'", "attribute"),
        ("run.status = 'FINISHED'", "attribute"),
        ("dataset.name = 'train'", "dataset"),
        ("datasets.name = 'train'", "dataset"),
    ];
    for (source, category) in cases {
        assert_eq!(validate_single(source).left.category, category, "{source}");
    }
}

#[test]
fn bare_attribute_spellings() {
    for source in [
        "status = 'RUNNING'",
        "created > 1700000000",
        "Created > 1700000000",
        "`Run Name` = 'x'",
        "`run name` = 'x'",
        "start_time >= 0",
    ] {
        assert_eq!(validate_single(source).left.category, "attribute", "{source}");
    }
}

fn assert_round_trips(source: &str) {
    let filter = validate_cleanly(source);
    let rendered = filter.to_string();
    let again = validate_cleanly(&rendered);
    assert_eq!(again.comparisons.len(), filter.comparisons.len(), "{rendered}");
    for (a, b) in filter.comparisons.iter().zip(&again.comparisons) {
        assert_eq!(a.left.category, b.left.category, "{rendered}");
        assert_eq!(a.left.key, b.left.key, "{rendered}");
        assert_eq!(a.op.node, b.op.node, "{rendered}");
        assert_eq!(a.right.node, b.right.node, "{rendered}");
    }
}

#[test]
fn canonical_output_validates_again() {
    assert_round_trips("metrics.acc > 0.5 AND params.lr = '0.1' AND attr.run_id IN ('a', 'b')");
    assert_round_trips(r"params.`a\\nb` = 'x' AND tags.`back\`tick` = 'y\\z'");
    assert_round_trips("metrics.m > 1e308 AND metrics.n < -0.000001");
}

#[test]
fn backslash_in_quoted_key_survives_rendering() {
    let cmp = validate_single(r"params.`a\\nb` = 'x'");
    assert_eq!(cmp.left.key, r"a\nb");
    assert_eq!(cmp.left.to_string(), r"parameter.`a\\nb`");
}

#[test]
fn empty_filter_matches_everything() {
    let outcome = parse_filter("");
    assert!(outcome.is_success());
    assert!(outcome.diagnostics.is_empty());
    assert!(outcome.filter.is_some_and(|f| f.is_empty()));
}

// ===== Rejections =====

#[test]
fn unknown_category() {
    let outcome = expect_failure("bogus.x = 1");
    assert_has_error_containing(&outcome.diagnostics, "invalid identifier 'bogus'");
    assert_has_code(&outcome.diagnostics, "run_filter::unknown_identifier");
}

#[test]
fn category_names_are_case_sensitive() {
    expect_failure("Metrics.m > 1");
    expect_failure("PARAMS.p = 'x'");
}

#[test]
fn unknown_bare_attribute() {
    let outcome = expect_failure("nonexistent_field = 'x'");
    assert_has_error_containing(&outcome.diagnostics, "invalid attribute key 'nonexistent_field'");
    assert_has_error_containing(&outcome.diagnostics, "run_id");
}

#[test]
fn unknown_dataset_key() {
    let outcome = expect_failure("datasets.size = 'big'");
    assert_has_code(&outcome.diagnostics, "run_filter::invalid_dataset_key");
}

#[test]
fn metric_against_string() {
    let outcome = expect_failure(r#"metrics.accuracy > "bad""#);
    assert_has_code(&outcome.diagnostics, "run_filter::type_mismatch");
    assert_has_error_containing(&outcome.diagnostics, "expected numeric value for metric");
}

#[test]
fn param_and_tag_against_number() {
    expect_failure("params.lr = 0.1");
    expect_failure("tags.t = 3");
}

#[test]
fn membership_pairing_is_syntax() {
    for source in ["datasets.digest IN 'abc'", "attributes.run_id = ('a')", "run_id NOT IN 'a'"] {
        let outcome = expect_failure(source);
        assert_eq!(outcome.diagnostics.len(), 1, "{source}");
        assert_has_code(&outcome.diagnostics, "P004");
    }
}

#[test]
fn lists_are_type_checked_for_params_and_tags() {
    let outcome = expect_failure("tags.t IN ('a')");
    assert_has_code(&outcome.diagnostics, "run_filter::type_mismatch");
}

#[test]
fn attribute_and_dataset_values_are_untyped_by_default() {
    validate_cleanly("datasets.digest IN ('77a19fc0') AND datasets.context = 'training'");
    validate_cleanly("attributes.status = 1 AND datasets.name = 2 AND start_time = 'x'");
}

#[test]
fn overflowing_number_is_rejected() {
    let outcome = expect_failure("metrics.m > 1e999");
    assert_has_code(&outcome.diagnostics, "P004");
    assert_has_error_containing(&outcome.diagnostics, "out of range");
}

#[test]
fn every_bad_clause_is_reported() {
    let outcome = expect_failure("bogus.a = 1 AND metrics.ok > 1 AND attr.nope = 'x' AND params.p = 1");
    assert_eq!(outcome.diagnostics.len(), 3);
    assert_has_code(&outcome.diagnostics, "run_filter::unknown_identifier");
    assert_has_code(&outcome.diagnostics, "run_filter::invalid_attribute_key");
    assert_has_code(&outcome.diagnostics, "run_filter::type_mismatch");
}

#[test]
fn semantic_labels_point_into_source() {
    let source = "metrics.acc = 'high'";
    let outcome = expect_failure(source);
    let span = outcome.diagnostics[0].labels[0].span.clone();
    assert_eq!(&source[span], "'high'");
}

#[test]
fn syntax_errors_stop_before_validation() {
    let outcome = expect_failure("bogus.x = 1 OR metrics.m > 1");
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_has_code(&outcome.diagnostics, "P005");
}

// ===== Configuration =====

#[test]
fn strict_attribute_types() {
    let strict = FilterValidator::new().with_strict_attribute_types(true);
    validate_cleanly_with("attributes.start_time > 1000", &strict);
    validate_cleanly_with("attributes.status = 'FINISHED'", &strict);

    let outcome = run_filter::parse_filter_with("attributes.start_time = 'x'", &strict);
    assert!(outcome.is_failure());
    assert_has_code(&outcome.diagnostics, "run_filter::type_mismatch");
}

#[test]
fn strict_operators() {
    let strict = FilterValidator::new().with_strict_operators(true);
    validate_cleanly_with("metrics.m >= 1 AND params.p ILIKE 'a%'", &strict);

    let outcome = run_filter::parse_filter_with("metrics.m LIKE 1", &strict);
    assert!(outcome.is_failure());
    assert_has_code(&outcome.diagnostics, "run_filter::unsupported_operator");
    assert_has_error_containing(&outcome.diagnostics, "operator LIKE is not supported for metric 'm'");

    validate_cleanly("metrics.m LIKE 1");
}

#[test]
fn reports_render_with_source() {
    let source = "datasets.size = 'x'";
    let outcome = parse_filter(source);
    let reports = outcome.reports(source);
    assert_eq!(reports.len(), 1);
    let rendered = format!("{:?}", reports[0]);
    assert!(rendered.contains("invalid dataset key"), "{rendered}");
}
