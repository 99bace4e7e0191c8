use harmonizer::constants::classifier as tags;
use harmonizer::{
    Pipeline, PipelineConfig, RuleSet, ValueDictionary, ValueRule, ValueScaleTag, VariableRecord,
};

fn record(wave: &str, name: &str, label: &str, values: &str) -> VariableRecord {
    VariableRecord {
        wave_id: wave.to_string(),
        variable_name: name.to_string(),
        raw_label: label.to_uppercase().replace('_', " "),
        normalized_label: label.to_string(),
        group_tag: Some("unit".to_string()),
        value_range_text: (!values.is_empty()).then(|| values.to_string()),
    }
}

fn scale_of(output: &harmonizer::PipelineOutput, variable_id: &str) -> ValueScaleTag {
    output
        .scales
        .iter()
        .find(|row| row.variable_id == variable_id)
        .unwrap_or_else(|| panic!("no scale row for {variable_id}"))
        .values_type
}

fn pipeline() -> Pipeline {
    Pipeline::new(PipelineConfig {
        min_wave_support: 1,
        ..PipelineConfig::default()
    })
    .unwrap()
}

#[test]
fn archetypes_classify_end_to_end() {
    let corpus = vec![
        record(
            "w1",
            "t",
            "q1_trust_army",
            "Tend to trust, tend not to trust, DK",
        ),
        record(
            "w1",
            "g",
            "q2_decision_level",
            "By the national government, jointly within the European Union",
        ),
        record("w1", "y", "q3_eu_membership_vote", "Yes, No, Don't know"),
        record(
            "w1",
            "p",
            "q4_eu_membership_opinion",
            "A good thing, bad thing, neither good nor bad",
        ),
        record(
            "w1",
            "o",
            "q5_life_satisfaction",
            "Very satisfied, fairly satisfied, not very satisfied, not at all satisfied",
        ),
    ];

    let output = pipeline().run(&corpus);

    assert_eq!(scale_of(&output, "w1::t"), ValueScaleTag::TrustNoTrust);
    assert_eq!(scale_of(&output, "w1::g"), ValueScaleTag::NationalGovernmentEu);
    assert_eq!(scale_of(&output, "w1::y"), ValueScaleTag::YesNo);
    assert_eq!(
        scale_of(&output, "w1::p"),
        ValueScaleTag::PositiveNegativeNeutral
    );
    assert_eq!(scale_of(&output, "w1::o"), ValueScaleTag::FourPointOrdinal);
}

#[test]
fn not_mentioned_outranks_other_fragments_in_the_same_text() {
    // Item batteries repeat the stem question inside the category text, so
    // topical fragments co-occur with the mentioned/not-mentioned pair.
    let corpus = vec![record(
        "w1",
        "m",
        "q6_important_issues_crime",
        "Very important issue - mentioned, Not mentioned",
    )];

    let output = pipeline().run(&corpus);
    assert_eq!(
        scale_of(&output, "w1::m"),
        ValueScaleTag::MentionedNotMentioned
    );
}

#[test]
fn not_mentioned_priority_holds_regardless_of_rule_order() {
    // A dictionary listing the topical fragment first still yields the
    // mentioned classification: the priority is in the classifier, not in
    // the rule order.
    let values = ValueDictionary::compile(vec![
        ValueRule::new("very important", tags::TAG_FOUR_POINT_ORDINAL),
        ValueRule::new("not mentioned", tags::TAG_MENTIONED),
    ])
    .unwrap();
    let pipeline = Pipeline::with_dictionaries(
        PipelineConfig {
            min_wave_support: 1,
            ..PipelineConfig::default()
        },
        RuleSet::builtin(),
        values,
    )
    .unwrap();

    let corpus = vec![record(
        "w1",
        "m",
        "q6_important_issues_crime",
        "Very important issue - mentioned, Not mentioned",
    )];
    let output = pipeline.run(&corpus);
    assert_eq!(
        scale_of(&output, "w1::m"),
        ValueScaleTag::MentionedNotMentioned
    );
}

#[test]
fn unmatched_category_text_is_tagged_unresolved() {
    let corpus = vec![record(
        "w1",
        "u",
        "d1_left_right_placement",
        "Left-right self-placement 1 to 10",
    )];

    let output = pipeline().run(&corpus);
    assert_eq!(scale_of(&output, "w1::u"), ValueScaleTag::Unresolved);
}

#[test]
fn records_without_category_text_produce_no_scale_row() {
    let corpus = vec![
        record("w1", "a", "q1_trust_army", ""),
        record("w1", "t", "q2_trust_press", "Tend to trust, tend not to trust"),
    ];

    let output = pipeline().run(&corpus);
    assert_eq!(output.scales.len(), 1);
    assert_eq!(output.scales[0].variable_id, "w1::t");
}

#[test]
fn classification_survives_label_side_exclusion() {
    // A structural variable and an ungrouped variable still classify: the
    // scale table is independent of label standardization.
    let weighting = record(
        "w1",
        "wgt",
        "weighting_factor_europe",
        "Tend to trust, tend not to trust",
    );
    let mut ungrouped = record("w1", "x1", "country_of_interview", "Yes, No");
    ungrouped.group_tag = None;

    let output = pipeline().run(&[weighting, ungrouped]);

    assert!(output.labels.is_empty());
    assert_eq!(scale_of(&output, "w1::wgt"), ValueScaleTag::TrustNoTrust);
    assert_eq!(scale_of(&output, "w1::x1"), ValueScaleTag::YesNo);
}

#[test]
fn scale_rows_come_back_sorted_by_variable_id() {
    let corpus = vec![
        record("w2", "b", "q1_trust_army", "Yes, No"),
        record("w1", "z", "q2_trust_press", "Yes, No"),
        record("w1", "a", "q3_trust_radio", "Yes, No"),
    ];

    let output = pipeline().run(&corpus);
    let ids: Vec<&str> = output
        .scales
        .iter()
        .map(|row| row.variable_id.as_str())
        .collect();
    assert_eq!(ids, vec!["w1::a", "w1::z", "w2::b"]);
}
