// tests for the response model and the exported report

use agreewise::{Analysis, RiskScore};
use pretty_assertions::assert_eq;

fn sample() -> Analysis {
    serde_json::from_str(
        r#"{
            "riskScore": "medium",
            "crucialPoints": ["Termination terms are unclear", "Fair terms detected"],
            "verdict": false
        }"#,
    )
    .unwrap()
}

#[test]
fn test_parse_payload() {
    let analysis = sample();
    assert_eq!(analysis.risk_score, RiskScore::Medium);
    assert_eq!(
        analysis.crucial_points,
        vec!["Termination terms are unclear", "Fair terms detected"]
    );
    assert!(!analysis.verdict);
}

#[test]
fn test_missing_points_is_empty() {
    let analysis: Analysis =
        serde_json::from_str(r#"{ "riskScore": "low", "verdict": true }"#).unwrap();
    assert!(analysis.crucial_points.is_empty());
}

#[test]
fn test_unknown_risk_is_rejected() {
    let parsed = serde_json::from_str::<Analysis>(
        r#"{ "riskScore": "extreme", "crucialPoints": [], "verdict": true }"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn test_serializes_in_wire_format() {
    let value = serde_json::to_value(sample()).unwrap();
    assert_eq!(value["riskScore"], "medium");
    assert_eq!(value["crucialPoints"][0], "Termination terms are unclear");
    assert_eq!(value["verdict"], false);
}

#[test]
fn test_labels() {
    assert_eq!(RiskScore::Low.label(), "Low");
    assert_eq!(RiskScore::High.to_string(), "High");

    let mut analysis = sample();
    assert_eq!(analysis.verdict_label(), "Not recommended");
    analysis.verdict = true;
    assert_eq!(analysis.verdict_label(), "Safe to proceed");
}

#[test]
fn test_report() {
    let report = sample().report();
    assert_eq!(
        report,
        "Risk Score: Medium\n\
         Crucial Points:\n\
         Termination terms are unclear\n\
         Fair terms detected\n\
         Final Verdict: Not recommended\n"
    );
}

#[test]
fn test_to_json_is_wire_form() {
    let json = sample().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["riskScore"], "medium");
    assert_eq!(value["crucialPoints"][0], "Termination terms are unclear");
    assert_eq!(value["verdict"], false);

    let back: Analysis = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sample());
}
