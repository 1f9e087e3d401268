use super::*;
use crate::model::{AntiPattern, Project, QueryResultItem, ResultDetail};
use crate::runner::DetectorFailure;

fn sample_report() -> ProjectReport {
    let too_long = AntiPattern::new(1, "Too Long Sprint", "TooLongSprint", "", Vec::new());
    let ninety = AntiPattern::new(7, "Ninety Ninety Rule", "NinetyNinetyRule", "", Vec::new());

    ProjectReport {
        project: Project::new(3, "gemini"),
        results: vec![QueryResultItem::new(
            &too_long,
            true,
            vec![ResultDetail::new("Number of too long iterations", 2)],
        )],
        failures: vec![DetectorFailure {
            anti_pattern: ninety.reference(),
            message: "boom".to_string(),
        }],
    }
}

#[test]
fn json_formatter_summary() {
    let output = JsonFormatter.format(&[sample_report()]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["summary"]["projects"], 1);
    assert_eq!(parsed["summary"]["detected"], 1);
    assert_eq!(parsed["summary"]["not_detected"], 0);
    assert_eq!(parsed["summary"]["failures"], 1);
}

#[test]
fn json_formatter_report_structure() {
    let output = JsonFormatter.format(&[sample_report()]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    let report = &parsed["reports"][0];
    assert_eq!(report["project"]["id"], 3);
    assert_eq!(report["project"]["name"], "gemini");

    let result = &report["results"][0];
    assert_eq!(result["anti_pattern"]["id"], 1);
    assert_eq!(result["anti_pattern"]["name"], "TooLongSprint");
    assert_eq!(result["detected"], true);
    assert_eq!(result["details"][0]["label"], "Number of too long iterations");
    assert_eq!(result["details"][0]["value"], "2");

    let failure = &report["failures"][0];
    assert_eq!(failure["anti_pattern"]["print_name"], "Ninety Ninety Rule");
    assert_eq!(failure["message"], "boom");
}

#[test]
fn json_formatter_empty_run() {
    let output = JsonFormatter.format(&[]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["summary"]["projects"], 0);
    assert!(parsed["reports"].as_array().unwrap().is_empty());
}
