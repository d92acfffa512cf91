//! Integration tests for `sah rewrite`.

use predicates::prelude::*;
use serde_json::json;

use crate::common::{FileAssert, ServiceFixture, TemplateFixture, TestProject, stdout_json};

/// Rewritten template goes to stdout; the file on disk is untouched
#[test]
fn test_rewrite_to_stdout() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::web_service()).unwrap();

    let output = project.sah().arg("rewrite").assert().success().get_output().clone();
    let template = stdout_json(&output);

    let alias_arn = json!({"Fn::GetAtt": ["WebLambdaFunctionAlias", "AliasArn"]});
    let resources = &template["Resources"];
    assert_eq!(
        resources["WebLambdaFunctionAlias"],
        json!({
            "Type": "AWS::Lambda::Alias",
            "Properties": {
                "FunctionName": {"Ref": "WebLambdaFunction"},
                "FunctionVersion": {"Fn::GetAtt": ["WebLambdaVersionQx3", "Version"]},
                "Name": "INACTIVE"
            },
            "DependsOn": ["WebLambdaFunction"]
        })
    );
    assert_eq!(resources["HttpApiIntegrationWeb"]["Properties"]["IntegrationUri"], alias_arn);
    assert_eq!(resources["WebEventsRuleSchedule1"]["Properties"]["Targets"][0]["Arn"], alias_arn);
    assert_eq!(resources["WebEventSourceMappingSQSQueue"]["Properties"]["FunctionName"], alias_arn);
    // Unrelated references are kept
    assert_eq!(
        resources["WebEventSourceMappingSQSQueue"]["Properties"]["EventSourceArn"],
        json!({"Fn::GetAtt": ["Queue", "Arn"]})
    );

    FileAssert::equals(project.template_path(), &TemplateFixture::web_service().content);
}

/// Without aliases requested, output equals input byte for byte
#[test]
fn test_rewrite_without_aliases_is_identity() {
    let project = TestProject::with_fixtures(
        &ServiceFixture::with_options("defaults", "    useActiveAliasInEvents: true\n"),
        &TemplateFixture::web_service(),
    )
    .unwrap();

    project
        .sah()
        .arg("rewrite")
        .assert()
        .success()
        .stdout(format!("{}\n", TemplateFixture::web_service().content));
}

/// Key order of the document and of every resource is preserved
#[test]
fn test_rewrite_preserves_key_order() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::web_service()).unwrap();

    let output = project.sah().arg("rewrite").assert().success().get_output().clone();
    let text = String::from_utf8(output.stdout).unwrap();

    let position = |needle: &str| text.find(needle).unwrap_or_else(|| panic!("{needle} missing"));
    assert!(position("\"AWSTemplateFormatVersion\"") < position("\"Description\""));
    assert!(position("\"Description\"") < position("\"Resources\""));
    // The resource key, not the retargeted GetAtt that mentions the alias earlier
    let alias_key = position("\"WebLambdaFunctionAlias\": {");
    assert!(position("\"Queue\": {") < alias_key);
    assert!(alias_key < position("\"Outputs\""));
    assert!(position("\"BatchSize\"") < position("\"EventSourceArn\""));
}

/// Aliases only: dependents keep pointing at the function
#[test]
fn test_rewrite_aliases_only() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::aliases_only(), &TemplateFixture::web_service())
            .unwrap();

    let output = project.sah().arg("rewrite").assert().success().get_output().clone();
    let template = stdout_json(&output);
    assert!(template["Resources"]["WebLambdaFunctionAlias"].is_object());
    assert_eq!(
        template["Resources"]["HttpApiIntegrationWeb"]["Properties"]["IntegrationUri"],
        json!({"Fn::GetAtt": ["WebLambdaFunction", "Arn"]})
    );
}

/// `--in-place` replaces the template; a second pass collides
#[test]
fn test_rewrite_in_place_then_again() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::web_service()).unwrap();

    project.sah().args(["rewrite", "--in-place"]).assert().success().stdout(predicate::str::is_empty());
    let rewritten = project.read_template().unwrap();
    assert!(rewritten.contains("\"WebLambdaFunctionAlias\""));

    project
        .sah()
        .args(["rewrite", "--in-place"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("WebLambdaFunctionAlias"));
    FileAssert::equals(project.template_path(), &rewritten);
}

/// `--output` writes elsewhere and honours explicit paths
#[test]
fn test_rewrite_explicit_paths() {
    let project = TestProject::new().unwrap();
    let service = ServiceFixture::active().write_to(project.project_path()).unwrap();
    let template = TemplateFixture::web_service().write_to(project.project_path()).unwrap();
    let output = project.project_path().join("out").with_extension("json");

    project
        .sah()
        .arg("rewrite")
        .arg("--service")
        .arg(&service)
        .arg("--template")
        .arg(&template)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    FileAssert::exists(&output);
    FileAssert::not_exists(project.template_path());
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["Resources"]["WebLambdaFunctionAlias"]["Properties"]["Name"], "INACTIVE");
}

/// `--output` and `--in-place` are mutually exclusive
#[test]
fn test_rewrite_output_conflicts_with_in_place() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::web_service()).unwrap();

    project
        .sah()
        .args(["rewrite", "--in-place", "--output", "out.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

/// Configured alias names: last one wins
#[test]
fn test_rewrite_named_aliases() {
    let project = TestProject::with_fixtures(
        &ServiceFixture::with_options(
            "named",
            "    activeAliasName: live\n    makeLambdasActive: true\n    aliases:\n      - blue\n      - green\n",
        ),
        &TemplateFixture::web_service(),
    )
    .unwrap();

    let output = project.sah().arg("rewrite").assert().success().get_output().clone();
    let template = stdout_json(&output);
    assert_eq!(template["Resources"]["WebLambdaFunctionAlias"]["Properties"]["Name"], "live");
}

/// Identical input gives identical output
#[test]
fn test_rewrite_is_deterministic() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::web_service()).unwrap();

    let first = project.sah().arg("rewrite").assert().success().get_output().stdout.clone();
    let second = project.sah().arg("rewrite").assert().success().get_output().stdout.clone();
    assert_eq!(first, second);
}
