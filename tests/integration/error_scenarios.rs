//! Error rendering and exit codes.

use predicates::prelude::*;

use crate::common::{ServiceFixture, TemplateFixture, TestProject};

#[test]
fn test_missing_service_definition() {
    let project = TestProject::new().unwrap();

    project
        .sah()
        .arg("validate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read service definition"))
        .stderr(predicate::str::contains("serverless.yml"));
}

#[test]
fn test_invalid_yaml_service_definition() {
    let project = TestProject::new().unwrap();
    project.write_service("custom: [unclosed").unwrap();

    project
        .sah()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse service definition"))
        .stderr(predicate::str::contains("YAML syntax"));
}

#[test]
fn test_invalid_template() {
    let project = TestProject::new().unwrap();
    project.write_service(&ServiceFixture::active().content).unwrap();
    project.write_template(r#"{"Outputs": {}}"#).unwrap();

    project
        .sah()
        .arg("rewrite")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no Resources section"))
        .stderr(predicate::str::contains("Failed to parse template"));
}

#[test]
fn test_missing_template() {
    let project = TestProject::new().unwrap();
    project.write_service(&ServiceFixture::active().content).unwrap();

    project
        .sah()
        .arg("rewrite")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read template"));
}

#[test]
fn test_unpinnable_function_leaves_template() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::unversioned()).unwrap();

    project
        .sah()
        .args(["rewrite", "--in-place"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Function 'WorkerLambdaFunction' has no published version to pin an alias to",
        ));
    assert_eq!(project.read_template().unwrap(), TemplateFixture::unversioned().content);
}

#[test]
fn test_unknown_option_is_only_a_warning() {
    let project = TestProject::with_fixtures(
        &ServiceFixture::with_options("typo", "    makeLambdaActive: true\n"),
        &TemplateFixture::web_service(),
    )
    .unwrap();

    project
        .sah()
        .arg("validate")
        .assert()
        .success()
        .stderr(predicate::str::contains("Ignoring unknown option custom.sah.makeLambdaActive"));
}
