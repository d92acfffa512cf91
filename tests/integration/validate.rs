//! Integration tests for `sah validate`.

use predicates::prelude::*;
use serde_json::json;

use crate::common::{FileAssert, ServiceFixture, TemplateFixture, TestProject, stdout_json};

#[test]
fn test_validate_text_output() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::web_service()).unwrap();

    project
        .sah()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.sah configuration is valid"))
        .stdout(predicate::str::contains("Aliases: INACTIVE"))
        .stdout(predicate::str::contains("Dependent resources: retargeted"));
}

#[test]
fn test_validate_dry_run_json() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::web_service()).unwrap();

    let output = project
        .sah()
        .args(["validate", "--format", "json", "--template"])
        .arg(project.template_path())
        .assert()
        .success()
        .get_output()
        .clone();

    assert_eq!(
        stdout_json(&output),
        json!({
            "service": "web-app",
            "aliasNames": ["INACTIVE"],
            "rewritesDependents": true,
            "notifies": false,
            "dryRun": {
                "aliases": ["WebLambdaFunctionAlias"],
                "resources": [
                    "HttpApiIntegrationWeb",
                    "WebEventsRuleSchedule1",
                    "WebEventSourceMappingSQSQueue"
                ],
                "references": 3
            }
        })
    );
    FileAssert::equals(project.template_path(), &TemplateFixture::web_service().content);
}

#[test]
fn test_validate_dry_run_text() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::web_service()).unwrap();

    project
        .sah()
        .args(["validate", "--template"])
        .arg(project.template_path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Rewrite would add 1 alias(es) and rewrite 3 reference(s) in 3 resource(s)",
        ));
}

#[test]
fn test_validate_quiet_prints_nothing() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::web_service()).unwrap();

    project.sah().args(["--quiet", "validate"]).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_validate_configuration_errors() {
    for (fixture, message) in [
        (ServiceFixture::missing_custom(), "sah-plugin: ERROR: Missing custom configuration object"),
        (
            ServiceFixture::missing_plugin_section(),
            "sah-plugin: ERROR: Missing custom.sah configuration object",
        ),
        (
            ServiceFixture::empty_active_alias(),
            "sah-plugin: ERROR: Missing custom.sah.activeAliasName property",
        ),
    ] {
        let project = TestProject::new().unwrap();
        project.write_service(&fixture.content).unwrap();

        project
            .sah()
            .arg("validate")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains(message));
    }
}

#[test]
fn test_validate_unpinnable_template() {
    let project =
        TestProject::with_fixtures(&ServiceFixture::active(), &TemplateFixture::unversioned()).unwrap();

    project
        .sah()
        .args(["validate", "--template"])
        .arg(project.template_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("WorkerLambdaFunction"))
        .stderr(predicate::str::contains("versionFunctions"));
}
