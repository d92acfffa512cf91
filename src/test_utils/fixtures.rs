//! Test fixtures for creating sample data
//!
//! Compiled templates and service definitions shaped like the ones the
//! deployment tool writes for a small HTTP + schedule + queue service.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Test fixture for compiled CloudFormation templates
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    pub content: String,
    pub name: String,
}

impl TemplateFixture {
    /// One function with a published version, an HTTP API integration,
    /// a schedule rule, and an SQS event source mapping all invoking it.
    ///
    /// The content is pretty-printed with 2-space indentation so that an
    /// unchanged round trip reproduces it byte for byte.
    pub fn web_service() -> Self {
        Self {
            name: "web_service".to_string(),
            content: r#"{
  "AWSTemplateFormatVersion": "2010-09-09",
  "Description": "The AWS CloudFormation template for this Serverless application",
  "Resources": {
    "ServerlessDeploymentBucket": {
      "Type": "AWS::S3::Bucket"
    },
    "WebLogGroup": {
      "Type": "AWS::Logs::LogGroup",
      "Properties": {
        "LogGroupName": "/aws/lambda/web-app-dev-web"
      }
    },
    "WebLambdaFunction": {
      "Type": "AWS::Lambda::Function",
      "Properties": {
        "Code": {
          "S3Bucket": {
            "Ref": "ServerlessDeploymentBucket"
          },
          "S3Key": "serverless/web-app/dev/web.zip"
        },
        "Handler": "handler.web",
        "Runtime": "nodejs18.x",
        "FunctionName": "web-app-dev-web"
      },
      "DependsOn": [
        "WebLogGroup"
      ]
    },
    "WebLambdaVersionQx3": {
      "Type": "AWS::Lambda::Version",
      "DeletionPolicy": "Retain",
      "Properties": {
        "FunctionName": {
          "Ref": "WebLambdaFunction"
        },
        "CodeSha256": "Qx3fPbW7nAzJ0f5sL2v9"
      }
    },
    "HttpApi": {
      "Type": "AWS::ApiGatewayV2::Api",
      "Properties": {
        "Name": "dev-web-app",
        "ProtocolType": "HTTP"
      }
    },
    "HttpApiIntegrationWeb": {
      "Type": "AWS::ApiGatewayV2::Integration",
      "Properties": {
        "ApiId": {
          "Ref": "HttpApi"
        },
        "IntegrationType": "AWS_PROXY",
        "IntegrationUri": {
          "Fn::GetAtt": [
            "WebLambdaFunction",
            "Arn"
          ]
        },
        "PayloadFormatVersion": "2.0"
      }
    },
    "WebEventsRuleSchedule1": {
      "Type": "AWS::Events::Rule",
      "Properties": {
        "ScheduleExpression": "rate(5 minutes)",
        "State": "ENABLED",
        "Targets": [
          {
            "Arn": {
              "Fn::GetAtt": [
                "WebLambdaFunction",
                "Arn"
              ]
            },
            "Id": "webSchedule"
          }
        ]
      }
    },
    "WebEventSourceMappingSQSQueue": {
      "Type": "AWS::Lambda::EventSourceMapping",
      "Properties": {
        "BatchSize": 10,
        "EventSourceArn": {
          "Fn::GetAtt": [
            "Queue",
            "Arn"
          ]
        },
        "FunctionName": {
          "Fn::GetAtt": [
            "WebLambdaFunction",
            "Arn"
          ]
        },
        "Enabled": true
      }
    },
    "Queue": {
      "Type": "AWS::SQS::Queue"
    }
  },
  "Outputs": {
    "HttpApiUrl": {
      "Value": {
        "Fn::Join": [
          "",
          [
            "https://",
            {
              "Ref": "HttpApi"
            },
            ".execute-api.us-east-1.amazonaws.com"
          ]
        ]
      }
    }
  }
}"#
            .to_string(),
        }
    }

    /// A function with no published version
    pub fn unversioned() -> Self {
        Self {
            name: "unversioned".to_string(),
            content: r#"{
  "Resources": {
    "WorkerLambdaFunction": {
      "Type": "AWS::Lambda::Function",
      "Properties": {
        "Handler": "handler.work"
      }
    }
  }
}"#
            .to_string(),
        }
    }

    /// Write the template to a directory
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let template_path = dir.join(format!("{}.json", self.name));
        fs::write(&template_path, &self.content)
            .with_context(|| format!("Failed to write {}", template_path.display()))?;
        Ok(template_path)
    }
}

/// Test fixture for service definitions (`serverless.yml`)
#[derive(Clone, Debug)]
pub struct ServiceFixture {
    pub content: String,
    pub name: String,
}

impl ServiceFixture {
    /// Options under `custom.sah`, given as YAML lines indented by four spaces
    pub fn with_options(name: &str, options: &str) -> Self {
        Self {
            name: name.to_string(),
            content: format!(
                "service: web-app\nprovider:\n  name: aws\n  runtime: nodejs18.x\ncustom:\n  sah:\n{options}"
            ),
        }
    }

    /// Active alias with dependent rewriting enabled
    pub fn active() -> Self {
        Self::with_options(
            "active",
            "    makeLambdasActive: true\n    useActiveAliasInEvents: true\n",
        )
    }

    /// Active alias only; dependents untouched
    pub fn aliases_only() -> Self {
        Self::with_options("aliases_only", "    makeLambdasActive: true\n")
    }

    /// Notification endpoint configured
    pub fn with_notify(url: &str, token: &str) -> Self {
        Self::with_options(
            "notify",
            &format!("    sahUrl: {url}\n    sahToken: {token}\n"),
        )
    }

    /// No `custom` section at all
    pub fn missing_custom() -> Self {
        Self {
            name: "missing_custom".to_string(),
            content: "service: web-app\nprovider:\n  name: aws\n".to_string(),
        }
    }

    /// `custom` present without the plugin section
    pub fn missing_plugin_section() -> Self {
        Self {
            name: "missing_plugin_section".to_string(),
            content: "service: web-app\ncustom:\n  other:\n    enabled: true\n".to_string(),
        }
    }

    /// Empty active alias name
    pub fn empty_active_alias() -> Self {
        Self::with_options("empty_active_alias", "    activeAliasName: \"\"\n")
    }

    /// Write the service definition to a directory
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let service_path = dir.join(format!("{}.yml", self.name));
        fs::write(&service_path, &self.content)
            .with_context(|| format!("Failed to write {}", service_path.display()))?;
        Ok(service_path)
    }
}
