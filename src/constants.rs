//! Global constants used throughout the SAH codebase.
//!
//! This module contains the plugin identity, the CloudFormation vocabulary the
//! rewrite engine recognizes, and timeout values. Defining them centrally keeps
//! the literal strings of the provisioning backend in one discoverable place.

use std::time::Duration;

/// Name used as the prefix of every configuration error message.
pub const PLUGIN_NAME: &str = "sah-plugin";

/// Key under the service's `custom` section that holds the plugin options.
pub const PLUGIN_CONFIG_KEY: &str = "sah";

/// Suffix appended to a function's logical ID to form its alias logical ID.
pub const ALIAS_LOGICAL_ID_SUFFIX: &str = "Alias";

/// CloudFormation type of an aliasable compute resource.
pub const LAMBDA_FUNCTION_TYPE: &str = "AWS::Lambda::Function";

/// CloudFormation type of a published, immutable function version.
pub const LAMBDA_VERSION_TYPE: &str = "AWS::Lambda::Version";

/// CloudFormation type of the alias resources this tool synthesizes.
pub const LAMBDA_ALIAS_TYPE: &str = "AWS::Lambda::Alias";

/// `Fn::GetAtt` attribute naming a function's ARN.
pub const FUNCTION_ARN_ATTRIBUTE: &str = "Arn";

/// `Fn::GetAtt` attribute naming an alias's ARN.
pub const ALIAS_ARN_ATTRIBUTE: &str = "AliasArn";

/// `Fn::GetAtt` attribute naming a published version's number.
pub const VERSION_ATTRIBUTE: &str = "Version";

/// Timeout for the post-deploy notification request (10 seconds).
pub fn default_notify_timeout() -> Duration {
    Duration::from_secs(10)
}
