//! The `/send_email` request contract

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::mail::errors::RequestError;

/// SMTP connection parameters as supplied by the caller.
///
/// Every field deserializes as optional so that presence is checked by
/// [`EmailRequest::validate`] rather than by body rejection.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ConnectionParams {
    /// The SMTP host to relay through
    #[schema(example = "smtp.example.com")]
    pub host: Option<String>,

    /// The SMTP port
    #[schema(example = 587)]
    pub port: Option<u16>,

    /// The SMTP login
    pub login: Option<String>,

    /// The SMTP password
    pub password: Option<String>,
}

/// Headers of the outgoing message as supplied by the caller.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct HeaderParams {
    /// The sender address
    #[serde(rename = "From")]
    #[schema(example = "shop@example.com")]
    pub from: Option<String>,

    /// The recipient address
    #[serde(rename = "To")]
    #[schema(example = "customer@example.com")]
    pub to: Option<String>,

    /// The message subject
    #[serde(rename = "Subject")]
    pub subject: Option<String>,

    /// The reply-to address
    #[serde(rename = "Reply-To")]
    pub reply_to: Option<String>,
}

/// Application data: the template to render plus its variables.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct AppData {
    /// The template filename, relative to the templates root
    #[schema(example = "order_confirmation.html")]
    pub email_template: Option<String>,

    /// Remaining keys are template variables, keyed by lower-case name
    #[serde(flatten)]
    #[schema(value_type = HashMap<String, String>)]
    pub variables: HashMap<String, String>,
}

/// The `POST /send_email` request body.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct EmailRequest {
    /// Credentials for the SMTP server the message is relayed through
    #[serde(default)]
    pub mail_connection_parameters: ConnectionParams,

    /// Headers of the outgoing message
    #[serde(default)]
    pub mail_headers: HeaderParams,

    /// Template name and substitution variables
    #[serde(default)]
    pub app_data: AppData,
}

/// Connection parameters with every field confirmed present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpConnection {
    /// The SMTP host to relay through
    pub host: String,

    /// The SMTP port
    pub port: u16,

    /// The SMTP login
    pub login: String,

    /// The SMTP password
    pub password: String,
}

/// Mail headers with every field confirmed present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailHeaders {
    /// The sender address
    pub from: String,

    /// The recipient address
    pub to: String,

    /// The message subject
    pub subject: String,

    /// The reply-to address
    pub reply_to: String,
}

/// An [`EmailRequest`] that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidEmailRequest {
    /// Connection parameters for the caller's SMTP server
    pub connection: SmtpConnection,

    /// Headers of the outgoing message
    pub headers: MailHeaders,

    /// The template filename, relative to the templates root
    pub template_name: String,

    /// Template variables, keyed by lower-case name
    pub variables: HashMap<String, String>,
}

impl ValidEmailRequest {
    /// The order number quoted in response messages.
    pub fn order_number(&self) -> &str {
        self.variables
            .get("order_number")
            .map(String::as_str)
            .unwrap_or("unknown")
    }
}

impl EmailRequest {
    /// Checks that every required field is present.
    ///
    /// A pure presence check with no I/O: all four connection parameters,
    /// all four mail headers and `app_data.email_template` must be supplied
    /// before anything else happens to the request.
    pub fn validate(self) -> Result<ValidEmailRequest, RequestError> {
        self.try_into()
    }
}

impl TryFrom<EmailRequest> for ValidEmailRequest {
    type Error = RequestError;

    fn try_from(request: EmailRequest) -> Result<Self, Self::Error> {
        let connection = match request.mail_connection_parameters {
            ConnectionParams {
                host: Some(host),
                port: Some(port),
                login: Some(login),
                password: Some(password),
            } => SmtpConnection {
                host,
                port,
                login,
                password,
            },
            _ => return Err(RequestError::MissingArguments),
        };

        let headers = match request.mail_headers {
            HeaderParams {
                from: Some(from),
                to: Some(to),
                subject: Some(subject),
                reply_to: Some(reply_to),
            } => MailHeaders {
                from,
                to,
                subject,
                reply_to,
            },
            _ => return Err(RequestError::MissingArguments),
        };

        let template_name = request
            .app_data
            .email_template
            .ok_or(RequestError::MissingArguments)?;

        Ok(Self {
            connection,
            headers,
            template_name,
            variables: request.app_data.variables,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn complete_request_value() -> serde_json::Value {
        serde_json::json!({
            "mail_connection_parameters": {
                "host": "smtp.example.com",
                "port": 587,
                "login": "relay",
                "password": "hunter2"
            },
            "mail_headers": {
                "From": "shop@example.com",
                "To": "customer@example.com",
                "Subject": "Your order",
                "Reply-To": "support@example.com"
            },
            "app_data": {
                "email_template": "order_confirmation.html",
                "customer_name": "Alice",
                "order_number": "123"
            }
        })
    }

    fn complete_request() -> EmailRequest {
        serde_json::from_value(complete_request_value())
            .expect("request fixture should deserialize")
    }

    #[test]
    fn test_complete_request_is_valid() -> TestResult {
        let valid = complete_request().validate()?;

        assert_eq!(valid.connection.host, "smtp.example.com");
        assert_eq!(valid.connection.port, 587);
        assert_eq!(valid.headers.to, "customer@example.com");
        assert_eq!(valid.template_name, "order_confirmation.html");
        assert_eq!(valid.variables.get("customer_name").unwrap(), "Alice");
        assert_eq!(valid.order_number(), "123");

        Ok(())
    }

    #[test]
    fn test_each_missing_required_field_is_invalid() {
        let required = [
            ("mail_connection_parameters", "host"),
            ("mail_connection_parameters", "port"),
            ("mail_connection_parameters", "login"),
            ("mail_connection_parameters", "password"),
            ("mail_headers", "From"),
            ("mail_headers", "To"),
            ("mail_headers", "Subject"),
            ("mail_headers", "Reply-To"),
            ("app_data", "email_template"),
        ];

        for (section, key) in required {
            let mut body = complete_request_value();
            body[section]
                .as_object_mut()
                .expect("section should be an object")
                .remove(key);

            let request: EmailRequest =
                serde_json::from_value(body).expect("body should deserialize");

            assert_eq!(
                request.validate().unwrap_err(),
                RequestError::MissingArguments,
                "missing {section}.{key} should be invalid"
            );
        }
    }

    #[test]
    fn test_missing_password_is_invalid() {
        let mut request = complete_request();
        request.mail_connection_parameters.password = None;

        assert_eq!(
            request.validate().unwrap_err(),
            RequestError::MissingArguments
        );
    }

    #[test]
    fn test_missing_reply_to_is_invalid() {
        let mut request = complete_request();
        request.mail_headers.reply_to = None;

        assert_eq!(
            request.validate().unwrap_err(),
            RequestError::MissingArguments
        );
    }

    #[test]
    fn test_missing_template_is_invalid() {
        let mut request = complete_request();
        request.app_data.email_template = None;

        assert_eq!(
            request.validate().unwrap_err(),
            RequestError::MissingArguments
        );
    }

    #[test]
    fn test_extra_app_data_keys_become_variables() -> TestResult {
        let mut request = complete_request();
        request
            .app_data
            .variables
            .insert("coupon_code".to_string(), "SAVE10".to_string());

        let valid = request.validate()?;

        assert_eq!(valid.variables.get("coupon_code").unwrap(), "SAVE10");

        Ok(())
    }

    #[test]
    fn test_order_number_defaults_to_unknown() -> TestResult {
        let mut request = complete_request();
        request.app_data.variables.remove("order_number");

        assert_eq!(request.validate()?.order_number(), "unknown");

        Ok(())
    }

    #[test]
    fn test_empty_body_is_invalid() {
        let request: EmailRequest = serde_json::from_value(serde_json::json!({}))
            .expect("empty body should deserialize with defaults");

        assert_eq!(
            request.validate().unwrap_err(),
            RequestError::MissingArguments
        );
    }
}
