use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /setup-admin`
///
/// Fields are kept loose so that a missing or mistyped `setupKey` is
/// answered as a key failure rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupAdminRequest {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
    #[serde(default)]
    pub setup_key: Option<Value>,
}

impl SetupAdminRequest {
    pub fn setup_key(&self) -> Option<&str> {
        self.setup_key.as_ref().and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_ref().and_then(Value::as_str)
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().and_then(Value::as_str)
    }
}

/// Successful bootstrap response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupAdminResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Failed bootstrap response
#[derive(Debug, Serialize)]
pub struct SetupAdminErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_string_fields_read_as_absent() {
        let request: SetupAdminRequest =
            serde_json::from_str(r#"{"email": "a@example.com", "password": 7, "setupKey": 12345}"#).unwrap();

        assert_eq!(request.email(), Some("a@example.com"));
        assert_eq!(request.password(), None);
        assert_eq!(request.setup_key(), None);
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let request: SetupAdminRequest = serde_json::from_str("{}").unwrap();

        assert!(request.email().is_none());
        assert!(request.setup_key().is_none());
    }
}
