use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub uid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"access_token": "eyJhbGciOi.abc.def", "uid": "u-42", "msg": "ok"}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "eyJhbGciOi.abc.def");
        assert_eq!(resp.uid, "u-42");
    }

    #[test]
    fn test_user_display_name() {
        let mut user = User {
            uid: "u-1".to_string(),
            name: Some("Ada".to_string()),
            email: Some("ada@campus.edu".to_string()),
        };
        assert_eq!(user.display_name(), "Ada");
        user.name = None;
        assert_eq!(user.display_name(), "ada@campus.edu");
        user.email = None;
        assert_eq!(user.display_name(), "u-1");
    }
}
