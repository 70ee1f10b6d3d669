use std::fmt;

pub const API_KEY_VAR: &str = "API_KEY";
pub const API_SECRET_KEY_VAR: &str = "API_SECRET_KEY";
pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET_VAR: &str = "ACCESS_TOKEN_SECRET";

/// OAuth 1.0a user-context secrets. Values are not validated here; the API
/// rejects missing or empty ones during credential verification.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds credentials from any key lookup; unset keys become empty strings.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self {
            consumer_key: get(API_KEY_VAR),
            consumer_secret: get(API_SECRET_KEY_VAR),
            access_token: get(ACCESS_TOKEN_VAR),
            access_token_secret: get(ACCESS_TOKEN_SECRET_VAR),
        }
    }

    /// Names of the variables that were empty, for a friendlier log line.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (API_KEY_VAR, &self.consumer_key),
            (API_SECRET_KEY_VAR, &self.consumer_secret),
            (ACCESS_TOKEN_VAR, &self.access_token),
            (ACCESS_TOKEN_SECRET_VAR, &self.access_token_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &mask(&self.consumer_key))
            .field("consumer_secret", &mask(&self.consumer_secret))
            .field("access_token", &mask(&self.access_token))
            .field("access_token_secret", &mask(&self.access_token_secret))
            .finish()
    }
}

/// Keeps the last four characters of long secrets, hides short ones entirely.
fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count == 0 {
        return "<empty>".to_string();
    }
    if count <= 8 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_maps_variables() {
        let creds = Credentials::from_lookup(lookup(&[
            ("API_KEY", "ck"),
            ("API_SECRET_KEY", "cs"),
            ("ACCESS_TOKEN", "at"),
            ("ACCESS_TOKEN_SECRET", "ats"),
        ]));
        assert_eq!(creds.consumer_key, "ck");
        assert_eq!(creds.consumer_secret, "cs");
        assert_eq!(creds.access_token, "at");
        assert_eq!(creds.access_token_secret, "ats");
        assert!(creds.missing().is_empty());
    }

    #[test]
    fn test_unset_variables_pass_through_as_empty() {
        let creds = Credentials::from_lookup(lookup(&[("API_KEY", "ck")]));
        assert_eq!(creds.consumer_secret, "");
        assert_eq!(
            creds.missing(),
            vec!["API_SECRET_KEY", "ACCESS_TOKEN", "ACCESS_TOKEN_SECRET"]
        );
    }

    #[test]
    fn test_debug_never_prints_full_secrets() {
        let creds = Credentials {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            access_token: "short".to_string(),
            access_token_secret: String::new(),
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("xvz1evFS4wEEPTGEFPHBog"));
        assert!(!rendered.contains("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"));
        assert!(!rendered.contains("short"));
        assert!(rendered.contains("****HBog"));
        assert!(rendered.contains("<empty>"));
    }

    #[test]
    fn test_mask_keeps_last_four() {
        assert_eq!(mask("abcdefghijkl"), "****ijkl");
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask(""), "<empty>");
    }
}
