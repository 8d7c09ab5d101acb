use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub user: User,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub department: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Doctor {
    pub fn display_name(&self) -> String {
        self.user.full_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let d: Doctor = serde_json::from_str(
            r#"{"id": 3, "user": {"id": 9, "username": "dr.mehta", "role": "doctor"}}"#,
        )
        .unwrap();
        assert_eq!(d.id, 3);
        assert!(d.available);
        assert!(d.specialty.is_empty());
    }
}
