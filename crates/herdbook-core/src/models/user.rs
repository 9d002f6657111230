use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_falls_back_to_username() {
        let user = User {
            id: 1,
            username: "ali".to_string(),
            email: "ali@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert_eq!(user.full_name(), "ali");

        let named = User {
            first_name: "Ali".to_string(),
            last_name: "Shop".to_string(),
            ..user
        };
        assert_eq!(named.full_name(), "Ali Shop");
    }
}
