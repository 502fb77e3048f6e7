use serde::{Deserialize, Serialize};

/// The two account kinds on the platform. Talent users apply to
/// opportunities; company users post them and assess candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Talent,
    Company,
}

impl UserType {
    /// Lenient parse used by the chat metadata prefix. Unknown values
    /// default to talent, the least-privileged role.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "company" => UserType::Company,
            _ => UserType::Talent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_from_label() {
        assert_eq!(UserType::from_label("Company"), UserType::Company);
        assert_eq!(UserType::from_label("talent"), UserType::Talent);
        assert_eq!(UserType::from_label("gibberish"), UserType::Talent);
    }
}
