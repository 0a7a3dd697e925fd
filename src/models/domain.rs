use serde::{Deserialize, Serialize};

/// Canonical person record returned by every search endpoint.
///
/// The backing indices are written without schema enforcement, so every
/// field is optional: a record missing a field serializes it as null rather
/// than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub uid: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub hometown: Option<String>,
    pub relationship_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_default_is_all_null() {
        let person = Person::default();
        assert!(person.uid.is_none());
        assert!(person.first_name.is_none());
        assert!(person.relationship_status.is_none());
    }

    #[test]
    fn test_person_serializes_explicit_nulls() {
        let person = Person {
            uid: Some(42),
            ..Person::default()
        };
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json["uid"], 42);
        assert!(json["first_name"].is_null());
        assert!(json.get("email").is_some());
    }
}
