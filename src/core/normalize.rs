use serde_json::Value;
use thiserror::Error;

use crate::models::Person;

/// A single hit could not be mapped onto the person record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HitError {
    #[error("field `{field}` has unexpected type, expected {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

/// Map one raw backend hit onto a `Person`.
///
/// Missing keys and JSON nulls become `None`; unknown keys are ignored. A
/// key that is present with an incompatible type is a data-quality problem
/// and fails this hit only.
pub fn person_from_hit(hit: &Value) -> Result<Person, HitError> {
    Ok(Person {
        uid: opt_i64(hit, "uid")?,
        first_name: opt_string(hit, "first_name")?,
        last_name: opt_string(hit, "last_name")?,
        email: opt_string(hit, "email")?,
        phone: opt_string(hit, "phone")?,
        gender: opt_string(hit, "gender")?,
        location: opt_string(hit, "location")?,
        hometown: opt_string(hit, "hometown")?,
        relationship_status: opt_string(hit, "relationship_status")?,
    })
}

/// Map a batch of raw hits onto person records.
///
/// With `strict` unset a malformed hit is logged and skipped so one bad
/// document cannot abort the whole batch; with `strict` set the first
/// malformed hit fails the batch.
pub fn normalize_hits(hits: &[Value], strict: bool) -> Result<Vec<Person>, HitError> {
    let mut people = Vec::with_capacity(hits.len());
    for hit in hits {
        match person_from_hit(hit) {
            Ok(person) => people.push(person),
            Err(e) if strict => return Err(e),
            Err(e) => {
                tracing::warn!("Skipping malformed hit: {}", e);
            }
        }
    }
    Ok(people)
}

fn opt_i64(hit: &Value, field: &'static str) -> Result<Option<i64>, HitError> {
    match hit.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or(HitError::TypeMismatch {
                field,
                expected: "integer",
            }),
    }
}

fn opt_string(hit: &Value, field: &'static str) -> Result<Option<String>, HitError> {
    match hit.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(HitError::TypeMismatch {
            field,
            expected: "string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_hit_round_trips_exactly() {
        let hit = json!({
            "uid": 42,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "phone": "+4420",
            "gender": "female",
            "location": "London",
            "hometown": "London",
            "relationship_status": "single"
        });

        let person = person_from_hit(&hit).unwrap();
        assert_eq!(person.uid, Some(42));
        assert_eq!(person.first_name.as_deref(), Some("Ada"));
        assert_eq!(person.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(person.email.as_deref(), Some("ada@example.com"));
        assert_eq!(person.phone.as_deref(), Some("+4420"));
        assert_eq!(person.gender.as_deref(), Some("female"));
        assert_eq!(person.location.as_deref(), Some("London"));
        assert_eq!(person.hometown.as_deref(), Some("London"));
        assert_eq!(person.relationship_status.as_deref(), Some("single"));
    }

    #[test]
    fn test_missing_fields_become_none() {
        let hit = json!({ "uid": 7, "first_name": "B" });
        let person = person_from_hit(&hit).unwrap();
        assert_eq!(person.uid, Some(7));
        assert_eq!(person.first_name.as_deref(), Some("B"));
        assert!(person.last_name.is_none());
        assert!(person.email.is_none());
        assert!(person.relationship_status.is_none());
    }

    #[test]
    fn test_empty_hit_is_all_none() {
        let person = person_from_hit(&json!({})).unwrap();
        assert_eq!(person, Person::default());
    }

    #[test]
    fn test_null_values_become_none() {
        let hit = json!({ "uid": null, "email": null });
        let person = person_from_hit(&hit).unwrap();
        assert!(person.uid.is_none());
        assert!(person.email.is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let hit = json!({ "uid": 1, "unexpected": {"nested": true}, "friends": [1, 2] });
        let person = person_from_hit(&hit).unwrap();
        assert_eq!(person.uid, Some(1));
    }

    #[test]
    fn test_wrong_uid_type_is_rejected() {
        let hit = json!({ "uid": "not-a-number" });
        let err = person_from_hit(&hit).unwrap_err();
        assert_eq!(
            err,
            HitError::TypeMismatch { field: "uid", expected: "integer" }
        );
    }

    #[test]
    fn test_wrong_string_type_is_rejected() {
        let hit = json!({ "first_name": 12 });
        assert!(person_from_hit(&hit).is_err());
    }

    #[test]
    fn test_normalize_skips_malformed_hits() {
        let hits = vec![
            json!({ "uid": 1 }),
            json!({ "uid": "bad" }),
            json!({ "uid": 3 }),
        ];
        let people = normalize_hits(&hits, false).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].uid, Some(1));
        assert_eq!(people[1].uid, Some(3));
    }

    #[test]
    fn test_strict_normalize_fails_on_malformed_hit() {
        let hits = vec![json!({ "uid": 1 }), json!({ "uid": "bad" })];
        assert!(normalize_hits(&hits, true).is_err());
    }
}
