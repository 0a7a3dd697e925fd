use serde_json::{json, Value};

/// Maximum number of distinct gender buckets returned by the stats
/// aggregation.
const GENDER_BUCKET_LIMIT: u32 = 10;

/// Exact-match query for a single uid.
pub fn by_uid(uid: i64) -> Value {
    json!({
        "query": { "term": { "uid": uid } }
    })
}

/// Exact-match-in-set query for a uid batch.
///
/// The `size` hint must equal the batch length so a full match returns
/// every member instead of the backend's default page.
pub fn by_uids(uids: &[i64]) -> Value {
    json!({
        "query": { "terms": { "uid": uids } },
        "size": uids.len()
    })
}

/// Exact-match query on the keyword variant of the email field.
///
/// Emails must match verbatim; the analyzed `email` field would tokenize
/// on `@` and `.` and match far too loosely.
pub fn by_email(email: &str) -> Value {
    json!({
        "query": { "term": { "email.keyword": email } }
    })
}

/// Zero-hit query carrying a bucketed terms aggregation on gender.
pub fn gender_stats() -> Value {
    json!({
        "size": 0,
        "aggs": {
            "genders": {
                "terms": { "field": "gender.keyword", "size": GENDER_BUCKET_LIMIT }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_uid_builds_term_query() {
        let query = by_uid(42);
        assert_eq!(query["query"]["term"]["uid"], 42);
    }

    #[test]
    fn test_by_uids_builds_terms_query() {
        let query = by_uids(&[1, 2, 3]);
        assert_eq!(query["query"]["terms"]["uid"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_by_uids_size_equals_batch_length() {
        let uids: Vec<i64> = (0..250).collect();
        let query = by_uids(&uids);
        assert_eq!(query["size"], 250);
    }

    #[test]
    fn test_by_email_targets_keyword_field() {
        let query = by_email("a@b.com");
        assert_eq!(query["query"]["term"]["email.keyword"], "a@b.com");
        assert!(query["query"]["term"].get("email").is_none());
    }

    #[test]
    fn test_gender_stats_requests_no_hits() {
        let query = gender_stats();
        assert_eq!(query["size"], 0);
        assert_eq!(query["aggs"]["genders"]["terms"]["field"], "gender.keyword");
        assert_eq!(query["aggs"]["genders"]["terms"]["size"], 10);
    }
}
