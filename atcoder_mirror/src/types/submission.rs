use serde::{Deserialize, Serialize};
use std::fmt;

pub const ACCEPTED: &str = "AC";

/// AtCoder Problemsの提出APIが返す提出情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub epoch_second: i64,
    pub problem_id: String,
    pub contest_id: String,
    #[serde(default)]
    pub user_id: String,
    pub language: String,
    #[serde(default)]
    pub point: f64,
    #[serde(default)]
    pub length: i64,
    pub result: String,
    pub execution_time: Option<i64>,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.result == ACCEPTED
    }

    pub fn key(&self) -> SubmissionKey {
        SubmissionKey {
            contest_id: self.contest_id.clone(),
            problem_id: self.problem_id.clone(),
            submission_id: self.id,
        }
    }
}

/// (contest id, problem id, submission id)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubmissionKey {
    pub contest_id: String,
    pub problem_id: String,
    pub submission_id: i64,
}

impl fmt::Display for SubmissionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{}#{}",
            self.contest_id, self.problem_id, self.submission_id
        )
    }
}

/// 提出ページから抽出したソースコードと問題情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDetail {
    pub source_code: String,
    pub problem_title: String,
    pub problem_url: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize_submission() {
        let json = r#"
        {
            "id": 12345,
            "epoch_second": 1000,
            "problem_id": "abc100_a",
            "contest_id": "abc100",
            "user_id": "tourist",
            "language": "Python (3.8.2)",
            "point": 100.0,
            "length": 8,
            "result": "AC",
            "execution_time": 17
        }
        "#;

        let submission: Submission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.id, 12345);
        assert!(submission.is_accepted());
        assert_eq!(
            submission.key(),
            SubmissionKey {
                contest_id: String::from("abc100"),
                problem_id: String::from("abc100_a"),
                submission_id: 12345,
            }
        );
        assert_eq!(submission.key().to_string(), "abc100/abc100_a#12345");
    }

    #[test]
    fn test_deserialize_waiting_submission() {
        let json = r#"{"id":1,"epoch_second":1,"problem_id":"p","contest_id":"c","user_id":"u","language":"Rust (1.42.0)","point":0.0,"length":10,"result":"WJ","execution_time":null}"#;

        let submission: Submission = serde_json::from_str(json).unwrap();

        assert!(!submission.is_accepted());
        assert_eq!(submission.execution_time, None);
    }
}
