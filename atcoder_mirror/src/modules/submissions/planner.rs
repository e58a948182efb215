use crate::types::submission::{Submission, SubmissionKey};
use atcoder_mirror_libs::Checkpoint;
use std::collections::{BTreeMap, HashMap};

/// Checkpoint before the run, the checkpoint the run aims at, and whether the two differ.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointState {
    pub previous: Checkpoint,
    pub updated: Checkpoint,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    /// Latest accepted submission per problem.
    pub submissions: BTreeMap<SubmissionKey, Submission>,
    pub state: CheckpointState,
}

impl SyncPlan {
    /// Submissions whose timestamp is not already recorded in the previous checkpoint.
    pub fn pending(&self) -> impl Iterator<Item = (&SubmissionKey, &Submission)> {
        self.submissions.iter().filter(|(key, submission)| {
            self.state.previous.get(&key.problem_id) != Some(submission.epoch_second)
        })
    }
}

/// 問題ごとに最新のAC提出を選ぶ
///
/// 同じ時刻のAC提出が複数ある場合は先に現れたものを採用する
pub fn latest_accepted(submissions: Vec<Submission>) -> BTreeMap<SubmissionKey, Submission> {
    let mut latest: HashMap<String, Submission> = HashMap::new();
    for submission in submissions.into_iter().filter(|s| s.is_accepted()) {
        match latest.get(&submission.problem_id) {
            Some(current) if submission.epoch_second <= current.epoch_second => {}
            _ => {
                latest.insert(submission.problem_id.clone(), submission);
            }
        }
    }

    latest
        .into_values()
        .map(|submission| (submission.key(), submission))
        .collect()
}

/// 提出一覧と記録済みのチェックポイントを比較して、保存対象の提出と更新後のチェックポイントを求める
pub fn plan(submissions: Vec<Submission>, previous: Checkpoint) -> SyncPlan {
    let submissions = latest_accepted(submissions);

    let mut updated = previous.clone();
    let mut dirty = false;
    for (key, submission) in submissions.iter() {
        let recorded = previous.get(&key.problem_id);
        if recorded.map_or(true, |recorded| submission.epoch_second > recorded) {
            updated.record(&key.problem_id, submission.epoch_second);
            dirty = true;
        }
    }

    tracing::info!(
        "{} problems solved, {} of them have new accepted submissions.",
        submissions.len(),
        submissions
            .keys()
            .filter(|key| updated.get(&key.problem_id) != previous.get(&key.problem_id))
            .count()
    );

    SyncPlan {
        submissions,
        state: CheckpointState {
            previous,
            updated,
            dirty,
        },
    }
}
