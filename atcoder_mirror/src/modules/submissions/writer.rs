use crate::{
    modules::submissions::{crawler::SubmissionSource, planner::SyncPlan},
    types::submission::{Submission, SubmissionDetail},
};
use atcoder_mirror_libs::{
    resolve_extension, sanitize_filename, Checkpoint, CheckpointError, CheckpointStore,
};
use chrono::{Local, TimeZone};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::time::{self, Duration};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write file {}", .0.display())]
    IoError(PathBuf, #[source] std::io::Error),
}

/// 言語名から拡張子が決まらなかったときの扱い
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPolicy {
    Fallback(String),
    Skip,
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        ExtensionPolicy::Fallback(String::from("txt"))
    }
}

/// Paths of the two files written for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorTarget {
    pub directory: PathBuf,
    pub source: PathBuf,
    pub note: PathBuf,
}

impl MirrorTarget {
    pub fn new(
        root: &Path,
        contest_id: &str,
        problem_id: &str,
        title: &str,
        extension: &str,
    ) -> Self {
        let directory = root.join(contest_id).join(problem_id);
        let basename = match sanitize_filename(title) {
            name if name.trim().is_empty() => problem_id.to_string(),
            name => name,
        };

        Self {
            source: directory.join(format!("{}.{}", basename, extension)),
            note: directory.join(format!("{}.md", basename)),
            directory,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub mirrored: usize,
    pub skipped: usize,
    pub failed: usize,
    pub checkpoint_saved: bool,
}

pub struct SubmissionMirror<'a, S: SubmissionSource> {
    source: &'a S,
    root: PathBuf,
    interval: Duration,
    policy: ExtensionPolicy,
}

impl<'a, S: SubmissionSource + Sync> SubmissionMirror<'a, S> {
    pub fn new(source: &'a S, root: &Path, interval: Duration, policy: ExtensionPolicy) -> Self {
        Self {
            source,
            root: root.to_owned(),
            interval,
            policy,
        }
    }

    /// ソースコードと問題リンクのノートをディレクトリに書き出すメソッド
    pub async fn write(
        &self,
        submission: &Submission,
        detail: &SubmissionDetail,
        extension: &str,
    ) -> Result<MirrorTarget, WriteError> {
        let target = MirrorTarget::new(
            &self.root,
            &submission.contest_id,
            &submission.problem_id,
            &detail.problem_title,
            extension,
        );

        tokio::fs::create_dir_all(&target.directory)
            .await
            .map_err(|e| WriteError::IoError(target.directory.clone(), e))?;

        tokio::fs::write(&target.source, &detail.source_code)
            .await
            .map_err(|e| WriteError::IoError(target.source.clone(), e))?;

        let note = format!("Link : [{}]({})", detail.problem_title, detail.problem_url);
        tokio::fs::write(&target.note, note)
            .await
            .map_err(|e| WriteError::IoError(target.note.clone(), e))?;

        Ok(target)
    }

    fn extension_of(&self, language: &str) -> Option<String> {
        match resolve_extension(language) {
            Some(extension) => Some(extension.to_string()),
            None => match &self.policy {
                ExtensionPolicy::Fallback(extension) => {
                    tracing::warn!(
                        "no extension known for language {:?}, use {:?}",
                        language,
                        extension
                    );
                    Some(extension.clone())
                }
                ExtensionPolicy::Skip => None,
            },
        }
    }

    /// 保存対象の提出を一つずつ取得して書き出し、成功した問題だけチェックポイントへ反映するメソッド
    ///
    /// 一つの提出の取得や書き出しに失敗しても残りの提出の処理は続ける。
    /// チェックポイントは変化があった場合に限り、最後に一度だけ保存する。
    pub async fn run(
        &self,
        plan: &SyncPlan,
        store: &CheckpointStore,
    ) -> Result<SyncReport, CheckpointError> {
        let mut report = SyncReport::default();
        let mut committed: Checkpoint = plan.state.previous.clone();

        report.skipped = plan.submissions.len() - plan.pending().count();

        for (key, submission) in plan.pending() {
            let extension = match self.extension_of(&submission.language) {
                Some(extension) => extension,
                None => {
                    tracing::warn!(
                        "skip {}: no extension known for language {:?}",
                        key,
                        submission.language
                    );
                    report.skipped += 1;
                    continue;
                }
            };

            time::sleep(self.interval).await;

            let detail = match self
                .source
                .fetch_detail(&key.contest_id, key.submission_id)
                .await
            {
                Ok(detail) => detail,
                Err(e) => {
                    tracing::error!("failed to fetch submission {}: {}", key, e);
                    report.failed += 1;
                    continue;
                }
            };

            match self.write(submission, &detail, &extension).await {
                Ok(target) => {
                    let submitted_at = Local
                        .timestamp_opt(submission.epoch_second, 0)
                        .earliest()
                        .map(|time| time.to_rfc3339())
                        .unwrap_or_default();
                    tracing::info!(
                        "Submission {} (submitted at {}) was saved to {}.",
                        key,
                        submitted_at,
                        target.source.display()
                    );
                    committed.advance(&key.problem_id, submission.epoch_second);
                    report.mirrored += 1;
                }
                Err(e) => {
                    tracing::error!("failed to save submission {}: {:?}", key, e);
                    report.failed += 1;
                }
            }
        }

        let unfinished = plan
            .state
            .updated
            .iter()
            .filter(|(problem_id, epoch_second)| committed.get(problem_id) != Some(**epoch_second))
            .count();
        if unfinished > 0 {
            tracing::warn!(
                "{} problems were not mirrored and keep their previous checkpoint.",
                unfinished
            );
        }

        if plan.state.dirty && committed != plan.state.previous {
            store.save(&committed)?;
            report.checkpoint_saved = true;
        }

        Ok(report)
    }
}
