use crate::modules::submissions::{
    crawler::{AtCoderClient, SubmissionSource},
    planner,
    writer::{ExtensionPolicy, SubmissionMirror, SyncReport},
};
use anyhow::{Context, Result};
use atcoder_mirror_libs::CheckpointStore;
use clap::Args;
use std::path::PathBuf;
use tokio::time::Duration;

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// AtCoder user name whose accepted submissions are mirrored.
    #[arg(long, env = "ATCODER_USERNAME")]
    user: String,
    #[arg(long, env = "SUBMISSION_SAVE_DIRECTORY", default_value = "./submissons")]
    output_dir: PathBuf,
    #[arg(long, env = "RECORDED_TIMESTAMP_FILE", default_value = "recorded_timestamp.json")]
    checkpoint: PathBuf,
    /// Passed to the submission API as `from_second`.
    #[arg(long, default_value_t = 0)]
    from_second: i64,
    /// Wait before every submission page request, in milliseconds.
    #[arg(long, default_value_t = 3000)]
    interval_ms: u64,
    /// Extension used when the language name matches no known language.
    #[arg(long, default_value = "txt")]
    fallback_extension: String,
    /// Skip submissions in unknown languages instead of using the fallback extension.
    #[arg(long)]
    skip_unknown_language: bool,
}

impl SyncArgs {
    fn policy(&self) -> ExtensionPolicy {
        if self.skip_unknown_language {
            ExtensionPolicy::Skip
        } else {
            ExtensionPolicy::Fallback(self.fallback_extension.clone())
        }
    }
}

pub async fn sync<S: SubmissionSource + Sync>(source: &S, args: &SyncArgs) -> Result<SyncReport> {
    let submissions = source
        .fetch_submissions(&args.user, args.from_second)
        .await
        .with_context(|| {
            let message = format!("Failed to fetch submissions of {}.", args.user);
            tracing::error!(message);
            message
        })?;

    let store = CheckpointStore::new(&args.checkpoint);
    let checkpoint = store.load().with_context(|| {
        let message = format!("Failed to load checkpoint {}.", args.checkpoint.display());
        tracing::error!(message);
        message
    })?;

    let plan = planner::plan(submissions, checkpoint);

    let mirror = SubmissionMirror::new(
        source,
        &args.output_dir,
        Duration::from_millis(args.interval_ms),
        args.policy(),
    );
    let report = mirror.run(&plan, &store).await.with_context(|| {
        let message = format!("Failed to save checkpoint {}.", args.checkpoint.display());
        tracing::error!(message);
        message
    })?;

    tracing::info!(
        "{} submissions mirrored, {} skipped, {} failed.",
        report.mirrored,
        report.skipped,
        report.failed
    );

    if !report.checkpoint_saved {
        tracing::info!("Checkpoint {} is up to date.", args.checkpoint.display());
    }

    Ok(report)
}

pub async fn run(args: SyncArgs) -> Result<()> {
    let client = AtCoderClient::new().context("Failed to create HTTP client.")?;
    sync(&client, &args).await?;

    Ok(())
}
