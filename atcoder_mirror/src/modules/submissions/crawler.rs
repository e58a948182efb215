use crate::{
    modules::submissions::scraper::SubmissionPageScraper,
    types::submission::{Submission, SubmissionDetail},
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use thiserror::Error;
use tokio::time::Duration;

static SCRAPER: Lazy<SubmissionPageScraper> = Lazy::new(|| SubmissionPageScraper::new());

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to request: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("invalid url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("failed to extract submission detail from {0}")]
    ExtractionError(String),
}

/// 提出一覧と提出詳細の取得元
#[async_trait]
pub trait SubmissionSource {
    async fn fetch_submissions(
        &self,
        user: &str,
        from_second: i64,
    ) -> Result<Vec<Submission>, FetchError>;
    async fn fetch_detail(
        &self,
        contest_id: &str,
        submission_id: i64,
    ) -> Result<SubmissionDetail, FetchError>;
}

pub struct AtCoderClient {
    api_url: Url,
    judge_url: Url,
    client: Client,
}

impl AtCoderClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(10))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(AtCoderClient {
            api_url: Url::parse("https://kenkoooo.com/atcoder/atcoder-api/v3/user/submissions")?,
            judge_url: Url::parse("https://atcoder.jp")?,
            client,
        })
    }

    fn submission_url(&self, contest_id: &str, submission_id: i64) -> Result<Url, FetchError> {
        let url = self.judge_url.join(&format!(
            "contests/{}/submissions/{}",
            contest_id, submission_id
        ))?;
        Ok(url)
    }
}

#[async_trait]
impl SubmissionSource for AtCoderClient {
    /// AtCoder Problemsからユーザの提出一覧を取得するメソッド
    async fn fetch_submissions(
        &self,
        user: &str,
        from_second: i64,
    ) -> Result<Vec<Submission>, FetchError> {
        tracing::info!("Attempting to get submissions of {} from AtCoder Problems...", user);
        let from_second = from_second.to_string();
        let res = self
            .client
            .get(self.api_url.clone())
            .query(&[("user", user), ("from_second", from_second.as_str())])
            .send()
            .await?;

        if let Err(e) = res.error_for_status_ref() {
            tracing::error!(
                "error response returned from AtCoder Problems submission API: {:?}",
                e
            );
            return Err(FetchError::RequestError(e));
        }

        let submissions: Vec<Submission> = res.json().await?;
        tracing::info!("{} submissions collected.", submissions.len());

        Ok(submissions)
    }

    /// 提出詳細ページを取得してソースコードと問題情報を抽出するメソッド
    async fn fetch_detail(
        &self,
        contest_id: &str,
        submission_id: i64,
    ) -> Result<SubmissionDetail, FetchError> {
        let url = self.submission_url(contest_id, submission_id)?;
        tracing::info!("Crawl {}", url);

        let res = self.client.get(url.clone()).send().await?;
        if let Err(e) = res.error_for_status_ref() {
            tracing::error!("error response returned from submission page: {:?}", e);
            return Err(FetchError::RequestError(e));
        }

        let html = res.text().await?;

        SCRAPER
            .extract_detail(&html)
            .ok_or(FetchError::ExtractionError(url.to_string()))
    }
}
