use crate::types::submission::SubmissionDetail;
use reqwest::Url;
use scraper::{Html, Selector};

pub struct SubmissionPageScraper {
    base_url: Url,
    code: Selector,
    task_link: Selector,
}

impl SubmissionPageScraper {
    pub fn new() -> Self {
        let base_url = Url::parse("https://atcoder.jp").unwrap();
        let code = Selector::parse("pre#submission-code").unwrap();
        let task_link = Selector::parse(r#"a[href*="tasks/"]"#).unwrap();

        Self {
            base_url,
            code,
            task_link,
        }
    }

    /// 提出詳細ページのHTMLからソースコード、問題タイトル、問題URLを抽出するメソッド
    pub fn extract_detail(&self, html: &str) -> Option<SubmissionDetail> {
        let html = Html::parse_document(html);

        let source_code: String = match html.select(&self.code).next() {
            Some(pre) => pre.text().collect(),
            None => {
                tracing::warn!("failed to extract source code from submission page html");
                return None;
            }
        };

        let link = match html.select(&self.task_link).next() {
            Some(link) => link,
            None => {
                tracing::warn!("failed to extract problem link from submission page html");
                return None;
            }
        };
        let problem_title: String = link.text().map(|text| text.trim()).collect();
        let problem_url = link
            .value()
            .attr("href")
            .and_then(|href| self.base_url.join(href).ok())
            .map(|url| url.to_string())?;

        Some(SubmissionDetail {
            source_code,
            problem_title,
            problem_url,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head><title>提出 #12345 - AtCoder Beginner Contest 100</title></head>
<body>
<div id="main-container">
  <a href="/contests/abc100">AtCoder Beginner Contest 100</a>
  <table class="table">
    <tr>
      <th>問題</th>
      <td class="text-center"><a href="/contests/abc100/tasks/abc100_a">
        A - Sample
      </a></td>
    </tr>
    <tr><th>ユーザ</th><td><a href="/users/tourist">tourist</a></td></tr>
  </table>
  <pre id="submission-code" class="prettyprint linenums">if 1 &lt; 2:
    print(1)
</pre>
</div>
</body>
</html>
"#;

    #[test]
    fn test_extract_detail() {
        let scraper = SubmissionPageScraper::new();

        let detail = scraper.extract_detail(PAGE).unwrap();

        assert_eq!(detail.source_code, "if 1 < 2:\n    print(1)\n");
        assert_eq!(detail.problem_title, "A - Sample");
        assert_eq!(
            detail.problem_url,
            "https://atcoder.jp/contests/abc100/tasks/abc100_a"
        );
    }

    #[test]
    fn test_extract_detail_with_absolute_link() {
        let scraper = SubmissionPageScraper::new();
        let html = r#"<a href="https://atcoder.jp/contests/arc150/tasks/arc150_b">B - Make Divisible</a><pre id="submission-code">fn main() {}</pre>"#;

        let detail = scraper.extract_detail(html).unwrap();

        assert_eq!(detail.problem_title, "B - Make Divisible");
        assert_eq!(
            detail.problem_url,
            "https://atcoder.jp/contests/arc150/tasks/arc150_b"
        );
    }

    #[test]
    fn test_extract_detail_without_code() {
        let scraper = SubmissionPageScraper::new();
        let html = r#"<a href="/contests/abc100/tasks/abc100_a">A - Sample</a>"#;

        assert_eq!(scraper.extract_detail(html), None);
    }

    #[test]
    fn test_extract_detail_without_task_link() {
        let scraper = SubmissionPageScraper::new();
        let html = r#"<a href="/contests/abc100">ABC100</a><pre id="submission-code">print(1)</pre>"#;

        assert_eq!(scraper.extract_detail(html), None);
    }
}
