// HTTP client for the CollegeFootballData API.

use std::time::Duration;

use async_trait::async_trait;
use pickem_core::config::Config;
use pickem_core::model::{PreseasonRank, TeamRecordUpdate};
use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::error::FeedError;
use crate::provider::SportsDataProvider;
use crate::rankings::parse_preseason_ranks;
use crate::records::parse_team_records;

/// Live `SportsDataProvider` backed by api.collegefootballdata.com.
pub struct CfbdClient {
    http: Client,
    base_url: String,
    api_key: String,
    classification: String,
}

impl CfbdClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        classification: &str,
        timeout: Duration,
    ) -> Result<Self, FeedError> {
        if api_key.trim().is_empty() {
            return Err(FeedError::MissingApiKey);
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FeedError::Http {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            classification: classification.to_string(),
        })
    }

    /// Build a client from the loaded configuration. Fails with
    /// `MissingApiKey` when no key is configured.
    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        let api_key = config
            .credentials
            .cfbd_api_key
            .as_deref()
            .ok_or(FeedError::MissingApiKey)?;
        Self::new(
            &config.provider.base_url,
            api_key,
            &config.season.classification,
            Duration::from_secs(config.provider.timeout_secs),
        )
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FeedError> {
        let url = format!("{}{}", self.base_url, path);
        info!("fetching {url}");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|source| FeedError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<Value>().await.map_err(|e| FeedError::Parse {
            url,
            message: e.to_string(),
        })
    }

    async fn rankings(&self, year: i32, season_type: &str) -> Result<Value, FeedError> {
        self.get_json(
            "/rankings",
            &[
                ("year", year.to_string()),
                ("seasonType", season_type.to_string()),
            ],
        )
        .await
    }
}

#[async_trait]
impl SportsDataProvider for CfbdClient {
    async fn fetch_team_records(&self, year: i32) -> Result<Vec<TeamRecordUpdate>, FeedError> {
        let body = self.get_json("/records", &[("year", year.to_string())]).await?;
        let records = parse_team_records(&body, &self.classification).map_err(|message| {
            FeedError::Parse {
                url: format!("{}/records", self.base_url),
                message,
            }
        })?;
        info!("fetched {} {} team records for {year}", records.len(), self.classification);
        Ok(records)
    }

    async fn fetch_preseason_ranks(
        &self,
        year: i32,
        poll: &str,
    ) -> Result<Vec<PreseasonRank>, FeedError> {
        let parse = |body: &Value| {
            parse_preseason_ranks(body, poll).map_err(|message| FeedError::Parse {
                url: format!("{}/rankings", self.base_url),
                message,
            })
        };

        let ranks = parse(&self.rankings(year, "preseason").await?)?;
        if !ranks.is_empty() {
            info!("fetched {} preseason {poll} ranks for {year}", ranks.len());
            return Ok(ranks);
        }

        // No preseason poll published; use the earliest regular-season week.
        let ranks = parse(&self.rankings(year, "regular").await?)?;
        info!(
            "no preseason {poll} poll for {year}; using earliest week ({} teams)",
            ranks.len()
        );
        Ok(ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(url: &str) -> CfbdClient {
        CfbdClient::new(url, "test-key", "fbs", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let err = CfbdClient::new("http://localhost", "  ", "fbs", Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(matches!(err, FeedError::MissingApiKey));
    }

    #[tokio::test]
    async fn fetch_team_records_sends_bearer_and_filters() {
        let mut server = mockito::Server::new_async().await;
        let body = json!([
            {
                "team": "Georgia",
                "classification": "fbs",
                "total": { "wins": 11, "losses": 2, "ties": 0 },
                "conferenceGames": { "wins": 7, "losses": 1 }
            },
            {
                "team": "Montana State",
                "classification": "fcs",
                "total": { "wins": 15, "losses": 1 }
            }
        ]);
        let mock = server
            .mock("GET", "/records")
            .match_query(Matcher::UrlEncoded("year".into(), "2024".into()))
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let records = client(&server.url()).fetch_team_records(2024).await.unwrap();
        mock.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Georgia");
        assert_eq!(records[0].stats.conf_wins, 7);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/records")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let err = client(&server.url()).fetch_team_records(2024).await.unwrap_err();
        match err {
            FeedError::Status { status, url } => {
                assert_eq!(status, 401);
                assert!(url.ends_with("/records"));
            }
            other => panic!("expected Status, got {other}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/records")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let err = client(&server.url()).fetch_team_records(2024).await.unwrap_err();
        assert!(matches!(err, FeedError::Parse { .. }));
    }

    #[tokio::test]
    async fn preseason_ranks_fall_back_to_regular_season() {
        let mut server = mockito::Server::new_async().await;
        let preseason = server
            .mock("GET", "/rankings")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("year".into(), "2024".into()),
                Matcher::UrlEncoded("seasonType".into(), "preseason".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;
        let regular = server
            .mock("GET", "/rankings")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("year".into(), "2024".into()),
                Matcher::UrlEncoded("seasonType".into(), "regular".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([{
                    "seasonType": "regular",
                    "week": 1,
                    "polls": [{ "poll": "AP Top 25", "ranks": [
                        { "rank": 1, "school": "Georgia" },
                        { "rank": 2, "school": "Ohio State" }
                    ]}]
                }])
                .to_string(),
            )
            .create_async()
            .await;

        let ranks = client(&server.url())
            .fetch_preseason_ranks(2024, "AP Top 25")
            .await
            .unwrap();
        preseason.assert_async().await;
        regular.assert_async().await;
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks[1].team, "Ohio State");
    }

    #[tokio::test]
    async fn preseason_ranks_skip_fallback_when_present() {
        let mut server = mockito::Server::new_async().await;
        let preseason = server
            .mock("GET", "/rankings")
            .match_query(Matcher::UrlEncoded("seasonType".into(), "preseason".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([{
                    "seasonType": "preseason",
                    "week": 1,
                    "polls": [{ "poll": "AP Top 25", "ranks": [{ "rank": 1, "school": "Texas" }] }]
                }])
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let ranks = client(&server.url())
            .fetch_preseason_ranks(2024, "AP Top 25")
            .await
            .unwrap();
        preseason.assert_async().await;
        assert_eq!(ranks[0].team, "Texas");
    }
}
