//! GitHub pull request lookup implementation

use crate::error::{Error, Result};
use crate::platform::PullRequestLookup;
use crate::types::{ProjectIdentity, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    project: ProjectIdentity,
}

impl GitHubService {
    /// Create a new GitHub service for the canonical repository
    pub fn new(token: &str, project: ProjectIdentity) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if project.host != "github.com" {
            let base_url = format!("https://{}/api/v3", project.host);
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder.build().map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self { client, project })
    }
}

#[async_trait]
impl PullRequestLookup for GitHubService {
    async fn find_open_pr(&self, head_owner: &str, branch: &str) -> Result<Option<PullRequest>> {
        let head = format!("{head_owner}:{branch}");

        let prs = self
            .client
            .pulls(&self.project.owner, &self.project.repo)
            .list()
            .head(head)
            .state(octocrab::params::State::Open)
            .send()
            .await?;

        Ok(prs.items.first().map(|pr| PullRequest {
            number: pr.number,
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            title: pr.title.as_deref().unwrap_or_default().to_string(),
        }))
    }
}
