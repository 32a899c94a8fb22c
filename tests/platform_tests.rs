//! Pull request link resolution tests

mod common;

use common::{MockPullRequestLookup, make_pr};
use ctmd_tool::platform::{PrLink, PullRequestLookup, parse_repo_info, resolve_pr_link};

const COMPARE: &str =
    "https://github.com/xylplm/media-saber-ctmd/compare/main...update-tmdb-config";

#[tokio::test]
async fn test_existing_pr_is_preferred() {
    let lookup = MockPullRequestLookup::new().with_open_pr("update-tmdb-config", 42);

    let link = resolve_pr_link(
        Some(&lookup as &dyn PullRequestLookup),
        Some("contributor"),
        "update-tmdb-config",
        COMPARE,
    )
    .await;

    assert_eq!(link, PrLink::Existing(make_pr("update-tmdb-config", 42)));
    assert_eq!(link.url(), "https://github.com/xylplm/media-saber-ctmd/pull/42");
    let calls = lookup.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].head_owner, "contributor");
    assert_eq!(calls[0].branch, "update-tmdb-config");
}

#[tokio::test]
async fn test_no_pr_falls_back_to_compare_url() {
    let lookup = MockPullRequestLookup::new().with_open_pr("other-branch", 7);

    let link = resolve_pr_link(
        Some(&lookup as &dyn PullRequestLookup),
        Some("contributor"),
        "update-tmdb-config",
        COMPARE,
    )
    .await;

    assert_eq!(link, PrLink::Compare(COMPARE.to_string()));
}

#[tokio::test]
async fn test_lookup_error_is_not_fatal() {
    let lookup = MockPullRequestLookup::new().failing("rate limited");

    let link = resolve_pr_link(
        Some(&lookup as &dyn PullRequestLookup),
        Some("contributor"),
        "update-tmdb-config",
        COMPARE,
    )
    .await;

    assert_eq!(link.url(), COMPARE);
}

#[tokio::test]
async fn test_unknown_owner_skips_lookup() {
    let lookup = MockPullRequestLookup::new().with_open_pr("update-tmdb-config", 42);

    let link = resolve_pr_link(
        Some(&lookup as &dyn PullRequestLookup),
        None,
        "update-tmdb-config",
        COMPARE,
    )
    .await;

    assert_eq!(link, PrLink::Compare(COMPARE.to_string()));
    assert!(lookup.calls().is_empty());
}

#[test]
fn test_fork_owner_from_origin_urls() {
    for url in [
        "git@github.com:contributor/media-saber-ctmd.git",
        "https://github.com/contributor/media-saber-ctmd.git",
        "ssh://git@github.com/contributor/media-saber-ctmd",
    ] {
        assert_eq!(parse_repo_info(url).unwrap().owner, "contributor", "{url}");
    }
}
