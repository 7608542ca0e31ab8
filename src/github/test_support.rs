//! GraphQL payload fixtures shared by unit and behavioural tests.
//!
//! Each builder returns the `data` object a query template would produce for
//! a healthy repository or account. Tests tweak the returned JSON where they
//! need an edge case.

use serde_json::{Value, json};

/// Wraps a `data` object in a successful GraphQL response body.
#[must_use]
pub fn graphql_ok(data: Value) -> Value {
    json!({ "data": data })
}

/// GraphQL response body reporting one error with `message`.
#[must_use]
pub fn graphql_error(message: &str) -> Value {
    json!({
        "data": null,
        "errors": [{ "type": "NOT_FOUND", "path": ["repository"], "message": message }]
    })
}

/// `data` of the `repo` query.
#[must_use]
pub fn repository_data(owner: &str, name: &str) -> Value {
    json!({
        "repository": {
            "name": name,
            "nameWithOwner": format!("{owner}/{name}"),
            "description": "A sample repository",
            "url": format!("https://github.com/{owner}/{name}"),
            "homepageUrl": "",
            "createdAt": "2020-05-01T12:00:00Z",
            "isFork": false,
            "isArchived": false,
            "stargazerCount": 1200,
            "forkCount": 85,
            "owner": {
                "login": owner,
                "url": format!("https://github.com/{owner}"),
                "avatarUrl": format!("https://avatars.example/{owner}")
            },
            "primaryLanguage": { "name": "Rust", "color": "#dea584" },
            "languages": { "totalCount": 3 },
            "watchers": { "totalCount": 40 },
            "issues": { "totalCount": 12 },
            "pullRequests": { "totalCount": 4 },
            "licenseInfo": { "name": "MIT License" },
            "repositoryTopics": {
                "totalCount": 2,
                "nodes": [
                    { "topic": { "name": "rust" } },
                    { "topic": { "name": "cli" } }
                ]
            },
            "releases": { "totalCount": 7, "nodes": [{ "tagName": "v1.2.0" }] },
            "usesCustomOpenGraphImage": true,
            "openGraphImageUrl": format!("https://repository-images.example/{name}.png")
        }
    })
}

/// `data` of the `release` query.
#[must_use]
pub fn release_data(owner: &str, name: &str) -> Value {
    json!({
        "repository": {
            "name": name,
            "nameWithOwner": format!("{owner}/{name}"),
            "url": format!("https://github.com/{owner}/{name}"),
            "owner": { "login": owner, "url": format!("https://github.com/{owner}") },
            "primaryLanguage": { "name": "Go", "color": "#00ADD8" },
            "releases": {
                "totalCount": 3,
                "nodes": [{
                    "name": "Spring release",
                    "tagName": "v2.0.0",
                    "url": format!("https://github.com/{owner}/{name}/releases/tag/v2.0.0"),
                    "publishedAt": "2024-03-20T08:00:00Z",
                    "isPrerelease": false,
                    "author": { "login": "releaser", "url": "https://github.com/releaser" }
                }]
            }
        }
    })
}

/// `data` of the `user` query.
#[must_use]
pub fn user_data(login: &str) -> Value {
    json!({
        "user": {
            "login": login,
            "name": "Mona Lisa",
            "url": format!("https://github.com/{login}"),
            "avatarUrl": format!("https://avatars.example/{login}"),
            "bio": "Builds things",
            "company": null,
            "location": "Internet",
            "websiteUrl": null,
            "twitterUsername": null,
            "createdAt": "2011-01-25T18:44:36Z",
            "contributionsCollection": {
                "contributionCalendar": {
                    "totalContributions": 321,
                    "weeks": [
                        { "contributionDays": [
                            { "contributionCount": 1, "date": "2024-01-01" },
                            { "contributionCount": 2, "date": "2024-01-02" }
                        ] },
                        { "contributionDays": [
                            { "contributionCount": 4, "date": "2024-01-08" },
                            { "contributionCount": 9, "date": "2024-01-09" }
                        ] }
                    ]
                }
            },
            "organizations": { "totalCount": 2 },
            "repositories": { "totalCount": 8 },
            "followers": { "totalCount": 1000 },
            "following": { "totalCount": 9 }
        }
    })
}

/// `data` of the `issue` query.
#[must_use]
pub fn issue_data(number: u64) -> Value {
    json!({
        "repository": {
            "issue": {
                "author": {
                    "login": "reporter",
                    "url": "https://github.com/reporter",
                    "avatarUrl": "https://avatars.example/reporter"
                },
                "url": format!("https://github.com/octo/repo/issues/{number}"),
                "createdAt": "2024-02-01T10:00:00Z",
                "closed": false,
                "closedAt": null,
                "bodyText": "Steps to reproduce",
                "title": "Crash on start",
                "number": number,
                "state": "OPEN",
                "comments": { "totalCount": 5 },
                "participants": { "totalCount": 3 },
                "assignees": { "totalCount": 1 },
                "labels": { "nodes": [{ "name": "bug" }, { "name": "help wanted" }] }
            }
        }
    })
}

/// `data` of the `pull_request` query with user, team and mannequin reviewers.
#[must_use]
pub fn pull_request_data(number: u64) -> Value {
    json!({
        "repository": {
            "pullRequest": {
                "number": number,
                "title": "Add feature",
                "url": format!("https://github.com/octo/repo/pull/{number}"),
                "isCrossRepository": true,
                "state": "OPEN",
                "createdAt": "2024-04-01T09:30:00Z",
                "closed": false,
                "closedAt": null,
                "bodyText": "Implements the feature",
                "changedFiles": 4,
                "commits": { "totalCount": 3 },
                "additions": 120,
                "deletions": 7,
                "author": { "login": "contributor", "url": "https://github.com/contributor" },
                "comments": { "totalCount": 2 },
                "assignees": {
                    "totalCount": 1,
                    "edges": [{ "node": { "login": "maintainer", "url": "https://github.com/maintainer" } }]
                },
                "reviews": { "totalCount": 1 },
                "participants": {
                    "totalCount": 2,
                    "edges": [
                        { "node": { "login": "contributor", "url": "https://github.com/contributor" } },
                        { "node": { "login": "maintainer", "url": "https://github.com/maintainer" } }
                    ]
                },
                "reviewRequests": {
                    "totalCount": 3,
                    "edges": [
                        { "node": { "requestedReviewer": {
                            "__typename": "User", "login": "reviewer", "url": "https://github.com/reviewer"
                        } } },
                        { "node": { "requestedReviewer": {
                            "__typename": "Team", "name": "core", "url": "https://github.com/orgs/octo/teams/core"
                        } } },
                        { "node": { "requestedReviewer": {
                            "__typename": "Mannequin", "login": "imported", "url": "https://github.com/imported"
                        } } }
                    ]
                },
                "labels": { "edges": [{ "node": { "name": "enhancement" } }] }
            }
        }
    })
}

/// `data` of the `issues` query with `count` issues numbered from 1.
#[must_use]
pub fn issue_list_data(count: u64) -> Value {
    let nodes: Vec<Value> = (1..=count).map(summary_node).collect();
    json!({ "repository": { "issues": { "nodes": nodes } } })
}

/// `data` of the `pull_requests` query with `count` entries numbered from 1.
#[must_use]
pub fn pull_request_list_data(count: u64) -> Value {
    let nodes: Vec<Value> = (1..=count).map(summary_node).collect();
    json!({ "repository": { "pullRequests": { "nodes": nodes } } })
}

fn summary_node(number: u64) -> Value {
    json!({
        "number": number,
        "title": format!("Item {number}"),
        "url": format!("https://github.com/octo/repo/issues/{number}"),
        "state": "OPEN",
        "createdAt": "2024-01-01T00:00:00Z",
        "author": { "login": "octocat" },
        "comments": { "totalCount": number }
    })
}

/// `data` of the `user_gists` query with one two-file gist.
#[must_use]
pub fn user_gists_data(login: &str) -> Value {
    json!({
        "user": {
            "login": login,
            "url": format!("https://github.com/{login}"),
            "avatarUrl": format!("https://avatars.example/{login}"),
            "gists": {
                "totalCount": 1,
                "nodes": [{
                    "name": "aa5a315d61ae9438b18d",
                    "description": "Snippets",
                    "url": "https://gist.github.com/aa5a315d61ae9438b18d",
                    "createdAt": "2023-06-01T00:00:00Z",
                    "updatedAt": "2023-06-02T00:00:00Z",
                    "stargazerCount": 4,
                    "comments": { "totalCount": 1 },
                    "files": [
                        { "name": "hello.rs", "extension": ".rs",
                          "language": { "name": "Rust", "color": "#dea584" },
                          "text": "fn main() {}" },
                        { "name": "notes", "extension": "", "language": null, "text": "todo" }
                    ]
                }]
            }
        }
    })
}
