//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use gitbot::github::models::{Account, RepositorySummary};
use gitbot::github::{Issue, LatestRelease, PullRequest, Repository, User, UserGists};
use gitbot::{ApiError, ArchiveProbe, GhProfileStats, Lookup, RateLimitReport};

/// Writes the rate limit of every credential.
pub fn write_rate_limits<W: Write>(
    writer: &mut W,
    report: &RateLimitReport,
) -> Result<(), ApiError> {
    writeln!(
        writer,
        "Rate limits for {} token(s), {} requests left:",
        report.token_count,
        report.total_remaining()
    )
    .map_err(|e| io_error(&e))?;

    for (index, info) in report.per_token.iter().enumerate() {
        writeln!(
            writer,
            "  token {}: {}/{} remaining, resets in {}s",
            index.saturating_add(1),
            info.remaining(),
            info.limit(),
            info.seconds_until_reset()
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes an issue or the reason it could not be shown.
pub fn write_issue<W: Write>(writer: &mut W, lookup: &Lookup<Issue>) -> Result<(), ApiError> {
    let issue = match lookup {
        Lookup::Found(issue) => issue,
        Lookup::InvalidNumber => return write_line(writer, "Issue number not found."),
        Lookup::InvalidRepository => return write_line(writer, REPOSITORY_NOT_FOUND),
    };
    let author = issue
        .author
        .as_ref()
        .map_or("ghost", |author| author.login.as_str());

    writeln!(
        writer,
        "Issue #{} [{}] {}\nURL: {}\nOpened by @{author} on {}\nComments: {}, participants: {}, assignees: {}",
        issue.number,
        issue.state,
        issue.title,
        issue.url,
        issue.created_at.format("%Y-%m-%d"),
        issue.comment_count,
        issue.participant_count,
        issue.assignee_count
    )
    .map_err(|e| io_error(&e))?;
    write_labels(writer, &issue.labels)
}

/// Writes a pull request or the reason it could not be shown.
pub fn write_pull_request<W: Write>(
    writer: &mut W,
    lookup: &Lookup<PullRequest>,
) -> Result<(), ApiError> {
    let pull = match lookup {
        Lookup::Found(pull) => pull,
        Lookup::InvalidNumber => return write_line(writer, "Pull request number not found."),
        Lookup::InvalidRepository => return write_line(writer, REPOSITORY_NOT_FOUND),
    };
    let author = pull
        .author
        .as_ref()
        .map_or("ghost", |author| author.login.as_str());

    writeln!(
        writer,
        "Pull request #{} [{}] {}\nURL: {}\nOpened by @{author} on {}\nChanges: +{} -{} in {} file(s), {} commit(s)",
        pull.number,
        pull.state,
        pull.title,
        pull.url,
        pull.created_at.format("%Y-%m-%d"),
        pull.additions,
        pull.deletions,
        pull.changed_files,
        pull.commit_count
    )
    .map_err(|e| io_error(&e))?;

    let reviewers: Vec<&str> = pull
        .reviewers
        .identities
        .iter()
        .map(|identity| identity.as_pair().0)
        .collect();
    if !reviewers.is_empty() {
        writeln!(writer, "Reviewers: {}", reviewers.join(", ")).map_err(|e| io_error(&e))?;
    }
    write_labels(writer, &pull.labels)
}

/// Writes the newest release of a repository.
pub fn write_latest_release<W: Write>(
    writer: &mut W,
    release: Option<&LatestRelease>,
) -> Result<(), ApiError> {
    let Some(latest) = release else {
        return write_line(writer, REPOSITORY_NOT_FOUND);
    };
    match &latest.release {
        Some(release) => writeln!(
            writer,
            "{}: {} ({})\nURL: {}\nReleases: {}",
            latest.name_with_owner,
            release.tag_name,
            release.name.as_deref().unwrap_or("untitled"),
            release.url,
            latest.release_count
        ),
        None => writeln!(writer, "{} has no releases.", latest.name_with_owner),
    }
    .map_err(|e| io_error(&e))
}

/// Writes the answer for a repository that does not exist.
pub fn write_missing_repository<W: Write>(writer: &mut W) -> Result<(), ApiError> {
    write_line(writer, REPOSITORY_NOT_FOUND)
}

/// Writes repository details together with the archive probe outcome.
pub fn write_repository<W: Write>(
    writer: &mut W,
    repo: &Repository,
    archive: &ArchiveProbe,
) -> Result<(), ApiError> {
    writeln!(
        writer,
        "{} ({})\n{}\nURL: {}\nStars: {}, forks: {}, watchers: {}, open issues: {}, open PRs: {}",
        repo.name_with_owner,
        repo.language.as_deref().unwrap_or("no language"),
        repo.description.as_deref().unwrap_or("No description."),
        repo.url,
        repo.stargazer_count,
        repo.fork_count,
        repo.watcher_count,
        repo.open_issue_count,
        repo.open_pull_request_count
    )
    .map_err(|e| io_error(&e))?;

    if let Some(release) = &repo.release {
        writeln!(writer, "Latest release: {release}").map_err(|e| io_error(&e))?;
    }
    let (topics, topic_count) = &repo.topics;
    if *topic_count > 0 {
        writeln!(writer, "Topics ({topic_count}): {}", topics.join(", "))
            .map_err(|e| io_error(&e))?;
    }

    let archive_line = match archive {
        ArchiveProbe::NotFound => "Archive: unavailable".to_owned(),
        ArchiveProbe::WithinLimit => "Archive: fits the attachment limit".to_owned(),
        ArchiveProbe::Oversized(prefix) => {
            format!("Archive: too large, first {} bytes read", prefix.len())
        }
    };
    write_line(writer, &archive_line)
}

/// Writes a user profile and, when available, its view statistics.
pub fn write_user<W: Write>(
    writer: &mut W,
    user: Option<&User>,
    stats: Option<&GhProfileStats>,
) -> Result<(), ApiError> {
    let Some(profile) = user else {
        return write_line(writer, "User not found.");
    };
    let (total, last_day) = profile.contributions;

    writeln!(
        writer,
        "{} ({})\nURL: {}\nRepositories: {}, organizations: {}, followers: {}, following: {}\nContributions this year: {total}, latest day: {last_day}",
        profile.login,
        profile.name.as_deref().unwrap_or("no name"),
        profile.url,
        profile.public_repos,
        profile.organizations,
        profile.followers,
        profile.following
    )
    .map_err(|e| io_error(&e))?;

    if let Some(views) = stats {
        writeln!(
            writer,
            "Profile views: {} all time, {} this month, {} this week, {} today",
            views.all_time, views.month, views.week, views.day
        )
        .map_err(|e| io_error(&e))?;
        for (period, count) in &views.extra {
            writeln!(writer, "Profile views ({period}): {count}").map_err(|e| io_error(&e))?;
        }
    }
    Ok(())
}

/// Writes the gists of a user.
pub fn write_user_gists<W: Write>(
    writer: &mut W,
    gists: Option<&UserGists>,
) -> Result<(), ApiError> {
    let Some(listing) = gists else {
        return write_line(writer, "User not found.");
    };

    writeln!(
        writer,
        "Gists of {} ({} total):",
        listing.login, listing.total_count
    )
    .map_err(|e| io_error(&e))?;
    for gist in &listing.gists {
        writeln!(
            writer,
            "  {} {} ({} file(s), {} stars)",
            gist.name,
            gist.description.as_deref().unwrap_or("(no description)"),
            gist.files.len(),
            gist.stargazer_count
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes an organization and its public repositories.
pub fn write_organization<W: Write>(
    writer: &mut W,
    account: Option<&Account>,
    repos: &[RepositorySummary],
) -> Result<(), ApiError> {
    let Some(org) = account else {
        return write_line(writer, "Organization not found.");
    };

    writeln!(
        writer,
        "{} ({})\nURL: {}\nPublic repositories:",
        org.login,
        org.name.as_deref().unwrap_or("no name"),
        org.html_url
    )
    .map_err(|e| io_error(&e))?;
    for repo in repos {
        writeln!(
            writer,
            "  {} ({} stars)",
            repo.full_name, repo.stargazers_count
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes usage guidance when no selector was given.
pub fn write_idle_hint<W: Write>(writer: &mut W) -> Result<(), ApiError> {
    write_line(
        writer,
        "Nothing to look up. Pass --repo, --user, --org or --ratelimit.",
    )
}

const REPOSITORY_NOT_FOUND: &str = "Repository not found.";

fn write_labels<W: Write>(writer: &mut W, labels: &[String]) -> Result<(), ApiError> {
    if labels.is_empty() {
        return Ok(());
    }
    writeln!(writer, "Labels: {}", labels.join(", ")).map_err(|e| io_error(&e))
}

fn write_line<W: Write>(writer: &mut W, text: &str) -> Result<(), ApiError> {
    writeln!(writer, "{text}").map_err(|e| io_error(&e))
}

fn io_error(error: &io::Error) -> ApiError {
    ApiError::Io {
        message: error.to_string(),
    }
}
