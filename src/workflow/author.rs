use tracing::{debug, instrument, warn};

use crate::github::{CommitAuthor, GitHub, GitHubError};
use crate::issue::{Author, Info};

/// Look up the issue author's profile, fill in `info.author` when the issue did
/// not supply one, and return the identity to commit as.
///
/// An explicit `author` block in the metadata is never touched. The commit
/// email is always the issue author's noreply address, whatever the override says.
#[instrument(skip(gh, info, noreply_host))]
pub async fn resolve(
    gh: &dyn GitHub,
    login: &str,
    info: &mut Info,
    noreply_host: &str,
) -> Result<CommitAuthor, GitHubError> {
    let profile = gh.get_user(login).await?;
    if profile.is_none() {
        warn!("issue author has no public profile");
    }
    let display_name = profile.as_ref().and_then(|p| p.name.clone());

    if info.author.is_none() {
        info.author = Some(Author {
            github: Some(login.to_string()),
            name: display_name.clone(),
            email: None,
        });
    } else {
        debug!("keeping author override from metadata");
    }

    let email = match &profile {
        Some(p) => format!("{}+{}@{}", p.id, p.login, noreply_host),
        None => format!("{login}@{noreply_host}"),
    };

    Ok(CommitAuthor {
        name: display_name.unwrap_or_else(|| login.to_string()),
        email,
    })
}
