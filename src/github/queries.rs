//! GraphQL query templates loaded from disk.
//!
//! Each `.gql` or `.graphql` file in the query directory becomes one template
//! addressable by its base file name (`repo.graphql` → `repo`). The directory
//! is read once, when the store is built, so a misconfigured path fails at
//! startup rather than on the first lookup.

use std::collections::BTreeMap;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::error::ApiError;

/// File extensions recognised as GraphQL templates.
pub const QUERY_EXTENSIONS: [&str; 2] = ["gql", "graphql"];

/// Logical names the access layer requires at startup.
pub const REQUIRED_QUERIES: [&str; 8] = [
    "user",
    "repo",
    "issue",
    "pull_request",
    "pull_requests",
    "issues",
    "release",
    "user_gists",
];

/// Named, immutable GraphQL query templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStore {
    queries: BTreeMap<String, String>,
}

impl QueryStore {
    /// Reads every template in `directory`.
    ///
    /// Files with other extensions and sub-directories are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::QueryDirectory`] when the directory cannot be
    /// opened or listed, or when a template cannot be read.
    pub fn load(directory: &Utf8Path) -> Result<Self, ApiError> {
        let dir = Dir::open_ambient_dir(directory, ambient_authority())
            .map_err(|error| directory_error(directory, &error))?;

        let mut queries = BTreeMap::new();
        for entry_result in dir
            .entries()
            .map_err(|error| directory_error(directory, &error))?
        {
            let entry = entry_result.map_err(|error| directory_error(directory, &error))?;
            let Ok(file_name) = entry.file_name() else {
                continue;
            };
            let Some(name) = template_name(&file_name) else {
                continue;
            };
            if entry.file_type().is_ok_and(|file_type| file_type.is_dir()) {
                continue;
            }

            let text = dir
                .read_to_string(&file_name)
                .map_err(|error| ApiError::QueryDirectory {
                    path: directory.join(&file_name).to_string(),
                    message: error.to_string(),
                })?;
            queries.insert(name.to_owned(), text);
        }

        tracing::debug!("loaded {} GraphQL templates from '{directory}'", queries.len());
        Ok(Self { queries })
    }

    /// Builds a store from in-memory templates.
    pub fn from_templates<I, K, V>(templates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            queries: templates
                .into_iter()
                .map(|(name, text)| (name.into(), text.into()))
                .collect(),
        }
    }

    /// Returns the template called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingQuery`] when no such template was loaded.
    pub fn get(&self, name: &str) -> Result<&str, ApiError> {
        self.queries
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ApiError::MissingQuery {
                name: name.to_owned(),
            })
    }

    /// Checks that every name in `names` is present.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingQuery`] for the first absent name.
    pub fn require(&self, names: &[&str]) -> Result<(), ApiError> {
        names.iter().try_for_each(|name| self.get(name).map(|_| ()))
    }

    /// Template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }

    /// Number of loaded templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns true when no template was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

fn template_name(file_name: &str) -> Option<&str> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() || !QUERY_EXTENSIONS.contains(&extension) {
        return None;
    }
    Some(stem)
}

fn directory_error(directory: &Utf8Path, error: &std::io::Error) -> ApiError {
    ApiError::QueryDirectory {
        path: directory.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use camino::{Utf8Path, Utf8PathBuf};
    use rstest::rstest;
    use tempfile::TempDir;

    use super::{QueryStore, REQUIRED_QUERIES, template_name};
    use crate::github::error::ApiError;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn utf8_dir(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("temp path should be UTF-8")
    }

    #[rstest]
    #[case("repo.graphql", Some("repo"))]
    #[case("user_gists.gql", Some("user_gists"))]
    #[case("notes.txt", None)]
    #[case("README", None)]
    #[case(".graphql", None)]
    fn recognises_template_file_names(#[case] file_name: &str, #[case] expected: Option<&str>) {
        assert_eq!(template_name(file_name), expected);
    }

    #[rstest]
    fn loads_templates_by_base_name() -> TestResult {
        let temp = TempDir::new()?;
        std::fs::write(temp.path().join("repo.graphql"), "query { viewer { login } }")?;
        std::fs::write(temp.path().join("user.gql"), "query { user }")?;
        std::fs::write(temp.path().join("notes.md"), "ignored")?;
        std::fs::create_dir(temp.path().join("nested.graphql"))?;

        let store = QueryStore::load(&utf8_dir(&temp))?;

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("repo")?, "query { viewer { login } }");
        assert_eq!(store.get("user")?, "query { user }");
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["repo", "user"]);
        Ok(())
    }

    #[rstest]
    fn missing_directory_fails_at_load() {
        let result = QueryStore::load(Utf8Path::new("/definitely/not/a/query/dir"));
        assert!(
            matches!(result, Err(ApiError::QueryDirectory { .. })),
            "expected QueryDirectory, got {result:?}"
        );
    }

    #[rstest]
    fn unknown_name_is_reported() {
        let store = QueryStore::from_templates([("repo", "query {}")]);
        assert_eq!(
            store.get("issue"),
            Err(ApiError::MissingQuery {
                name: "issue".to_owned()
            })
        );
        assert!(store.require(&["repo"]).is_ok());
        assert!(store.require(&["repo", "issue"]).is_err());
    }

    #[rstest]
    fn bundled_queries_cover_required_names() -> TestResult {
        let directory = Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("queries");
        let store = QueryStore::load(&directory)?;

        store.require(&REQUIRED_QUERIES)?;
        Ok(())
    }
}
