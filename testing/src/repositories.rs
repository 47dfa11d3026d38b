use config::{StoredSettings, keys};
use git2::{Repository, RepositoryInitOptions, Signature, Time};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary repositories folder, removed on drop.
pub struct RepositoryRootFixture {
    dir: TempDir
}

impl Default for RepositoryRootFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryRootFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp repositories folder")
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Settings pointing the broker at this folder, everything else default.
    pub fn settings(&self) -> StoredSettings {
        StoredSettings::new(format!("fixture:{}", self.path().display()))
            .with(keys::git::REPOSITORIES_FOLDER, self.path().display().to_string())
    }

    pub fn bare(&self, name: &str) -> Repository {
        self.init(name, true)
    }

    pub fn working_copy(&self, name: &str) -> Repository {
        self.init(name, false)
    }

    fn init(&self, name: &str, bare: bool) -> Repository {
        let mut opts = RepositoryInitOptions::new();
        opts.bare(bare).mkpath(true);
        Repository::init_opts(self.path().join(name), &opts).expect("init fixture repository")
    }

    fn git_dir(&self, name: &str) -> PathBuf {
        let path = self.path().join(name);
        let dot_git = path.join(".git");
        if dot_git.is_dir() { dot_git } else { path }
    }

    /// Drops the export marker into repository `name`.
    pub fn export(&self, name: &str) {
        std::fs::write(self.git_dir(name).join("git-daemon-export-ok"), "")
            .expect("write export marker");
    }

    /// Commits a single `README` holding `message` on HEAD, authored at
    /// `seconds` since the epoch.
    pub fn commit_at(&self, name: &str, message: &str, seconds: i64) {
        let repo = Repository::open(self.path().join(name)).expect("open fixture repository");
        let signature = Signature::new("Fixture", "fixture@example.com", &Time::new(seconds, 0))
            .expect("fixture signature");

        let blob = repo.blob(message.as_bytes()).expect("write blob");
        let mut builder = repo.treebuilder(None).expect("tree builder");
        builder.insert("README", blob, 0o100_644).expect("insert README");
        let tree = repo
            .find_tree(builder.write().expect("write tree"))
            .expect("find tree");

        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .expect("commit");
    }

    /// Removes repository `name` from disk.
    pub fn remove(&self, name: &str) {
        std::fs::remove_dir_all(self.path().join(name)).expect("remove fixture repository");
    }
}
