use assert_cmd::{Command, cargo_bin_cmd};
use testing::RepositoryRootFixture;

const ENV_KEYS: [&str; 6] = [
    "GITBROKER_REPOSITORIES_FOLDER",
    "GITBROKER_EXPORT_ALL",
    "GITBROKER_NESTED_REPOSITORIES",
    "GITBROKER_CLONE_URL",
    "GITBROKER_DEBUG_MODE",
    "RUST_LOG"
];

fn gitbroker() -> Command {
    let mut cmd = cargo_bin_cmd!("gitbroker");
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd
}

fn gitbroker_in(fixture: &RepositoryRootFixture) -> Command {
    let mut cmd = gitbroker();
    cmd.arg("--repositories").arg(fixture.path());
    cmd
}

mod help_and_version {
    use super::*;
    use predicates::prelude::predicate;

    #[test]
    fn test_help_flag() {
        gitbroker()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("Commands:"))
            .stdout(predicate::str::contains("clone-url"));
    }

    #[test]
    fn test_version_flag() {
        gitbroker()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("gitbroker"));
    }

    #[test]
    fn test_no_args_shows_help() {
        gitbroker()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage:"));
    }

    #[test]
    fn test_edit_help_lists_metadata_flags() {
        gitbroker()
            .args(["edit", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--description"))
            .stdout(predicate::str::contains("--owner"))
            .stdout(predicate::str::contains("--tickets"))
            .stdout(predicate::str::contains("--docs"))
            .stdout(predicate::str::contains("--named-users"));
    }
}

mod repositories {
    use super::*;
    use predicates::prelude::PredicateBooleanExt;
    use predicates::prelude::predicate;

    #[test]
    fn test_list_empty_root() {
        let fixture = RepositoryRootFixture::new();

        gitbroker_in(&fixture)
            .args(["list", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn test_create_then_list_json() {
        let fixture = RepositoryRootFixture::new();

        gitbroker_in(&fixture)
            .args([
                "create",
                "team/app.git",
                "--description",
                "The app",
                "--owner",
                "alice",
                "--tickets",
                "true"
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created team/app.git"));

        let output = gitbroker_in(&fixture)
            .args(["list", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let repos = listed.as_array().unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0]["name"], "team/app.git");
        assert_eq!(repos[0]["description"], "The app");
        assert_eq!(repos[0]["owner"], "alice");
        assert_eq!(repos[0]["features"]["useTickets"], true);
        assert_eq!(repos[0]["features"]["useDocs"], false);
    }

    #[test]
    fn test_edit_keeps_unset_fields() {
        let fixture = RepositoryRootFixture::new();
        gitbroker_in(&fixture)
            .args(["create", "demo.git", "--description", "first", "--owner", "alice"])
            .assert()
            .success();

        gitbroker_in(&fixture)
            .args(["edit", "demo.git", "--owner", "bob", "--docs", "true"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Updated demo.git"));

        gitbroker_in(&fixture)
            .args(["show", "demo.git"])
            .assert()
            .success()
            .stdout(predicate::str::contains("first"))
            .stdout(predicate::str::contains("bob"))
            .stdout(predicate::str::contains("docs"))
            .stdout(predicate::str::contains("alice").not());
    }

    #[test]
    fn test_edit_missing_repository_fails() {
        let fixture = RepositoryRootFixture::new();

        gitbroker_in(&fixture)
            .args(["edit", "ghost", "--owner", "nobody"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
        assert!(!fixture.path().join("ghost").exists());
    }

    #[test]
    fn test_show_missing_repository_fails() {
        let fixture = RepositoryRootFixture::new();

        gitbroker_in(&fixture)
            .args(["show", "nonexistent"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("repository nonexistent not found"));
    }

    #[test]
    fn test_show_unexported_repository_fails() {
        let fixture = RepositoryRootFixture::new();
        fixture.bare("hidden.git");

        gitbroker_in(&fixture)
            .env("GITBROKER_EXPORT_ALL", "false")
            .args(["show", "hidden.git"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not exported"));
    }

    #[test]
    fn test_list_names_sorted() {
        let fixture = RepositoryRootFixture::new();
        fixture.bare("b.git");
        fixture.bare("a.git");
        fixture.working_copy("nested/c");

        gitbroker_in(&fixture)
            .args(["list", "--names"])
            .assert()
            .success()
            .stdout("a.git\nb.git\nnested/c\n");
    }

    #[test]
    fn test_create_rejects_unsafe_name() {
        let fixture = RepositoryRootFixture::new();

        gitbroker_in(&fixture)
            .args(["create", "../escape"])
            .assert()
            .failure();
        assert!(!fixture.path().join("..").join("escape").exists());
    }
}

mod settings {
    use super::*;
    use predicates::prelude::predicate;

    #[test]
    fn test_clone_url_from_config_file() {
        let fixture = RepositoryRootFixture::new();
        let config_dir = tempfile::TempDir::new().unwrap();
        let config_path = config_dir.path().join("gitbroker.toml");
        std::fs::write(
            &config_path,
            format!(
                "[git]\nrepositoriesFolder = \"{}\"\ncloneUrl = \"ssh://git@example.com/\"\n",
                fixture.path().display()
            )
        )
        .unwrap();

        gitbroker()
            .arg("--config")
            .arg(&config_path)
            .args(["clone-url", "demo.git"])
            .assert()
            .success()
            .stdout("ssh://git@example.com/demo.git\n");
    }

    #[test]
    fn test_clone_url_from_environment() {
        let fixture = RepositoryRootFixture::new();

        gitbroker_in(&fixture)
            .env("GITBROKER_CLONE_URL", "https://git.example.org/r/")
            .args(["clone-url", "team/app.git"])
            .assert()
            .success()
            .stdout("https://git.example.org/r/team/app.git\n");
    }

    #[test]
    fn test_blank_repositories_folder_fails_startup() {
        let config_dir = tempfile::TempDir::new().unwrap();
        let config_path = config_dir.path().join("gitbroker.yaml");
        std::fs::write(&config_path, "git:\n  repositoriesFolder: \"\"\n").unwrap();

        gitbroker()
            .arg("--config")
            .arg(&config_path)
            .arg("list")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn test_missing_config_file_fails_startup() {
        gitbroker()
            .args(["--config", "/nonexistent/gitbroker.toml", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("could not start"));
    }

    #[test]
    fn test_repositories_folder_that_is_a_file_fails_startup() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, "").unwrap();

        gitbroker()
            .arg("--repositories")
            .arg(&file)
            .arg("list")
            .assert()
            .failure()
            .stderr(predicate::str::contains("could not start"));
    }
}

mod completion {
    use super::*;
    use predicates::prelude::predicate;

    #[test]
    fn test_bash_completion() {
        gitbroker()
            .args(["completion", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("gitbroker"));
    }

    #[test]
    fn test_completion_needs_no_repositories_folder() {
        gitbroker()
            .args(["--repositories", "/nonexistent/folder", "completion", "zsh"])
            .assert()
            .success();
    }
}
