//! Common test utilities and helpers
//!
//! Builds small real repositories with fixed authors and dates so that
//! query results are reproducible.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub const AUTHOR_NAME: &str = "Max Kalyabin";
pub const AUTHOR_EMAIL: &str = "maksim@kalyabin.ru";

/// Commit dates, oldest first, one per fixture commit.
pub const COMMIT_DATES: [&str; 3] = [
    "2016-10-04T22:07:27+03:00",
    "2016-10-04T23:07:27+03:00",
    "2016-10-05T00:07:27+03:00",
];

/// Commit subjects, oldest first.
pub const COMMIT_SUBJECTS: [&str; 3] = ["Initial commit", "Add library", "Update readme"];

/// Run git inside `dir` with an isolated identity and return stdout.
pub fn git(dir: &Path, args: &[&str], date: Option<&str>) -> String {
    let mut cmd = Command::new("git");
    cmd.args(["-c", "commit.gpgsign=false", "-c", "core.autocrlf=false"])
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", AUTHOR_NAME)
        .env("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL)
        .env("GIT_COMMITTER_NAME", AUTHOR_NAME)
        .env("GIT_COMMITTER_EMAIL", AUTHOR_EMAIL);
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
    }

    let output = cmd.output().expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Git repository with three commits on `master` and a remote-tracking
/// branch `origin/feature` pointing at the second one.
///
/// | commit | touches      | subject         |
/// |--------|--------------|-----------------|
/// | 1      | README.md    | Initial commit  |
/// | 2      | src/lib.rs   | Add library     |
/// | 3      | README.md    | Update readme   |
pub struct GitFixture {
    pub dir: TempDir,
    /// Commit hashes, oldest first
    pub commits: Vec<String>,
}

impl GitFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path();

        git(path, &["init", "-q"], None);
        git(path, &["symbolic-ref", "HEAD", "refs/heads/master"], None);

        let files = ["README.md", "src/lib.rs", "README.md"];
        let mut commits = Vec::new();
        for (i, file) in files.iter().enumerate() {
            let file_path = path.join(file);
            std::fs::create_dir_all(file_path.parent().unwrap()).unwrap();
            std::fs::write(&file_path, format!("revision {}\n", i)).unwrap();

            git(path, &["add", file], None);
            git(path, &["commit", "-q", "-m", COMMIT_SUBJECTS[i]], Some(COMMIT_DATES[i]));
            commits.push(git(path, &["rev-parse", "HEAD"], None));
        }

        git(path, &["update-ref", "refs/remotes/origin/feature", &commits[1]], None);

        Self { dir, commits }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Whether `hg` can be run at all.
pub fn hg_available() -> bool {
    Command::new("hg")
        .arg("--version")
        .env("HGPLAIN", "1")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run hg inside `dir` and return stdout.
pub fn hg(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("hg")
        .args(["--config", &format!("ui.username={} <{}>", AUTHOR_NAME, AUTHOR_EMAIL)])
        .args(args)
        .current_dir(dir)
        .env("HGPLAIN", "1")
        .env("HGRCPATH", "")
        .output()
        .expect("Failed to run hg");
    assert!(
        output.status.success(),
        "hg {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Mercurial repository with two commits on `default`.
pub struct HgFixture {
    pub dir: TempDir,
    /// Changeset nodes, oldest first
    pub commits: Vec<String>,
}

impl HgFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path();

        hg(path, &["init"]);

        let mut commits = Vec::new();
        for (i, subject) in COMMIT_SUBJECTS.iter().take(2).enumerate() {
            std::fs::write(path.join(format!("file{}.txt", i)), "content\n").unwrap();
            hg(path, &["add", &format!("file{}.txt", i)]);
            let date = format!("2016-10-0{} 22:07:27 +0300", 4 + i);
            hg(path, &["commit", "-m", subject, "-d", &date]);
            commits.push(hg(path, &["log", "-r", ".", "--template", "{node}"]));
        }

        Self { dir, commits }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
