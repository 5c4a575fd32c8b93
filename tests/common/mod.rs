use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub fn tagmatter_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tagmatter").unwrap();
    cmd.current_dir(cwd);
    cmd.env_remove("LEETCODE_PROBLEM_DIR");
    cmd.env_remove("OPENAI_API_KEY");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn write_note(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn read_json_list(path: &Path) -> Vec<String> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
