use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use predicates::function::FnPredicate;
use predicates::prelude::predicate;
use tempfile::TempDir;

pub fn print(message: &str) -> FnPredicate<fn(&str) -> bool, str> {
    println!("{}:", message);
    predicate::function(|content| {
        println!("{}", content);
        true
    })
}

pub fn build_temp_file(temp_dir: &TempDir, base: &str, extension: &str) -> (PathBuf, OsString) {
    let mut path_buf = temp_dir.path().to_path_buf();
    path_buf.push(format!("{}.{}", base, extension));

    let absolute_path = path_buf.clone().into_os_string();
    println!("{} file: {}",
             base.replace('_', " "),
             absolute_path.to_str().unwrap()
    );

    (path_buf, absolute_path)
}

/// Creates `<base>.<extension>` in the temp dir with the given content, e.g. a template symbol or a pin table.
pub fn write_temp_file(temp_dir: &TempDir, base: &str, extension: &str, content: &str) -> (PathBuf, OsString) {
    let (path_buf, absolute_path) = build_temp_file(temp_dir, base, extension);
    fs::write(&path_buf, content).unwrap();

    (path_buf, absolute_path)
}

pub fn build_temp_dir(temp_dir: &TempDir, name: &str) -> (PathBuf, OsString) {
    let mut path_buf = temp_dir.path().to_path_buf();
    path_buf.push(name);
    fs::create_dir_all(&path_buf).unwrap();

    let absolute_path = path_buf.clone().into_os_string();
    println!("{} directory: {}", name.replace('_', " "), absolute_path.to_str().unwrap());

    (path_buf, absolute_path)
}
