use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;

pub trait PathExt {
    /// Absolute form of the path without touching the filesystem.
    fn to_absolute(&self) -> io::Result<PathBuf>;
    /// True if the file name matches `pattern`.
    fn file_name_matches(&self, pattern: &Regex) -> bool;
}

impl PathExt for Path {
    fn to_absolute(&self) -> io::Result<PathBuf> {
        std::path::absolute(self)
    }

    fn file_name_matches(&self, pattern: &Regex) -> bool {
        self.file_name()
            .map(|name| pattern.is_match(&name.to_string_lossy()))
            .unwrap_or(false)
    }
}

/// Expand `~`, `$VAR` and `${VAR}`; the input is returned unchanged when
/// expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Translate a filename glob (`*`, `?`) into an anchored regex.
pub fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut re = String::from("^");
    for c in glob.chars() {
        match c {
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*.html", "index.html", true)]
    #[case("*.html", "index.htm", false)]
    #[case("*.html", "index.html.bak", false)]
    #[case("page?.tmpl", "page1.tmpl", true)]
    #[case("page?.tmpl", "page12.tmpl", false)]
    #[case("a+b.html", "a+b.html", true)]
    fn test_glob_to_regex(#[case] glob: &str, #[case] name: &str, #[case] expected: bool) {
        let re = glob_to_regex(glob).unwrap();
        assert_eq!(Path::new(name).file_name_matches(&re), expected);
    }

    #[test]
    fn given_relative_path_when_absolutizing_then_joins_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(Path::new("templates").to_absolute().unwrap(), cwd.join("templates"));
    }

    #[test]
    fn given_empty_path_when_absolutizing_then_errors() {
        assert!(Path::new("").to_absolute().is_err());
    }
}
