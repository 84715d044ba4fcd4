use derive_more::Display;
use serde::Serialize;

/// Represents the type of a filesystem node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[display("file")]
    File,
    #[display("directory")]
    Directory,
    #[display("link")]
    Link,
}

/// The subset of a stat result needed to classify an entry.
pub trait NodeStat {
    fn is_dir(&self) -> bool;
    fn is_file(&self) -> bool;
    fn is_symlink(&self) -> bool;
}

impl NodeKind {
    /// Classifies a stat result, testing directory, file and link in that order.
    pub fn classify(stat: &impl NodeStat) -> Option<Self> {
        if stat.is_dir() {
            Some(NodeKind::Directory)
        } else if stat.is_file() {
            Some(NodeKind::File)
        } else if stat.is_symlink() {
            Some(NodeKind::Link)
        } else {
            None
        }
    }
}

impl NodeStat for std::fs::Metadata {
    fn is_dir(&self) -> bool {
        std::fs::Metadata::is_dir(self)
    }

    fn is_file(&self) -> bool {
        std::fs::Metadata::is_file(self)
    }

    fn is_symlink(&self) -> bool {
        std::fs::Metadata::is_symlink(self)
    }
}

#[cfg(unix)]
impl NodeStat for compio::fs::Metadata {
    fn is_dir(&self) -> bool {
        compio::fs::Metadata::is_dir(self)
    }

    fn is_file(&self) -> bool {
        compio::fs::Metadata::is_file(self)
    }

    fn is_symlink(&self) -> bool {
        compio::fs::Metadata::is_symlink(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    struct FakeStat {
        dir: bool,
        file: bool,
        symlink: bool,
    }

    impl NodeStat for FakeStat {
        fn is_dir(&self) -> bool {
            self.dir
        }

        fn is_file(&self) -> bool {
            self.file
        }

        fn is_symlink(&self) -> bool {
            self.symlink
        }
    }

    #[rstest]
    #[case(true, false, false, Some(NodeKind::Directory))]
    #[case(false, true, false, Some(NodeKind::File))]
    #[case(false, false, true, Some(NodeKind::Link))]
    #[case(true, true, true, Some(NodeKind::Directory))]
    #[case(false, true, true, Some(NodeKind::File))]
    #[case(false, false, false, None)]
    fn classify_checks_directory_then_file_then_link(
        #[case] dir: bool,
        #[case] file: bool,
        #[case] symlink: bool,
        #[case] expected: Option<NodeKind>,
    ) {
        let stat = FakeStat { dir, file, symlink };
        assert_eq!(NodeKind::classify(&stat), expected);
    }

    #[test]
    fn kinds_display_in_lowercase() {
        assert_eq!(NodeKind::File.to_string(), "file");
        assert_eq!(NodeKind::Directory.to_string(), "directory");
        assert_eq!(NodeKind::Link.to_string(), "link");
    }

    #[test]
    fn classify_std_metadata_of_temp_entries() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("file.txt");
        std::fs::write(&file_path, "content").expect("Failed to write temp file");

        let dir_stat = std::fs::metadata(temp_dir.path()).expect("Failed to stat dir");
        let file_stat = std::fs::metadata(&file_path).expect("Failed to stat file");

        assert_eq!(NodeKind::classify(&dir_stat), Some(NodeKind::Directory));
        assert_eq!(NodeKind::classify(&file_stat), Some(NodeKind::File));
    }
}
