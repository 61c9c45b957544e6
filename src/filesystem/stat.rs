/// Snapshot of a node's kind taken when `stat` was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    file: bool,
    directory: bool,
}

impl Stat {
    pub(crate) fn new(file: bool, directory: bool) -> Self {
        Self { file, directory }
    }

    pub fn is_file(&self) -> bool {
        self.file
    }

    pub fn is_directory(&self) -> bool {
        self.directory
    }
}
