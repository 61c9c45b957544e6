use snafu::{OptionExt, ensure};
use tracing::debug;

use crate::filesystem::error::{
    IsADirectorySnafu, NotADirectorySnafu, NotEmptySnafu, NotFoundSnafu, NotPermittedSnafu,
};
use crate::filesystem::path::{SplitPath, segments};
use crate::filesystem::{File, FileSystemError, Node, NodeId, NodeKind, Stat, Tree};

pub type Result<T, E = FileSystemError> = std::result::Result<T, E>;

/// Path-addressed operations over a private [`Tree`].
///
/// Every operation either succeeds completely or fails without changing the tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    tree: Tree,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// Creates a directory, replacing whatever is stored under the final segment.
    pub fn mkdir(&mut self, path: &str) -> Result<NodeId> {
        let split = SplitPath::new(path);
        let base = split.base.context(NotPermittedSnafu { path })?;
        let parent = self.tree.resolve(&split.parent).context(NotFoundSnafu { path })?;
        let id = self
            .tree
            .attach(parent, base, NodeKind::empty_directory())
            .context(NotADirectorySnafu { path })?;
        debug!("Created directory {}", path);
        Ok(id)
    }

    /// Creates every missing directory along `path`, leaving existing ones untouched.
    pub fn mkdirp(&mut self, path: &str) -> Result<NodeId> {
        let root = self.tree.root();
        segments(path)
            .into_iter()
            .try_fold(root, |current, segment| {
                match self.tree.child(current, segment) {
                    Some(child) if self.tree.is_directory(child) => Ok(child),
                    Some(_) => NotADirectorySnafu { path }.fail(),
                    None => {
                        debug!("Creating missing directory {} in {}", segment, path);
                        self.tree
                            .attach(current, segment, NodeKind::empty_directory())
                            .context(NotADirectorySnafu { path })
                    }
                }
            })
    }

    /// Creates an empty file, replacing whatever is stored under the final segment.
    pub fn touch(&mut self, path: &str) -> Result<NodeId> {
        let split = SplitPath::new(path);
        let base = split.base.context(IsADirectorySnafu { path })?;
        let parent = self.tree.resolve(&split.parent).context(NotFoundSnafu { path })?;
        let id = self
            .tree
            .attach(parent, base, NodeKind::empty_file())
            .context(NotADirectorySnafu { path })?;
        debug!("Touched {}", path);
        Ok(id)
    }

    /// Writes `content` to a new file or replaces the content of an existing one.
    ///
    /// An existing file keeps its handle and its position among its siblings.
    pub fn write_file(&mut self, path: &str, content: impl Into<String>) -> Result<()> {
        let split = SplitPath::new(path);
        let base = split.base.context(IsADirectorySnafu { path })?;
        let parent = self.tree.resolve(&split.parent).context(NotFoundSnafu { path })?;

        match self.tree.child(parent, base) {
            Some(existing) => {
                let file = self
                    .tree
                    .get_mut(existing)
                    .and_then(Node::as_file_mut)
                    .context(IsADirectorySnafu { path })?;
                file.set_content(content);
            }
            None => {
                self.tree
                    .attach(parent, base, NodeKind::File(File::new(content)))
                    .context(NotADirectorySnafu { path })?;
            }
        }
        debug!("Wrote {}", path);
        Ok(())
    }

    pub fn read_file(&self, path: &str) -> Result<&str> {
        let id = self.resolve(path).context(NotFoundSnafu { path })?;
        let file = self
            .tree
            .get(id)
            .and_then(Node::as_file)
            .context(IsADirectorySnafu { path })?;
        Ok(file.content())
    }

    /// Names of the entries of a directory, in the order they were inserted.
    pub fn readdir(&self, path: &str) -> Result<Vec<String>> {
        let id = self.resolve(path).context(NotFoundSnafu { path })?;
        let directory = self
            .tree
            .directory(id)
            .context(NotADirectorySnafu { path })?;
        Ok(directory.child_names())
    }

    pub fn stat(&self, path: &str) -> Result<Stat> {
        let id = self.resolve(path).context(NotFoundSnafu { path })?;
        let node = self.tree.get(id).context(NotFoundSnafu { path })?;
        Ok(node.stat())
    }

    pub fn unlink(&mut self, path: &str) -> Result<()> {
        let id = self.resolve(path).context(NotFoundSnafu { path })?;
        ensure!(!self.tree.is_directory(id), NotPermittedSnafu { path });
        self.detach(id, path)?;
        debug!("Unlinked {}", path);
        Ok(())
    }

    /// Removes an empty directory. The root is never removed.
    pub fn rmdir(&mut self, path: &str) -> Result<()> {
        let id = self.resolve(path).context(NotFoundSnafu { path })?;
        let directory = self
            .tree
            .directory(id)
            .context(NotADirectorySnafu { path })?;
        ensure!(!directory.has_children(), NotEmptySnafu { path });
        ensure!(id != self.tree.root(), NotPermittedSnafu { path });
        self.detach(id, path)?;
        debug!("Removed directory {}", path);
        Ok(())
    }

    /// Creates an empty file for `src` at `dest`.
    ///
    /// When `dest` is an existing directory the new file is named after `src`
    /// and placed inside it, otherwise it is created at `dest` itself. The
    /// content of `src` is not carried over.
    pub fn copy(&mut self, src: &str, dest: &str) -> Result<NodeId> {
        let source = self.resolve(src).context(NotFoundSnafu { path: src })?;
        let source = self.tree.get(source).context(NotFoundSnafu { path: src })?;
        ensure!(!source.is_directory(), IsADirectorySnafu { path: src });
        let source_name = source.name().to_string();

        let split = SplitPath::new(dest);
        let dest_parent = self
            .tree
            .resolve(&split.parent)
            .filter(|parent| !self.tree.is_file(*parent))
            .context(NotFoundSnafu { path: dest })?;

        let (parent, name) = match self.resolve(dest) {
            Some(target) if self.tree.is_directory(target) => (target, source_name.as_str()),
            _ => (dest_parent, split.base.context(IsADirectorySnafu { path: dest })?),
        };
        let id = self
            .tree
            .attach(parent, name, NodeKind::empty_file())
            .context(NotADirectorySnafu { path: dest })?;
        debug!("Copied {} to {}", src, dest);
        Ok(id)
    }

    /// Moves the node at `src` to `dest`, keeping its handle and payload.
    ///
    /// An existing destination is replaced when the kinds are compatible: a
    /// file may replace a file, a directory may replace an empty directory.
    pub fn rename(&mut self, src: &str, dest: &str) -> Result<NodeId> {
        let source = self.resolve(src).context(NotFoundSnafu { path: src })?;
        ensure!(source != self.tree.root(), NotPermittedSnafu { path: src });

        let split = SplitPath::new(dest);
        let base = split.base.context(NotPermittedSnafu { path: dest })?;
        let parent = self
            .tree
            .resolve(&split.parent)
            .context(NotFoundSnafu { path: dest })?;
        ensure!(
            self.tree.is_directory(parent),
            NotADirectorySnafu { path: dest }
        );
        ensure!(
            !self.tree.is_ancestor(source, parent),
            NotPermittedSnafu { path: dest }
        );

        if let Some(existing) = self.tree.child(parent, base) {
            if existing == source {
                return Ok(source);
            }
            let source_is_directory = self.tree.is_directory(source);
            match self.tree.directory(existing) {
                Some(_) if !source_is_directory => {
                    return IsADirectorySnafu { path: dest }.fail();
                }
                Some(directory) => {
                    ensure!(!directory.has_children(), NotEmptySnafu { path: dest });
                }
                None => {
                    ensure!(!source_is_directory, NotADirectorySnafu { path: dest });
                }
            }
        }

        ensure!(
            self.tree.relink(source, parent, base),
            NotPermittedSnafu { path: dest }
        );
        debug!("Renamed {} to {}", src, dest);
        Ok(source)
    }

    fn resolve(&self, path: &str) -> Option<NodeId> {
        self.tree.resolve(&segments(path))
    }

    fn detach(&mut self, id: NodeId, path: &str) -> Result<()> {
        let node = self.tree.get(id).context(NotFoundSnafu { path })?;
        let parent = node.parent().context(NotPermittedSnafu { path })?;
        let name = node.name().to_string();
        ensure!(self.tree.detach(parent, &name), NotFoundSnafu { path });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::ErrorCode;
    use rstest::*;

    /// `/etc/nginx/{conf.d/, nginx.conf}` and `/opt/file.txt`.
    #[fixture]
    fn fs() -> MemoryFs {
        let mut fs = MemoryFs::new();
        fs.mkdirp("/etc/nginx").unwrap();
        fs.mkdir("/opt").unwrap();
        fs.touch("/opt/file.txt").unwrap();
        fs.mkdirp("/etc/nginx/conf.d").unwrap();
        fs.write_file("/etc/nginx/nginx.conf", "directives").unwrap();
        fs
    }

    fn code<T: std::fmt::Debug>(result: Result<T>) -> ErrorCode {
        result.expect_err("operation should fail").code()
    }

    #[rstest]
    #[case("/never/created")]
    #[case("/etc/nginx/missing")]
    #[case("/opt/file.txt/inner")]
    fn operations_on_missing_paths_fail_with_enoent(mut fs: MemoryFs, #[case] path: &str) {
        assert_eq!(code(fs.stat(path)), ErrorCode::Enoent);
        assert_eq!(code(fs.read_file(path)), ErrorCode::Enoent);
        assert_eq!(code(fs.readdir(path)), ErrorCode::Enoent);
        assert_eq!(code(fs.unlink(path)), ErrorCode::Enoent);
        assert_eq!(code(fs.rmdir(path)), ErrorCode::Enoent);
    }

    #[rstest]
    fn mkdir_requires_existing_directory_parent(mut fs: MemoryFs) {
        assert_eq!(
            code(fs.mkdir("/etc/nginx/nginx.conf/wrong")),
            ErrorCode::Enotdir
        );
        assert_eq!(code(fs.mkdir("/opt/folder/inner")), ErrorCode::Enoent);
        assert!(fs.stat("/opt").unwrap().is_directory());
    }

    #[rstest]
    fn mkdir_replaces_an_existing_entry(mut fs: MemoryFs) {
        fs.mkdir("/etc/nginx").unwrap();
        assert!(fs.readdir("/etc/nginx").unwrap().is_empty());
        assert_eq!(fs.readdir("/etc").unwrap(), vec!["nginx"]);
    }

    #[rstest]
    fn mkdirp_fails_on_a_file_segment(mut fs: MemoryFs) {
        let error = fs.mkdirp("/etc/nginx/nginx.conf/wrong").unwrap_err();
        assert_eq!(error.code(), ErrorCode::Enotdir);
        assert_eq!(error.path(), "/etc/nginx/nginx.conf/wrong");
    }

    #[rstest]
    fn mkdirp_is_idempotent(mut fs: MemoryFs) {
        let nodes_before = fs.tree().node_count();
        let first = fs.mkdirp("/var/log/nginx").unwrap();
        let nodes_after_first = fs.tree().node_count();
        let second = fs.mkdirp("/var/log/nginx").unwrap();

        assert_eq!(first, second);
        assert_eq!(nodes_after_first, nodes_before + 3);
        assert_eq!(fs.tree().node_count(), nodes_after_first);
        assert_eq!(fs.readdir("/var/log").unwrap(), vec!["nginx"]);
    }

    #[rstest]
    fn mkdirp_keeps_existing_directories(mut fs: MemoryFs) {
        fs.mkdirp("/etc/nginx/sites").unwrap();
        assert_eq!(
            fs.readdir("/etc/nginx").unwrap(),
            vec!["conf.d", "nginx.conf", "sites"]
        );
        assert_eq!(fs.read_file("/etc/nginx/nginx.conf").unwrap(), "directives");
    }

    #[rstest]
    fn mkdirp_on_root_returns_root(mut fs: MemoryFs) {
        assert_eq!(fs.mkdirp("/").unwrap(), fs.tree().root());
    }

    #[rstest]
    fn touch_requires_existing_directory_parent(mut fs: MemoryFs) {
        assert_eq!(
            code(fs.touch("/etc/nginx/nginx.conf/wrong")),
            ErrorCode::Enotdir
        );
        assert_eq!(code(fs.touch("/opt/folder/inner")), ErrorCode::Enoent);
        assert!(fs.stat("/opt/file.txt").unwrap().is_file());
    }

    #[rstest]
    fn touch_overwrites_entries_of_either_kind(mut fs: MemoryFs) {
        fs.touch("/etc/nginx/nginx.conf").unwrap();
        assert_eq!(fs.read_file("/etc/nginx/nginx.conf").unwrap(), "");

        fs.touch("/etc/nginx/conf.d").unwrap();
        assert!(fs.stat("/etc/nginx/conf.d").unwrap().is_file());
        assert_eq!(
            fs.readdir("/etc/nginx").unwrap(),
            vec!["conf.d", "nginx.conf"]
        );
    }

    #[rstest]
    fn write_file_errors(mut fs: MemoryFs) {
        assert_eq!(
            code(fs.write_file("/etc/unknown/file", "body")),
            ErrorCode::Enoent
        );
        assert_eq!(code(fs.write_file("/etc", "body")), ErrorCode::Eisdir);
        assert_eq!(code(fs.write_file("/", "body")), ErrorCode::Eisdir);
    }

    #[rstest]
    fn write_file_under_a_file_fails_with_enotdir(mut fs: MemoryFs) {
        let nodes_before = fs.tree().node_count();
        let error = fs.write_file("/opt/file.txt/inner", "body").unwrap_err();

        assert_eq!(error.code(), ErrorCode::Enotdir);
        assert_eq!(error.path(), "/opt/file.txt/inner");
        assert_eq!(fs.tree().node_count(), nodes_before);
        assert_eq!(fs.read_file("/opt/file.txt").unwrap(), "");
    }

    #[rstest]
    fn write_file_round_trips(mut fs: MemoryFs) {
        fs.write_file("/opt/notes.md", "x").unwrap();
        assert_eq!(fs.read_file("/opt/notes.md").unwrap(), "x");
    }

    #[rstest]
    fn rewriting_keeps_identity_and_position(mut fs: MemoryFs) {
        let before = fs.tree().resolve(&["etc", "nginx", "nginx.conf"]);
        fs.write_file("/etc/nginx/nginx.conf", "x").unwrap();
        fs.write_file("/etc/nginx/nginx.conf", "y").unwrap();

        assert_eq!(fs.read_file("/etc/nginx/nginx.conf").unwrap(), "y");
        assert_eq!(fs.tree().resolve(&["etc", "nginx", "nginx.conf"]), before);
        assert_eq!(
            fs.readdir("/etc/nginx").unwrap(),
            vec!["conf.d", "nginx.conf"]
        );
    }

    #[rstest]
    fn read_file_errors(fs: MemoryFs) {
        assert_eq!(fs.read_file("/etc/nginx/nginx.conf").unwrap(), "directives");
        assert_eq!(code(fs.read_file("/etc/nginx")), ErrorCode::Eisdir);
        assert_eq!(code(fs.read_file("/etc/unknown")), ErrorCode::Enoent);
    }

    #[rstest]
    fn readdir_lists_in_insertion_order(mut fs: MemoryFs) {
        assert_eq!(
            fs.readdir("/etc/nginx").unwrap(),
            vec!["conf.d", "nginx.conf"]
        );
        fs.touch("/opt/zz").unwrap();
        fs.touch("/opt/aa").unwrap();
        fs.mkdir("/opt/mm").unwrap();
        assert_eq!(
            fs.readdir("/opt").unwrap(),
            vec!["file.txt", "zz", "aa", "mm"]
        );
        assert_eq!(fs.readdir("/").unwrap(), vec!["etc", "opt"]);
    }

    #[rstest]
    fn readdir_errors(fs: MemoryFs) {
        assert_eq!(code(fs.readdir("/etc/nginx/undefined")), ErrorCode::Enoent);
        assert_eq!(code(fs.readdir("/etc/nginx/nginx.conf")), ErrorCode::Enotdir);
    }

    #[rstest]
    fn stat_reports_kind(fs: MemoryFs) {
        let directory = fs.stat("/etc/nginx").unwrap();
        assert!(directory.is_directory());
        assert!(!directory.is_file());

        let file = fs.stat("/etc/nginx/nginx.conf").unwrap();
        assert!(!file.is_directory());
        assert!(file.is_file());

        assert!(fs.stat("/").unwrap().is_directory());
        assert_eq!(code(fs.stat("/etc/unknown")), ErrorCode::Enoent);
    }

    #[rstest]
    fn stat_is_a_fresh_snapshot(mut fs: MemoryFs) {
        let before = fs.stat("/etc/nginx/conf.d").unwrap();
        fs.touch("/etc/nginx/conf.d").unwrap();
        let after = fs.stat("/etc/nginx/conf.d").unwrap();

        assert!(before.is_directory());
        assert!(after.is_file());
    }

    #[rstest]
    fn unlink_removes_files_only(mut fs: MemoryFs) {
        fs.unlink("/etc/nginx/nginx.conf").unwrap();
        assert_eq!(fs.readdir("/etc/nginx").unwrap(), vec!["conf.d"]);

        assert_eq!(code(fs.unlink("/etc/nginx")), ErrorCode::Eperm);
        assert_eq!(code(fs.unlink("/")), ErrorCode::Eperm);
    }

    #[rstest]
    fn rmdir_removes_empty_directories_only(mut fs: MemoryFs) {
        fs.rmdir("/etc/nginx/conf.d").unwrap();
        assert_eq!(fs.readdir("/etc/nginx").unwrap(), vec!["nginx.conf"]);

        assert_eq!(code(fs.rmdir("/etc/unknown")), ErrorCode::Enoent);
        assert_eq!(code(fs.rmdir("/etc/nginx")), ErrorCode::Enotempty);
        assert_eq!(code(fs.rmdir("/etc/nginx/nginx.conf")), ErrorCode::Enotdir);
    }

    #[test]
    fn root_is_never_removed() {
        let mut fs = MemoryFs::new();
        assert_eq!(code(fs.rmdir("/")), ErrorCode::Eperm);
        fs.mkdir("/a").unwrap();
        assert_eq!(code(fs.rmdir("/")), ErrorCode::Enotempty);
        assert_eq!(code(fs.mkdir("/")), ErrorCode::Eperm);
        assert_eq!(code(fs.touch("/")), ErrorCode::Eisdir);
        assert!(fs.stat("/").unwrap().is_directory());
    }

    #[rstest]
    fn nginx_scenario(mut fs: MemoryFs) {
        assert_eq!(
            fs.readdir("/etc/nginx").unwrap(),
            vec!["conf.d", "nginx.conf"]
        );
        fs.unlink("/etc/nginx/nginx.conf").unwrap();
        assert_eq!(fs.readdir("/etc/nginx").unwrap(), vec!["conf.d"]);
        fs.rmdir("/etc/nginx/conf.d").unwrap();
        assert!(fs.readdir("/etc/nginx").unwrap().is_empty());
        fs.rmdir("/etc/nginx").unwrap();
        assert!(fs.readdir("/etc").unwrap().is_empty());
    }

    #[rstest]
    fn copy_errors(mut fs: MemoryFs) {
        let error = fs.copy("undefined", "/etc").unwrap_err();
        assert_eq!(error.code(), ErrorCode::Enoent);
        assert_eq!(error.path(), "undefined");

        let error = fs.copy("/opt", "/etc").unwrap_err();
        assert_eq!(error.code(), ErrorCode::Eisdir);
        assert_eq!(error.path(), "/opt");

        assert_eq!(
            code(fs.copy("/op/file.txt", "/etc/file.txt/inner")),
            ErrorCode::Enoent
        );

        let error = fs.copy("/opt/file.txt", "/etc/undefined/inner").unwrap_err();
        assert_eq!(error.code(), ErrorCode::Enoent);
        assert_eq!(error.path(), "/etc/undefined/inner");

        let error = fs
            .copy("/opt/file.txt", "/etc/nginx/nginx.conf/inner")
            .unwrap_err();
        assert_eq!(error.code(), ErrorCode::Enoent);
    }

    #[rstest]
    fn copy_into_directory_uses_source_name(mut fs: MemoryFs) {
        fs.copy("/opt/file.txt", "/etc").unwrap();
        assert!(fs.stat("/etc/file.txt").unwrap().is_file());
        assert_eq!(fs.readdir("/etc").unwrap(), vec!["nginx", "file.txt"]);
    }

    #[rstest]
    fn copy_creates_an_empty_file(mut fs: MemoryFs) {
        fs.write_file("/opt/file.txt", "payload").unwrap();

        fs.copy("/opt/file.txt", "/etc/nginx/nginx.conf").unwrap();
        assert_eq!(fs.read_file("/etc/nginx/nginx.conf").unwrap(), "");
        assert_eq!(
            fs.readdir("/etc/nginx").unwrap(),
            vec!["conf.d", "nginx.conf"]
        );

        fs.copy("/opt/file.txt", "/etc/renamed.txt").unwrap();
        assert_eq!(fs.read_file("/etc/renamed.txt").unwrap(), "");
        assert_eq!(fs.read_file("/opt/file.txt").unwrap(), "payload");
    }

    #[rstest]
    fn rename_moves_and_keeps_identity(mut fs: MemoryFs) {
        let moved = fs.rename("/etc/nginx/nginx.conf", "/opt/nginx.conf").unwrap();

        assert_eq!(fs.read_file("/opt/nginx.conf").unwrap(), "directives");
        assert_eq!(fs.readdir("/etc/nginx").unwrap(), vec!["conf.d"]);
        let node = fs.node(moved).unwrap();
        assert_eq!(node.name(), "nginx.conf");
        assert_eq!(node.parent(), fs.tree().resolve(&["opt"]));
    }

    #[rstest]
    fn rename_moves_whole_directories(mut fs: MemoryFs) {
        fs.rename("/etc/nginx", "/opt/web").unwrap();
        assert_eq!(
            fs.readdir("/opt/web").unwrap(),
            vec!["conf.d", "nginx.conf"]
        );
        assert_eq!(fs.read_file("/opt/web/nginx.conf").unwrap(), "directives");
        assert_eq!(code(fs.stat("/etc/nginx")), ErrorCode::Enoent);
    }

    #[rstest]
    fn rename_replaces_compatible_entries_in_place(mut fs: MemoryFs) {
        let nodes_before = fs.tree().node_count();
        fs.rename("/opt/file.txt", "/etc/nginx/nginx.conf").unwrap();

        assert_eq!(fs.read_file("/etc/nginx/nginx.conf").unwrap(), "");
        assert_eq!(
            fs.readdir("/etc/nginx").unwrap(),
            vec!["conf.d", "nginx.conf"]
        );
        assert_eq!(fs.tree().node_count(), nodes_before - 1);
    }

    #[rstest]
    #[case("/missing", "/opt/x", ErrorCode::Enoent)]
    #[case("/", "/opt/x", ErrorCode::Eperm)]
    #[case("/opt/file.txt", "/", ErrorCode::Eperm)]
    #[case("/opt/file.txt", "/missing/x", ErrorCode::Enoent)]
    #[case("/opt/file.txt", "/etc/nginx/nginx.conf/x", ErrorCode::Enotdir)]
    #[case("/etc", "/etc/nginx/etc", ErrorCode::Eperm)]
    #[case("/etc", "/etc/inside", ErrorCode::Eperm)]
    #[case("/opt/file.txt", "/etc/nginx/conf.d", ErrorCode::Eisdir)]
    #[case("/etc/nginx/conf.d", "/opt/file.txt", ErrorCode::Enotdir)]
    #[case("/opt", "/etc", ErrorCode::Enotempty)]
    fn rename_errors(
        mut fs: MemoryFs,
        #[case] src: &str,
        #[case] dest: &str,
        #[case] expected: ErrorCode,
    ) {
        let nodes_before = fs.tree().node_count();
        assert_eq!(code(fs.rename(src, dest)), expected);
        assert_eq!(fs.tree().node_count(), nodes_before);
        assert_eq!(fs.read_file("/etc/nginx/nginx.conf").unwrap(), "directives");
    }

    #[rstest]
    fn rename_onto_itself_is_a_no_op(mut fs: MemoryFs) {
        fs.rename("/etc/nginx/conf.d", "/etc/nginx/conf.d").unwrap();
        assert_eq!(
            fs.readdir("/etc/nginx").unwrap(),
            vec!["conf.d", "nginx.conf"]
        );
    }

    #[rstest]
    fn failed_operations_leave_the_tree_untouched(mut fs: MemoryFs) {
        let nodes_before = fs.tree().node_count();
        let _ = fs.mkdirp("/etc/nginx/nginx.conf/a/b");
        let _ = fs.mkdir("/missing/a");
        let _ = fs.touch("/etc/nginx/nginx.conf/a");
        let _ = fs.write_file("/etc", "body");
        let _ = fs.rmdir("/etc");
        let _ = fs.unlink("/etc");
        let _ = fs.copy("/opt", "/etc");

        assert_eq!(fs.tree().node_count(), nodes_before);
        assert_eq!(fs.readdir("/etc").unwrap(), vec!["nginx"]);
    }

    #[rstest]
    fn removing_directories_reclaims_nodes(mut fs: MemoryFs) {
        let nodes_before = fs.tree().node_count();
        fs.mkdir("/etc/nginx").unwrap();
        assert_eq!(fs.tree().node_count(), nodes_before - 2);
    }

    #[rstest]
    fn instances_are_independent(fs: MemoryFs) {
        let other = MemoryFs::new();
        assert_eq!(code(other.stat("/etc")), ErrorCode::Enoent);
        assert!(fs.stat("/etc").is_ok());
    }
}
