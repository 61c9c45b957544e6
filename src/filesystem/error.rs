use derive_more::Display;
use snafu::Snafu;

/// POSIX-style code of a [`FileSystemError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorCode {
    #[display("ENOENT")]
    Enoent,
    #[display("ENOTDIR")]
    Enotdir,
    #[display("EISDIR")]
    Eisdir,
    #[display("ENOTEMPTY")]
    Enotempty,
    #[display("EPERM")]
    Eperm,
}

impl ErrorCode {
    /// Numeric errno as reported by the libuv errno table.
    pub fn errno(self) -> i32 {
        match self {
            ErrorCode::Enoent => 34,
            ErrorCode::Enotdir => 27,
            ErrorCode::Eisdir => 28,
            ErrorCode::Enotempty => 53,
            ErrorCode::Eperm => 50,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::Enoent => "no such file or directory",
            ErrorCode::Enotdir => "not a directory",
            ErrorCode::Eisdir => "illegal operation on a directory",
            ErrorCode::Enotempty => "directory not empty",
            ErrorCode::Eperm => "operation not permitted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FileSystemError {
    #[snafu(display("ENOENT: no such file or directory, {path}"))]
    NotFound { path: String },
    #[snafu(display("ENOTDIR: not a directory, {path}"))]
    NotADirectory { path: String },
    #[snafu(display("EISDIR: illegal operation on a directory, {path}"))]
    IsADirectory { path: String },
    #[snafu(display("ENOTEMPTY: directory not empty, {path}"))]
    NotEmpty { path: String },
    #[snafu(display("EPERM: operation not permitted, {path}"))]
    NotPermitted { path: String },
}

impl FileSystemError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FileSystemError::NotFound { .. } => ErrorCode::Enoent,
            FileSystemError::NotADirectory { .. } => ErrorCode::Enotdir,
            FileSystemError::IsADirectory { .. } => ErrorCode::Eisdir,
            FileSystemError::NotEmpty { .. } => ErrorCode::Enotempty,
            FileSystemError::NotPermitted { .. } => ErrorCode::Eperm,
        }
    }

    pub fn errno(&self) -> i32 {
        self.code().errno()
    }

    /// The path argument that triggered the failure.
    pub fn path(&self) -> &str {
        match self {
            FileSystemError::NotFound { path }
            | FileSystemError::NotADirectory { path }
            | FileSystemError::IsADirectory { path }
            | FileSystemError::NotEmpty { path }
            | FileSystemError::NotPermitted { path } => path,
        }
    }
}
