/// Options for [`Disk::create_file`](crate::disk::Disk::create_file).
#[derive(Debug, Clone, Copy)]
pub struct CreateFileOptions {
    /// Replace an existing file at the target path. Defaults to `true`.
    pub overwrite: bool,
}

impl Default for CreateFileOptions {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// Options for [`Disk::create_dir`](crate::disk::Disk::create_dir).
#[derive(Debug, Clone, Copy)]
pub struct CreateDirOptions {
    /// Treat an existing directory at the target path as success.
    pub ignore_if_exists: bool,
    /// Create missing ancestors as empty directories. Defaults to `true`.
    pub parents: bool,
}

impl Default for CreateDirOptions {
    fn default() -> Self {
        Self {
            ignore_if_exists: false,
            parents: true,
        }
    }
}

/// Options for the remove family of operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    /// Treat an absent path as a no-op success.
    pub force: bool,
}

/// Options for the move and copy families of operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferOptions {
    /// Replace an existing file at the destination.
    pub overwrite: bool,
}
