use std::collections::HashMap;

use snafu::Snafu;
use tracing::debug;

use crate::disk::Disk;

/// Maps a disk name to a [`Disk`] instance.
///
/// Lifecycle bookkeeping only: a disk is `Open` while it sits in the map and
/// `Closed` once taken out. The registry owns no tree logic; callers are
/// expected to route operations to an open disk themselves.
#[derive(Debug, Default)]
pub struct DiskRegistry {
    disks: HashMap<String, Disk>,
}

impl DiskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `disk` under `name`; the name must not already be open.
    pub fn open(&mut self, name: impl Into<String>, disk: Disk) -> Result<&mut Disk, RegistryError> {
        let name = name.into();
        if self.disks.contains_key(&name) {
            return AlreadyOpenSnafu { name }.fail();
        }
        debug!("Opening disk '{}'", name);
        Ok(self.disks.entry(name).or_insert(disk))
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&Disk> {
        self.disks.get(name.as_ref())
    }

    pub fn get_mut(&mut self, name: impl AsRef<str>) -> Option<&mut Disk> {
        self.disks.get_mut(name.as_ref())
    }

    pub fn is_open(&self, name: impl AsRef<str>) -> bool {
        self.disks.contains_key(name.as_ref())
    }

    /// Closes the named disk, handing its tree back to the caller.
    pub fn close(&mut self, name: impl AsRef<str>) -> Result<Disk, RegistryError> {
        let name = name.as_ref();
        debug!("Closing disk '{}'", name);
        self.disks.remove(name).ok_or_else(|| RegistryError::NotOpen {
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RegistryError {
    #[snafu(display("Disk '{}' is already open", name))]
    AlreadyOpen { name: String },
    #[snafu(display("Disk '{}' is not open", name))]
    NotOpen { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::CreateFileOptions;

    #[test]
    fn open_operate_close() {
        let mut registry = DiskRegistry::new();
        registry.open("scratch", Disk::empty()).unwrap();
        assert!(registry.is_open("scratch"));

        registry
            .get_mut("scratch")
            .unwrap()
            .create_file("/a.txt", "a", CreateFileOptions::default())
            .unwrap();
        assert_eq!(
            registry.get("scratch").unwrap().read_file("/a.txt").unwrap(),
            "a"
        );

        let closed = registry.close("scratch").unwrap();
        assert!(!registry.is_open("scratch"));
        assert_eq!(closed.read_file("/a.txt").unwrap(), "a");
    }

    #[test]
    fn open_rejects_duplicate_names() {
        let mut registry = DiskRegistry::new();
        registry.open("scratch", Disk::empty()).unwrap();
        assert!(matches!(
            registry.open("scratch", Disk::empty()),
            Err(RegistryError::AlreadyOpen { .. })
        ));
    }

    #[test]
    fn close_requires_an_open_disk() {
        let mut registry = DiskRegistry::new();
        assert!(matches!(
            registry.close("ghost"),
            Err(RegistryError::NotOpen { .. })
        ));
    }
}
