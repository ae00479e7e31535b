// Platform-specific filesystem statistics

use std::path::Path;

use crate::error::Result;

/// Block counts for the filesystem holding a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FsUsage {
    pub block_size: u64,
    pub available_blocks: u64,
    pub total_blocks: u64,
}

impl FsUsage {
    /// Bytes available to unprivileged users
    pub fn free_bytes(&self) -> u64 {
        self.block_size.saturating_mul(self.available_blocks)
    }

    pub fn total_bytes(&self) -> u64 {
        self.block_size.saturating_mul(self.total_blocks)
    }

    /// Free fraction in `0.0..=1.0`, `None` for a zero-sized filesystem
    pub fn free_ratio(&self) -> Option<f64> {
        let total = self.total_bytes();
        if total == 0 {
            return None;
        }
        Some(self.free_bytes() as f64 / total as f64)
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_cast)]
pub fn fs_usage(path: &Path) -> Result<FsUsage> {
    use crate::error::WatchError;
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| WatchError::probe(format!("path contains a NUL byte: {:?}", path)))?;

    let mut stats: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is a valid NUL-terminated string and stats is a valid out pointer
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stats) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    // f_blocks and f_bavail are expressed in f_frsize units
    let block_size = if stats.f_frsize > 0 {
        stats.f_frsize as u64
    } else {
        stats.f_bsize as u64
    };

    Ok(FsUsage {
        block_size,
        available_blocks: stats.f_bavail as u64,
        total_blocks: stats.f_blocks as u64,
    })
}

#[cfg(not(unix))]
pub fn fs_usage(path: &Path) -> Result<FsUsage> {
    use crate::error::WatchError;
    use sysinfo::Disks;

    let target = path.canonicalize()?;
    let disks = Disks::new_with_refreshed_list();

    // Longest mount point that prefixes the path owns it
    let disk = disks
        .iter()
        .filter(|disk| target.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .ok_or_else(|| WatchError::probe(format!("no mounted disk holds {:?}", path)))?;

    Ok(FsUsage {
        block_size: 1,
        available_blocks: disk.available_space(),
        total_blocks: disk.total_space(),
    })
}
