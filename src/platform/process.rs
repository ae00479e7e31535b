// Process table snapshot

use sysinfo::{ProcessRefreshKind, RefreshKind, System};

/// One line per running process: `<pid> <name>`, sorted by pid.
///
/// Only the executable name is listed, never the command line, so a
/// pattern passed as an argument to this program does not match itself.
pub fn process_listing() -> String {
    let system =
        System::new_with_specifics(RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()));

    let mut rows: Vec<(u32, String)> = system
        .processes()
        .values()
        .map(|proc| (proc.pid().as_u32(), proc.name().to_string_lossy().to_string()))
        .collect();
    rows.sort_by_key(|(pid, _)| *pid);

    rows.iter()
        .map(|(pid, name)| format!("{} {}", pid, name))
        .collect::<Vec<_>>()
        .join("\n")
}
