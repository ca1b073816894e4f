use frame_tunnel_core::prelude::{MemoryProvider, MemoryReading};
use frame_tunnel_summary_model::MemorySnapshot;
use parking_lot::Mutex;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Read heap usage for a scenario record.
///
/// This is the one place where a missing memory API turns into the all-zero snapshot. Anything
/// reading the record must treat that snapshot as "unsupported", see
/// [MemorySnapshot::is_unsupported].
pub fn measure_memory_usage(provider: &dyn MemoryProvider) -> MemorySnapshot {
    match provider.read() {
        MemoryReading::Available(snapshot) => snapshot,
        MemoryReading::Unavailable => {
            log::debug!("Memory API unavailable, recording an empty snapshot");
            MemorySnapshot::default()
        }
    }
}

/// Memory readings for the harness process itself, which hosts the simulated page.
///
/// Used bytes is the resident set, total is the virtual size and the limit is the system's total
/// memory.
pub struct ProcessMemoryProvider {
    pid: Pid,
    system: Mutex<System>,
}

impl ProcessMemoryProvider {
    pub fn new() -> Self {
        Self {
            pid: Pid::from_u32(std::process::id()),
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for ProcessMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider for ProcessMemoryProvider {
    fn read(&self) -> MemoryReading {
        let mut system = self.system.lock();
        system.refresh_memory();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        match system.process(self.pid) {
            Some(process) => MemoryReading::Available(MemorySnapshot {
                used_bytes: process.memory(),
                total_bytes: process.virtual_memory(),
                limit_bytes: system.total_memory(),
            }),
            None => {
                log::warn!("Could not read memory usage for process {}", self.pid);
                MemoryReading::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_tunnel_core::prelude::UnavailableMemory;

    struct FixedMemory(MemorySnapshot);

    impl MemoryProvider for FixedMemory {
        fn read(&self) -> MemoryReading {
            MemoryReading::Available(self.0)
        }
    }

    #[test]
    fn unavailable_is_zero_snapshot() {
        let snapshot = measure_memory_usage(&UnavailableMemory);

        assert_eq!(
            MemorySnapshot {
                used_bytes: 0,
                total_bytes: 0,
                limit_bytes: 0
            },
            snapshot
        );
        assert!(snapshot.is_unsupported());
    }

    #[test]
    fn available_is_passed_through() {
        let expected = MemorySnapshot {
            used_bytes: 10,
            total_bytes: 20,
            limit_bytes: 30,
        };

        assert_eq!(expected, measure_memory_usage(&FixedMemory(expected)));
    }

    #[test]
    fn reads_this_process() {
        let snapshot = measure_memory_usage(&ProcessMemoryProvider::new());

        assert!(snapshot.used_bytes > 0);
        assert!(snapshot.limit_bytes >= snapshot.used_bytes);
    }
}
