//! System information report: CPU, RAM, and disk usage.

use sysinfo::{Disks, System, MINIMUM_CPU_UPDATE_INTERVAL};

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

pub async fn get_system_info() -> anyhow::Result<String> {
    let mut sys = System::new_all();

    // CPU usage needs two samples a short interval apart
    sys.refresh_cpu_usage();
    tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
    sys.refresh_cpu_usage();
    let cpu = sys.global_cpu_usage();

    let total_mem = sys.total_memory();
    let used_mem = sys.used_memory();
    let ram_percent = if total_mem > 0 {
        used_mem as f64 / total_mem as f64 * 100.0
    } else {
        0.0
    };

    let disks = Disks::new_with_refreshed_list();
    let (disk_total, disk_avail) = disks
        .iter()
        .find(|d| d.mount_point() == std::path::Path::new("/"))
        .or_else(|| disks.iter().next())
        .map(|d| (d.total_space(), d.available_space()))
        .unwrap_or((0, 0));
    let disk_used = disk_total.saturating_sub(disk_avail);
    let disk_percent = if disk_total > 0 {
        disk_used as f64 / disk_total as f64 * 100.0
    } else {
        0.0
    };

    Ok(format!(
        "CPU Usage: {cpu:.1}%\n\
         RAM Usage: {ram_percent:.1}% ({}MB/{}MB)\n\
         Disk Usage: {disk_percent:.1}% ({}GB/{}GB)",
        used_mem / MIB,
        total_mem / MIB,
        disk_used / GIB,
        disk_total / GIB,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn report_has_all_sections() {
        let report = get_system_info().await.expect("should report");
        assert!(report.contains("CPU Usage:"));
        assert!(report.contains("RAM Usage:"));
        assert!(report.contains("Disk Usage:"));
    }
}
