use std::io::Write;

impl super::AdScrub {
    /// Timestamped line to stderr and the optional `--debug-log` file.
    /// No-op unless `--debug` was given.
    pub(crate) fn debug_log(&self, msg: impl AsRef<str>) {
        if !self.debug_enabled {
            return;
        }
        let line = format!(
            "[{}] {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            msg.as_ref()
        );
        eprintln!("{line}");
        if let Some(path) = &self.debug_log_path {
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
            {
                let _ = writeln!(file, "{line}");
            }
        }
    }
}
