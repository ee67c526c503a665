/// Cross-platform notification support
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

/// Send a notification when a task is completed
pub fn notify_task_done(task_title: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Homeroom - Task Completed""#,
            task_title.replace('"', "\\\"")
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = task_title;
    }
}

/// Send a notification when a task goes into overtime
pub fn notify_overtime(task_title: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "⏰ {}" with title "Homeroom - Over the Estimate""#,
            task_title.replace('"', "\\\"")
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = task_title;
    }
}
