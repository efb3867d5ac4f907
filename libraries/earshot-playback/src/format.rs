//! Duration display formatting

/// Format whole seconds for the progress labels
///
/// `MM:SS` below one hour, `HH:MM:SS` from one hour on. Every unit is
/// zero-padded to two digits.
pub fn format_seconds(total: u32) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
