// Display helpers shared by the HUD and overlay.

/// Countdown text: two-digit seconds, `m:ss` past a minute.
pub fn format_time(secs: u32) -> String {
    let m = secs / 60;
    let s = secs % 60;
    if m > 0 {
        format!("{}:{:02}", m, s)
    } else {
        format!("{:02}", s)
    }
}

pub fn is_portrait(width: f64, height: f64) -> bool {
    height > width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_seconds() {
        assert_eq!(format_time(45), "45");
        assert_eq!(format_time(7), "07");
        assert_eq!(format_time(0), "00");
        assert_eq!(format_time(75), "1:15");
    }

    #[test]
    fn portrait_only_when_taller() {
        assert!(is_portrait(390.0, 844.0));
        assert!(!is_portrait(844.0, 390.0));
        assert!(!is_portrait(500.0, 500.0));
    }
}
