// Formats each x1000 step
pub fn format_number(number: u64) -> String {
    let num_str = number.to_string();
    let mut result = String::new();
    let len = num_str.len();

    for (i, c) in num_str.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

pub fn format_optional_number(number: Option<u64>) -> String {
    number.map(format_number).unwrap_or_else(|| "-".to_string())
}

pub fn video_link(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

pub fn channel_link(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{channel_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn missing_numbers_use_placeholder() {
        assert_eq!(format_optional_number(None), "-");
        assert_eq!(format_optional_number(Some(60000)), "60,000");
    }
}
