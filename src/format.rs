use chrono::{DateTime, Utc};
use colored::*;

/// `#rrggbb` to an RGB triple.
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

pub fn format_language(language: &str, color: &str) -> ColoredString {
    match parse_hex(color) {
        Some((r, g, b)) => format!("● {}", language).truecolor(r, g, b),
        None => format!("● {}", language).normal(),
    }
}

pub fn format_count(count: u64) -> ColoredString {
    if count >= 1000 {
        format!("{:.1}k", count as f64 / 1000f64).bold().yellow()
    } else if count > 0 {
        count.to_string().normal()
    } else {
        "-".dimmed()
    }
}

pub fn format_age(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(updated_at) = updated_at else {
        return "-".to_string();
    };
    let sec = (now - updated_at).num_seconds().max(0);
    let minutes = sec / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days >= 365 {
        format!("{}y ago", days / 365)
    } else if days >= 30 {
        format!("{}mo ago", days / 30)
    } else if days >= 1 {
        format!("{}d ago", days)
    } else if hours >= 1 {
        format!("{}h ago", hours)
    } else if minutes >= 1 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}
