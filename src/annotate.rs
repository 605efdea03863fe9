// src/annotate.rs
//! Visual severity markers for table and calendar output.

use crate::event::Impact;

/// Star marker for an impact level.
pub fn impact_stars(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "★★★",
        Impact::Medium => "★★☆",
        Impact::Low => "★☆☆",
    }
}

/// "★★★ High" — impact label with its marker.
pub fn emojify_impact(impact: Impact) -> String {
    format!("{} {}", impact_stars(impact), impact.as_str())
}

/// "★★★ Non-Farm Payrolls" — arbitrary text (usually the title) with the
/// marker of the row's impact.
pub fn emojify_text(impact: Impact, text: &str) -> String {
    format!("{} {}", impact_stars(impact), text)
}

/// Bundled icon asset for an impact level.
pub fn icon_path(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "icons/highimpact.png",
        Impact::Medium => "icons/mediumimpact.png",
        Impact::Low => "icons/lowimpact.png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_scale_with_severity() {
        assert_eq!(impact_stars(Impact::High), "★★★");
        assert_eq!(impact_stars(Impact::Medium), "★★☆");
        assert_eq!(impact_stars(Impact::Low), "★☆☆");
    }

    #[test]
    fn labels_and_titles_get_prefixed() {
        assert_eq!(emojify_impact(Impact::Low), "★☆☆ Low");
        assert_eq!(emojify_text(Impact::High, "CPI"), "★★★ CPI");
    }

    #[test]
    fn every_impact_has_an_icon() {
        for i in [Impact::High, Impact::Medium, Impact::Low] {
            assert!(icon_path(i).ends_with("impact.png"));
        }
    }
}
