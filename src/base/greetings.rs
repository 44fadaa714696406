//! Time-of-day greetings and status quotes for notification text.

use rand::Rng;

/// Greeting for the late night band (00:00 to 03:59).
pub const LATE_NIGHT: &str = "🌌 Burning the midnight oil, Chief?";
/// Greeting for the early riser band (04:00 to 05:59).
pub const EARLY_RISER: &str = "🌅 Up before the sun, Chief.";
/// Greeting for the morning band (06:00 to 08:59).
pub const MORNING: &str = "☀️ Good morning, Chief.";
/// Greeting for the bright morning band (09:00 to 11:59).
pub const BRIGHT_MORNING: &str = "🌞 A bright morning to you, Chief.";
/// Greeting for the afternoon band (12:00 to 14:59).
pub const AFTERNOON: &str = "🌤️ Good afternoon, Chief.";
/// Greeting for the afternoon glow band (15:00 to 17:59).
pub const AFTERNOON_GLOW: &str = "🌇 Enjoying the afternoon glow, Chief?";
/// Greeting for the evening band (18:00 to 20:59).
pub const EVENING: &str = "🌙 Good evening, Chief.";
/// Greeting for the night owl band (21:00 to 23:59).
pub const NIGHT_OWL: &str = "🦉 Still at it, night owl?";

/// Status quotes appended to every GitHub notification.
pub const STATUS_QUOTES: [&str; 10] = [
    "All systems nominal.",
    "Shall I render the diagnostics, sir?",
    "Running a full systems check in the background.",
    "The code compiles. For now.",
    "Deploying charm and sarcasm at standard levels.",
    "Another milestone logged in the archives.",
    "I've taken the liberty of keeping an eye on things.",
    "Power levels stable. Coffee levels unknown.",
    "Monitoring the repository with quiet enthusiasm.",
    "Your commits are in good hands, Chief.",
];

/// Select the greeting for an hour of the day (0 to 23).
///
/// Bands are half-open: each starts at its first hour and ends before the next band's first
/// hour. Hours past 23 fall into the last band.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..4 => LATE_NIGHT,
        4..6 => EARLY_RISER,
        6..9 => MORNING,
        9..12 => BRIGHT_MORNING,
        12..15 => AFTERNOON,
        15..18 => AFTERNOON_GLOW,
        18..21 => EVENING,
        _ => NIGHT_OWL,
    }
}

/// Pick one of the status quotes uniformly at random.
pub fn status_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    STATUS_QUOTES[rng.gen_range(0..STATUS_QUOTES.len())]
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng, rngs::mock::StepRng};

    use super::*;

    #[test]
    fn representative_hours_select_their_band() {
        assert_eq!(greeting_for_hour(0), LATE_NIGHT);
        assert_eq!(greeting_for_hour(5), EARLY_RISER);
        assert_eq!(greeting_for_hour(11), BRIGHT_MORNING);
        assert_eq!(greeting_for_hour(14), AFTERNOON);
        assert_eq!(greeting_for_hour(17), AFTERNOON_GLOW);
        assert_eq!(greeting_for_hour(20), EVENING);
        assert_eq!(greeting_for_hour(23), NIGHT_OWL);
    }

    #[test]
    fn band_boundaries_do_not_overlap() {
        assert_eq!(greeting_for_hour(3), LATE_NIGHT);
        assert_eq!(greeting_for_hour(4), EARLY_RISER);
        assert_eq!(greeting_for_hour(6), MORNING);
        assert_eq!(greeting_for_hour(8), MORNING);
        assert_eq!(greeting_for_hour(9), BRIGHT_MORNING);
        assert_eq!(greeting_for_hour(12), AFTERNOON);
        assert_eq!(greeting_for_hour(15), AFTERNOON_GLOW);
        assert_eq!(greeting_for_hour(18), EVENING);
        assert_eq!(greeting_for_hour(21), NIGHT_OWL);
    }

    #[test]
    fn every_hour_maps_to_exactly_one_of_eight_greetings() {
        let mut seen: Vec<&str> = (0..24).map(greeting_for_hour).collect();
        seen.dedup();

        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn quote_selection_is_pinned_by_the_random_source() {
        let mut zero = StepRng::new(0, 0);
        assert_eq!(status_quote(&mut zero), STATUS_QUOTES[0]);

        let first = status_quote(&mut StdRng::seed_from_u64(7));
        let second = status_quote(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert!(STATUS_QUOTES.contains(&first));
    }
}
