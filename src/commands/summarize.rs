//! Voice-friendly summaries of API payloads.
//!
//! Pure formatters: JSON in, one short paragraph out. Missing or odd-typed
//! fields degrade to placeholder text, they never fail.

use serde_json::Value;

/// Build a short summary of a hero record.
///
/// Uses name/real_name, role, attack type, difficulty, team list, bio (or
/// lore), and the first listed ability.
pub fn summarize_character(data: &Value, fallback_name: &str) -> String {
    let name = str_field(data, "name")
        .map(str::to_string)
        .unwrap_or_else(|| title_case(fallback_name));
    let role = str_field(data, "role").unwrap_or("Unknown role");
    let attack_type = str_field(data, "attack_type").unwrap_or("unknown attack type");
    let difficulty = str_field(data, "difficulty").unwrap_or("unknown difficulty");
    let bio = str_field(data, "bio")
        .or_else(|| str_field(data, "lore"))
        .unwrap_or("");

    let team = data
        .get("team")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| "no listed team".to_string());

    let ability_line = data
        .get("abilities")
        .and_then(Value::as_array)
        .and_then(|abilities| abilities.first())
        .map(|ability| {
            let ability_name = str_field(ability, "name").unwrap_or("Unnamed ability");
            let ability_desc = str_field(ability, "description").unwrap_or("");
            format!("Their signature ability is '{ability_name}': {ability_desc}")
        })
        .unwrap_or_else(|| "No abilities listed.".to_string());

    let intro = match str_field(data, "real_name") {
        Some(real_name) => format!("{name}, also known as {real_name},"),
        None => name,
    };

    let parts = [
        intro,
        format!("is a {role} hero using {attack_type} attacks on {team}, rated {difficulty} to play."),
        bio.to_string(),
        ability_line,
    ];

    join_parts(&parts)
}

/// Build a short summary of a player record.
///
/// Totals come from `overall_stats`; per-match figures are derived from the
/// `overall_stats.unranked` block.
pub fn summarize_player_stats(data: &Value, fallback_name: &str) -> String {
    let name = str_field(data, "name")
        .map(str::to_string)
        .unwrap_or_else(|| title_case(fallback_name));

    let overall = data.get("overall_stats").unwrap_or(&Value::Null);
    let matches = num_field(overall, "total_matches").filter(|m| *m > 0.0);
    let wins = num_field(overall, "total_wins");

    let unranked = overall.get("unranked").unwrap_or(&Value::Null);
    let kills = num_field(unranked, "total_kills");
    let assists = num_field(unranked, "total_assists");
    let deaths = num_field(unranked, "total_deaths");
    let mvp = num_field(unranked, "total_mvp");
    let time_played = str_field(unranked, "total_time_played");

    let mut parts = Vec::new();

    match matches {
        Some(total) => {
            parts.push(format!("{name} has played {total:.0} total matches."));

            if let Some(won) = wins {
                parts.push(format!(
                    "Their win rate is {:.1}%,",
                    100.0 * won / total
                ));
            }
            if let (Some(k), Some(d), Some(a)) = (kills, deaths, assists) {
                parts.push(format!(
                    "with an average of {:.1} kills, {:.1} deaths, and {:.1} assists per match.",
                    k / total,
                    d / total,
                    a / total
                ));
            }
        }
        None => parts.push(format!("{name} has no recorded matches.")),
    }

    if let Some(mvp_count) = mvp {
        parts.push(format!("{name} has been the match MVP {mvp_count:.0} times."));
    }
    if let Some(time) = time_played {
        parts.push(format!("They have played Marvel Rivals for {time}."));
    }

    join_parts(&parts)
}

fn str_field<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Numeric field accessor; the API serves some counters as strings.
fn num_field(data: &Value, key: &str) -> Option<f64> {
    match data.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn join_parts(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_character_full_record() {
        let data = json!({
            "name": "Iron Man",
            "real_name": "Tony Stark",
            "role": "Duelist",
            "attack_type": "Ranged",
            "difficulty": "Easy",
            "team": ["Avengers", "Stark Industries"],
            "bio": "Genius billionaire in powered armor.",
            "abilities": [
                { "name": "Repulsor Blast", "description": "Fires energy bolts." }
            ]
        });

        let summary = summarize_character(&data, "ironman");

        assert!(summary.contains("Iron Man, also known as Tony Stark,"));
        assert!(summary.contains("is a Duelist hero using Ranged attacks"));
        assert!(summary.contains("Avengers, Stark Industries"));
        assert!(summary.contains("rated Easy to play."));
        assert!(summary.contains("'Repulsor Blast': Fires energy bolts."));
    }

    #[test]
    fn test_character_sparse_record_uses_placeholders() {
        let summary = summarize_character(&json!({}), "ironman");

        assert!(summary.starts_with("Ironman"));
        assert!(summary.contains("Unknown role"));
        assert!(summary.contains("unknown attack type"));
        assert!(summary.contains("no listed team"));
        assert!(summary.contains("No abilities listed."));
    }

    #[test]
    fn test_character_lore_fallback_for_bio() {
        let data = json!({ "name": "Loki", "lore": "God of mischief." });
        let summary = summarize_character(&data, "loki");

        assert!(summary.contains("God of mischief."));
    }

    #[test]
    fn test_player_full_record() {
        let data = json!({
            "name": "jaddo11",
            "overall_stats": {
                "total_matches": 200,
                "total_wins": 120,
                "unranked": {
                    "total_kills": 3000,
                    "total_deaths": 1000,
                    "total_assists": 2000,
                    "total_mvp": 15,
                    "total_time_played": "92 hours"
                }
            }
        });

        let summary = summarize_player_stats(&data, "jaddo11");

        assert!(summary.contains("jaddo11 has played 200 total matches."));
        assert!(summary.contains("win rate is 60.0%"));
        assert!(summary.contains("15.0 kills, 5.0 deaths, and 10.0 assists per match."));
        assert!(summary.contains("MVP 15 times."));
        assert!(summary.contains("for 92 hours."));
    }

    #[test]
    fn test_player_accepts_string_counters() {
        let data = json!({
            "name": "jaddo11",
            "overall_stats": { "total_matches": "50", "total_wins": "25" }
        });

        let summary = summarize_player_stats(&data, "jaddo11");
        assert!(summary.contains("50 total matches"));
        assert!(summary.contains("50.0%"));
    }

    #[test]
    fn test_player_without_stats() {
        let summary = summarize_player_stats(&json!({}), "jaddo11");
        assert_eq!(summary, "Jaddo11 has no recorded matches.");
    }
}
