//! Player preference ordering
//!
//! Players are polled in the order produced here, so the first preference that
//! is actually playing wins.

/// Default preference order, browsers ahead of the dedicated music player
pub const DEFAULT_PREFERRED_PLAYERS: &[&str] = &[
    "chromium",
    "chrome",
    "google-chrome",
    "brave",
    "vivaldi",
    "firefox",
    "spotify",
];

/// Order players by preference.
///
/// For each preference name in turn, every player whose lowercased identifier
/// contains that name is appended, keeping the original relative order. Players
/// matching no preference follow in their original order. Each player appears
/// exactly once.
pub fn order_players<S: AsRef<str>>(players: Vec<String>, preferences: &[S]) -> Vec<String> {
    let lowered: Vec<String> = players.iter().map(|p| p.to_lowercase()).collect();
    let mut taken = vec![false; players.len()];
    let mut order = Vec::with_capacity(players.len());

    for name in preferences {
        let name = name.as_ref().to_lowercase();
        for (i, player) in lowered.iter().enumerate() {
            if !taken[i] && player.contains(&name) {
                taken[i] = true;
                order.push(i);
            }
        }
    }

    order.extend((0..players.len()).filter(|&i| !taken[i]));

    let mut slots: Vec<Option<String>> = players.into_iter().map(Some).collect();
    order.into_iter().filter_map(|i| slots[i].take()).collect()
}

/// Split `playerctl -l` style output into player identifiers, skipping blank lines
pub fn parse_player_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_preferred_players_come_first() {
        let input = players(&["spotify", "vlc", "firefox.instance_1234", "chromium.instance_99"]);
        let ordered = order_players(input, DEFAULT_PREFERRED_PLAYERS);
        assert_eq!(
            ordered,
            players(&["chromium.instance_99", "firefox.instance_1234", "spotify", "vlc"])
        );
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let input = players(&["mpv", "org.mpris.MediaPlayer2.Chromium.instance_1"]);
        let ordered = order_players(input, &["chromium"]);
        assert_eq!(ordered[0], "org.mpris.MediaPlayer2.Chromium.instance_1");
    }

    #[test]
    fn test_player_matching_several_preferences_appears_once() {
        // "google-chrome" matches both "chrome" and "google-chrome"
        let input = players(&["google-chrome", "chromium"]);
        let ordered = order_players(input, DEFAULT_PREFERRED_PLAYERS);
        assert_eq!(ordered, players(&["chromium", "google-chrome"]));
    }

    #[test]
    fn test_unmatched_keep_original_order() {
        let input = players(&["vlc", "mpv", "rhythmbox"]);
        let ordered = order_players(input.clone(), DEFAULT_PREFERRED_PLAYERS);
        assert_eq!(ordered, input);
    }

    #[test]
    fn test_same_preference_keeps_relative_order() {
        let input = players(&["firefox.instance_2", "vlc", "firefox.instance_1"]);
        let ordered = order_players(input, DEFAULT_PREFERRED_PLAYERS);
        assert_eq!(ordered, players(&["firefox.instance_2", "firefox.instance_1", "vlc"]));
    }

    #[test]
    fn test_output_is_permutation_with_duplicates() {
        let input = players(&["spotify", "vlc", "spotify", "brave", "vlc"]);
        let mut ordered = order_players(input.clone(), DEFAULT_PREFERRED_PLAYERS);
        assert_eq!(ordered[..3], players(&["brave", "spotify", "spotify"])[..]);

        let mut sorted_input = input;
        sorted_input.sort();
        ordered.sort();
        assert_eq!(ordered, sorted_input);
    }

    #[test]
    fn test_preference_rank_never_inverted() {
        let input = players(&["vlc", "spotify", "firefox", "brave.instance", "chromium", "mpv"]);
        let ordered = order_players(input, DEFAULT_PREFERRED_PLAYERS);

        let rank = |player: &str| {
            DEFAULT_PREFERRED_PLAYERS
                .iter()
                .position(|name| player.to_lowercase().contains(name))
                .unwrap_or(DEFAULT_PREFERRED_PLAYERS.len())
        };
        let ranks: Vec<usize> = ordered.iter().map(|p| rank(p.as_str())).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "ranks out of order: {:?}", ranks);
    }

    #[test]
    fn test_empty_input() {
        assert!(order_players(Vec::new(), DEFAULT_PREFERRED_PLAYERS).is_empty());
    }

    #[test]
    fn test_parse_player_list() {
        assert_eq!(
            parse_player_list("spotify\nfirefox.instance_1\n\n  vlc  \n"),
            players(&["spotify", "firefox.instance_1", "vlc"])
        );
        assert!(parse_player_list("").is_empty());
    }
}
