use std::collections::HashMap;

const AVATAR_BASE: &str = "https://mc-heads.net";

/// A known player with aggregate event statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterEntry {
    pub username: String,
    pub uuid: String,
    pub won: u32,
    pub played: u32,
}

impl RosterEntry {
    /// Whole-number percentage, 0 when the player has no events.
    pub fn win_rate(&self) -> u32 {
        if self.played == 0 {
            return 0;
        }
        (f64::from(self.won) / f64::from(self.played) * 100.0).round() as u32
    }

    pub fn avatar_url(&self, size: u16) -> String {
        avatar_url(&self.uuid, size)
    }

    pub fn body_url(&self, size: u16) -> String {
        format!("{AVATAR_BASE}/body/{}/{size}", self.uuid)
    }
}

/// Head render keyed by uuid or username; the image service accepts both.
pub fn avatar_url(key: &str, size: u16) -> String {
    format!("{AVATAR_BASE}/avatar/{key}/{size}")
}

/// Immutable roster lookup table. Built once per load and shared behind an
/// `Arc`; the scoreboard only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    by_name: HashMap<String, usize>,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        // Later duplicates win the lookup, the list keeps every row.
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.username.to_lowercase(), i))
            .collect();
        Self { entries, by_name }
    }

    /// Parse the tab-separated stats table: a header row, then
    /// `username, uuid, won, played` per line.
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for (line_no, line) in text.trim().lines().enumerate().skip(1) {
            let mut cols = line.split('\t');
            let username = cols.next().unwrap_or_default().trim();
            let uuid = cols.next().unwrap_or_default().trim();
            if username.is_empty() || uuid.is_empty() {
                log::debug!("roster line {} skipped: missing username or uuid", line_no + 1);
                continue;
            }
            let won = parse_count(cols.next());
            let played = parse_count(cols.next());
            entries.push(RosterEntry {
                username: username.to_string(),
                uuid: uuid.to_string(),
                won,
                played,
            });
        }
        Self::new(entries)
    }

    /// Case-insensitive lookup by username.
    pub fn get(&self, username: &str) -> Option<&RosterEntry> {
        self.by_name
            .get(&username.to_lowercase())
            .and_then(|&i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_count(col: Option<&str>) -> u32 {
    col.map(str::trim)
        .and_then(|c| c.parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as u32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS: &str = "username\tuuid\twon\tplayed\n\
        Steve\t8667ba71-b85a-4004-af54-457a9734eed7\t3\t7\n\
        alex\tec561538-f3fd-461d-aff5-086b22154bce\t0\t0\n\
        \t1234\t1\t1\n\
        nouuid\t\t2\t2\n";

    #[test]
    fn parses_rows_and_skips_header() {
        let roster = Roster::parse(STATS);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.entries()[0].username, "Steve");
        assert_eq!(roster.entries()[0].won, 3);
        assert_eq!(roster.entries()[0].played, 7);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let roster = Roster::parse(STATS);
        assert_eq!(roster.get("STEVE").map(|e| e.won), Some(3));
        assert_eq!(roster.get("Alex").map(|e| e.played), Some(0));
        assert!(roster.get("herobrine").is_none());
    }

    #[test]
    fn crlf_and_bad_numbers_are_tolerated() {
        let roster = Roster::parse("username\tuuid\twon\tplayed\r\nBob\tabc\tx\t4\r\n");
        let bob = roster.get("bob").expect("bob should parse");
        assert_eq!(bob.won, 0);
        assert_eq!(bob.played, 4);
    }

    #[test]
    fn duplicate_usernames_keep_last_for_lookup() {
        let roster = Roster::parse("h\nsam\tu1\t1\t1\nSam\tu2\t2\t2\n");
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("sam").map(|e| e.uuid.as_str()), Some("u2"));
    }

    #[test]
    fn header_only_is_empty() {
        assert!(Roster::parse("username\tuuid\twon\tplayed\n").is_empty());
        assert!(Roster::parse("").is_empty());
    }

    #[test]
    fn win_rate_rounds_and_handles_zero() {
        let entry = RosterEntry { won: 3, played: 7, ..Default::default() };
        assert_eq!(entry.win_rate(), 43);
        let entry = RosterEntry { won: 1, played: 2, ..Default::default() };
        assert_eq!(entry.win_rate(), 50);
        assert_eq!(RosterEntry::default().win_rate(), 0);
    }

    #[test]
    fn image_urls() {
        let entry = RosterEntry { uuid: "abc".into(), ..Default::default() };
        assert_eq!(entry.avatar_url(24), "https://mc-heads.net/avatar/abc/24");
        assert_eq!(entry.body_url(150), "https://mc-heads.net/body/abc/150");
    }
}
