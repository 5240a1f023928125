//! Built-in rosters

use crate::registry::TeamRecord;

/// 2025/26 league phase: 36 clubs, four pots of nine, in pot order.
pub fn league_phase_2025_26() -> Vec<TeamRecord> {
    const TEAMS: [(&str, &str, u8); 36] = [
        // Pot 1
        ("Paris Saint-Germain", "France", 1),
        ("Real Madrid", "Spain", 1),
        ("Manchester City", "England", 1),
        ("Bayern München", "Germany", 1),
        ("Liverpool", "England", 1),
        ("Internazionale", "Italy", 1),
        ("Chelsea", "England", 1),
        ("Borussia Dortmund", "Germany", 1),
        ("FC Barcelona", "Spain", 1),
        // Pot 2
        ("Arsenal", "England", 2),
        ("Bayer Leverkusen", "Germany", 2),
        ("Atlético Madrid", "Spain", 2),
        ("Benfica", "Portugal", 2),
        ("Atalanta", "Italy", 2),
        ("Villarreal", "Spain", 2),
        ("Juventus", "Italy", 2),
        ("Eintracht Frankfurt", "Germany", 2),
        ("Club Brugge", "Belgium", 2),
        // Pot 3
        ("Tottenham Hotspur", "England", 3),
        ("PSV Eindhoven", "Netherlands", 3),
        ("Ajax", "Netherlands", 3),
        ("Napoli", "Italy", 3),
        ("Sporting CP Lisbon", "Portugal", 3),
        ("Olympiakos Piraeus", "Greece", 3),
        ("Slavia Praha", "Czech Republic", 3),
        ("Bodø/Glimt", "Norway", 3),
        ("Olympique Marseille", "France", 3),
        // Pot 4
        ("FC København", "Denmark", 4),
        ("Red Star Belgrade", "Serbia", 4),
        ("AS Monaco", "France", 4),
        ("Ferencváros", "Hungary", 4),
        ("Galatasaray", "Turkey", 4),
        ("Celtic", "Scotland", 4),
        ("Union Saint-Gilloise", "Belgium", 4),
        ("Athletic Bilbao", "Spain", 4),
        ("Newcastle United", "England", 4),
    ];

    TEAMS.iter().map(|&(name, country, pot)| TeamRecord::new(name, country, pot)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawRules;
    use crate::registry::TeamRegistry;

    #[test]
    fn test_league_phase_shape() {
        let roster = league_phase_2025_26();
        let registry = TeamRegistry::new(&roster, &DrawRules::default()).unwrap();
        for pot in 1..=4 {
            assert_eq!(registry.pot_members(pot).len(), 9);
        }
        let mut constrained: Vec<&str> =
            registry.constrained_countries().map(|c| registry.country_name(c)).collect();
        constrained.sort_unstable();
        assert_eq!(constrained, vec!["England", "France", "Germany", "Italy", "Spain"]);
    }
}
