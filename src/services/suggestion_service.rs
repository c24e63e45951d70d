use sea_orm::*;
use std::collections::HashSet;
use crate::models::name_history;

/// Salles et séries de tournois publiques proposées à tout le monde,
/// dans cet ordre, avant l'historique personnel de l'utilisateur
pub const PUBLIC_TOURNAMENT_LOCATIONS: [&str; 3] = [
    "CTP 台中崇德",
    "CTP 七期市政",
    "6BET TPE",
];

/// Au plus 8 noms issus de l'historique personnel par recherche
const HISTORY_LIMIT: usize = 8;

pub struct SuggestionService;

impl SuggestionService {
    /// Suggestions de noms de tournois pour l'autocomplétion:
    /// liste publique filtrée d'abord, puis l'historique de l'utilisateur.
    /// Une liste vide est un résultat valide, pas une erreur.
    pub async fn search(
        db: &DatabaseConnection,
        user_id: i32,
        query: &str,
    ) -> Result<Vec<String>, DbErr> {
        let history = name_history::Entity::find()
            .filter(name_history::Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|row| row.name)
            .collect();

        Ok(Self::merge_suggestions(query, history))
    }

    /// Fusionne la liste publique et l'historique personnel.
    /// - requête normalisée (trim + minuscules); vide => tout correspond
    /// - correspondance par sous-chaîne, insensible à la casse
    /// - historique trié alphabétiquement (insensible à la casse), max 8
    /// - déduplication par égalité exacte, première occurrence gagne
    pub fn merge_suggestions(query: &str, user_names: Vec<String>) -> Vec<String> {
        let normalized = query.trim().to_lowercase();
        let matches = |name: &str| normalized.is_empty() || name.to_lowercase().contains(&normalized);

        let mut history: Vec<String> = user_names.into_iter().filter(|n| matches(n)).collect();
        history.sort_by_key(|n| n.to_lowercase());
        history.truncate(HISTORY_LIMIT);

        let mut seen: HashSet<String> = HashSet::new();
        let mut suggestions: Vec<String> = Vec::new();
        let mut push = |value: &str| {
            let trimmed = value.trim();
            if !trimmed.is_empty() && seen.insert(trimmed.to_string()) {
                suggestions.push(trimmed.to_string());
            }
        };

        for location in PUBLIC_TOURNAMENT_LOCATIONS {
            if matches(location) {
                push(location);
            }
        }

        for name in &history {
            push(name);
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| ToString::to_string(v)).collect()
    }

    #[test]
    fn test_query_filters_public_list() {
        let result = SuggestionService::merge_suggestions("ctp", Vec::new());
        assert_eq!(result, names(&["CTP 台中崇德", "CTP 七期市政"]));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let result = SuggestionService::merge_suggestions(
            "  ",
            names(&["home game chez Léo"]),
        );
        assert_eq!(
            result,
            names(&["CTP 台中崇德", "CTP 七期市政", "6BET TPE", "home game chez Léo"]),
        );
    }

    #[test]
    fn test_public_matches_precede_history() {
        let result = SuggestionService::merge_suggestions(
            "tpe",
            names(&["Aces TPE weekly"]),
        );
        assert_eq!(result, names(&["6BET TPE", "Aces TPE weekly"]));
    }

    #[test]
    fn test_history_deduplicated_against_public_list() {
        let result = SuggestionService::merge_suggestions(
            "6bet",
            names(&["6BET TPE"]),
        );
        assert_eq!(result, names(&["6BET TPE"]));
    }

    #[test]
    fn test_history_sorted_case_insensitively() {
        let result = SuggestionService::merge_suggestions(
            "series",
            names(&["zeta Series", "Alpha series", "beta SERIES"]),
        );
        assert_eq!(result, names(&["Alpha series", "beta SERIES", "zeta Series"]));
    }

    #[test]
    fn test_history_capped_at_eight() {
        let many: Vec<String> = (0..12).map(|i| format!("Tournoi {:02}", i)).collect();
        let result = SuggestionService::merge_suggestions("tournoi", many);
        assert_eq!(result.len(), 8);
        assert_eq!(result[0], "Tournoi 00");
        assert_eq!(result[7], "Tournoi 07");
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let result = SuggestionService::merge_suggestions("wsop", names(&["6BET TPE"]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_blank_history_names_skipped() {
        let result = SuggestionService::merge_suggestions("", names(&["   "]));
        assert_eq!(result.len(), PUBLIC_TOURNAMENT_LOCATIONS.len());
    }

    #[test]
    fn test_idempotent_for_same_input() {
        let history = names(&["Aces TPE weekly", "6BET TPE"]);
        let first = SuggestionService::merge_suggestions("tpe", history.clone());
        let second = SuggestionService::merge_suggestions("tpe", history);
        assert_eq!(first, second);
    }
}
