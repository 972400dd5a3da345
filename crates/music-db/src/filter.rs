use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

use models::Filter;

use crate::fold;

/// One `WHERE` conjunct together with the value it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Predicate {
    Contains(&'static str, String),
    OnOrAfter(&'static str, NaiveDate),
    OnOrBefore(&'static str, NaiveDate),
}

impl Predicate {
    fn push_onto(self, query: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Predicate::Contains(column, needle) => {
                query
                    .push(column)
                    .push(" LIKE ")
                    .push_bind(like_pattern(&fold(&needle)))
                    .push(" ESCAPE '\\'");
            }
            Predicate::OnOrAfter(column, date) => {
                query.push(column).push(" >= ").push_bind(date);
            }
            Predicate::OnOrBefore(column, date) => {
                query.push(column).push(" <= ").push_bind(date);
            }
        }
    }
}

pub(crate) fn predicates(filter: &Filter) -> Vec<Predicate> {
    let substrings = [
        ("group_name_folded", &filter.group),
        ("song_name_folded", &filter.song),
        ("lyrics_folded", &filter.text),
        ("link_folded", &filter.link),
    ];

    let mut out: Vec<Predicate> = substrings
        .into_iter()
        .filter_map(|(column, value)| {
            value
                .as_ref()
                .map(|needle| Predicate::Contains(column, needle.clone()))
        })
        .collect();

    if let Some(from) = filter.release_from {
        out.push(Predicate::OnOrAfter("release_date", from));
    }
    if let Some(to) = filter.release_to {
        out.push(Predicate::OnOrBefore("release_date", to));
    }
    out
}

/// Appends `WHERE ... AND ...` for every predicate, then ordering and paging.
///
/// Songs without a release date sort after dated ones.
pub(crate) fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) {
    for (idx, predicate) in predicates(filter).into_iter().enumerate() {
        query.push(if idx == 0 { " WHERE " } else { " AND " });
        predicate.push_onto(query);
    }

    query
        .push(" ORDER BY release_date IS NULL, release_date, group_name, song_name LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset);
}

/// `%needle%` with LIKE metacharacters escaped so the needle matches literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_predicates() {
        assert!(predicates(&Filter::default()).is_empty());
    }

    #[test]
    fn predicates_follow_field_order() {
        let from = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let filter = Filter {
            link: Some("youtube".to_string()),
            group: Some("Muse".to_string()),
            release_from: Some(from),
            ..Filter::default()
        };
        assert_eq!(
            predicates(&filter),
            vec![
                Predicate::Contains("group_name_folded", "Muse".to_string()),
                Predicate::Contains("link_folded", "youtube".to_string()),
                Predicate::OnOrAfter("release_date", from),
            ]
        );
    }

    #[test]
    fn sql_keeps_placeholders_in_step_with_predicates() {
        let filter = Filter {
            song: Some("Hole".to_string()),
            release_to: NaiveDate::from_ymd_opt(2010, 1, 1),
            ..Filter::default()
        };
        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM music_library");
        push_filter(&mut query, &filter);
        assert_eq!(
            query.sql(),
            "SELECT * FROM music_library WHERE song_name_folded LIKE ? ESCAPE '\\' AND release_date <= ? \
             ORDER BY release_date IS NULL, release_date, group_name, song_name LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn needles_are_folded_beyond_ascii() {
        assert_eq!(like_pattern(&fold("КИНО")), "%кино%");
        assert_eq!(like_pattern(&fold("BJÖRK")), "%björk%");
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("Muse"), "%Muse%");
        assert_eq!(like_pattern("100%_\\"), "%100\\%\\_\\\\%");
    }
}
