use shared::domain::Course;

/// Lowercased search text, computed once per recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Case-insensitive substring match on the title or the institution.
    pub fn matches(&self, course: &Course) -> bool {
        self.is_empty()
            || course.title.to_lowercase().contains(&self.needle)
            || course.university.to_lowercase().contains(&self.needle)
    }
}

/// Courses matching `raw`, in collection order.
pub fn visible_subset(raw: &str, courses: &[Course]) -> Vec<Course> {
    let query = SearchQuery::new(raw);
    if query.is_empty() {
        return courses.to_vec();
    }
    courses
        .iter()
        .filter(|course| query.matches(course))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Course> {
        vec![
            Course::new(1, "Data Science", "MIT", "Technology", "4 years"),
            Course::new(2, "Law", "Oxford", "Humanities", "3 years"),
            Course::new(3, "Database Systems", "Stanford", "Technology", "1 semester"),
            Course::new(4, "Medicine", "University of Nairobi", "Health", "6 years"),
        ]
    }

    fn ids(courses: &[Course]) -> Vec<i64> {
        courses.iter().map(|course| course.id.0).collect()
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        assert_eq!(ids(&visible_subset("", &catalog())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn matches_title_case_insensitively() {
        assert_eq!(ids(&visible_subset("DA", &catalog())), vec![1, 3]);
    }

    #[test]
    fn matches_university() {
        assert_eq!(ids(&visible_subset("oxford", &catalog())), vec![2]);
        assert_eq!(ids(&visible_subset("nairobi", &catalog())), vec![4]);
    }

    #[test]
    fn category_and_duration_are_not_searched() {
        assert!(visible_subset("technology", &catalog()).is_empty());
        assert!(visible_subset("years", &catalog()).is_empty());
    }

    #[test]
    fn empty_collection_yields_nothing_for_any_query() {
        assert!(visible_subset("", &[]).is_empty());
        assert!(visible_subset("law", &[]).is_empty());
    }

    #[test]
    fn subset_members_all_match_and_keep_relative_order() {
        let courses = catalog();
        for raw in ["", "a", "S", "ford", "y", "zzz", "univ"] {
            let query = SearchQuery::new(raw);
            let subset = visible_subset(raw, &courses);
            assert!(subset.iter().all(|course| query.matches(course)));

            let positions: Vec<usize> = subset
                .iter()
                .map(|c| courses.iter().position(|o| o == c).expect("member of C"))
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{raw:?}");

            assert_eq!(subset, visible_subset(raw, &courses), "{raw:?}");
        }
    }

    #[test]
    fn whitespace_is_part_of_the_query() {
        assert_eq!(ids(&visible_subset("of n", &catalog())), vec![4]);
    }
}
