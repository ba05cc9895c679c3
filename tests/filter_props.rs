//! Property tests for the match engine and the selection laws.

use std::collections::HashSet;

use proptest::prelude::*;

use command_deck::{filter, Category, Command, CommandRegistry, FilterMode, SelectionController};

#[derive(Debug, Clone)]
struct Seed {
    title: String,
    description: String,
    keywords: Vec<String>,
    category: u8,
}

prop_compose! {
    fn seed()(
        title in "[A-Za-z ]{0,12}",
        description in "[A-Za-z ]{0,12}",
        keywords in prop::collection::vec("[A-Za-z]{0,8}", 0..3),
        category in 0u8..4,
    ) -> Seed {
        Seed { title, description, keywords, category }
    }
}

fn registry_from(seeds: &[Seed]) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for (i, seed) in seeds.iter().enumerate() {
        let category = match seed.category {
            0 => Category::QuickActions,
            1 => Category::Navigation,
            2 => Category::DeviceActions,
            _ => Category::Custom("ops".to_string()),
        };
        registry
            .register(
                Command::new(format!("cmd-{i}"), seed.title.clone())
                    .description(seed.description.clone())
                    .category(category)
                    .keywords(seed.keywords.clone()),
            )
            .unwrap();
    }
    registry
}

/// The matching rule, restated independently of the engine.
fn reference_match(seed: &Seed, needle: &str) -> bool {
    seed.title.trim().to_lowercase().contains(needle)
        || seed.description.trim().to_lowercase().contains(needle)
        || seed
            .keywords
            .iter()
            .any(|k| k.trim().to_lowercase().contains(needle))
}

proptest! {
    #[test]
    fn filtered_set_is_exactly_the_substring_matches(
        seeds in prop::collection::vec(seed(), 0..12),
        query in "[A-Za-z ]{1,6}",
    ) {
        let needle = query.trim().to_lowercase();
        prop_assume!(!needle.is_empty());

        let registry = registry_from(&seeds);
        let outcome = filter(&registry, &query);

        let expected: HashSet<String> = seeds
            .iter()
            .enumerate()
            .filter(|(_, s)| reference_match(s, &needle))
            .map(|(i, _)| format!("cmd-{i}"))
            .collect();
        let actual: HashSet<String> = outcome.flattened().map(|c| c.id.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn blank_query_returns_everything(seeds in prop::collection::vec(seed(), 0..12)) {
        let registry = registry_from(&seeds);
        let outcome = filter(&registry, "");
        prop_assert_eq!(outcome.mode, FilterMode::Default);
        prop_assert_eq!(outcome.len(), seeds.len());

        let mut ids: Vec<String> = outcome.flattened().map(|c| c.id.clone()).collect();
        ids.sort();
        let mut expected: Vec<String> = (0..seeds.len()).map(|i| format!("cmd-{i}")).collect();
        expected.sort();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn groups_are_ordered_and_order_preserving(
        seeds in prop::collection::vec(seed(), 0..12),
        query in "[A-Za-z ]{0,6}",
    ) {
        let registry = registry_from(&seeds);
        let outcome = filter(&registry, &query);

        // Builtin groups first, in their fixed order; customs after; no
        // empty groups rendered.
        let ranks: Vec<Option<usize>> = outcome
            .groups
            .iter()
            .map(|g| Category::BUILTIN.iter().position(|b| b == &g.category))
            .collect();
        let first_custom = ranks.iter().position(|r| r.is_none()).unwrap_or(ranks.len());
        prop_assert!(ranks[..first_custom].windows(2).all(|w| w[0] < w[1]));
        prop_assert!(ranks[first_custom..].iter().all(|r| r.is_none()));

        for group in &outcome.groups {
            prop_assert!(!group.commands.is_empty());
            // Registration order within the group: the numeric id suffixes
            // ascend.
            let order: Vec<usize> = group
                .commands
                .iter()
                .map(|c| c.id["cmd-".len()..].parse().unwrap())
                .collect();
            prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn filter_is_pure(
        seeds in prop::collection::vec(seed(), 0..12),
        query in "[A-Za-z ]{0,6}",
    ) {
        let registry = registry_from(&seeds);
        let first = filter(&registry, &query);
        let second = filter(&registry, &query);
        prop_assert_eq!(first.mode, second.mode);
        let first_ids: Vec<String> = first.flattened().map(|c| c.id.clone()).collect();
        let second_ids: Vec<String> = second.flattened().map(|c| c.id.clone()).collect();
        prop_assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn repeated_down_clamps_to_the_last_row(len in 0usize..20, steps in 0usize..40) {
        let mut selection = SelectionController::new();
        selection.reset(len);
        for _ in 0..steps {
            selection.move_down();
        }
        if len == 0 {
            prop_assert_eq!(selection.selected(), None);
        } else {
            prop_assert_eq!(selection.selected(), Some(steps.min(len - 1)));
        }
    }

    #[test]
    fn up_never_passes_the_top(len in 0usize..20, downs in 0usize..40, ups in 0usize..40) {
        let mut selection = SelectionController::new();
        selection.reset(len);
        for _ in 0..downs {
            selection.move_down();
        }
        for _ in 0..ups {
            selection.move_up();
        }
        if len == 0 {
            prop_assert_eq!(selection.selected(), None);
        } else {
            let expected = downs.min(len - 1).saturating_sub(ups);
            prop_assert_eq!(selection.selected(), Some(expected));
        }
    }

    #[test]
    fn reset_always_returns_to_the_top(len in 0usize..20, churn in 0usize..10) {
        let mut selection = SelectionController::new();
        selection.reset(len);
        for _ in 0..churn {
            selection.move_down();
        }
        selection.reset(len);
        if len == 0 {
            prop_assert_eq!(selection.selected(), None);
        } else {
            prop_assert_eq!(selection.selected(), Some(0));
        }
    }
}
