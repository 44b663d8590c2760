//! Property-based tests for the thumbnail inclusion filter

use project_wizard::filter::should_include;
use proptest::prelude::*;

fn plain_thumbnail() -> impl Strategy<Value = String> {
    "[tT][hH][uU][mM][bB]\\.[pP][nN][gG]"
}

fn promotion_thumbnail() -> impl Strategy<Value = String> {
    "[tT][hH][uU][mM][bB][wW][iI][tT][hH][pP][rR][oO][mM][oO][tT][iI][oO][nN]\\.[pP][nN][gG]"
}

fn parent_dir() -> impl Strategy<Value = String> {
    "([A-Za-z]{1,8}/){0,3}"
}

proptest! {
    #[test]
    fn other_items_are_always_included(
        name in "([a-z]{1,8}/){0,2}[a-z]{1,8}\\.(lua|json|txt|xml)",
        promote in any::<bool>(),
    ) {
        prop_assert!(should_include(&name, promote));
    }

    #[test]
    fn exactly_one_thumbnail_survives(
        dir in parent_dir(),
        plain in plain_thumbnail(),
        promoted in promotion_thumbnail(),
        promote in any::<bool>(),
    ) {
        let plain_kept = should_include(&format!("{}{}", dir, plain), promote);
        let promoted_kept = should_include(&format!("{}{}", dir, promoted), promote);

        prop_assert_ne!(plain_kept, promoted_kept);
        prop_assert_eq!(promoted_kept, promote);
    }

    #[test]
    fn thumbnail_names_only_match_whole_file_names(
        prefix in "[a-z]{1,4}",
        promote in any::<bool>(),
    ) {
        let prefixed = format!("{}thumb.png", prefix);
        let suffixed = format!("thumb.png.{}", prefix);
        prop_assert!(should_include(&prefixed, promote));
        prop_assert!(should_include(&suffixed, promote));
    }
}
