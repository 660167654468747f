use stringdatadeque::{CircularDeque, StringDeque};

use proptest::prelude::*;

// Strategy for generating short element strings
fn elements() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9 ]{0,12}", 0..40)
}

// Strategy for generating separators
fn separators() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("\n".to_string()),
        Just(", ".to_string()),
        "[|;:-]{1,3}",
    ]
}

proptest! {
    #[test]
    fn test_render_matches_join(values in elements(), separator in separators()) {
        let deque = StringDeque::with_data(values.clone(), separator.clone());
        prop_assert_eq!(deque.render(), values.join(&separator));
        prop_assert_eq!(deque.len(), values.len());
    }

    #[test]
    fn test_circular_keeps_last_capacity(values in elements(), capacity in 1usize..16) {
        let mut deque = CircularDeque::new(capacity).unwrap();
        for value in &values {
            deque.append(value);
            prop_assert!(deque.len() <= capacity);
        }

        let kept: Vec<&String> = values.iter().skip(values.len().saturating_sub(capacity)).collect();
        let stored: Vec<&String> = deque.iter().collect();
        prop_assert_eq!(stored, kept);
    }

    #[test]
    fn test_append_then_draw_restores_render(values in elements(), extra in "[a-z]{0,8}", separator in separators()) {
        let mut deque = StringDeque::with_data(values, separator);
        let before = deque.render();

        deque.append(&extra);
        let drawn = deque.draw_last().unwrap();
        prop_assert_eq!(drawn, extra);
        prop_assert_eq!(deque.render(), before);
    }

    #[test]
    fn test_negative_index_mirrors_positive(values in prop::collection::vec("[a-z]{1,6}", 1..20), offset in 0usize..20) {
        let deque = StringDeque::with_data(values.clone(), "");
        let position = offset % values.len();
        let negative = position as isize - values.len() as isize;
        prop_assert_eq!(deque.get(position as isize).unwrap(), deque.get(negative).unwrap());
    }
}
