mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{assert_invariants, final_hitboxes};
use proptest::prelude::*;
use spiral_cloud::{
    layout, preflight, replay, stacked_min, Dimensions, HeuristicMeasurer, LayoutConfig, LayoutStats,
    ProportionalGrowth, Size, Word, WordCloud, WordStats,
};

fn word_list() -> impl Strategy<Value = Vec<Word>> {
    prop::collection::vec(("[a-zA-Z]{1,8}", 0.5f64..10.0), 1..8).prop_map(|items| {
        items
            .into_iter()
            .map(|(text, weight)| Word::new(text, weight).unwrap())
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn placed_words_never_overlap(
        words in word_list(),
        width in 60.0f64..300.0,
        height in 60.0f64..300.0,
        seed in any::<u64>(),
        grow_to_fit in any::<bool>(),
    ) {
        let config = LayoutConfig { grow_to_fit, seed: Some(seed), ..LayoutConfig::default() };
        let size = Size::new(width, height);
        let result = layout(size, &words, &config, HeuristicMeasurer::default()).unwrap();

        assert_invariants(&result, config.buffer);
        prop_assert_eq!(result.placed.len() + result.unplaced.len(), words.len());
        if grow_to_fit {
            prop_assert!(result.is_complete());
        } else {
            prop_assert_eq!(result.canvas, size);
        }
    }

    #[test]
    fn replay_rebuilds_final_hitboxes(
        words in word_list(),
        seed in any::<u64>(),
    ) {
        let config = LayoutConfig { seed: Some(seed), ..LayoutConfig::default() };
        let result = layout(Size::new(120.0, 80.0), &words, &config, HeuristicMeasurer::default()).unwrap();

        let engine = replay(&result.placed, result.canvas, config.buffer);
        prop_assert_eq!(engine.hitboxes(), result.hitboxes.as_slice());
        prop_assert_eq!(final_hitboxes(&result), result.hitboxes.clone());
    }

    #[test]
    fn canvas_never_shrinks_while_growing(
        words in word_list(),
        width in 30.0f64..120.0,
        height in 30.0f64..120.0,
        seed in any::<u64>(),
    ) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&seen);
        let cloud = WordCloud::new(LayoutConfig { seed: Some(seed), ..LayoutConfig::default() })
            .with_growth(move |current: Size, _provided: Size| {
                let mut seen = recorder.borrow_mut();
                seen.push(current);
                // Each step shrinks one axis; only the other may take effect.
                if seen.len() % 2 == 0 {
                    Size::new(current.width * 1.3, current.height * 0.8)
                } else {
                    Size::new(current.width * 0.8, current.height * 1.3)
                }
            });
        let size = Size::new(width, height);
        let result = cloud.layout(size, &words, HeuristicMeasurer::default()).unwrap();

        let mut sizes = seen.borrow().clone();
        sizes.push(result.canvas);
        prop_assert_eq!(sizes[0], size);
        prop_assert_eq!(sizes.len() as u64, result.stats.growths() + 1);
        for step in sizes.windows(2) {
            prop_assert!(step[1].width >= step[0].width && step[1].height >= step[0].height);
            prop_assert!(step[1] != step[0]);
        }
    }

    #[test]
    fn same_seed_same_layout(words in word_list(), seed in any::<u64>()) {
        let config = LayoutConfig { seed: Some(seed), ..LayoutConfig::default() };
        let size = Size::new(150.0, 150.0);
        let a = layout(size, &words, &config, HeuristicMeasurer::default()).unwrap();
        let b = layout(size, &words, &config, HeuristicMeasurer::default()).unwrap();
        prop_assert_eq!(a.canvas, b.canvas);
        prop_assert_eq!(a.placed, b.placed);
    }

    #[test]
    fn preflight_meets_every_condition(
        dims in prop::collection::vec((1.0f64..400.0, 1.0f64..200.0), 1..12),
        width in 20.0f64..300.0,
        height in 20.0f64..300.0,
    ) {
        let dims: Vec<Dimensions> = dims.into_iter().map(|(w, h)| Dimensions::new(w, h)).collect();
        let start = Size::new(width, height);
        let mut stats = LayoutStats::new();
        let canvas = preflight(&dims, start, start, &ProportionalGrowth::default(), 500, &mut stats).unwrap();

        let need = WordStats::collect(&dims);
        prop_assert!(canvas.width >= start.width && canvas.height >= start.height);
        prop_assert!(need.max_width <= canvas.width && need.max_height <= canvas.height);
        prop_assert!(need.total_area <= canvas.area());
        let (stacked_width, stacked_height) = stacked_min(&dims, canvas);
        prop_assert!(stacked_width <= canvas.width && stacked_height <= canvas.height);
    }
}
