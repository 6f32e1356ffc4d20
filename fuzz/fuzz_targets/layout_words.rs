use honggfuzz::fuzz;
use spiral_cloud::{layout, HeuristicMeasurer, LayoutConfig, Size, Word};

// Byte layout: width, height, flags, then (length, weight, text...) records.
fn words_from(data: &[u8]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut rest = data;
    while let [len, weight, tail @ ..] = rest {
        let len = (*len as usize % 12).min(tail.len());
        let text = String::from_utf8_lossy(&tail[..len]).into_owned();
        if let Ok(word) = Word::new(text, 1.0 + f64::from(*weight % 10)) {
            words.push(word);
        }
        rest = &tail[len..];
        if words.len() >= 24 {
            break;
        }
    }
    words
}

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let [w, h, flags, body @ ..] = data else {
                return;
            };
            let size = Size::new(20.0 + f64::from(*w) * 2.0, 20.0 + f64::from(*h) * 2.0);
            let config = LayoutConfig {
                grow_to_fit: flags & 1 == 1,
                tight_packing: flags & 2 == 2,
                seed: Some(u64::from(*flags)),
                ..LayoutConfig::default()
            };
            let words = words_from(body);
            let Ok(result) = layout(size, &words, &config, HeuristicMeasurer::default()) else {
                return;
            };

            let boxes: Vec<_> = result.placed.iter().map(|p| p.hitbox(result.canvas)).collect();
            for (i, a) in boxes.iter().enumerate() {
                assert!(!a.outside(result.canvas, config.buffer));
                for b in &boxes[i + 1..] {
                    assert!(!a.collides(b, config.buffer));
                }
            }
            assert_eq!(result.placed.len() + result.unplaced.len(), words.len());
        });
    }
}
