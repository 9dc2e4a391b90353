// Example: print how scroll offset maps to frames (linear first half, eased back half).
use scrollreel::{ScrollMapping, ease_back_half, map_frame, scroll_fraction};

fn main() {
    let mapping = ScrollMapping::new(160, 2.0).expect("valid mapping");
    let viewport_height = 800.0;
    let distance = mapping.total_scroll_distance(viewport_height);

    println!("total_scroll_distance={distance}");
    for step in 0..=20 {
        let offset = distance * step as f64 / 16.0;
        let linear = scroll_fraction(offset, distance);
        println!(
            "offset={offset:>7.1} linear={linear:.4} eased={:.4} frame={}",
            ease_back_half(linear),
            map_frame(offset, viewport_height, &mapping)
        );
    }
}
