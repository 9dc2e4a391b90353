// Example: a simulated host driving a player at 60fps.
//
// The host owns the clock, the scroll position and the "image elements". It ticks the
// preloader, forwards bursts of scroll events, and runs `on_refresh` once per frame when the
// player asked for it.
use scrollreel_adapter::{
    DisplayedFrame, FrameRequest, NavigationIntent, Player, PlayerOptions, ScrollRequest, Viewport,
};

#[derive(Debug)]
struct ImageElement {
    src: String,
}

fn main() {
    let options = PlayerOptions::new("/assets/scrollanimation", 160, 2.0)
        .with_header_hide_offset(Some(50.0))
        .with_initial_viewport(Some(Viewport::new(1280.0, 800.0)))
        .with_on_navigate(Some(|intent: NavigationIntent| {
            println!("navigate: {intent:?}");
        }));
    let mut player: Player<ImageElement> = Player::new(options).expect("valid options");

    let mut source = |req: &FrameRequest<'_>| -> Result<ImageElement, String> {
        Ok(ImageElement {
            src: req.path.to_owned(),
        })
    };

    let mut now_ms = 0u64;
    let mut refresh_requested = false;
    let mut scroll_y = 0.0f64;

    for frame in 0..240u64 {
        now_ms = now_ms.saturating_add(16);
        player.tick(now_ms, &mut source);

        // Simulate a trackpad: several scroll events per display frame.
        if frame >= 120 {
            for _ in 0..8 {
                scroll_y += 2.5;
                if player.on_scroll(scroll_y) == ScrollRequest::Scheduled {
                    refresh_requested = true;
                }
            }
        }

        if refresh_requested {
            refresh_requested = false;
            player.on_refresh();
        }

        if frame % 20 == 0 {
            let shown = match player.displayed_frame() {
                DisplayedFrame::Loading => String::from("<loading>"),
                DisplayedFrame::Empty { frame } => format!("<empty {frame}>"),
                DisplayedFrame::Image { handle, .. } => handle.src.clone(),
            };
            println!(
                "t={now_ms}ms phase={:?} scroll={scroll_y} frame={} header={:?} shown={shown}",
                player.phase(),
                player.current_frame(),
                player.header(),
            );
        }
    }

    // Rotate to portrait: the header switches to the mobile variant.
    player.on_layout(Viewport::new(390.0, 844.0));
    if player.on_refresh() {
        println!("recomputed after resize: frame={}", player.current_frame());
    }
    println!("header after rotate: {:?}", player.header());

    player.navigate(NavigationIntent::Authenticate);
    player.unmount();
}
