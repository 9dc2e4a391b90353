use crate::*;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_f64(&mut self, start: f64, end: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        start + (end - start) * unit
    }
}

fn mapping(total_frames: u32, factor: f64) -> ScrollMapping {
    ScrollMapping::new(total_frames, factor).unwrap()
}

fn sequence(total_frames: u32) -> FrameSequence {
    FrameSequence::new("/assets/scrollanimation", "webp", total_frames).unwrap()
}

#[test]
fn lathe_scenario_hits_expected_frames() {
    let m = mapping(160, 2.0);
    assert_eq!(m.total_scroll_distance(800.0), 1600.0);
    assert_eq!(map_frame(0.0, 800.0, &m), 1);
    assert_eq!(map_frame(800.0, 800.0, &m), 80);
    assert_eq!(map_frame(1600.0, 800.0, &m), 160);
    assert_eq!(map_frame(3000.0, 800.0, &m), 160);
}

#[test]
fn milling_scenario_uses_back_half_curve() {
    let m = mapping(160, 1.2);
    let distance: f64 = 1000.0 * 1.2;
    let fraction = 1100.0 / distance;
    assert!(fraction > 0.5);
    let t = (fraction - 0.5) * 2.0;
    let eased = 0.5 + (t * t) / 2.0;
    let expected = (eased * 160.0).ceil() as u32;

    assert_eq!(expected, 136);
    assert_eq!(map_frame(1100.0, 1000.0, &m), expected);
    assert_eq!(m.frame_for(1100.0, 1000.0), 136);
}

#[test]
fn ceil_is_used_on_exact_frame_boundaries() {
    let m = mapping(160, 2.0);
    // 0.25 and 0.5 are exact in binary; ceil keeps the boundary frame.
    assert_eq!(map_frame(400.0, 800.0, &m), 40);
    assert_eq!(map_frame(800.0, 800.0, &m), 80);
    // 0.75 → 0.5 + 0.5^2 / 2 = 0.625 → 100 exactly.
    assert_eq!(map_frame(1200.0, 800.0, &m), 100);
    // Anything past zero shows at least frame 1, anything past a boundary moves on.
    assert_eq!(map_frame(0.001, 800.0, &m), 1);
    assert_eq!(map_frame(400.5, 800.0, &m), 41);
}

#[test]
fn non_positive_offsets_map_to_first_frame() {
    let m = mapping(160, 2.0);
    for off in [0.0, -0.0, -1.0, -5000.0, f64::NEG_INFINITY, f64::NAN] {
        assert_eq!(map_frame(off, 800.0, &m), 1, "offset {off}");
    }
}

#[test]
fn offsets_past_the_scroll_distance_map_to_last_frame() {
    let mut rng = Lcg::new(7);
    for _ in 0..500 {
        let total = 1 + (rng.next_u64() % 400) as u32;
        let factor = rng.gen_f64(0.1, 5.0);
        let height = rng.gen_f64(100.0, 2000.0);
        let m = mapping(total, factor);
        let distance = m.total_scroll_distance(height);
        let off = distance + rng.gen_f64(0.0, 10_000.0);
        assert_eq!(map_frame(off, height, &m), total);
        assert_eq!(map_frame(distance, height, &m), total);
    }
    assert_eq!(map_frame(f64::INFINITY, 800.0, &mapping(160, 2.0)), 160);
}

#[test]
fn frames_never_decrease_as_scroll_increases() {
    let mut rng = Lcg::new(42);
    for _ in 0..50 {
        let total = 1 + (rng.next_u64() % 300) as u32;
        let factor = rng.gen_f64(0.2, 4.0);
        let height = rng.gen_f64(200.0, 1500.0);
        let m = mapping(total, factor);
        let distance = m.total_scroll_distance(height);

        let mut offsets: Vec<f64> = (0..400)
            .map(|_| rng.gen_f64(0.0, distance * 1.2))
            .collect();
        offsets.sort_by(f64::total_cmp);

        let mut prev = 1u32;
        for off in offsets {
            let frame = map_frame(off, height, &m);
            assert!((1..=total).contains(&frame));
            assert!(frame >= prev, "frame went back: {prev} -> {frame} at {off}");
            prev = frame;
        }
    }
}

#[test]
fn mapping_is_pure() {
    let m = mapping(160, 1.2);
    let mut rng = Lcg::new(3);
    for _ in 0..200 {
        let off = rng.gen_f64(-100.0, 2000.0);
        let h = rng.gen_f64(300.0, 1200.0);
        assert_eq!(map_frame(off, h, &m), map_frame(off, h, &m));
    }
}

#[test]
fn back_half_curve_is_continuous_at_midpoint() {
    assert_eq!(ease_back_half(0.5), 0.5);
    assert_eq!(ease_back_half(0.0), 0.0);
    assert_eq!(ease_back_half(1.0), 1.0);

    let eps = 1e-9;
    assert!((ease_back_half(0.5 + eps) - 0.5).abs() < 1e-12);
    assert!((ease_back_half(0.5 - eps) - 0.5).abs() < 1e-8);

    // No jump in the frame index across the midpoint.
    let m = mapping(160, 2.0);
    let below = map_frame(800.0 - 1e-6, 800.0, &m);
    let above = map_frame(800.0 + 1e-6, 800.0, &m);
    assert!(above - below <= 1);
}

#[test]
fn degenerate_viewport_maps_to_first_frame() {
    let m = mapping(160, 2.0);
    assert_eq!(map_frame(500.0, 0.0, &m), 1);
    assert_eq!(map_frame(500.0, -10.0, &m), 1);
    assert_eq!(map_frame(500.0, f64::NAN, &m), 1);
    assert_eq!(scroll_fraction(500.0, 0.0), 0.0);
}

#[test]
fn invalid_config_fails_fast() {
    assert_eq!(ScrollMapping::new(0, 2.0), Err(ConfigError::NoFrames));
    assert!(matches!(
        ScrollMapping::new(160, 0.0),
        Err(ConfigError::InvalidScrollDistance(_))
    ));
    assert!(matches!(
        ScrollMapping::new(160, -1.0),
        Err(ConfigError::InvalidScrollDistance(_))
    ));
    assert!(ScrollMapping::new(160, f64::NAN).is_err());
    assert!(ScrollMapping::new(160, f64::INFINITY).is_err());
    assert_eq!(
        FrameSequence::new("/a", "webp", 0),
        Err(ConfigError::NoFrames)
    );
    assert!(matches!(
        Preloader::<u32>::with_pacing(sequence(10), 0, 100),
        Err(ConfigError::EmptyBatch)
    ));
}

#[test]
fn config_errors_have_readable_messages() {
    let msg = ConfigError::InvalidScrollDistance(-2.0).to_string();
    assert!(msg.contains("scroll distance factor"));
    assert!(msg.contains("-2"));
}

#[test]
fn sequence_paths_are_zero_padded() {
    let s = sequence(160);
    assert_eq!(s.path(1).as_deref(), Some("/assets/scrollanimation/0001.webp"));
    assert_eq!(s.path(160).as_deref(), Some("/assets/scrollanimation/0160.webp"));
    assert_eq!(s.path(0), None);
    assert_eq!(s.path(161), None);
    assert_eq!(s.path_for_index(9).as_deref(), Some("/assets/scrollanimation/0010.webp"));
    assert_eq!(s.path_for_index(160), None);

    let s = FrameSequence::new("./assets/anim/", ".webp", 12).unwrap();
    assert_eq!(s.base_path(), "./assets/anim");
    assert_eq!(s.extension(), "webp");
    assert_eq!(s.path(12).as_deref(), Some("./assets/anim/0012.webp"));
}

fn frame_numbers(req: &FrameRequest<'_>) -> Result<u32, ()> {
    Ok(req.frame)
}

#[test]
fn preloader_paces_batches_on_the_host_clock() {
    let mut p = Preloader::new(sequence(160));
    let mut source = frame_numbers;

    assert_eq!(p.poll(0, &mut source), PreloadPoll::Waiting { resume_at_ms: 100 });
    assert_eq!(p.issued(), 10);

    // Pause not over yet: nothing more is requested.
    assert_eq!(p.poll(50, &mut source), PreloadPoll::Waiting { resume_at_ms: 100 });
    assert_eq!(p.issued(), 10);
    assert!(!p.is_complete());

    let mut now = 100;
    let mut batches = 1;
    loop {
        match p.poll(now, &mut source) {
            PreloadPoll::Waiting { resume_at_ms } => {
                assert!(!p.is_complete());
                assert_eq!(resume_at_ms, now + 100);
                batches += 1;
                now = resume_at_ms;
            }
            PreloadPoll::Completed => break,
            PreloadPoll::Idle => panic!("idle before completion"),
        }
    }

    // 16 full batches, each followed by a pause; completion after the last pause.
    assert_eq!(batches, 16);
    assert_eq!(now, 1600);
    assert!(p.is_complete());
    assert_eq!(p.poll(now + 1000, &mut source), PreloadPoll::Idle);

    let state = p.state();
    assert_eq!(state.len(), 160);
    for (i, h) in state.handles().iter().enumerate() {
        assert_eq!(*h, Some(i as u32 + 1));
    }
}

#[test]
fn trailing_partial_batch_completes_without_pause() {
    let mut p = Preloader::new(sequence(25));
    let mut source = frame_numbers;
    assert_eq!(p.poll(0, &mut source), PreloadPoll::Waiting { resume_at_ms: 100 });
    assert_eq!(p.poll(100, &mut source), PreloadPoll::Waiting { resume_at_ms: 200 });
    assert_eq!(p.poll(200, &mut source), PreloadPoll::Completed);
    assert_eq!(p.state().len(), 25);
    assert!(p.state().is_complete());
}

#[test]
fn custom_pacing_is_respected() {
    let mut p = Preloader::with_pacing(sequence(7), 3, 0).unwrap();
    let mut source = frame_numbers;
    assert_eq!(p.poll(5, &mut source), PreloadPoll::Waiting { resume_at_ms: 5 });
    assert_eq!(p.poll(5, &mut source), PreloadPoll::Waiting { resume_at_ms: 5 });
    assert_eq!(p.poll(5, &mut source), PreloadPoll::Completed);
    assert_eq!(p.issued(), 7);
}

#[test]
fn failed_loads_leave_empty_slots_and_do_not_block_completion() {
    let mut requested: Vec<String> = Vec::new();
    let mut source = |req: &FrameRequest<'_>| {
        requested.push(String::from(req.path));
        if req.frame % 4 == 0 {
            Err("404")
        } else {
            Ok(req.index)
        }
    };

    let mut p = Preloader::with_pacing(sequence(12), 5, 10).unwrap();
    let mut now = 0;
    while let PreloadPoll::Waiting { resume_at_ms } = p.poll(now, &mut source) {
        now = resume_at_ms;
    }
    drop(source);

    assert!(p.is_complete());
    assert_eq!(requested.len(), 12);
    assert_eq!(requested[0], "/assets/scrollanimation/0001.webp");
    assert_eq!(p.state().len(), 12);
    assert_eq!(p.state().failed_count(), 3);
    assert_eq!(p.state().get(0), Some(&0));
    assert_eq!(p.state().get(3), None);
    assert_eq!(p.state().get(4), Some(&4));
}

#[test]
fn late_failures_empty_the_slot() {
    let mut p = Preloader::new(sequence(10));
    let mut source = frame_numbers;
    // Nothing requested yet.
    assert!(!p.mark_failed(0));

    p.poll(0, &mut source);
    assert!(p.mark_failed(4));
    assert!(!p.mark_failed(4));
    assert!(!p.mark_failed(10));
    assert_eq!(p.state().get(4), None);

    assert_eq!(p.poll(100, &mut source), PreloadPoll::Completed);
    assert_eq!(p.into_state().failed_count(), 1);
}

#[test]
fn scheduler_coalesces_to_one_run_with_latest_sample() {
    let m = mapping(160, 2.0);
    let mut s = RefreshScheduler::new();
    let mut runs = 0;

    assert_eq!(s.notify(0.0), ScrollRequest::Scheduled);
    for i in 1..1000 {
        assert_eq!(s.notify(i as f64), ScrollRequest::Coalesced);
    }
    assert!(s.is_pending());
    assert_eq!(s.coalesced_count(), 999);

    let mut frame = 1;
    while let Some(off) = s.on_refresh() {
        runs += 1;
        assert_eq!(off, 999.0);
        frame = map_frame(off, 800.0, &m);
    }
    assert_eq!(runs, 1);
    assert_eq!(frame, map_frame(999.0, 800.0, &m));
    assert_eq!(s.on_refresh(), None);

    // The next notification after a refresh schedules again.
    assert_eq!(s.notify(5.0), ScrollRequest::Scheduled);
}

#[test]
fn released_scheduler_drops_everything() {
    let mut s = RefreshScheduler::new();
    assert_eq!(s.notify(10u64), ScrollRequest::Scheduled);
    s.release();
    assert!(s.is_released());
    assert!(!s.is_pending());
    assert_eq!(s.on_refresh(), None);
    assert_eq!(s.notify(20), ScrollRequest::Ignored);
    assert_eq!(s.on_refresh(), None);
}

#[test]
fn cancel_discards_pending_sample_only() {
    let mut s = RefreshScheduler::new();
    s.notify(1u8);
    s.cancel();
    assert_eq!(s.on_refresh(), None);
    assert_eq!(s.notify(2), ScrollRequest::Scheduled);
    assert_eq!(s.on_refresh(), Some(2));
}
