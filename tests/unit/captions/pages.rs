use super::*;

fn tok(text: &str, start_ms: f64) -> CaptionToken {
    CaptionToken::new(text, start_ms, start_ms + 100.0)
}

fn fps30() -> Fps {
    Fps::new(30.0).unwrap()
}

#[test]
fn merges_tokens_within_window() {
    let tokens = [tok("a", 0.0), tok("b", 150.0), tok("c", 500.0)];
    let pages = build_pages(&tokens, 200);
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].tokens.len(), 2);
    assert_eq!(pages[0].start_ms, 0.0);
    assert_eq!(pages[0].text(), "ab");
    assert_eq!(pages[1].text(), "c");
    assert_eq!(pages[1].start_ms, 500.0);
}

#[test]
fn spaced_tokens_give_one_page_each() {
    let tokens: Vec<_> = (0..10).map(|i| tok("w", i as f64 * 201.0)).collect();
    let pages = build_pages(&tokens, 200);
    assert_eq!(pages.len(), tokens.len());
}

#[test]
fn window_is_measured_from_latest_token() {
    // 0 -> 150 -> 300 -> 450 chain together even though 450 is far from 0.
    let tokens = [tok("a", 0.0), tok("b", 150.0), tok("c", 300.0), tok("d", 450.0)];
    assert_eq!(build_pages(&tokens, 200).len(), 1);
}

#[test]
fn exactly_window_apart_stays_on_page() {
    let tokens = [tok("a", 0.0), tok("b", 200.0)];
    assert_eq!(build_pages(&tokens, 200).len(), 1);
}

#[test]
fn empty_tokens_make_no_pages() {
    assert!(build_pages(&[], 200).is_empty());
    let track = CaptionTrack::from_tokens(&[], 200, fps30(), 60).unwrap();
    assert!(track.cues.is_empty());
    assert!(track.active_at(FrameIndex(0)).is_none());
}

#[test]
fn frame_ranges_match_worked_example() {
    let tokens = [tok("a", 0.0), tok("b", 150.0), tok("c", 500.0)];
    let pages = build_pages(&tokens, 200);
    assert_eq!(frame_range_for(&pages, 0, fps30(), 60).unwrap(), (0, 15));
    assert_eq!(frame_range_for(&pages, 1, fps30(), 60).unwrap(), (15, 60));
}

#[test]
fn last_page_holds_until_the_end_regardless_of_end_ms() {
    let pages = build_pages(&[CaptionToken::new("x", 1000.0, 1200.0)], 200);
    assert_eq!(frame_range_for(&pages, 0, fps30(), 900).unwrap(), (30, 900));
}

#[test]
fn index_out_of_bounds_is_an_error() {
    let pages = build_pages(&[tok("a", 0.0)], 200);
    assert!(matches!(
        frame_range_for(&pages, 1, fps30(), 10).unwrap_err(),
        ReelError::Evaluation(_)
    ));
}

#[test]
fn consecutive_cues_never_overlap_and_end_at_total() {
    let tokens: Vec<_> = (0..40)
        .map(|i| tok("w", (i * 233 + (i % 3) * 17) as f64))
        .collect();
    let track = CaptionTrack::from_tokens(&tokens, 200, fps30(), 400).unwrap();
    assert!(!track.cues.is_empty());
    for pair in track.cues.windows(2) {
        assert_eq!(pair[0].range.end, pair[1].range.start);
    }
    assert_eq!(track.cues.last().unwrap().range.end, FrameIndex(400));
}

#[test]
fn pages_sharing_a_start_frame_drop_the_empty_one() {
    // At 2 fps, 0ms and 201ms both round to frame 0.
    let tokens = [tok("first", 0.0), tok("second", 201.0), tok("third", 1500.0)];
    let fps = Fps::new(2.0).unwrap();
    let track = CaptionTrack::from_tokens(&tokens, 200, fps, 10).unwrap();
    assert_eq!(track.pages.len(), 3);
    let texts: Vec<_> = track.cues.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["second", "third"]);
    assert_eq!(track.cues[0].range, FrameRange::new(FrameIndex(0), FrameIndex(3)).unwrap());
}

#[test]
fn pages_past_the_end_are_dropped() {
    let tokens = [tok("a", 0.0), tok("late", 5000.0)];
    let track = CaptionTrack::from_tokens(&tokens, 200, fps30(), 60).unwrap();
    assert_eq!(track.cues.len(), 1);
    assert_eq!(track.cues[0].range.end, FrameIndex(60));
}

#[test]
fn active_at_finds_single_cue() {
    let tokens = [tok("a", 0.0), tok("b", 150.0), tok("c", 500.0)];
    let track = CaptionTrack::from_tokens(&tokens, 200, fps30(), 60).unwrap();
    assert_eq!(track.active_at(FrameIndex(0)).unwrap().text, "ab");
    assert_eq!(track.active_at(FrameIndex(14)).unwrap().text, "ab");
    assert_eq!(track.active_at(FrameIndex(15)).unwrap().text, "c");
    assert_eq!(track.active_at(FrameIndex(59)).unwrap().text, "c");
    assert!(track.active_at(FrameIndex(60)).is_none());
}

#[test]
fn gap_before_first_cue_has_no_caption() {
    let track = CaptionTrack::from_tokens(&[tok("late", 1000.0)], 200, fps30(), 60).unwrap();
    assert!(track.active_at(FrameIndex(29)).is_none());
    assert_eq!(track.active_at(FrameIndex(30)).unwrap().text, "late");
}

#[test]
fn from_tokens_validates() {
    let bad = [CaptionToken::new("x", f64::NAN, 1.0)];
    assert!(matches!(
        CaptionTrack::from_tokens(&bad, 200, fps30(), 10).unwrap_err(),
        ReelError::InvalidInput(_)
    ));
}
