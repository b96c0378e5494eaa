mod common;

use approx::assert_relative_eq;

use authentix_core::config::ImagingConfig;
use authentix_core::error::AuthentixError;
use authentix_core::io::decode::decode_bytes;
use authentix_core::io::handle::HandleTracker;
use authentix_core::photo::profile::{process_profile_bytes, CropPhase, CropSession, Outcome};

use common::{decode_jpeg, encode, gradient_image, mean_abs_diff, png_bytes};

fn session() -> (CropSession, HandleTracker) {
    let tracker = HandleTracker::new();
    (
        CropSession::new(ImagingConfig::default(), tracker.clone()),
        tracker,
    )
}

#[test]
fn test_load_creates_centered_viewport() {
    let (mut s, tracker) = session();
    assert_eq!(s.phase(), CropPhase::Idle);

    assert_eq!(s.load_bytes(&png_bytes(560, 560)).unwrap(), Outcome::Accepted);
    assert_eq!(s.phase(), CropPhase::Ready);
    assert_eq!(tracker.live(), 1);

    let vp = s.viewport().unwrap();
    assert_relative_eq!(vp.scale(), 0.5);
    assert_relative_eq!(vp.pan().0, 0.0);
    assert!(!s.show_drag_hint());

    s.load_bytes(&png_bytes(1120, 280)).unwrap();
    let vp = s.viewport().unwrap();
    assert_relative_eq!(vp.scale(), 1.0);
    assert_relative_eq!(vp.pan().0, 420.0);
    assert!(s.show_drag_hint());
    // The first source was released when the second selection started.
    assert_eq!(tracker.live(), 1);
}

#[test]
fn test_zero_byte_selection_creates_no_viewport() {
    let (mut s, tracker) = session();
    let err = s.load_bytes(&[]).unwrap_err();
    assert!(matches!(err, AuthentixError::DecodeFailure(_)));
    assert_eq!(s.phase(), CropPhase::Idle);
    assert!(s.viewport().is_none());
    assert_eq!(tracker.live(), 0);
}

#[test]
fn test_drag_loop_clamps_and_returns_to_ready() {
    let (mut s, _tracker) = session();
    s.load_bytes(&png_bytes(400, 280)).unwrap();

    assert!(s.pointer_down(100.0, 100.0));
    assert_eq!(s.phase(), CropPhase::Dragging);
    assert!(s.pointer_move(90.0, 100.0));
    assert_relative_eq!(s.viewport().unwrap().pan().0, 70.0);
    assert!(s.pointer_move(-900.0, 100.0));
    assert_relative_eq!(s.viewport().unwrap().pan().0, 120.0);
    assert!(s.pointer_up());
    assert_eq!(s.phase(), CropPhase::Ready);

    // A second drag starts from where the first one ended.
    s.pointer_down(0.0, 0.0);
    s.pointer_move(200.0, 0.0);
    assert_relative_eq!(s.viewport().unwrap().pan().0, 0.0);
    s.pointer_up();
}

#[test]
fn test_pointer_events_ignored_outside_drag() {
    let (mut s, _tracker) = session();
    assert!(!s.pointer_down(1.0, 1.0));
    assert!(!s.pointer_move(1.0, 1.0));
    assert!(!s.pointer_up());

    s.load_bytes(&png_bytes(300, 300)).unwrap();
    assert!(!s.pointer_move(5.0, 5.0));
    assert!(!s.pointer_up());
    assert_eq!(s.phase(), CropPhase::Ready);
}

#[test]
fn test_apply_produces_square_output_and_releases_source() {
    let (mut s, tracker) = session();
    s.load_bytes(&png_bytes(2000, 1000)).unwrap();

    let out = s.apply().unwrap().clone();
    assert_eq!((out.width, out.height), (300, 300));
    assert!(out.to_data_uri().starts_with("data:image/jpeg;base64,"));
    assert_eq!(decode_jpeg(&out.bytes).dimensions(), (300, 300));

    assert_eq!(s.phase(), CropPhase::Applied);
    assert!(s.viewport().is_none());
    assert_eq!(tracker.live(), 0);
}

#[test]
fn test_zero_pan_crop_of_native_size_source_is_identity() {
    let tracker = HandleTracker::new();
    let config = ImagingConfig {
        profile_output_side: 280,
        jpeg_quality: 100,
        ..ImagingConfig::default()
    };
    let mut s = CropSession::new(config, tracker);
    let src = gradient_image(280, 280);
    s.load_bytes(&encode(&src, image::ImageFormat::Png)).unwrap();
    assert_eq!(s.viewport().unwrap().pan(), (0.0, 0.0));

    let out = s.apply().unwrap();
    let decoded = decode_jpeg(&out.bytes);
    assert!(mean_abs_diff(&decoded, &src) < 2.0);
}

#[test]
fn test_small_source_is_upscaled_uniformly() {
    let (mut s, _tracker) = session();
    s.load_bytes(&png_bytes(100, 100)).unwrap();
    let vp = s.viewport().unwrap();
    assert_relative_eq!(vp.scale(), 2.8, epsilon = 1e-12);
    assert!(!vp.is_large());
    assert!(!s.show_drag_hint());

    let out = s.apply().unwrap();
    assert_eq!((out.width, out.height), (300, 300));
}

#[test]
fn test_apply_is_disabled_while_pending() {
    let (mut s, _tracker) = session();
    s.begin_load();
    assert!(s.is_busy());
    assert!(matches!(
        s.prepare_apply(),
        Err(AuthentixError::InvalidState { phase: "loading" })
    ));

    let (mut s, _tracker) = session();
    s.load_bytes(&png_bytes(300, 300)).unwrap();
    let job = s.prepare_apply().unwrap();
    assert_eq!(s.phase(), CropPhase::Applying);
    assert!(s.is_busy() && !s.can_apply());
    assert!(s.prepare_apply().is_err());

    let result = job.run();
    assert_eq!(s.finish_apply(job.ticket(), result).unwrap(), Outcome::Accepted);
    assert_eq!(s.phase(), CropPhase::Applied);
}

#[test]
fn test_new_selection_supersedes_in_flight_load() {
    let (mut s, tracker) = session();
    let first = s.begin_load();
    let second = s.begin_load();

    let late = decode_bytes(&png_bytes(500, 300), &tracker);
    assert_eq!(s.complete_load(first, late).unwrap(), Outcome::Superseded);
    assert_eq!(s.phase(), CropPhase::Loading);
    assert_eq!(tracker.live(), 0);

    let fresh = decode_bytes(&png_bytes(300, 500), &tracker);
    assert_eq!(s.complete_load(second, fresh).unwrap(), Outcome::Accepted);
    assert_eq!(s.viewport().unwrap().source_size(), (300, 500));
}

#[test]
fn test_new_selection_supersedes_in_flight_apply() {
    let (mut s, tracker) = session();
    s.load_bytes(&png_bytes(300, 300)).unwrap();
    let job = s.prepare_apply().unwrap();

    s.load_bytes(&png_bytes(600, 300)).unwrap();
    let stale = job.run();
    assert_eq!(s.finish_apply(job.ticket(), stale).unwrap(), Outcome::Superseded);
    assert_eq!(s.phase(), CropPhase::Ready);
    assert_eq!(s.viewport().unwrap().source_size(), (600, 300));
    assert_eq!(tracker.live(), 1);
}

#[test]
fn test_failed_apply_returns_to_ready() {
    let tracker = HandleTracker::new();
    let config = ImagingConfig {
        max_surface_side: 128,
        ..ImagingConfig::default()
    };
    let mut s = CropSession::new(config, tracker.clone());
    s.load_bytes(&png_bytes(300, 300)).unwrap();

    let err = s.apply().unwrap_err();
    assert!(matches!(err, AuthentixError::RenderFailure(_)));
    assert_eq!(err.user_message(), "Could not apply crop.");
    assert_eq!(s.phase(), CropPhase::Ready);
    assert!(s.viewport().is_some());
    assert_eq!(tracker.live(), 1);
}

#[test]
fn test_cancel_releases_source_and_drops_results() {
    let (mut s, tracker) = session();
    s.load_bytes(&png_bytes(300, 300)).unwrap();
    s.pointer_down(0.0, 0.0);
    let ticket = s.begin_load();
    s.cancel();
    assert_eq!(s.phase(), CropPhase::Cancelled);
    assert_eq!(tracker.live(), 0);

    let late = decode_bytes(&png_bytes(10, 10), &tracker);
    assert_eq!(s.complete_load(ticket, late).unwrap(), Outcome::Superseded);
    assert_eq!(s.phase(), CropPhase::Cancelled);
    assert_eq!(tracker.live(), 0);
}

#[test]
fn test_applied_session_restarts_on_new_selection() {
    let (mut s, _tracker) = session();
    s.load_bytes(&png_bytes(300, 300)).unwrap();
    s.apply().unwrap();
    assert!(s.output().is_some());

    s.load_bytes(&png_bytes(320, 320)).unwrap();
    assert_eq!(s.phase(), CropPhase::Ready);
    assert!(s.output().is_none());
}

fn dragged_output(dx: f64) -> image::RgbImage {
    let tracker = HandleTracker::new();
    let config = ImagingConfig {
        jpeg_quality: 100,
        ..ImagingConfig::default()
    };
    let mut s = CropSession::new(config, tracker);
    s.load_bytes(&png_bytes(100, 50)).unwrap();
    assert!(s.pointer_down(0.0, 0.0));
    s.pointer_move(dx, 0.0);
    s.pointer_up();
    decode_jpeg(&s.apply().unwrap().bytes)
}

#[test]
fn test_sub_pixel_pan_changes_upscaled_crop() {
    // Scale 5.6, centred pan 140: these drags land on pan 11.2 and 13.9,
    // i.e. source x 2.0 and ~2.48.
    let a = dragged_output(128.8);
    let b = dragged_output(126.1);

    let red = |img: &image::RgbImage| {
        img.pixels().map(|p| p[0] as f64).sum::<f64>() / (img.width() * img.height()) as f64
    };
    assert_ne!(a, b);
    assert!(red(&b) - red(&a) > 0.5, "mean red {} -> {}", red(&a), red(&b));
}

#[test]
fn test_uncropped_profile_photo_is_bounded() {
    let tracker = HandleTracker::new();
    let config = ImagingConfig::default();

    let out = process_profile_bytes(&png_bytes(1200, 600), &config, &tracker).unwrap();
    assert_eq!((out.width, out.height), (300, 150));
    assert_eq!(decode_jpeg(&out.bytes).dimensions(), (300, 150));

    let small = process_profile_bytes(&png_bytes(200, 120), &config, &tracker).unwrap();
    assert_eq!((small.width, small.height), (200, 120));
    assert_eq!(tracker.live(), 0);
}

#[test]
fn test_uncropped_profile_decode_failure_releases_handle() {
    let tracker = HandleTracker::new();
    assert!(matches!(
        process_profile_bytes(&[], &ImagingConfig::default(), &tracker),
        Err(AuthentixError::DecodeFailure(_))
    ));
    assert_eq!(tracker.live(), 0);
}
