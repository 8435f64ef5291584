use std::time::Duration;

use tokio::time::Instant;
use volume_compare::session::Debouncer;

#[tokio::test(start_paused = true)]
async fn latest_arm_wins_and_fires_once() {
    let mut debouncer = Debouncer::new("slice_update", Duration::from_millis(50));
    assert!(!debouncer.is_pending());

    debouncer.arm(Instant::now(), 1);
    tokio::time::advance(Duration::from_millis(30)).await;
    debouncer.arm(Instant::now(), 2);

    tokio::time::advance(Duration::from_millis(30)).await;
    assert_eq!(debouncer.take_due(Instant::now()), None);
    assert!(debouncer.is_pending());

    tokio::time::advance(Duration::from_millis(20)).await;
    assert_eq!(debouncer.take_due(Instant::now()), Some(2));
    assert_eq!(debouncer.take_due(Instant::now()), None);
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn deadline_tracks_the_latest_arm() {
    let mut debouncer = Debouncer::new("transform_update", Duration::from_millis(150));
    let start = Instant::now();
    debouncer.arm(start, ());
    assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(150)));

    tokio::time::advance(Duration::from_millis(100)).await;
    let rearmed = Instant::now();
    debouncer.arm(rearmed, ());
    assert_eq!(debouncer.deadline(), Some(rearmed + Duration::from_millis(150)));

    tokio::time::sleep_until(rearmed + debouncer.delay()).await;
    assert_eq!(debouncer.take_due(Instant::now()), Some(()));
}

#[test]
fn cancel_drops_the_pending_task() {
    let mut debouncer = Debouncer::new("slice_update", Duration::from_millis(50));
    let now = Instant::now();
    debouncer.arm(now, "target");
    assert_eq!(debouncer.cancel(), Some("target"));
    assert_eq!(debouncer.deadline(), None);
    assert_eq!(debouncer.take_due(now + Duration::from_secs(1)), None);
}
