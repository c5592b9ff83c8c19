use kernel_sync::{SharedSignal, SyncOnceCell};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

#[test]
fn static_signal_hands_out_a_single_writer() {
    static SIGNAL: SharedSignal = SharedSignal::new(1);

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| SIGNAL.claim_writer().is_some()))
        .collect();
    let claimed = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|c| *c)
        .count();

    assert_eq!(claimed, 1, "exactly one thread may own the writer");
}

#[test]
fn readers_only_observe_published_outcomes() {
    let signal = Arc::new(SharedSignal::new(1));
    let done = Arc::new(AtomicBool::new(false));

    let writer_thread = {
        let signal = Arc::clone(&signal);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut writer = signal.claim_writer().unwrap();
            for i in 0..20_000 {
                writer.publish(if i % 2 == 0 { -1 } else { 1 });
            }
            done.store(true, Ordering::Release);
        })
    };

    let reader = signal.reader();
    while !done.load(Ordering::Acquire) {
        let v = reader.get();
        assert!(v == -1 || v == 1, "torn or foreign value {v}");
    }
    writer_thread.join().unwrap();
    assert_eq!(reader.get(), 1);
}

#[test]
fn once_cell_publishes_to_other_threads() {
    static CELL: SyncOnceCell<[u32; 4]> = SyncOnceCell::new();

    let t = thread::spawn(|| *CELL.get_or_init(|| [1, 2, 3, 4]));
    let seen = t.join().unwrap();

    assert_eq!(seen, [1, 2, 3, 4]);
    assert_eq!(CELL.get(), Some(&[1, 2, 3, 4]));
}
