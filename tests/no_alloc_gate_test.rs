use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blockfall::core::GameSnapshot;
use blockfall::engine::{FrameConfig, FrameController};
use blockfall::input::InputHandler;
use blockfall::types::{Intent, TICK_MS};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// Both gates share one allocator counter, so they run in a single test.
#[test]
fn hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut frame = FrameController::new(1, FrameConfig::default());
    let mut snap = GameSnapshot::default();
    let mut ih = InputHandler::new();

    // Warm-up.
    let _ = frame.tick(TICK_MS);
    let _ = ih.handle_press(Intent::MoveLeft);
    let _ = ih.update(16);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            let _ = ih.update(16);
        }

        for _ in 0..200 {
            let _ = frame.tick(TICK_MS);
            frame.session().snapshot_into(&mut snap);
        }

        for intent in [
            Intent::MoveLeft,
            Intent::MoveRight,
            Intent::RotateCw,
            Intent::RotateCcw,
            Intent::SoftDrop,
        ] {
            for _ in 0..10 {
                frame.press(intent);
                let _ = frame.tick(TICK_MS);
                frame.release(intent);
            }
        }

        // Hard drop drives lock, line clear and spawn.
        for _ in 0..25 {
            frame.press(Intent::HardDrop);
            let _ = frame.tick(TICK_MS);
            frame.press(Intent::Hold);
            let _ = frame.tick(1000);
        }
    });

    assert!(allocs == 0);
}
