//! Binary morphology regression test
//!
//! Tests dilation, erosion, opening, and closing against the algebraic
//! properties they must satisfy on a mixed test plane.
//!
//! Run with:
//! ```
//! cargo test -p ipl-morph --test binmorph1_reg
//! ```

use ipl_core::Plane;
use ipl_morph::{Sel, close, dilate, erode, open};
use ipl_test::{RegParams, speckle_plane};

const WIDTH: u32 = 96;
const HEIGHT: u32 = 64;

fn invert(plane: &Plane) -> Plane {
    Plane::from_fn(plane.width(), plane.height(), |x, y| !plane.is_foreground(x, y)).unwrap()
}

/// Every foreground pixel of `a` is foreground in `b`.
fn is_subset(a: &Plane, b: &Plane) -> bool {
    a.data().iter().zip(b.data()).all(|(&pa, &pb)| pa <= pb)
}

#[test]
fn binmorph1_reg() {
    let mut rp = RegParams::new("binmorph1");

    let pixs = speckle_plane(WIDTH, HEIGHT);
    let orig_count = pixs.count_foreground();
    eprintln!("Plane size: {}x{}", WIDTH, HEIGHT);
    eprintln!("Original foreground pixels: {}", orig_count);

    for sel in [Sel::create_square(3).unwrap(), Sel::create_cross(5).unwrap()] {
        eprintln!("  Structuring element:\n{}", sel);

        // Dilation grows, erosion shrinks
        let dilated = dilate(&pixs, &sel, 1).unwrap();
        let eroded = erode(&pixs, &sel, 1).unwrap();
        eprintln!(
            "  dilated: {}  eroded: {}",
            dilated.count_foreground(),
            eroded.count_foreground()
        );
        rp.check(is_subset(&pixs, &dilated));
        rp.check(is_subset(&eroded, &pixs));

        // Duality: erode(A) == !dilate(!A)
        let dual = invert(&dilate(&invert(&pixs), &sel, 1).unwrap());
        rp.compare_planes(&eroded, &dual);

        // open(A) <= A <= close(A)
        let opened = open(&pixs, &sel, 1).unwrap();
        let closed = close(&pixs, &sel, 1).unwrap();
        rp.check(is_subset(&opened, &pixs));
        rp.check(is_subset(&pixs, &closed));

        // Idempotence
        rp.compare_planes(&opened, &open(&opened, &sel, 1).unwrap());
        rp.compare_planes(&closed, &close(&closed, &sel, 1).unwrap());

        // Opening equals erosion then dilation
        rp.compare_planes(&opened, &dilate(&eroded, &sel, 1).unwrap());
        rp.compare_planes(&closed, &erode(&dilated, &sel, 1).unwrap());
    }

    // Iterating a 3x3 square equals one pass of a larger square
    eprintln!("  Testing iteration against larger squares");
    let sel3 = Sel::create_square(3).unwrap();
    for n in 1..=3u32 {
        let big = Sel::create_square(2 * n + 1).unwrap();
        rp.compare_planes(&dilate(&pixs, &big, 1).unwrap(), &dilate(&pixs, &sel3, n).unwrap());
        rp.compare_planes(&erode(&pixs, &big, 1).unwrap(), &erode(&pixs, &sel3, n).unwrap());
    }

    // Input untouched
    rp.compare_planes(&speckle_plane(WIDTH, HEIGHT), &pixs);

    assert!(rp.cleanup(), "binmorph1 regression test failed");
}
